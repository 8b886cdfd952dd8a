//! `proptest` support: arbitrary deques whose contents wrap the buffer end.

use proptest::arbitrary::{any, any_with, Arbitrary};
use proptest::collection::vec;
use proptest::sample::Index;
use proptest::strategy::{BoxedStrategy, Strategy};

use super::RingDeque;

impl<T> Arbitrary for RingDeque<T>
where
    T: Arbitrary + 'static,
{
    type Parameters = T::Parameters;
    type Strategy = BoxedStrategy<Self>;

    /// Generates up to 63 elements with up to 7 spare slots. A random prefix
    /// is pushed to the front of an empty ring, so `head` sits near the end of
    /// the buffer and the rest wraps to slot 0.
    fn arbitrary_with(args: Self::Parameters) -> Self::Strategy {
        (vec(any_with::<T>(args), 0..64), any::<Index>(), 0usize..8)
            .prop_map(|(mut items, split, spare)| {
                let split = split.index(items.len() + 1);
                let back = items.split_off(split);
                let mut deque = RingDeque::with_capacity(items.len() + back.len() + spare);
                deque.extend_front(items);
                deque.extend(back);
                deque
            })
            .boxed()
    }
}
