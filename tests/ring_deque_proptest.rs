use proptest::prelude::*;
use ringheap::RingDeque;
use std::collections::{LinkedList, VecDeque};

#[derive(Debug, Clone)]
enum Operation {
    PushBack(i32),
    PushFront(i32),
    PushBackSlice(Vec<i32>),
    PushFrontSlice(Vec<i32>),
    PopBack,
    PopFront,
    Grow(usize),
    Reset,
}

fn operation() -> impl Strategy<Value = Operation> {
    prop_oneof![
        4 => any::<i32>().prop_map(Operation::PushBack),
        4 => any::<i32>().prop_map(Operation::PushFront),
        2 => proptest::collection::vec(any::<i32>(), 0..8).prop_map(Operation::PushBackSlice),
        2 => proptest::collection::vec(any::<i32>(), 0..8).prop_map(Operation::PushFrontSlice),
        4 => Just(Operation::PopBack),
        4 => Just(Operation::PopFront),
        1 => (0usize..40).prop_map(Operation::Grow),
        1 => Just(Operation::Reset),
    ]
}

fn assert_matches(dq: &RingDeque<i32>, oracle: &VecDeque<i32>) {
    assert_eq!(dq.len(), oracle.len(), "Length mismatch");
    assert!(dq.capacity() >= dq.len());
    for (i, expected) in oracle.iter().enumerate() {
        assert_eq!(dq.at(i), expected, "Content mismatch at index {}", i);
    }
    assert!(dq.iter().eq(oracle.iter()), "Iteration mismatch");
    assert!(dq.iter().rev().eq(oracle.iter().rev()), "Reverse iteration mismatch");
}

proptest! {
    #[test]
    fn test_ring_deque_matches_std_vec_deque(ops in proptest::collection::vec(operation(), 1..200)) {
        let mut oracle = VecDeque::new();
        let mut dq = RingDeque::new();
        let mut last_cap = 0;

        for op in ops {
            match op {
                Operation::PushBack(v) => {
                    dq.push_back(v);
                    oracle.push_back(v);
                }
                Operation::PushFront(v) => {
                    dq.push_front(v);
                    oracle.push_front(v);
                }
                Operation::PushBackSlice(vs) => {
                    dq.push_back_slice(&vs);
                    oracle.extend(vs.iter().copied());
                }
                Operation::PushFrontSlice(vs) => {
                    dq.push_front_slice(&vs);
                    for &v in vs.iter().rev() {
                        oracle.push_front(v);
                    }
                }
                Operation::PopBack => {
                    prop_assert_eq!(dq.pop_back(), oracle.pop_back());
                }
                Operation::PopFront => {
                    prop_assert_eq!(dq.pop_front(), oracle.pop_front());
                }
                Operation::Grow(n) => {
                    let before: Vec<i32> = dq.iter().copied().collect();
                    dq.grow(n);
                    prop_assert!(dq.capacity() - dq.len() >= n);
                    prop_assert!(dq.iter().copied().eq(before));
                }
                Operation::Reset => {
                    dq.reset();
                    oracle.clear();
                    prop_assert_eq!(dq.capacity(), last_cap);
                }
            }
            prop_assert!(dq.capacity() >= last_cap, "Capacity shrank");
            last_cap = dq.capacity();
            assert_matches(&dq, &oracle);
        }

        // Final consistency check through the draining iterator
        let drained: Vec<i32> = dq.pop_all().collect();
        prop_assert_eq!(drained, oracle.into_iter().collect::<Vec<_>>());
        prop_assert!(dq.is_empty());
    }

    #[test]
    fn test_ring_deque_matches_linked_list(
        seed in proptest::collection::vec(any::<i16>(), 0..16),
        ops in proptest::collection::vec(0u8..4, 0..100),
    ) {
        let mut list: LinkedList<i16> = seed.iter().copied().collect();
        let mut dq = RingDeque::from(seed);
        let mut next = 0i16;

        for op in ops {
            match op {
                0 => { dq.push_back(next); list.push_back(next); }
                1 => { dq.push_front(next); list.push_front(next); }
                2 => prop_assert_eq!(dq.pop_back(), list.pop_back()),
                _ => prop_assert_eq!(dq.pop_front(), list.pop_front()),
            }
            next = next.wrapping_add(1);
            prop_assert!(dq.iter().eq(list.iter()));
        }
    }

    #[test]
    fn test_pop_all_abandoned_at_any_point(len in 0usize..40, rotation in 0usize..40, take in 0usize..50) {
        let mut dq = RingDeque::with_capacity(len);
        for i in 0..len {
            dq.push_back(i);
        }
        // Rotate so the contents wrap the end of the buffer
        for _ in 0..rotation.min(len) {
            let v = dq.pop_front().unwrap();
            dq.push_back(v);
        }
        let expected: Vec<usize> = dq.iter().copied().collect();

        let taken: Vec<usize> = dq.pop_all().take(take).collect();
        let split = take.min(len);
        prop_assert_eq!(&taken[..], &expected[..split]);
        prop_assert!(dq.iter().copied().eq(expected[split..].iter().copied()));
    }
}

#[cfg(feature = "proptest")]
proptest! {
    #[test]
    fn test_arbitrary_deques_grow_without_reordering(mut dq in any::<RingDeque<u32>>(), extra in 1usize..16) {
        let before: Vec<u32> = dq.iter().copied().collect();
        let cap = dq.capacity();
        dq.grow(cap - dq.len() + extra);
        prop_assert!(dq.capacity() > cap);
        prop_assert!(dq.iter().copied().eq(before.iter().copied()));
        prop_assert_eq!(dq.len(), before.len());
    }
}
