//! Error type shared by the fallible growth paths of the collections.

/// The error type for a failed `try_grow`.
///
/// Running out of room is the only recoverable failure in this crate; empty
/// containers report absence through `Option` instead.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GrowError {
    /// The requested capacity does not fit in `usize`.
    CapacityOverflow,
    /// The allocator refused to provide a buffer of `capacity` elements.
    AllocFailed {
        /// Total capacity that was requested.
        capacity: usize,
    },
}

impl core::fmt::Display for GrowError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            GrowError::CapacityOverflow => f.write_str("capacity overflow"),
            GrowError::AllocFailed { capacity } => {
                write!(f, "memory allocation of {capacity} elements failed")
            }
        }
    }
}

impl std::error::Error for GrowError {}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_messages() {
        assert_eq!(GrowError::CapacityOverflow.to_string(), "capacity overflow");
        assert_eq!(
            GrowError::AllocFailed { capacity: 16 }.to_string(),
            "memory allocation of 16 elements failed"
        );
    }

    #[test]
    fn is_std_error() {
        fn assert_error<E: std::error::Error>(_: &E) {}
        assert_error(&GrowError::CapacityOverflow);
    }
}
