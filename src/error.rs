//! Error types for [`ShiftBuffer`](crate::ShiftBuffer).
//!
//! Only conditions the buffer itself detects are represented here: invalid requests and
//! failed allocations.  Panics raised by the element type's own `Clone`, `Drop` or by a
//! source iterator are never converted into an error; they unwind through the buffer
//! after its bookkeeping is complete.

use core::alloc::Layout;

use thiserror::Error;

/// Errors returned by fallible [`ShiftBuffer`](crate::ShiftBuffer) operations.
///
/// Every variant is produced *before* any element is touched, so the buffer is unchanged
/// when one of these comes back.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
#[non_exhaustive]
pub enum ShiftBufferError {
    /// More elements were requested than the buffer currently holds.
    #[error("requested {requested} items but the buffer only holds {available}")]
    InsufficientItems { requested: usize, available: usize },

    /// The required capacity does not fit into a valid allocation layout.
    #[error("capacity overflow")]
    CapacityOverflow,

    /// The global allocator could not provide the requested block.
    #[error("allocation of {} bytes (align {}) failed", layout.size(), layout.align())]
    AllocationFailed { layout: Layout },
}

impl ShiftBufferError {
    /// Returns `true` for the variants that stem from memory exhaustion rather than from
    /// an invalid request.
    pub fn is_allocation_failure(&self) -> bool {
        matches!(self, Self::CapacityOverflow | Self::AllocationFailed { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::error::Error as StdError;

    fn takes_error(e: &dyn StdError) -> String {
        e.to_string()
    }

    #[test]
    fn test_error_display_insufficient() {
        let err = ShiftBufferError::InsufficientItems {
            requested: 8,
            available: 3,
        };
        let msg = takes_error(&err);
        assert!(msg.contains('8'));
        assert!(msg.contains('3'));
        assert!(!err.is_allocation_failure());
    }

    #[test]
    fn test_error_display_allocation() {
        let layout = Layout::array::<u64>(4).unwrap();
        let err = ShiftBufferError::AllocationFailed { layout };
        assert!(takes_error(&err).contains("32 bytes"));
        assert!(err.is_allocation_failure());
        assert!(ShiftBufferError::CapacityOverflow.is_allocation_failure());
    }
}
