//! Pool-specific error types.

use thiserror::Error;

/// Errors that can occur during pool operations.
///
/// Exhaustion of the underlying system allocator is not represented here:
/// it follows the platform convention and aborts through
/// [`std::alloc::handle_alloc_error`].
#[derive(Clone, Debug, PartialEq, Eq, Error)]
pub enum PoolError {
    /// A request for zero elements.
    #[error("zero-sized allocation request")]
    ZeroSized,
    /// The byte size of the request does not fit in a memory layout.
    #[error(
        "allocation of {requested} elements of {element_size} bytes overflows the address space"
    )]
    CapacityOverflow {
        /// Number of elements requested.
        requested: usize,
        /// Size of one element in bytes.
        element_size: usize,
    },
    /// A [`PoolConfig`](crate::PoolConfig) that cannot back a pool.
    #[error("invalid pool config: {reason}")]
    InvalidConfig {
        /// Which constraint was violated.
        reason: &'static str,
    },
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn display_includes_request_details() {
        let err = PoolError::CapacityOverflow {
            requested: 7,
            element_size: 8,
        };
        let msg = err.to_string();
        assert!(msg.contains("7 elements"));
        assert!(msg.contains("8 bytes"));
    }

    #[test]
    fn display_includes_config_reason() {
        let err = PoolError::InvalidConfig {
            reason: "chunk_size must be non-zero",
        };
        assert_eq!(
            err.to_string(),
            "invalid pool config: chunk_size must be non-zero"
        );
    }
}
