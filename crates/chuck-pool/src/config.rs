//! Pool configuration parameters.

use crate::error::PoolError;

/// Default number of elements in a freshly created chunk.
///
/// A request larger than this gets a chunk sized exactly to the request.
pub const DEFAULT_CHUNK_SIZE: usize = 16;

/// Configuration for a [`ChuckAllocator`](crate::ChuckAllocator) pool.
///
/// Shared by every handle that aliases the pool; immutable after the pool
/// is created.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct PoolConfig {
    /// Capacity, in elements of the pool's value type, of each new chunk.
    ///
    /// Default: [`DEFAULT_CHUNK_SIZE`]. Must be non-zero.
    pub chunk_size: usize,
}

impl PoolConfig {
    /// Default chunk capacity in elements.
    pub const DEFAULT_CHUNK_SIZE: usize = DEFAULT_CHUNK_SIZE;

    /// Create a config with default values.
    pub const fn new() -> Self {
        Self {
            chunk_size: Self::DEFAULT_CHUNK_SIZE,
        }
    }

    /// Override the chunk capacity.
    pub const fn with_chunk_size(mut self, chunk_size: usize) -> Self {
        self.chunk_size = chunk_size;
        self
    }

    /// Check that the configuration can back a pool.
    ///
    /// `chunk_size` must be non-zero and no larger than `isize::MAX`. This
    /// check is element-agnostic: a size that passes may still be too
    /// large for a particular `T`, which
    /// [`ChuckAllocator::with_config`](crate::ChuckAllocator::with_config)
    /// rejects with [`PoolError::CapacityOverflow`].
    pub fn validate(&self) -> Result<(), PoolError> {
        if self.chunk_size == 0 {
            return Err(PoolError::InvalidConfig {
                reason: "chunk_size must be non-zero",
            });
        }
        if self.chunk_size > isize::MAX as usize {
            return Err(PoolError::InvalidConfig {
                reason: "chunk_size must not exceed isize::MAX",
            });
        }
        Ok(())
    }

    /// Size in bytes of a default-sized chunk of `T`.
    ///
    /// Saturates instead of overflowing; such a chunk could never be
    /// allocated anyway.
    pub fn chunk_bytes<T>(&self) -> usize {
        self.chunk_size.saturating_mul(std::mem::size_of::<T>())
    }
}

impl Default for PoolConfig {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_chunk_size_is_sixteen() {
        assert_eq!(PoolConfig::default().chunk_size, 16);
        assert_eq!(PoolConfig::new(), PoolConfig::default());
    }

    #[test]
    fn chunk_bytes_scales_with_element_size() {
        let config = PoolConfig::new();
        assert_eq!(config.chunk_bytes::<u8>(), 16);
        assert_eq!(config.chunk_bytes::<u64>(), 128);
        assert_eq!(config.chunk_bytes::<()>(), 0);
    }

    #[test]
    fn zero_chunk_size_rejected() {
        let config = PoolConfig::new().with_chunk_size(0);
        assert!(matches!(
            config.validate(),
            Err(PoolError::InvalidConfig { .. })
        ));
    }

    #[test]
    fn unaddressable_chunk_size_rejected() {
        let config = PoolConfig::new().with_chunk_size(usize::MAX);
        assert!(matches!(
            config.validate(),
            Err(PoolError::InvalidConfig { .. })
        ));
        let edge = PoolConfig::new().with_chunk_size(isize::MAX as usize);
        assert!(edge.validate().is_ok());
    }

    #[test]
    fn custom_chunk_size_accepted() {
        let config = PoolConfig::new().with_chunk_size(4096);
        assert!(config.validate().is_ok());
        assert_eq!(config.chunk_size, 4096);
    }
}
