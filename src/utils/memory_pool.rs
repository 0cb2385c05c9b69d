//! Reusable buffers for repeated detection attempts
//!
//! A camera loop scans frames of the same size over and over. The pool keeps:
//! - the luminance buffer produced by grayscale conversion
//! - the finder candidate list filled by the locator
//!
//! Both grow on demand and are never shrunk, so a warmed-up pool makes the
//! scan itself allocation-free.

use crate::models::FinderCandidate;

/// Default luminance capacity: one 640x480 frame
const DEFAULT_CAPACITY: usize = 640 * 480;

/// Pre-allocated buffers shared by successive detection attempts
pub struct BufferPool {
    luminance: Vec<u8>,
    candidates: Vec<FinderCandidate>,
}

impl BufferPool {
    /// Create a new buffer pool sized for a 640x480 frame
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Create a pool with a custom luminance capacity (in pixels)
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            luminance: Vec::with_capacity(capacity),
            candidates: Vec::new(),
        }
    }

    /// Get a luminance buffer of exactly `size` samples (reuses capacity)
    pub fn get_luminance_buffer(&mut self, size: usize) -> &mut [u8] {
        self.luminance.resize(size, 0);
        &mut self.luminance[..size]
    }

    /// Get both buffers at once via split borrowing
    ///
    /// The candidate list is cleared before it is handed out.
    pub fn get_all_buffers(
        &mut self,
        width: usize,
        height: usize,
    ) -> (&mut [u8], &mut Vec<FinderCandidate>) {
        let size = width * height;
        self.luminance.resize(size, 0);
        self.candidates.clear();
        (&mut self.luminance[..size], &mut self.candidates)
    }

    /// Current luminance capacity in pixels
    pub fn luminance_capacity(&self) -> usize {
        self.luminance.capacity()
    }

    /// Clear all buffers (resets lengths but keeps capacity)
    pub fn clear(&mut self) {
        self.luminance.clear();
        self.candidates.clear();
    }
}

impl Default for BufferPool {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_buffer_pool_basic() {
        let mut pool = BufferPool::new();

        let buf1 = pool.get_luminance_buffer(100);
        assert_eq!(buf1.len(), 100);

        let buf2 = pool.get_luminance_buffer(1000);
        assert_eq!(buf2.len(), 1000);

        assert!(pool.luminance_capacity() >= 640 * 480);
    }

    #[test]
    fn test_buffer_pool_growth() {
        let mut pool = BufferPool::with_capacity(100);

        let buf = pool.get_luminance_buffer(500);
        assert_eq!(buf.len(), 500);
        assert!(pool.luminance_capacity() >= 500);
    }

    #[test]
    fn test_candidates_cleared_between_attempts() {
        let mut pool = BufferPool::with_capacity(16);
        {
            let (gray, candidates) = pool.get_all_buffers(4, 4);
            assert_eq!(gray.len(), 16);
            candidates.push(FinderCandidate::new(1, 2));
        }
        let (gray, candidates) = pool.get_all_buffers(2, 2);
        assert_eq!(gray.len(), 4);
        assert!(candidates.is_empty());
    }
}
