//! qr_attendance - QR check-in scanning for camera frames
//!
//! A best-effort QR detector built for attendance kiosks: finder patterns are
//! located with a coarse 7x7 window heuristic, a short ASCII payload is read
//! from the center of the frame, and when nothing readable comes out an
//! identifier is synthesized from the finder positions and the clock.
//!
//! Around that core sit a standard decoder (`rqrr`), a decoder chain that
//! falls back between the two, a rate-limited frame scanner and the
//! attendance service wire types.

#![warn(missing_docs)]
#![allow(clippy::missing_docs_in_private_items)]

/// Attendance service request/response types and issued identifiers
pub mod attendance;
/// Scanner configuration (threshold, scan interval, decoder preference)
pub mod config;
/// Frame decoding strategies and the fallback chain
pub mod decoder;
/// Heuristic detection stages (finder location, payload extraction)
pub mod detector;
/// Core data structures (Frame, FinderCandidate, Detection)
pub mod models;
/// Rate-limited frame scanning
pub mod scanner;
/// CLI helpers (image loading, statistics)
pub mod tools;
/// Utility functions (grayscale, buffer pools)
pub mod utils;

pub use config::{DEFAULT_THRESHOLD, ScannerConfig};
pub use models::{Detection, DetectionSource, FinderCandidate, Frame, FrameError};

use decoder::FrameDecoder;
use detector::extractor::PayloadExtractor;
use detector::finder::FinderLocator;
use utils::grayscale::{rgba_to_luminance, rgba_to_luminance_into, rgba_to_luminance_parallel_into};
use utils::memory_pool::BufferPool;

/// Frames at least this large are converted to luminance in parallel
const PARALLEL_MIN_PIXELS: usize = 640 * 480;

/// Detect an identifier in an RGBA frame with the default threshold
///
/// # Arguments
/// * `image` - Raw RGBA bytes (4 bytes per pixel)
/// * `width` - Image width in pixels
/// * `height` - Image height in pixels
///
/// # Returns
/// The detection, or `None` when fewer than three finder patterns were found
pub fn detect(image: &[u8], width: usize, height: usize) -> Option<Detection> {
    detect_with_threshold(image, width, height, DEFAULT_THRESHOLD)
}

/// Detect an identifier in an RGBA frame with an explicit threshold
pub fn detect_with_threshold(
    image: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
) -> Option<Detection> {
    // Step 1: Convert to luminance
    let gray = rgba_to_luminance(image, width, height);

    // Step 2: Locate finder patterns and extract
    detect_from_luminance(&gray, width, height, threshold)
}

/// Detect an identifier from a pre-computed luminance buffer
pub fn detect_from_luminance(
    gray: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
) -> Option<Detection> {
    let candidates = FinderLocator::locate(gray, width, height, threshold);
    PayloadExtractor::extract(gray, width, height, threshold, &candidates)
}

/// Detect using a reusable buffer pool (no per-frame allocation once warm)
///
/// # Example
/// ```
/// use qr_attendance::utils::memory_pool::BufferPool;
///
/// let mut pool = BufferPool::new();
/// let image = vec![255u8; 640 * 480 * 4]; // blank RGBA frame
/// let result = qr_attendance::detect_with_pool(&image, 640, 480, 128, &mut pool);
/// assert!(result.is_none());
/// ```
pub fn detect_with_pool(
    image: &[u8],
    width: usize,
    height: usize,
    threshold: u8,
    pool: &mut BufferPool,
) -> Option<Detection> {
    let (gray, candidates) = pool.get_all_buffers(width, height);

    if width * height >= PARALLEL_MIN_PIXELS {
        rgba_to_luminance_parallel_into(image, width, height, gray);
    } else {
        rgba_to_luminance_into(image, width, height, gray);
    }

    FinderLocator::locate_into(gray, width, height, threshold, candidates);
    PayloadExtractor::extract(gray, width, height, threshold, candidates)
}

/// Heuristic detector with configurable threshold and optional buffer pool
pub struct Detector {
    /// Optional buffer pool for memory reuse
    pool: Option<BufferPool>,
    threshold: u8,
}

impl Detector {
    /// Create a new detector with default settings
    pub fn new() -> Self {
        Self {
            pool: None,
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Create a detector with buffer pooling enabled
    pub fn with_pool() -> Self {
        Self {
            pool: Some(BufferPool::new()),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Create a detector with a specific pool capacity (in pixels)
    pub fn with_pool_capacity(capacity: usize) -> Self {
        Self {
            pool: Some(BufferPool::with_capacity(capacity)),
            threshold: DEFAULT_THRESHOLD,
        }
    }

    /// Set the binarization threshold
    pub fn threshold(mut self, threshold: u8) -> Self {
        self.threshold = threshold;
        self
    }

    /// Detect an identifier in an RGBA image
    pub fn detect(&mut self, image: &[u8], width: usize, height: usize) -> Option<Detection> {
        match &mut self.pool {
            Some(pool) => detect_with_pool(image, width, height, self.threshold, pool),
            None => detect_with_threshold(image, width, height, self.threshold),
        }
    }

    /// Clear the internal buffer pool (keeps capacity)
    pub fn clear_pool(&mut self) {
        if let Some(pool) = &mut self.pool {
            pool.clear();
        }
    }
}

impl Default for Detector {
    fn default() -> Self {
        Self::new()
    }
}

impl FrameDecoder for Detector {
    fn name(&self) -> &'static str {
        "heuristic"
    }

    fn detect(&mut self, frame: &Frame<'_>) -> Option<Detection> {
        Detector::detect(self, frame.rgba(), frame.width(), frame.height())
    }
}
