/// Errors raised when wrapping a raw RGBA buffer as a [`Frame`]
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum FrameError {
    /// Width or height is zero
    #[error("frame dimensions must be positive, got {width}x{height}")]
    ZeroDimension {
        /// Declared width
        width: usize,
        /// Declared height
        height: usize,
    },
    /// Buffer length does not match `width * height * 4`
    #[error("RGBA buffer has {actual} bytes, expected {expected}")]
    LengthMismatch {
        /// Required byte count
        expected: usize,
        /// Byte count supplied
        actual: usize,
    },
}

/// Borrowed RGBA camera frame with validated dimensions
#[derive(Debug, Clone, Copy)]
pub struct Frame<'a> {
    rgba: &'a [u8],
    width: usize,
    height: usize,
}

impl<'a> Frame<'a> {
    /// Bytes per RGBA pixel
    pub const CHANNELS: usize = 4;

    /// Wrap an RGBA buffer, checking `rgba.len() == width * height * 4`
    pub fn new(rgba: &'a [u8], width: usize, height: usize) -> Result<Self, FrameError> {
        if width == 0 || height == 0 {
            return Err(FrameError::ZeroDimension { width, height });
        }
        let expected = width * height * Self::CHANNELS;
        if rgba.len() != expected {
            return Err(FrameError::LengthMismatch {
                expected,
                actual: rgba.len(),
            });
        }
        Ok(Self { rgba, width, height })
    }

    /// Raw interleaved RGBA samples
    pub fn rgba(&self) -> &'a [u8] {
        self.rgba
    }

    /// Frame width in pixels
    pub fn width(&self) -> usize {
        self.width
    }

    /// Frame height in pixels
    pub fn height(&self) -> usize {
        self.height
    }

    /// Number of pixels in the frame
    pub fn pixel_count(&self) -> usize {
        self.width * self.height
    }
}
