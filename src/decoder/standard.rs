use crate::decoder::FrameDecoder;
use crate::models::{Detection, DetectionSource, Frame};
use crate::utils::grayscale::rgba_to_luminance_into;

/// Standards-compliant decoder backed by `rqrr`
///
/// Only available when the crate is built with the `rqrr` feature; otherwise
/// [`FrameDecoder::is_available`] reports `false` and `detect` finds nothing.
#[derive(Default)]
pub struct StandardDecoder {
    luminance: Vec<u8>,
}

impl StandardDecoder {
    /// Create a decoder with an empty luminance buffer
    pub fn new() -> Self {
        Self::default()
    }
}

impl FrameDecoder for StandardDecoder {
    fn name(&self) -> &'static str {
        "standard"
    }

    fn is_available(&self) -> bool {
        cfg!(feature = "rqrr")
    }

    fn detect(&mut self, frame: &Frame<'_>) -> Option<Detection> {
        if !self.is_available() {
            return None;
        }
        let (width, height) = (frame.width(), frame.height());
        self.luminance.resize(frame.pixel_count(), 0);
        rgba_to_luminance_into(frame.rgba(), width, height, &mut self.luminance);

        let content = decode_grids(&self.luminance, width, height)?;
        Detection::new(content, DetectionSource::Standard)
    }
}

#[cfg(feature = "rqrr")]
fn decode_grids(gray: &[u8], width: usize, height: usize) -> Option<String> {
    let mut img = rqrr::PreparedImage::prepare_from_greyscale(width, height, |x, y| {
        gray[y * width + x]
    });
    let grids = img.detect_grids();
    log::trace!("rqrr found {} grids", grids.len());
    grids
        .iter()
        .find_map(|grid| grid.decode().ok())
        .map(|(_, content)| content)
}

#[cfg(not(feature = "rqrr"))]
fn decode_grids(_gray: &[u8], _width: usize, _height: usize) -> Option<String> {
    None
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_availability_follows_feature() {
        let decoder = StandardDecoder::new();
        assert_eq!(decoder.is_available(), cfg!(feature = "rqrr"));
        assert_eq!(decoder.name(), "standard");
    }

    #[test]
    fn test_blank_frame_has_no_code() {
        let rgba = vec![255u8; 64 * 64 * 4];
        let frame = Frame::new(&rgba, 64, 64).unwrap();
        let mut decoder = StandardDecoder::new();
        assert!(decoder.detect(&frame).is_none());
    }
}
