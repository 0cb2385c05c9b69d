//! Frame decoding strategies
//!
//! A [`FrameDecoder`] turns one camera frame into an optional [`Detection`].
//! Two implementations exist:
//! - [`standard::StandardDecoder`]: full QR decode through `rqrr`
//! - [`crate::Detector`]: finder-pattern heuristic with identifier synthesis
//!
//! [`chain::DecoderChain`] probes which of them are available and tries them
//! in preference order.

use crate::models::{Detection, Frame};

/// Ordered fallback across available decoders
pub mod chain;
/// Full QR decoding backed by `rqrr`
pub mod standard;

/// A strategy that can attempt detection on a single frame
pub trait FrameDecoder {
    /// Short name used in logs
    fn name(&self) -> &'static str;

    /// Whether this decoder can run in the current build/environment
    fn is_available(&self) -> bool {
        true
    }

    /// Attempt detection; `None` means no code in this frame
    fn detect(&mut self, frame: &Frame<'_>) -> Option<Detection>;
}
