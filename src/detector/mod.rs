//! Heuristic QR detection
//!
//! Two stages run on a luminance buffer:
//! - Finder pattern location (7x7 window silhouettes on a 3-pixel grid)
//! - Payload extraction from the image center, with a synthesized identifier
//!   when no readable payload is found

/// Center payload extraction and identifier synthesis
pub mod extractor;
/// Finder pattern location by window classification
pub mod finder;
