//! Payload recovery from the center of a frame, with identifier synthesis
//! when nothing readable comes out

use crate::models::{Detection, DetectionSource, FinderCandidate};
use std::time::{SystemTime, UNIX_EPOCH};

/// Upper bound on the side of the sampled center square
pub const MAX_EXTRACTION_SIZE: usize = 100;
/// Pixel stride inside the sampled square
pub const EXTRACTION_STEP: usize = 2;
/// At most this many 8-bit chunks are decoded
pub const MAX_CHUNKS: usize = 20;
/// Candidates required before anything is attempted
pub const MIN_CANDIDATES: usize = 3;
/// Prefix of synthesized identifiers
pub const FALLBACK_PREFIX: &str = "QR_";

/// Payloads shorter than this are not trusted
const MIN_PAYLOAD_LEN: usize = 4;
/// Synthesized identifiers keep the last 6 digits of the millisecond clock
const TIME_SUFFIX_MODULUS: u64 = 1_000_000;

/// Turns located finder patterns into a [`Detection`]
pub struct PayloadExtractor;

impl PayloadExtractor {
    /// Extract an identifier using the wall clock for the fallback suffix
    pub fn extract(
        gray: &[u8],
        width: usize,
        height: usize,
        threshold: u8,
        candidates: &[FinderCandidate],
    ) -> Option<Detection> {
        Self::extract_at(gray, width, height, threshold, candidates, now_millis())
    }

    /// Extract an identifier with an explicit clock reading (ms since epoch)
    ///
    /// Returns `None` only when fewer than three candidates were located.
    pub fn extract_at(
        gray: &[u8],
        width: usize,
        height: usize,
        threshold: u8,
        candidates: &[FinderCandidate],
        now_ms: u64,
    ) -> Option<Detection> {
        if candidates.len() < MIN_CANDIDATES {
            log::debug!(
                "{} finder candidates, need {}",
                candidates.len(),
                MIN_CANDIDATES
            );
            return None;
        }

        let payload = Self::read_center_payload(gray, width, height, threshold);
        log::trace!("center payload: {:?}", payload);
        if is_identifier(&payload) {
            return Detection::new(payload, DetectionSource::Payload);
        }

        let anchors = &candidates[..MIN_CANDIDATES];
        Detection::new(
            synthesize_identifier(anchors, now_ms),
            DetectionSource::Synthesized,
        )
    }

    /// Read printable ASCII packed MSB-first into dark/light samples around
    /// the image center
    ///
    /// Chunks outside 32..=126 are dropped, so the result can be shorter than
    /// the number of chunks read.
    pub fn read_center_payload(gray: &[u8], width: usize, height: usize, threshold: u8) -> String {
        let size = extraction_size(width, height);
        let half = size / 2;
        let x0 = (width / 2).saturating_sub(half);
        let y0 = (height / 2).saturating_sub(half);

        let mut text = String::with_capacity(MAX_CHUNKS);
        let mut byte = 0u8;
        let mut bits = 0usize;
        let mut chunks = 0usize;

        'rows: for y in (y0..y0 + size).step_by(EXTRACTION_STEP) {
            for x in (x0..x0 + size).step_by(EXTRACTION_STEP) {
                // Samples outside the buffer read as light
                let dark = gray.get(y * width + x).is_some_and(|&v| v < threshold);
                byte = (byte << 1) | dark as u8;
                bits += 1;

                if bits == 8 {
                    if (32..=126).contains(&byte) {
                        text.push(byte as char);
                    }
                    byte = 0;
                    bits = 0;
                    chunks += 1;
                    if chunks == MAX_CHUNKS {
                        break 'rows;
                    }
                }
            }
        }

        text
    }
}

/// Side of the sampled center square: min(100, min(w, h) / 10)
pub fn extraction_size(width: usize, height: usize) -> usize {
    (width.min(height) / 10).min(MAX_EXTRACTION_SIZE)
}

/// Longer than 3 characters, all of `[A-Za-z0-9_-]`
pub fn is_identifier(s: &str) -> bool {
    s.len() >= MIN_PAYLOAD_LEN
        && s
            .bytes()
            .all(|b| b.is_ascii_alphanumeric() || b == b'-' || b == b'_')
}

/// `QR_{x}-{y}_..._{last 6 digits of now_ms}`
pub fn synthesize_identifier(anchors: &[FinderCandidate], now_ms: u64) -> String {
    let anchors: Vec<String> = anchors.iter().map(ToString::to_string).collect();
    format!(
        "{}{}_{:06}",
        FALLBACK_PREFIX,
        anchors.join("_"),
        now_ms % TIME_SUFFIX_MODULUS
    )
}

fn now_millis() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_millis() as u64)
        .unwrap_or(0)
}
