//! Convert RGBA frames to single-channel luminance
//! Y = round(0.299*R + 0.587*G + 0.114*B), alpha ignored
//! Uses exact integer arithmetic: Y = (299*R + 587*G + 114*B + 500) / 1000
//!
//! Variants:
//! - `rgba_to_luminance`: allocates the output
//! - `rgba_to_luminance_into`: writes into a caller buffer (no allocation)
//! - `rgba_to_luminance_parallel_into`: rows processed in parallel with rayon

use rayon::prelude::*;

/// ITU-R BT.601 weights scaled by 1000
const COEF_R: u32 = 299;
const COEF_G: u32 = 587;
const COEF_B: u32 = 114;
const SCALE: u32 = 1000;

const CHANNELS: usize = 4;

/// Luminance of a single pixel, rounded half up
#[inline]
pub fn luma(r: u8, g: u8, b: u8) -> u8 {
    let weighted = COEF_R * r as u32 + COEF_G * g as u32 + COEF_B * b as u32;
    // Max is 255 * 1000 + 500, so the quotient always fits in a u8
    ((weighted + SCALE / 2) / SCALE) as u8
}

/// Convert an RGBA image to luminance
pub fn rgba_to_luminance(rgba: &[u8], width: usize, height: usize) -> Vec<u8> {
    let mut gray = vec![0u8; width * height];
    rgba_to_luminance_into(rgba, width, height, &mut gray);
    gray
}

/// Convert RGBA to luminance using a pre-allocated buffer (no allocation)
///
/// # Arguments
/// * `rgba` - Input RGBA image data (`width * height * 4` bytes)
/// * `width` - Image width
/// * `height` - Image height
/// * `output` - Output buffer (must have length >= width * height)
///
/// # Returns
/// Number of pixels written (width * height)
pub fn rgba_to_luminance_into(
    rgba: &[u8],
    width: usize,
    height: usize,
    output: &mut [u8],
) -> usize {
    let pixel_count = width * height;
    assert!(output.len() >= pixel_count, "Output buffer too small");

    for (px, out) in rgba
        .chunks_exact(CHANNELS)
        .take(pixel_count)
        .zip(output.iter_mut())
    {
        *out = luma(px[0], px[1], px[2]);
    }

    pixel_count
}

/// Convert RGBA to luminance, processing rows in parallel
pub fn rgba_to_luminance_parallel_into(
    rgba: &[u8],
    width: usize,
    height: usize,
    output: &mut [u8],
) -> usize {
    let pixel_count = width * height;
    assert!(output.len() >= pixel_count, "Output buffer too small");
    if pixel_count == 0 {
        return 0;
    }

    output[..pixel_count]
        .par_chunks_mut(width)
        .zip(rgba.par_chunks(width * CHANNELS))
        .for_each(|(row, src)| {
            for (out, px) in row.iter_mut().zip(src.chunks_exact(CHANNELS)) {
                *out = luma(px[0], px[1], px[2]);
            }
        });

    pixel_count
}
