use image::GenericImageView;
use std::env;
use std::path::Path;

fn max_dim_from_env() -> Option<u32> {
    match env::var("QR_MAX_DIM") {
        Ok(value) => match value.trim().parse::<u32>() {
            Ok(0) => None,
            Ok(v) => Some(v),
            Err(_) => None,
        },
        Err(_) => None,
    }
}

/// Load an image as RGBA bytes along with its dimensions
///
/// Images larger than `QR_MAX_DIM` on either side are downscaled first.
pub fn load_rgba<P: AsRef<Path>>(path: P) -> Result<(Vec<u8>, usize, usize), image::ImageError> {
    let img = image::open(path)?;
    let rgba = match max_dim_from_env() {
        Some(max_dim) if img.dimensions().0.max(img.dimensions().1) > max_dim => img
            .resize(max_dim, max_dim, image::imageops::FilterType::Triangle)
            .to_rgba8(),
        _ => img.to_rgba8(),
    };
    let (width, height) = rgba.dimensions();
    Ok((rgba.into_raw(), width as usize, height as usize))
}

/// Summary statistics for luminance data
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LuminanceStats {
    /// Minimum sample
    pub min: u8,
    /// Maximum sample
    pub max: u8,
    /// Average sample
    pub avg: u8,
    /// Samples below the threshold
    pub dark: usize,
}

/// Compute min/max/avg and the dark sample count for a luminance buffer
pub fn luminance_stats(gray: &[u8], threshold: u8) -> LuminanceStats {
    let mut min = u8::MAX;
    let mut max = u8::MIN;
    let mut sum: u64 = 0;
    let mut dark = 0usize;
    for &v in gray {
        min = min.min(v);
        max = max.max(v);
        sum += v as u64;
        if v < threshold {
            dark += 1;
        }
    }
    if gray.is_empty() {
        return LuminanceStats {
            min: 0,
            max: 0,
            avg: 0,
            dark: 0,
        };
    }
    LuminanceStats {
        min,
        max,
        avg: (sum / gray.len() as u64) as u8,
        dark,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_luminance_stats() {
        let stats = luminance_stats(&[0, 100, 200, 255], 128);
        assert_eq!(
            stats,
            LuminanceStats {
                min: 0,
                max: 255,
                avg: 138,
                dark: 2
            }
        );
    }

    #[test]
    fn test_luminance_stats_empty() {
        assert_eq!(luminance_stats(&[], 128).dark, 0);
        assert_eq!(luminance_stats(&[], 128).min, 0);
    }

    #[test]
    fn test_load_missing_file() {
        assert!(load_rgba("does/not/exist.png").is_err());
    }
}
