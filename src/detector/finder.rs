//! Finder pattern location by 7x7 window classification on a coarse grid

use crate::models::FinderCandidate;

/// Minimum plausible QR module count; also bounds the scan range
pub const MIN_CODE_SIZE: usize = 21;
/// Grid stride between tested window origins
pub const GRID_STEP: usize = 3;
/// Side of the classified window
pub const WINDOW: usize = 7;

/// Dark cells required across the border ring and inner core (33 cells)
const MIN_DARK: usize = 20;
/// Light cells required in the middle ring (16 cells)
const MIN_LIGHT: usize = 8;

/// Coarse-grid locator for finder pattern silhouettes
pub struct FinderLocator;

impl FinderLocator {
    /// Scan `gray` and return every window matching the finder silhouette
    pub fn locate(gray: &[u8], width: usize, height: usize, threshold: u8) -> Vec<FinderCandidate> {
        let mut candidates = Vec::new();
        Self::locate_into(gray, width, height, threshold, &mut candidates);
        candidates
    }

    /// Same as [`FinderLocator::locate`], appending into a reusable list
    ///
    /// `out` is cleared first. Candidates are ordered row-major by origin.
    pub fn locate_into(
        gray: &[u8],
        width: usize,
        height: usize,
        threshold: u8,
        out: &mut Vec<FinderCandidate>,
    ) {
        out.clear();
        if gray.len() < width * height {
            log::debug!(
                "luminance buffer has {} samples, expected {}x{}",
                gray.len(),
                width,
                height
            );
            return;
        }

        for y in (0..height.saturating_sub(MIN_CODE_SIZE)).step_by(GRID_STEP) {
            for x in (0..width.saturating_sub(MIN_CODE_SIZE)).step_by(GRID_STEP) {
                if Self::is_finder_window(gray, width, height, x, y, threshold) {
                    out.push(FinderCandidate::new(x, y));
                }
            }
        }
    }

    /// Classify the 7x7 window whose top-left corner is (x, y)
    ///
    /// Windows that would overrun the buffer are rejected outright.
    pub fn is_finder_window(
        gray: &[u8],
        width: usize,
        height: usize,
        x: usize,
        y: usize,
        threshold: u8,
    ) -> bool {
        if x + WINDOW >= width || y + WINDOW >= height || gray.len() < width * height {
            return false;
        }

        let mut dark = 0usize;
        let mut light = 0usize;
        for dy in 0..WINDOW {
            let row = &gray[(y + dy) * width + x..(y + dy) * width + x + WINDOW];
            for (dx, &sample) in row.iter().enumerate() {
                let is_dark = sample < threshold;
                if Self::is_dark_region(dx, dy) {
                    if is_dark {
                        dark += 1;
                    }
                } else if !is_dark {
                    light += 1;
                }
            }
        }

        dark >= MIN_DARK && light >= MIN_LIGHT
    }

    /// Border ring or inner 3x3 core; everything else is the middle ring
    #[inline]
    fn is_dark_region(dx: usize, dy: usize) -> bool {
        let border = dx == 0 || dx == WINDOW - 1 || dy == 0 || dy == WINDOW - 1;
        let core = (2..=4).contains(&dx) && (2..=4).contains(&dy);
        border || core
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    /// Paint an exact finder silhouette with its top-left corner at (x0, y0)
    fn paint_finder(gray: &mut [u8], width: usize, x0: usize, y0: usize) {
        for dy in 0..WINDOW {
            for dx in 0..WINDOW {
                let dark = FinderLocator::is_dark_region(dx, dy);
                gray[(y0 + dy) * width + x0 + dx] = if dark { 0 } else { 255 };
            }
        }
    }

    #[test]
    fn test_region_sizes() {
        let mut dark_cells = 0;
        for dy in 0..WINDOW {
            for dx in 0..WINDOW {
                if FinderLocator::is_dark_region(dx, dy) {
                    dark_cells += 1;
                }
            }
        }
        // 24 border + 9 core
        assert_eq!(dark_cells, 33);
    }

    #[test]
    fn test_exact_pattern_at_grid_point() {
        let (w, h) = (48, 48);
        let mut gray = vec![255u8; w * h];
        paint_finder(&mut gray, w, 9, 12);

        let found = FinderLocator::locate(&gray, w, h, 128);
        assert_eq!(found, vec![FinderCandidate::new(9, 12)]);
    }

    #[test]
    fn test_uniform_threshold_gray_has_no_candidates() {
        let (w, h) = (64, 64);
        let gray = vec![128u8; w * h];
        assert!(FinderLocator::locate(&gray, w, h, 128).is_empty());
    }

    #[test]
    fn test_uniform_dark_rejected() {
        let (w, h) = (64, 64);
        let gray = vec![0u8; w * h];
        // Middle ring is never light
        assert!(FinderLocator::locate(&gray, w, h, 128).is_empty());
    }

    #[test]
    fn test_noise_tolerance() {
        let (w, h) = (40, 40);
        let mut gray = vec![255u8; w * h];
        paint_finder(&mut gray, w, 6, 6);
        // Flip a few cells: 3 border cells light, 2 ring cells dark
        gray[6 * w + 6] = 255;
        gray[6 * w + 7] = 255;
        gray[12 * w + 12] = 255;
        gray[7 * w + 8] = 0;
        gray[11 * w + 8] = 0;

        assert!(FinderLocator::is_finder_window(&gray, w, h, 6, 6, 128));
    }

    #[test]
    fn test_threshold_moves_classification() {
        let (w, h) = (40, 40);
        let mut gray = vec![200u8; w * h];
        for dy in 0..WINDOW {
            for dx in 0..WINDOW {
                if FinderLocator::is_dark_region(dx, dy) {
                    gray[(3 + dy) * w + 3 + dx] = 100;
                }
            }
        }
        assert!(FinderLocator::is_finder_window(&gray, w, h, 3, 3, 128));
        // Everything below 250 is dark, so the ring no longer reads light
        assert!(!FinderLocator::is_finder_window(&gray, w, h, 3, 3, 250));
    }

    #[test]
    fn test_window_overrun_rejected() {
        let (w, h) = (10, 10);
        let gray = vec![0u8; w * h];
        assert!(!FinderLocator::is_finder_window(&gray, w, h, 3, 0, 128));
        assert!(!FinderLocator::is_finder_window(&gray, w, h, 0, 5, 128));
    }

    #[test]
    fn test_small_or_short_buffers() {
        // Too small to hold a code
        let gray = vec![0u8; 20 * 20];
        assert!(FinderLocator::locate(&gray, 20, 20, 128).is_empty());

        // Buffer shorter than declared size
        let gray = vec![0u8; 10];
        assert!(FinderLocator::locate(&gray, 64, 64, 128).is_empty());
    }

    #[test]
    fn test_candidate_bounds_and_order() {
        let (w, h) = (64, 64);
        let mut gray = vec![255u8; w * h];
        paint_finder(&mut gray, w, 42, 0);
        paint_finder(&mut gray, w, 0, 42);
        paint_finder(&mut gray, w, 0, 0);

        let found = FinderLocator::locate(&gray, w, h, 128);
        assert_eq!(
            found,
            vec![
                FinderCandidate::new(0, 0),
                FinderCandidate::new(42, 0),
                FinderCandidate::new(0, 42),
            ]
        );
        assert!(found.iter().all(|c| c.x <= w - 8 && c.y <= h - 8));
    }
}
