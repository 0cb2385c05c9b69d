use std::fmt;

/// Top-left pixel of a 7x7 window classified as a finder pattern
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct FinderCandidate {
    /// X coordinate of the window origin
    pub x: usize,
    /// Y coordinate of the window origin
    pub y: usize,
}

impl FinderCandidate {
    /// Create a new candidate at (x, y)
    pub fn new(x: usize, y: usize) -> Self {
        Self { x, y }
    }
}

/// Formats as `x-y`, the anchor notation used in synthesized identifiers
impl fmt::Display for FinderCandidate {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}-{}", self.x, self.y)
    }
}
