pub mod candidate;
pub mod detection;
pub mod frame;

pub use candidate::FinderCandidate;
pub use detection::{Detection, DetectionSource};
pub use frame::{Frame, FrameError};
