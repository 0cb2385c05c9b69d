/// How the identifier of a detection was obtained
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DetectionSource {
    /// Full decode by the standard decoder
    Standard,
    /// ASCII payload read from the center of the frame
    Payload,
    /// Identifier synthesized from finder anchors and wall-clock time
    Synthesized,
}

/// Identifier recovered from a single frame
///
/// `data` is never empty; [`Detection::new`] refuses empty strings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Detection {
    data: String,
    source: DetectionSource,
}

impl Detection {
    /// Create a detection, or `None` if `data` is empty
    pub fn new(data: impl Into<String>, source: DetectionSource) -> Option<Self> {
        let data = data.into();
        if data.is_empty() {
            return None;
        }
        Some(Self { data, source })
    }

    /// The recovered or synthesized identifier
    pub fn data(&self) -> &str {
        &self.data
    }

    /// Which path produced the identifier
    pub fn source(&self) -> DetectionSource {
        self.source
    }

    /// True when the identifier was read from the code rather than synthesized
    pub fn is_decoded(&self) -> bool {
        self.source != DetectionSource::Synthesized
    }

    /// Consume the detection and return its identifier
    pub fn into_data(self) -> String {
        self.data
    }
}
