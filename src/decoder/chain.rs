use crate::Detector;
use crate::config::ScannerConfig;
use crate::decoder::FrameDecoder;
use crate::decoder::standard::StandardDecoder;
use crate::models::{Detection, Frame};

/// Decoders tried in order until one returns a detection
pub struct DecoderChain {
    decoders: Vec<Box<dyn FrameDecoder>>,
}

impl DecoderChain {
    /// Build the chain from whatever is available at runtime
    ///
    /// The standard decoder goes first when `prefer_standard` is set; the
    /// heuristic detector is always present as the last resort.
    pub fn probe(config: &ScannerConfig) -> Self {
        let mut decoders: Vec<Box<dyn FrameDecoder>> = Vec::new();
        if config.prefer_standard {
            decoders.push(Box::new(StandardDecoder::new()));
        }
        decoders.push(Box::new(Detector::with_pool().threshold(config.threshold)));

        let chain = Self::from_decoders(decoders);
        log::info!("decoder chain: {}", chain.names().join(" -> "));
        chain
    }

    /// Build a chain from explicit decoders, dropping unavailable ones
    pub fn from_decoders(decoders: Vec<Box<dyn FrameDecoder>>) -> Self {
        let decoders = decoders
            .into_iter()
            .filter(|d| {
                let available = d.is_available();
                if !available {
                    log::debug!("decoder {} unavailable, skipping", d.name());
                }
                available
            })
            .collect();
        Self { decoders }
    }

    /// Names of the active decoders in order
    pub fn names(&self) -> Vec<&'static str> {
        self.decoders.iter().map(|d| d.name()).collect()
    }

    /// Number of active decoders
    pub fn len(&self) -> usize {
        self.decoders.len()
    }

    /// True when no decoder is available
    pub fn is_empty(&self) -> bool {
        self.decoders.is_empty()
    }

    /// Run each decoder in turn and return the first detection
    pub fn detect(&mut self, frame: &Frame<'_>) -> Option<Detection> {
        for decoder in &mut self.decoders {
            if let Some(detection) = decoder.detect(frame) {
                log::debug!("{} detected {:?}", decoder.name(), detection.data());
                return Some(detection);
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DetectionSource;
    use std::cell::Cell;
    use std::rc::Rc;

    struct Fixed {
        name: &'static str,
        available: bool,
        answer: Option<&'static str>,
        calls: Rc<Cell<usize>>,
    }

    impl FrameDecoder for Fixed {
        fn name(&self) -> &'static str {
            self.name
        }

        fn is_available(&self) -> bool {
            self.available
        }

        fn detect(&mut self, _frame: &Frame<'_>) -> Option<Detection> {
            self.calls.set(self.calls.get() + 1);
            self.answer
                .and_then(|a| Detection::new(a, DetectionSource::Standard))
        }
    }

    fn fixed(
        name: &'static str,
        available: bool,
        answer: Option<&'static str>,
    ) -> (Box<dyn FrameDecoder>, Rc<Cell<usize>>) {
        let calls = Rc::new(Cell::new(0));
        let decoder = Fixed {
            name,
            available,
            answer,
            calls: Rc::clone(&calls),
        };
        (Box::new(decoder), calls)
    }

    #[test]
    fn test_unavailable_decoders_dropped() {
        let (a, _) = fixed("native", false, Some("X"));
        let (b, _) = fixed("fallback", true, None);
        let chain = DecoderChain::from_decoders(vec![a, b]);
        assert_eq!(chain.names(), vec!["fallback"]);
        assert_eq!(chain.len(), 1);
    }

    #[test]
    fn test_first_hit_wins() {
        let rgba = vec![0u8; 4];
        let frame = Frame::new(&rgba, 1, 1).unwrap();

        let (a, a_calls) = fixed("first", true, None);
        let (b, b_calls) = fixed("second", true, Some("EAID-20240101-0001"));
        let (c, c_calls) = fixed("third", true, Some("unused"));
        let mut chain = DecoderChain::from_decoders(vec![a, b, c]);

        let det = chain.detect(&frame).unwrap();
        assert_eq!(det.data(), "EAID-20240101-0001");
        assert_eq!((a_calls.get(), b_calls.get(), c_calls.get()), (1, 1, 0));
    }

    #[test]
    fn test_empty_chain_finds_nothing() {
        let rgba = vec![0u8; 4];
        let frame = Frame::new(&rgba, 1, 1).unwrap();
        let mut chain = DecoderChain::from_decoders(Vec::new());
        assert!(chain.is_empty());
        assert!(chain.detect(&frame).is_none());
    }

    #[test]
    fn test_probe_always_ends_with_heuristic() {
        let config = ScannerConfig {
            prefer_standard: false,
            ..ScannerConfig::default()
        };
        assert_eq!(DecoderChain::probe(&config).names(), vec!["heuristic"]);

        let chain = DecoderChain::probe(&ScannerConfig::default());
        assert_eq!(chain.names().last(), Some(&"heuristic"));
        if cfg!(feature = "rqrr") {
            assert_eq!(chain.names(), vec!["standard", "heuristic"]);
        }
    }
}
