//! Frame capture loop core
//!
//! The camera side owns the video source and calls [`FrameScanner::on_frame`]
//! on every tick. The scanner rate-limits attempts, runs the decoder chain and
//! hands successful detections to an [`AttendanceReporter`].

pub mod scheduler;

pub use scheduler::ScanScheduler;

use crate::attendance::{AttendanceReporter, AttendanceRequest, AttendanceResponse, ReportError};
use crate::config::ScannerConfig;
use crate::decoder::chain::DecoderChain;
use crate::models::{Detection, Frame};
use std::time::Instant;

/// Result of offering one frame to the scanner
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ScanOutcome {
    /// Too soon after the previous attempt; frame ignored
    Throttled,
    /// Attempt ran, no code in this frame
    NoCode,
    /// Attempt ran and produced an identifier
    Detected(Detection),
}

/// Rate-limited detection over a stream of frames
pub struct FrameScanner {
    scheduler: ScanScheduler,
    chain: DecoderChain,
    attempts: u64,
}

impl FrameScanner {
    /// Scanner with a probed decoder chain
    pub fn new(config: &ScannerConfig) -> Self {
        Self::with_chain(config, DecoderChain::probe(config))
    }

    /// Scanner with an explicit decoder chain
    pub fn with_chain(config: &ScannerConfig, chain: DecoderChain) -> Self {
        Self {
            scheduler: ScanScheduler::new(config.scan_interval),
            chain,
            attempts: 0,
        }
    }

    /// Offer a frame captured at `now`
    pub fn on_frame(&mut self, frame: &Frame<'_>, now: Instant) -> ScanOutcome {
        if !self.scheduler.try_begin(now) {
            return ScanOutcome::Throttled;
        }
        self.attempts += 1;

        match self.chain.detect(frame) {
            Some(detection) => {
                log::debug!(
                    "attempt {} detected {} ({:?})",
                    self.attempts,
                    detection.data(),
                    detection.source()
                );
                ScanOutcome::Detected(detection)
            }
            None => ScanOutcome::NoCode,
        }
    }

    /// Submit a detection and interpret the service response
    ///
    /// Returns the service message on success.
    pub fn report<R>(&self, detection: &Detection, reporter: &mut R) -> Result<String, ReportError>
    where
        R: AttendanceReporter + ?Sized,
    {
        let request = AttendanceRequest::from(detection);
        let response: AttendanceResponse = reporter.submit(&request)?;
        response.into_result()
    }

    /// Attempts that actually ran (throttled frames excluded)
    pub fn attempts(&self) -> u64 {
        self.attempts
    }

    /// Rate limiter state
    pub fn scheduler(&self) -> &ScanScheduler {
        &self.scheduler
    }

    /// Allow the next frame through immediately
    pub fn reset(&mut self) {
        self.scheduler.reset();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decoder::FrameDecoder;
    use crate::models::DetectionSource;
    use std::time::Duration;

    struct Always(&'static str);

    impl FrameDecoder for Always {
        fn name(&self) -> &'static str {
            "always"
        }

        fn detect(&mut self, _frame: &Frame<'_>) -> Option<Detection> {
            Detection::new(self.0, DetectionSource::Standard)
        }
    }

    struct Recording {
        seen: Vec<String>,
        response: &'static str,
    }

    impl AttendanceReporter for Recording {
        fn submit(&mut self, request: &AttendanceRequest) -> Result<AttendanceResponse, ReportError> {
            self.seen.push(request.attendance_id.clone());
            AttendanceResponse::from_json(self.response)
        }
    }

    fn scanner_with(decoder: Box<dyn FrameDecoder>) -> FrameScanner {
        let chain = DecoderChain::from_decoders(vec![decoder]);
        FrameScanner::with_chain(&ScannerConfig::default(), chain)
    }

    #[test]
    fn test_rate_limited_attempts() {
        let rgba = vec![255u8; 4];
        let frame = Frame::new(&rgba, 1, 1).unwrap();
        let mut scanner = scanner_with(Box::new(Always("EAID-20240101-0001")));
        let t0 = Instant::now();

        assert!(matches!(scanner.on_frame(&frame, t0), ScanOutcome::Detected(_)));
        assert_eq!(
            scanner.on_frame(&frame, t0 + Duration::from_millis(16)),
            ScanOutcome::Throttled
        );
        assert!(matches!(
            scanner.on_frame(&frame, t0 + Duration::from_millis(150)),
            ScanOutcome::Detected(_)
        ));
        assert_eq!(scanner.attempts(), 2);
    }

    #[test]
    fn test_no_code_on_blank_frame() {
        let rgba = vec![255u8; 64 * 64 * 4];
        let frame = Frame::new(&rgba, 64, 64).unwrap();
        let config = ScannerConfig {
            prefer_standard: false,
            ..ScannerConfig::default()
        };
        let mut scanner = FrameScanner::new(&config);
        assert_eq!(scanner.on_frame(&frame, Instant::now()), ScanOutcome::NoCode);
    }

    #[test]
    fn test_report_success_and_rejection() {
        let scanner = scanner_with(Box::new(Always("unused")));
        let det = Detection::new("EAID-20240101-0001", DetectionSource::Payload).unwrap();

        let mut ok = Recording {
            seen: Vec::new(),
            response: r#"{"success": true, "message": "Attendance recorded"}"#,
        };
        assert_eq!(scanner.report(&det, &mut ok).unwrap(), "Attendance recorded");
        assert_eq!(ok.seen, vec!["EAID-20240101-0001".to_string()]);

        let mut rejected = Recording {
            seen: Vec::new(),
            response: r#"{"success": false, "message": "Attendance already logged for today."}"#,
        };
        match scanner.report(&det, &mut rejected) {
            Err(ReportError::Rejected(msg)) => {
                assert_eq!(msg, "Attendance already logged for today.")
            }
            other => panic!("expected rejection, got {:?}", other),
        }
    }
}
