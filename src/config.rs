use std::sync::OnceLock;
use std::time::Duration;

/// Luminance separating dark from light samples
pub const DEFAULT_THRESHOLD: u8 = 128;
/// Minimum spacing between detection attempts
pub const DEFAULT_SCAN_INTERVAL: Duration = Duration::from_millis(150);

/// Scanner settings, overridable through `QR_*` environment variables
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ScannerConfig {
    /// Binarization threshold (`QR_THRESHOLD`)
    pub threshold: u8,
    /// Minimum interval between attempts (`QR_SCAN_INTERVAL_MS`)
    pub scan_interval: Duration,
    /// Try the standard decoder before the heuristic (`QR_STANDARD_DECODER`)
    pub prefer_standard: bool,
}

impl Default for ScannerConfig {
    fn default() -> Self {
        Self {
            threshold: DEFAULT_THRESHOLD,
            scan_interval: DEFAULT_SCAN_INTERVAL,
            prefer_standard: true,
        }
    }
}

impl ScannerConfig {
    /// Read settings from the process environment
    pub fn from_env() -> Self {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Read settings through `lookup`; missing or malformed values keep defaults
    pub fn from_lookup<F>(lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let defaults = Self::default();
        Self {
            threshold: parse_var(&lookup, "QR_THRESHOLD", defaults.threshold),
            scan_interval: Duration::from_millis(parse_var(
                &lookup,
                "QR_SCAN_INTERVAL_MS",
                defaults.scan_interval.as_millis() as u64,
            )),
            prefer_standard: parse_var::<u8, _>(&lookup, "QR_STANDARD_DECODER", 1) != 0,
        }
    }
}

fn parse_var<T, F>(lookup: &F, name: &str, default: T) -> T
where
    T: std::str::FromStr,
    F: Fn(&str) -> Option<String>,
{
    lookup(name)
        .and_then(|v| v.trim().parse::<T>().ok())
        .unwrap_or(default)
}

static SCANNER_CONFIG: OnceLock<ScannerConfig> = OnceLock::new();

/// Process-wide configuration, read from the environment once
pub fn scanner_config() -> &'static ScannerConfig {
    SCANNER_CONFIG.get_or_init(ScannerConfig::from_env)
}
