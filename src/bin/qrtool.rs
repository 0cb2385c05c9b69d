use clap::{Parser, Subcommand};
use qr_attendance::attendance::{AttendanceId, AttendanceRequest};
use qr_attendance::config::scanner_config;
use qr_attendance::decoder::chain::DecoderChain;
use qr_attendance::detector::extractor::PayloadExtractor;
use qr_attendance::detector::finder::FinderLocator;
use qr_attendance::tools::{load_rgba, luminance_stats};
use qr_attendance::utils::grayscale::rgba_to_luminance;
use qr_attendance::{Detection, Frame, ScannerConfig};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::time::Instant;

#[derive(Parser)]
#[command(name = "qrtool", version, about = "QR attendance scanner tools")]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Run the decoder chain on a single image
    Detect {
        #[arg(long)]
        image: PathBuf,
        /// Binarization threshold (defaults to QR_THRESHOLD or 128)
        #[arg(long)]
        threshold: Option<u8>,
        /// Skip the standard decoder and use the heuristic only
        #[arg(long)]
        heuristic_only: bool,
    },
    /// Print luminance stats, finder candidates and the center payload
    DebugDetect {
        #[arg(long)]
        image: PathBuf,
        #[arg(long)]
        threshold: Option<u8>,
    },
    /// Print the attendance request body that a scan would submit
    Request {
        #[arg(long)]
        image: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Detect {
            image,
            threshold,
            heuristic_only,
        } => detect_cmd(&image, threshold, heuristic_only),
        Command::DebugDetect { image, threshold } => debug_detect_cmd(&image, threshold),
        Command::Request { image } => request_cmd(&image),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        }
    }
}

fn config_with(threshold: Option<u8>) -> ScannerConfig {
    let mut config = *scanner_config();
    if let Some(t) = threshold {
        config.threshold = t;
    }
    config
}

fn scan(image: &Path, config: &ScannerConfig) -> Result<Option<Detection>, String> {
    let (pixels, width, height) =
        load_rgba(image).map_err(|err| format!("Failed to load image {}: {}", image.display(), err))?;
    let frame = Frame::new(&pixels, width, height).map_err(|err| err.to_string())?;

    let mut chain = DecoderChain::probe(config);
    let start = Instant::now();
    let result = chain.detect(&frame);
    println!(
        "Image: {} ({}x{}) scanned in {:.2?} with [{}]",
        image.display(),
        width,
        height,
        start.elapsed(),
        chain.names().join(", ")
    );
    Ok(result)
}

fn detect_cmd(image: &Path, threshold: Option<u8>, heuristic_only: bool) -> Result<(), String> {
    let mut config = config_with(threshold);
    if heuristic_only {
        config.prefer_standard = false;
    }

    match scan(image, &config)? {
        Some(det) => println!("Detected {:?}: {}", det.source(), det.data()),
        None => println!("No code detected"),
    }
    Ok(())
}

fn debug_detect_cmd(image: &Path, threshold: Option<u8>) -> Result<(), String> {
    let config = config_with(threshold);
    let (pixels, width, height) =
        load_rgba(image).map_err(|err| format!("Failed to load image {}: {}", image.display(), err))?;
    println!("Image: {} ({}x{})", image.display(), width, height);

    let gray = rgba_to_luminance(&pixels, width, height);
    let stats = luminance_stats(&gray, config.threshold);
    println!(
        "Luminance range: {}-{}, average: {}, dark samples: {} ({:.2}%)",
        stats.min,
        stats.max,
        stats.avg,
        stats.dark,
        stats.dark as f64 * 100.0 / gray.len().max(1) as f64
    );

    let candidates = FinderLocator::locate(&gray, width, height, config.threshold);
    println!("Found {} finder candidates", candidates.len());
    for (i, c) in candidates.iter().take(10).enumerate() {
        println!("  Candidate {}: origin=({}, {})", i, c.x, c.y);
    }

    let payload = PayloadExtractor::read_center_payload(&gray, width, height, config.threshold);
    println!("Center payload: {:?}", payload);

    match PayloadExtractor::extract(&gray, width, height, config.threshold, &candidates) {
        Some(det) => println!("Heuristic result ({:?}): {}", det.source(), det.data()),
        None => println!("Heuristic result: none"),
    }
    Ok(())
}

fn request_cmd(image: &Path) -> Result<(), String> {
    let config = *scanner_config();
    let Some(det) = scan(image, &config)? else {
        return Err("No code detected".to_string());
    };

    if let Err(err) = AttendanceId::parse(det.data()) {
        log::warn!("{} is not a service-issued identifier: {}", det.data(), err);
    }
    let body = AttendanceRequest::from(&det)
        .to_json()
        .map_err(|err| err.to_string())?;
    println!("{}", body);
    Ok(())
}
