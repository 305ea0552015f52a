// GPS coordinate extraction from road-inspection overlay photos.
// Reads the GPS-overlay caption via OCR and prints the canonical DMS pair.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;

use koordinat::models::{ExtractionMethod, ExtractionResult, ProcessingReport};
use koordinat::GpsExtractor;

#[derive(Parser)]
#[command(name = "koordinat", about = "Extract GPS coordinates from overlay photos")]
struct Args {
    /// Overlay photos to process
    #[arg(required = true)]
    images: Vec<PathBuf>,

    /// Emit results and the batch report as JSON
    #[arg(long)]
    json: bool,

    /// Log per-strategy detail to stderr
    #[arg(short, long)]
    verbose: bool,
}

fn print_result(image: &PathBuf, result: &ExtractionResult) {
    println!("{}", image.display());
    match result.method {
        ExtractionMethod::Failed => {
            println!("  extraction failed: {}", result.error);
        }
        method => {
            println!("  latitude:  {}", result.latitude);
            println!("  longitude: {}", result.longitude);
            println!(
                "  method: {}  confidence: {:.2}  region-valid: {}",
                method.label(),
                result.confidence,
                result.is_valid
            );
        }
    }
    println!("  processing time: {:.2}s", result.processing_time);
}

fn main() -> ExitCode {
    let args = Args::parse();

    let default_level = if args.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(default_level))
        .init();

    let extractor = GpsExtractor::new();
    let results: Vec<ExtractionResult> = args
        .images
        .iter()
        .map(|image| extractor.extract(image))
        .collect();

    let report = ProcessingReport::from_results(&results);

    if args.json {
        let payload = serde_json::json!({
            "results": results,
            "report": report,
        });
        match serde_json::to_string_pretty(&payload) {
            Ok(json) => println!("{}", json),
            Err(e) => {
                eprintln!("failed to serialize results: {}", e);
                return ExitCode::FAILURE;
            }
        }
    } else {
        for (image, result) in args.images.iter().zip(&results) {
            print_result(image, result);
        }
        if results.len() > 1 {
            println!(
                "\n{}/{} extractions valid ({:.0}%), avg {:.2}s",
                report.successful_extractions,
                report.total_images,
                report.success_rate,
                report.average_processing_time
            );
        }
    }

    if results.iter().any(|r| r.method != ExtractionMethod::Failed) {
        ExitCode::SUCCESS
    } else {
        ExitCode::FAILURE
    }
}
