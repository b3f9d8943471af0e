use std::num::NonZeroUsize;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Args;

use crate::cli::OutputFormat;
use crate::detection::engine::{BuildDetector, Detection, DetectorConfig};
use crate::detection::DetectError;
use crate::markers::panel::MarkerPanel;
use crate::parsing::vcf::{default_threads, ReadOptions};

#[derive(Args)]
pub struct DetectArgs {
    /// VCF file to detect the build (.vcf, or bgzip .vcf.gz with optional .tbi/.csi index)
    #[arg(required = true, value_name = "VCF_FILE")]
    pub vcf_file: PathBuf,

    /// Path to a custom marker panel (JSON)
    #[arg(long)]
    pub markers: Option<PathBuf>,

    /// Decompression worker threads (defaults to the number of available CPUs)
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub threads: Option<u32>,
}

/// Execute build detection
///
/// Detection failures (no marker found, markers of both builds) are reported on stdout
/// and turned into exit status 1; I/O and parse failures are returned as errors.
///
/// # Errors
///
/// Returns an error if the marker panel or the VCF cannot be read.
#[allow(clippy::needless_pass_by_value)] // CLI entry point, values from clap
pub fn run(args: DetectArgs, format: OutputFormat, verbose: bool) -> anyhow::Result<ExitCode> {
    let panel = if let Some(path) = &args.markers {
        MarkerPanel::load_from_file(path)?
    } else {
        MarkerPanel::load_embedded()?
    };

    let threads = args
        .threads
        .and_then(|n| NonZeroUsize::new(n as usize))
        .unwrap_or_else(default_threads);

    if verbose {
        eprintln!(
            "Loaded marker panel v{} with {} markers; using {threads} threads",
            panel.version,
            panel.len()
        );
    }

    let config = DetectorConfig {
        read_options: ReadOptions { threads },
    };
    let detector = BuildDetector::with_config(&panel, config);

    match detector.detect(&args.vcf_file) {
        Ok(detection) => {
            match format {
                OutputFormat::Text => print_text_result(&detection, verbose),
                OutputFormat::Json => println!("{}", serde_json::to_string_pretty(&detection)?),
            }
            Ok(ExitCode::SUCCESS)
        }
        Err(e @ (DetectError::NoTargetVariants | DetectError::Ambiguous { .. })) => {
            match format {
                OutputFormat::Text => println!("{e}"),
                OutputFormat::Json => print_json_failure(&e)?,
            }
            Ok(ExitCode::FAILURE)
        }
        Err(e) => Err(e.into()),
    }
}

fn print_text_result(detection: &Detection, verbose: bool) {
    if verbose {
        for hit in detection.evidence.hits() {
            eprintln!("  {} {} matched {}", hit.rsid, hit.observed_key, hit.build);
        }
    }
    println!("{}", detection.summary);
}

fn print_json_failure(error: &DetectError) -> anyhow::Result<()> {
    let output = match error {
        DetectError::Ambiguous { grch37, grch38 } => serde_json::json!({
            "error": error.to_string(),
            "grch37_hits": grch37,
            "grch38_hits": grch38,
        }),
        _ => serde_json::json!({ "error": error.to_string() }),
    };

    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}
