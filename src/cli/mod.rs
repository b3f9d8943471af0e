//! Command-line interface for build-detector.
//!
//! ## Usage
//!
//! ```text
//! # Detect the build of a VCF
//! build-detector sample.vcf.gz
//!
//! # JSON output with the matching markers
//! build-detector sample.vcf.gz --format json
//!
//! # Use a custom marker panel
//! build-detector sample.vcf --markers my_markers.json
//! ```

use clap::Parser;

pub mod detect;

#[derive(Parser)]
#[command(name = "build-detector")]
#[command(version)]
#[command(about = "Detect the genome build (GRCh37 or GRCh38) of a VCF file")]
#[command(
    long_about = "build-detector looks up a handful of common dbSNP variants whose coordinates differ between GRCh37 and GRCh38 and reports which build the file's records agree with.\n\nExit status is 1 when no marker variant is present or when markers of both builds are present."
)]
pub struct Cli {
    #[command(flatten)]
    pub detect: detect::DetectArgs,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Output format
    #[arg(short, long, default_value = "text")]
    pub format: OutputFormat,
}

#[derive(Clone, Copy, Debug, clap::ValueEnum)]
pub enum OutputFormat {
    Text,
    Json,
}
