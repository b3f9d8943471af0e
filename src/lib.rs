//! # build-detector
//!
//! A library for detecting the genome build of a VCF file.
//!
//! Files received from collaborators or consumer genotyping services often do not say
//! which reference they were called against, and the contig names (`chr1` or `1`) do
//! not tell `GRCh37` from `GRCh38`. `build-detector` checks a small panel of common
//! dbSNP variants whose coordinates differ between the two builds and reports the build
//! whose coordinates the file's alleles agree with.
//!
//! ## Features
//!
//! - **Indexed queries**: bgzip VCFs with a `.tbi`/`.csi` index are queried per marker
//! - **Sequential fallback**: plain or unindexed VCFs are scanned once
//! - **Naming aware**: works with both UCSC (`chr1`) and NCBI (`1`) contig names
//! - **Custom panels**: marker tables can be loaded from JSON
//!
//! ## Example
//!
//! ```rust,no_run
//! use build_detector::detect_build;
//!
//! let build = detect_build("sample.vcf.gz").unwrap();
//! println!("{}", build.summary()); // e.g. "Genome build: hg38/GRCh38"
//! ```
//!
//! ## Modules
//!
//! - [`core`]: Builds, naming conventions and match keys
//! - [`markers`]: The marker panel
//! - [`parsing`]: VCF reading
//! - [`detection`]: Matching and classification
//! - [`cli`]: Command-line interface implementation

pub mod cli;
pub mod core;
pub mod detection;
pub mod markers;
pub mod parsing;

// Re-export commonly used types for convenience
pub use core::types::*;
pub use detection::engine::{detect_build, BuildDetector, Detection, DetectorConfig};
pub use detection::DetectError;
pub use markers::panel::MarkerPanel;
