//! Reading variant records at marker positions.
//!
//! Two input layouts are supported:
//!
//! - **Indexed**: bgzip-compressed VCF with a `.tbi` or `.csi` index next to it. Each
//!   marker region is queried through the index.
//! - **Scanned**: uncompressed VCF, or bgzip VCF without an index. The file is read once
//!   and records starting at a marker position are kept. Bgzip input is decompressed
//!   with a pool of worker threads.
//!
//! ## Example
//!
//! ```rust,no_run
//! use build_detector::markers::panel::MarkerPanel;
//! use build_detector::parsing::vcf::{scan_vcf, ReadOptions};
//! use std::path::Path;
//!
//! let panel = MarkerPanel::load_embedded().unwrap();
//! let scan = scan_vcf(Path::new("sample.vcf.gz"), &ReadOptions::default(), |convention| {
//!     panel.regions(convention)
//! })
//! .unwrap();
//!
//! println!("{} records at marker positions", scan.variants.len());
//! ```

use thiserror::Error;

pub mod vcf;

#[derive(Error, Debug)]
pub enum ParseError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("noodles error: {0}")]
    Noodles(String),

    #[error("No ##contig lines found in VCF header")]
    NoContigs,

    #[error("Invalid region '{0}'")]
    InvalidRegion(String),

    #[error("Invalid VCF record: {0}")]
    InvalidRecord(String),
}
