//! Genome build detection.
//!
//! The detector reads the records at every marker site (both builds' coordinates),
//! turns each alternate allele into a `chrN_pos_ref_alt` key and looks it up in the
//! marker panel. A file is classified only when all hits fall in one build's table.
//!
//! ## Example
//!
//! ```rust,no_run
//! use build_detector::detection::engine::BuildDetector;
//! use build_detector::markers::panel::MarkerPanel;
//! use std::path::Path;
//!
//! let panel = MarkerPanel::load_embedded().unwrap();
//! let detector = BuildDetector::new(&panel);
//!
//! match detector.detect(Path::new("sample.vcf.gz")) {
//!     Ok(detection) => println!("{}", detection.summary),
//!     Err(e) => eprintln!("{e}"),
//! }
//! ```

use thiserror::Error;

use crate::markers::PanelError;
use crate::parsing::ParseError;

pub mod engine;
pub mod evidence;

#[derive(Error, Debug)]
pub enum DetectError {
    #[error("No target variants found to detect the build")]
    NoTargetVariants,

    /// Markers from both builds were found
    #[error("Error in build detection")]
    Ambiguous { grch37: usize, grch38: usize },

    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error(transparent)]
    Panel(#[from] PanelError),
}
