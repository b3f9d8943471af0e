//! The reference table of build-specific marker variants.
//!
//! Each marker is a common dbSNP variant whose coordinates differ between `GRCh37` and
//! `GRCh38`. The default panel is embedded at compile time from
//! `panels/build_markers.json`; custom panels use the same JSON layout:
//!
//! ```json
//! { "version": "1.0.0",
//!   "markers": [
//!     { "rsid": "rs3094315", "grch37": "chr1_752566_G_A,T", "grch38": "chr1_817186_G_A,T" }
//!   ] }
//! ```

use thiserror::Error;

pub mod panel;
pub mod site;

#[derive(Error, Debug)]
pub enum PanelError {
    #[error("Failed to read marker panel: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse marker panel: {0}")]
    ParseError(#[from] serde_json::Error),

    #[error("Invalid marker site '{0}': expected chrom_pos_ref_alt1,alt2,...")]
    InvalidSite(String),

    #[error("Duplicate marker rsID: {0}")]
    DuplicateRsid(String),

    #[error("Marker panel contains no markers")]
    Empty,
}
