//! Core data types for genome build detection.
//!
//! - [`GenomeBuild`]: the two builds a file can be classified as
//! - [`NamingConvention`]: whether contigs are named `chr1` or `1`
//! - [`ObservedVariant`], [`MatchKey`]: alleles read from the file and the keys they
//!   are compared with
//!
//! ## Contig Naming
//!
//! | Source | Chromosome 1 | Chromosome X |
//! |--------|--------------|--------------|
//! | UCSC   | chr1         | chrX         |
//! | NCBI   | 1            | X            |
//!
//! Marker sites are stored UCSC style. Query regions are rewritten to the file's
//! convention, and observed chromosomes are rewritten back to UCSC style before keys are
//! compared.
//!
//! [`GenomeBuild`]: types::GenomeBuild
//! [`NamingConvention`]: types::NamingConvention
//! [`ObservedVariant`]: variant::ObservedVariant
//! [`MatchKey`]: variant::MatchKey

pub mod contig;
pub mod types;
pub mod variant;
