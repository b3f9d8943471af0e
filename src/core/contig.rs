use crate::core::types::NamingConvention;

/// Prefix used by UCSC-style contig names
pub const CHR_PREFIX: &str = "chr";

/// Detect the naming convention of a VCF from its declared contigs.
///
/// Only the first declared contig is consulted; `None` when the header declares no
/// contigs at all.
pub fn detect_naming_convention(contig_names: &[String]) -> Option<NamingConvention> {
    let first = contig_names.first()?;

    if first.starts_with(CHR_PREFIX) {
        Some(NamingConvention::Ucsc)
    } else {
        Some(NamingConvention::Ncbi)
    }
}

/// Rewrite a UCSC-style chromosome name for the given convention
pub fn to_convention(name: &str, convention: NamingConvention) -> String {
    match convention {
        NamingConvention::Ucsc => with_chr_prefix(name),
        NamingConvention::Ncbi => name.strip_prefix(CHR_PREFIX).unwrap_or(name).to_string(),
    }
}

/// Ensure a chromosome name carries the `chr` prefix (`1` -> `chr1`)
pub fn with_chr_prefix(name: &str) -> String {
    if name.starts_with(CHR_PREFIX) {
        name.to_string()
    } else {
        format!("{CHR_PREFIX}{name}")
    }
}
