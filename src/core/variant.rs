use crate::core::contig::with_chr_prefix;

/// Key used to compare observed alleles with marker table entries: `chrN_pos_ref_alt`
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MatchKey(String);

impl MatchKey {
    /// Build a key from its parts; the chromosome is always `chr`-prefixed
    pub fn new(chromosome: &str, position: u64, reference: &str, alternate: &str) -> Self {
        Self(format!(
            "{}_{position}_{reference}_{alternate}",
            with_chr_prefix(chromosome)
        ))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl std::fmt::Display for MatchKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A variant record read from the input file at one of the queried positions
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ObservedVariant {
    /// Chromosome as named in the file
    pub chromosome: String,
    /// 1-based position
    pub position: u64,
    pub reference: String,
    pub alternates: Vec<String>,
}

impl ObservedVariant {
    /// One match key per alternate allele
    pub fn match_keys(&self) -> impl Iterator<Item = MatchKey> + '_ {
        self.alternates.iter().map(move |alt| {
            MatchKey::new(&self.chromosome, self.position, &self.reference, alt)
        })
    }
}
