use serde::Serialize;

use crate::core::types::GenomeBuild;
use crate::detection::DetectError;

/// One marker table cell matched by an observed allele
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MarkerHit {
    pub rsid: String,
    pub build: GenomeBuild,
    /// The table entry, e.g. `chr1_817186_G_A,T`
    pub reference_key: String,
    /// The observed allele that matched it, e.g. `chr1_817186_G_T`
    pub observed_key: String,
}

/// Marker table entries matched during a scan, in the order they were found
#[derive(Debug, Clone, Default, Serialize)]
pub struct BuildKeys {
    hits: Vec<MarkerHit>,
}

impl BuildKeys {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, hit: MarkerHit) {
        self.hits.push(hit);
    }

    pub fn hits(&self) -> &[MarkerHit] {
        &self.hits
    }

    pub fn is_empty(&self) -> bool {
        self.hits.is_empty()
    }

    pub fn len(&self) -> usize {
        self.hits.len()
    }

    /// Number of hits against the given build's table
    pub fn count(&self, build: GenomeBuild) -> usize {
        self.hits.iter().filter(|h| h.build == build).count()
    }

    /// Decide the build: all hits must come from exactly one build's table
    ///
    /// # Errors
    ///
    /// `DetectError::NoTargetVariants` when nothing matched, `DetectError::Ambiguous`
    /// when both tables matched.
    pub fn classify(&self) -> Result<GenomeBuild, DetectError> {
        if self.is_empty() {
            return Err(DetectError::NoTargetVariants);
        }

        let grch37 = self.count(GenomeBuild::Grch37);
        let grch38 = self.count(GenomeBuild::Grch38);

        match (grch37, grch38) {
            (_, 0) => Ok(GenomeBuild::Grch37),
            (0, _) => Ok(GenomeBuild::Grch38),
            _ => Err(DetectError::Ambiguous { grch37, grch38 }),
        }
    }
}
