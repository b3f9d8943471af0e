use serde::{Deserialize, Serialize};

/// Genome build a marker table column (and a detection result) refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub enum GenomeBuild {
    /// `GRCh37`, a.k.a. UCSC hg19
    #[serde(rename = "GRCh37")]
    Grch37,
    /// `GRCh38`, a.k.a. UCSC hg38
    #[serde(rename = "GRCh38")]
    Grch38,
}

impl GenomeBuild {
    /// Both builds, in table column order
    pub const ALL: [GenomeBuild; 2] = [Self::Grch37, Self::Grch38];

    /// UCSC name of the build (hg19/hg38)
    #[must_use]
    pub fn ucsc_name(self) -> &'static str {
        match self {
            Self::Grch37 => "hg19",
            Self::Grch38 => "hg38",
        }
    }

    /// Human readable one-line report, e.g. `Genome build: hg38/GRCh38`
    #[must_use]
    pub fn summary(self) -> String {
        format!("Genome build: {}/{self}", self.ucsc_name())
    }
}

impl std::fmt::Display for GenomeBuild {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Grch37 => write!(f, "GRCh37"),
            Self::Grch38 => write!(f, "GRCh38"),
        }
    }
}

/// Naming convention used for contigs
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NamingConvention {
    /// UCSC style: chr1, chr2, ..., chrX, chrY, chrM
    Ucsc,
    /// NCBI/Ensembl style: 1, 2, ..., X, Y, MT
    Ncbi,
}
