//! A single cell of the marker table.
//!
//! Sites are written `chrom_pos_ref_alt1,alt2,...`, e.g. `chr1_817186_G_A,T`.

use serde::{Deserialize, Serialize};
use std::str::FromStr;

use crate::core::contig::{to_convention, with_chr_prefix};
use crate::core::types::NamingConvention;
use crate::core::variant::MatchKey;
use crate::markers::PanelError;

/// Coordinates and alleles of a marker in one build
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "String", into = "String")]
pub struct MarkerSite {
    /// UCSC-style chromosome name
    pub chromosome: String,
    /// 1-based position
    pub position: u64,
    pub reference: String,
    pub alternates: Vec<String>,
}

impl MarkerSite {
    /// The site in its table form, `chrom_pos_ref_alt1,alt2`
    pub fn key(&self) -> String {
        format!(
            "{}_{}_{}_{}",
            self.chromosome,
            self.position,
            self.reference,
            self.alternates.join(",")
        )
    }

    /// One match key per alternate allele listed for the site
    pub fn match_keys(&self) -> impl Iterator<Item = MatchKey> + '_ {
        self.alternates
            .iter()
            .map(move |alt| MatchKey::new(&self.chromosome, self.position, &self.reference, alt))
    }

    /// Single base region covering the site, named for the file's convention
    pub fn region(&self, convention: NamingConvention) -> QueryRegion {
        QueryRegion {
            contig: to_convention(&self.chromosome, convention),
            position: self.position,
        }
    }
}

impl FromStr for MarkerSite {
    type Err = PanelError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let invalid = || PanelError::InvalidSite(s.to_string());

        let mut fields = s.split('_');
        let (Some(chromosome), Some(position), Some(reference), Some(alternates), None) = (
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
            fields.next(),
        ) else {
            return Err(invalid());
        };

        let position: u64 = position.parse().map_err(|_| invalid())?;
        if chromosome.is_empty() || reference.is_empty() || position == 0 {
            return Err(invalid());
        }

        let alternates: Vec<String> = alternates
            .split(',')
            .filter(|a| !a.is_empty())
            .map(str::to_string)
            .collect();
        if alternates.is_empty() {
            return Err(invalid());
        }

        Ok(Self {
            chromosome: with_chr_prefix(chromosome),
            position,
            reference: reference.to_string(),
            alternates,
        })
    }
}

impl TryFrom<String> for MarkerSite {
    type Error = PanelError;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}

impl From<MarkerSite> for String {
    fn from(site: MarkerSite) -> Self {
        site.key()
    }
}

/// A single base pair region to query, e.g. `chr1:817186-817186`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct QueryRegion {
    /// Contig name as the file spells it
    pub contig: String,
    /// 1-based position
    pub position: u64,
}

impl std::fmt::Display for QueryRegion {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}-{}", self.contig, self.position, self.position)
    }
}
