use serde::{Deserialize, Serialize};
use std::collections::{HashMap, HashSet};
use std::path::Path;
use tracing::{debug, warn};

use crate::core::types::{GenomeBuild, NamingConvention};
use crate::core::variant::MatchKey;
use crate::markers::site::{MarkerSite, QueryRegion};
use crate::markers::PanelError;

/// Panel version for compatibility checking
pub const PANEL_VERSION: &str = "1.0.0";

/// A known variant with its coordinates in both builds
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Marker {
    /// dbSNP identifier (e.g., "rs3094315")
    pub rsid: String,
    pub grch37: MarkerSite,
    pub grch38: MarkerSite,
}

impl Marker {
    /// The marker's site in the given build
    pub fn site(&self, build: GenomeBuild) -> &MarkerSite {
        match build {
            GenomeBuild::Grch37 => &self.grch37,
            GenomeBuild::Grch38 => &self.grch38,
        }
    }
}

/// Serializable panel format
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PanelData {
    pub version: String,
    pub markers: Vec<Marker>,
}

/// Points at one cell of the marker table
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SiteRef {
    /// Index into [`MarkerPanel::markers`]
    pub marker: usize,
    pub build: GenomeBuild,
}

/// The per-build marker table with a match-key index
#[derive(Debug)]
pub struct MarkerPanel {
    pub version: String,

    /// All markers, in table order
    pub markers: Vec<Marker>,

    /// Index: match key -> table cells listing that allele
    key_to_sites: HashMap<MatchKey, Vec<SiteRef>>,
}

impl MarkerPanel {
    /// Build a panel from markers, indexing every (site, alternate allele) pair
    ///
    /// # Errors
    ///
    /// Returns `PanelError::Empty` for an empty marker list and
    /// `PanelError::DuplicateRsid` when an rsID appears twice.
    pub fn new(version: impl Into<String>, markers: Vec<Marker>) -> Result<Self, PanelError> {
        if markers.is_empty() {
            return Err(PanelError::Empty);
        }

        let mut seen = HashSet::new();
        for marker in &markers {
            if !seen.insert(marker.rsid.as_str()) {
                return Err(PanelError::DuplicateRsid(marker.rsid.clone()));
            }
        }

        let mut key_to_sites: HashMap<MatchKey, Vec<SiteRef>> = HashMap::new();
        for (idx, marker) in markers.iter().enumerate() {
            for build in GenomeBuild::ALL {
                for key in marker.site(build).match_keys() {
                    key_to_sites.entry(key).or_default().push(SiteRef {
                        marker: idx,
                        build,
                    });
                }
            }
        }

        debug!(
            "Indexed {} markers into {} match keys",
            markers.len(),
            key_to_sites.len()
        );

        Ok(Self {
            version: version.into(),
            markers,
            key_to_sites,
        })
    }

    /// Load the embedded default panel
    ///
    /// # Errors
    ///
    /// Only fails if the embedded JSON is broken, which `build.rs` rules out.
    pub fn load_embedded() -> Result<Self, PanelError> {
        // Validated at compile time via build.rs
        const EMBEDDED_PANEL: &str = include_str!("../../panels/build_markers.json");
        Self::from_json(EMBEDDED_PANEL)
    }

    /// Load a panel from a JSON file
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read or is not a valid panel.
    pub fn load_from_file(path: &Path) -> Result<Self, PanelError> {
        let content = std::fs::read_to_string(path)?;
        Self::from_json(&content)
    }

    /// Parse a panel from a JSON string
    ///
    /// # Errors
    ///
    /// Returns an error if the JSON is malformed, a site key is invalid, or the
    /// panel is empty.
    pub fn from_json(json: &str) -> Result<Self, PanelError> {
        let data: PanelData = serde_json::from_str(json)?;

        // Version check (warn but don't fail)
        if data.version != PANEL_VERSION {
            warn!(
                "Marker panel version mismatch (expected {PANEL_VERSION}, found {})",
                data.version
            );
        }

        Self::new(data.version, data.markers)
    }

    /// Export the panel as JSON
    #[cfg(test)]
    pub fn to_json(&self) -> Result<String, PanelError> {
        let data = PanelData {
            version: self.version.clone(),
            markers: self.markers.clone(),
        };
        Ok(serde_json::to_string_pretty(&data)?)
    }

    pub fn len(&self) -> usize {
        self.markers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Every marker site as a query region: all `GRCh37` sites, then all `GRCh38` sites
    pub fn regions(&self, convention: NamingConvention) -> Vec<QueryRegion> {
        GenomeBuild::ALL
            .iter()
            .flat_map(|&build| {
                self.markers
                    .iter()
                    .map(move |m| m.site(build).region(convention))
            })
            .collect()
    }

    /// Table cells whose alleles include this key
    pub fn lookup(&self, key: &MatchKey) -> &[SiteRef] {
        self.key_to_sites.get(key).map_or(&[][..], Vec::as_slice)
    }

    pub fn marker(&self, site: SiteRef) -> &Marker {
        &self.markers[site.marker]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn marker(rsid: &str, grch37: &str, grch38: &str) -> Marker {
        Marker {
            rsid: rsid.to_string(),
            grch37: grch37.parse().unwrap(),
            grch38: grch38.parse().unwrap(),
        }
    }

    #[test]
    fn test_load_embedded() {
        let panel = MarkerPanel::load_embedded().unwrap();
        assert_eq!(panel.len(), 7);
        assert_eq!(panel.version, PANEL_VERSION);

        let rsids: Vec<&str> = panel.markers.iter().map(|m| m.rsid.as_str()).collect();
        assert_eq!(
            rsids,
            vec![
                "rs3094315",
                "rs11928389",
                "rs2500347",
                "rs964481",
                "rs2341354",
                "rs3850290",
                "rs1329546",
            ]
        );
        assert_eq!(panel.markers[0].grch37.key(), "chr1_752566_G_A,T");
        assert_eq!(panel.markers[0].grch38.key(), "chr1_817186_G_A,T");
        assert_eq!(panel.markers[6].grch38.key(), "chrX_136392261_C_A,G,T");
    }

    #[test]
    fn test_regions_order_and_naming() {
        let panel = MarkerPanel::load_embedded().unwrap();

        let regions = panel.regions(NamingConvention::Ucsc);
        assert_eq!(regions.len(), 14);
        assert_eq!(regions[0].to_string(), "chr1:752566-752566");
        assert_eq!(regions[6].to_string(), "chrX:135474420-135474420");
        assert_eq!(regions[7].to_string(), "chr1:817186-817186");
        assert_eq!(regions[13].to_string(), "chrX:136392261-136392261");

        let regions = panel.regions(NamingConvention::Ncbi);
        assert_eq!(regions[5].to_string(), "14:23245301-23245301");
    }

    #[test]
    fn test_lookup() {
        let panel = MarkerPanel::load_embedded().unwrap();

        let hits = panel.lookup(&MatchKey::new("chr1", 817_186, "G", "T"));
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].build, GenomeBuild::Grch38);
        assert_eq!(panel.marker(hits[0]).rsid, "rs3094315");

        // Right position, allele not in the table
        assert!(panel
            .lookup(&MatchKey::new("chr1", 817_186, "G", "C"))
            .is_empty());
        // Wrong reference allele
        assert!(panel
            .lookup(&MatchKey::new("chr1", 817_186, "A", "T"))
            .is_empty());
    }

    #[test]
    fn test_empty_panel_rejected() {
        let result = MarkerPanel::from_json(r#"{"version": "1.0.0", "markers": []}"#);
        assert!(matches!(result, Err(PanelError::Empty)));
    }

    #[test]
    fn test_duplicate_rsid_rejected() {
        let markers = vec![
            marker("rs1", "chr1_100_A_G", "chr1_200_A_G"),
            marker("rs1", "chr2_100_A_G", "chr2_200_A_G"),
        ];
        let result = MarkerPanel::new(PANEL_VERSION, markers);
        assert!(matches!(result, Err(PanelError::DuplicateRsid(id)) if id == "rs1"));
    }

    #[test]
    fn test_invalid_site_in_json() {
        let json = r#"{"version": "1.0.0", "markers": [
            {"rsid": "rs1", "grch37": "chr1_100_A", "grch38": "chr1_200_A_G"}
        ]}"#;
        assert!(MarkerPanel::from_json(json).is_err());
    }

    #[test]
    fn test_version_mismatch_still_loads() {
        let json = r#"{"version": "0.9.0", "markers": [
            {"rsid": "rs1", "grch37": "chr1_100_A_G", "grch38": "chr1_200_A_G"}
        ]}"#;

        let panel = MarkerPanel::from_json(json).unwrap();
        assert_ne!(panel.version, PANEL_VERSION);
        assert_eq!(panel.version, "0.9.0");
        assert_eq!(panel.len(), 1);
    }

    #[test]
    fn test_json_export_reloads() {
        let panel = MarkerPanel::load_embedded().unwrap();
        let json = panel.to_json().unwrap();
        assert!(json.contains("\"chr14_22776092_T_A,C,G\""));

        let reloaded = MarkerPanel::from_json(&json).unwrap();
        assert_eq!(reloaded.markers, panel.markers);
    }

    #[test]
    fn test_load_from_file() {
        use std::io::Write;

        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"{{"version": "custom", "markers": [
                {{"rsid": "rs1", "grch37": "chr2_100_A_G", "grch38": "chr2_250_A_G,C"}}
            ]}}"#
        )
        .unwrap();

        let panel = MarkerPanel::load_from_file(file.path()).unwrap();
        assert_eq!(panel.version, "custom");
        assert_eq!(panel.len(), 1);
        assert_eq!(
            panel.lookup(&MatchKey::new("2", 250, "A", "C"))[0].build,
            GenomeBuild::Grch38
        );
    }
}
