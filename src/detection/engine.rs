use std::path::Path;

use serde::Serialize;
use tracing::{debug, info};

use crate::core::types::{GenomeBuild, NamingConvention};
use crate::core::variant::ObservedVariant;
use crate::detection::evidence::{BuildKeys, MarkerHit};
use crate::detection::DetectError;
use crate::markers::panel::MarkerPanel;
use crate::parsing::vcf::{scan_vcf, ReadOptions, VcfScan};

/// Successful detection with the evidence behind it
#[derive(Debug, Clone, Serialize)]
pub struct Detection {
    pub build: GenomeBuild,
    /// e.g. `Genome build: hg38/GRCh38`
    pub summary: String,
    pub naming_convention: NamingConvention,
    /// Number of records read at marker positions
    pub records_examined: usize,
    pub evidence: BuildKeys,
}

/// Configuration for the detector
#[derive(Debug, Clone, Default)]
pub struct DetectorConfig {
    pub read_options: ReadOptions,
}

/// Classifies VCF files against a marker panel
pub struct BuildDetector<'a> {
    panel: &'a MarkerPanel,
    config: DetectorConfig,
}

impl<'a> BuildDetector<'a> {
    /// Create a detector with default configuration
    pub fn new(panel: &'a MarkerPanel) -> Self {
        Self {
            panel,
            config: DetectorConfig::default(),
        }
    }

    /// Create a detector with custom configuration
    pub fn with_config(panel: &'a MarkerPanel, config: DetectorConfig) -> Self {
        Self { panel, config }
    }

    /// Detect the build of a VCF file
    ///
    /// # Errors
    ///
    /// Returns `DetectError::Parse` if the file cannot be read,
    /// `DetectError::NoTargetVariants` if no marker allele is present and
    /// `DetectError::Ambiguous` if markers of both builds are present.
    pub fn detect(&self, path: &Path) -> Result<Detection, DetectError> {
        info!("Detecting genome build of {}", path.display());

        let scan = scan_vcf(path, &self.config.read_options, |convention| {
            self.panel.regions(convention)
        })?;

        self.classify_scan(&scan)
    }

    /// Classify records that were already read
    ///
    /// # Errors
    ///
    /// Same detection errors as [`BuildDetector::detect`].
    pub fn classify_scan(&self, scan: &VcfScan) -> Result<Detection, DetectError> {
        debug!(
            "Header uses {:?} contig names; queried {} regions, {} records found",
            scan.naming_convention,
            scan.regions.len(),
            scan.variants.len()
        );

        let evidence = self.collect_hits(&scan.variants);
        let build = evidence.classify()?;

        info!("Detected {build} from {} marker hits", evidence.len());

        Ok(Detection {
            build,
            summary: build.summary(),
            naming_convention: scan.naming_convention,
            records_examined: scan.variants.len(),
            evidence,
        })
    }

    /// Match every alternate allele of every record against the panel
    pub fn collect_hits(&self, variants: &[ObservedVariant]) -> BuildKeys {
        let mut keys = BuildKeys::new();

        for variant in variants {
            for observed in variant.match_keys() {
                for &site in self.panel.lookup(&observed) {
                    let marker = self.panel.marker(site);
                    debug!("{observed} matches {} ({})", marker.rsid, site.build);
                    keys.push(MarkerHit {
                        rsid: marker.rsid.clone(),
                        build: site.build,
                        reference_key: marker.site(site.build).key(),
                        observed_key: observed.to_string(),
                    });
                }
            }
        }

        keys
    }
}

/// Detect the build of a VCF with the embedded marker panel
///
/// # Errors
///
/// See [`BuildDetector::detect`].
pub fn detect_build(path: impl AsRef<Path>) -> Result<GenomeBuild, DetectError> {
    let panel = MarkerPanel::load_embedded()?;
    let detector = BuildDetector::new(&panel);
    Ok(detector.detect(path.as_ref())?.build)
}
