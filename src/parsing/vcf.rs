//! VCF access through noodles.
//!
//! The header is read once to learn the contig naming convention, then the caller
//! supplies the regions to fetch for that convention.

use std::collections::{HashMap, HashSet};
use std::ffi::OsString;
use std::fs::File;
use std::io::{self, BufRead, BufReader};
use std::num::NonZeroUsize;
use std::path::{Path, PathBuf};

use noodles::bgzf;
use noodles::core::Region;
use noodles::csi::BinningIndex;
use noodles::vcf;
use noodles::vcf::variant::record::AlternateBases as _;
use tracing::{debug, info, warn};

use crate::core::contig::detect_naming_convention;
use crate::core::types::NamingConvention;
use crate::core::variant::ObservedVariant;
use crate::markers::site::QueryRegion;
use crate::parsing::ParseError;

/// Options for opening a VCF
#[derive(Debug, Clone)]
pub struct ReadOptions {
    /// Worker threads for BGZF decompression
    pub threads: NonZeroUsize,
}

impl Default for ReadOptions {
    fn default() -> Self {
        Self {
            threads: default_threads(),
        }
    }
}

/// Number of processors available to this process, at least one
pub fn default_threads() -> NonZeroUsize {
    std::thread::available_parallelism().unwrap_or(NonZeroUsize::MIN)
}

/// How a VCF on disk will be read
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputLayout {
    /// bgzip with a tabix/CSI index at the given path
    Indexed { index: PathBuf },
    /// bgzip without an index
    Bgzip,
    /// Uncompressed text
    Plain,
}

/// Detect the input layout from the file extension and sibling index files
pub fn detect_layout(path: &Path) -> InputLayout {
    let path_str = path.to_string_lossy().to_lowercase();

    if !(path_str.ends_with(".gz") || path_str.ends_with(".bgz")) {
        return InputLayout::Plain;
    }

    for ext in ["tbi", "csi"] {
        let index = sibling_index(path, ext);
        if index.exists() {
            return InputLayout::Indexed { index };
        }
    }

    InputLayout::Bgzip
}

fn sibling_index(path: &Path, ext: &str) -> PathBuf {
    let mut name = OsString::from(path.as_os_str());
    name.push(".");
    name.push(ext);
    PathBuf::from(name)
}

/// Records found at the requested regions
#[derive(Debug, Clone)]
pub struct VcfScan {
    /// Contig names declared in the header, in order
    pub contig_names: Vec<String>,
    /// Naming convention of the first declared contig
    pub naming_convention: NamingConvention,
    /// Regions that were fetched
    pub regions: Vec<QueryRegion>,
    /// Records at those regions, in region order for indexed input and file order
    /// otherwise
    pub variants: Vec<ObservedVariant>,
}

/// Open a VCF, read its header and fetch the records at the regions chosen by
/// `regions_for` for the file's naming convention.
///
/// The reader is dropped before returning, on success and on error.
///
/// # Errors
///
/// Returns `ParseError::Io` if the file cannot be opened, `ParseError::Noodles` if the
/// header, index or a record cannot be decoded, and `ParseError::NoContigs` if the
/// header declares no contigs.
pub fn scan_vcf<F>(
    path: &Path,
    options: &ReadOptions,
    regions_for: F,
) -> Result<VcfScan, ParseError>
where
    F: FnOnce(NamingConvention) -> Vec<QueryRegion>,
{
    match detect_layout(path) {
        InputLayout::Indexed { index } => {
            debug!("Querying {} through index {}", path.display(), index.display());
            scan_indexed(path, regions_for)
        }
        InputLayout::Bgzip => {
            warn!(
                "No .tbi or .csi index found for {}, scanning the whole file",
                path.display()
            );
            info!("Decompressing with {} worker threads", options.threads);
            let file = File::open(path)?;
            let reader = bgzf::MultithreadedReader::with_worker_count(options.threads, file);
            scan_sequential(reader, regions_for)
        }
        InputLayout::Plain => {
            debug!("Scanning uncompressed VCF {}", path.display());
            let reader = File::open(path).map(BufReader::new)?;
            scan_sequential(reader, regions_for)
        }
    }
}

/// Parse VCF text held in memory (uncompressed)
///
/// # Errors
///
/// Same conditions as [`scan_vcf`].
pub fn scan_vcf_text<F>(text: &str, regions_for: F) -> Result<VcfScan, ParseError>
where
    F: FnOnce(NamingConvention) -> Vec<QueryRegion>,
{
    scan_sequential(text.as_bytes(), regions_for)
}

fn scan_indexed<F>(path: &Path, regions_for: F) -> Result<VcfScan, ParseError>
where
    F: FnOnce(NamingConvention) -> Vec<QueryRegion>,
{
    let mut reader = vcf::io::indexed_reader::Builder::default()
        .build_from_path(path)
        .map_err(|e| ParseError::Noodles(format!("{}: {e}", path.display())))?;

    let header = reader
        .read_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    let contig_names = header_contig_names(&header);
    let naming_convention = detect_naming_convention(&contig_names).ok_or(ParseError::NoContigs)?;
    let regions = regions_for(naming_convention);

    let indexed_names = indexed_contig_names(reader.index())?;

    let mut variants = Vec::new();
    for query_region in &regions {
        let region_str = query_region.to_string();

        // Contigs without records are absent from the index
        if !indexed_names.contains(query_region.contig.as_str()) {
            debug!("Skipping {region_str}: contig not in index");
            continue;
        }

        let region: Region = region_str
            .parse()
            .map_err(|_| ParseError::InvalidRegion(region_str.clone()))?;

        let query = reader
            .query(&header, &region)
            .map_err(|e| ParseError::Noodles(format!("{region_str}: {e}")))?;

        for result in query {
            let record = result.map_err(|e| ParseError::Noodles(e.to_string()))?;
            let variant = observed_variant(&record)?;
            if variant.position == query_region.position {
                variants.push(variant);
            }
        }
    }

    Ok(VcfScan {
        contig_names,
        naming_convention,
        regions,
        variants,
    })
}

fn scan_sequential<R, F>(inner: R, regions_for: F) -> Result<VcfScan, ParseError>
where
    R: BufRead,
    F: FnOnce(NamingConvention) -> Vec<QueryRegion>,
{
    let mut reader = vcf::io::Reader::new(inner);

    let header = reader
        .read_header()
        .map_err(|e| ParseError::Noodles(e.to_string()))?;

    let contig_names = header_contig_names(&header);
    let naming_convention = detect_naming_convention(&contig_names).ok_or(ParseError::NoContigs)?;
    let regions = regions_for(naming_convention);

    let mut wanted: HashMap<&str, HashSet<u64>> = HashMap::new();
    for region in &regions {
        wanted
            .entry(region.contig.as_str())
            .or_default()
            .insert(region.position);
    }

    let mut variants = Vec::new();
    let mut record_count: u64 = 0;
    for result in reader.records() {
        let record = result.map_err(|e| ParseError::Noodles(e.to_string()))?;
        record_count += 1;

        let chromosome = record.reference_sequence_name();
        let Some(position) = record_position(&record)? else {
            continue;
        };

        if wanted
            .get(chromosome)
            .is_some_and(|positions| positions.contains(&position))
        {
            variants.push(observed_variant(&record)?);
        }
    }

    debug!(
        "Scanned {record_count} records, {} at marker positions",
        variants.len()
    );

    Ok(VcfScan {
        contig_names,
        naming_convention,
        regions,
        variants,
    })
}

/// Reference sequence names recorded in the index header
fn indexed_contig_names(index: &dyn BinningIndex) -> Result<HashSet<String>, ParseError> {
    let header = index
        .header()
        .ok_or_else(|| ParseError::Noodles("index has no tabix header".to_string()))?;

    Ok(header
        .reference_sequence_names()
        .iter()
        .map(|name| String::from_utf8_lossy(name.as_ref()).into_owned())
        .collect())
}

fn header_contig_names(header: &vcf::Header) -> Vec<String> {
    header.contigs().keys().map(ToString::to_string).collect()
}

fn record_position(record: &vcf::Record) -> Result<Option<u64>, ParseError> {
    let position = record
        .variant_start()
        .transpose()
        .map_err(|e| ParseError::InvalidRecord(format!("bad position: {e}")))?;

    Ok(position.map(|p| usize::from(p) as u64))
}

fn observed_variant(record: &vcf::Record) -> Result<ObservedVariant, ParseError> {
    let chromosome = record.reference_sequence_name().to_string();
    let position = record_position(record)?.ok_or_else(|| {
        ParseError::InvalidRecord(format!("record on {chromosome} has no position"))
    })?;

    let alternates = record
        .alternate_bases()
        .iter()
        .map(|allele| allele.map(str::to_string))
        .collect::<io::Result<Vec<_>>>()
        .map_err(|e| ParseError::InvalidRecord(format!("bad ALT on {chromosome}: {e}")))?;

    Ok(ObservedVariant {
        chromosome,
        position,
        reference: record.reference_bases().to_string(),
        alternates,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    const HEADER: &str = "##fileformat=VCFv4.2
##contig=<ID=chr1,length=248956422>
##contig=<ID=chrX,length=156040895>
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
";

    fn regions(convention: NamingConvention) -> Vec<QueryRegion> {
        let contig = match convention {
            NamingConvention::Ucsc => "chr1",
            NamingConvention::Ncbi => "1",
        };
        vec![QueryRegion {
            contig: contig.to_string(),
            position: 817_186,
        }]
    }

    #[test]
    fn test_scan_keeps_records_at_regions() {
        let vcf = format!(
            "{HEADER}chr1\t817185\t.\tA\tC\t.\t.\t.\nchr1\t817186\trs3094315\tG\tA,T\t.\t.\t.\nchrX\t817186\t.\tG\tA\t.\t.\t.\n"
        );

        let scan = scan_vcf_text(&vcf, regions).unwrap();
        assert_eq!(scan.naming_convention, NamingConvention::Ucsc);
        assert_eq!(scan.contig_names, vec!["chr1", "chrX"]);
        assert_eq!(scan.variants.len(), 1);

        let variant = &scan.variants[0];
        assert_eq!(variant.chromosome, "chr1");
        assert_eq!(variant.position, 817_186);
        assert_eq!(variant.reference, "G");
        assert_eq!(variant.alternates, vec!["A", "T"]);
    }

    #[test]
    fn test_scan_ncbi_names() {
        let vcf = "##fileformat=VCFv4.2
##contig=<ID=1,length=249250621>
#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO
1\t817186\t.\tG\tA\t.\t.\t.
";
        let scan = scan_vcf_text(vcf, regions).unwrap();
        assert_eq!(scan.naming_convention, NamingConvention::Ncbi);
        assert_eq!(scan.regions[0].contig, "1");
        assert_eq!(scan.variants.len(), 1);
    }

    #[test]
    fn test_scan_no_contigs() {
        let vcf = "##fileformat=VCFv4.2\n#CHROM\tPOS\tID\tREF\tALT\tQUAL\tFILTER\tINFO\n";
        let result = scan_vcf_text(vcf, regions);
        assert!(matches!(result, Err(ParseError::NoContigs)));
    }

    #[test]
    fn test_scan_missing_alt() {
        let vcf = format!("{HEADER}chr1\t817186\t.\tG\t.\t.\t.\t.\n");
        let scan = scan_vcf_text(&vcf, regions).unwrap();
        assert_eq!(scan.variants.len(), 1);
        assert!(scan.variants[0].alternates.is_empty());
    }

    #[test]
    fn test_scan_vcf_file() {
        use std::io::Write;

        let mut file = tempfile::Builder::new().suffix(".vcf").tempfile().unwrap();
        write!(file, "{HEADER}chr1\t817186\t.\tG\tT\t.\t.\t.\n").unwrap();

        let scan = scan_vcf(file.path(), &ReadOptions::default(), regions).unwrap();
        assert_eq!(scan.variants.len(), 1);
        assert_eq!(scan.variants[0].alternates, vec!["T"]);
    }

    #[test]
    fn test_scan_missing_file() {
        let result = scan_vcf(
            Path::new("/nonexistent/sample.vcf"),
            &ReadOptions::default(),
            regions,
        );
        assert!(matches!(result, Err(ParseError::Io(_))));
    }

    #[test]
    fn test_detect_layout() {
        let dir = tempfile::tempdir().unwrap();

        let plain = dir.path().join("sample.vcf");
        assert_eq!(detect_layout(&plain), InputLayout::Plain);

        let bgzip = dir.path().join("sample.vcf.gz");
        assert_eq!(detect_layout(&bgzip), InputLayout::Bgzip);

        let tbi = dir.path().join("sample.vcf.gz.tbi");
        std::fs::write(&tbi, b"").unwrap();
        assert_eq!(
            detect_layout(&bgzip),
            InputLayout::Indexed { index: tbi }
        );

        let csi_only = dir.path().join("other.vcf.bgz");
        let csi = dir.path().join("other.vcf.bgz.csi");
        std::fs::write(&csi, b"").unwrap();
        assert_eq!(
            detect_layout(&csi_only),
            InputLayout::Indexed { index: csi }
        );
    }

    const GRCH38_RECORDS: &str = "chr1\t817186\trs3094315\tG\tT\t.\t.\t.
chr1\t983193\trs2341354\tA\tG\t.\t.\t.
chrX\t27638706\trs964481\tA\tT\t.\t.\t.
";

    /// Write `text` bgzip-compressed, optionally with a tabix index next to it
    fn write_bgzip_vcf(dir: &Path, name: &str, text: &str, with_index: bool) -> PathBuf {
        use noodles::tabix;
        use std::io::Write;

        let path = dir.join(name);
        let mut writer = bgzf::Writer::new(File::create(&path).unwrap());
        writer.write_all(text.as_bytes()).unwrap();
        writer.finish().unwrap();

        if with_index {
            let index = vcf::index(&path).unwrap();
            tabix::write(sibling_index(&path, "tbi"), &index).unwrap();
        }

        path
    }

    fn marker_regions(convention: NamingConvention) -> Vec<QueryRegion> {
        crate::markers::panel::MarkerPanel::load_embedded()
            .unwrap()
            .regions(convention)
    }

    fn positions(scan: &VcfScan) -> Vec<(String, u64)> {
        let mut found: Vec<(String, u64)> = scan
            .variants
            .iter()
            .map(|v| (v.chromosome.clone(), v.position))
            .collect();
        found.sort();
        found
    }

    #[test]
    fn test_scan_indexed_bgzip() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bgzip_vcf(
            dir.path(),
            "grch38.vcf.gz",
            &format!("{HEADER}{GRCH38_RECORDS}"),
            true,
        );
        assert!(matches!(detect_layout(&path), InputLayout::Indexed { .. }));

        let scan = scan_vcf(&path, &ReadOptions::default(), marker_regions).unwrap();
        assert_eq!(scan.naming_convention, NamingConvention::Ucsc);
        assert_eq!(scan.regions.len(), 14);
        assert_eq!(
            positions(&scan),
            vec![
                ("chr1".to_string(), 817_186),
                ("chr1".to_string(), 983_193),
                ("chrX".to_string(), 27_638_706),
            ]
        );
        assert_eq!(scan.variants[0].alternates, vec!["T"]);
    }

    #[test]
    fn test_scan_indexed_skips_contigs_missing_from_index() {
        // Only chr1 has records, so chr3/chr14/chrX regions have no index entry
        let dir = tempfile::tempdir().unwrap();
        let path = write_bgzip_vcf(
            dir.path(),
            "chr1_only.vcf.gz",
            &format!("{HEADER}chr1\t752566\t.\tG\tA\t.\t.\t.\n"),
            true,
        );

        let scan = scan_vcf(&path, &ReadOptions::default(), marker_regions).unwrap();
        assert_eq!(positions(&scan), vec![("chr1".to_string(), 752_566)]);
    }

    #[test]
    fn test_scan_bgzip_without_index_matches_indexed() {
        let dir = tempfile::tempdir().unwrap();
        let text = format!("{HEADER}{GRCH38_RECORDS}");
        let indexed = write_bgzip_vcf(dir.path(), "indexed.vcf.gz", &text, true);
        let unindexed = write_bgzip_vcf(dir.path(), "unindexed.vcf.gz", &text, false);
        assert_eq!(detect_layout(&unindexed), InputLayout::Bgzip);

        let options = ReadOptions {
            threads: NonZeroUsize::new(2).unwrap(),
        };
        let from_index = scan_vcf(&indexed, &options, marker_regions).unwrap();
        let from_scan = scan_vcf(&unindexed, &options, marker_regions).unwrap();

        assert_eq!(positions(&from_scan), positions(&from_index));
        assert_eq!(from_scan.contig_names, from_index.contig_names);
    }

    #[test]
    fn test_scan_indexed_broken_index_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_bgzip_vcf(
            dir.path(),
            "broken.vcf.gz",
            &format!("{HEADER}{GRCH38_RECORDS}"),
            false,
        );
        std::fs::write(sibling_index(&path, "tbi"), b"not an index").unwrap();

        let result = scan_vcf(&path, &ReadOptions::default(), marker_regions);
        assert!(matches!(result, Err(ParseError::Noodles(_))));
    }

    #[test]
    fn test_default_threads_nonzero() {
        assert!(ReadOptions::default().threads.get() >= 1);
    }
}
