use ab_io::read::ManifestRow;
use ahash::AHashMap;
use genome::{resolve, AllelePair, IlluminaStrand, MarkerKey, RefStrand, SnpDescriptor};
use located_error::prelude::*;
use log::{debug, trace, warn};
use std::collections::hash_map::Entry;

/// Resolved manifest entry of a single marker.
/// # Fields
/// - `illumina_strand`: TOP/BOT designation of the assay.
/// - `ref_strand`     : strand of the assay probe, relative to the reference genome.
/// - `descriptor`     : raw SNP descriptor (e.g. `[A/G]`)
/// - `alleles`        : nucleotides carried by the 'A' and 'B' alleles.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MarkerRecord {
    pub illumina_strand: IlluminaStrand,
    pub ref_strand     : RefStrand,
    pub descriptor     : SnpDescriptor,
    pub alleles        : AllelePair,
}

impl MarkerRecord {
    /// Resolve the 'A' and 'B' alleles of a manifest entry.
    ///
    /// # Errors
    /// - if `illumina_strand` contradicts the strand implied by `descriptor`.
    /// - if `descriptor` is an insertion/deletion.
    pub fn new(illumina_strand: IlluminaStrand, ref_strand: RefStrand, descriptor: SnpDescriptor) -> Result<Self> {
        let alleles = resolve(&descriptor, illumina_strand)?;
        Ok(Self{illumina_strand, ref_strand, descriptor, alleles})
    }

    /// Whether calls of this marker must be complemented to match the forward strand of the reference.
    #[must_use]
    pub fn requires_flip(&self) -> bool {
        self.ref_strand.requires_flip()
    }
}

/// In-memory index of resolved manifest entries, keyed by (chromosome, position, marker id).
#[derive(Debug, Default)]
pub struct MarkerIndex {
    markers       : AHashMap<MarkerKey, MarkerRecord>,
    skipped_indels: usize,
    duplicates    : usize,
}

impl MarkerIndex {
    /// Resolve and index every manifest entry of `rows`.
    ///
    /// # Behavior
    /// - Insertion/deletion entries are skipped, and counted separately.
    /// - When multiple entries share the same key, the last one wins. Duplicates are logged and counted.
    ///
    /// # Errors
    /// - if any row fails to be read or parsed.
    /// - if the alleles of any SNP entry cannot be resolved (strand mismatch).
    pub fn build<I>(rows: I) -> Result<Self>
    where I: IntoIterator<Item = Result<ManifestRow>>
    {
        let mut index = Self::default();
        for row in rows {
            match row.loc("While indexing manifest")? {
                ManifestRow::Indel{line, key, descriptor} => {
                    trace!("Skipping {descriptor} entry {key} (line {line})");
                    index.skipped_indels += 1;
                },
                ManifestRow::Snp{line, key, descriptor, illumina_strand, ref_strand} => {
                    let record = MarkerRecord::new(illumina_strand, ref_strand, descriptor)
                        .with_loc(|| format!("While resolving alleles of {key} (manifest line {line})"))?;
                    index.insert(key, record, line);
                },
            }
        }
        debug!("Indexed {} markers ({} indels skipped, {} duplicates)", index.len(), index.skipped_indels, index.duplicates);
        Ok(index)
    }

    fn insert(&mut self, key: MarkerKey, record: MarkerRecord, line: u64) {
        match self.markers.entry(key) {
            Entry::Occupied(mut entry) => {
                warn!("Duplicate manifest entry {} at line {line}. Overriding previous entry.", entry.key());
                entry.insert(record);
                self.duplicates += 1;
            },
            Entry::Vacant(entry) => {
                entry.insert(record);
            },
        }
    }

    /// Number of distinct markers within the index.
    #[must_use]
    pub fn len(&self) -> usize {
        self.markers.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.markers.is_empty()
    }

    /// Number of insertion/deletion entries skipped during construction.
    #[must_use]
    pub fn skipped_indels(&self) -> usize {
        self.skipped_indels
    }

    /// Number of manifest entries which overrode a previous entry sharing the same key.
    #[must_use]
    pub fn duplicates(&self) -> usize {
        self.duplicates
    }

    #[must_use]
    pub fn get(&self, key: &MarkerKey) -> Option<&MarkerRecord> {
        self.markers.get(key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use genome::{Nucleotide::*, ResolveError};

    fn key(chromosome: &str, position: u32, marker_id: &str) -> MarkerKey {
        MarkerKey::new(chromosome.parse().expect("Invalid chromosome"), position, marker_id)
    }

    fn snp(line: u64, key: MarkerKey, descriptor: SnpDescriptor, illumina_strand: IlluminaStrand, ref_strand: RefStrand) -> Result<ManifestRow> {
        Ok(ManifestRow::Snp{line, key, descriptor, illumina_strand, ref_strand})
    }

    #[test]
    fn build_skips_indels() -> Result<()> {
        let rows = vec![
            Ok(ManifestRow::Indel{line: 2, key: key("1", 10, "exm-IND1"), descriptor: SnpDescriptor::DelIns}),
            snp(3, key("1", 1000, "rs1"), SnpDescriptor::Snp(A, G), IlluminaStrand::Top, RefStrand::Plus),
            snp(4, key("2", 2000, "rs2"), SnpDescriptor::Snp(T, C), IlluminaStrand::Bot, RefStrand::Minus),
            snp(5, key("3", 3000, "rs3"), SnpDescriptor::Snp(A, T), IlluminaStrand::Bot, RefStrand::Plus),
        ];
        let index = MarkerIndex::build(rows)?;
        assert_eq!(index.len(), 3);
        assert_eq!(index.skipped_indels(), 1);
        assert_eq!(index.duplicates(), 0);
        assert!(index.get(&key("1", 10, "exm-IND1")).is_none());

        let rs2 = index.get(&key("chr2", 2000, "rs2")).expect("Missing rs2");
        assert_eq!(rs2.alleles, AllelePair::new(T, C));
        assert!(rs2.requires_flip());

        let rs3 = index.get(&key("3", 3000, "rs3")).expect("Missing rs3");
        assert_eq!(rs3.alleles, AllelePair::new(T, A));
        assert!(!rs3.requires_flip());
        Ok(())
    }

    #[test]
    fn build_duplicates_last_wins() -> Result<()> {
        let rows = vec![
            snp(2, key("1", 1000, "rs1"), SnpDescriptor::Snp(A, G), IlluminaStrand::Top, RefStrand::Plus),
            snp(3, key("1", 1000, "rs1"), SnpDescriptor::Snp(A, C), IlluminaStrand::Top, RefStrand::Minus),
        ];
        let index = MarkerIndex::build(rows)?;
        assert_eq!(index.len(), 1);
        assert_eq!(index.duplicates(), 1);

        let rs1 = index.get(&key("1", 1000, "rs1")).expect("Missing rs1");
        assert_eq!(rs1.alleles, AllelePair::new(A, C));
        assert_eq!(rs1.ref_strand, RefStrand::Minus);
        Ok(())
    }

    #[test]
    fn build_strand_mismatch_is_fatal() {
        let rows = vec![
            snp(2, key("1", 1000, "rs1"), SnpDescriptor::Snp(A, G), IlluminaStrand::Bot, RefStrand::Plus),
        ];
        let result = MarkerIndex::build(rows);
        assert!(result.is_err_and(|e| matches!(e.downcast_ref::<ResolveError>(), Some(ResolveError::StrandMismatch{..}))));
    }

    #[test]
    fn build_propagates_row_errors() {
        let rows = vec![
            snp(2, key("1", 1000, "rs1"), SnpDescriptor::Snp(A, G), IlluminaStrand::Top, RefStrand::Plus),
            Err(anyhow!("Malformed row")),
        ];
        assert!(MarkerIndex::build(rows).is_err());
    }

    #[test]
    fn empty_index() -> Result<()> {
        let index = MarkerIndex::build(Vec::new())?;
        assert!(index.is_empty());
        assert_eq!(index.len(), 0);
        Ok(())
    }
}
