use std::fmt::{self, Display, Formatter};

use ab_io::{
    read::{GenotypeReader, GenotypeRow, SampleRecord},
    write::{PlinkSink, TfamRecord, TpedRecord},
};
use genome::{GenotypeCall, TranslatedCall};
use located_error::prelude::*;
use log::{debug, info, warn};
use rayon::prelude::*;

use crate::{MarkerIndex, MatrixError};

/// Parallelization settings of [`transform`].
/// # Fields
/// - `threads`   : size of the translation threadpool.
/// - `batch_size`: number of genotype rows read, then translated in parallel, at once.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct TransformOptions {
    pub threads   : usize,
    pub batch_size: usize,
}

impl Default for TransformOptions {
    fn default() -> Self {
        Self{threads: 1, batch_size: 4096}
    }
}

/// Counts of a conversion run. `rows == matched + discarded` always holds.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct Summary {
    /// Markers indexed from the manifest.
    pub indexed       : usize,
    /// Manifest insertion/deletion entries, left out of the index.
    pub skipped_indels: usize,
    /// Manifest entries overriding a previous entry with the same key.
    pub duplicates    : usize,
    /// Genotype rows read.
    pub rows          : usize,
    /// Genotype rows found within the index, and translated.
    pub matched       : usize,
    /// Genotype rows missing from the index.
    pub discarded     : usize,
    /// Translated markers requiring a strand flip.
    pub flipped       : usize,
    pub samples       : usize,
}

impl Display for Summary {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        writeln!(f, "Markers indexed     : {: >10}", self.indexed)?;
        writeln!(f, "  - skipped indels  : {: >10}", self.skipped_indels)?;
        writeln!(f, "  - duplicates      : {: >10}", self.duplicates)?;
        writeln!(f, "Samples             : {: >10}", self.samples)?;
        writeln!(f, "Genotype rows       : {: >10}", self.rows)?;
        writeln!(f, "  - matched         : {: >10}", self.matched)?;
        writeln!(f, "  - discarded       : {: >10}", self.discarded)?;
        write!(f,   "  - flipped         : {: >10}", self.flipped)
    }
}

/// A genotype row found within the index, translated.
struct TranslatedRow {
    record: TpedRecord,
    flip  : bool,
}

/// Translate every AB call of `row`. Returns `None` if the marker is missing from the index.
fn translate_row(row: GenotypeRow, index: &MarkerIndex, samples: &[SampleRecord]) -> Result<Option<TranslatedRow>> {
    use MatrixError::CallCount;
    let Some(marker) = index.get(&row.key) else {
        return Ok(None)
    };

    if row.calls.len() != samples.len() {
        return Err(CallCount{line: row.line, expected: samples.len(), found: row.calls.len()})
            .loc("While translating genotypes")
    }

    let calls = row.calls.iter()
        .zip(samples)
        .map(|(raw, sample)| {
            raw.parse::<GenotypeCall>()
                .map(|call| call.translate(&marker.alleles))
                .with_loc(|| format!("While translating call of sample {sample} for marker {} (line {})", row.key, row.line))
        })
        .collect::<Result<Vec<TranslatedCall>>>()?;

    let record = TpedRecord{
        chromosome: row.chromosome,
        marker_id : row.key.marker_id,
        position  : row.position,
        calls
    };
    Ok(Some(TranslatedRow{record, flip: marker.requires_flip()}))
}

/// Translate every genotype row of `reader` found within `index`, and send the results to `sink`.
///
/// # Behavior
/// - Samples are written first, in header order.
/// - Rows are read in batches of `options.batch_size`, translated in parallel over the read-only
///   index, then written in their input order. Outputs are thus identical regardless of `options.threads`.
/// - Rows missing from the index are discarded. Rows of markers lying on the minus strand of the
///   reference are additionally sent to the flip list.
///
/// # Errors
/// - if the threadpool cannot be built, or `options.batch_size` is zero.
/// - if any genotype row cannot be read, or carries an invalid AB call.
/// - if `sink` fails to write.
pub fn transform<S: PlinkSink>(mut reader: GenotypeReader<'_>, index: &MarkerIndex, sink: &mut S, options: TransformOptions) -> Result<Summary> {
    use MatrixError::{BuildThreadPool, ZeroBatchSize};
    let loc_msg = "While transforming genotype matrix";
    if options.batch_size == 0 {
        return Err(ZeroBatchSize).loc(loc_msg)
    }

    let pool = rayon::ThreadPoolBuilder::new()
        .num_threads(options.threads)
        .build()
        .map_err(BuildThreadPool)
        .loc(loc_msg)?;

    let samples = reader.samples().to_vec();
    let tfam = samples.iter().map(TfamRecord::from).collect::<Vec<_>>();
    sink.write_samples(&tfam).loc(loc_msg)?;

    let mut summary = Summary{
        indexed       : index.len(),
        skipped_indels: index.skipped_indels(),
        duplicates    : index.duplicates(),
        samples       : samples.len(),
        ..Default::default()
    };

    let spinner = logger::Logger::spinner("Translating genotypes");
    loop {
        let batch = reader.by_ref()
            .take(options.batch_size)
            .collect::<Result<Vec<GenotypeRow>>>()
            .loc(loc_msg)?;
        if batch.is_empty() {
            break
        }

        let batch_len = batch.len();
        let translated = pool.install(|| {
            batch.into_par_iter()
                .map(|row| translate_row(row, index, &samples))
                .collect::<Result<Vec<_>>>()
        }).loc(loc_msg)?;

        for row in translated {
            summary.rows += 1;
            let Some(TranslatedRow{record, flip}) = row else {
                summary.discarded += 1;
                continue
            };

            summary.matched += 1;
            sink.write_marker(&record).loc(loc_msg)?;
            if flip {
                summary.flipped += 1;
                sink.write_flip(&record.marker_id).loc(loc_msg)?;
            }
        }
        spinner.inc(batch_len as u64);
        debug!("Translated {} rows ({} matched)", summary.rows, summary.matched);
    }
    spinner.finish_and_clear();
    sink.finish().loc(loc_msg)?;

    if summary.matched == 0 {
        warn!("None of the {} genotype rows were found within the manifest.", summary.rows);
    }
    info!("Done translating genotypes:\n{summary}");
    Ok(summary)
}

#[cfg(test)]
mod tests {
    use super::*;
    use ab_io::read::{ManifestReader, MatrixLayout};
    use parser::ColumnMode;
    use pretty_assertions::assert_eq;

    /// In-memory sink.
    #[derive(Debug, Default)]
    struct MemorySink {
        tfam    : Vec<String>,
        tped    : Vec<String>,
        flip    : Vec<String>,
        finished: bool,
    }

    impl PlinkSink for MemorySink {
        fn write_samples(&mut self, samples: &[TfamRecord]) -> Result<()> {
            self.tfam.extend(samples.iter().map(ToString::to_string));
            Ok(())
        }

        fn write_marker(&mut self, record: &TpedRecord) -> Result<()> {
            self.tped.push(record.to_string());
            Ok(())
        }

        fn write_flip(&mut self, marker_id: &str) -> Result<()> {
            self.flip.push(marker_id.to_string());
            Ok(())
        }

        fn finish(&mut self) -> Result<()> {
            self.finished = true;
            Ok(())
        }
    }

    const MANIFEST_HEADER: &str = "IlmnID,Name,IlmnStrand,SNP,AddressA_ID,AlleleA_ProbeSeq,AddressB_ID,AlleleB_ProbeSeq,GenomeBuild,Chr,MapInfo,Ploidy,Species,Source,SourceVersion,SourceStrand,SourceSeq,TopGenomicSeq,BeadSetID,Exp_Clusters,RefStrand";

    fn manifest_entry(name: &str, strand: &str, snp: &str, chr: &str, pos: u32, ref_strand: &str) -> String {
        format!("{name}_T_F,{name},{strand},{snp},1,ACGT,,,37,{chr},{pos},diploid,Homo sapiens,dbSNP,138,{strand},ACGT,ACGT,1,3,{ref_strand}")
    }

    fn index(entries: &[String]) -> Result<MarkerIndex> {
        let contents = std::iter::once(MANIFEST_HEADER.to_string()).chain(entries.iter().cloned()).collect::<Vec<_>>().join("\n");
        let index = MarkerIndex::build(ManifestReader::from_reader(contents.as_bytes(), ColumnMode::Named)?);
        index
    }

    fn export(samples: &[&str], rows: &[(&str, &str, u32, Vec<&str>)]) -> String {
        let mut header = vec!["Name".to_string(), "Chr".to_string(), "Position".to_string()];
        for sample in samples {
            header.extend(["GType", "Score", "Theta", "R", "X", "Y"].iter().map(|field| format!("{sample}.{field}")));
        }

        let mut lines = vec![header.join(",")];
        for (name, chr, pos, calls) in rows {
            let mut fields = vec![name.to_string(), chr.to_string(), pos.to_string()];
            for call in calls {
                fields.extend([call.to_string(), "0.9".into(), "0.5".into(), "1.0".into(), "0.5".into(), "0.5".into()]);
            }
            lines.push(fields.join(","));
        }
        lines.join("\n")
    }

    fn run_transform(index: &MarkerIndex, export: &str, options: TransformOptions) -> Result<(MemorySink, Summary)> {
        let reader  = GenotypeReader::from_reader(export.as_bytes(), ColumnMode::Named, MatrixLayout::default())?;
        let mut sink = MemorySink::default();
        let summary  = transform(reader, index, &mut sink, options)?;
        Ok((sink, summary))
    }

    #[test]
    fn single_marker_end_to_end() -> Result<()> {
        let index  = index(&[manifest_entry("rs1", "TOP", "[A/G]", "1", 1000, "+")])?;
        let export = export(&["200512345"], &[("rs1", "1", 1000, vec!["AB"])]);
        let (sink, summary) = run_transform(&index, &export, TransformOptions::default())?;

        assert_eq!(sink.tfam, vec!["200512345 200512345 0 0 0 -9"]);
        assert_eq!(sink.tped, vec!["1 rs1 0 1000 A G"]);
        assert!(sink.flip.is_empty());
        assert!(sink.finished);
        assert_eq!(summary, Summary{indexed: 1, rows: 1, matched: 1, samples: 1, ..Default::default()});
        Ok(())
    }

    #[test]
    fn tped_keeps_export_coordinates_verbatim() -> Result<()> {
        let index  = index(&[manifest_entry("rs1", "TOP", "[A/G]", "1", 1000, "+")])?;
        let export = "Name,Chr,Position,S1.GType\nrs1,chr1,01000,AB\n";
        let reader = GenotypeReader::from_reader(export.as_bytes(), ColumnMode::Named, MatrixLayout{offset: 3, stride: 1})?;
        let mut sink = MemorySink::default();
        let summary  = transform(reader, &index, &mut sink, TransformOptions::default())?;

        assert_eq!(summary.matched, 1);
        assert_eq!(sink.tped, vec!["chr1 rs1 0 01000 A G"]);
        Ok(())
    }

    #[test]
    fn translate_every_call_kind() -> Result<()> {
        let index  = index(&[manifest_entry("rs1", "TOP", "[A/G]", "1", 1000, "+")])?;
        let export = export(&["S1", "S2", "S3", "S4", "S5"], &[("rs1", "1", 1000, vec!["AB", "AA", "BB", "NC", "BA"])]);
        let (sink, _) = run_transform(&index, &export, TransformOptions::default())?;
        assert_eq!(sink.tped, vec!["1 rs1 0 1000 A G A A G G 0 0 G A"]);
        Ok(())
    }

    #[test]
    fn unindexed_rows_are_discarded() -> Result<()> {
        let index  = index(&[manifest_entry("rs1", "TOP", "[A/G]", "1", 1000, "+")])?;
        let export = export(&["S1"], &[
            ("rs2", "1", 1000, vec!["AB"]), // Marker id mismatch
            ("rs1", "2", 1000, vec!["AB"]), // Chromosome mismatch
            ("rs1", "1", 1001, vec!["AB"]), // Position mismatch
        ]);
        let (sink, summary) = run_transform(&index, &export, TransformOptions::default())?;
        assert!(sink.tped.is_empty());
        assert_eq!(sink.tfam.len(), 1);
        assert_eq!((summary.rows, summary.matched, summary.discarded), (3, 0, 3));
        Ok(())
    }

    #[test]
    fn empty_index_discards_everything() -> Result<()> {
        let index  = MarkerIndex::default();
        let export = export(&["S1"], &[("rs1", "1", 1000, vec!["AB"]), ("rs2", "1", 2000, vec!["NC"])]);
        let (sink, summary) = run_transform(&index, &export, TransformOptions::default())?;
        assert!(sink.tped.is_empty());
        assert_eq!(summary.discarded, summary.rows);
        assert_eq!(summary.rows, 2);
        Ok(())
    }

    #[test]
    fn minus_strand_markers_are_flipped() -> Result<()> {
        let index = index(&[
            manifest_entry("rs1", "TOP", "[A/G]", "1", 1000, "-"),
            manifest_entry("rs2", "BOT", "[A/T]", "1", 2000, "+"),
            manifest_entry("rs3", "BOT", "[G/C]", "chr2", 3000, "-"),
        ])?;
        let export = export(&["S1"], &[
            ("rs3", "2", 3000, vec!["AB"]),
            ("rs2", "1", 2000, vec!["AB"]),
            ("rs1", "1", 1000, vec!["AA"]),
        ]);
        let (sink, summary) = run_transform(&index, &export, TransformOptions::default())?;
        assert_eq!(sink.tped, vec!["2 rs3 0 3000 G C", "1 rs2 0 2000 T A", "1 rs1 0 1000 A A"]);
        assert_eq!(sink.flip, vec!["rs3", "rs1"]);
        assert_eq!(summary.flipped, 2);
        Ok(())
    }

    #[test]
    fn invalid_call_is_fatal() -> Result<()> {
        let index = index(&[manifest_entry("rs1", "TOP", "[A/G]", "1", 1000, "+")])?;
        for call in ["AX", "A", "ABB", "--"] {
            let export = export(&["S1"], &[("rs1", "1", 1000, vec![call])]);
            assert!(run_transform(&index, &export, TransformOptions::default()).is_err(), "{call}");
        }
        Ok(())
    }

    #[test]
    fn invalid_call_of_unindexed_marker_is_ignored() -> Result<()> {
        let index  = MarkerIndex::default();
        let export = export(&["S1"], &[("rs1", "1", 1000, vec!["??"])]);
        let (_, summary) = run_transform(&index, &export, TransformOptions::default())?;
        assert_eq!(summary.discarded, 1);
        Ok(())
    }

    #[test]
    fn parallel_matches_sequential() -> Result<()> {
        let descriptors = [("TOP", "[A/G]"), ("BOT", "[T/C]"), ("TOP", "[A/T]"), ("BOT", "[G/C]"), ("TOP", "[A/C]"), ("BOT", "[T/G]")];
        let entries = (0..300_u32)
            .map(|i| {
                let (strand, snp) = descriptors[i as usize % descriptors.len()];
                let ref_strand = if i % 3 == 0 {"-"} else {"+"};
                manifest_entry(&format!("rs{i}"), strand, snp, "1", 1000 + i, ref_strand)
            })
            .collect::<Vec<_>>();
        let index = index(&entries)?;

        let calls = ["AA", "AB", "BB", "NC", "BA"];
        let names = (0..400_u32).map(|i| format!("rs{i}")).collect::<Vec<_>>();
        let rows = names.iter()
            .zip(0..400_u32)
            .map(|(name, i)| {
                let sample_calls = (0..4).map(|s| calls[(i as usize + s) % calls.len()]).collect::<Vec<_>>();
                (name.as_str(), "1", 1000 + i, sample_calls)
            })
            .collect::<Vec<_>>();
        let export = export(&["S1", "S2", "S3", "S4"], &rows);

        let (sequential, seq_summary) = run_transform(&index, &export, TransformOptions{threads: 1, batch_size: 4096})?;
        let (parallel,   par_summary) = run_transform(&index, &export, TransformOptions{threads: 4, batch_size: 7})?;

        assert_eq!(sequential.tped, parallel.tped);
        assert_eq!(sequential.flip, parallel.flip);
        assert_eq!(seq_summary, par_summary);
        assert_eq!((seq_summary.matched, seq_summary.discarded), (300, 100));
        assert_eq!(seq_summary.flipped, 100);
        Ok(())
    }

    #[test]
    fn zero_batch_size() -> Result<()> {
        let export = export(&["S1"], &[("rs1", "1", 1000, vec!["AB"])]);
        let result = run_transform(&MarkerIndex::default(), &export, TransformOptions{threads: 1, batch_size: 0});
        assert!(result.is_err_and(|e| matches!(e.downcast_ref::<MatrixError>(), Some(MatrixError::ZeroBatchSize))));
        Ok(())
    }

    #[test]
    fn summary_display() {
        let summary = Summary{indexed: 10, rows: 4, matched: 3, discarded: 1, ..Default::default()};
        let display = summary.to_string();
        assert!(display.contains("Markers indexed     :         10"));
        assert!(display.contains("  - discarded       :          1"));
    }
}
