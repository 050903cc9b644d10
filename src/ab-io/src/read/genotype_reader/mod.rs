use std::{fs::File, io::{BufReader, Read}, path::Path};

use csv::{StringRecord, StringRecordsIntoIter};
use genome::{coordinate::{Chromosome, Position}, MarkerKey};
use located_error::prelude::*;
use log::{debug, info};
use parser::ColumnMode;

use super::{ColumnSpec, SampleRecord, csv_reader};

mod error;
pub use error::GenotypeReaderError;

const NAME    : ColumnSpec = ColumnSpec::new("Name",     &["SNP Name"], 0);
const CHR     : ColumnSpec = ColumnSpec::new("Chr",      &[],           1);
const POSITION: ColumnSpec = ColumnSpec::new("Position", &["MapInfo"],  2);

/// Location of per-sample genotype call columns within a GenomeStudio export.
/// # Fields
/// - `offset`: 0-based index of the first sample column.
/// - `stride`: number of columns between two consecutive samples.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MatrixLayout {
    pub offset: usize,
    pub stride: usize,
}

impl Default for MatrixLayout {
    /// GenomeStudio "Full Data Table" exports: `GType`, `Score`, `Theta`, `R`, `X`, `Y` per sample.
    fn default() -> Self {
        Self{offset: 3, stride: 6}
    }
}

/// A single row of a genotype export, holding the raw AB calls of every sample, in header order.
/// # Fields
/// - `key`       : normalized marker key, used for manifest lookups.
/// - `chromosome`: `Chr` field, as written in the export.
/// - `position`  : `Position` field, as written in the export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenotypeRow {
    pub line      : u64,
    pub key       : MarkerKey,
    pub chromosome: String,
    pub position  : String,
    pub calls     : Vec<String>,
}

/// Streaming reader of GenomeStudio genotype exports.
///
/// The header is consumed upon construction, and yields the list of genotyped samples.
///
/// # Traits : `Iterator<Item = Result<GenotypeRow>>`
pub struct GenotypeReader<'a> {
    records   : StringRecordsIntoIter<Box<dyn Read + 'a>>,
    samples   : Vec<SampleRecord>,
    key_fields: [usize; 3],
    width     : usize,
    done      : bool,
}

impl<'a> GenotypeReader<'a> {
    /// Open a genotype export file.
    ///
    /// # Errors
    /// - if `path` targets an invalid location (`FileNotFound` or `PermissionDenied`)
    /// - if the header is invalid (see [`GenotypeReader::from_reader`])
    pub fn new(path: &Path, mode: ColumnMode, layout: MatrixLayout) -> Result<GenotypeReader<'a>> {
        use GenotypeReaderError::OpenFile;
        let file = File::open(path)
            .map_err(|e| OpenFile(path.display().to_string(), e))
            .loc("While attempting to create a new GenotypeReader")?;
        Self::from_reader(BufReader::new(file), mode, layout)
    }

    /// Instantiate a `GenotypeReader` from any source.
    ///
    /// # Errors
    /// - if `layout.stride` is zero.
    /// - if the header cannot be read, lacks the marker key columns, or contains no sample column.
    pub fn from_reader<R: Read + 'a>(source: R, mode: ColumnMode, layout: MatrixLayout) -> Result<GenotypeReader<'a>> {
        use GenotypeReaderError::{Header, ZeroStride, NoSamples};
        let loc_msg = "While reading genotype file header";
        if layout.stride == 0 {
            return Err(ZeroStride).loc(loc_msg)
        }

        let mut reader = csv_reader(Box::new(source) as Box<dyn Read + 'a>);
        let header = reader.headers().map_err(Header).loc(loc_msg)?.clone();

        let key_fields = [
            NAME.locate(&header, mode).loc(loc_msg)?,
            CHR.locate(&header, mode).loc(loc_msg)?,
            POSITION.locate(&header, mode).loc(loc_msg)?,
        ];

        let samples = Self::parse_samples(&header, layout);
        if samples.is_empty() {
            return Err(NoSamples{offset: layout.offset, width: header.len()}).loc(loc_msg)
        }
        info!("Found {} samples within genotype file.", samples.len());
        debug!("Samples: {}", samples.iter().map(SampleRecord::id).collect::<Vec<_>>().join(" "));

        Ok(Self{records: reader.into_records(), samples, key_fields, width: header.len(), done: false})
    }

    fn parse_samples(header: &StringRecord, layout: MatrixLayout) -> Vec<SampleRecord> {
        header.iter()
            .enumerate()
            .skip(layout.offset)
            .step_by(layout.stride)
            .map(|(column, label)| SampleRecord::from_label(label, column))
            .collect()
    }

    /// Samples found within the header, in column order.
    #[must_use]
    pub fn samples(&self) -> &[SampleRecord] {
        &self.samples
    }

    fn parse_record(&self, record: &StringRecord) -> Result<GenotypeRow> {
        use GenotypeReaderError::MalformedRow;
        let line = record.position().map_or(0, |pos| pos.line());
        if record.len() != self.width {
            return Err(MalformedRow{line, expected: self.width, found: record.len()})
                .loc("While parsing genotype file")
        }

        // Width was validated above.
        let field = |idx: usize| record.get(idx).unwrap_or_default();
        let [name, chr, pos] = self.key_fields;
        let marker_id = field(name);
        let context = || format!("While parsing genotypes of marker '{marker_id}' (line {line})");

        let (raw_chr, raw_pos) = (field(chr), field(pos));
        let chromosome: Chromosome = raw_chr.parse().with_loc(context)?;
        let position  : Position   = raw_pos.parse().with_loc(context)?;
        let calls = self.samples.iter()
            .map(|sample| field(sample.column()).to_string())
            .collect();

        Ok(GenotypeRow{
            line,
            key       : MarkerKey::new(chromosome, position, marker_id),
            chromosome: raw_chr.to_string(),
            position  : raw_pos.to_string(),
            calls
        })
    }
}

impl<'a> Iterator for GenotypeReader<'a> {
    type Item = Result<GenotypeRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None
        }

        let row = match self.records.next()? {
            Ok(record) => self.parse_record(&record),
            Err(e)     => Err(GenotypeReaderError::Record(e)).loc("While reading genotype file"),
        };
        self.done = row.is_err();
        Some(row)
    }
}
