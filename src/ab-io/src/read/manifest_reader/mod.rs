use std::{fs::File, io::{BufRead, BufReader, Cursor, Read}, path::Path};

use csv::{StringRecord, StringRecordsIntoIter};
use genome::{coordinate::{Chromosome, Position}, IlluminaStrand, MarkerKey, RefStrand, SnpDescriptor};
use located_error::prelude::*;
use log::debug;
use parser::ColumnMode;

use super::{ColumnSpec, csv_reader};

mod error;
pub use error::ManifestReaderError;

/// Some exports are saved with a leading UTF-8 byte order mark.
const BYTE_ORDER_MARK: char = '\u{feff}';
/// Leading banner of raw Illumina manifests.
const ILLUMINA_BANNER : &str = "Illumina, Inc.";
/// Opens the descriptor section of a raw Illumina manifest, preceding the assay table.
const HEADING_SECTION : &str = "[Heading]";
/// Marks the start of the assay table within a raw Illumina manifest.
const ASSAY_SECTION   : &str = "[Assay]";
/// Marks the end of the assay table within a raw Illumina manifest.
const CONTROLS_SECTION: &str = "[Controls]";

const NAME      : ColumnSpec = ColumnSpec::new("Name",       &[],                1);
const ILMN_STRAND: ColumnSpec = ColumnSpec::new("IlmnStrand", &["Ilmn Strand"],   2);
const SNP       : ColumnSpec = ColumnSpec::new("SNP",        &[],                3);
const CHR       : ColumnSpec = ColumnSpec::new("Chr",        &["Chromosome"],    9);
const MAP_INFO  : ColumnSpec = ColumnSpec::new("MapInfo",    &["Position"],      10);
const REF_STRAND: ColumnSpec = ColumnSpec::new("RefStrand",  &["Ref Strand"],    20);

/// Column indices of the fields consumed within an Illumina manifest.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
struct ManifestSchema {
    marker_id      : usize,
    illumina_strand: usize,
    descriptor     : usize,
    chromosome     : usize,
    position       : usize,
    ref_strand     : usize,
}

impl ManifestSchema {
    fn from_header(header: &StringRecord, mode: ColumnMode) -> Result<Self> {
        let loc_msg = "While resolving manifest columns";
        Ok(Self {
            marker_id      : NAME.locate(header, mode).loc(loc_msg)?,
            illumina_strand: ILMN_STRAND.locate(header, mode).loc(loc_msg)?,
            descriptor     : SNP.locate(header, mode).loc(loc_msg)?,
            chromosome     : CHR.locate(header, mode).loc(loc_msg)?,
            position       : MAP_INFO.locate(header, mode).loc(loc_msg)?,
            ref_strand     : REF_STRAND.locate(header, mode).loc(loc_msg)?,
        })
    }
}

/// A single parsed assay entry of an Illumina manifest.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ManifestRow {
    Snp {
        line           : u64,
        key            : MarkerKey,
        descriptor     : SnpDescriptor,
        illumina_strand: IlluminaStrand,
        ref_strand     : RefStrand,
    },
    /// Insertion/deletion assays. Strand fields are left unparsed, since Illumina reports
    /// these with a different vocabulary (`PLUS`/`MINUS`).
    Indel {
        line      : u64,
        key       : MarkerKey,
        descriptor: SnpDescriptor,
    },
}

/// Streaming reader of Illumina manifest files (e.g. `HumanOmniExpressExome-8-v1-1-C.csv`).
///
/// Accepts both raw manifests (`[Heading]`, `[Assay]` and `[Controls]` sections) and plain
/// comma-separated assay tables with a single header line. Columns are either looked up by name
/// (`Name`, `IlmnStrand`, `SNP`, `Chr`, `MapInfo`, `RefStrand`), or expected at their usual
/// 0-based positions (1, 2, 3, 9, 10, 20)
///
/// # Traits : `Iterator<Item = Result<ManifestRow>>`
pub struct ManifestReader<'a> {
    records    : StringRecordsIntoIter<Box<dyn Read + 'a>>,
    schema     : ManifestSchema,
    width      : usize,
    line_offset: u64,
    done       : bool,
}

impl<'a> ManifestReader<'a> {
    /// Open a manifest file.
    ///
    /// # Errors
    /// - if `path` targets an invalid location (`FileNotFound` or `PermissionDenied`)
    /// - if the header of the file does not provide the required columns.
    pub fn new(path: &Path, mode: ColumnMode) -> Result<ManifestReader<'a>> {
        use ManifestReaderError::OpenFile;
        let file = File::open(path)
            .map_err(|e| OpenFile(path.display().to_string(), e))
            .loc("While attempting to create a new ManifestReader")?;
        Self::from_reader(BufReader::new(file), mode)
    }

    /// Instantiate a `ManifestReader` from any buffered source.
    ///
    /// # Errors
    /// - if the source starts with a manifest preamble lacking a subsequent `[Assay]` section.
    /// - if the header line cannot be read, or does not provide the required columns.
    pub fn from_reader<R: BufRead + 'a>(mut source: R, mode: ColumnMode) -> Result<ManifestReader<'a>> {
        use ManifestReaderError::{Io, MissingAssaySection, Header};
        let loc_msg = "While reading manifest header";

        let mut line = String::new();
        source.read_line(&mut line).map_err(Io).loc(loc_msg)?;
        if line.starts_with(BYTE_ORDER_MARK) {
            line.remove(0);
        }
        let first_line = line.trim_start();
        let has_preamble = first_line.starts_with(ILLUMINA_BANNER) || first_line.starts_with(HEADING_SECTION);
        let (source, line_offset): (Box<dyn Read + 'a>, u64) = match has_preamble {
            true => {
                // Skip the banner and [Heading] section, along with the [Assay] marker line.
                let mut skipped = 1;
                loop {
                    skipped += 1;
                    line.clear();
                    if source.read_line(&mut line).map_err(Io).loc(loc_msg)? == 0 {
                        return Err(MissingAssaySection).loc(loc_msg)
                    }
                    if line.trim_start().starts_with(ASSAY_SECTION) {
                        break
                    }
                }
                debug!("Skipped {skipped} manifest preamble lines.");
                (Box::new(source), skipped)
            },
            false => (Box::new(Cursor::new(line).chain(source)), 0),
        };

        let mut reader = csv_reader(source);
        let header = reader.headers().map_err(Header).loc(loc_msg)?.clone();
        let schema = ManifestSchema::from_header(&header, mode).loc(loc_msg)?;
        debug!("Manifest columns: {schema:?}");

        Ok(Self{records: reader.into_records(), schema, width: header.len(), line_offset, done: false})
    }

    fn parse_record(&self, record: &StringRecord) -> Result<ManifestRow> {
        use ManifestReaderError::MalformedRow;
        let line = record.position().map_or(0, |pos| pos.line()) + self.line_offset;
        if record.len() != self.width {
            return Err(MalformedRow{line, expected: self.width, found: record.len()})
                .loc("While parsing manifest")
        }

        // Width was validated above.
        let field = |idx: usize| record.get(idx).unwrap_or_default();
        let marker_id = field(self.schema.marker_id);
        let context = || format!("While parsing manifest entry '{marker_id}' (line {line})");

        let chromosome: Chromosome    = field(self.schema.chromosome).parse().with_loc(context)?;
        let position  : Position      = field(self.schema.position).parse().with_loc(context)?;
        let descriptor: SnpDescriptor = field(self.schema.descriptor).parse().with_loc(context)?;
        let key = MarkerKey::new(chromosome, position, marker_id);

        if descriptor.is_indel() {
            return Ok(ManifestRow::Indel{line, key, descriptor})
        }

        let illumina_strand: IlluminaStrand = field(self.schema.illumina_strand).parse().with_loc(context)?;
        let ref_strand     : RefStrand      = field(self.schema.ref_strand).parse().with_loc(context)?;
        Ok(ManifestRow::Snp{line, key, descriptor, illumina_strand, ref_strand})
    }
}

impl<'a> Iterator for ManifestReader<'a> {
    type Item = Result<ManifestRow>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None
        }

        let record = match self.records.next()? {
            Ok(record) => record,
            Err(e) => {
                self.done = true;
                return Some(Err(ManifestReaderError::Record(e)).loc("While reading manifest"))
            }
        };

        if record.get(0).is_some_and(|field| field.starts_with(CONTROLS_SECTION)) {
            self.done = true;
            return None
        }

        let row = self.parse_record(&record);
        self.done = row.is_err();
        Some(row)
    }
}
