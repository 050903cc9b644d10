use std::fmt::{self, Display, Formatter};

use genome::TranslatedCall;
use itertools::Itertools;
use located_error::prelude::*;

use crate::{parse::OutputFiles, read::SampleRecord};
use super::GenericWriter;

/// Pedigree placeholders of every `.tfam` record: founder (no father, no mother), unknown sex,
/// missing phenotype.
const PATERNAL_ID: &str = "0";
const MATERNAL_ID: &str = "0";
const SEX        : &str = "0";
const PHENOTYPE  : &str = "-9";

/// Placeholder genetic distance (centimorgans) of every `.tped` record.
const GENETIC_DISTANCE: &str = "0";

/// A single line of a PLINK transposed pedigree file (`.tfam`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TfamRecord {
    pub family_id    : String,
    pub individual_id: String,
}

impl From<&SampleRecord> for TfamRecord {
    /// Samples are their own family.
    fn from(sample: &SampleRecord) -> Self {
        Self{family_id: sample.id().to_string(), individual_id: sample.id().to_string()}
    }
}

impl Display for TfamRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {PATERNAL_ID} {MATERNAL_ID} {SEX} {PHENOTYPE}", self.family_id, self.individual_id)
    }
}

/// A single line of a PLINK transposed genotype file (`.tped`): one marker, and the translated
/// calls of every sample, in `.tfam` order. Chromosome and position are written verbatim.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TpedRecord {
    pub chromosome: String,
    pub marker_id : String,
    pub position  : String,
    pub calls     : Vec<TranslatedCall>,
}

impl Display for TpedRecord {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        let Self{chromosome, marker_id, position, ..} = self;
        write!(f, "{chromosome} {marker_id} {GENETIC_DISTANCE} {position}")?;
        if !self.calls.is_empty() {
            write!(f, " {}", self.calls.iter().join(" "))?;
        }
        Ok(())
    }
}

/// Receiver of the three output streams of a conversion run.
pub trait PlinkSink {
    /// Record the genotyped samples. Called once, before any marker.
    ///
    /// # Errors
    /// - if the underlying output fails.
    fn write_samples(&mut self, samples: &[TfamRecord]) -> Result<()>;

    /// Record a translated marker.
    ///
    /// # Errors
    /// - if the underlying output fails.
    fn write_marker(&mut self, record: &TpedRecord) -> Result<()>;

    /// Record a marker requiring a strand flip.
    ///
    /// # Errors
    /// - if the underlying output fails.
    fn write_flip(&mut self, marker_id: &str) -> Result<()>;

    /// Flush all pending contents.
    ///
    /// # Errors
    /// - if the underlying output fails.
    fn finish(&mut self) -> Result<()>;
}

/// Writes `.tfam`, `.tped` and flip-list outputs.
pub struct PlinkWriter<'a> {
    tfam: GenericWriter<'a>,
    tped: GenericWriter<'a>,
    flip: GenericWriter<'a>,
}

impl<'a> PlinkWriter<'a> {
    /// Create (or truncate) every file of `outputs`.
    ///
    /// # Errors
    /// - if any of the output files cannot be created.
    pub fn new(outputs: &OutputFiles) -> Result<PlinkWriter<'a>> {
        let loc_msg = "While creating PLINK output files";
        Ok(Self {
            tfam: GenericWriter::new(&outputs.tfam).loc(loc_msg)?,
            tped: GenericWriter::new(&outputs.tped).loc(loc_msg)?,
            flip: GenericWriter::new(&outputs.flip).loc(loc_msg)?,
        })
    }
}

impl PlinkSink for PlinkWriter<'_> {
    fn write_samples(&mut self, samples: &[TfamRecord]) -> Result<()> {
        self.tfam.write_iter(samples).loc("While writing .tfam records")
    }

    fn write_marker(&mut self, record: &TpedRecord) -> Result<()> {
        self.tped.write_line(record).with_loc(|| format!("While writing .tped record of {}", record.marker_id))
    }

    fn write_flip(&mut self, marker_id: &str) -> Result<()> {
        self.flip.write_line(marker_id).loc("While writing flip list")
    }

    fn finish(&mut self) -> Result<()> {
        let loc_msg = "While flushing PLINK outputs";
        self.tfam.flush().loc(loc_msg)?;
        self.tped.flush().loc(loc_msg)?;
        self.flip.flush().loc(loc_msg)
    }
}
