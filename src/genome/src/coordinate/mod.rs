use std::fmt::{self, Display, Formatter};

pub mod chromosome;
pub use chromosome::{Chromosome, ParseChromosomeError};

pub mod position;
pub use position::{Position, ParsePositionError};

/// Composite identity of a genotyped marker: the join key between an Illumina manifest and a
/// GenomeStudio genotype export.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct MarkerKey {
    pub chromosome: Chromosome,
    pub position  : Position,
    pub marker_id : String,
}

impl MarkerKey {
    #[must_use]
    pub fn new(chromosome: Chromosome, position: impl Into<Position>, marker_id: impl Into<String>) -> Self {
        Self{chromosome, position: position.into(), marker_id: marker_id.into()}
    }
}

impl Display for MarkerKey {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "[{: <2} {: >9}] {}", self.chromosome, self.position, self.marker_id)
    }
}
