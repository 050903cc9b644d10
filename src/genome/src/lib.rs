//! Genomic primitives and Illumina TOP/BOT allele resolution.
//!
//! The resolver maps an Illumina manifest SNP descriptor (e.g. `[A/G]`) and its `IlmnStrand` to the
//! explicit nucleotides carried by the 'A' and 'B' alleles of a genotyping assay. See Illumina's
//! technical note "TOP/BOT" strand and "A/B" allele designations for the underlying convention.

pub mod coordinate;
pub use coordinate::MarkerKey;

pub mod nucleotide;
pub use nucleotide::{Nucleotide, ParseNucleotideError};

pub mod strand;
pub use strand::{IlluminaStrand, RefStrand, ParseStrandError};

pub mod descriptor;
pub use descriptor::{SnpDescriptor, ParseDescriptorError};

pub mod resolve;
pub use resolve::{resolve, AllelePair, ResolveError};

pub mod call;
pub use call::{AbAllele, GenotypeCall, TranslatedCall, CallError};
