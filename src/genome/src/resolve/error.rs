use thiserror::Error;

use crate::{IlluminaStrand, SnpDescriptor};

#[derive(Error, Debug, PartialEq, Eq)]
pub enum ResolveError {
    #[error("SNP descriptor {descriptor} can only be reported on the {expected} strand, but was flagged as {found}")]
    StrandMismatch{descriptor: SnpDescriptor, expected: IlluminaStrand, found: IlluminaStrand},

    #[error("Cannot resolve insertion/deletion descriptor {0} into A/B nucleotides")]
    Indel(SnpDescriptor),
}
