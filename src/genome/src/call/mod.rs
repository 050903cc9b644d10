mod error;
use std::{fmt::{self, Display, Formatter}, str::FromStr};

pub use error::CallError;

use crate::{Nucleotide, AllelePair};

/// Raw genotype token GenomeStudio emits for a no-call.
pub const MISSING_CALL: &str = "NC";

/// PLINK missing allele code.
pub const MISSING_ALLELE: char = '0';

/// One letter of an Illumina 'AB' genotype call.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum AbAllele { A, B }

impl TryFrom<char> for AbAllele {
    type Error = CallError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        match value {
            'A' => Ok(Self::A),
            'B' => Ok(Self::B),
             _  => Err(CallError::UnknownAllele(value)),
        }
    }
}

/// A single (marker, sample) cell of a GenomeStudio genotype export.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GenotypeCall {
    Missing,
    Called(AbAllele, AbAllele),
}

impl FromStr for GenotypeCall {
    type Err = CallError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s == MISSING_CALL {
            return Ok(Self::Missing)
        }

        let mut chars = s.chars();
        match (chars.next(), chars.next(), chars.next()) {
            (Some(first), Some(second), None) => Ok(Self::Called(first.try_into()?, second.try_into()?)),
            _ => Err(CallError::InvalidLength(s.to_string()))
        }
    }
}

impl GenotypeCall {
    /// Translate both letters of this call into nucleotides. Each letter is looked up
    /// independently, so `BA` yields (B, A) and not (A, B).
    #[must_use]
    pub fn translate(&self, alleles: &AllelePair) -> TranslatedCall {
        match self {
            Self::Missing                => TranslatedCall::Missing,
            Self::Called(first, second)  => TranslatedCall::Called(alleles.get(*first), alleles.get(*second)),
        }
    }
}

/// A genotype expressed in nucleotides. Displayed as two space-separated PLINK allele codes,
/// i.e. `A G`, or `0 0` when missing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TranslatedCall {
    Missing,
    Called(Nucleotide, Nucleotide),
}

impl Display for TranslatedCall {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Missing                => write!(f, "{MISSING_ALLELE} {MISSING_ALLELE}"),
            Self::Called(first, second)  => write!(f, "{first} {second}"),
        }
    }
}
