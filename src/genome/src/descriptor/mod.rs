mod error;
use std::{fmt::{self, Display, Formatter}, str::FromStr};

pub use error::ParseDescriptorError;

use crate::{Nucleotide, IlluminaStrand};

/// Biallelic pairs accepted within the `SNP` column of an Illumina manifest. Illumina writes
/// TOP-strand SNPs with an 'A' first and BOT-strand SNPs with a 'T' first. Reversed spellings
/// are tolerated for the pairs the manifest may emit either way.
const SNP_VOCABULARY: [(Nucleotide, Nucleotide); 11] = {
    use Nucleotide::*;
    [
        (A, G), (G, A),
        (A, C), (C, A),
        (T, G), (G, T),
        (T, C),
        (A, T), (T, A),
        (G, C), (C, G),
    ]
};

/// Raw allele-pair token of a manifest entry, e.g. `[A/G]`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SnpDescriptor {
    /// Single nucleotide polymorphism, in the order it was written.
    Snp(Nucleotide, Nucleotide),
    /// `[D/I]`
    DelIns,
    /// `[I/D]`
    InsDel,
}

impl SnpDescriptor {
    /// Insertion/deletion markers are not handled and must be filtered out before resolution.
    #[must_use]
    pub fn is_indel(&self) -> bool {
        matches!(self, Self::DelIns | Self::InsDel)
    }

    /// Whether the two alleles are complementary (A/T or C/G), in which case the letters alone
    /// do not tell which strand the descriptor was written on.
    #[must_use]
    pub fn is_strand_ambiguous(&self) -> bool {
        match self {
            Self::Snp(first, second) => first.pairs_with(second),
            _                        => false,
        }
    }

    /// Strand on which an unambiguous pair must have been reported. `None` for ambiguous pairs
    /// and indels.
    #[must_use]
    pub fn implied_strand(&self) -> Option<IlluminaStrand> {
        use Nucleotide::*;
        match self {
            Self::Snp(first, second) if !first.pairs_with(second) => {
                match (first, second) {
                    (A, _) | (_, A) => Some(IlluminaStrand::Top),
                    _               => Some(IlluminaStrand::Bot),
                }
            },
            _ => None,
        }
    }
}

impl FromStr for SnpDescriptor {
    type Err = ParseDescriptorError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        use ParseDescriptorError::{Format, UnknownPair};
        let inner = s.trim()
            .strip_prefix('[')
            .and_then(|s| s.strip_suffix(']'))
            .ok_or_else(|| Format(s.to_string()))?;

        let (first, second) = inner.split_once('/').ok_or_else(|| Format(s.to_string()))?;
        match (first, second) {
            ("D", "I") => return Ok(Self::DelIns),
            ("I", "D") => return Ok(Self::InsDel),
            _          => (),
        }

        let pair = (
            first.parse::<Nucleotide>().map_err(|_| UnknownPair(s.to_string()))?,
            second.parse::<Nucleotide>().map_err(|_| UnknownPair(s.to_string()))?,
        );
        match SNP_VOCABULARY.contains(&pair) {
            true  => Ok(Self::Snp(pair.0, pair.1)),
            false => Err(UnknownPair(s.to_string())),
        }
    }
}

impl Display for SnpDescriptor {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Self::Snp(first, second) => write!(f, "[{first}/{second}]"),
            Self::DelIns             => write!(f, "[D/I]"),
            Self::InsDel             => write!(f, "[I/D]"),
        }
    }
}
