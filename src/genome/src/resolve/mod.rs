mod error;
use std::fmt::{self, Display, Formatter};

pub use error::ResolveError;

use crate::{Nucleotide, IlluminaStrand, SnpDescriptor, AbAllele};

/// Explicit nucleotides behind the 'A' and 'B' alleles of a marker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct AllelePair {
    pub a: Nucleotide,
    pub b: Nucleotide,
}

impl AllelePair {
    #[must_use]
    pub fn new(a: Nucleotide, b: Nucleotide) -> Self {
        Self{a, b}
    }

    /// Nucleotide carried by a single A/B allele.
    #[must_use]
    pub fn get(&self, allele: AbAllele) -> Nucleotide {
        match allele {
            AbAllele::A => self.a,
            AbAllele::B => self.b,
        }
    }
}

impl From<AllelePair> for (Nucleotide, Nucleotide) {
    fn from(pair: AllelePair) -> Self {
        (pair.a, pair.b)
    }
}

impl Display for AllelePair {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "A={} B={}", self.a, self.b)
    }
}

/// Resolve the 'A' and 'B' alleles of a SNP, given its manifest descriptor and Illumina strand.
///
/// # Behavior
/// - Unambiguous pairs (A/G, A/C on TOP ; T/G, T/C on BOT) are oriented by their letters. The
///   provided `strand` must agree with that orientation:
///   - `[A/G]`, `[G/A]` => (A, G)
///   - `[A/C]`, `[C/A]` => (A, C)
///   - `[T/G]`, `[G/T]` => (T, G)
///   - `[T/C]`          => (T, C)
/// - Ambiguous pairs are oriented by `strand`:
///   - `[A/T]`, `[T/A]` => TOP: (A, T) | BOT: (T, A)
///   - `[G/C]`, `[C/G]` => TOP: (C, G) | BOT: (G, C)
///
/// # Errors
/// - `ResolveError::StrandMismatch` if an unambiguous pair is flagged on the wrong strand. This
///   points to a corrupted or mismatched manifest.
/// - `ResolveError::Indel` if `descriptor` is an insertion/deletion token.
pub fn resolve(descriptor: &SnpDescriptor, strand: IlluminaStrand) -> Result<AllelePair, ResolveError> {
    use Nucleotide::*;
    use IlluminaStrand::{Top, Bot};

    let SnpDescriptor::Snp(first, second) = *descriptor else {
        return Err(ResolveError::Indel(*descriptor))
    };

    if descriptor.is_strand_ambiguous() {
        let (a, b) = match (first, strand) {
            (A | T, Top) => (A, T),
            (A | T, Bot) => (T, A),
            (_    , Top) => (C, G),
            (_    , Bot) => (G, C),
        };
        return Ok(AllelePair::new(a, b))
    }

    if let Some(expected) = descriptor.implied_strand() {
        if expected != strand {
            return Err(ResolveError::StrandMismatch{descriptor: *descriptor, expected, found: strand})
        }
    }

    let (a, b) = match (first, second) {
        (A, G) | (G, A) => (A, G),
        (A, C) | (C, A) => (A, C),
        (T, G) | (G, T) => (T, G),
        // Only [T/C] remains within the accepted vocabulary.
        _               => (T, C),
    };
    Ok(AllelePair::new(a, b))
}
