mod error;
use std::{fmt::{self, Display, Formatter}, str::FromStr};

pub use error::ParseNucleotideError;

/// One of the four canonical bases an 'A' or 'B' allele may resolve to.
#[derive(Debug, Hash, PartialEq, Eq, PartialOrd, Ord, Clone, Copy)]
pub enum Nucleotide { A, C, G, T }

impl Nucleotide {
    /// Watson-Crick complement of this base.
    #[must_use]
    pub fn complement(&self) -> Self {
        match self {
            Self::A => Self::T,
            Self::C => Self::G,
            Self::G => Self::C,
            Self::T => Self::A,
        }
    }

    /// Whether `other` is the complement of `self`. Pairs for which this holds (A/T, C/G) cannot
    /// be oriented from their letters alone.
    #[must_use]
    pub fn pairs_with(&self, other: &Self) -> bool {
        self.complement() == *other
    }
}

impl From<&Nucleotide> for char {
    fn from(value: &Nucleotide) -> Self {
        match value {
            Nucleotide::A => 'A',
            Nucleotide::C => 'C',
            Nucleotide::G => 'G',
            Nucleotide::T => 'T',
        }
    }
}

impl TryFrom<char> for Nucleotide {
    type Error = ParseNucleotideError;

    fn try_from(value: char) -> Result<Self, Self::Error> {
        use self::Nucleotide::*;
        match value {
            'A' => Ok(A),
            'C' => Ok(C),
            'G' => Ok(G),
            'T' => Ok(T),
             _  => Err(ParseNucleotideError(value))
        }
    }
}

impl FromStr for Nucleotide {
    type Err = ParseNucleotideError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut chars = s.chars();
        match (chars.next(), chars.next()) {
            (Some(c), None) => Self::try_from(c),
            (Some(c), Some(_)) => Err(ParseNucleotideError(c)),
            (None, _) => Err(ParseNucleotideError(' ')),
        }
    }
}

impl Display for Nucleotide {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        Display::fmt(&char::from(self), f)
    }
}
