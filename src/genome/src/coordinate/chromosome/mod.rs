use std::{fmt::{self, Display, Formatter}, str::FromStr};
mod error;
pub use error::ParseChromosomeError;

/// Chromosome name, as found in Illumina manifests and GenomeStudio exports (`1`..`22`, `X`,
/// `Y`, `XY`, `MT`, `0` for unmapped markers). Any leading `chr` prefix is stripped.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Chromosome(String);

impl Chromosome {
    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl FromStr for Chromosome {
    type Err = ParseChromosomeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let trimmed = s.trim();
        let name = match trimmed.get(..3) {
            Some(prefix) if prefix.eq_ignore_ascii_case("chr") => &trimmed[3..],
            _                                                  => trimmed,
        };

        if name.is_empty() || name.contains(char::is_whitespace) {
            return Err(ParseChromosomeError(s.to_string()))
        }
        Ok(Self(name.to_string()))
    }
}

impl Display for Chromosome {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(&self.0)
    }
}
