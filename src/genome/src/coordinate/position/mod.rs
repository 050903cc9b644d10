use std::{fmt::{self, Display, Formatter}, str::FromStr};
mod error;
pub use error::ParsePositionError;

/// Physical position of a marker. Parsing normalizes the textual representation, so that
/// `"1000"` and `" 01000"` designate the same position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct Position(pub u32);

impl Display for Position {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        self.0.fmt(f)
    }
}

impl FromStr for Position {
    type Err = ParsePositionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.trim().parse::<u32>()
            .map(Self)
            .map_err(|source| ParsePositionError{raw: s.to_string(), source})
    }
}

impl From<u32> for Position {
    fn from(value: u32) -> Self {
        Self(value)
    }
}

impl From<Position> for u32 {
    fn from(value: Position) -> Self {
        value.0
    }
}
