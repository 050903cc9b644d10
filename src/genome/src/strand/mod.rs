mod error;
use std::{fmt::{self, Formatter, Display}, str::FromStr};

pub use error::ParseStrandError;

/// Illumina strand designation (`IlmnStrand` manifest column), under which the SNP descriptor
/// was written.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum IlluminaStrand {
    Top,
    Bot,
}

impl FromStr for IlluminaStrand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_uppercase().as_str() {
            "TOP" => Ok(Self::Top),
            "BOT" => Ok(Self::Bot),
            _     => Err(ParseStrandError::Illumina(s.to_string())),
        }
    }
}

impl Display for IlluminaStrand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Top => "TOP",
            Self::Bot => "BOT",
        })
    }
}

/// Orientation of the assay probe against the reference genome (`RefStrand` manifest column).
/// Markers on the `Minus` strand must be flipped downstream.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RefStrand {
    Plus,
    Minus,
}

impl RefStrand {
    #[must_use]
    pub fn requires_flip(&self) -> bool {
        matches!(self, Self::Minus)
    }
}

impl FromStr for RefStrand {
    type Err = ParseStrandError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "+" => Ok(Self::Plus),
            "-" => Ok(Self::Minus),
            _   => Err(ParseStrandError::Reference(s.to_string())),
        }
    }
}

impl Display for RefStrand {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.pad(match self {
            Self::Plus  => "+",
            Self::Minus => "-",
        })
    }
}
