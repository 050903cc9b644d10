//! `anyhow` context helpers that prefix every message with the `[file:line:column]` of the
//! caller, so that error chains printed by the binary point straight at the failing call site.

use std::{fmt::Display, panic::Location};

use anyhow::{Context, Result};

pub mod prelude {
    pub use anyhow::{anyhow, bail, Context, Result};
    pub use thiserror::Error;

    pub use super::{LocatedError, LocatedOption};
}

fn locate(caller: &Location<'_>, context: impl Display) -> String {
    format!("[{}:{}:{}] {context}", caller.file(), caller.line(), caller.column())
}

pub trait LocatedError<T, E> {
    /// Wrap the error value with additional context + the location at which it was called.
    fn loc<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Same as `loc()`, but `f` is only evaluated once an error does occur.
    fn with_loc<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T, E> LocatedError<T, E> for Result<T, E>
where
    E: Display + Send + Sync + 'static,
    Result<T, E>: Context<T, E>,
{
    #[track_caller]
    fn loc<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static
    {
        let caller = Location::caller();
        self.with_context(|| locate(caller, context))
    }

    #[track_caller]
    fn with_loc<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C
    {
        let caller = Location::caller();
        self.with_context(|| locate(caller, f()))
    }
}

pub trait LocatedOption<T> {
    /// Convert `None` into an error carrying `context` + the location at which it was called.
    fn loc<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static;

    /// Same as `loc()`, but `f` is only evaluated when `self` is `None`.
    fn with_loc<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C;
}

impl<T> LocatedOption<T> for Option<T> {
    #[track_caller]
    fn loc<C>(self, context: C) -> Result<T>
    where
        C: Display + Send + Sync + 'static
    {
        let caller = Location::caller();
        self.with_context(|| locate(caller, context))
    }

    #[track_caller]
    fn with_loc<C, F>(self, f: F) -> Result<T>
    where
        C: Display + Send + Sync + 'static,
        F: FnOnce() -> C
    {
        let caller = Location::caller();
        self.with_context(|| locate(caller, f()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use thiserror::Error;

    #[derive(Error, Debug)]
    pub enum ManifestError {
        #[error(transparent)]
        Inner(#[from] anyhow::Error),

        #[error("Unknown strand")]
        UnknownStrand,
    }

    fn parse_position(field: &str) -> Result<u32, ManifestError> {
        let position = field.parse::<u32>().loc(format!("Invalid position: '{field}'"))?;
        Ok(position)
    }

    fn parse_row() -> Result<u32> {
        parse_position("10O0").with_loc(|| "While parsing manifest row")
    }

    fn parse_manifest() -> Result<u32> {
        parse_row().with_loc(|| ManifestError::UnknownStrand)
    }

    #[test]
    fn error_chain_carries_locations() {
        let err = parse_manifest().expect_err("position should not parse");
        let messages: Vec<String> = err.chain().map(ToString::to_string).collect();

        assert!(messages[0].ends_with("Unknown strand"));
        assert!(messages[1].ends_with("While parsing manifest row"));
        assert!(messages[2].ends_with("Invalid position: '10O0'"));
        for message in &messages[0..3] {
            assert!(message.starts_with(&format!("[{}:", file!())), "{message}");
        }
    }

    #[test]
    fn ok_values_pass_through() -> Result<()> {
        assert_eq!("1000".parse::<u32>().loc("unreachable")?, 1000);
        assert_eq!(Some('A').with_loc(|| "unreachable")?, 'A');
        Ok(())
    }

    #[test]
    fn missing_option() {
        let err = None::<char>.loc("Missing column 'RefStrand'").expect_err("should fail");
        assert!(err.to_string().contains(&format!("{}:", file!())));
        assert!(err.to_string().ends_with("Missing column 'RefStrand'"));
    }
}
