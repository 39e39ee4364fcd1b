//! Error types for instant parsing and construction.

use std::error::Error;
use std::fmt::{Display, Formatter};

/// Errors from parsing or validating a UTC instant.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum TimeError {
    /// The text is not a recognised date/time or timestamp.
    Parse(String),
    /// A calendar field is outside its valid range.
    FieldOutOfRange(&'static str),
}

impl Display for TimeError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Parse(msg) => write!(f, "time parse error: {msg}"),
            Self::FieldOutOfRange(field) => write!(f, "{field} out of range"),
        }
    }
}

impl Error for TimeError {}
