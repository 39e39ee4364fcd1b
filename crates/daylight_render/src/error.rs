//! Error types for rendering and configuration.

use std::error::Error;
use std::fmt::{Display, Formatter};

use daylight_frames::GeoError;

/// Errors from configuring or producing a frame.
#[derive(Debug, Clone, PartialEq)]
#[non_exhaustive]
pub enum RenderError {
    /// A configuration value is out of range or inconsistent.
    InvalidConfig(String),
    /// Observer coordinates are outside the valid domain.
    Domain(GeoError),
    /// The configuration file could not be parsed.
    Config(String),
    /// I/O error.
    Io(String),
    /// Image encoding or decoding failed.
    Image(String),
}

impl Display for RenderError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidConfig(msg) => write!(f, "invalid render config: {msg}"),
            Self::Domain(e) => write!(f, "invalid observer: {e}"),
            Self::Config(msg) => write!(f, "config parse error: {msg}"),
            Self::Io(msg) => write!(f, "I/O error: {msg}"),
            Self::Image(msg) => write!(f, "image error: {msg}"),
        }
    }
}

impl Error for RenderError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Domain(e) => Some(e),
            _ => None,
        }
    }
}

impl From<GeoError> for RenderError {
    fn from(e: GeoError) -> Self {
        Self::Domain(e)
    }
}

impl From<std::io::Error> for RenderError {
    fn from(e: std::io::Error) -> Self {
        Self::Io(e.to_string())
    }
}

impl From<toml::de::Error> for RenderError {
    fn from(e: toml::de::Error) -> Self {
        Self::Config(e.to_string())
    }
}

impl From<image::ImageError> for RenderError {
    fn from(e: image::ImageError) -> Self {
        Self::Image(e.to_string())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn domain_error_has_source() {
        let e = RenderError::from(GeoError::LatitudeOutOfRange(91.0));
        assert!(e.source().is_some());
        assert!(e.to_string().contains("91"));
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing.toml");
        let e = RenderError::from(io);
        assert!(matches!(e, RenderError::Io(ref m) if m.contains("missing.toml")));
    }
}
