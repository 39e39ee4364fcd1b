//! Render configuration.
//!
//! One immutable value per render call. Every field has a default, so a
//! TOML file only needs the keys it changes:
//!
//! ```toml
//! width = 1600
//! height = 800
//! projection = "equirectangular"
//! draw_terminator = true
//!
//! [profile]
//! kind = "grayscale"
//! ```

use std::path::Path;
use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::RenderError;
use crate::projection::Projection;
use crate::twilight::ShadingProfile;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Canvas width in pixels.
    pub width: u32,
    /// Canvas height in pixels.
    pub height: u32,
    pub projection: Projection,
    pub profile: ShadingProfile,
    /// Rasterizer sampling step in pixels (≥ 1).
    pub stride: u32,
    /// Moon silhouette radius in pixels.
    pub moon_radius: f64,
    pub draw_glyphs: bool,
    pub draw_terminator: bool,
    /// Seconds between frames in watch mode.
    pub refresh_secs: u64,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 1000,
            height: 500,
            projection: Projection::Mercator,
            profile: ShadingProfile::color(),
            stride: 2,
            moon_radius: 10.0,
            draw_glyphs: true,
            draw_terminator: false,
            refresh_secs: 60,
        }
    }
}

impl RenderConfig {
    /// Parse and validate a TOML document.
    pub fn from_toml_str(content: &str) -> Result<Self, RenderError> {
        let config: Self = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a TOML file.
    pub fn load(path: impl AsRef<Path>) -> Result<Self, RenderError> {
        let path = path.as_ref();
        let content = std::fs::read_to_string(path)?;
        let config = Self::from_toml_str(&content)?;
        log::debug!("loaded render config from {}", path.display());
        Ok(config)
    }

    pub fn validate(&self) -> Result<(), RenderError> {
        if self.width == 0 || self.height == 0 {
            return Err(RenderError::InvalidConfig(format!(
                "canvas {}x{} has no pixels",
                self.width, self.height
            )));
        }
        if self.stride == 0 {
            return Err(RenderError::InvalidConfig("stride must be at least 1".into()));
        }
        if !self.moon_radius.is_finite() || self.moon_radius <= 0.0 {
            return Err(RenderError::InvalidConfig(format!(
                "moon_radius {} must be positive",
                self.moon_radius
            )));
        }
        if self.refresh_secs == 0 {
            return Err(RenderError::InvalidConfig("refresh_secs must be at least 1".into()));
        }
        self.profile.table().validate()
    }

    pub fn refresh_interval(&self) -> Duration {
        Duration::from_secs(self.refresh_secs)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::twilight::ShadingTable;

    #[test]
    fn defaults() {
        let c = RenderConfig::default();
        assert_eq!((c.width, c.height), (1000, 500));
        assert_eq!(c.projection, Projection::Mercator);
        assert_eq!(c.stride, 2);
        assert!(c.draw_glyphs && !c.draw_terminator);
        assert!(c.validate().is_ok());
    }

    #[test]
    fn empty_document_is_default() {
        assert_eq!(RenderConfig::from_toml_str(""), Ok(RenderConfig::default()));
    }

    #[test]
    fn partial_document() {
        let c = RenderConfig::from_toml_str(
            r#"
            width = 720
            height = 360
            projection = "equirectangular"
            draw_terminator = true

            [profile]
            kind = "grayscale"
            "#,
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(c.width, 720);
        assert_eq!(c.projection, Projection::Equirectangular);
        assert!(c.draw_terminator);
        assert_eq!(c.profile.table(), &ShadingTable::grayscale());
        assert_eq!(c.stride, 2);
    }

    #[test]
    fn custom_table() {
        let c = RenderConfig::from_toml_str(
            r#"
            [profile]
            kind = "color"

            [profile.table]
            color = [20, 0, 40]
            alpha_scale = 0.5
            smooth = false

            [[profile.table.bands]]
            band = "day"
            lower_deg = 0.0
            alpha_upper = 0.0
            alpha_lower = 0.0

            [[profile.table.bands]]
            band = "night"
            lower_deg = -90.0
            alpha_upper = 0.9
            alpha_lower = 0.9
            "#,
        )
        .unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(c.profile.table().bands.len(), 2);
        assert!((c.profile.table().shade(-10.0).alpha - 0.45).abs() < 1e-12);
    }

    #[test]
    fn rejects_zero_stride() {
        let e = RenderConfig::from_toml_str("stride = 0");
        assert!(matches!(e, Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn rejects_zero_canvas() {
        let c = RenderConfig {
            height: 0,
            ..Default::default()
        };
        assert!(c.validate().is_err());
    }

    #[test]
    fn syntax_error_is_config_error() {
        let e = RenderConfig::from_toml_str("width = ");
        assert!(matches!(e, Err(RenderError::Config(_))));
    }

    #[test]
    fn unknown_projection_is_config_error() {
        let e = RenderConfig::from_toml_str("projection = \"robinson\"");
        assert!(matches!(e, Err(RenderError::Config(_))));
    }

    #[test]
    fn missing_file_is_io_error() {
        let e = RenderConfig::load("/nonexistent/daylight.toml");
        assert!(matches!(e, Err(RenderError::Io(_))));
    }
}
