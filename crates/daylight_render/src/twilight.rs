//! Elevation → twilight band → overlay opacity.
//!
//! A [`ShadingTable`] is plain data: an ordered list of bands from the
//! highest elevation down, each with its lower bound and the opacity at
//! both of its edges. In smooth mode the opacity is interpolated linearly
//! across a band; otherwise each band is one flat step.

use serde::{Deserialize, Serialize};

use crate::error::RenderError;

/// Illumination class of a ground point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TwilightBand {
    Day,
    CivilTwilight,
    NauticalTwilight,
    AstronomicalTwilight,
    Night,
}

impl TwilightBand {
    pub fn name(self) -> &'static str {
        match self {
            Self::Day => "day",
            Self::CivilTwilight => "civil twilight",
            Self::NauticalTwilight => "nautical twilight",
            Self::AstronomicalTwilight => "astronomical twilight",
            Self::Night => "night",
        }
    }
}

/// One row of a shading table.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BandEdge {
    pub band: TwilightBand,
    /// Lowest solar elevation (inclusive) belonging to this band, degrees.
    pub lower_deg: f64,
    /// Opacity at the band's upper elevation bound.
    pub alpha_upper: f64,
    /// Opacity at `lower_deg`.
    pub alpha_lower: f64,
}

impl BandEdge {
    pub fn new(band: TwilightBand, lower_deg: f64, alpha_upper: f64, alpha_lower: f64) -> Self {
        Self {
            band,
            lower_deg,
            alpha_upper,
            alpha_lower,
        }
    }
}

/// Overlay colour and opacity for one sample.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ShadeSample {
    pub band: TwilightBand,
    pub color: [u8; 3],
    /// Opacity in [0, 1], already multiplied by the table's alpha scale.
    pub alpha: f64,
}

impl ShadeSample {
    /// Alpha channel byte, `floor(alpha · 255)`.
    pub fn alpha_byte(&self) -> u8 {
        (self.alpha * 255.0).floor().clamp(0.0, 255.0) as u8
    }

    pub fn rgba(&self) -> [u8; 4] {
        let [r, g, b] = self.color;
        [r, g, b, self.alpha_byte()]
    }
}

/// Threshold/opacity table for one rendering profile.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShadingTable {
    /// Overlay RGB colour.
    pub color: [u8; 3],
    /// Global multiplier applied to every opacity.
    pub alpha_scale: f64,
    /// Interpolate inside bands instead of using flat steps.
    pub smooth: bool,
    /// Bands ordered from the highest elevation down.
    pub bands: Vec<BandEdge>,
}

impl ShadingTable {
    /// Five-band smooth table in deep blue, scaled to 75%.
    pub fn color() -> Self {
        Self {
            color: [0, 0, 30],
            alpha_scale: 0.75,
            smooth: true,
            bands: vec![
                BandEdge::new(TwilightBand::Day, 0.0, 0.0, 0.0),
                BandEdge::new(TwilightBand::CivilTwilight, -1.0, 0.0, 0.2),
                BandEdge::new(TwilightBand::NauticalTwilight, -6.0, 0.2, 0.6),
                BandEdge::new(TwilightBand::AstronomicalTwilight, -12.0, 0.6, 0.8),
                BandEdge::new(TwilightBand::Night, -90.0, 0.8, 0.8),
            ],
        }
    }

    /// Three flat black steps for low-colour displays.
    pub fn grayscale() -> Self {
        Self {
            color: [0, 0, 0],
            alpha_scale: 1.0,
            smooth: false,
            bands: vec![
                BandEdge::new(TwilightBand::Day, 0.0, 0.0, 0.0),
                BandEdge::new(TwilightBand::CivilTwilight, -6.0, 0.25, 0.25),
                BandEdge::new(TwilightBand::Night, -90.0, 0.70, 0.70),
            ],
        }
    }

    /// Index of the band containing `elevation_deg`. Anything below the
    /// last bound falls into the last band.
    fn band_index(&self, elevation_deg: f64) -> usize {
        self.bands
            .iter()
            .position(|b| elevation_deg >= b.lower_deg)
            .unwrap_or_else(|| self.bands.len().saturating_sub(1))
    }

    /// Band for a solar elevation in degrees.
    ///
    /// An empty table classifies everything as night; `validate` rejects
    /// such tables before they reach a render.
    pub fn classify(&self, elevation_deg: f64) -> TwilightBand {
        self.bands
            .get(self.band_index(elevation_deg))
            .map_or(TwilightBand::Night, |b| b.band)
    }

    /// Colour and opacity for a solar elevation in degrees.
    pub fn shade(&self, elevation_deg: f64) -> ShadeSample {
        let i = self.band_index(elevation_deg);
        let Some(edge) = self.bands.get(i) else {
            return ShadeSample {
                band: TwilightBand::Night,
                color: self.color,
                alpha: 0.0,
            };
        };

        let alpha = if self.smooth {
            let upper_deg = if i == 0 { 90.0 } else { self.bands[i - 1].lower_deg };
            let span = upper_deg - edge.lower_deg;
            if span > 0.0 {
                let t = ((elevation_deg - edge.lower_deg) / span).clamp(0.0, 1.0);
                edge.alpha_lower + (edge.alpha_upper - edge.alpha_lower) * t
            } else {
                edge.alpha_lower
            }
        } else {
            edge.alpha_lower
        };

        ShadeSample {
            band: edge.band,
            color: self.color,
            alpha: (alpha * self.alpha_scale).clamp(0.0, 1.0),
        }
    }

    /// Reject tables that would shade inconsistently.
    ///
    /// Bounds must strictly decrease, every opacity and the scale must lie
    /// in [0, 1], and opacity must never decrease as the Sun sinks.
    pub fn validate(&self) -> Result<(), RenderError> {
        if self.bands.is_empty() {
            return Err(RenderError::InvalidConfig("shading table has no bands".into()));
        }
        if !(0.0..=1.0).contains(&self.alpha_scale) {
            return Err(RenderError::InvalidConfig(format!(
                "alpha_scale {} outside [0, 1]",
                self.alpha_scale
            )));
        }
        for b in &self.bands {
            if !b.lower_deg.is_finite() {
                return Err(RenderError::InvalidConfig(format!(
                    "{} lower bound is not finite",
                    b.band.name()
                )));
            }
            for a in [b.alpha_upper, b.alpha_lower] {
                if !(0.0..=1.0).contains(&a) {
                    return Err(RenderError::InvalidConfig(format!(
                        "{} opacity {a} outside [0, 1]",
                        b.band.name()
                    )));
                }
            }
            if b.alpha_upper > b.alpha_lower {
                return Err(RenderError::InvalidConfig(format!(
                    "{} opacity decreases towards night",
                    b.band.name()
                )));
            }
        }
        for w in self.bands.windows(2) {
            if w[1].lower_deg >= w[0].lower_deg {
                return Err(RenderError::InvalidConfig(format!(
                    "band bounds not decreasing at {}",
                    w[1].band.name()
                )));
            }
            if w[1].alpha_upper < w[0].alpha_lower {
                return Err(RenderError::InvalidConfig(format!(
                    "opacity drops entering {}",
                    w[1].band.name()
                )));
            }
        }
        Ok(())
    }
}

impl Default for ShadingTable {
    fn default() -> Self {
        Self::color()
    }
}

/// Rendering profile, each carrying its own shading table.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum ShadingProfile {
    Color {
        #[serde(default = "ShadingTable::color")]
        table: ShadingTable,
    },
    Grayscale {
        #[serde(default = "ShadingTable::grayscale")]
        table: ShadingTable,
    },
}

impl ShadingProfile {
    pub fn color() -> Self {
        Self::Color {
            table: ShadingTable::color(),
        }
    }

    pub fn grayscale() -> Self {
        Self::Grayscale {
            table: ShadingTable::grayscale(),
        }
    }

    pub fn table(&self) -> &ShadingTable {
        match self {
            Self::Color { table } | Self::Grayscale { table } => table,
        }
    }

    pub fn is_grayscale(&self) -> bool {
        matches!(self, Self::Grayscale { .. })
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::Color { .. } => "color",
            Self::Grayscale { .. } => "grayscale",
        }
    }
}

impl Default for ShadingProfile {
    fn default() -> Self {
        Self::color()
    }
}
