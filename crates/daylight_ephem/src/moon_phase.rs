//! Eight-sector moon phase classification.
//!
//! The elongation circle is cut into 45° sectors centred on the cardinal
//! phase points (0°, 90°, 180°, 270°) and the octants between them. The
//! New Moon sector straddles 0°/360°.

use std::fmt::{Display, Formatter};

/// Width of one phase sector in degrees.
const SECTOR_DEG: f64 = 45.0;

/// Named lunar phase.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MoonPhase {
    New,
    WaxingCrescent,
    FirstQuarter,
    WaxingGibbous,
    Full,
    WaningGibbous,
    ThirdQuarter,
    WaningCrescent,
}

impl MoonPhase {
    /// All phases in order of increasing elongation.
    pub const ALL: [MoonPhase; 8] = [
        Self::New,
        Self::WaxingCrescent,
        Self::FirstQuarter,
        Self::WaxingGibbous,
        Self::Full,
        Self::WaningGibbous,
        Self::ThirdQuarter,
        Self::WaningCrescent,
    ];

    /// Classify an elongation in degrees. Any finite input is accepted and
    /// reduced to [0, 360) first.
    pub fn from_elongation(elongation_deg: f64) -> Self {
        let e = elongation_deg.rem_euclid(360.0);
        // Shift by half a sector so New Moon covers [337.5, 360) ∪ [0, 22.5)
        let sector = ((e + SECTOR_DEG / 2.0) / SECTOR_DEG).floor() as usize % 8;
        Self::ALL[sector]
    }

    /// Human-readable name.
    pub fn name(self) -> &'static str {
        match self {
            Self::New => "New Moon",
            Self::WaxingCrescent => "Waxing Crescent",
            Self::FirstQuarter => "First Quarter",
            Self::WaxingGibbous => "Waxing Gibbous",
            Self::Full => "Full Moon",
            Self::WaningGibbous => "Waning Gibbous",
            Self::ThirdQuarter => "Third Quarter",
            Self::WaningCrescent => "Waning Crescent",
        }
    }

    /// Unicode moon symbol (northern-hemisphere orientation).
    pub fn symbol(self) -> char {
        match self {
            Self::New => '🌑',
            Self::WaxingCrescent => '🌒',
            Self::FirstQuarter => '🌓',
            Self::WaxingGibbous => '🌔',
            Self::Full => '🌕',
            Self::WaningGibbous => '🌖',
            Self::ThirdQuarter => '🌗',
            Self::WaningCrescent => '🌘',
        }
    }

    /// Whether the lit fraction is growing in this phase.
    pub fn is_waxing(self) -> bool {
        matches!(
            self,
            Self::WaxingCrescent | Self::FirstQuarter | Self::WaxingGibbous
        )
    }
}

impl Display for MoonPhase {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}
