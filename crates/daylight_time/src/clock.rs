//! Where a render cycle gets its instant from.

use crate::utc_time::UtcTime;

/// Source of the instant captured at the start of each render cycle.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum TimeSource {
    /// Read the system clock on every call.
    #[default]
    System,
    /// Always return the same instant (screenshots, tests).
    Fixed(UtcTime),
}

impl TimeSource {
    /// The instant for the cycle starting now. Total: the system clock is
    /// always available as a fallback.
    pub fn now(&self) -> UtcTime {
        match self {
            Self::System => UtcTime::now(),
            Self::Fixed(t) => *t,
        }
    }

    /// Whether every call returns the same instant.
    pub fn is_fixed(&self) -> bool {
        matches!(self, Self::Fixed(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixed_is_stable() {
        let t = UtcTime::new(2024, 1, 10, 12, 0, 0.0);
        let src = TimeSource::Fixed(t);
        assert_eq!(src.now(), t);
        assert_eq!(src.now(), t);
        assert!(src.is_fixed());
    }

    #[test]
    fn system_is_after_2020() {
        let now = TimeSource::System.now();
        assert!(now.year >= 2020, "system clock reports {now}");
        assert!(!TimeSource::default().is_fixed());
    }
}
