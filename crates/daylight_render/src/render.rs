//! Frame entry points.
//!
//! [`render`] is a pure function of (instant, observer, config): it derives
//! the scene and paints a fresh shading overlay. [`render_to_surface`]
//! adds the host side: clear, one composite, then the vector overlays.

use std::fmt::{Display, Formatter};
use std::time::Instant;

use daylight_ephem::{
    LunarPosition, MoonPhase, SunTimes, lunar_position, solar_elevation_deg, subsolar_point,
    sun_times,
};
use daylight_frames::GeoPoint;
use daylight_time::UtcTime;
use image::RgbaImage;

use crate::config::RenderConfig;
use crate::error::RenderError;
use crate::glyphs::{draw_moon_glyph, draw_sun_glyph};
use crate::projection::ProjectionMapper;
use crate::raster::rasterize_twilight;
use crate::silhouette::MoonSilhouette;
use crate::surface::{Color, DrawSurface};
use crate::terminator::terminator_points;
use crate::twilight::TwilightBand;

/// Translucent white, 2 px.
const TERMINATOR_COLOR: Color = [255, 255, 255, 77];
const TERMINATOR_WIDTH: f64 = 2.0;

/// What to draw: the instant and, if known, where the viewer is.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderRequest {
    pub instant: UtcTime,
    pub observer: Option<GeoPoint>,
}

impl RenderRequest {
    pub fn new(instant: UtcTime) -> Self {
        Self {
            instant,
            observer: None,
        }
    }

    pub fn with_observer(mut self, observer: GeoPoint) -> Self {
        self.observer = Some(observer);
        self
    }
}

/// Observer-dependent part of the scene.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ObserverInfo {
    pub location: GeoPoint,
    pub sun_times: SunTimes,
    pub solar_elevation_deg: f64,
    pub band: TwilightBand,
}

/// Everything derived from one instant.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SceneInfo {
    pub instant: UtcTime,
    pub sun: GeoPoint,
    pub moon: LunarPosition,
    pub phase: MoonPhase,
    pub observer: Option<ObserverInfo>,
}

impl SceneInfo {
    /// Derive the scene for `request`, classifying the observer's sky with
    /// `config`'s shading table. Fails only on out-of-range observer
    /// coordinates.
    pub fn compute(request: &RenderRequest, config: &RenderConfig) -> Result<Self, RenderError> {
        let observer = request.observer.map(GeoPoint::validated).transpose()?;
        let sun = subsolar_point(&request.instant);
        let moon = lunar_position(&request.instant);
        let phase = MoonPhase::from_elongation(moon.elongation_deg);

        let observer = observer.map(|location| {
            let elevation = solar_elevation_deg(&location, &sun);
            ObserverInfo {
                location,
                sun_times: sun_times(&location, &request.instant),
                solar_elevation_deg: elevation,
                band: config.profile.table().classify(elevation),
            }
        });

        Ok(Self {
            instant: request.instant,
            sun,
            moon,
            phase,
            observer,
        })
    }

    /// Illuminated fraction as a whole-number percentage.
    pub fn illuminated_percent(&self) -> f64 {
        (self.moon.illuminated_fraction * 100.0).round()
    }
}

fn hhmm(t: &UtcTime) -> String {
    format!("{:02}:{:02}", t.hour, t.minute)
}

impl Display for SceneInfo {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}", self.instant)?;
        writeln!(f, "Sun: {}", self.sun)?;
        write!(
            f,
            "Moon: {} ({} {}, {}% illuminated)",
            self.moon.sub_point,
            self.phase.name(),
            self.phase.symbol(),
            self.illuminated_percent()
        )?;
        if let Some(obs) = &self.observer {
            write!(
                f,
                "\nObserver: {} (sun {:.1}°, {})",
                obs.location,
                obs.solar_elevation_deg,
                obs.band.name()
            )?;
            match obs.sun_times {
                SunTimes::Daily {
                    sunrise,
                    sunset,
                    day_length_hours,
                } => {
                    let minutes = (day_length_hours * 60.0).round() as i64;
                    write!(
                        f,
                        "\nSunrise {} UTC, sunset {} UTC, day length {}h {:02}m",
                        hhmm(&sunrise),
                        hhmm(&sunset),
                        minutes / 60,
                        minutes % 60
                    )?;
                }
                SunTimes::PolarDay => write!(f, "\nPolar day: the Sun does not set")?,
                SunTimes::PolarNight => write!(f, "\nPolar night: the Sun does not rise")?,
            }
        }
        Ok(())
    }
}

/// A finished frame: the shading overlay plus the scene it shows.
#[derive(Debug, Clone)]
pub struct RenderOutput {
    pub overlay: RgbaImage,
    pub info: SceneInfo,
}

/// Compute the scene and paint its twilight overlay.
///
/// The overlay is a new transparent `width × height` buffer owned by the
/// caller; nothing is retained between calls.
pub fn render(request: &RenderRequest, config: &RenderConfig) -> Result<RenderOutput, RenderError> {
    config.validate()?;
    let info = SceneInfo::compute(request, config)?;

    let started = Instant::now();
    let mapper = ProjectionMapper::new(config.projection, config.width, config.height);
    let overlay = rasterize_twilight(&mapper, &info.sun, config.profile.table(), config.stride);
    log::debug!(
        "rasterized {}x{} {} overlay (stride {}) in {:?}",
        config.width,
        config.height,
        config.projection.name(),
        config.stride,
        started.elapsed()
    );
    log::debug!(
        "sun {} moon {} elongation {:.2}° fraction {:.4}",
        info.sun,
        info.moon.sub_point,
        info.moon.elongation_deg,
        info.moon.illuminated_fraction
    );

    Ok(RenderOutput { overlay, info })
}

/// Render a full frame onto `surface`.
///
/// Order: clear, composite the overlay once, optional terminator, then the
/// Sun and Moon glyphs if they project onto the canvas. The surface must
/// match the configured canvas size.
pub fn render_to_surface<S: DrawSurface + ?Sized>(
    surface: &mut S,
    request: &RenderRequest,
    config: &RenderConfig,
) -> Result<SceneInfo, RenderError> {
    if (surface.width(), surface.height()) != (config.width, config.height) {
        return Err(RenderError::InvalidConfig(format!(
            "surface is {}x{} but config asks for {}x{}",
            surface.width(),
            surface.height(),
            config.width,
            config.height
        )));
    }

    let RenderOutput { overlay, info } = render(request, config)?;
    let mapper = ProjectionMapper::new(config.projection, config.width, config.height);

    surface.clear();
    surface.composite(&overlay);

    if config.draw_terminator {
        for run in terminator_points(&info.sun, &mapper) {
            let points: Vec<_> = run.iter().map(|p| (p.x, p.y)).collect();
            surface.stroke_polyline(&points, TERMINATOR_WIDTH, TERMINATOR_COLOR);
        }
    }

    if config.draw_glyphs {
        match mapper.project_visible(&info.sun) {
            Some(at) => draw_sun_glyph(surface, at, &config.profile),
            None => log::debug!("sun at {} is off the canvas", info.sun),
        }
        match mapper.project_visible(&info.moon.sub_point) {
            Some(at) => {
                let silhouette = MoonSilhouette::new(
                    info.moon.illuminated_fraction,
                    info.moon.is_waxing(),
                    config.moon_radius,
                );
                draw_moon_glyph(surface, at, &silhouette, &config.profile);
            }
            None => log::debug!("moon at {} is off the canvas", info.moon.sub_point),
        }
    }

    Ok(info)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surface::PixelSurface;

    fn noon() -> UtcTime {
        UtcTime::new(2024, 1, 10, 12, 0, 0.0)
    }

    #[test]
    fn scene_without_observer() {
        let info = SceneInfo::compute(&RenderRequest::new(noon()), &RenderConfig::default())
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(info.observer.is_none());
        assert!(info.sun.longitude_deg.abs() < 0.01);
        let text = info.to_string();
        assert!(text.contains("Sun: -22.1°, 0.0°"), "{text}");
        assert!(text.contains("New Moon"), "{text}");
        assert!(!text.contains("Observer"));
    }

    #[test]
    fn invalid_observer_rejected_before_geometry() {
        let request = RenderRequest {
            instant: noon(),
            observer: Some(GeoPoint {
                latitude_deg: 95.0,
                longitude_deg: 0.0,
            }),
        };
        let e = render(&request, &RenderConfig::default());
        assert!(matches!(e, Err(RenderError::Domain(_))));
    }

    #[test]
    fn invalid_config_rejected() {
        let config = RenderConfig {
            stride: 0,
            ..Default::default()
        };
        assert!(matches!(
            render(&RenderRequest::new(noon()), &config),
            Err(RenderError::InvalidConfig(_))
        ));
    }

    #[test]
    fn surface_size_must_match() {
        let mut s = PixelSurface::new(10, 10, [0, 0, 0, 255]);
        let e = render_to_surface(&mut s, &RenderRequest::new(noon()), &RenderConfig::default());
        assert!(matches!(e, Err(RenderError::InvalidConfig(_))));
    }

    #[test]
    fn observer_panel_in_text() {
        let request = RenderRequest::new(noon()).with_observer(GeoPoint::wrapped(51.5, -0.1));
        let info = SceneInfo::compute(&request, &RenderConfig::default())
            .unwrap_or_else(|e| panic!("{e}"));
        let text = info.to_string();
        assert!(text.contains("Observer: 51.5°, -0.1°"), "{text}");
        assert!(text.contains("Sunrise"), "{text}");
        assert_eq!(info.observer.map(|o| o.band), Some(TwilightBand::Day));
    }
}
