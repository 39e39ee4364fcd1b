//! Day/night map rendering.
//!
//! This crate provides:
//! - Equirectangular and Mercator projections with exact inverses
//! - Data-driven twilight shading tables for colour and grayscale output
//! - A strided overlay rasterizer composited onto a [`DrawSurface`]
//! - Moon-phase silhouettes built as explicit lit-region polygons
//! - Sun/moon glyphs and the terminator line
//! - TOML-loadable [`RenderConfig`], a [`PeriodicTask`] for live refresh
//!   and background location lookup

pub mod config;
pub mod error;
pub mod glyphs;
pub mod location;
pub mod projection;
pub mod raster;
pub mod render;
pub mod schedule;
pub mod silhouette;
pub mod surface;
pub mod terminator;
pub mod twilight;

pub use config::RenderConfig;
pub use error::RenderError;
pub use glyphs::{draw_moon_glyph, draw_sun_glyph, moon_colors};
pub use location::{FixedLocation, LocationProvider, LocationRequest};
pub use projection::{PixelPoint, Projection, ProjectionMapper};
pub use raster::rasterize_twilight;
pub use render::{
    ObserverInfo, RenderOutput, RenderRequest, SceneInfo, render, render_to_surface,
};
pub use schedule::{DEFAULT_INTERVAL, PeriodicTask};
pub use silhouette::{LitRegion, MoonSilhouette, draw_moon_phase};
pub use surface::{Color, DrawSurface, PixelSurface, source_over};
pub use terminator::{TERMINATOR_STEP_DEG, terminator_latitude_deg, terminator_points};
pub use twilight::{BandEdge, ShadeSample, ShadingProfile, ShadingTable, TwilightBand};
