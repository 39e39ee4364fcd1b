use std::error::Error;
use std::path::{Path, PathBuf};
use std::time::Duration;

use clap::{Args, Parser, Subcommand, ValueEnum};
use daylight_ephem::{
    MoonPhase, Observer, RiseSetConfig, RiseSetEvent, RiseSetResult, compute_all_events,
    lunar_position, subsolar_point,
};
use daylight_frames::GeoPoint;
use daylight_render::{
    FixedLocation, LocationRequest, PeriodicTask, PixelSurface, Projection, RenderConfig,
    RenderRequest, SceneInfo, ShadingProfile, render_to_surface,
};
use daylight_time::{TimeSource, UtcTime};

/// How long the first frame waits for the observer position.
const LOCATION_TIMEOUT: Duration = Duration::from_secs(5);

/// Background for maps rendered without a base image.
const OCEAN: [u8; 4] = [28, 84, 140, 255];

#[derive(Parser)]
#[command(name = "daylight", about = "Day/night world map renderer")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render one frame to a PNG file
    Render {
        #[command(flatten)]
        map: MapArgs,
    },
    /// Print sub-solar/sub-lunar points, moon phase and observer times
    Info {
        /// UTC instant (YYYY-MM-DDThh:mm:ssZ or Unix timestamp); default now
        #[arg(long)]
        time: Option<String>,
        #[command(flatten)]
        location: LocationArgs,
    },
    /// Sunrise, sunset and twilight times for a place and date
    Sunrise {
        /// Latitude in degrees, north positive
        #[arg(long, allow_hyphen_values = true)]
        lat: f64,
        /// Longitude in degrees, east positive
        #[arg(long, allow_hyphen_values = true)]
        lng: f64,
        /// UTC date (YYYY-MM-DD); default today
        #[arg(long)]
        date: Option<String>,
        /// Observer altitude above sea level in meters
        #[arg(long, default_value = "0")]
        altitude: f64,
    },
    /// Re-render the PNG on a fixed cadence
    Watch {
        #[command(flatten)]
        map: MapArgs,
        /// Stop after this many frames (default: run until killed)
        #[arg(long)]
        frames: Option<u64>,
    },
}

#[derive(Args)]
struct LocationArgs {
    /// Observer latitude in degrees
    #[arg(long, requires = "lng", allow_hyphen_values = true)]
    lat: Option<f64>,
    /// Observer longitude in degrees
    #[arg(long, requires = "lat", allow_hyphen_values = true)]
    lng: Option<f64>,
}

#[derive(Args)]
struct MapArgs {
    /// Output PNG path
    #[arg(short, long, default_value = "daylight.png")]
    output: PathBuf,
    /// Fixed UTC instant (YYYY-MM-DDThh:mm:ssZ or Unix timestamp)
    #[arg(long)]
    time: Option<String>,
    /// TOML render configuration
    #[arg(long)]
    config: Option<PathBuf>,
    /// PNG base map drawn under the overlay; its size sets the canvas
    #[arg(long)]
    base_map: Option<PathBuf>,
    #[arg(long, value_enum)]
    projection: Option<ProjectionArg>,
    #[arg(long, value_enum)]
    profile: Option<ProfileArg>,
    #[arg(long)]
    width: Option<u32>,
    #[arg(long)]
    height: Option<u32>,
    /// Rasterizer sampling step in pixels
    #[arg(long)]
    stride: Option<u32>,
    /// Draw the terminator line
    #[arg(long)]
    terminator: bool,
    /// Omit the sun and moon markers
    #[arg(long)]
    no_glyphs: bool,
    #[command(flatten)]
    location: LocationArgs,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProjectionArg {
    Equirectangular,
    Mercator,
}

#[derive(Clone, Copy, ValueEnum)]
enum ProfileArg {
    Color,
    Grayscale,
}

fn main() {
    env_logger::init();
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn Error>> {
    match cli.command {
        Commands::Render { map } => {
            let job = MapJob::prepare(&map)?;
            let info = job.render_once()?;
            println!("{info}");
            println!("wrote {}", job.output.display());
        }

        Commands::Info { time, location } => {
            let instant = time_source(time.as_deref())?.now();
            let mut request = RenderRequest::new(instant);
            request.observer = location.point()?;
            let info = SceneInfo::compute(&request, &RenderConfig::default())?;
            println!("{info}");
        }

        Commands::Sunrise {
            lat,
            lng,
            date,
            altitude,
        } => {
            let location = GeoPoint::new(lat, lng)?;
            let date = time_source(date.as_deref())?.now();
            print_events(&Observer::new(location, altitude), &date);
        }

        Commands::Watch { map, frames } => {
            let job = MapJob::prepare(&map)?;
            if job.clock.is_fixed() {
                log::info!("fixed instant requested; rendering a single frame");
                let info = job.render_once()?;
                println!("{info}");
                return Ok(());
            }
            watch(job, frames)?;
        }
    }
    Ok(())
}

fn time_source(text: Option<&str>) -> Result<TimeSource, Box<dyn Error>> {
    Ok(match text {
        Some(s) => TimeSource::Fixed(s.parse::<UtcTime>()?),
        None => TimeSource::System,
    })
}

impl LocationArgs {
    /// Resolve the observer through a background lookup so a slow source
    /// never blocks startup for longer than the timeout.
    fn point(&self) -> Result<Option<GeoPoint>, Box<dyn Error>> {
        let (Some(lat), Some(lng)) = (self.lat, self.lng) else {
            return Ok(None);
        };
        let point = GeoPoint::new(lat, lng)?;
        Ok(LocationRequest::spawn(FixedLocation(point)).wait(LOCATION_TIMEOUT))
    }
}

/// Everything needed to produce frames for `render` and `watch`.
struct MapJob {
    config: RenderConfig,
    clock: TimeSource,
    observer: Option<GeoPoint>,
    base_map: Option<image::RgbaImage>,
    output: PathBuf,
}

impl MapJob {
    fn prepare(args: &MapArgs) -> Result<Self, Box<dyn Error>> {
        let mut config = match &args.config {
            Some(path) => RenderConfig::load(path)?,
            None => RenderConfig::default(),
        };
        if let Some(p) = args.projection {
            config.projection = match p {
                ProjectionArg::Equirectangular => Projection::Equirectangular,
                ProjectionArg::Mercator => Projection::Mercator,
            };
        }
        if let Some(p) = args.profile {
            config.profile = match p {
                ProfileArg::Color => ShadingProfile::color(),
                ProfileArg::Grayscale => ShadingProfile::grayscale(),
            };
        }
        if let Some(w) = args.width {
            config.width = w;
        }
        if let Some(h) = args.height {
            config.height = h;
        }
        if let Some(s) = args.stride {
            config.stride = s;
        }
        if args.terminator {
            config.draw_terminator = true;
        }
        if args.no_glyphs {
            config.draw_glyphs = false;
        }

        let base_map = match &args.base_map {
            Some(path) => {
                let img = load_base_map(path)?;
                config.width = img.width();
                config.height = img.height();
                Some(img)
            }
            None => None,
        };
        config.validate()?;

        let observer = args.location.point()?;
        if args.location.lat.is_some() && observer.is_none() {
            log::warn!("observer location unavailable; omitting observer panel");
        }

        Ok(Self {
            config,
            clock: time_source(args.time.as_deref())?,
            observer,
            base_map,
            output: args.output.clone(),
        })
    }

    fn surface(&self) -> PixelSurface {
        match &self.base_map {
            Some(img) => PixelSurface::with_base_map(img.clone()),
            None => PixelSurface::new(self.config.width, self.config.height, OCEAN),
        }
    }

    fn render_once(&self) -> Result<SceneInfo, Box<dyn Error>> {
        let mut surface = self.surface();
        let request = RenderRequest {
            instant: self.clock.now(),
            observer: self.observer,
        };
        let info = render_to_surface(&mut surface, &request, &self.config)?;
        surface.into_image().save(&self.output)?;
        Ok(info)
    }
}

fn load_base_map(path: &Path) -> Result<image::RgbaImage, Box<dyn Error>> {
    Ok(image::open(path)?.to_rgba8())
}

fn watch(job: MapJob, frames: Option<u64>) -> Result<(), Box<dyn Error>> {
    let interval = job.config.refresh_interval();
    let output = job.output.clone();
    let mut task = PeriodicTask::spawn("daylight-refresh", interval, move || {
        match job.render_once() {
            Ok(info) => log::info!(
                "frame {} → {} ({} {:.0}%)",
                info.instant,
                output.display(),
                info.phase.name(),
                info.illuminated_percent()
            ),
            Err(e) => log::warn!("frame failed: {e}"),
        }
    })?;

    loop {
        std::thread::sleep(Duration::from_millis(250));
        if frames.is_some_and(|n| task.ticks() >= n) || !task.is_running() {
            break;
        }
    }
    task.stop();
    Ok(())
}

fn print_events(observer: &Observer, date: &UtcTime) {
    let sun = subsolar_point(date);
    let moon = lunar_position(date);
    let phase = MoonPhase::from_elongation(moon.elongation_deg);
    println!(
        "{} on {:04}-{:02}-{:02} (sun declination {:.2}°, {} {})",
        observer.location,
        date.year,
        date.month,
        date.day,
        sun.latitude_deg,
        phase.symbol(),
        phase.name()
    );

    let results = compute_all_events(observer, date, &RiseSetConfig::default());
    for (event, result) in RiseSetEvent::CHRONOLOGICAL.iter().zip(&results) {
        match result {
            RiseSetResult::Event { time, .. } => {
                println!("  {:<18} {time}", event.name());
            }
            RiseSetResult::NeverRises => {
                println!("  {:<18} sun stays below (polar night)", event.name());
            }
            RiseSetResult::NeverSets => {
                println!("  {:<18} sun stays above (midnight sun)", event.name());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::CommandFactory;

    #[test]
    fn cli_definition_is_consistent() {
        Cli::command().debug_assert();
    }

    #[test]
    fn render_flags_override_config() {
        let cli = Cli::try_parse_from([
            "daylight",
            "render",
            "--time",
            "2024-01-10T12:00:00Z",
            "--projection",
            "equirectangular",
            "--profile",
            "grayscale",
            "--width",
            "360",
            "--height",
            "180",
            "--terminator",
        ])
        .unwrap_or_else(|e| panic!("{e}"));
        let Commands::Render { map } = cli.command else {
            panic!("expected render");
        };
        let job = MapJob::prepare(&map).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(job.config.projection, Projection::Equirectangular);
        assert!(job.config.profile.is_grayscale());
        assert_eq!((job.config.width, job.config.height), (360, 180));
        assert!(job.config.draw_terminator);
        assert!(job.clock.is_fixed());
        assert!(job.observer.is_none());
    }

    #[test]
    fn negative_coordinates_parse() {
        let cli = Cli::try_parse_from(["daylight", "sunrise", "--lat", "-33.9", "--lng", "-70.7"])
            .unwrap_or_else(|e| panic!("{e}"));
        assert!(matches!(cli.command, Commands::Sunrise { lat, .. } if lat < -33.0));
    }

    #[test]
    fn lat_requires_lng() {
        assert!(Cli::try_parse_from(["daylight", "info", "--lat", "10"]).is_err());
    }

    #[test]
    fn out_of_range_observer_is_rejected() {
        let args = LocationArgs {
            lat: Some(91.0),
            lng: Some(0.0),
        };
        assert!(args.point().is_err());
    }

    #[test]
    fn timestamp_time_source() {
        let src = time_source(Some("1704888000")).unwrap_or_else(|e| panic!("{e}"));
        assert_eq!(src.now(), UtcTime::new(2024, 1, 10, 12, 0, 0.0));
        assert!(!time_source(None).unwrap_or_else(|e| panic!("{e}")).is_fixed());
        assert!(time_source(Some("yesterday")).is_err());
    }
}
