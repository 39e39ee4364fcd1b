//! Sunrise/sunset computation with twilight variants.
//!
//! Uses the same first-order Sun as the map: declination from the day of
//! year and transit at `12h − λ/15` UTC. The hour angle at the target
//! altitude follows from the standard relation
//!
//! `cos H = (sin h0 − sin φ·sin δ) / (cos φ·cos δ)`
//!
//! and the event lies `H/15` hours before or after local noon. When
//! `|cos H| > 1` the Sun never reaches the target altitude and a polar
//! sentinel is returned instead of a time.

use daylight_frames::GeoPoint;
use daylight_time::UtcTime;

use crate::riseset_types::{Observer, RiseSetConfig, RiseSetEvent, RiseSetResult, SunTimes};
use crate::solar::solar_declination_deg;

/// Below this `cos φ·cos δ` the observer is treated as standing on a pole.
const POLE_EPSILON: f64 = 1e-12;

/// Approximate local solar noon JD from 0h UT JD and longitude.
///
/// `JD_noon = JD_0h + 0.5 - longitude_deg / 360`
pub fn approximate_local_noon_jd(jd_ut_midnight: f64, longitude_deg: f64) -> f64 {
    jd_ut_midnight + 0.5 - longitude_deg / 360.0
}

/// Hour angle in degrees at which the Sun's centre sits at `h0_deg`.
///
/// `Err(result)` carries the polar sentinel when no such hour angle exists.
fn hour_angle_deg(lat_deg: f64, dec_deg: f64, h0_deg: f64) -> Result<f64, RiseSetResult> {
    let (sin_phi, cos_phi) = lat_deg.to_radians().sin_cos();
    let (sin_dec, cos_dec) = dec_deg.to_radians().sin_cos();
    let sin_h0 = h0_deg.to_radians().sin();

    let denom = cos_phi * cos_dec;
    if denom.abs() < POLE_EPSILON {
        // Constant altitude all day: above or below the target
        return Err(if sin_phi * sin_dec > sin_h0 {
            RiseSetResult::NeverSets
        } else {
            RiseSetResult::NeverRises
        });
    }

    let cos_h = (sin_h0 - sin_phi * sin_dec) / denom;
    if cos_h > 1.0 {
        return Err(RiseSetResult::NeverRises);
    }
    if cos_h < -1.0 {
        return Err(RiseSetResult::NeverSets);
    }
    Ok(cos_h.acos().to_degrees())
}

/// Compute a single rise/set event for the Sun.
///
/// `date` selects the UTC calendar day; its time of day is ignored. The
/// event returned is the one around local solar noon of that day, so for
/// observers far from Greenwich it may fall on the neighbouring UTC date.
///
/// # Returns
/// * `RiseSetResult::Event` with the event instant
/// * `RiseSetResult::NeverRises` if the Sun stays below the target altitude
/// * `RiseSetResult::NeverSets` if the Sun stays above it
pub fn compute_rise_set(
    observer: &Observer,
    event: RiseSetEvent,
    date: &UtcTime,
    config: &RiseSetConfig,
) -> RiseSetResult {
    let midnight = date.start_of_day();
    let dec = solar_declination_deg(midnight.day_of_year());
    let h0 = config.target_altitude_deg(event, observer.altitude_m);

    let ha = match hour_angle_deg(observer.location.latitude_deg, dec, h0) {
        Ok(ha) => ha,
        Err(sentinel) => return sentinel,
    };

    let jd_noon = approximate_local_noon_jd(midnight.to_jd(), observer.location.longitude_deg);
    // 360° of hour angle per day
    let offset_days = ha / 360.0;
    let jd_event = if event.is_rising() {
        jd_noon - offset_days
    } else {
        jd_noon + offset_days
    };

    RiseSetResult::Event {
        time: UtcTime::from_jd(jd_event),
        event,
    }
}

/// Compute all 8 rise/set events for a day.
///
/// Returns results in chronological order:
/// AstronomicalDawn, NauticalDawn, CivilDawn, Sunrise,
/// Sunset, CivilDusk, NauticalDusk, AstronomicalDusk.
///
/// Each event is computed independently; one that cannot occur (e.g.
/// astronomical dusk in a high-latitude summer) is reported as
/// NeverRises/NeverSets.
pub fn compute_all_events(
    observer: &Observer,
    date: &UtcTime,
    config: &RiseSetConfig,
) -> Vec<RiseSetResult> {
    RiseSetEvent::CHRONOLOGICAL
        .iter()
        .map(|&evt| compute_rise_set(observer, evt, date, config))
        .collect()
}

/// Sunrise, sunset and day length at sea level with the default horizon.
pub fn sun_times(location: &GeoPoint, date: &UtcTime) -> SunTimes {
    let observer = Observer::from(*location);
    let config = RiseSetConfig::default();
    let rise = compute_rise_set(&observer, RiseSetEvent::Sunrise, date, &config);
    let set = compute_rise_set(&observer, RiseSetEvent::Sunset, date, &config);
    match (rise, set) {
        (RiseSetResult::Event { time: sunrise, .. }, RiseSetResult::Event { time: sunset, .. }) => {
            let day_length_hours = (sunset.to_jd() - sunrise.to_jd()) * 24.0;
            SunTimes::Daily {
                sunrise,
                sunset,
                day_length_hours,
            }
        }
        (RiseSetResult::NeverSets, _) | (_, RiseSetResult::NeverSets) => SunTimes::PolarDay,
        _ => SunTimes::PolarNight,
    }
}
