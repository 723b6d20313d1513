//! # Location Module
//!
//! Works out which city's weather to show when the app starts:
//! stored preference, then the system timezone, then [`DEFAULT_CITY`].

use crate::constants::DEFAULT_CITY;
use crate::logger::log;
use crate::settings::PreferencesRepository;
use rand::seq::SliceRandom;
use rand::Rng;

/// Zone shared by every Indian city; a city is picked at random from
/// [`INDIAN_CITIES`] instead of the table.
const INDIA_TIMEZONE: &str = "Asia/Kolkata";

pub const INDIAN_CITIES: [&str; 10] = [
    "New Delhi",
    "Mumbai",
    "Kolkata",
    "Chennai",
    "Bangalore",
    "Hyderabad",
    "Pune",
    "Ahmedabad",
    "Jaipur",
    "Lucknow",
];

/// IANA timezone id to representative city
pub const TIMEZONE_CITIES: &[(&str, &str)] = &[
    // North America
    ("America/New_York", "New York"),
    ("America/Los_Angeles", "Los Angeles"),
    ("America/Chicago", "Chicago"),
    ("America/Denver", "Denver"),
    ("America/Phoenix", "Phoenix"),
    ("America/Toronto", "Toronto"),
    ("America/Vancouver", "Vancouver"),
    ("America/Mexico_City", "Mexico City"),
    // South America
    ("America/Sao_Paulo", "Sao Paulo"),
    ("America/Buenos_Aires", "Buenos Aires"),
    ("America/Argentina/Buenos_Aires", "Buenos Aires"),
    ("America/Lima", "Lima"),
    ("America/Bogota", "Bogota"),
    ("America/Santiago", "Santiago"),
    // Europe
    ("Europe/London", "London"),
    ("Europe/Paris", "Paris"),
    ("Europe/Berlin", "Berlin"),
    ("Europe/Rome", "Rome"),
    ("Europe/Madrid", "Madrid"),
    ("Europe/Amsterdam", "Amsterdam"),
    ("Europe/Zurich", "Zurich"),
    ("Europe/Moscow", "Moscow"),
    ("Europe/Istanbul", "Istanbul"),
    ("Europe/Athens", "Athens"),
    ("Europe/Vienna", "Vienna"),
    ("Europe/Stockholm", "Stockholm"),
    ("Europe/Oslo", "Oslo"),
    // Asia
    ("Asia/Calcutta", "New Delhi"),
    ("Asia/Tokyo", "Tokyo"),
    ("Asia/Shanghai", "Shanghai"),
    ("Asia/Hong_Kong", "Hong Kong"),
    ("Asia/Singapore", "Singapore"),
    ("Asia/Dubai", "Dubai"),
    ("Asia/Seoul", "Seoul"),
    ("Asia/Bangkok", "Bangkok"),
    ("Asia/Jakarta", "Jakarta"),
    ("Asia/Manila", "Manila"),
    ("Asia/Kuala_Lumpur", "Kuala Lumpur"),
    ("Asia/Taipei", "Taipei"),
    ("Asia/Riyadh", "Riyadh"),
    ("Asia/Tel_Aviv", "Tel Aviv"),
    ("Asia/Jerusalem", "Tel Aviv"),
    // Africa
    ("Africa/Cairo", "Cairo"),
    ("Africa/Lagos", "Lagos"),
    ("Africa/Johannesburg", "Johannesburg"),
    ("Africa/Nairobi", "Nairobi"),
    ("Africa/Casablanca", "Casablanca"),
    // Australia and Oceania
    ("Australia/Sydney", "Sydney"),
    ("Australia/Melbourne", "Melbourne"),
    ("Australia/Perth", "Perth"),
    ("Australia/Brisbane", "Brisbane"),
    ("Pacific/Auckland", "Auckland"),
    ("Pacific/Honolulu", "Honolulu"),
];

/// Where the start-up city came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CitySource {
    Stored,
    Timezone,
    Default,
}

/// The system's IANA timezone id, if the OS reports one
pub fn system_timezone() -> Option<String> {
    match iana_time_zone::get_timezone() {
        Ok(zone) => Some(zone),
        Err(e) => {
            log::warn!("Could not determine system timezone: {}", e);
            None
        }
    }
}

/// City for an IANA timezone id, or `None` when the zone is not mapped.
pub fn city_for_timezone<R: Rng + ?Sized>(zone: &str, rng: &mut R) -> Option<String> {
    if zone == INDIA_TIMEZONE {
        return INDIAN_CITIES.choose(rng).map(|city| city.to_string());
    }

    TIMEZONE_CITIES
        .iter()
        .find(|(id, _)| *id == zone)
        .map(|(_, city)| city.to_string())
}

/// Resolve the city to show at start-up.
///
/// A city derived from the timezone or the default is written back to
/// `preferences` so later starts are stable.
pub fn resolve_startup_city<R: Rng + ?Sized>(
    preferences: &dyn PreferencesRepository,
    zone: Option<&str>,
    rng: &mut R,
) -> (String, CitySource) {
    if let Some(city) = preferences
        .current_city()
        .filter(|city| !city.trim().is_empty())
    {
        log::info!("Using stored city: {}", city);
        return (city, CitySource::Stored);
    }

    let (city, source) = match zone.and_then(|zone| city_for_timezone(zone, rng)) {
        Some(city) => {
            log::info!("Using timezone-based city: {} ({})", city, zone.unwrap_or_default());
            (city, CitySource::Timezone)
        }
        None => {
            log::info!(
                "No city mapped for timezone {:?}, using default city: {}",
                zone,
                DEFAULT_CITY
            );
            (DEFAULT_CITY.to_string(), CitySource::Default)
        }
    };

    preferences.set_current_city(&city);
    (city, source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn kolkata_picks_an_indian_city() {
        let mut rng = StdRng::seed_from_u64(3);
        for _ in 0..20 {
            let city = city_for_timezone("Asia/Kolkata", &mut rng).expect("mapped zone");
            assert!(INDIAN_CITIES.contains(&city.as_str()));
        }
    }

    #[test]
    fn table_lookup_and_miss() {
        let mut rng = StdRng::seed_from_u64(0);
        assert_eq!(
            city_for_timezone("Europe/Oslo", &mut rng).as_deref(),
            Some("Oslo")
        );
        assert_eq!(city_for_timezone("Etc/UTC", &mut rng), None);
        assert_eq!(city_for_timezone("", &mut rng), None);
    }

    #[test]
    fn table_has_no_duplicate_zones() {
        let mut zones: Vec<&str> = TIMEZONE_CITIES.iter().map(|(zone, _)| *zone).collect();
        zones.sort_unstable();
        let before = zones.len();
        zones.dedup();
        assert_eq!(before, zones.len());
    }
}
