use glowclock::location::CitySource;
use glowclock::settings::{InMemoryPreferences, PreferencesRepository, SettingsModel};
use glowclock::weather::*;
use std::collections::HashMap;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;

const DEBOUNCE: Duration = Duration::from_millis(300);

/// Provider answering from scripted tables after a per-entry delay
#[derive(Default)]
struct FakeProvider {
    weather: HashMap<String, (Duration, Result<WeatherData, String>)>,
    searches: HashMap<String, (Duration, Result<Vec<CitySearchResult>, String>)>,
    weather_calls: Mutex<Vec<String>>,
    search_calls: Mutex<Vec<String>>,
}

impl FakeProvider {
    fn with_weather(mut self, city: &str, delay_ms: u64, result: Result<WeatherData, String>) -> Self {
        self.weather
            .insert(city.to_string(), (Duration::from_millis(delay_ms), result));
        self
    }

    fn with_search(mut self, query: &str, delay_ms: u64, result: Result<Vec<CitySearchResult>, String>) -> Self {
        self.searches
            .insert(query.to_string(), (Duration::from_millis(delay_ms), result));
        self
    }

    fn weather_calls(&self) -> Vec<String> {
        self.weather_calls.lock().unwrap().clone()
    }

    fn search_calls(&self) -> Vec<String> {
        self.search_calls.lock().unwrap().clone()
    }
}

fn api_error(message: &str) -> WeatherError {
    WeatherError::Api {
        status: 400,
        message: message.to_string(),
    }
}

impl WeatherProvider for FakeProvider {
    async fn current_weather(&self, city: &str) -> Result<WeatherData, WeatherError> {
        self.weather_calls.lock().unwrap().push(city.to_string());
        let Some((delay, result)) = self.weather.get(city).cloned() else {
            return Err(api_error("No matching location found."));
        };
        tokio::time::sleep(delay).await;
        result.map_err(|message| api_error(&message))
    }

    async fn search_cities(&self, query: &str) -> Result<Vec<CitySearchResult>, WeatherError> {
        self.search_calls.lock().unwrap().push(query.to_string());
        let Some((delay, result)) = self.searches.get(query).cloned() else {
            return Ok(Vec::new());
        };
        tokio::time::sleep(delay).await;
        result.map_err(|message| api_error(&message))
    }
}

/// Weather for `city` with local time one hour ahead of UTC
fn weather_for(city: &str, country: &str) -> WeatherData {
    WeatherData {
        location: Location {
            name: city.to_string(),
            country: country.to_string(),
            lat: 59.91,
            lon: 10.75,
            tz_id: "Europe/Oslo".to_string(),
            localtime_epoch: 1_700_000_000,
            localtime: "2023-11-14 23:13".to_string(),
            ..Location::default()
        },
        current: Current {
            temp_c: 4.0,
            condition: Condition {
                text: "Partly cloudy".to_string(),
                icon: "//cdn.weatherapi.com/weather/64x64/day/116.png".to_string(),
                code: 1003,
            },
            ..Current::default()
        },
    }
}

fn city(id: i64, name: &str, country: &str) -> CitySearchResult {
    CitySearchResult {
        id,
        name: name.to_string(),
        country: country.to_string(),
        ..CitySearchResult::default()
    }
}

fn controller(
    provider: FakeProvider,
) -> (WeatherController<FakeProvider>, Arc<FakeProvider>, Arc<InMemoryPreferences>) {
    let provider = Arc::new(provider);
    let preferences = Arc::new(InMemoryPreferences::default());
    let controller = WeatherController::with_debounce(
        Arc::clone(&provider),
        Arc::clone(&preferences) as Arc<dyn PreferencesRepository>,
        Handle::current(),
        DEBOUNCE,
    );
    (controller, provider, preferences)
}

#[tokio::test(start_paused = true)]
async fn test_load_moves_from_loading_to_success() {
    let (mut weather, _, _) =
        controller(FakeProvider::default().with_weather("Oslo", 100, Ok(weather_for("Oslo", "Norway"))));

    weather.load_weather_for_city("Oslo");
    assert_eq!(weather.state(), WeatherState::Loading);
    assert_eq!(weather.weather_icon_url(), None);

    tokio::time::sleep(Duration::from_millis(150)).await;
    match weather.state() {
        WeatherState::Success { data, location } => {
            assert_eq!(data.current.condition.text, "Partly cloudy");
            assert_eq!(location.city, "Oslo");
            assert_eq!(location.country, "Norway");
        }
        other => panic!("Expected success, got {:?}", other),
    }
    assert_eq!(weather.selected_city().as_deref(), Some("Oslo"));
    assert_eq!(
        weather.weather_icon_url().as_deref(),
        Some("https://cdn.weatherapi.com/weather/64x64/day/116.png")
    );
    assert_eq!(weather.utc_offset().map(|offset| offset.local_minus_utc()), Some(3600));
}

#[tokio::test(start_paused = true)]
async fn test_provider_failure_becomes_error_state() {
    let (mut weather, _, _) =
        controller(FakeProvider::default().with_weather("Atlantis", 10, Err("No matching location found.".into())));

    weather.load_weather_for_city("Atlantis");
    tokio::time::sleep(Duration::from_millis(50)).await;

    match weather.state() {
        WeatherState::Error(message) => assert!(message.contains("No matching location found.")),
        other => panic!("Expected error, got {:?}", other),
    }
    assert_eq!(weather.selected_city(), None);
    assert_eq!(weather.utc_offset(), None);
}

#[tokio::test(start_paused = true)]
async fn test_newer_load_wins_over_slower_older_load() {
    let (mut weather, provider, _) = controller(
        FakeProvider::default()
            .with_weather("Slow", 500, Ok(weather_for("Slow", "A")))
            .with_weather("Fast", 10, Ok(weather_for("Fast", "B"))),
    );

    weather.load_weather_for_city("Slow");
    tokio::time::sleep(Duration::from_millis(5)).await;
    weather.load_weather_for_city("Fast");

    tokio::time::sleep(Duration::from_secs(1)).await;
    match weather.state() {
        WeatherState::Success { location, .. } => assert_eq!(location.city, "Fast"),
        other => panic!("Expected success, got {:?}", other),
    }
    assert_eq!(weather.selected_city().as_deref(), Some("Fast"));
    assert_eq!(provider.weather_calls(), vec!["Slow", "Fast"]);
}

#[tokio::test(start_paused = true)]
async fn test_reload_shows_loading_again() {
    let (mut weather, _, _) =
        controller(FakeProvider::default().with_weather("Oslo", 10, Ok(weather_for("Oslo", "Norway"))));

    weather.load_weather_for_city("Oslo");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(matches!(weather.state(), WeatherState::Success { .. }));

    weather.load_weather_for_city("Oslo");
    assert_eq!(weather.state(), WeatherState::Loading);
}

#[tokio::test(start_paused = true)]
async fn test_debounce_coalesces_typing() {
    let (mut weather, provider, _) = controller(
        FakeProvider::default().with_search("Lon", 20, Ok(vec![city(1, "London", "United Kingdom")])),
    );

    for query in ["L", "Lo", "Lon"] {
        weather.update_search_query(query);
        tokio::time::sleep(Duration::from_millis(100)).await;
    }
    assert_eq!(weather.search_state(), CitySearchState::Initial, "Nothing runs while typing");
    assert!(provider.search_calls().is_empty());

    tokio::time::sleep(DEBOUNCE).await;
    assert_eq!(provider.search_calls(), vec!["Lon"]);
    assert_eq!(
        weather.search_state(),
        CitySearchState::Success(vec![city(1, "London", "United Kingdom")])
    );
}

#[tokio::test(start_paused = true)]
async fn test_blank_query_resets_to_initial() {
    let (mut weather, provider, _) = controller(FakeProvider::default());

    weather.update_search_query("Par");
    weather.update_search_query("   ");
    assert_eq!(weather.search_state(), CitySearchState::Initial);

    tokio::time::sleep(DEBOUNCE * 2).await;
    assert!(provider.search_calls().is_empty(), "Cleared query cancels the pending search");
    assert_eq!(weather.search_state(), CitySearchState::Initial);
}

#[tokio::test(start_paused = true)]
async fn test_immediate_search_reports_loading_then_results() {
    let (mut weather, provider, _) = controller(
        FakeProvider::default()
            .with_search("Par", 100, Ok(vec![city(1, "Paris", "France"), city(2, "Parma", "Italy")])),
    );

    weather.search_cities("Par");
    assert_eq!(weather.search_state(), CitySearchState::Loading);

    tokio::time::sleep(Duration::from_millis(150)).await;
    match weather.search_state() {
        CitySearchState::Success(cities) => assert_eq!(cities.len(), 2),
        other => panic!("Expected results, got {:?}", other),
    }
    assert_eq!(provider.search_calls(), vec!["Par"]);
}

#[tokio::test(start_paused = true)]
async fn test_search_without_matches_is_empty_and_failures_are_errors() {
    let (mut weather, _, _) =
        controller(FakeProvider::default().with_search("Boom", 10, Err("API key is invalid.".into())));

    weather.search_cities("Qqqq");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(weather.search_state(), CitySearchState::Empty);

    weather.search_cities("Boom");
    tokio::time::sleep(Duration::from_millis(50)).await;
    match weather.search_state() {
        CitySearchState::Error(message) => assert!(message.contains("API key is invalid.")),
        other => panic!("Expected error, got {:?}", other),
    }
}

#[tokio::test(start_paused = true)]
async fn test_stale_search_results_are_discarded() {
    let (mut weather, _, _) = controller(
        FakeProvider::default()
            .with_search("Ber", 500, Ok(vec![city(1, "Berlin", "Germany")]))
            .with_search("Bern", 10, Ok(vec![city(2, "Bern", "Switzerland")])),
    );

    weather.search_cities("Ber");
    tokio::time::sleep(Duration::from_millis(5)).await;
    weather.search_cities("Bern");

    tokio::time::sleep(Duration::from_secs(1)).await;
    assert_eq!(
        weather.search_state(),
        CitySearchState::Success(vec![city(2, "Bern", "Switzerland")])
    );
}

#[tokio::test(start_paused = true)]
async fn test_select_city_loads_persists_and_resets_search() {
    let (mut weather, _, preferences) = controller(
        FakeProvider::default()
            .with_search("Ky", 10, Ok(vec![city(7, "Kyoto", "Japan")]))
            .with_weather("Kyoto", 10, Ok(weather_for("Kyoto", "Japan"))),
    );

    weather.search_cities("Ky");
    tokio::time::sleep(Duration::from_millis(50)).await;
    let CitySearchState::Success(cities) = weather.search_state() else {
        panic!("Expected search results");
    };

    weather.select_city(&cities[0]);
    assert_eq!(weather.state(), WeatherState::Loading);
    assert_eq!(weather.search_state(), CitySearchState::Initial);
    assert_eq!(preferences.current_city().as_deref(), Some("Kyoto"));

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(weather.selected_city().as_deref(), Some("Kyoto"));
}

#[tokio::test(start_paused = true)]
async fn test_start_prefers_stored_city() {
    let (mut weather, provider, preferences) =
        controller(FakeProvider::default().with_weather("Lisbon", 10, Ok(weather_for("Lisbon", "Portugal"))));
    preferences.update_settings(SettingsModel {
        current_city: Some("Lisbon".to_string()),
        ..SettingsModel::default()
    });

    let (city, source) = weather.start(Some("Asia/Tokyo"));
    assert_eq!(city, "Lisbon");
    assert_eq!(source, CitySource::Stored);

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(provider.weather_calls(), vec!["Lisbon"]);
    assert!(matches!(weather.state(), WeatherState::Success { .. }));
}

#[tokio::test(start_paused = true)]
async fn test_start_falls_back_to_timezone_then_default() {
    let (mut weather, _, preferences) = controller(FakeProvider::default());
    let (city, source) = weather.start(Some("Asia/Tokyo"));
    assert_eq!((city.as_str(), source), ("Tokyo", CitySource::Timezone));
    assert_eq!(preferences.current_city().as_deref(), Some("Tokyo"));

    let (mut weather, _, preferences) = controller(FakeProvider::default());
    let (city, source) = weather.start(Some("Mars/Olympus_Mons"));
    assert_eq!((city.as_str(), source), ("Mumbai", CitySource::Default));
    assert_eq!(preferences.current_city().as_deref(), Some("Mumbai"));

    let (mut weather, _, _) = controller(FakeProvider::default());
    let (city, source) = weather.start(None);
    assert_eq!((city.as_str(), source), ("Mumbai", CitySource::Default));
}

#[tokio::test(start_paused = true)]
async fn test_change_hook_fires_on_publish() {
    let (mut weather, _, _) =
        controller(FakeProvider::default().with_weather("Oslo", 10, Ok(weather_for("Oslo", "Norway"))));
    let repaints = Arc::new(AtomicUsize::new(0));
    {
        let repaints = Arc::clone(&repaints);
        weather.set_change_hook(Arc::new(move || {
            repaints.fetch_add(1, Ordering::SeqCst);
        }));
    }

    weather.load_weather_for_city("Oslo");
    tokio::time::sleep(Duration::from_millis(50)).await;
    assert_eq!(repaints.load(Ordering::SeqCst), 1);
}
