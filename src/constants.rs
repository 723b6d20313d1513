//! # Application Constants
//!
//! Application-wide constants: weather service endpoints, timing values for the
//! clock and search state machines, and fallback values for city resolution.

use std::time::Duration;

/// Base URL of the WeatherAPI.com-compatible weather service
pub const WEATHER_API_BASE_URL: &str = "https://api.weatherapi.com/v1";

/// Current conditions endpoint, relative to the base URL
pub const CURRENT_WEATHER_ENDPOINT: &str = "/current.json";

/// City search endpoint, relative to the base URL
pub const CITY_SEARCH_ENDPOINT: &str = "/search.json";

/// Environment variable holding the weather API key
pub const WEATHER_API_KEY_ENV: &str = "WEATHERAPI";

/// Default timeout for a single weather request (seconds)
pub const DEFAULT_REQUEST_TIMEOUT_SECONDS: u64 = 30;

/// Number of clock-face designs available
pub const DESIGN_COUNT: u8 = 8;

/// How often auto-change advances the clock design
pub const AUTO_CHANGE_INTERVAL: Duration = Duration::from_secs(10);

/// Quiet period after the last keystroke before a city search is sent
pub const SEARCH_DEBOUNCE: Duration = Duration::from_millis(300);

/// How long a shortcut toast stays on screen
pub const TOAST_DURATION: Duration = Duration::from_millis(1500);

/// Pointer movement is ignored for this long after start-up so the window
/// appearing under the cursor does not close the app
pub const EXIT_GRACE_PERIOD: Duration = Duration::from_secs(2);

/// City used when neither a stored preference nor the timezone resolves one
pub const DEFAULT_CITY: &str = "Mumbai";

/// Set to run in a maximised window instead of fullscreen
pub const WINDOWED_ENV: &str = "GLOWCLOCK_WINDOWED";

/// Set to keep preferences in memory only
pub const EPHEMERAL_ENV: &str = "GLOWCLOCK_EPHEMERAL";
