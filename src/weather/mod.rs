//! # Weather Module
//!
//! Current conditions for the selected city and the city search behind the
//! city dialog.
//!
//! ```text
//! WeatherState:     Loading ──► Success(data) | Error(message)
//! CitySearchState:  Initial ──► Loading ──► Success(cities) | Empty | Error(message)
//! ```

pub mod controller;
pub mod model;
pub mod provider;
pub mod state;

pub use controller::WeatherController;
pub use model::{CitySearchResult, Condition, Current, Location, ResolvedLocation, WeatherData};
pub use provider::{WeatherApiClient, WeatherError, WeatherProvider};
pub use state::{CitySearchState, WeatherState};
