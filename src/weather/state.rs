//! Weather and city-search states.

use super::model::{CitySearchResult, ResolvedLocation, WeatherData};

#[derive(Debug, Clone, PartialEq, Default)]
pub enum WeatherState {
    #[default]
    Loading,
    Success {
        data: WeatherData,
        location: ResolvedLocation,
    },
    Error(String),
}

#[derive(Debug, Clone, PartialEq, Default)]
pub enum CitySearchState {
    /// No search performed, or the query was cleared
    #[default]
    Initial,
    Loading,
    Success(Vec<CitySearchResult>),
    /// The search ran and matched nothing
    Empty,
    Error(String),
}

impl CitySearchState {
    pub(crate) fn from_results(cities: Vec<CitySearchResult>) -> Self {
        if cities.is_empty() {
            Self::Empty
        } else {
            Self::Success(cities)
        }
    }
}

/// A value tagged with the request generation that may write it.
///
/// Each new request takes a fresh generation; results from older generations
/// are discarded, so a slow earlier request can never overwrite a newer one.
#[derive(Debug, Default)]
pub(crate) struct Latest<T> {
    generation: u64,
    value: T,
}

impl<T: Clone> Latest<T> {
    pub(crate) fn new(value: T) -> Self {
        Self {
            generation: 0,
            value,
        }
    }

    pub(crate) fn get(&self) -> T {
        self.value.clone()
    }

    /// Start a new generation and set its initial value.
    pub(crate) fn begin(&mut self, value: T) -> u64 {
        self.generation += 1;
        self.value = value;
        self.generation
    }

    /// Start a new generation keeping the current value.
    pub(crate) fn reserve(&mut self) -> u64 {
        self.generation += 1;
        self.generation
    }

    /// Store `value` if `generation` is still current.
    pub(crate) fn publish(&mut self, generation: u64, value: T) -> bool {
        if generation == self.generation {
            self.value = value;
            true
        } else {
            false
        }
    }
}
