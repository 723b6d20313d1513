//! Drives weather loading and city search on the tokio runtime.
//!
//! The GUI thread calls into [`WeatherController`] and reads state snapshots
//! each frame; requests run as spawned tasks. A new load aborts the previous
//! load, a new search aborts the previous search (including one still waiting
//! out its debounce), and generation tags keep late results from landing.

use super::model::{CitySearchResult, ResolvedLocation};
use super::provider::WeatherProvider;
use super::state::{CitySearchState, Latest, WeatherState};
use crate::constants::SEARCH_DEBOUNCE;
use crate::location::{self, CitySource};
use crate::logger::log;
use crate::settings::PreferencesRepository;
use chrono::FixedOffset;
use std::sync::{Arc, Mutex};
use std::time::Duration;
use tokio::runtime::Handle;
use tokio::task::JoinHandle;

/// Fired after a task publishes a new state, e.g. to request a repaint
pub type ChangeHook = Arc<dyn Fn() + Send + Sync>;

type Slot<T> = Arc<Mutex<Latest<T>>>;

pub struct WeatherController<P: WeatherProvider> {
    provider: Arc<P>,
    preferences: Arc<dyn PreferencesRepository>,
    runtime: Handle,
    debounce: Duration,
    weather: Slot<WeatherState>,
    search: Slot<CitySearchState>,
    selected_city: Arc<Mutex<Option<String>>>,
    load_task: Option<JoinHandle<()>>,
    search_task: Option<JoinHandle<()>>,
    on_change: Option<ChangeHook>,
}

impl<P: WeatherProvider> WeatherController<P> {
    pub fn new(provider: Arc<P>, preferences: Arc<dyn PreferencesRepository>, runtime: Handle) -> Self {
        Self::with_debounce(provider, preferences, runtime, SEARCH_DEBOUNCE)
    }

    pub fn with_debounce(
        provider: Arc<P>,
        preferences: Arc<dyn PreferencesRepository>,
        runtime: Handle,
        debounce: Duration,
    ) -> Self {
        Self {
            provider,
            preferences,
            runtime,
            debounce,
            weather: Arc::new(Mutex::new(Latest::new(WeatherState::Loading))),
            search: Arc::new(Mutex::new(Latest::new(CitySearchState::Initial))),
            selected_city: Arc::new(Mutex::new(None)),
            load_task: None,
            search_task: None,
            on_change: None,
        }
    }

    pub fn set_change_hook(&mut self, hook: ChangeHook) {
        self.on_change = Some(hook);
    }

    pub fn state(&self) -> WeatherState {
        snapshot(&self.weather)
    }

    pub fn search_state(&self) -> CitySearchState {
        snapshot(&self.search)
    }

    /// City of the last successful load
    pub fn selected_city(&self) -> Option<String> {
        self.selected_city
            .lock()
            .map(|city| city.clone())
            .unwrap_or_default()
    }

    /// Absolute icon URL for the current conditions, only in `Success`
    pub fn weather_icon_url(&self) -> Option<String> {
        match self.state() {
            WeatherState::Success { data, .. } => data.icon_url(),
            _ => None,
        }
    }

    /// UTC offset of the loaded city, only in `Success`
    pub fn utc_offset(&self) -> Option<FixedOffset> {
        match self.state() {
            WeatherState::Success { data, .. } => data.utc_offset(),
            _ => None,
        }
    }

    /// Resolve the start-up city (stored, timezone, default) and load it.
    pub fn start(&mut self, system_zone: Option<&str>) -> (String, CitySource) {
        let (city, source) = location::resolve_startup_city(
            self.preferences.as_ref(),
            system_zone,
            &mut rand::thread_rng(),
        );
        self.load_weather_for_city(&city);
        (city, source)
    }

    /// Switch to `Loading` and fetch weather for `city`, replacing any
    /// in-flight load.
    pub fn load_weather_for_city(&mut self, city: &str) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
        let generation = begin(&self.weather, WeatherState::Loading);
        log::info!("Loading weather for {}", city);

        let provider = Arc::clone(&self.provider);
        let slot = Arc::clone(&self.weather);
        let selected_city = Arc::clone(&self.selected_city);
        let on_change = self.on_change.clone();
        let city = city.to_string();

        self.load_task = Some(self.runtime.spawn(async move {
            let next = match provider.current_weather(&city).await {
                Ok(data) => {
                    let location = ResolvedLocation::from(&data);
                    WeatherState::Success { data, location }
                }
                Err(e) => {
                    log::warn!("Weather for {} failed: {}", city, e);
                    WeatherState::Error(e.to_string())
                }
            };
            let succeeded = matches!(next, WeatherState::Success { .. });

            if publish(&slot, generation, next) {
                if succeeded {
                    if let Ok(mut selected) = selected_city.lock() {
                        *selected = Some(city);
                    }
                }
                notify(&on_change);
            }
        }));
    }

    /// Search right away, skipping the debounce (e.g. on Enter).
    pub fn search_cities(&mut self, query: &str) {
        self.abort_search();
        if query.trim().is_empty() {
            begin(&self.search, CitySearchState::Initial);
            return;
        }

        let generation = begin(&self.search, CitySearchState::Loading);
        self.search_task = Some(self.runtime.spawn(run_search(
            Arc::clone(&self.provider),
            Arc::clone(&self.search),
            generation,
            query.trim().to_string(),
            self.on_change.clone(),
        )));
    }

    /// Search after the query has been stable for the debounce period.
    /// Each call cancels the previous pending or in-flight search.
    pub fn update_search_query(&mut self, query: &str) {
        self.abort_search();
        if query.trim().is_empty() {
            begin(&self.search, CitySearchState::Initial);
            return;
        }

        let generation = reserve(&self.search);
        let provider = Arc::clone(&self.provider);
        let slot = Arc::clone(&self.search);
        let on_change = self.on_change.clone();
        let query = query.trim().to_string();
        let debounce = self.debounce;

        self.search_task = Some(self.runtime.spawn(async move {
            tokio::time::sleep(debounce).await;
            run_search(provider, slot, generation, query, on_change).await;
        }));
    }

    /// Load the chosen city, clear the search and remember the city.
    pub fn select_city(&mut self, city: &CitySearchResult) {
        log::info!("City selected: {}", city.label());
        self.load_weather_for_city(&city.name);
        self.reset_search();
        self.preferences.set_current_city(&city.name);
    }

    /// Cancel any search and return to `Initial`
    pub fn reset_search(&mut self) {
        self.abort_search();
        begin(&self.search, CitySearchState::Initial);
    }

    fn abort_search(&mut self) {
        if let Some(task) = self.search_task.take() {
            task.abort();
        }
    }
}

impl<P: WeatherProvider> Drop for WeatherController<P> {
    fn drop(&mut self) {
        if let Some(task) = self.load_task.take() {
            task.abort();
        }
        self.abort_search();
    }
}

async fn run_search<P: WeatherProvider>(
    provider: Arc<P>,
    slot: Slot<CitySearchState>,
    generation: u64,
    query: String,
    on_change: Option<ChangeHook>,
) {
    if publish(&slot, generation, CitySearchState::Loading) {
        notify(&on_change);
    }

    let next = match provider.search_cities(&query).await {
        Ok(cities) => {
            log::debug!("Search {:?} matched {} cities", query, cities.len());
            CitySearchState::from_results(cities)
        }
        Err(e) => {
            log::warn!("City search {:?} failed: {}", query, e);
            CitySearchState::Error(e.to_string())
        }
    };

    if publish(&slot, generation, next) {
        notify(&on_change);
    }
}

fn snapshot<T: Clone + Default>(slot: &Mutex<Latest<T>>) -> T {
    slot.lock().map(|latest| latest.get()).unwrap_or_default()
}

fn begin<T: Clone>(slot: &Mutex<Latest<T>>, value: T) -> u64 {
    match slot.lock() {
        Ok(mut latest) => latest.begin(value),
        Err(poisoned) => poisoned.into_inner().begin(value),
    }
}

fn reserve<T: Clone>(slot: &Mutex<Latest<T>>) -> u64 {
    match slot.lock() {
        Ok(mut latest) => latest.reserve(),
        Err(poisoned) => poisoned.into_inner().reserve(),
    }
}

fn publish<T: Clone>(slot: &Mutex<Latest<T>>, generation: u64, value: T) -> bool {
    slot.lock()
        .map(|mut latest| latest.publish(generation, value))
        .unwrap_or(false)
}

fn notify(hook: &Option<ChangeHook>) {
    if let Some(hook) = hook {
        hook();
    }
}
