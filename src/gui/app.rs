//! # Glowclock GUI Application Module
//!
//! The full-screen clock window: the clock face over an animated backdrop,
//! the weather line, the shortcut toast and the settings, help and city
//! dialogs.
//!
//! ## Architecture Overview
//!
//! egui rebuilds the UI every frame from the current state. Long-running
//! work (the auto-change timer, weather requests, debounced search) lives in
//! the controllers as tokio tasks; they publish state that this module reads
//! each frame and ask for a repaint when something changes.
//!
//! ## Input
//!
//! Key chords are turned into [`ShortcutAction`]s by [`crate::shortcuts`] and
//! applied here. Moving the pointer closes the app while exit-on-input is on
//! and no dialog is open.

use crate::clock::designs::{ClockDesign, DESIGNS};
use crate::clock::{ClockController, ClockTime};
use crate::config::WeatherConfig;
use crate::gui::face;
use crate::gui::toast::ToastState;
use crate::location;
use crate::logger::log;
use crate::settings::{PreferencesRepository, SettingsState};
use crate::shortcuts::{self, KeyEventState, ShortcutAction, SHORTCUTS};
use crate::weather::{CitySearchState, WeatherApiClient, WeatherController, WeatherState};
use chrono::{Local, NaiveDate, NaiveTime, Utc};
use eframe::egui;
use egui::{Align2, CentralPanel, Color32, Key, RichText};
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::runtime::Runtime;

/// Frame interval while the backdrop animates
const FRAME_INTERVAL: Duration = Duration::from_millis(33);

pub struct GlowclockApp {
    clock: ClockController,
    weather: WeatherController<WeatherApiClient>,
    settings: SettingsState,
    key_state: KeyEventState,
    toast: ToastState,

    show_city_dialog: bool,
    show_help_dialog: bool,
    /// Focus the search field on the next frame
    focus_search: bool,
    search_query: String,

    started_at: Instant,

    /// Keeps the controllers' tasks running. Declared last so the
    /// controllers abort their tasks before the runtime shuts down.
    _runtime: Runtime,
}

impl GlowclockApp {
    /// Build the app and start the background work.
    ///
    /// The stored design, shuffle and auto-play preferences are restored
    /// onto the clock controller before the timer starts, then the weather
    /// controller resolves the start-up city and begins loading it.
    pub fn new(
        cc: &eframe::CreationContext<'_>,
        runtime: Runtime,
        preferences: Arc<dyn PreferencesRepository>,
        weather_config: &WeatherConfig,
    ) -> Self {
        let settings = SettingsState::new(Arc::clone(&preferences));
        let stored = settings.settings();
        apply_theme(&cc.egui_ctx, stored.dark_theme);

        let mut clock = ClockController::new(runtime.handle().clone());
        let ctx = cc.egui_ctx.clone();
        clock.set_change_hook(Arc::new(move |_| ctx.request_repaint()));
        if !clock.set_design(stored.selected_design_id) {
            log::warn!("Ignoring stored design {}", stored.selected_design_id);
        }
        clock.set_shuffle(stored.shuffle_enabled);
        clock.set_auto_change(stored.auto_play_enabled);

        let provider = Arc::new(WeatherApiClient::new(weather_config));
        let mut weather = WeatherController::new(provider, preferences, runtime.handle().clone());
        let ctx = cc.egui_ctx.clone();
        weather.set_change_hook(Arc::new(move || ctx.request_repaint()));
        let (city, source) = weather.start(location::system_timezone().as_deref());
        log::info!("Starting with {} ({:?})", city, source);

        Self {
            clock,
            weather,
            settings,
            key_state: KeyEventState::default(),
            toast: ToastState::default(),
            show_city_dialog: false,
            show_help_dialog: false,
            focus_search: false,
            search_query: String::new(),
            started_at: Instant::now(),
            _runtime: runtime,
        }
    }

    fn any_dialog_open(&self) -> bool {
        self.settings.is_dialog_open() || self.show_help_dialog || self.show_city_dialog
    }

    /// Turn this frame's input into shortcut actions, and close the window
    /// on pointer movement when exit-on-input applies.
    fn handle_input(&mut self, ctx: &egui::Context) {
        let typing = ctx.wants_keyboard_input();
        let events = ctx.input(|i| i.events.clone());

        for action in shortcuts::handle_events(&events, typing, &self.key_state) {
            self.apply_action(ctx, action);
        }

        let pointer_moved = events
            .iter()
            .any(|event| matches!(event, egui::Event::PointerMoved(_)));
        if pointer_moved
            && shortcuts::should_exit_on_pointer(
                &self.key_state,
                self.any_dialog_open(),
                self.started_at.elapsed(),
            )
        {
            log::info!("Pointer moved, exiting");
            ctx.send_viewport_cmd(egui::ViewportCommand::Close);
        }
    }

    fn apply_action(&mut self, ctx: &egui::Context, action: ShortcutAction) {
        log::debug!("Shortcut action: {:?}", action);
        match action {
            ShortcutAction::CycleClockDesign => {
                let design_id = self.clock.cycle();
                self.settings.set_selected_design(design_id);
            }
            ShortcutAction::ToggleAutoChange => {
                let enabled = self.clock.toggle_auto_change();
                self.settings.set_auto_play(enabled);
            }
            ShortcutAction::ToggleShuffle => {
                let enabled = self.clock.toggle_shuffle();
                self.settings.set_shuffle(enabled);
            }
            ShortcutAction::ShowCityDialog => self.open_city_dialog(),
            ShortcutAction::ExitApplication => ctx.send_viewport_cmd(egui::ViewportCommand::Close),
            ShortcutAction::ToggleExitOnInput => {
                self.key_state.exit_on_input_enabled = !self.key_state.exit_on_input_enabled;
                log::info!("Exit on input: {}", self.key_state.exit_on_input_enabled);
            }
            ShortcutAction::OpenSettings => self.settings.open_dialog(),
            ShortcutAction::ShowHelp => self.show_help_dialog = true,
            ShortcutAction::ToggleTheme => {
                let dark = self.settings.toggle_theme();
                apply_theme(ctx, dark);
            }
            ShortcutAction::ShowToast(message) => self.toast.show(message),
        }
    }

    fn open_city_dialog(&mut self) {
        self.show_city_dialog = true;
        self.focus_search = true;
    }

    fn close_city_dialog(&mut self) {
        self.show_city_dialog = false;
        self.search_query.clear();
        self.weather.reset_search();
    }

    /// Local time of the weather city, falling back to the system clock
    /// until the city's offset is known.
    fn display_time(&self) -> (NaiveTime, NaiveDate) {
        match self.weather.utc_offset() {
            Some(offset) => {
                let now = Utc::now().with_timezone(&offset);
                (now.time(), now.date_naive())
            }
            None => {
                let now = Local::now();
                (now.time(), now.date_naive())
            }
        }
    }

    fn weather_line(&self) -> (String, Option<Color32>) {
        match self.weather.state() {
            WeatherState::Loading => ("Loading weather...".to_string(), None),
            WeatherState::Success { data, location } => {
                let place = if location.country.is_empty() {
                    location.city
                } else {
                    format!("{}, {}", location.city, location.country)
                };
                let text = format!(
                    "{}  ·  {:.0}°C  ·  {}",
                    place, data.current.temp_c, data.current.condition.text
                );
                (text, None)
            }
            WeatherState::Error(message) => (format!("Weather unavailable: {}", message), Some(Color32::LIGHT_RED)),
        }
    }

    fn draw_clock_face(&mut self, ctx: &egui::Context) {
        let prefs = self.settings.settings();
        let design: &ClockDesign = ClockDesign::for_id(self.clock.design_id());
        let (time, date) = self.display_time();
        let elapsed = self.started_at.elapsed().as_secs_f32();
        let backdrop = face::backdrop_color(elapsed, prefs.dark_theme);
        let (weather_text, weather_color) = self.weather_line();

        CentralPanel::default()
            .frame(egui::Frame::NONE.fill(backdrop))
            .show(ctx, |ui| {
                let full = ui.max_rect();
                let clock_rect = egui::Rect::from_center_size(
                    full.center() - egui::vec2(0.0, full.height() * 0.08),
                    egui::vec2(full.width(), full.height() * 0.6),
                );
                face::paint_clock(
                    ui,
                    clock_rect,
                    design,
                    ClockTime::new(&time, prefs.use_24_hour),
                    prefs.use_24_hour,
                    prefs.dark_theme,
                );

                let text_color = if prefs.dark_theme {
                    Color32::from_gray(200)
                } else {
                    Color32::from_gray(60)
                };
                let painter = ui.painter();
                let mut y = clock_rect.bottom() + 8.0;
                painter.text(
                    egui::pos2(full.center().x, y),
                    Align2::CENTER_TOP,
                    date.format("%A, %d %B").to_string(),
                    egui::FontId::proportional(28.0),
                    text_color,
                );
                y += 40.0;
                painter.text(
                    egui::pos2(full.center().x, y),
                    Align2::CENTER_TOP,
                    weather_text,
                    egui::FontId::proportional(22.0),
                    weather_color.unwrap_or(text_color),
                );

                let mut status = Vec::new();
                if self.clock.is_auto_change_enabled() {
                    status.push("Auto");
                }
                if self.clock.is_shuffle_enabled() {
                    status.push("Shuffle");
                }
                if !status.is_empty() {
                    painter.text(
                        full.right_bottom() - egui::vec2(16.0, 16.0),
                        Align2::RIGHT_BOTTOM,
                        format!("{}  ·  {}", design.name, status.join(" + ")),
                        egui::FontId::proportional(14.0),
                        text_color.gamma_multiply(0.6),
                    );
                }
            });
    }

    fn draw_toast(&mut self, ctx: &egui::Context) {
        let Some(message) = self.toast.visible_message(Instant::now()) else {
            return;
        };
        let message = message.to_string();
        egui::Area::new(egui::Id::new("shortcut_toast"))
            .anchor(Align2::CENTER_BOTTOM, egui::vec2(0.0, -48.0))
            .interactable(false)
            .show(ctx, |ui| {
                egui::Frame::popup(ui.style()).show(ui, |ui| {
                    ui.label(RichText::new(message).size(18.0));
                });
            });
    }

    /// Settings dialog
    fn show_settings_window(&mut self, ctx: &egui::Context) {
        let mut open = true;
        let mut close_clicked = false;
        let mut change_city = false;
        let prefs = self.settings.settings();

        egui::Window::new("Settings")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                ui.heading("Appearance");
                let mut dark = prefs.dark_theme;
                if ui.checkbox(&mut dark, "Dark theme").changed() {
                    self.settings.set_theme(dark);
                    apply_theme(ctx, dark);
                }
                ui.horizontal(|ui| {
                    ui.label("Clock format:");
                    let mut use_24_hour = prefs.use_24_hour;
                    let changed = ui.radio_value(&mut use_24_hour, false, "12-hour").changed()
                        | ui.radio_value(&mut use_24_hour, true, "24-hour").changed();
                    if changed {
                        self.settings.set_clock_format(use_24_hour);
                    }
                });

                ui.separator();
                ui.heading("Weather");
                ui.horizontal(|ui| {
                    ui.label("City:");
                    let city = prefs.current_city.as_deref().unwrap_or("Auto (Timezone)");
                    ui.label(RichText::new(city).strong());
                    if ui.button("Change...").clicked() {
                        change_city = true;
                    }
                });
                if let WeatherState::Success { data, .. } = self.weather.state() {
                    ui.horizontal(|ui| {
                        ui.label(format!("Now: {}, {:.0}°C", data.current.condition.text, data.current.temp_c));
                        if let Some(icon_url) = self.weather.weather_icon_url() {
                            ui.hyperlink_to("icon", icon_url);
                        }
                    });
                }

                ui.separator();
                ui.heading("Playback");
                let mut auto_play = self.clock.is_auto_change_enabled();
                if ui
                    .checkbox(&mut auto_play, "Auto-change design every 10 seconds")
                    .changed()
                {
                    self.clock.set_auto_change(auto_play);
                    self.settings.set_auto_play(auto_play);
                }
                let mut shuffle = self.clock.is_shuffle_enabled();
                if ui.checkbox(&mut shuffle, "Shuffle designs").changed() {
                    self.clock.set_shuffle(shuffle);
                    self.settings.set_shuffle(shuffle);
                }

                ui.separator();
                ui.heading("Design");
                let mut design_id = self.clock.design_id();
                let mut picked = false;
                egui::Grid::new("design_grid").num_columns(2).show(ui, |ui| {
                    for (index, design) in DESIGNS.iter().enumerate() {
                        picked |= ui.radio_value(&mut design_id, design.id, design.name).changed();
                        if index % 2 == 1 {
                            ui.end_row();
                        }
                    }
                });
                if picked && self.clock.set_design(design_id) {
                    self.settings.set_selected_design(design_id);
                }

                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    close_clicked = true;
                }
            });

        if !open || close_clicked {
            self.settings.close_dialog();
        }
        if change_city {
            self.settings.close_dialog();
            self.open_city_dialog();
        }
    }

    /// Shortcut reference
    fn show_help_window(&mut self, ctx: &egui::Context) {
        let mut open = true;
        let mut close_clicked = false;

        egui::Window::new("Keyboard Shortcuts")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                egui::Grid::new("shortcut_grid")
                    .num_columns(2)
                    .spacing([24.0, 6.0])
                    .show(ui, |ui| {
                        for (chord, description) in SHORTCUTS {
                            ui.label(RichText::new(chord).monospace().strong());
                            ui.label(description);
                            ui.end_row();
                        }
                    });

                ui.add_space(8.0);
                ui.horizontal(|ui| {
                    if ui.button("Exit App").clicked() {
                        ctx.send_viewport_cmd(egui::ViewportCommand::Close);
                    }
                    if ui.button("Close").clicked() {
                        close_clicked = true;
                    }
                });
            });

        if !open || close_clicked {
            self.show_help_dialog = false;
        }
    }

    /// City search dialog
    fn show_city_window(&mut self, ctx: &egui::Context) {
        let mut open = true;
        let mut close_clicked = false;
        let mut selected = None;
        let search_state = self.weather.search_state();

        egui::Window::new("Select City")
            .open(&mut open)
            .collapsible(false)
            .resizable(false)
            .default_width(360.0)
            .anchor(Align2::CENTER_CENTER, egui::vec2(0.0, 0.0))
            .show(ctx, |ui| {
                let response = ui.add(
                    egui::TextEdit::singleline(&mut self.search_query)
                        .hint_text("Search for a city")
                        .desired_width(f32::INFINITY),
                );
                if self.focus_search {
                    response.request_focus();
                    self.focus_search = false;
                }
                if response.changed() {
                    self.weather.update_search_query(&self.search_query);
                }
                if response.lost_focus() && ui.input(|i| i.key_pressed(Key::Enter)) {
                    self.weather.search_cities(&self.search_query);
                }

                ui.add_space(6.0);
                egui::ScrollArea::vertical().max_height(280.0).show(ui, |ui| match &search_state {
                    CitySearchState::Initial => {
                        ui.label(RichText::new("Type to search for a city").italics());
                    }
                    CitySearchState::Loading => {
                        ui.horizontal(|ui| {
                            ui.spinner();
                            ui.label("Searching...");
                        });
                    }
                    CitySearchState::Success(cities) => {
                        for city in cities {
                            if ui.selectable_label(false, city.label()).clicked() {
                                selected = Some(city.clone());
                            }
                        }
                    }
                    CitySearchState::Empty => {
                        ui.label("No cities found");
                    }
                    CitySearchState::Error(message) => {
                        ui.colored_label(Color32::LIGHT_RED, message);
                    }
                });

                ui.add_space(8.0);
                if ui.button("Close").clicked() {
                    close_clicked = true;
                }
            });

        if let Some(city) = selected {
            self.weather.select_city(&city);
            self.close_city_dialog();
        } else if !open || close_clicked {
            self.close_city_dialog();
        }
    }
}

impl eframe::App for GlowclockApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        self.handle_input(ctx);

        if self.any_dialog_open() {
            ctx.set_cursor_icon(egui::CursorIcon::Default);
        } else {
            ctx.set_cursor_icon(egui::CursorIcon::None);
        }

        self.draw_clock_face(ctx);
        if self.settings.is_dialog_open() {
            self.show_settings_window(ctx);
        }
        if self.show_help_dialog {
            self.show_help_window(ctx);
        }
        if self.show_city_dialog {
            self.show_city_window(ctx);
        }
        self.draw_toast(ctx);

        ctx.request_repaint_after(FRAME_INTERVAL);
    }
}

fn apply_theme(ctx: &egui::Context, dark: bool) {
    ctx.set_visuals(if dark {
        egui::Visuals::dark()
    } else {
        egui::Visuals::light()
    });
}
