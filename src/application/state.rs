//! Application state for the state/city picker.
//!
//! [`App`] is the single view-state struct. Data only changes through the
//! named operations: [`App::begin_state_load`] and [`App::apply_states`]
//! for the state list, [`App::select_state`] for the selection, and
//! [`App::confirm_selection`] and [`App::apply_cities`] for the city list.
//! The remaining methods drive dropdown navigation and scrolling.

use super::loading::LoadingFlag;
use super::requests::{AppEvent, CitiesOutcome, CityRequest, StatesOutcome, StatesRequest};
use crate::domain::{City, State, sort_cities};
use crate::infrastructure::AbortToken;

/// Text shown in the dropdown before a state is chosen.
pub const PLACEHOLDER_LABEL: &str = "Selecione um estado";

/// Which header control receives Enter.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Focus {
    Dropdown,
    Trigger,
}

/// One entry of the dropdown, placeholder included.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DropdownOption<'a> {
    /// Empty for the placeholder, the state abbreviation otherwise.
    pub value: &'a str,
    pub label: &'a str,
    pub disabled: bool,
}

/// What the main area shows.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CityView<'a> {
    /// A fetch is in flight; any previous cities are hidden.
    Loading,
    Cities(&'a [City]),
    /// Nothing fetched yet, or the last fetch returned no cities.
    Empty,
}

/// View state of the picker.
///
/// # Examples
///
/// ```
/// use ufcities::application::App;
///
/// let mut app = App::default();
/// assert!(!app.trigger_enabled());
///
/// app.select_state("SP");
/// assert!(app.trigger_enabled());
/// assert_eq!(app.selected_state(), Some("SP"));
/// ```
#[derive(Debug)]
pub struct App {
    states: Vec<State>,
    selected_state: Option<String>,
    cities: Vec<City>,
    trigger_enabled: bool,
    placeholder_disabled: bool,
    loading: LoadingFlag,
    states_requested: bool,
    current_request: Option<u64>,
    next_request_id: u64,
    root_abort: AbortToken,
    /// Header control that receives Enter
    pub focus: Focus,
    /// Whether the dropdown option list is expanded
    pub dropdown_open: bool,
    /// Index into [`App::options`] under the dropdown cursor
    pub highlighted: usize,
    /// First visible row of the city list
    pub city_scroll: usize,
}

impl Default for App {
    fn default() -> Self {
        Self {
            states: Vec::new(),
            selected_state: None,
            cities: Vec::new(),
            trigger_enabled: false,
            placeholder_disabled: false,
            loading: LoadingFlag::new(),
            states_requested: false,
            current_request: None,
            next_request_id: 1,
            root_abort: AbortToken::new(),
            focus: Focus::Dropdown,
            dropdown_open: false,
            highlighted: 0,
            city_scroll: 0,
        }
    }
}

impl Drop for App {
    fn drop(&mut self) {
        self.shutdown();
    }
}

impl App {
    pub fn states(&self) -> &[State] {
        &self.states
    }

    pub fn cities(&self) -> &[City] {
        &self.cities
    }

    pub fn selected_state(&self) -> Option<&str> {
        self.selected_state.as_deref()
    }

    /// Display name of the selected state, if the list contains it.
    pub fn selected_state_name(&self) -> Option<&str> {
        let selected = self.selected_state.as_deref()?;
        self.states
            .iter()
            .find(|s| s.abbreviation == selected)
            .map(|s| s.name.as_str())
    }

    pub fn trigger_enabled(&self) -> bool {
        self.trigger_enabled
    }

    pub fn placeholder_disabled(&self) -> bool {
        self.placeholder_disabled
    }

    pub fn is_loading(&self) -> bool {
        self.loading.is_loading()
    }

    /// The trigger accepts a confirm only after a selection and while no
    /// city fetch is in flight.
    pub fn can_confirm(&self) -> bool {
        self.trigger_enabled && !self.is_loading()
    }

    /// Starts the state list load. Only the first call returns a request,
    /// so redraws and repeated startup paths never fetch twice.
    pub fn begin_state_load(&mut self) -> Option<StatesRequest> {
        if self.states_requested {
            tracing::debug!("state list already requested");
            return None;
        }
        self.states_requested = true;
        Some(StatesRequest {
            abort: self.root_abort.child(),
        })
    }

    /// Stores the fetched state list verbatim. Failures are logged and
    /// leave the list as it was.
    pub fn apply_states(&mut self, outcome: StatesOutcome) {
        if outcome.abort.is_aborted() {
            tracing::debug!("discarding state list from aborted request");
            return;
        }

        match outcome.result {
            Ok(states) => {
                tracing::info!(count = states.len(), "state list loaded");
                self.states = states;
                self.clamp_highlight();
            }
            Err(err) if err.is_aborted() => {
                tracing::debug!("state list request aborted");
            }
            Err(err) => {
                tracing::error!(error = %err, "failed to load state list");
            }
        }
    }

    /// Records a dropdown change.
    ///
    /// The first non-empty value enables the trigger and disables the
    /// placeholder for good. Later calls only replace the selection. An
    /// empty value is the placeholder itself and is ignored.
    pub fn select_state(&mut self, value: &str) {
        if value.is_empty() {
            tracing::debug!("ignoring placeholder selection");
            return;
        }

        tracing::info!(uf = value, "state selected");
        self.selected_state = Some(value.to_string());
        self.trigger_enabled = true;
        self.placeholder_disabled = true;
    }

    /// Starts a city fetch for the current selection.
    ///
    /// Returns `None` when [`App::can_confirm`] is false. Otherwise the
    /// loading flag is raised before this returns, and the request carries
    /// the guard that lowers it again.
    pub fn confirm_selection(&mut self) -> Option<CityRequest> {
        if !self.can_confirm() {
            tracing::debug!(
                trigger_enabled = self.trigger_enabled,
                loading = self.is_loading(),
                "confirm ignored"
            );
            return None;
        }
        let uf = self.selected_state.clone()?;

        let id = self.next_request_id;
        self.next_request_id += 1;
        self.current_request = Some(id);
        self.city_scroll = 0;

        tracing::info!(uf = %uf, request = id, "fetching cities");
        Some(CityRequest {
            id,
            uf,
            abort: self.root_abort.child(),
            loading: self.loading.acquire(),
        })
    }

    /// Applies a finished city fetch.
    ///
    /// Aborted and superseded outcomes are dropped. A successful result is
    /// sorted by name before it replaces the city list. The loading guard is
    /// released last, so the renderer never sees the flag down with the old
    /// list still in place.
    pub fn apply_cities(&mut self, outcome: CitiesOutcome) {
        let CitiesOutcome {
            id,
            uf,
            result,
            abort,
            loading,
        } = outcome;

        if abort.is_aborted() {
            tracing::debug!(uf = %uf, request = id, "discarding cities from aborted request");
            return;
        }
        if self.current_request != Some(id) {
            tracing::debug!(uf = %uf, request = id, "discarding superseded city response");
            return;
        }
        self.current_request = None;

        match result {
            Ok(mut cities) => {
                sort_cities(&mut cities);
                tracing::info!(uf = %uf, count = cities.len(), "cities loaded");
                self.cities = cities;
                self.city_scroll = 0;
            }
            Err(err) if err.is_aborted() => {
                tracing::debug!(uf = %uf, "city request aborted");
            }
            Err(err) => {
                tracing::error!(uf = %uf, error = %err, "failed to load cities");
            }
        }

        drop(loading);
    }

    pub fn apply_event(&mut self, event: AppEvent) {
        match event {
            AppEvent::States(outcome) => self.apply_states(outcome),
            AppEvent::Cities(outcome) => self.apply_cities(outcome),
        }
    }

    /// Aborts every outstanding request. Results that arrive afterwards
    /// are discarded.
    pub fn shutdown(&mut self) {
        if !self.root_abort.is_aborted() {
            tracing::debug!("aborting outstanding requests");
            self.root_abort.abort();
        }
    }

    /// The dropdown entries: the placeholder, then the states in the order
    /// they were received.
    pub fn options(&self) -> Vec<DropdownOption<'_>> {
        let placeholder = DropdownOption {
            value: "",
            label: PLACEHOLDER_LABEL,
            disabled: self.placeholder_disabled,
        };
        std::iter::once(placeholder)
            .chain(self.states.iter().map(|s| DropdownOption {
                value: &s.abbreviation,
                label: &s.name,
                disabled: false,
            }))
            .collect()
    }

    pub fn city_view(&self) -> CityView<'_> {
        if self.is_loading() {
            CityView::Loading
        } else if self.cities.is_empty() {
            CityView::Empty
        } else {
            CityView::Cities(&self.cities)
        }
    }

    pub fn toggle_focus(&mut self) {
        self.focus = match self.focus {
            Focus::Dropdown => Focus::Trigger,
            Focus::Trigger => Focus::Dropdown,
        };
        self.dropdown_open = false;
    }

    /// Expands the dropdown with the cursor on the current selection.
    pub fn open_dropdown(&mut self) {
        self.focus = Focus::Dropdown;
        self.dropdown_open = true;
        self.highlighted = self
            .selected_state
            .as_deref()
            .and_then(|uf| self.states.iter().position(|s| s.abbreviation == uf))
            .map(|i| i + 1)
            .unwrap_or(0);
        self.clamp_highlight();
    }

    pub fn close_dropdown(&mut self) {
        self.dropdown_open = false;
    }

    /// Moves the dropdown cursor, never onto a disabled placeholder.
    pub fn move_highlight(&mut self, delta: isize) {
        let last = self.states.len();
        let target = self.highlighted.saturating_add_signed(delta).min(last);
        self.highlighted = target;
        self.clamp_highlight();
    }

    /// Commits the highlighted option as the selection and closes the
    /// dropdown.
    pub fn commit_highlighted(&mut self) {
        let value = self
            .options()
            .get(self.highlighted)
            .filter(|option| !option.disabled)
            .map(|option| option.value.to_string());
        if let Some(value) = value {
            self.select_state(&value);
        }
        self.dropdown_open = false;
    }

    pub fn scroll_cities(&mut self, delta: isize) {
        let max = self.cities.len().saturating_sub(1);
        self.city_scroll = self.city_scroll.saturating_add_signed(delta).min(max);
    }

    fn clamp_highlight(&mut self) {
        let last = self.states.len();
        let first = if self.placeholder_disabled && last > 0 { 1 } else { 0 };
        self.highlighted = self.highlighted.clamp(first, last);
    }
}
