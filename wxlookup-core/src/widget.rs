//! The weather widget: input buffer, current snapshot, recent searches and
//! unit preference, driven by search / select / toggle operations.
//!
//! A search is split in two halves so callers can run the fetch wherever
//! they like (inline or on a spawned task):
//!
//! 1. [`Widget::begin_search`] tags the search with a fresh [`RequestId`],
//!    moves the widget to [`LookupState::Loading`] and hands back a
//!    [`PendingSearch`].
//! 2. [`PendingSearch::run`] talks to the provider.
//! 3. [`Widget::finish_search`] applies the result, unless a newer search
//!    has started since, in which case the result is dropped.

use std::{fmt, sync::Arc};

use crate::{
    error::LookupError,
    history::SearchHistory,
    model::{TemperatureUnit, WeatherSnapshot},
    preference::{self, PreferenceStore},
    provider::WeatherProvider,
    view::WidgetView,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct RequestId(u64);

#[cfg(test)]
impl RequestId {
    pub(crate) fn first() -> Self {
        RequestId(1)
    }
}

impl fmt::Display for RequestId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Where the widget is in the search cycle.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum LookupState {
    #[default]
    Idle,
    Loading {
        request: RequestId,
        city: String,
    },
    Failed {
        message: String,
    },
}

/// A search that has been started but whose result is not yet known.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingSearch {
    id: RequestId,
    city: String,
}

impl PendingSearch {
    pub fn id(&self) -> RequestId {
        self.id
    }

    pub fn city(&self) -> &str {
        &self.city
    }

    pub async fn run(self, provider: &dyn WeatherProvider) -> CompletedSearch {
        let result = provider.current(&self.city).await.map_err(|err| {
            tracing::debug!(request = %self.id, city = %self.city, error = ?err, "Lookup failed");
            LookupError::from(err)
        });

        CompletedSearch {
            id: self.id,
            city: self.city,
            result,
        }
    }
}

#[derive(Debug, Clone)]
pub struct CompletedSearch {
    id: RequestId,
    city: String,
    result: Result<WeatherSnapshot, LookupError>,
}

impl CompletedSearch {
    pub fn new(pending: PendingSearch, result: Result<WeatherSnapshot, LookupError>) -> Self {
        Self {
            id: pending.id,
            city: pending.city,
            result,
        }
    }

    pub fn id(&self) -> RequestId {
        self.id
    }
}

/// What [`Widget::finish_search`] did with a result.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SearchOutcome {
    Applied,
    Failed(LookupError),
    /// A newer search was started; this result was dropped.
    Stale,
}

pub struct Widget<S> {
    provider: Arc<dyn WeatherProvider>,
    store: S,
    unit: TemperatureUnit,
    input: String,
    snapshot: Option<WeatherSnapshot>,
    history: SearchHistory,
    state: LookupState,
    last_request: u64,
}

impl<S: PreferenceStore> Widget<S> {
    /// Build a widget, reading the unit preference from `store`.
    pub fn new(provider: Arc<dyn WeatherProvider>, store: S) -> Self {
        let unit = preference::load_unit(&store);

        Self {
            provider,
            store,
            unit,
            input: String::new(),
            snapshot: None,
            history: SearchHistory::new(),
            state: LookupState::Idle,
            last_request: 0,
        }
    }

    pub fn set_input(&mut self, text: impl Into<String>) {
        self.input = text.into();
    }

    /// Start a search for the current input. Blank input starts nothing.
    pub fn begin_submit(&mut self) -> Option<PendingSearch> {
        let city = self.input.clone();
        self.begin_search(&city)
    }

    pub fn begin_search(&mut self, city: &str) -> Option<PendingSearch> {
        let city = city.trim();
        if city.is_empty() {
            return None;
        }

        self.last_request += 1;
        let id = RequestId(self.last_request);
        tracing::info!(request = %id, city, "Search started");

        self.state = LookupState::Loading {
            request: id,
            city: city.to_string(),
        };

        Some(PendingSearch {
            id,
            city: city.to_string(),
        })
    }

    pub fn finish_search(&mut self, done: CompletedSearch) -> SearchOutcome {
        let current = matches!(
            &self.state,
            LookupState::Loading { request, .. } if *request == done.id
        );
        if !current {
            tracing::debug!(request = %done.id, city = %done.city, "Discarding stale result");
            return SearchOutcome::Stale;
        }

        match done.result {
            Ok(snapshot) => {
                tracing::info!(request = %done.id, location = %snapshot.location, "Search applied");
                self.snapshot = Some(snapshot);
                self.history.record(&done.city);
                self.input.clear();
                self.state = LookupState::Idle;
                SearchOutcome::Applied
            }
            Err(err) => {
                tracing::info!(request = %done.id, error = %err, "Search failed");
                self.state = LookupState::Failed {
                    message: err.message().to_string(),
                };
                SearchOutcome::Failed(err)
            }
        }
    }

    /// Enter pressed: search for the current input and wait for the result.
    pub async fn submit_search(&mut self) -> Option<SearchOutcome> {
        let pending = self.begin_submit()?;
        Some(self.run_to_completion(pending).await)
    }

    /// Same as typing `city` and pressing Enter.
    pub async fn select_from_history(&mut self, city: &str) -> Option<SearchOutcome> {
        let pending = self.begin_search(city)?;
        Some(self.run_to_completion(pending).await)
    }

    async fn run_to_completion(&mut self, pending: PendingSearch) -> SearchOutcome {
        let provider = Arc::clone(&self.provider);
        let done = pending.run(provider.as_ref()).await;
        self.finish_search(done)
    }

    /// Flip Celsius/Fahrenheit and persist it. Never refetches.
    pub fn toggle_unit(&mut self) -> TemperatureUnit {
        self.set_unit(self.unit.toggled())
    }

    pub fn set_unit(&mut self, unit: TemperatureUnit) -> TemperatureUnit {
        self.unit = unit;
        if let Err(err) = preference::save_unit(&mut self.store, unit) {
            tracing::warn!(error = ?err, "Failed to persist unit preference");
        }
        self.unit
    }

    pub fn provider(&self) -> Arc<dyn WeatherProvider> {
        Arc::clone(&self.provider)
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    pub fn unit(&self) -> TemperatureUnit {
        self.unit
    }

    pub fn input(&self) -> &str {
        &self.input
    }

    pub fn snapshot(&self) -> Option<&WeatherSnapshot> {
        self.snapshot.as_ref()
    }

    pub fn history(&self) -> &SearchHistory {
        &self.history
    }

    pub fn state(&self) -> &LookupState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, LookupState::Loading { .. })
    }

    pub fn error(&self) -> Option<&str> {
        match &self.state {
            LookupState::Failed { message } => Some(message),
            _ => None,
        }
    }

    pub fn view(&self) -> WidgetView<'_> {
        WidgetView {
            state: &self.state,
            snapshot: self.snapshot.as_ref(),
            unit: self.unit,
            history: &self.history,
        }
    }
}

impl<S> fmt::Debug for Widget<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Widget")
            .field("unit", &self.unit)
            .field("input", &self.input)
            .field("state", &self.state)
            .field("history", &self.history)
            .field("has_snapshot", &self.snapshot.is_some())
            .finish()
    }
}
