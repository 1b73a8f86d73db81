//! Core library for the `wxlookup` weather widget.
//!
//! This crate defines:
//! - Configuration handling
//! - The weather provider abstraction and its WeatherAPI.com implementation
//! - Shared domain models (snapshots, units)
//! - The persisted preference store
//! - The widget state machine and its text rendering
//!
//! It is used by the `wxlookup` binary, but can also be driven by other front ends.

pub mod config;
pub mod error;
pub mod history;
pub mod model;
pub mod preference;
pub mod provider;
pub mod view;
pub mod widget;

#[cfg(test)]
pub(crate) mod testing;

pub use config::Config;
pub use error::{LookupError, ProviderError};
pub use history::SearchHistory;
pub use model::{TemperatureUnit, WeatherSnapshot};
pub use preference::{FileStore, MemoryStore, PreferenceStore};
pub use provider::{WeatherProvider, weatherapi::WeatherApiProvider};
pub use view::{Card, WidgetView};
pub use widget::{CompletedSearch, LookupState, PendingSearch, RequestId, SearchOutcome, Widget};
