use std::fmt;

use crate::{
    history::SearchHistory,
    model::{TemperatureUnit, WeatherSnapshot},
    widget::LookupState,
};

/// Text rendering of the whole widget: status line, card, recent searches.
#[derive(Debug, Clone, Copy)]
pub struct WidgetView<'a> {
    pub state: &'a LookupState,
    pub snapshot: Option<&'a WeatherSnapshot>,
    pub unit: TemperatureUnit,
    pub history: &'a SearchHistory,
}

impl fmt::Display for WidgetView<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.state {
            LookupState::Failed { message } => writeln!(f, "Error: {message}")?,
            LookupState::Loading { city, .. } => writeln!(f, "Loading {city}...")?,
            LookupState::Idle => {}
        }

        if let Some(snapshot) = self.snapshot {
            write!(f, "{}", Card { snapshot, unit: self.unit })?;
        }

        if !self.history.is_empty() {
            writeln!(f, "Recently Searched")?;
            let chips = self
                .history
                .iter()
                .enumerate()
                .map(|(idx, city)| format!("{}. {city}", idx + 1))
                .collect::<Vec<_>>()
                .join("  ");
            writeln!(f, "  {chips}")?;
        }

        Ok(())
    }
}

/// The weather card for a single snapshot.
#[derive(Debug, Clone, Copy)]
pub struct Card<'a> {
    pub snapshot: &'a WeatherSnapshot,
    pub unit: TemperatureUnit,
}

impl fmt::Display for Card<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let WeatherSnapshot { location, current } = self.snapshot;
        let (celsius, fahrenheit) = match self.unit {
            TemperatureUnit::Celsius => ("[Celsius]", "Fahrenheit"),
            TemperatureUnit::Fahrenheit => ("Celsius", "[Fahrenheit]"),
        };

        writeln!(f, "{location}")?;
        writeln!(f, "  Temperature: {}", self.snapshot.temperature_label(self.unit))?;
        writeln!(f, "  {celsius} / {fahrenheit}")?;
        writeln!(f, "  Condition: {}", current.condition.text)?;
        writeln!(f, "  Icon: {}", current.condition.icon_url())?;
        writeln!(f, "  Humidity: {} %", current.humidity)?;
        writeln!(f, "  Pressure: {} mb", current.pressure_mb)?;
        writeln!(f, "  Visibility: {} km", current.vis_km)?;
        if let Some(at) = self.snapshot.observed_at() {
            writeln!(f, "  Updated: {}", at.format("%Y-%m-%d %H:%M UTC"))?;
        }
        Ok(())
    }
}
