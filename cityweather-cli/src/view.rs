//! Terminal rendering of the view-model state.

use chrono::{DateTime, Utc};
use cityweather_core::{ViewState, WeatherViewModel};

/// Install the terminal renderer on the view model.
///
/// The callback fires on every state transition; intermediate transitions
/// while a query is in flight collapse into a single loading line.
pub fn attach(vm: &WeatherViewModel) {
    let mut was_loading = false;
    vm.set_render(move |state| {
        if state.loading {
            if !was_loading {
                println!("Loading...");
            }
            was_loading = true;
            return;
        }
        was_loading = false;
        render(state);
    });
}

fn render(state: &ViewState) {
    if let Some(error) = &state.error {
        println!("! {error}");
        return;
    }

    let Some(current) = &state.current else {
        return;
    };

    println!();
    println!("{}", current.location_name);
    println!("  {}  {}", current.temperature_display(), current.description);
    println!(
        "  humidity {}   wind {}",
        current.humidity_display(),
        current.wind_display()
    );

    if !state.forecast.is_empty() {
        println!();
        println!("Forecast (UTC):");
        for entry in &state.forecast {
            println!(
                "  {}  {:>5}  {}",
                format_step(&entry.timestamp_utc),
                format!("{}°C", entry.temperature_c.round() as i64),
                entry.description
            );
        }
    }
    println!();
}

fn format_step(timestamp: &DateTime<Utc>) -> String {
    timestamp.format("%a %H:%M").to_string()
}
