use gloo::timers::callback::Interval;
use yew::prelude::*;

use crate::services::logging::Logger;

/// Configuration for periodic refresh behavior
#[derive(Clone, PartialEq)]
pub struct PeriodicRefreshConfig {
    /// Shows up in log lines
    pub name: &'static str,
    pub interval_ms: u32,
}

impl PeriodicRefreshConfig {
    pub fn every(name: &'static str, interval_ms: u32) -> Self {
        Self { name, interval_ms }
    }
}

/// Run `refresh_fn` every `interval_ms` while `pause_when` is false.
///
/// The timer is dropped (and so cancelled) as soon as `pause_when` flips to
/// true, the config changes, or the component unmounts. There is no retry
/// or backoff: a failed refresh simply waits for the next tick.
#[hook]
pub fn use_periodic_refresh(
    config: PeriodicRefreshConfig,
    refresh_fn: Callback<()>,
    pause_when: bool,
) {
    use_effect_with((config, refresh_fn, pause_when), move |(config, refresh_fn, is_paused)| {
        let interval = if *is_paused {
            None
        } else {
            Logger::debug_with_component(
                "periodic-refresh-hook",
                &format!("{} timer started ({}ms)", config.name, config.interval_ms),
            );

            let refresh_fn = refresh_fn.clone();
            Some(Interval::new(config.interval_ms, move || refresh_fn.emit(())))
        };

        let name = config.name;
        move || {
            if interval.is_some() {
                Logger::debug_with_component("periodic-refresh-hook", &format!("{} timer stopped", name));
            }
            drop(interval);
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_config_every() {
        let config = PeriodicRefreshConfig::every("poll", 5000);
        assert_eq!(config.name, "poll");
        assert_eq!(config.interval_ms, 5000);
    }
}
