/// Where the medication API lives unless overridden at build time
pub const DEFAULT_API_BASE: &str = "http://localhost:8080/api";

/// Runtime settings for the client
#[derive(Clone, Debug, PartialEq)]
pub struct ClientConfig {
    pub api_base: String,
    /// Network resync cadence
    pub poll_interval_ms: u32,
    /// Local countdown redraw cadence
    pub tick_interval_ms: u32,
    pub toast_duration_ms: u32,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let api_base = option_env!("MEDTRACK_API_BASE").unwrap_or(DEFAULT_API_BASE);
        Self {
            api_base: api_base.trim_end_matches('/').to_string(),
            poll_interval_ms: 5000,
            tick_interval_ms: 1000,
            toast_duration_ms: 6000,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use wasm_bindgen_test::*;

    wasm_bindgen_test_configure!(run_in_browser);

    #[wasm_bindgen_test]
    fn test_config_default() {
        let config = ClientConfig::default();
        assert_eq!(config.poll_interval_ms, 5000);
        assert_eq!(config.tick_interval_ms, 1000);
        assert_eq!(config.toast_duration_ms, 6000);
        assert!(!config.api_base.ends_with('/'));
    }
}
