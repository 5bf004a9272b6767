use std::path::Path;

use harvest_flow::HarvestPolicies;
use serde::{Deserialize, Serialize};

use crate::errors::CliError;

/// Full application configuration: browser attachment plus the per-stage
/// policy views the pipeline runs with. Every field has a default so an
/// empty file (or no file at all) yields a runnable configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub browser: BrowserSettings,
    pub policies: HarvestPolicies,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BrowserSettings {
    /// DevTools websocket of a browser to attach to; launch a fresh one when unset.
    pub ws_url: Option<String>,
    pub headless: bool,
}

impl Default for BrowserSettings {
    fn default() -> Self {
        Self {
            ws_url: None,
            headless: true,
        }
    }
}

impl AppConfig {
    /// Layered load: defaults, then an optional file, then environment
    /// variables prefixed `THREADHARVEST` (nested keys joined with `__`,
    /// e.g. `THREADHARVEST__BROWSER__HEADLESS=false`).
    pub fn load(path: Option<&Path>) -> Result<Self, CliError> {
        let mut builder = config::Config::builder();
        if let Some(path) = path {
            builder = builder.add_source(config::File::from(path));
        }
        let settings = builder
            .add_source(config::Environment::with_prefix("THREADHARVEST").separator("__"))
            .build()?;
        Ok(settings.try_deserialize()?)
    }
}

#[cfg(test)]
mod tests {
    use std::io::Write;

    use super::*;

    #[test]
    fn defaults_are_runnable() {
        let config = AppConfig::default();
        assert!(config.browser.headless);
        assert!(config.browser.ws_url.is_none());
        assert_eq!(config.policies.load.max_iterations, 50);
    }

    #[test]
    fn file_overrides_layer_on_defaults() {
        let mut file = tempfile::Builder::new()
            .suffix(".toml")
            .tempfile()
            .unwrap();
        writeln!(
            file,
            "[browser]\nheadless = false\n\n[policies.load]\nmax_iterations = 5"
        )
        .unwrap();

        let config = AppConfig::load(Some(file.path())).unwrap();
        assert!(!config.browser.headless);
        assert_eq!(config.policies.load.max_iterations, 5);
        // untouched sections keep their defaults
        assert_eq!(config.policies.load.stagnation_threshold, 3);
    }
}
