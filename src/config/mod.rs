//! Process configuration: built-in defaults overlaid by an optional JSON file.
//!
//! Built once at startup and shared read-only afterwards. The API key is
//! never taken from the file, see [`ApiKey`].

mod secret;

pub use secret::ApiKey;

use anyhow::{Context, Result, bail};
use serde::Deserialize;
use serde_json::{Map, Value};
use std::io::ErrorKind;
use std::path::Path;
use tracing::{info, warn};

use crate::consts::{CONFIG_SECRET_KEY, DEFAULT_API_ENDPOINT, DEFAULT_MODEL};

/// Effective upstream configuration.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct Config {
    pub model_name: String,
    pub api_endpoint: String,
    /// OpenRouter provider routing preferences, forwarded verbatim.
    #[serde(default)]
    pub provider: Option<Value>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            model_name: DEFAULT_MODEL.to_string(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            provider: None,
        }
    }
}

impl Config {
    /// Load `path` over the defaults.
    ///
    /// A missing file is not an error. A file that is not a JSON object, or
    /// that gives a recognised key the wrong type, fails the load.
    pub fn load(path: &Path) -> Result<Self> {
        let mut merged = Self::default().to_map();

        match std::fs::read_to_string(path) {
            Ok(text) => {
                let parsed: Value = serde_json::from_str(&text)
                    .with_context(|| format!("failed to parse config file {}", path.display()))?;
                let Value::Object(file) = parsed else {
                    bail!("config file {} must contain a JSON object", path.display());
                };
                if overlay(&mut merged, file) {
                    warn!(
                        "{} found in {} - this value will be ignored. Use the environment variable instead.",
                        CONFIG_SECRET_KEY,
                        path.display()
                    );
                }
                info!("Configuration loaded from {}", path.display());
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                warn!("Configuration file {} not found, using defaults", path.display());
            }
            Err(e) => {
                return Err(e)
                    .with_context(|| format!("failed to read config file {}", path.display()));
            }
        }

        let config = Self::from_map(merged)
            .with_context(|| format!("invalid configuration in {}", path.display()))?;
        reqwest::Url::parse(&config.api_endpoint)
            .with_context(|| format!("api_endpoint is not a valid URL: {}", config.api_endpoint))?;
        Ok(config)
    }

    /// Build the typed view of an overlaid map. Unrecognised keys are ignored.
    pub fn from_map(map: Map<String, Value>) -> Result<Self> {
        serde_json::from_value(Value::Object(map)).context("configuration has the wrong shape")
    }

    fn to_map(&self) -> Map<String, Value> {
        let mut map = Map::new();
        map.insert("model_name".into(), Value::String(self.model_name.clone()));
        map.insert("api_endpoint".into(), Value::String(self.api_endpoint.clone()));
        if let Some(provider) = &self.provider {
            map.insert("provider".into(), provider.clone());
        }
        map
    }

    /// Provider preferences to forward upstream, if any.
    ///
    /// `null`, `false`, zero, and empty strings, arrays or objects all mean
    /// "not configured".
    pub fn provider(&self) -> Option<&Value> {
        self.provider.as_ref().filter(|v| is_truthy(v))
    }
}

/// Copy every key of `file` over `base`, skipping the secret key.
/// Returns whether the secret key was present.
pub fn overlay(base: &mut Map<String, Value>, file: Map<String, Value>) -> bool {
    let mut saw_secret = false;
    for (key, value) in file {
        if key == CONFIG_SECRET_KEY {
            saw_secret = true;
            continue;
        }
        base.insert(key, value);
    }
    saw_secret
}

fn is_truthy(value: &Value) -> bool {
    match value {
        Value::Null => false,
        Value::Bool(b) => *b,
        Value::Number(n) => n.as_f64().is_some_and(|f| f != 0.0),
        Value::String(s) => !s.is_empty(),
        Value::Array(a) => !a.is_empty(),
        Value::Object(o) => !o.is_empty(),
    }
}
