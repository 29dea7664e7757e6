//! Project-wide constants.

use std::time::Duration;

/// Default OpenRouter model when the config file does not name one.
pub const DEFAULT_MODEL: &str = "moonshotai/kimi-k2-thinking";

/// Default chat-completion endpoint.
pub const DEFAULT_API_ENDPOINT: &str = "https://openrouter.ai/api/v1/chat/completions";

/// Environment variable holding the upstream API key.
pub const API_KEY_ENV: &str = "wenyantrans_openrouter_apikey";

/// Config file key that must never be honoured. The key comes from the environment only.
pub const CONFIG_SECRET_KEY: &str = "openrouter_api_key";

/// Default config file path, relative to the working directory.
pub const DEFAULT_CONFIG_PATH: &str = "config.json";

/// Default directory holding `index.html` and its assets.
pub const DEFAULT_STATIC_DIR: &str = "static";

pub const DEFAULT_HOST: &str = "127.0.0.1";
pub const DEFAULT_PORT: u16 = 1201;

/// Identification headers OpenRouter uses for app attribution.
pub const REFERER: &str = "https://wenyantrans.app";
pub const APP_TITLE: &str = "WenYanTrans";

/// Upper bound on a full analysis call.
pub const ANALYZE_TIMEOUT: Duration = Duration::from_secs(60);

/// Upper bound on the health probe.
pub const PROBE_TIMEOUT: Duration = Duration::from_secs(10);

/// `max_tokens` for the health probe. Just enough to prove the model answers.
pub const PROBE_MAX_TOKENS: u32 = 5;

/// Operator-facing message when the API key is missing.
pub fn missing_key_message() -> String {
    format!(
        "API key not configured. Please set environment variable {} and restart the application.",
        API_KEY_ENV
    )
}
