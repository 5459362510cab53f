//! Build-time configuration with an optional runtime override.
//!
//! Values come from `option_env!` at compile time; a `window.SHEHER_CONFIG`
//! object (if present) overrides them so a static deployment can repoint the
//! API without rebuilding. Configuration values are public; do not store
//! secrets here.

#[cfg(test)]
#[path = "config_test.rs"]
mod config_test;

const DEFAULT_API_BASE_URL: &str = "http://localhost:6001";
const DEFAULT_NEWS_API_BASE_URL: &str = "https://newsapi.org/v2";
const DEFAULT_CITY: &str = "Jaipur";
const DEFAULT_NEWS_REFRESH_SECS: u32 = 300;

/// Frontend configuration.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct AppConfig {
    pub api_base_url: String,
    pub news_api_base_url: String,
    pub news_api_key: String,
    /// City used for news when no profile city is known.
    pub default_city: String,
    /// Home page news auto-refresh period.
    pub news_refresh_secs: u32,
    pub log_level: log::Level,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_owned(),
            news_api_base_url: DEFAULT_NEWS_API_BASE_URL.to_owned(),
            news_api_key: String::new(),
            default_city: DEFAULT_CITY.to_owned(),
            news_refresh_secs: DEFAULT_NEWS_REFRESH_SECS,
            log_level: log::Level::Info,
        }
    }
}

impl AppConfig {
    /// Loads config from build-time environment variables and applies runtime overrides.
    pub fn load() -> Self {
        let mut config = Self::default();
        let build = RuntimeConfig {
            api_base_url: option_env!("SHEHER_API_BASE_URL").and_then(normalize_runtime_value),
            news_api_base_url: option_env!("SHEHER_NEWS_API_BASE_URL").and_then(normalize_runtime_value),
            news_api_key: option_env!("SHEHER_NEWS_API_KEY").and_then(normalize_runtime_value),
            default_city: option_env!("SHEHER_DEFAULT_CITY").and_then(normalize_runtime_value),
            news_refresh_secs: option_env!("SHEHER_NEWS_REFRESH_SECS").and_then(normalize_runtime_value),
            log_level: option_env!("SHEHER_LOG_LEVEL").and_then(normalize_runtime_value),
        };
        apply_runtime_overrides(&mut config, build);

        if let Some(runtime) = runtime_config() {
            apply_runtime_overrides(&mut config, runtime);
        }

        config
    }
}

#[derive(Default)]
struct RuntimeConfig {
    api_base_url: Option<String>,
    news_api_base_url: Option<String>,
    news_api_key: Option<String>,
    default_city: Option<String>,
    news_refresh_secs: Option<String>,
    log_level: Option<String>,
}

fn apply_runtime_overrides(config: &mut AppConfig, runtime: RuntimeConfig) {
    if let Some(value) = runtime.api_base_url {
        config.api_base_url = value;
    }
    if let Some(value) = runtime.news_api_base_url {
        config.news_api_base_url = value;
    }
    if let Some(value) = runtime.news_api_key {
        config.news_api_key = value;
    }
    if let Some(value) = runtime.default_city {
        config.default_city = value;
    }
    match runtime.news_refresh_secs.map(|v| v.parse::<u32>()) {
        Some(Ok(secs)) if secs > 0 => config.news_refresh_secs = secs,
        Some(_) => log::warn!("ignoring invalid news refresh interval"),
        None => {}
    }
    match runtime.log_level.map(|v| v.parse::<log::Level>()) {
        Some(Ok(level)) => config.log_level = level,
        Some(Err(_)) => log::warn!("ignoring invalid log level"),
        None => {}
    }
}

#[cfg(feature = "csr")]
fn runtime_config() -> Option<RuntimeConfig> {
    use js_sys::{Object, Reflect};
    use wasm_bindgen::JsValue;

    let window = web_sys::window()?;
    let config = Reflect::get(&window, &JsValue::from_str("SHEHER_CONFIG")).ok()?;
    if config.is_null() || config.is_undefined() {
        return None;
    }
    let object = Object::from(config);

    Some(RuntimeConfig {
        api_base_url: read_runtime_value(&object, "api_base_url"),
        news_api_base_url: read_runtime_value(&object, "news_api_base_url"),
        news_api_key: read_runtime_value(&object, "news_api_key"),
        default_city: read_runtime_value(&object, "default_city"),
        news_refresh_secs: read_runtime_value(&object, "news_refresh_secs"),
        log_level: read_runtime_value(&object, "log_level"),
    })
}

#[cfg(not(feature = "csr"))]
fn runtime_config() -> Option<RuntimeConfig> {
    None
}

#[cfg(feature = "csr")]
fn read_runtime_value(object: &js_sys::Object, key: &str) -> Option<String> {
    let value = js_sys::Reflect::get(object, &wasm_bindgen::JsValue::from_str(key)).ok()?;
    let text = value
        .as_string()
        .or_else(|| value.as_f64().map(|n| n.to_string()))?;
    normalize_runtime_value(&text)
}

fn normalize_runtime_value(value: &str) -> Option<String> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_owned())
    }
}
