//! Application Configuration
//!
//! Build-time defaults from `LAB_API_BASE_URL` / `LAB_LOG_LEVEL`, with the
//! API base URL overridable at runtime by `<meta name="lab-api-base-url">`.

use log::LevelFilter;
use remote_collection::FETCH_ALL_PAGE_SIZE;

const DEFAULT_API_BASE_URL: &str = "http://localhost:8080/api";
const API_BASE_URL_META: &str = "lab-api-base-url";
const DEFAULT_TOAST_TIMEOUT_MS: u32 = 4000;

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    /// Prefix for every API path, without a trailing slash
    pub api_base_url: String,
    pub log_level: LevelFilter,
    pub toast_timeout_ms: u32,
    /// Page size used when a screen fetches a whole collection at once
    pub fetch_all_page_size: u32,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            api_base_url: DEFAULT_API_BASE_URL.to_string(),
            log_level: LevelFilter::Info,
            toast_timeout_ms: DEFAULT_TOAST_TIMEOUT_MS,
            fetch_all_page_size: FETCH_ALL_PAGE_SIZE,
        }
    }
}

impl AppConfig {
    /// Build-time values, then the page's meta tag
    pub fn load() -> Self {
        let mut config = Self::from_build_env(option_env!("LAB_API_BASE_URL"), option_env!("LAB_LOG_LEVEL"));
        if let Some(url) = meta_content(API_BASE_URL_META).and_then(|u| normalize_base_url(&u)) {
            config.api_base_url = url;
        }
        config
    }

    pub fn from_build_env(base_url: Option<&str>, log_level: Option<&str>) -> Self {
        let defaults = Self::default();
        Self {
            api_base_url: base_url.and_then(normalize_base_url).unwrap_or(defaults.api_base_url),
            log_level: log_level.and_then(parse_level).unwrap_or(defaults.log_level),
            ..defaults
        }
    }
}

/// Trimmed, without trailing slashes; `None` when blank
pub fn normalize_base_url(raw: &str) -> Option<String> {
    let url = raw.trim().trim_end_matches('/');
    (!url.is_empty()).then(|| url.to_string())
}

pub fn parse_level(raw: &str) -> Option<LevelFilter> {
    raw.trim().parse().ok()
}

fn meta_content(name: &str) -> Option<String> {
    let document = web_sys::window()?.document()?;
    let meta = document.query_selector(&format!("meta[name=\"{}\"]", name)).ok()??;
    meta.get_attribute("content")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_without_env() {
        let config = AppConfig::from_build_env(None, None);
        assert_eq!(config, AppConfig::default());
        assert_eq!(config.fetch_all_page_size, 1000);
    }

    #[test]
    fn test_env_overrides() {
        let config = AppConfig::from_build_env(Some(" https://lab.example.org/api/ "), Some("debug"));
        assert_eq!(config.api_base_url, "https://lab.example.org/api");
        assert_eq!(config.log_level, LevelFilter::Debug);
    }

    #[test]
    fn test_invalid_values_fall_back() {
        let config = AppConfig::from_build_env(Some("  "), Some("chatty"));
        assert_eq!(config.api_base_url, DEFAULT_API_BASE_URL);
        assert_eq!(config.log_level, LevelFilter::Info);
    }

    #[test]
    fn test_level_is_case_insensitive() {
        assert_eq!(parse_level("WARN"), Some(LevelFilter::Warn));
        assert_eq!(parse_level("off"), Some(LevelFilter::Off));
    }
}
