use std::env;
use std::time::Duration;

use crate::core::conversation::ReplyOrder;

/// Base path used when `SPROUT_API_BASE` is not set (local dev proxy).
pub const DEFAULT_API_BASE: &str = "http://localhost:3000/api";

/// Upper bound on one backend call when `SPROUT_TIMEOUT_SECS` is not set.
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

#[derive(Debug, Clone)]
pub struct Config {
    /// Backend base path, without trailing slash. Requests go to `{base_url}/chat`.
    pub base_url: String,
    /// `None` disables the bound (timeout of 0).
    pub request_timeout: Option<Duration>,
    pub reply_order: ReplyOrder,
}

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("invalid API base URL {url:?}: {source}")]
    InvalidBaseUrl {
        url: String,
        source: url::ParseError,
    },
    #[error("invalid timeout {0:?}: expected a number of seconds")]
    InvalidTimeout(String),
    #[error("invalid reply order {0:?}: expected \"arrival\" or \"submission\"")]
    InvalidReplyOrder(String),
}

impl Config {
    /// Full URL of the chat endpoint.
    pub fn chat_url(&self) -> String {
        format!("{}/chat", self.base_url)
    }

    /// Replace the base URL (e.g. from `--base-url`), validating it.
    pub fn set_base_url(&mut self, url: &str) -> Result<(), ConfigError> {
        self.base_url = parse_base_url(url)?;
        Ok(())
    }

    pub fn set_timeout_secs(&mut self, secs: u64) {
        self.request_timeout = timeout_from_secs(secs);
    }
}

/// Load configuration from environment.
pub fn load() -> Result<Config, ConfigError> {
    from_lookup(|key| env::var(key).ok())
}

/// Build a config from a key lookup. `load` passes the process environment.
pub fn from_lookup<F>(lookup: F) -> Result<Config, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    let base_url = parse_base_url(
        lookup("SPROUT_API_BASE")
            .as_deref()
            .unwrap_or(DEFAULT_API_BASE),
    )?;

    let request_timeout = match lookup("SPROUT_TIMEOUT_SECS") {
        Some(raw) => {
            let secs = raw
                .trim()
                .parse::<u64>()
                .map_err(|_| ConfigError::InvalidTimeout(raw.clone()))?;
            timeout_from_secs(secs)
        }
        None => timeout_from_secs(DEFAULT_TIMEOUT_SECS),
    };

    let reply_order = match lookup("SPROUT_REPLY_ORDER") {
        Some(raw) => raw
            .parse::<ReplyOrder>()
            .map_err(|_| ConfigError::InvalidReplyOrder(raw))?,
        None => ReplyOrder::default(),
    };

    Ok(Config {
        base_url,
        request_timeout,
        reply_order,
    })
}

fn timeout_from_secs(secs: u64) -> Option<Duration> {
    (secs > 0).then(|| Duration::from_secs(secs))
}

fn parse_base_url(raw: &str) -> Result<String, ConfigError> {
    let trimmed = raw.trim().trim_end_matches('/');
    url::Url::parse(trimmed).map_err(|e| ConfigError::InvalidBaseUrl {
        url: raw.to_string(),
        source: e,
    })?;
    Ok(trimmed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| map.get(key).cloned()
    }

    #[test]
    fn defaults_when_env_empty() {
        let config = from_lookup(lookup(&[])).unwrap();
        assert_eq!(config.base_url, DEFAULT_API_BASE);
        assert_eq!(config.chat_url(), "http://localhost:3000/api/chat");
        assert_eq!(
            config.request_timeout,
            Some(Duration::from_secs(DEFAULT_TIMEOUT_SECS))
        );
        assert_eq!(config.reply_order, ReplyOrder::Arrival);
    }

    #[test]
    fn base_url_trailing_slash_is_trimmed() {
        let config =
            from_lookup(lookup(&[("SPROUT_API_BASE", "https://example.com/api/")])).unwrap();
        assert_eq!(config.chat_url(), "https://example.com/api/chat");
    }

    #[test]
    fn relative_base_url_is_rejected() {
        let err = from_lookup(lookup(&[("SPROUT_API_BASE", "/api")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidBaseUrl { .. }));
        assert!(err.to_string().contains("/api"));
    }

    #[test]
    fn zero_timeout_disables_bound() {
        let config = from_lookup(lookup(&[("SPROUT_TIMEOUT_SECS", "0")])).unwrap();
        assert_eq!(config.request_timeout, None);
    }

    #[test]
    fn non_numeric_timeout_is_rejected() {
        let err = from_lookup(lookup(&[("SPROUT_TIMEOUT_SECS", "soon")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidTimeout(ref s) if s == "soon"));
    }

    #[test]
    fn reply_order_from_env() {
        let config = from_lookup(lookup(&[("SPROUT_REPLY_ORDER", "submission")])).unwrap();
        assert_eq!(config.reply_order, ReplyOrder::Submission);

        let err = from_lookup(lookup(&[("SPROUT_REPLY_ORDER", "random")])).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidReplyOrder(_)));
    }

    #[test]
    fn overrides_apply_after_load() {
        let mut config = from_lookup(lookup(&[])).unwrap();
        config.set_base_url("http://127.0.0.1:8080").unwrap();
        config.set_timeout_secs(5);
        assert_eq!(config.chat_url(), "http://127.0.0.1:8080/chat");
        assert_eq!(config.request_timeout, Some(Duration::from_secs(5)));
        assert!(config.set_base_url("not a url").is_err());
    }
}
