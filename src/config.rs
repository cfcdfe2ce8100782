//! Process configuration from environment variables

use std::time::Duration;

const DEFAULT_BACKEND_URL: &str = "http://localhost:8000";
const DEFAULT_PORT: u16 = 3000;
const DEFAULT_REQUEST_TIMEOUT_SECS: u64 = 60;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientConfig {
    /// Base address of the agent service, without a trailing `/`
    pub backend_url: String,
    /// Port the page is served on
    pub port: u16,
    /// Per-request timeout for calls to the agent service
    pub request_timeout: Duration,
}

impl ClientConfig {
    pub fn from_env() -> Self {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let backend_url = lookup("NEWS_CHAT_BACKEND_URL")
            .map(|url| url.trim_end_matches('/').to_string())
            .filter(|url| !url.is_empty())
            .unwrap_or_else(|| DEFAULT_BACKEND_URL.to_string());

        let port = parse_or_default(&lookup, "NEWS_CHAT_PORT", DEFAULT_PORT);
        let timeout_secs = parse_or_default(
            &lookup,
            "NEWS_CHAT_REQUEST_TIMEOUT_SECS",
            DEFAULT_REQUEST_TIMEOUT_SECS,
        );

        Self {
            backend_url,
            port,
            request_timeout: Duration::from_secs(timeout_secs),
        }
    }
}

fn parse_or_default<T>(lookup: &impl Fn(&str) -> Option<String>, key: &str, default: T) -> T
where
    T: std::str::FromStr + std::fmt::Display,
{
    match lookup(key) {
        None => default,
        Some(raw) => raw.trim().parse().unwrap_or_else(|_| {
            tracing::warn!(key, value = %raw, %default, "Ignoring unparseable setting");
            default
        }),
    }
}
