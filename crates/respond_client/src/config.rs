use reqwest::Url;

use crate::error::{RespondError, Result};

pub const DEFAULT_SERVER_URL: &str = "http://localhost:3000/api/respond";

/// Where the request runner sends its payload.
///
/// Only endpoints on this machine are accepted unless `allow_remote` is set.
#[derive(Debug, Clone)]
pub struct RespondConfig {
    pub server_url: String,
    pub allow_remote: bool,
}

impl RespondConfig {
    pub fn new(server_url: impl Into<String>) -> Self {
        Self {
            server_url: server_url.into(),
            allow_remote: false,
        }
    }

    /// Loads config from env vars:
    /// - `RESPOND_SERVER_URL`   (default: `http://localhost:3000/api/respond`)
    /// - `RESPOND_ALLOW_REMOTE` (default: off; `1`, `true`, `yes` or `on` enables it)
    pub fn from_env() -> Self {
        let server_url = std::env::var("RESPOND_SERVER_URL")
            .unwrap_or_else(|_| DEFAULT_SERVER_URL.to_string());
        Self::new(server_url).allow_remote(env_allows_remote())
    }

    pub fn allow_remote(mut self, on: bool) -> Self {
        self.allow_remote = on;
        self
    }

    pub(crate) fn endpoint(&self) -> Result<Url> {
        validate_endpoint(&self.server_url, self.allow_remote)
    }
}

impl Default for RespondConfig {
    fn default() -> Self {
        Self::new(DEFAULT_SERVER_URL)
    }
}

/// Whether `RESPOND_ALLOW_REMOTE` is set to a truthy value.
pub fn env_allows_remote() -> bool {
    std::env::var("RESPOND_ALLOW_REMOTE")
        .map(|v| parse_flag(&v))
        .unwrap_or(false)
}

fn parse_flag(raw: &str) -> bool {
    matches!(
        raw.trim().to_ascii_lowercase().as_str(),
        "1" | "true" | "yes" | "on"
    )
}

fn validate_endpoint(raw: &str, allow_remote: bool) -> Result<Url> {
    let url = Url::parse(raw)
        .map_err(|e| RespondError::Config(format!("Invalid server URL '{raw}': {e}")))?;

    match url.scheme() {
        "http" | "https" => {}
        other => {
            return Err(RespondError::Config(format!(
                "Unsupported scheme '{other}' for server URL '{raw}' (use http or https)"
            )))
        }
    }

    let host = url
        .host_str()
        .ok_or_else(|| RespondError::Config(format!("Server URL '{raw}' is missing a host")))?;

    if !allow_remote && !is_local_host(host) {
        return Err(RespondError::Config(format!(
            "Refusing non-local host '{host}'. Set RESPOND_ALLOW_REMOTE=1 or pass --allow-remote to use it."
        )));
    }

    Ok(url)
}

fn is_local_host(host: &str) -> bool {
    // IPv6 hosts come back bracketed from `Url::host_str`.
    host.eq_ignore_ascii_case("localhost")
        || host == "127.0.0.1"
        || host == "::1"
        || host == "[::1]"
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_endpoint_is_valid() {
        let url = RespondConfig::default().endpoint().unwrap();
        assert_eq!(url.as_str(), DEFAULT_SERVER_URL);
        assert_eq!(url.port(), Some(3000));
    }

    #[test]
    fn loopback_hosts_are_local() {
        for raw in [
            "http://127.0.0.1:8080/api/respond",
            "http://[::1]:3000/api/respond",
            "https://LOCALHOST/api/respond",
        ] {
            assert!(validate_endpoint(raw, false).is_ok(), "{raw} should be accepted");
        }
    }

    #[test]
    fn remote_host_requires_opt_in() {
        let config = RespondConfig::new("http://example.com/api/respond");
        let err = config.endpoint().unwrap_err();
        assert!(matches!(err, RespondError::Config(ref msg) if msg.contains("example.com")));

        let config = config.allow_remote(true);
        assert!(config.endpoint().is_ok());
    }

    #[test]
    fn rejects_bad_scheme_and_garbage() {
        assert!(matches!(
            validate_endpoint("ftp://localhost/api", true),
            Err(RespondError::Config(_))
        ));
        assert!(matches!(
            validate_endpoint("not a url", true),
            Err(RespondError::Config(_))
        ));
    }

    // The only test in this binary that touches RESPOND_* variables.
    #[test]
    fn from_env_reads_url_and_remote_flag() {
        std::env::remove_var("RESPOND_SERVER_URL");
        std::env::remove_var("RESPOND_ALLOW_REMOTE");
        let config = RespondConfig::from_env();
        assert_eq!(config.server_url, DEFAULT_SERVER_URL);
        assert!(!config.allow_remote);

        std::env::set_var("RESPOND_SERVER_URL", "http://example.com:8080/api/respond");
        std::env::set_var("RESPOND_ALLOW_REMOTE", "true");
        let config = RespondConfig::from_env();
        std::env::remove_var("RESPOND_SERVER_URL");
        std::env::remove_var("RESPOND_ALLOW_REMOTE");

        assert_eq!(config.server_url, "http://example.com:8080/api/respond");
        assert!(config.allow_remote);
        assert_eq!(config.endpoint().unwrap().port(), Some(8080));
    }

    #[test]
    fn flag_values() {
        assert!(parse_flag("1"));
        assert!(parse_flag(" TRUE "));
        assert!(parse_flag("on"));
        assert!(!parse_flag("0"));
        assert!(!parse_flag(""));
        assert!(!parse_flag("nope"));
    }
}
