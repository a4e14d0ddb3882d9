//! Configuration module for the facebook-poster service.
//!
//! This module contains the configuration structure and environment variable handling
//! for the HTTP server and the Facebook Graph API integration. Configuration is read
//! once at startup and then shared immutably with every request.

use log::{debug, info, warn};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

/// Default Graph API version used when `FB_GRAPH_VERSION` is not set.
pub const DEFAULT_GRAPH_VERSION: &str = "v19.0";

/// Default Graph API origin used when `FB_GRAPH_BASE_URL` is not set.
pub const DEFAULT_GRAPH_BASE_URL: &str = "https://graph.facebook.com";

/// Default listening port used when `FB_SERVICE_PORT` is not set.
pub const DEFAULT_PORT: u16 = 5500;

/// Default ceiling for each outbound Graph API call.
pub const DEFAULT_HTTP_TIMEOUT_SECS: u64 = 20;

/// Immutable service configuration.
///
/// Holds the shared secret expected in the `X-Api-Key` header, the Facebook Page
/// credentials used for publishing, and the local settings for the server and the
/// HTML artifact directory.
#[derive(Debug, Clone)]
pub struct ServiceConfig {
    /// Shared secret callers must send in the `X-Api-Key` header
    pub api_key: String,
    /// The Facebook Page id posts are created on
    pub page_id: String,
    /// The Page access token used for every Graph API call
    pub page_access_token: String,
    /// Graph API version path segment, e.g. `v19.0`
    pub graph_version: String,
    /// Graph API origin, e.g. `https://graph.facebook.com`
    pub graph_base_url: String,
    /// Port the HTTP server listens on
    pub port: u16,
    /// Directory rendered HTML previews are written to
    pub output_dir: PathBuf,
    /// Per-call timeout for outbound Graph API requests
    pub http_timeout: Duration,
}

impl Default for ServiceConfig {
    fn default() -> Self {
        ServiceConfig {
            api_key: String::new(),
            page_id: String::new(),
            page_access_token: String::new(),
            graph_version: DEFAULT_GRAPH_VERSION.to_string(),
            graph_base_url: DEFAULT_GRAPH_BASE_URL.to_string(),
            port: DEFAULT_PORT,
            output_dir: default_output_dir(),
            http_timeout: Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        }
    }
}

impl ServiceConfig {
    /// Creates a new `ServiceConfig` by loading settings from environment variables.
    ///
    /// # Environment Variables
    ///
    /// - `FB_SERVICE_API_KEY`: Shared secret for the publish endpoint (unset means every request is rejected)
    /// - `FB_PAGE_ID`: Facebook Page id (unset disables publishing)
    /// - `FB_PAGE_ACCESS_TOKEN`: Page access token (unset disables publishing)
    /// - `FB_GRAPH_VERSION`: Graph API version (defaults to `v19.0`)
    /// - `FB_GRAPH_BASE_URL`: Graph API origin (defaults to `https://graph.facebook.com`)
    /// - `FB_SERVICE_PORT`: Server port (defaults to 5500)
    /// - `FB_OUTPUT_DIR`: HTML artifact directory (defaults to `output/` next to the executable)
    /// - `FB_HTTP_TIMEOUT_SECS`: Outbound call timeout in seconds (defaults to 20)
    ///
    /// # Returns
    ///
    /// - `Ok(ServiceConfig)`: If every set variable is valid
    /// - `Err(Box<dyn std::error::Error + Send + Sync>)`: If the port cannot be parsed, or the
    ///   timeout is not a positive whole number of seconds
    pub fn from_env() -> Result<Self, Box<dyn std::error::Error + Send + Sync>> {
        info!("Loading service configuration from environment variables");

        let api_key = env_or_empty("FB_SERVICE_API_KEY");
        if api_key.trim().is_empty() {
            warn!("FB_SERVICE_API_KEY is not set - every publish request will be rejected");
        } else {
            debug!("API key (masked): {}", mask_secret(&api_key));
        }

        let page_id = env_or_empty("FB_PAGE_ID");
        let page_access_token = env_or_empty("FB_PAGE_ACCESS_TOKEN");
        if !page_access_token.is_empty() {
            debug!(
                "Page access token (masked): {}",
                mask_secret(&page_access_token)
            );
        }

        let graph_version = env::var("FB_GRAPH_VERSION")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .unwrap_or_else(|| DEFAULT_GRAPH_VERSION.to_string());

        let graph_base_url = env::var("FB_GRAPH_BASE_URL")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(|v| v.trim_end_matches('/').to_string())
            .unwrap_or_else(|| DEFAULT_GRAPH_BASE_URL.to_string());

        let port = get_server_port()?;

        let output_dir = env::var("FB_OUTPUT_DIR")
            .ok()
            .filter(|v| !v.trim().is_empty())
            .map(PathBuf::from)
            .unwrap_or_else(default_output_dir);

        let http_timeout = match env::var("FB_HTTP_TIMEOUT_SECS") {
            Ok(raw) => parse_timeout_secs(&raw)?,
            Err(_) => Duration::from_secs(DEFAULT_HTTP_TIMEOUT_SECS),
        };

        let config = ServiceConfig {
            api_key,
            page_id,
            page_access_token,
            graph_version,
            graph_base_url,
            port,
            output_dir,
            http_timeout,
        };

        info!("Service configuration loaded successfully");
        if config.publishing_enabled() {
            info!(
                "Publishing enabled for page {} via Graph API {}",
                config.page_id, config.graph_version
            );
        } else {
            warn!("FB_PAGE_ID or FB_PAGE_ACCESS_TOKEN is missing - publishing is disabled");
        }
        info!("HTML previews will be written to {}", config.output_dir.display());

        Ok(config)
    }

    /// Returns true when both the page id and the page access token are configured.
    pub fn publishing_enabled(&self) -> bool {
        !self.page_id.is_empty() && !self.page_access_token.is_empty()
    }
}

/// Gets the server port from the `FB_SERVICE_PORT` environment variable or returns the default.
///
/// # Returns
///
/// - `Ok(u16)`: The configured port, or 5500 when the variable is not set
/// - `Err(...)`: If the variable is set to something that is not a valid port number
///
/// # Example
///
/// ```rust
/// use facebook_poster::get_server_port;
///
/// // With no FB_SERVICE_PORT set
/// std::env::remove_var("FB_SERVICE_PORT");
/// assert_eq!(get_server_port().unwrap(), 5500);
/// ```
pub fn get_server_port() -> Result<u16, Box<dyn std::error::Error + Send + Sync>> {
    match env::var("FB_SERVICE_PORT") {
        Ok(raw) => raw
            .trim()
            .parse()
            .map_err(|e| format!("FB_SERVICE_PORT must be a valid port number: {}", e).into()),
        Err(_) => Ok(DEFAULT_PORT),
    }
}

/// Parses `FB_HTTP_TIMEOUT_SECS`. Zero is rejected: it would make every Graph call fail at once.
fn parse_timeout_secs(raw: &str) -> Result<Duration, Box<dyn std::error::Error + Send + Sync>> {
    let secs: u64 = raw
        .trim()
        .parse()
        .map_err(|e| format!("FB_HTTP_TIMEOUT_SECS must be a whole number of seconds: {}", e))?;
    if secs == 0 {
        return Err("FB_HTTP_TIMEOUT_SECS must be greater than zero".into());
    }
    Ok(Duration::from_secs(secs))
}

/// Masks a secret for logging, keeping only a short prefix and suffix.
pub(crate) fn mask_secret(secret: &str) -> String {
    let chars: Vec<char> = secret.chars().collect();
    let len = chars.len();
    let prefix: String = chars.iter().take(len.min(8).min(len / 2)).collect();
    if len > 16 {
        let suffix: String = chars[len - 4..].iter().collect();
        format!("{}...{}", prefix, suffix)
    } else {
        format!("{}...", prefix)
    }
}

fn env_or_empty(name: &str) -> String {
    env::var(name).unwrap_or_default()
}

/// `output/` next to the running executable, falling back to a relative `output/`.
fn default_output_dir() -> PathBuf {
    env::current_exe()
        .ok()
        .and_then(|exe| exe.parent().map(|dir| dir.join("output")))
        .unwrap_or_else(|| PathBuf::from("output"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_publishing_enabled_requires_both_credentials() {
        let mut config = ServiceConfig::default();
        assert!(!config.publishing_enabled());

        config.page_id = "123".to_string();
        assert!(!config.publishing_enabled());

        config.page_access_token = "token".to_string();
        assert!(config.publishing_enabled());

        config.page_id.clear();
        assert!(!config.publishing_enabled());
    }

    #[test]
    fn test_default_config_values() {
        let config = ServiceConfig::default();
        assert_eq!(config.graph_version, "v19.0");
        assert_eq!(config.graph_base_url, "https://graph.facebook.com");
        assert_eq!(config.port, 5500);
        assert_eq!(config.http_timeout, Duration::from_secs(20));
        assert!(config.output_dir.ends_with("output"));
    }

    #[test]
    fn test_timeout_must_be_positive() {
        assert_eq!(parse_timeout_secs(" 45 ").unwrap(), Duration::from_secs(45));

        let err = parse_timeout_secs("0").unwrap_err();
        assert!(err.to_string().contains("greater than zero"));

        assert!(parse_timeout_secs("-1").is_err());
        assert!(parse_timeout_secs("soon").is_err());
    }

    #[test]
    fn test_mask_secret_hides_most_of_the_value() {
        let masked = mask_secret("EAAGabcdefghijklmnopqrstuvwxyz");
        assert_eq!(masked, "EAAGabcd...wxyz");

        // Short secrets reveal at most half of their characters
        assert_eq!(mask_secret("abcd"), "ab...");
        assert_eq!(mask_secret(""), "...");
    }
}
