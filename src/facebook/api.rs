//! Core Graph API utilities.
//!
//! This module contains the Graph API client, its error type, and the low-level
//! helper every Graph call goes through: it attaches the page access token, sends
//! the request under the configured timeout, and turns non-success responses and
//! malformed bodies into typed errors.

use log::{debug, error, info};
use reqwest::{Client, RequestBuilder, StatusCode};
use serde_json::Value;
use thiserror::Error;

use crate::config::ServiceConfig;

/// Error type for all Graph API operations.
#[derive(Debug, Error)]
pub enum GraphError {
    /// Transport failure, including timeouts and connection errors.
    #[error("http error: {0}")]
    Http(#[from] reqwest::Error),
    /// The Graph API answered with a non-success status.
    #[error("graph api error for operation '{operation}' ({status}): {body}")]
    Status {
        operation: String,
        status: StatusCode,
        body: String,
    },
    /// The response body was not valid JSON.
    #[error("invalid json from operation '{operation}': {source}")]
    Json {
        operation: String,
        #[source]
        source: serde_json::Error,
    },
    /// A successful response lacked a field the operation needs.
    #[error("operation '{operation}' response is missing '{field}'")]
    MissingField {
        operation: String,
        field: &'static str,
    },
}

/// Sanitizes text for safe logging by truncating and escaping control characters.
///
/// # Parameters
///
/// - `text`: The text to sanitize
/// - `max_len`: Maximum number of characters kept before truncation
///
/// # Returns
///
/// A sanitized string safe for logging
pub(crate) fn sanitize_for_logging(text: &str, max_len: usize) -> String {
    let sanitized: String = text
        .chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if c.is_control() => '?',
            c => c,
        })
        .collect();

    if sanitized.chars().count() > max_len {
        let truncated: String = sanitized.chars().take(max_len).collect();
        format!(
            "{}... [truncated, {} total bytes]",
            truncated,
            text.len()
        )
    } else {
        sanitized
    }
}

/// Client for the Facebook Graph API, bound to a single page.
#[derive(Clone)]
pub struct GraphClient {
    http: Client,
    base_url: String,
    version: String,
    page_id: String,
    access_token: String,
    publishing_enabled: bool,
}

impl std::fmt::Debug for GraphClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("GraphClient")
            .field("base_url", &self.base_url)
            .field("version", &self.version)
            .field("page_id", &self.page_id)
            .field("access_token", &"[REDACTED]")
            .field("publishing_enabled", &self.publishing_enabled)
            .finish()
    }
}

impl GraphClient {
    /// Builds a client from the service configuration.
    ///
    /// Every request made by the client is bounded by `config.http_timeout`.
    pub fn new(config: &ServiceConfig) -> Result<Self, GraphError> {
        let http = Client::builder().timeout(config.http_timeout).build()?;
        Ok(GraphClient {
            http,
            base_url: config.graph_base_url.trim_end_matches('/').to_string(),
            version: config.graph_version.clone(),
            page_id: config.page_id.clone(),
            access_token: config.page_access_token.clone(),
            publishing_enabled: config.publishing_enabled(),
        })
    }

    /// Returns true when the configuration this client was built from allows publishing.
    ///
    /// See [`ServiceConfig::publishing_enabled`].
    pub fn is_configured(&self) -> bool {
        self.publishing_enabled
    }

    pub fn page_id(&self) -> &str {
        &self.page_id
    }

    /// Full URL for a Graph path such as `{page_id}/photos`.
    pub(crate) fn endpoint(&self, path: &str) -> String {
        format!("{}/{}/{}", self.base_url, self.version, path)
    }

    pub(crate) fn post(&self, path: &str) -> RequestBuilder {
        self.http.post(self.endpoint(path))
    }

    pub(crate) fn get(&self, path: &str) -> RequestBuilder {
        self.http.get(self.endpoint(path))
    }

    /// Sends a Graph request with the page access token and returns the parsed JSON body.
    ///
    /// # Parameters
    ///
    /// - `request_builder`: A configured request, without credentials
    /// - `operation_name`: Human-readable name for the operation (for logging and errors)
    ///
    /// # Returns
    ///
    /// - `Ok(Value)`: The JSON body of a 2xx response
    /// - `Err(GraphError)`: On transport failure, non-success status, or malformed JSON
    pub(crate) async fn send(
        &self,
        request_builder: RequestBuilder,
        operation_name: &str,
    ) -> Result<Value, GraphError> {
        debug!("Sending Graph API request for operation: {}", operation_name);

        let response = request_builder
            .query(&[("access_token", self.access_token.as_str())])
            .send()
            .await?;

        let status = response.status();
        info!(
            "Received response with status: {} for operation: {}",
            status, operation_name
        );

        let body = response.text().await?;
        if !status.is_success() {
            let body = sanitize_for_logging(&body, 200);
            error!("Operation '{}' failed - Status: {}", operation_name, status);
            debug!("Error response for '{}': {}", operation_name, body);
            return Err(GraphError::Status {
                operation: operation_name.to_string(),
                status,
                body,
            });
        }

        debug!(
            "Response summary for '{}': {} bytes received",
            operation_name,
            body.len()
        );
        serde_json::from_str(&body).map_err(|source| GraphError::Json {
            operation: operation_name.to_string(),
            source,
        })
    }
}

/// Reads an object id from a Graph response; ids may come back as strings or numbers.
pub(crate) fn require_id(body: &Value, operation_name: &str) -> Result<String, GraphError> {
    match body.get("id") {
        Some(Value::String(id)) if !id.is_empty() => Ok(id.clone()),
        Some(Value::Number(id)) => Ok(id.to_string()),
        _ => Err(GraphError::MissingField {
            operation: operation_name.to_string(),
            field: "id",
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use wiremock::matchers::{method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn client_for(base_url: &str) -> GraphClient {
        let config = ServiceConfig {
            page_id: "PAGE".to_string(),
            page_access_token: "page-token".to_string(),
            graph_base_url: base_url.to_string(),
            ..ServiceConfig::default()
        };
        GraphClient::new(&config).unwrap()
    }

    #[test]
    fn test_endpoint_includes_version() {
        let client = client_for("https://graph.example.com/");
        assert_eq!(
            client.endpoint("PAGE/feed"),
            "https://graph.example.com/v19.0/PAGE/feed"
        );
    }

    #[test]
    fn test_is_configured_follows_publishing_enabled() {
        let client = client_for("https://graph.example.com");
        assert!(client.is_configured());

        let configs = [
            ServiceConfig::default(),
            ServiceConfig {
                page_id: "PAGE".to_string(),
                ..ServiceConfig::default()
            },
            ServiceConfig {
                page_access_token: "page-token".to_string(),
                ..ServiceConfig::default()
            },
        ];
        for config in configs {
            let client = GraphClient::new(&config).unwrap();
            assert!(!config.publishing_enabled());
            assert_eq!(client.is_configured(), config.publishing_enabled());
        }
    }

    #[tokio::test]
    async fn test_send_attaches_access_token() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/v19.0/123"))
            .and(query_param("access_token", "page-token"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({"id": "123"})))
            .expect(1)
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let body = client.send(client.get("123"), "lookup").await.unwrap();
        assert_eq!(body["id"], "123");
    }

    #[tokio::test]
    async fn test_send_maps_error_status() {
        let mock_server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path("/v19.0/PAGE/feed"))
            .respond_with(
                ResponseTemplate::new(400)
                    .set_body_json(json!({"error": {"message": "Invalid OAuth access token"}})),
            )
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let err = client
            .send(client.post("PAGE/feed"), "create_feed_post")
            .await
            .unwrap_err();
        match err {
            GraphError::Status { status, body, .. } => {
                assert_eq!(status, StatusCode::BAD_REQUEST);
                assert!(body.contains("Invalid OAuth access token"));
            }
            other => panic!("expected status error, got {:?}", other),
        }
    }

    #[tokio::test]
    async fn test_send_maps_invalid_json() {
        let mock_server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
            .mount(&mock_server)
            .await;

        let client = client_for(&mock_server.uri());
        let err = client.send(client.get("x"), "lookup").await.unwrap_err();
        assert!(matches!(err, GraphError::Json { .. }));
    }

    #[test]
    fn test_require_id() {
        assert_eq!(require_id(&json!({"id": "9_1"}), "op").unwrap(), "9_1");
        assert_eq!(require_id(&json!({"id": 77}), "op").unwrap(), "77");
        assert!(matches!(
            require_id(&json!({"success": true}), "op"),
            Err(GraphError::MissingField { field: "id", .. })
        ));
    }

    #[test]
    fn test_sanitize_for_logging() {
        assert_eq!(sanitize_for_logging("a\nb\tc", 50), "a b c");
        let long = "x".repeat(300);
        let sanitized = sanitize_for_logging(&long, 10);
        assert!(sanitized.starts_with("xxxxxxxxxx... [truncated, 300 total bytes]"));
    }
}
