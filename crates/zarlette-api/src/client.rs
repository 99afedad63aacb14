//! # HTTP Client
//!
//! Thin `reqwest` wrapper shared by every endpoint module.
//!
//! ## Request Anatomy
//! ```text
//! ┌─────────────────────────────────────────────────────────────────────────┐
//! │                         Every Request                                   │
//! │                                                                         │
//! │  {base_url}{path}          base URL trimmed of trailing slash           │
//! │  Content-Type: application/json                                         │
//! │  Accept: application/json                                               │
//! │  Authorization: Bearer {token}        only when a token is configured   │
//! │  Idempotency-Key: {uuid}              only on sale creation             │
//! │  timeout: config.timeout_secs                                           │
//! │                                                                         │
//! │  Response handling:                                                     │
//! │    2xx ──► deserialize body as T                                        │
//! │    4xx/5xx ──► read body, extract {"message": ...} when present,        │
//! │               map status to a ClientError variant                       │
//! │    no response ──► ClientError::Transport (is_network() == true)        │
//! └─────────────────────────────────────────────────────────────────────────┘
//! ```

use reqwest::header::{HeaderMap, HeaderValue, ACCEPT, CONTENT_TYPE};
use reqwest::{Method, RequestBuilder, StatusCode};
use serde::de::DeserializeOwned;
use serde::Serialize;
use tracing::debug;

use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};

/// Header carrying the client-generated key that makes sale creation safe to
/// retry.
pub const IDEMPOTENCY_KEY_HEADER: &str = "Idempotency-Key";

/// JSON-over-HTTP client for the POS collaborator.
#[derive(Debug, Clone)]
pub struct HttpClient {
    client: reqwest::Client,
    base_url: String,
    bearer_token: Option<String>,
}

impl HttpClient {
    /// Builds a client from configuration.
    ///
    /// The configuration must have been validated; an unusable reqwest
    /// builder state is reported as `InvalidConfig` rather than panicking.
    pub fn new(config: &ApiConfig) -> ClientResult<Self> {
        let mut headers = HeaderMap::new();
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));
        headers.insert(ACCEPT, HeaderValue::from_static("application/json"));

        let client = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .default_headers(headers)
            .build()
            .map_err(|e| ClientError::InvalidConfig(e.to_string()))?;

        Ok(HttpClient {
            client,
            base_url: config.trimmed_base_url().to_string(),
            bearer_token: config.bearer_token.clone(),
        })
    }

    /// Returns the configured base URL (trailing slash trimmed).
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let url = format!("{}{}", self.base_url, path);
        let mut req = self.client.request(method, &url);
        if let Some(token) = &self.bearer_token {
            req = req.bearer_auth(token);
        }
        req
    }

    // =========================================================================
    // Typed Verbs
    // =========================================================================

    /// GET {path}.
    pub async fn get<T: DeserializeOwned>(&self, path: &str) -> ClientResult<T> {
        debug!(path, "GET");
        let resp = self.request(Method::GET, path).send().await?;
        Self::handle_response(resp).await
    }

    /// GET {path}?{query}.
    pub async fn get_query<T: DeserializeOwned, Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<T> {
        debug!(path, "GET (query)");
        let resp = self.request(Method::GET, path).query(query).send().await?;
        Self::handle_response(resp).await
    }

    /// GET {path}?{query}, returning the raw body text (receipt HTML/PDF).
    pub async fn get_text<Q: Serialize + ?Sized>(
        &self,
        path: &str,
        query: &Q,
    ) -> ClientResult<String> {
        debug!(path, "GET (text)");
        let resp = self.request(Method::GET, path).query(query).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Self::status_error(status, body));
        }
        Ok(resp.text().await?)
    }

    /// POST {path} with a JSON body.
    pub async fn post<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path, "POST");
        let resp = self.request(Method::POST, path).json(body).send().await?;
        Self::handle_response(resp).await
    }

    /// POST {path} with a JSON body and an `Idempotency-Key` header.
    pub async fn post_idempotent<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
        idempotency_key: &str,
    ) -> ClientResult<T> {
        debug!(path, idempotency_key, "POST (idempotent)");
        let resp = self
            .request(Method::POST, path)
            .header(IDEMPOTENCY_KEY_HEADER, idempotency_key)
            .json(body)
            .send()
            .await?;
        Self::handle_response(resp).await
    }

    /// PUT {path} with a JSON body.
    pub async fn put<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path, "PUT");
        let resp = self.request(Method::PUT, path).json(body).send().await?;
        Self::handle_response(resp).await
    }

    /// PATCH {path} with a JSON body.
    pub async fn patch<T: DeserializeOwned, B: Serialize + ?Sized>(
        &self,
        path: &str,
        body: &B,
    ) -> ClientResult<T> {
        debug!(path, "PATCH");
        let resp = self.request(Method::PATCH, path).json(body).send().await?;
        Self::handle_response(resp).await
    }

    /// DELETE {path}. The response body, if any, is ignored.
    pub async fn delete(&self, path: &str) -> ClientResult<()> {
        debug!(path, "DELETE");
        let resp = self.request(Method::DELETE, path).send().await?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Self::status_error(status, body));
        }
        Ok(())
    }

    // =========================================================================
    // Response Handling
    // =========================================================================

    async fn handle_response<T: DeserializeOwned>(resp: reqwest::Response) -> ClientResult<T> {
        let status = resp.status();

        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            return Err(Self::status_error(status, body));
        }

        let body = resp.text().await?;
        serde_json::from_str(&body).map_err(|e| ClientError::Decode(e.to_string()))
    }

    /// Maps a non-success status to an error, extracting the collaborator's
    /// `{"message": ...}` body when present so the UI can show its wording.
    fn status_error(status: StatusCode, body: String) -> ClientError {
        let message = extract_message(&body);
        match status {
            StatusCode::UNAUTHORIZED => ClientError::Unauthorized { message },
            StatusCode::NOT_FOUND => ClientError::NotFound { message },
            StatusCode::CONFLICT => ClientError::Conflict { message },
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => {
                ClientError::Validation { message }
            }
            other => ClientError::Server {
                status: other.as_u16(),
                message,
            },
        }
    }
}

/// Pulls `message` out of a JSON error body; a non-JSON body is carried
/// verbatim so nothing the server said is lost.
fn extract_message(body: &str) -> Option<String> {
    if body.trim().is_empty() {
        return None;
    }
    match serde_json::from_str::<serde_json::Value>(body) {
        Ok(value) => value
            .get("message")
            .and_then(|m| m.as_str())
            .map(str::to_string),
        Err(_) => Some(body.trim().to_string()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_extract_message_from_json_body() {
        let body = r#"{"message": "Cannot delete category", "errors": {}}"#;
        assert_eq!(
            extract_message(body).as_deref(),
            Some("Cannot delete category")
        );
    }

    #[test]
    fn test_extract_message_falls_back_to_raw_body() {
        assert_eq!(
            extract_message("Internal Server Error").as_deref(),
            Some("Internal Server Error")
        );
        assert_eq!(extract_message(""), None);
        assert_eq!(extract_message("   "), None);
        // JSON without a message field yields nothing.
        assert_eq!(extract_message(r#"{"error": "nope"}"#), None);
    }

    #[test]
    fn test_status_mapping() {
        let err = HttpClient::status_error(StatusCode::CONFLICT, String::new());
        assert!(err.is_conflict());

        let err = HttpClient::status_error(
            StatusCode::UNPROCESSABLE_ENTITY,
            r#"{"message": "The name field is required."}"#.to_string(),
        );
        assert!(matches!(err, ClientError::Validation { .. }));
        assert_eq!(err.server_message(), Some("The name field is required."));

        let err = HttpClient::status_error(StatusCode::BAD_GATEWAY, String::new());
        assert!(matches!(err, ClientError::Server { status: 502, .. }));
    }

    #[test]
    fn test_client_builds_from_config() {
        let client = HttpClient::new(&ApiConfig::default()).unwrap();
        assert_eq!(client.base_url(), "http://localhost:8000/api");
    }
}
