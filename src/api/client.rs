//! HTTP client for the Resonate backend
//!
//! Thin JSON-over-HTTP client: bearer-token auth, one method per backend
//! operation, no automatic retries. Non-2xx responses are mapped to
//! [`ApiError`] using the `detail`/`message` field of the error body;
//! transport failures map to the `network` error code.

use crate::api::traits::BackendClient;
use crate::state::{AuditLog, EmailAnalysis, Icp, IcpValues};
use async_trait::async_trait;
use serde::Deserialize;
use std::time::Duration;
use thiserror::Error;

/// Default backend address
pub const DEFAULT_BASE_URL: &str = "http://localhost:8000/api/v1";

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// A failed backend call: an error code (HTTP status, or `network` for
/// transport failures) and a human-readable message.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{message}")]
pub struct ApiError {
    pub code: String,
    pub message: String,
}

impl ApiError {
    fn network(err: &reqwest::Error) -> Self {
        let message = if err.is_timeout() {
            "The backend did not respond in time".to_string()
        } else {
            "Could not reach the backend".to_string()
        };
        Self {
            code: "network".to_string(),
            message,
        }
    }

    fn decode(err: &reqwest::Error) -> Self {
        Self {
            code: "decode".to_string(),
            message: format!("Unexpected response from the backend: {err}"),
        }
    }
}

/// Shape of backend error bodies (`detail` from FastAPI-style services,
/// `message` as a fallback)
#[derive(Debug, Deserialize)]
struct ErrorBody {
    detail: Option<serde_json::Value>,
    message: Option<String>,
}

/// Bearer-token response of the login endpoint (OAuth2 password flow)
#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

/// Client for the Resonate backend API
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
    token: Option<String>,
}

impl ApiClient {
    /// Create a new client.
    ///
    /// A pre-issued token may be supplied through `RESONATE_TOKEN` for
    /// non-interactive use; otherwise `login` must be called first.
    pub fn new(base_url: impl Into<String>) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()?;
        Ok(Self {
            http,
            base_url: base_url.into(),
            token: std::env::var("RESONATE_TOKEN").ok(),
        })
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url.trim_end_matches('/'), path)
    }

    fn authed(&self, request: reqwest::RequestBuilder) -> reqwest::RequestBuilder {
        match &self.token {
            Some(token) => request.bearer_auth(token),
            None => request,
        }
    }

    async fn handle<T: serde::de::DeserializeOwned>(
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<T, ApiError> {
        let response = response.map_err(|err| ApiError::network(&err))?;
        let status = response.status();
        if status.is_success() {
            return response.json().await.map_err(|err| ApiError::decode(&err));
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError {
            code: status.as_u16().to_string(),
            message: error_message(status, &body),
        })
    }

    async fn handle_empty(
        response: Result<reqwest::Response, reqwest::Error>,
    ) -> Result<(), ApiError> {
        let response = response.map_err(|err| ApiError::network(&err))?;
        let status = response.status();
        if status.is_success() {
            return Ok(());
        }
        let body = response.text().await.unwrap_or_default();
        Err(ApiError {
            code: status.as_u16().to_string(),
            message: error_message(status, &body),
        })
    }
}

#[async_trait]
impl BackendClient for ApiClient {
    async fn login(&mut self, email: &str, password: &str) -> Result<(), ApiError> {
        let response = self
            .http
            .post(self.endpoint("/auth/login"))
            .form(&[("username", email), ("password", password)])
            .send()
            .await;
        let token: TokenResponse = Self::handle(response).await?;
        self.token = Some(token.access_token);
        Ok(())
    }

    fn is_authenticated(&self) -> bool {
        self.token.is_some()
    }

    async fn list_icps(&mut self) -> Result<Vec<Icp>, ApiError> {
        let request = self.authed(self.http.get(self.endpoint("/icp/icps")));
        Self::handle(request.send().await).await
    }

    async fn get_icp(&mut self, icp_id: i64) -> Result<Icp, ApiError> {
        let request = self.authed(self.http.get(self.endpoint(&format!("/icp/icps/{icp_id}"))));
        Self::handle(request.send().await).await
    }

    async fn create_icp(&mut self, values: &IcpValues) -> Result<Icp, ApiError> {
        let request = self
            .authed(self.http.post(self.endpoint("/icp/icps")))
            .json(values);
        Self::handle(request.send().await).await
    }

    async fn update_icp(&mut self, icp_id: i64, values: &IcpValues) -> Result<Icp, ApiError> {
        let request = self
            .authed(self.http.put(self.endpoint(&format!("/icp/icps/{icp_id}"))))
            .json(values);
        Self::handle(request.send().await).await
    }

    async fn delete_icp(&mut self, icp_id: i64) -> Result<(), ApiError> {
        let request = self.authed(
            self.http
                .delete(self.endpoint(&format!("/icp/icps/{icp_id}"))),
        );
        Self::handle_empty(request.send().await).await
    }

    async fn analyze_email(
        &mut self,
        icp_id: i64,
        email_content: &str,
    ) -> Result<EmailAnalysis, ApiError> {
        let body = serde_json::json!({
            "icpId": icp_id,
            "emailContent": email_content,
        });
        let request = self
            .authed(self.http.post(self.endpoint("/analysis/analyze")))
            .json(&body);
        Self::handle(request.send().await).await
    }

    async fn list_audit_logs(&mut self) -> Result<Vec<AuditLog>, ApiError> {
        let request = self.authed(self.http.get(self.endpoint("/audit/logs")));
        Self::handle(request.send().await).await
    }
}

/// Pull a human-readable reason out of an error body, falling back to the
/// HTTP status text
fn error_message(status: reqwest::StatusCode, body: &str) -> String {
    if let Ok(parsed) = serde_json::from_str::<ErrorBody>(body) {
        match parsed.detail {
            Some(serde_json::Value::String(detail)) => return detail,
            // FastAPI validation errors are an array of objects; surface
            // the first message rather than the raw structure
            Some(serde_json::Value::Array(items)) => {
                if let Some(msg) = items
                    .iter()
                    .filter_map(|item| item.get("msg").and_then(|m| m.as_str()))
                    .next()
                {
                    return msg.to_string();
                }
            }
            _ => {}
        }
        if let Some(message) = parsed.message {
            return message;
        }
    }
    format!(
        "Request failed ({})",
        status.canonical_reason().unwrap_or("unknown error")
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_message_prefers_detail_string() {
        let body = r#"{"detail": "Incorrect email or password"}"#;
        assert_eq!(
            error_message(reqwest::StatusCode::UNAUTHORIZED, body),
            "Incorrect email or password"
        );
    }

    #[test]
    fn test_error_message_reads_validation_array() {
        let body = r#"{"detail": [{"loc": ["body", "name"], "msg": "field required"}]}"#;
        assert_eq!(
            error_message(reqwest::StatusCode::UNPROCESSABLE_ENTITY, body),
            "field required"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_message_field() {
        let body = r#"{"message": "Rate limit exceeded"}"#;
        assert_eq!(
            error_message(reqwest::StatusCode::TOO_MANY_REQUESTS, body),
            "Rate limit exceeded"
        );
    }

    #[test]
    fn test_error_message_falls_back_to_status_text() {
        assert_eq!(
            error_message(reqwest::StatusCode::BAD_GATEWAY, "<html>oops</html>"),
            "Request failed (Bad Gateway)"
        );
    }

    #[test]
    fn test_endpoint_join_handles_trailing_slash() {
        let client = ApiClient::new("http://localhost:8000/api/v1/").unwrap();
        assert_eq!(
            client.endpoint("/icp/icps"),
            "http://localhost:8000/api/v1/icp/icps"
        );
    }

    #[test]
    fn test_api_error_displays_message() {
        let err = ApiError {
            code: "422".to_string(),
            message: "field required".to_string(),
        };
        assert_eq!(err.to_string(), "field required");
    }
}
