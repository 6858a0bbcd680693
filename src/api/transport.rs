//! HTTP transport seam
//!
//! The API client builds [`HttpRequest`]s and hands them to an
//! [`HttpTransport`]. Native hosts plug in reqwest, the browser plugs in
//! `fetch` via gloo-net. Futures are `!Send`: the browser is single-threaded.

use async_trait::async_trait;
use serde::Serialize;
use std::rc::Rc;
use std::time::Duration;
use thiserror::Error;

use crate::error::{ClientError, ClientResult};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }

    /// Safe to send twice
    pub fn is_idempotent(&self) -> bool {
        matches!(self, HttpMethod::Get)
    }
}

/// A fully resolved request
#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
    pub timeout: Option<Duration>,
}

impl HttpRequest {
    pub fn new(method: HttpMethod, url: impl Into<String>) -> Self {
        Self {
            method,
            url: url.into(),
            headers: Vec::new(),
            body: None,
            timeout: None,
        }
    }

    pub fn header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }

    pub fn bearer(self, token: &str) -> Self {
        self.header("Authorization", format!("Bearer {}", token))
    }

    pub fn json<B: Serialize>(mut self, body: &B) -> ClientResult<Self> {
        let body = serde_json::to_string(body)?;
        self.body = Some(body);
        Ok(self.header("Content-Type", "application/json"))
    }

    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.timeout = Some(timeout);
        self
    }

    /// Case-insensitive header lookup
    pub fn header_value(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(n, _)| n.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }
}

/// Status and raw body of a response
#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn new(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            body: body.into(),
        }
    }

    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Failures where no response arrived
#[derive(Error, Debug, Clone, PartialEq)]
pub enum TransportError {
    #[error("request timed out")]
    Timeout,

    #[error("connection failed: {0}")]
    Connect(String),

    #[error("request failed: {0}")]
    Other(String),
}

impl From<TransportError> for ClientError {
    fn from(err: TransportError) -> Self {
        match err {
            TransportError::Timeout => ClientError::Timeout,
            other => ClientError::Network(other.to_string()),
        }
    }
}

/// Sends one request and waits for its response
#[async_trait(?Send)]
pub trait HttpTransport {
    /// Honors `request.timeout` when set
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// Wait between retry attempts
    async fn backoff(&self, delay: Duration) {
        let _ = delay;
    }
}

#[async_trait(?Send)]
impl<T: HttpTransport + ?Sized> HttpTransport for Rc<T> {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).send(request).await
    }

    async fn backoff(&self, delay: Duration) {
        (**self).backoff(delay).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_request_builder() {
        let request = HttpRequest::new(HttpMethod::Post, "http://x/login")
            .bearer("t0k")
            .json(&serde_json::json!({"email": "a@b.c"}))
            .unwrap()
            .timeout(Duration::from_secs(5));

        assert_eq!(request.header_value("authorization"), Some("Bearer t0k"));
        assert_eq!(request.header_value("Content-Type"), Some("application/json"));
        assert_eq!(request.body.as_deref(), Some(r#"{"email":"a@b.c"}"#));
        assert_eq!(request.timeout, Some(Duration::from_secs(5)));
    }

    #[test]
    fn test_success_range() {
        assert!(HttpResponse::new(200, "").is_success());
        assert!(HttpResponse::new(201, "").is_success());
        assert!(!HttpResponse::new(304, "").is_success());
        assert!(!HttpResponse::new(401, "").is_success());
    }

    #[test]
    fn test_transport_error_conversion() {
        assert_eq!(ClientError::from(TransportError::Timeout), ClientError::Timeout);
        assert!(matches!(
            ClientError::from(TransportError::Connect("refused".into())),
            ClientError::Network(_)
        ));
    }
}
