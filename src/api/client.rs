//! Tracker REST API Client
//!
//! Typed calls against the tracker API. Every call goes through one
//! [`HttpTransport`]; timeouts and the GET retry policy come from
//! [`ApiConfig`].

use serde::de::DeserializeOwned;
use serde::Serialize;

use super::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport};
use crate::config::ApiConfig;
use crate::error::{ClientError, ClientResult};
use crate::models::{
    AddProblemResponse, AuthResponse, DashboardData, ErrorBody, LeaderboardEntry, LoginRequest,
    NewProblem, RegisterRequest,
};

/// Tracker REST API client
pub struct ApiClient<T> {
    transport: T,
    config: ApiConfig,
}

impl<T: HttpTransport> ApiClient<T> {
    pub fn new(transport: T, config: ApiConfig) -> Self {
        Self { transport, config }
    }

    /// Get the current configuration
    pub fn config(&self) -> &ApiConfig {
        &self.config
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Probe whether `token` is still accepted.
    ///
    /// The server has no dedicated endpoint, so this is the dashboard call;
    /// callers reuse the returned data instead of fetching again.
    pub async fn check_session(&self, token: &str) -> ClientResult<DashboardData> {
        self.fetch_dashboard(token).await
    }

    pub async fn login(&self, email: &str, password: &str) -> ClientResult<AuthResponse> {
        let body = LoginRequest {
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/login", None, &body).await
    }

    pub async fn register(
        &self,
        username: &str,
        email: &str,
        password: &str,
    ) -> ClientResult<AuthResponse> {
        let body = RegisterRequest {
            username: username.to_string(),
            email: email.to_string(),
            password: password.to_string(),
        };
        self.post("/register", None, &body).await
    }

    pub async fn fetch_dashboard(&self, token: &str) -> ClientResult<DashboardData> {
        self.get("/dashboard", Some(token)).await
    }

    pub async fn add_problem(
        &self,
        token: &str,
        problem: &NewProblem,
    ) -> ClientResult<AddProblemResponse> {
        self.post("/problems", Some(token), problem).await
    }

    /// Public ranking, already ordered by the server
    pub async fn fetch_leaderboard(&self) -> ClientResult<Vec<LeaderboardEntry>> {
        self.get("/leaderboard", None).await
    }

    fn request(&self, method: HttpMethod, path: &str, token: Option<&str>) -> HttpRequest {
        let url = format!("{}{}", self.config.base(), path);
        let mut request = HttpRequest::new(method, url);
        if let Some(timeout) = self.config.request_timeout() {
            request = request.timeout(timeout);
        }
        match token {
            Some(token) => request.bearer(token),
            None => request,
        }
    }

    async fn get<R: DeserializeOwned>(&self, path: &str, token: Option<&str>) -> ClientResult<R> {
        let request = self.request(HttpMethod::Get, path, token);
        self.execute(request).await
    }

    async fn post<B: Serialize, R: DeserializeOwned>(
        &self,
        path: &str,
        token: Option<&str>,
        body: &B,
    ) -> ClientResult<R> {
        let request = self.request(HttpMethod::Post, path, token).json(body)?;
        self.execute(request).await
    }

    /// Send with retry logic.
    ///
    /// Only GETs are retried and only when no response arrived; any server
    /// answer, success or not, ends the loop.
    async fn execute<R: DeserializeOwned>(&self, request: HttpRequest) -> ClientResult<R> {
        let attempts = if request.method.is_idempotent() {
            1 + self.config.max_retries
        } else {
            1
        };
        let mut last_error = ClientError::Network("no attempt made".to_string());

        for attempt in 0..attempts {
            if attempt > 0 {
                let delay = self.config.retry_delay(attempt);
                tracing::warn!(
                    method = request.method.as_str(),
                    url = %request.url,
                    attempt,
                    error = %last_error,
                    "Retrying request in {:?}",
                    delay
                );
                self.transport.backoff(delay).await;
            }

            tracing::debug!(
                method = request.method.as_str(),
                url = %request.url,
                attempt,
                "Sending request"
            );

            match self.transport.send(request.clone()).await {
                Ok(response) => return decode_response(response),
                Err(e) => {
                    last_error = e.into();
                    continue;
                }
            }
        }

        Err(last_error)
    }
}

fn decode_response<R: DeserializeOwned>(response: HttpResponse) -> ClientResult<R> {
    if response.is_success() {
        return serde_json::from_str(&response.body).map_err(ClientError::from);
    }

    let message = serde_json::from_str::<ErrorBody>(&response.body)
        .ok()
        .and_then(|body| body.error);
    tracing::debug!(status = response.status, ?message, "Request rejected");

    Err(ClientError::Api {
        status: response.status,
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::stub::{StubTransport, STUB_BASE};
    use crate::api::transport::TransportError;
    use crate::models::Difficulty;
    use serde_json::json;
    use std::time::Duration;

    fn config() -> ApiConfig {
        ApiConfig {
            base_url: format!("{}/", STUB_BASE),
            ..ApiConfig::default()
        }
    }

    fn user_json(name: &str) -> serde_json::Value {
        json!({
            "username": name,
            "totalScore": 30,
            "problemsSolved": 2,
            "easyCount": 1,
            "mediumCount": 1,
            "hardCount": 0
        })
    }

    #[tokio::test]
    async fn test_login_sends_json_without_auth() {
        let stub = StubTransport::new();
        stub.on(
            HttpMethod::Post,
            "/login",
            200,
            json!({"token": "jwt", "user": user_json("ada")}),
        );
        let client = ApiClient::new(stub, config());

        let auth = client.login("ada@x.io", "hunter2").await.unwrap();
        assert_eq!(auth.token, "jwt");
        assert_eq!(auth.user.username, "ada");

        let requests = client.transport().requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].url, "http://stub.test/login");
        assert_eq!(requests[0].header_value("Authorization"), None);
        assert_eq!(requests[0].header_value("Content-Type"), Some("application/json"));
        let body: serde_json::Value =
            serde_json::from_str(requests[0].body.as_deref().unwrap()).unwrap();
        assert_eq!(body, json!({"email": "ada@x.io", "password": "hunter2"}));
        assert_eq!(requests[0].timeout, Some(Duration::from_secs(30)));
    }

    #[tokio::test]
    async fn test_zero_timeout_sends_none() {
        let stub = StubTransport::new();
        stub.on(HttpMethod::Get, "/leaderboard", 200, json!([]));
        let client = ApiClient::new(
            stub,
            ApiConfig {
                request_timeout_secs: 0,
                ..config()
            },
        );

        client.fetch_leaderboard().await.unwrap();
        assert_eq!(client.transport().requests()[0].timeout, None);
    }

    #[tokio::test]
    async fn test_dashboard_attaches_bearer() {
        let stub = StubTransport::new();
        stub.on(
            HttpMethod::Get,
            "/dashboard",
            200,
            json!({"user": user_json("ada"), "recentProblems": []}),
        );
        let client = ApiClient::new(stub, config());

        let data = client.fetch_dashboard("jwt").await.unwrap();
        assert!(data.recent_problems.is_empty());

        let requests = client.transport().requests();
        assert_eq!(requests[0].header_value("Authorization"), Some("Bearer jwt"));
        assert_eq!(requests[0].body, None);
    }

    #[tokio::test]
    async fn test_add_problem_body_and_auth() {
        let stub = StubTransport::new();
        stub.on(
            HttpMethod::Post,
            "/problems",
            201,
            json!({"problem": {
                "title": "Two Sum",
                "difficulty": "Easy",
                "link": "",
                "points": 10,
                "solvedAt": "2024-03-05T12:00:00Z"
            }}),
        );
        let client = ApiClient::new(stub, config());

        let created = client
            .add_problem("jwt", &NewProblem::new("Two Sum", Difficulty::Easy, ""))
            .await
            .unwrap();
        assert_eq!(created.problem.points, 10);

        let request = &client.transport().requests()[0];
        assert_eq!(request.header_value("Authorization"), Some("Bearer jwt"));
        assert!(request.body.as_deref().unwrap().contains(r#""difficulty":"Easy""#));
    }

    #[tokio::test]
    async fn test_error_message_from_body() {
        let stub = StubTransport::new();
        stub.on(HttpMethod::Post, "/login", 400, json!({"error": "Invalid credentials"}));
        let client = ApiClient::new(stub, config());

        let err = client.login("a", "b").await.unwrap_err();
        assert_eq!(
            err,
            ClientError::Api {
                status: 400,
                message: Some("Invalid credentials".to_string())
            }
        );
    }

    #[tokio::test]
    async fn test_error_without_json_body() {
        let stub = StubTransport::new();
        stub.push_raw(HttpMethod::Get, "/leaderboard", 502, "<html>Bad Gateway</html>");
        let client = ApiClient::new(stub, config());

        let err = client.fetch_leaderboard().await.unwrap_err();
        assert_eq!(err, ClientError::Api { status: 502, message: None });
    }

    #[tokio::test]
    async fn test_decode_error_on_bad_success_body() {
        let stub = StubTransport::new();
        stub.on(HttpMethod::Get, "/leaderboard", 200, json!({"not": "a list"}));
        let client = ApiClient::new(stub, config());

        assert!(matches!(
            client.fetch_leaderboard().await,
            Err(ClientError::Decode(_))
        ));
    }

    #[tokio::test]
    async fn test_single_attempt_by_default() {
        let stub = StubTransport::new();
        stub.fail(HttpMethod::Get, "/leaderboard", TransportError::Connect("refused".into()));
        let client = ApiClient::new(stub, config());

        let err = client.fetch_leaderboard().await.unwrap_err();
        assert!(err.is_transport());
        assert_eq!(client.transport().count(HttpMethod::Get, "/leaderboard"), 1);
        assert!(client.transport().backoffs().is_empty());
    }

    #[tokio::test]
    async fn test_get_retries_transport_failures() {
        let stub = StubTransport::new();
        stub.fail(HttpMethod::Get, "/leaderboard", TransportError::Timeout);
        stub.fail(HttpMethod::Get, "/leaderboard", TransportError::Connect("reset".into()));
        stub.on(HttpMethod::Get, "/leaderboard", 200, json!([user_json("ada")]));
        let client = ApiClient::new(
            stub,
            ApiConfig {
                max_retries: 2,
                retry_backoff_ms: 100,
                ..config()
            },
        );

        let board = client.fetch_leaderboard().await.unwrap();
        assert_eq!(board.len(), 1);
        assert_eq!(client.transport().count(HttpMethod::Get, "/leaderboard"), 3);
        assert_eq!(
            client.transport().backoffs(),
            vec![Duration::from_millis(100), Duration::from_millis(400)]
        );
    }

    #[tokio::test]
    async fn test_retries_exhausted_returns_last_error() {
        let stub = StubTransport::new();
        stub.fail(HttpMethod::Get, "/dashboard", TransportError::Timeout);
        let client = ApiClient::new(stub, ApiConfig { max_retries: 1, ..config() });

        assert_eq!(client.fetch_dashboard("t").await, Err(ClientError::Timeout));
        assert_eq!(client.transport().count(HttpMethod::Get, "/dashboard"), 2);
    }

    #[tokio::test]
    async fn test_server_errors_and_posts_not_retried() {
        let stub = StubTransport::new();
        stub.on(HttpMethod::Get, "/dashboard", 500, json!({"error": "boom"}));
        stub.fail(HttpMethod::Post, "/login", TransportError::Timeout);
        let client = ApiClient::new(stub, ApiConfig { max_retries: 3, ..config() });

        assert!(client.fetch_dashboard("t").await.is_err());
        assert!(client.login("a", "b").await.is_err());
        assert_eq!(client.transport().count(HttpMethod::Get, "/dashboard"), 1);
        assert_eq!(client.transport().count(HttpMethod::Post, "/login"), 1);
    }
}
