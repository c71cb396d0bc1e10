//! # Solver API Module
//!
//! ## Aim
//! Talks to the remote PDE solving service: `POST /api/solve` with the flat request
//! body and `GET /api/health` for a liveness probe.
//!
//! ## Main Data Structures and Logic
//! - `HttpClient`: transport trait, implemented for `reqwest::blocking::Client` and
//!   replaceable by a mock in tests
//! - `SolverApi<C>`: endpoint building, request encoding, failure translation
//! - `ApiError`: the user-facing failure kinds; `to_string()` is the banner text
//!
//! ## Failure translation
//! | what happened                          | error                 | message                     |
//! |----------------------------------------|-----------------------|-----------------------------|
//! | no response (refused, reset, DNS, ...) | `ApiError::Connection`| Failed to connect to server |
//! | non-2xx status                         | `ApiError::Server`    | body `error` field, else "Error solving the equation" |
//! | request could not be built            | `ApiError::Request`   | Error sending request       |
//! | health probe failed in any way         | `ApiError::Unavailable` | API unavailable           |
//!
//! A 2xx body that is not a JSON object is not a failure: it comes back as an empty
//! `SolutionPayload` and the grid adapter reports the missing data. Nothing is retried.

use crate::solution_grid::{SolutionPayload, json_type};
use crate::solve_request::SolveRequest;
use log::{info, warn};
use reqwest::blocking::Client;
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde_json::Value;
use thiserror::Error;
use url::Url;

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub body: String,
}

impl HttpResponse {
    pub fn is_success(&self) -> bool {
        (200..300).contains(&self.status)
    }
}

/// Why a request produced no HTTP response at all.
#[derive(Debug, Clone, Error, PartialEq)]
pub enum TransportError {
    #[error("no response received: {0}")]
    NoResponse(String),
    #[error("request could not be sent: {0}")]
    Request(String),
}

impl From<reqwest::Error> for TransportError {
    fn from(e: reqwest::Error) -> Self {
        if e.is_builder() {
            TransportError::Request(e.to_string())
        } else {
            TransportError::NoResponse(e.to_string())
        }
    }
}

/// HTTP client trait for dependency injection
pub trait HttpClient {
    fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError>;
    fn get(&self, url: &str) -> Result<HttpResponse, TransportError>;
}

fn read_response(response: reqwest::blocking::Response) -> Result<HttpResponse, TransportError> {
    let status = response.status().as_u16();
    Ok(response_from_parts(status, response.text()))
}

/// The status line already arrived, so a body that cannot be read is treated as empty.
fn response_from_parts<E: std::fmt::Display>(status: u16, body: Result<String, E>) -> HttpResponse {
    let body = body.unwrap_or_else(|e| {
        warn!("Cannot read body of HTTP {} response: {}", status, e);
        String::new()
    });
    HttpResponse { status, body }
}

impl HttpClient for Client {
    fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
        let response = self
            .post(url)
            .header(CONTENT_TYPE, "application/json")
            .body(body)
            .send()?;
        read_response(response)
    }

    fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
        read_response(Client::get(self, url).send()?)
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ApiError {
    #[error("Failed to connect to server")]
    Connection,
    #[error("{message}")]
    Server { status: u16, message: String },
    #[error("Error sending request")]
    Request,
    #[error("API unavailable")]
    Unavailable,
    #[error("Invalid server URL: {0}")]
    Url(#[from] url::ParseError),
}

impl From<TransportError> for ApiError {
    fn from(e: TransportError) -> Self {
        warn!("Transport failure: {}", e);
        match e {
            TransportError::NoResponse(_) => ApiError::Connection,
            TransportError::Request(_) => ApiError::Request,
        }
    }
}

/// Body of a successful health probe. Both fields are optional.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct HealthStatus {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

pub struct SolverApi<C: HttpClient> {
    client: C,
    base_url: Url,
}

impl SolverApi<Client> {
    pub fn new(base_url: &str) -> Result<Self, ApiError> {
        Self::with_client(Client::new(), base_url)
    }
}

impl<C: HttpClient> SolverApi<C> {
    pub fn with_client(client: C, base_url: &str) -> Result<Self, ApiError> {
        let mut base_url = Url::parse(base_url)?;
        // so that join() appends instead of replacing the last segment
        if !base_url.path().ends_with('/') {
            let path = format!("{}/", base_url.path());
            base_url.set_path(&path);
        }
        Ok(Self { client, base_url })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    pub fn endpoint(&self, name: &str) -> Result<Url, url::ParseError> {
        self.base_url.join("api/")?.join(name)
    }

    pub fn solve(&self, request: &SolveRequest) -> Result<SolutionPayload, ApiError> {
        let url = self.endpoint("solve").map_err(|e| {
            warn!("Cannot build solve URL: {}", e);
            ApiError::Request
        })?;
        let body = serde_json::to_string(request).map_err(|e| {
            warn!("Cannot encode solve request: {}", e);
            ApiError::Request
        })?;

        info!("POST {}", url);
        let response = self.client.post_json(url.as_str(), body)?;
        if !response.is_success() {
            let message = server_error_message(&response.body)
                .unwrap_or_else(|| SOLVE_FAILED_MESSAGE.to_string());
            warn!("Solver returned HTTP {}: {}", response.status, message);
            return Err(ApiError::Server {
                status: response.status,
                message,
            });
        }

        let payload = match serde_json::from_str::<Value>(&response.body) {
            Ok(value @ Value::Object(_)) => {
                serde_json::from_value(value).unwrap_or_else(|e| {
                    warn!("Cannot decode solver response: {}", e);
                    SolutionPayload::default()
                })
            }
            Ok(value) => {
                warn!("Solver response is a JSON {}, not an object", json_type(&value));
                SolutionPayload::default()
            }
            Err(e) => {
                warn!("Solver response is not JSON: {}", e);
                SolutionPayload::default()
            }
        };
        info!(
            "Received result from API: timeSteps {}, spacePoints {}, layers {:?}, minValue {}, maxValue {}",
            payload.time_steps,
            payload.space_points,
            payload.layer_count(),
            payload.min_value,
            payload.max_value
        );
        Ok(payload)
    }

    pub fn check_health(&self) -> Result<HealthStatus, ApiError> {
        let url = self.endpoint("health").map_err(|_| ApiError::Unavailable)?;
        info!("GET {}", url);
        let response = self.client.get(url.as_str()).map_err(|e| {
            warn!("Health check failed: {}", e);
            ApiError::Unavailable
        })?;
        if !response.is_success() {
            warn!("Health check returned HTTP {}", response.status);
            return Err(ApiError::Unavailable);
        }
        Ok(serde_json::from_str(&response.body).unwrap_or_default())
    }
}

const SOLVE_FAILED_MESSAGE: &str = "Error solving the equation";

/// Non-empty `error` string of a JSON error body.
fn server_error_message(body: &str) -> Option<String> {
    let value: Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
}

#[cfg(test)]
pub(crate) mod mock {
    use super::{HttpClient, HttpResponse, TransportError};
    use std::cell::RefCell;
    use std::collections::HashMap;

    // Mock HTTP client for testing
    #[derive(Default)]
    pub struct MockHttpClient {
        responses: HashMap<String, Result<HttpResponse, TransportError>>,
        pub requests: RefCell<Vec<(String, Option<String>)>>,
    }

    impl MockHttpClient {
        pub fn new() -> Self {
            Self::default()
        }

        pub fn mock_response(&mut self, url: &str, status: u16, body: &str) {
            self.responses.insert(
                url.to_string(),
                Ok(HttpResponse {
                    status,
                    body: body.to_string(),
                }),
            );
        }

        pub fn mock_failure(&mut self, url: &str, error: TransportError) {
            self.responses.insert(url.to_string(), Err(error));
        }

        fn respond(&self, url: &str) -> Result<HttpResponse, TransportError> {
            self.responses
                .get(url)
                .cloned()
                .unwrap_or_else(|| Err(TransportError::NoResponse(format!("no mock for {}", url))))
        }
    }

    impl HttpClient for MockHttpClient {
        fn post_json(&self, url: &str, body: String) -> Result<HttpResponse, TransportError> {
            self.requests
                .borrow_mut()
                .push((url.to_string(), Some(body)));
            self.respond(url)
        }

        fn get(&self, url: &str) -> Result<HttpResponse, TransportError> {
            self.requests.borrow_mut().push((url.to_string(), None));
            self.respond(url)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::mock::MockHttpClient;
    use super::*;
    use crate::equation_config::EquationConfig;

    const BASE: &str = "http://localhost:8080";
    const SOLVE_URL: &str = "http://localhost:8080/api/solve";
    const HEALTH_URL: &str = "http://localhost:8080/api/health";

    fn request() -> SolveRequest {
        SolveRequest::build(&EquationConfig::default())
    }

    #[test]
    fn test_endpoint_construction() {
        let api = SolverApi::with_client(MockHttpClient::new(), BASE).unwrap();
        assert_eq!(api.endpoint("solve").unwrap().as_str(), SOLVE_URL);

        let prefixed =
            SolverApi::with_client(MockHttpClient::new(), "http://example.org/pde").unwrap();
        assert_eq!(prefixed.base_url().as_str(), "http://example.org/pde/");
        assert_eq!(
            prefixed.endpoint("health").unwrap().as_str(),
            "http://example.org/pde/api/health"
        );

        assert!(matches!(
            SolverApi::with_client(MockHttpClient::new(), "not a url"),
            Err(ApiError::Url(_))
        ));
    }

    #[test]
    fn test_solve_posts_request_body() {
        let mut client = MockHttpClient::new();
        client.mock_response(
            SOLVE_URL,
            200,
            r#"{"solution":[[1.0]],"xCoordinates":[0.0],"tCoordinates":[0.0],"timeSteps":1,"spacePoints":1}"#,
        );
        let api = SolverApi::with_client(client, BASE).unwrap();
        let payload = api.solve(&request()).unwrap();
        assert_eq!(payload.layer_count(), Some(1));

        let requests = api.client().requests.borrow();
        assert_eq!(requests.len(), 1);
        let (url, body) = &requests[0];
        assert_eq!(url, SOLVE_URL);
        let sent: SolveRequest = serde_json::from_str(body.as_ref().unwrap()).unwrap();
        assert_eq!(sent, request());
    }

    #[test]
    fn test_solve_server_error_message() {
        let mut client = MockHttpClient::new();
        client.mock_response(SOLVE_URL, 400, r#"{"error":"Validation error: h must be positive"}"#);
        let api = SolverApi::with_client(client, BASE).unwrap();
        let err = api.solve(&request()).unwrap_err();
        assert_eq!(
            err,
            ApiError::Server {
                status: 400,
                message: "Validation error: h must be positive".to_string()
            }
        );
        assert_eq!(err.to_string(), "Validation error: h must be positive");
    }

    #[test]
    fn test_solve_server_error_fallback_message() {
        for body in ["", "<html>oops</html>", r#"{"error":""}"#, r#"{"detail":"x"}"#] {
            let mut client = MockHttpClient::new();
            client.mock_response(SOLVE_URL, 500, body);
            let api = SolverApi::with_client(client, BASE).unwrap();
            let err = api.solve(&request()).unwrap_err();
            assert_eq!(err.to_string(), "Error solving the equation");
        }
    }

    #[test]
    fn test_solve_transport_failures() {
        let mut client = MockHttpClient::new();
        client.mock_failure(SOLVE_URL, TransportError::NoResponse("refused".to_string()));
        let api = SolverApi::with_client(client, BASE).unwrap();
        let err = api.solve(&request()).unwrap_err();
        assert_eq!(err, ApiError::Connection);
        assert_eq!(err.to_string(), "Failed to connect to server");

        let mut client = MockHttpClient::new();
        client.mock_failure(SOLVE_URL, TransportError::Request("bad header".to_string()));
        let api = SolverApi::with_client(client, BASE).unwrap();
        let err = api.solve(&request()).unwrap_err();
        assert_eq!(err, ApiError::Request);
        assert_eq!(err.to_string(), "Error sending request");
    }

    #[test]
    fn test_solve_non_object_body_gives_empty_payload() {
        for body in ["[1,2,3]", "not json", "null", ""] {
            let mut client = MockHttpClient::new();
            client.mock_response(SOLVE_URL, 200, body);
            let api = SolverApi::with_client(client, BASE).unwrap();
            assert_eq!(api.solve(&request()), Ok(SolutionPayload::default()));
        }
    }

    #[test]
    fn test_unreadable_body_keeps_status() {
        let response = response_from_parts(500, Err("connection reset while reading body"));
        assert_eq!(response.status, 500);
        assert_eq!(response.body, "");
        assert!(!response.is_success());

        let response = response_from_parts::<String>(200, Ok("{}".to_string()));
        assert!(response.is_success());
        assert_eq!(response.body, "{}");
    }

    #[test]
    fn test_solve_accepts_malformed_object() {
        // shape problems inside an object are left for the grid adapter
        let mut client = MockHttpClient::new();
        client.mock_response(SOLVE_URL, 200, r#"{"solution":"x","extra":true}"#);
        let api = SolverApi::with_client(client, BASE).unwrap();
        let payload = api.solve(&request()).unwrap();
        assert_eq!(payload.solution, Value::from("x"));
        assert_eq!(payload.x_coordinates, Value::Null);
    }

    #[test]
    fn test_health_check() {
        let mut client = MockHttpClient::new();
        client.mock_response(
            HEALTH_URL,
            200,
            r#"{"status":"OK","message":"PDE Solver API is running"}"#,
        );
        let api = SolverApi::with_client(client, BASE).unwrap();
        let health = api.check_health().unwrap();
        assert_eq!(health.status.as_deref(), Some("OK"));

        let mut client = MockHttpClient::new();
        client.mock_response(HEALTH_URL, 200, "OK");
        let api = SolverApi::with_client(client, BASE).unwrap();
        assert_eq!(api.check_health(), Ok(HealthStatus::default()));

        let mut client = MockHttpClient::new();
        client.mock_response(HEALTH_URL, 503, "");
        let api = SolverApi::with_client(client, BASE).unwrap();
        assert_eq!(api.check_health(), Err(ApiError::Unavailable));

        let api = SolverApi::with_client(MockHttpClient::new(), BASE).unwrap();
        let err = api.check_health().unwrap_err();
        assert_eq!(err.to_string(), "API unavailable");
    }

    #[test]
    #[ignore = "opens a socket to 127.0.0.1:1"]
    fn test_real_client_connection_refused() {
        // nothing listens on port 1 of the loopback interface
        let client = Client::builder().no_proxy().build().unwrap();
        let api = SolverApi::with_client(client, "http://127.0.0.1:1").unwrap();
        assert_eq!(api.solve(&request()), Err(ApiError::Connection));
        assert_eq!(api.check_health(), Err(ApiError::Unavailable));
    }
}
