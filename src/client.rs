use reqwest::header::{HeaderMap, HeaderValue};
use reqwest::{Client as ReqwestClient, Response, header};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use std::env;
use std::time::Duration;

use crate::error::{Error, Result};
use crate::observability::{CLIENT_REQUEST_ERRORS, CLIENT_REQUESTS};
use crate::types::{
    AgentList, HealthStatus, MemoryStats, TaskRequest, TaskResponse, VectorStats,
};

const DEFAULT_BASE_URL: &str = "http://127.0.0.1:8000/";
const DEFAULT_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the Deskmate orchestrator backend.
///
/// The backend exposes a small unauthenticated JSON surface: a health probe,
/// an agent directory, two store-statistics endpoints, and the task-dispatch
/// endpoint the chat pipeline posts to.
#[derive(Debug, Clone)]
pub struct Deskmate {
    client: ReqwestClient,
    base_url: String,
    timeout: Duration,
}

impl Deskmate {
    /// Create a new client.
    ///
    /// The base URL can be provided directly or read from the
    /// DESKMATE_BASE_URL environment variable; it defaults to the
    /// orchestrator's local development address.
    pub fn new(base_url: Option<String>) -> Result<Self> {
        Self::with_options(base_url, None)
    }

    /// Create a new client with custom settings.
    pub fn with_options(base_url: Option<String>, timeout: Option<Duration>) -> Result<Self> {
        let base_url = base_url
            .or_else(|| env::var("DESKMATE_BASE_URL").ok())
            .unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        // Trailing slash keeps endpoint joins purely textual.
        let base_url = if base_url.ends_with('/') {
            base_url
        } else {
            format!("{base_url}/")
        };
        url::Url::parse(&base_url)
            .map_err(|e| Error::url(format!("Invalid base URL {base_url:?}: {e}"), Some(e)))?;

        let timeout = timeout.unwrap_or(DEFAULT_TIMEOUT);
        let client = ReqwestClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| {
                Error::http_client(
                    format!("Failed to build HTTP client: {}", e),
                    Some(Box::new(e)),
                )
            })?;

        Ok(Self {
            client,
            base_url,
            timeout,
        })
    }

    /// Returns the resolved base URL.
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create and return default headers for backend requests.
    fn default_headers(&self) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            header::CONTENT_TYPE,
            HeaderValue::from_static("application/json"),
        );
        headers.insert(header::ACCEPT, HeaderValue::from_static("application/json"));
        headers
    }

    fn endpoint(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path.trim_start_matches('/'))
    }

    fn map_request_error(&self, e: reqwest::Error) -> Error {
        if e.is_timeout() {
            Error::timeout(
                format!("Request timed out: {}", e),
                Some(self.timeout.as_secs_f64()),
            )
        } else if e.is_connect() {
            Error::connection(format!("Connection error: {}", e), Some(Box::new(e)))
        } else {
            Error::http_client(format!("Request failed: {}", e), Some(Box::new(e)))
        }
    }

    /// Process backend response errors and convert to our Error type
    async fn process_error_response(response: Response) -> Error {
        let status_code = response.status().as_u16();

        // The backend is FastAPI-shaped: error bodies carry a `detail`
        // field that is either a string or a validation structure.
        #[derive(Deserialize)]
        struct ErrorResponse {
            detail: Option<serde_json::Value>,
        }

        let error_body = match response.text().await {
            Ok(body) => body,
            Err(e) => {
                return Error::http_client(
                    format!("Failed to read error response: {}", e),
                    Some(Box::new(e)),
                );
            }
        };

        let detail = serde_json::from_str::<ErrorResponse>(&error_body)
            .ok()
            .and_then(|e| e.detail);
        let message = match detail {
            Some(serde_json::Value::String(text)) => text,
            Some(other) => other.to_string(),
            None => error_body,
        };

        match status_code {
            400 | 422 => Error::bad_request(message, None),
            404 => Error::not_found(message),
            408 => Error::timeout(message, None),
            500 => Error::internal_server(message),
            502..=504 => Error::service_unavailable(message),
            _ => Error::api(status_code, message),
        }
    }

    async fn get_json<T: DeserializeOwned>(&self, path: &str) -> Result<T> {
        CLIENT_REQUESTS.click();
        let response = self
            .client
            .get(self.endpoint(path))
            .headers(self.default_headers())
            .send()
            .await
            .map_err(|e| {
                CLIENT_REQUEST_ERRORS.click();
                self.map_request_error(e)
            })?;

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<T>().await.map_err(|e| {
            CLIENT_REQUEST_ERRORS.click();
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }

    /// Fetch the backend health probe.
    pub async fn health(&self) -> Result<HealthStatus> {
        self.get_json("health").await
    }

    /// Returns true iff the backend is reachable and reports itself healthy.
    ///
    /// Every failure mode (timeout, refused connection, non-2xx, parse
    /// error, a status other than the healthy literal) collapses to `false`;
    /// nothing propagates to the caller.
    pub async fn is_healthy(&self) -> bool {
        match self.health().await {
            Ok(status) => status.is_healthy(),
            Err(_) => false,
        }
    }

    /// Fetch the directory of registered agents.
    pub async fn list_agents(&self) -> Result<AgentList> {
        self.get_json("api/agents").await
    }

    /// Fetch memory-store statistics.
    pub async fn memory_stats(&self) -> Result<MemoryStats> {
        self.get_json("api/memory/stats").await
    }

    /// Fetch vector-index statistics.
    pub async fn vector_stats(&self) -> Result<VectorStats> {
        self.get_json("api/vector_db/stats").await
    }

    /// Submit a task to the orchestrator and return its structured result.
    pub async fn submit_task(&self, request: TaskRequest) -> Result<TaskResponse> {
        CLIENT_REQUESTS.click();
        let response = self
            .client
            .post(self.endpoint("api/task"))
            .headers(self.default_headers())
            .json(&request)
            .send()
            .await
            .map_err(|e| {
                CLIENT_REQUEST_ERRORS.click();
                self.map_request_error(e)
            })?;

        if !response.status().is_success() {
            CLIENT_REQUEST_ERRORS.click();
            return Err(Self::process_error_response(response).await);
        }

        response.json::<TaskResponse>().await.map_err(|e| {
            CLIENT_REQUEST_ERRORS.click();
            Error::serialization(
                format!("Failed to parse response: {}", e),
                Some(Box::new(e)),
            )
        })
    }
}
