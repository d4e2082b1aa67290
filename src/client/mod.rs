//! Client layer - talks to the catalog API from the operator's side.
//!
//! [`ApiClient`] is the configured HTTP client, [`Fetcher`] is the cancellable fetch hook a
//! view owns, and [`products`] builds the requests for each catalog endpoint.

mod error;
mod fetcher;
pub mod products;

pub use error::FetchError;
pub use fetcher::{FetchState, Fetcher};

use reqwest::{Method, header::HeaderMap};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Base URL of a locally running catalog service.
pub const DEFAULT_BASE_URL: &str = "http://localhost:4040/api";

/// Description of one API call: method, path relative to the base URL, and optional
/// JSON body, query parameters and headers.
#[derive(Debug, Clone)]
pub struct FetchRequest {
    /// HTTP method
    pub method: Method,
    /// Path appended to the client's base URL, starting with `/`
    pub path: String,
    /// JSON body, if any
    pub body: Option<Value>,
    /// Query string pairs
    pub query: Vec<(String, String)>,
    /// Extra request headers
    pub headers: HeaderMap,
}

impl FetchRequest {
    /// A request with no body, query or extra headers.
    #[must_use]
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        Self {
            method,
            path: path.into(),
            body: None,
            query: Vec::new(),
            headers: HeaderMap::new(),
        }
    }

    /// Shorthand for a `GET` request.
    #[must_use]
    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::GET, path)
    }

    /// Shorthand for a `POST` request.
    #[must_use]
    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::POST, path)
    }

    /// Shorthand for a `PUT` request.
    #[must_use]
    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::PUT, path)
    }

    /// Shorthand for a `DELETE` request.
    #[must_use]
    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::DELETE, path)
    }

    /// Sets the JSON body.
    #[must_use]
    pub fn with_body(mut self, body: Value) -> Self {
        self.body = Some(body);
        self
    }

    /// Appends a query parameter.
    #[must_use]
    pub fn with_query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }

    /// Adds headers, replacing any with the same name.
    #[must_use]
    pub fn with_headers(mut self, headers: HeaderMap) -> Self {
        self.headers.extend(headers);
        self
    }
}

/// HTTP client bound to one catalog API base URL.
#[derive(Debug, Clone)]
pub struct ApiClient {
    http: reqwest::Client,
    base_url: String,
}

impl ApiClient {
    /// Creates a client for the API rooted at `base_url` (e.g. `http://localhost:4040/api`).
    ///
    /// # Errors
    /// Returns [`FetchError::Network`] if the underlying HTTP client cannot be built.
    pub fn new(base_url: &str) -> Result<Self, FetchError> {
        let http = reqwest::Client::builder()
            .user_agent(concat!("product-catalog/", env!("CARGO_PKG_VERSION")))
            .build()
            .map_err(|e| FetchError::Network(e.to_string()))?;

        Ok(Self {
            http,
            base_url: base_url.trim_end_matches('/').to_string(),
        })
    }

    /// The base URL requests are resolved against.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Issues `request` and decodes a successful response body as `T`.
    ///
    /// # Errors
    /// - [`FetchError::Network`] if no response arrived
    /// - [`FetchError::Validation`] / [`FetchError::NotFound`] for 400 / 404 responses
    /// - [`FetchError::Unknown`] for other failure statuses or an undecodable body
    pub async fn send<T: DeserializeOwned>(&self, request: &FetchRequest) -> Result<T, FetchError> {
        let url = format!("{}{}", self.base_url, request.path);
        tracing::debug!(method = %request.method, %url, "Sending request");

        let mut builder = self
            .http
            .request(request.method.clone(), &url)
            .headers(request.headers.clone());
        if !request.query.is_empty() {
            builder = builder.query(&request.query);
        }
        if let Some(body) = &request.body {
            builder = builder.json(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| FetchError::Network(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.bytes().await.unwrap_or_default();
            return Err(FetchError::from_response(status.as_u16(), &body));
        }

        response
            .json()
            .await
            .map_err(|e| FetchError::Unknown(format!("Invalid response body: {e}")))
    }
}

impl Default for ApiClient {
    fn default() -> Self {
        Self {
            http: reqwest::Client::new(),
            base_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}
