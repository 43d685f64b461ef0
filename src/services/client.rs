use std::sync::Arc;

use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;
use url::Url;

use crate::error::RequestError;

const JSON_CONTENT_TYPE: &str = "application/json";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Method {
    #[default]
    Get,
    Post,
    Put,
    Delete,
}

impl Method {
    pub fn as_str(self) -> &'static str {
        match self {
            Method::Get => "GET",
            Method::Post => "POST",
            Method::Put => "PUT",
            Method::Delete => "DELETE",
        }
    }
}

/// A location below the API root: extra path segments plus query pairs.
/// Segments are escaped when the URL is built.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Endpoint {
    segments: Vec<String>,
    query: Vec<(String, String)>,
}

impl Endpoint {
    pub fn root() -> Self {
        Self::default()
    }

    pub fn segment(mut self, segment: impl Into<String>) -> Self {
        self.segments.push(segment.into());
        self
    }

    pub fn query(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.query.push((key.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct RequestOptions {
    pub method: Method,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl RequestOptions {
    pub fn method(method: Method) -> Self {
        Self {
            method,
            ..Self::default()
        }
    }

    pub fn with_body(mut self, body: String) -> Self {
        self.body = Some(body);
        self
    }

    pub fn with_header(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((name.into(), value.into()));
        self
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpRequest {
    pub method: Method,
    pub url: Url,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl HttpRequest {
    /// Path plus query, e.g. `/api/travels/search/price?minPrice=1&maxPrice=2`.
    pub fn target(&self) -> String {
        match self.url.query() {
            Some(query) => format!("{}?{}", self.url.path(), query),
            None => self.url.path().to_string(),
        }
    }

    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(key, _)| key.eq_ignore_ascii_case(name))
            .map(|(_, value)| value.as_str())
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct HttpResponse {
    pub status: u16,
    pub content_type: Option<String>,
    pub body: String,
}

impl HttpResponse {
    pub fn json(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some(JSON_CONTENT_TYPE.to_string()),
            body: body.into(),
        }
    }

    pub fn text(status: u16, body: impl Into<String>) -> Self {
        Self {
            status,
            content_type: Some("text/plain".to_string()),
            body: body.into(),
        }
    }
}

/// Sends one request over the wire. Only network-level failures are errors
/// here; status handling belongs to [`ApiClient`].
#[async_trait]
pub trait Transport: Send + Sync {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError>;
}

#[derive(Clone, Default)]
pub struct ReqwestTransport {
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, RequestError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.client.request(method, request.url);
        for (name, value) in request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }

        let response = builder
            .send()
            .await
            .map_err(|err| RequestError::Network(err.to_string()))?;
        let status = response.status().as_u16();
        let content_type = response
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map(str::to_string);
        let body = response
            .text()
            .await
            .map_err(|err| RequestError::Network(err.to_string()))?;

        Ok(HttpResponse {
            status,
            content_type,
            body,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Payload {
    Json(Value),
    Text(String),
}

/// JSON request wrapper bound to a fixed API root.
#[derive(Clone)]
pub struct ApiClient {
    root: Url,
    transport: Arc<dyn Transport>,
}

impl ApiClient {
    pub fn new(root: Url, transport: Arc<dyn Transport>) -> Self {
        Self { root, transport }
    }

    pub fn root(&self) -> &Url {
        &self.root
    }

    pub fn url_for(&self, endpoint: &Endpoint) -> Url {
        let mut url = self.root.clone();
        if !endpoint.segments.is_empty() {
            if let Ok(mut segments) = url.path_segments_mut() {
                segments.pop_if_empty().extend(&endpoint.segments);
            }
        }
        if !endpoint.query.is_empty() {
            url.query_pairs_mut().extend_pairs(&endpoint.query);
        }
        url
    }

    pub async fn request(
        &self,
        endpoint: &Endpoint,
        options: RequestOptions,
    ) -> Result<Payload, RequestError> {
        let request = HttpRequest {
            method: options.method,
            url: self.url_for(endpoint),
            headers: merge_headers(options.headers),
            body: options.body,
        };
        debug!("{} {}", request.method.as_str(), request.url);

        let response = self.transport.send(request).await?;
        if !(200..=299).contains(&response.status) {
            return Err(RequestError::Status(response.status));
        }

        let is_json = response
            .content_type
            .as_deref()
            .is_some_and(|value| value.contains(JSON_CONTENT_TYPE));
        if is_json {
            serde_json::from_str(&response.body)
                .map(Payload::Json)
                .map_err(|err| RequestError::Decode(err.to_string()))
        } else {
            Ok(Payload::Text(response.body))
        }
    }
}

fn merge_headers(overrides: Vec<(String, String)>) -> Vec<(String, String)> {
    let mut headers = vec![("Content-Type".to_string(), JSON_CONTENT_TYPE.to_string())];
    for (name, value) in overrides {
        headers.retain(|(existing, _)| !existing.eq_ignore_ascii_case(&name));
        headers.push((name, value));
    }
    headers
}
