//! Mock HTTP transport for testing.

use crate::errors::TransportError;
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use reqwest::StatusCode;
use std::collections::VecDeque;
use std::sync::Mutex;
use tokio::io::AsyncReadExt;
use url::Url;

/// Mock HTTP response.
#[derive(Debug, Clone)]
pub struct MockResponse {
    /// HTTP status code.
    pub status: u16,
    /// Response headers.
    pub headers: Vec<(String, String)>,
    /// Response body.
    pub body: Bytes,
}

impl MockResponse {
    /// Create a successful response with empty body.
    pub fn ok() -> Self {
        Self::with_status(200, Bytes::new())
    }

    /// Create a successful response with body.
    pub fn ok_with_body(body: impl Into<Bytes>) -> Self {
        Self::with_status(200, body)
    }

    /// Create an error response.
    pub fn error(status: u16, body: impl Into<Bytes>) -> Self {
        Self::with_status(status, body)
    }

    /// Create a response with an arbitrary status.
    pub fn with_status(status: u16, body: impl Into<Bytes>) -> Self {
        Self {
            status,
            headers: Vec::new(),
            body: body.into(),
        }
    }

    /// Add a header to the response.
    pub fn with_header(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.headers.push((key.into(), value.into()));
        self
    }

    fn into_http_response(self) -> Result<HttpResponse, TransportError> {
        let status = StatusCode::from_u16(self.status)
            .map_err(|e| TransportError::Http(format!("Invalid mock status: {}", e)))?;

        let mut headers = HeaderMap::new();
        for (key, value) in self.headers {
            let name = HeaderName::try_from(key.as_str())
                .map_err(|e| TransportError::Http(format!("Invalid mock header: {}", e)))?;
            let value = HeaderValue::try_from(value.as_str())
                .map_err(|e| TransportError::Http(format!("Invalid mock header: {}", e)))?;
            headers.append(name, value);
        }

        Ok(HttpResponse::new(status, headers, self.body))
    }
}

/// File part captured from a multipart request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RecordedFile {
    /// Form field name.
    pub field_name: String,
    /// File name sent to the server.
    pub file_name: String,
    /// File contents.
    pub content: Bytes,
}

/// Request captured by [`MockTransport`].
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Multipart text fields, in order.
    pub fields: Vec<(String, String)>,
    /// Multipart file part, if any.
    pub file: Option<RecordedFile>,
}

impl RecordedRequest {
    /// Value of a query parameter, percent-decoded.
    pub fn query_param(&self, name: &str) -> Option<String> {
        self.url
            .query_pairs()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.into_owned())
    }

    /// Value of a header.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Value of a multipart text field.
    pub fn field(&self, name: &str) -> Option<&str> {
        self.fields
            .iter()
            .find(|(key, _)| key == name)
            .map(|(_, value)| value.as_str())
    }
}

/// Mock HTTP transport for testing.
pub struct MockTransport {
    /// Queue of responses to return.
    responses: Mutex<VecDeque<MockResponse>>,
    /// Recorded requests.
    requests: Mutex<Vec<RecordedRequest>>,
    /// Error returned instead of a response, if set.
    failure: Mutex<Option<String>>,
}

impl MockTransport {
    /// Create a mock transport answering every request with 200 and no body.
    pub fn new() -> Self {
        Self::with_responses(Vec::new())
    }

    /// Create a mock transport with queued responses.
    ///
    /// Once the queue is empty, requests are answered with 200 and no body.
    pub fn with_responses(responses: Vec<MockResponse>) -> Self {
        Self {
            responses: Mutex::new(responses.into()),
            requests: Mutex::new(Vec::new()),
            failure: Mutex::new(None),
        }
    }

    /// Create a mock transport failing every request with a network error.
    pub fn failing(message: impl Into<String>) -> Self {
        let transport = Self::new();
        *transport.failure.lock().unwrap() = Some(message.into());
        transport
    }

    /// Queue a response to return.
    pub fn queue_response(&self, response: MockResponse) {
        self.responses.lock().unwrap().push_back(response);
    }

    /// Get all recorded requests.
    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.requests.lock().unwrap().clone()
    }

    /// Get the number of requests made.
    pub fn request_count(&self) -> usize {
        self.requests.lock().unwrap().len()
    }

    /// Get the last request made.
    pub fn last_request(&self) -> Option<RecordedRequest> {
        self.requests.lock().unwrap().last().cloned()
    }
}

impl Default for MockTransport {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl HttpTransport for MockTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let (fields, file) = match request.body {
            RequestBody::Empty => (Vec::new(), None),
            RequestBody::Multipart(form) => {
                let mut part = form.file;
                let mut content = Vec::new();
                part.file
                    .read_to_end(&mut content)
                    .await
                    .map_err(|e| TransportError::Http(format!("Failed to read file part: {}", e)))?;

                let file = RecordedFile {
                    field_name: part.field_name,
                    file_name: part.file_name,
                    content: Bytes::from(content),
                };
                (form.fields, Some(file))
            }
        };

        // Record the request
        self.requests.lock().unwrap().push(RecordedRequest {
            method: request.method,
            url: request.url,
            headers: request.headers,
            fields,
            file,
        });

        if let Some(message) = self.failure.lock().unwrap().clone() {
            return Err(TransportError::Network(message));
        }

        let response = self
            .responses
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(MockResponse::ok);

        response.into_http_response()
    }
}
