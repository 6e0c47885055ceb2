//! HTTP transport layer for the Archives App API.

use crate::config::ArchivesConfig;
use crate::errors::{ArchivesError, ArchivesResult, ConfigurationError, TransportError};
use async_trait::async_trait;
use bytes::Bytes;
use reqwest::multipart::{Form, Part};
use reqwest::redirect::Policy;
use reqwest::{header::HeaderMap, Body, Client, Method, StatusCode};
use std::io;
use std::path::Path;
use std::time::Duration;
use tokio::fs::File;
use tokio_util::io::ReaderStream;
use tracing::warn;
use url::Url;

/// HTTP transport abstraction for testability.
#[async_trait]
pub trait HttpTransport: Send + Sync {
    /// Send an HTTP request and receive a response.
    ///
    /// Any status code is a successful outcome; only failures to exchange the
    /// request are errors.
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;
}

/// HTTP request representation.
#[derive(Debug)]
pub struct HttpRequest {
    /// HTTP method.
    pub method: HttpMethod,
    /// Request URL.
    pub url: Url,
    /// Request headers.
    pub headers: HeaderMap,
    /// Request body.
    pub body: RequestBody,
    /// Request timeout.
    pub timeout: Option<Duration>,
}

/// HTTP method.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    /// GET method.
    Get,
    /// POST method.
    Post,
}

impl HttpMethod {
    /// Method name.
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl From<HttpMethod> for Method {
    fn from(method: HttpMethod) -> Self {
        match method {
            HttpMethod::Get => Method::GET,
            HttpMethod::Post => Method::POST,
        }
    }
}

/// Request body variants.
pub enum RequestBody {
    /// Empty body.
    Empty,
    /// Multipart form with one file part.
    Multipart(MultipartForm),
}

impl std::fmt::Debug for RequestBody {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            RequestBody::Empty => write!(f, "Empty"),
            RequestBody::Multipart(form) => write!(
                f,
                "Multipart({} fields, file {:?} {} bytes)",
                form.fields.len(),
                form.file.file_name,
                form.file.length
            ),
        }
    }
}

/// Multipart form: text fields followed by a single file part.
pub struct MultipartForm {
    /// Text fields, sent in order.
    pub fields: Vec<(String, String)>,
    /// The file part.
    pub file: FilePart,
}

impl MultipartForm {
    /// Creates a form carrying only `file`.
    pub fn new(file: FilePart) -> Self {
        Self {
            fields: Vec::new(),
            file,
        }
    }

    /// Adds a text field.
    pub fn text(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.fields.push((name.into(), value.into()));
        self
    }

    /// Converts into a reqwest form, streaming the file contents.
    pub fn into_reqwest(self) -> Result<Form, TransportError> {
        let mut form = Form::new();
        for (name, value) in self.fields {
            form = form.text(name, value);
        }

        let FilePart {
            field_name,
            file_name,
            content_type,
            length,
            file,
        } = self.file;

        let body = Body::wrap_stream(ReaderStream::new(file));
        let part = Part::stream_with_length(body, length)
            .file_name(file_name)
            .mime_str(content_type.as_ref())?;

        Ok(form.part(field_name, part))
    }
}

/// An open local file to be sent as a multipart file part.
///
/// The handle is closed when the part is dropped, whether or not the upload
/// went through.
pub struct FilePart {
    /// Form field name.
    pub field_name: String,
    /// File name reported to the server.
    pub file_name: String,
    /// Content type of the part.
    pub content_type: mime::Mime,
    /// Size of the file in bytes.
    pub length: u64,
    /// Open file handle.
    pub file: File,
}

impl FilePart {
    /// Opens `path` for reading.
    ///
    /// Fails with a filesystem access error if the file is missing,
    /// unreadable, or a directory.
    pub async fn open(
        field_name: impl Into<String>,
        file_name: impl Into<String>,
        path: &Path,
    ) -> ArchivesResult<Self> {
        let file = File::open(path)
            .await
            .map_err(|e| ArchivesError::filesystem(path, e))?;

        let metadata = file
            .metadata()
            .await
            .map_err(|e| ArchivesError::filesystem(path, e))?;

        if metadata.is_dir() {
            return Err(ArchivesError::filesystem(
                path,
                io::Error::new(io::ErrorKind::InvalidInput, "path is a directory"),
            ));
        }

        Ok(Self {
            field_name: field_name.into(),
            file_name: file_name.into(),
            content_type: mime::APPLICATION_OCTET_STREAM,
            length: metadata.len(),
            file,
        })
    }
}

/// HTTP response representation, returned to callers unmodified.
#[derive(Debug, Clone)]
pub struct HttpResponse {
    /// Response status code.
    pub status: StatusCode,
    /// Response headers.
    pub headers: HeaderMap,
    /// Response body.
    pub body: Bytes,
}

impl HttpResponse {
    /// Creates a new HTTP response.
    pub fn new(status: StatusCode, headers: HeaderMap, body: Bytes) -> Self {
        Self {
            status,
            headers,
            body,
        }
    }

    /// Check if the response indicates success (2xx status).
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Body decoded as UTF-8, with invalid sequences replaced.
    pub fn text(&self) -> String {
        String::from_utf8_lossy(&self.body).into_owned()
    }
}

/// Reqwest-based HTTP transport implementation.
pub struct ReqwestTransport {
    client: Client,
}

impl ReqwestTransport {
    /// Creates a new reqwest transport.
    pub fn new(client: Client) -> Self {
        Self { client }
    }

    /// Creates a transport from client configuration.
    ///
    /// Redirects are not followed; a 3xx answer is returned like any other.
    pub fn from_config(config: &ArchivesConfig) -> Result<Self, ConfigurationError> {
        if config.accept_invalid_certs {
            warn!(
                base_url = %config.base_url,
                "TLS certificate validation is disabled"
            );
        }

        let client = Client::builder()
            .user_agent(config.user_agent.clone())
            .danger_accept_invalid_certs(config.accept_invalid_certs)
            .redirect(Policy::none())
            .build()
            .map_err(|e| {
                ConfigurationError::InvalidConfiguration(format!("Failed to create client: {}", e))
            })?;

        Ok(Self { client })
    }
}

#[async_trait]
impl HttpTransport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method: Method = request.method.into();
        let mut req = self.client.request(method, request.url).headers(request.headers);

        if let Some(timeout) = request.timeout {
            req = req.timeout(timeout);
        }

        match request.body {
            RequestBody::Empty => {}
            RequestBody::Multipart(form) => {
                req = req.multipart(form.into_reqwest()?);
            }
        }

        let response = req.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = response.bytes().await?;

        Ok(HttpResponse::new(status, headers, body))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_http_method_conversion() {
        assert_eq!(Method::from(HttpMethod::Get), Method::GET);
        assert_eq!(Method::from(HttpMethod::Post), Method::POST);
        assert_eq!(HttpMethod::Post.as_str(), "POST");
    }

    #[test]
    fn test_response_passthrough() {
        let response = HttpResponse::new(
            StatusCode::NOT_FOUND,
            HeaderMap::new(),
            Bytes::from_static(b"no such project"),
        );
        assert!(!response.is_success());
        assert_eq!(response.text(), "no such project");
    }

    #[tokio::test]
    async fn test_file_part_open() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        file.write_all(b"scan contents").unwrap();

        let part = FilePart::open("file", "scan.pdf", file.path()).await.unwrap();
        assert_eq!(part.field_name, "file");
        assert_eq!(part.file_name, "scan.pdf");
        assert_eq!(part.length, 13);
    }

    #[tokio::test]
    async fn test_file_part_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing.pdf");

        let err = FilePart::open("file", "missing.pdf", &path).await.err().unwrap();
        assert!(err.is_filesystem());
    }

    #[tokio::test]
    async fn test_file_part_directory() {
        let dir = tempfile::tempdir().unwrap();

        let err = FilePart::open("file", "", dir.path()).await.err().unwrap();
        assert!(err.is_filesystem());
    }

    #[test]
    fn test_reqwest_transport_from_config() {
        let config = ArchivesConfig::builder()
            .base_url("example.edu")
            .accept_invalid_certs(true)
            .build()
            .unwrap();
        assert!(ReqwestTransport::from_config(&config).is_ok());
    }
}
