//! Request executor attaching credentials and sending through the transport.

use crate::config::ArchivesConfig;
use crate::errors::{ArchivesResult, ConfigurationError};
use crate::transport::{HttpMethod, HttpRequest, HttpResponse, HttpTransport, RequestBody};
use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use secrecy::ExposeSecret;
use std::sync::Arc;
use std::time::Duration;
use tracing::debug;
use url::Url;

/// Request executor shared by all services.
///
/// Every request gets the static `user` and `password` headers. Responses are
/// passed back whatever their status.
pub struct RequestExecutor {
    /// HTTP transport
    transport: Arc<dyn HttpTransport>,
    /// Credential headers
    headers: HeaderMap,
    /// Per-request timeout
    timeout: Option<Duration>,
}

impl RequestExecutor {
    /// Creates a new request executor.
    pub fn new(config: &ArchivesConfig, transport: Arc<dyn HttpTransport>) -> ArchivesResult<Self> {
        Ok(Self {
            transport,
            headers: credential_headers(config)?,
            timeout: config.timeout,
        })
    }

    /// Sends a request with the credential headers attached.
    pub async fn execute(
        &self,
        method: HttpMethod,
        url: Url,
        body: RequestBody,
    ) -> ArchivesResult<HttpResponse> {
        debug!(method = method.as_str(), endpoint = url.path(), "Sending request");

        let request = HttpRequest {
            method,
            url,
            headers: self.headers.clone(),
            body,
            timeout: self.timeout,
        };

        let response = self.transport.send(request).await?;

        debug!(status = response.status.as_u16(), "Received response");

        Ok(response)
    }
}

fn credential_headers(config: &ArchivesConfig) -> Result<HeaderMap, ConfigurationError> {
    let user = HeaderValue::from_str(&config.username)
        .map_err(|_| ConfigurationError::InvalidCredentialHeader("user"))?;

    let mut password = HeaderValue::from_str(config.password.expose_secret())
        .map_err(|_| ConfigurationError::InvalidCredentialHeader("password"))?;
    password.set_sensitive(true);

    let mut headers = HeaderMap::new();
    headers.insert(HeaderName::from_static("user"), user);
    headers.insert(HeaderName::from_static("password"), password);
    Ok(headers)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_credential_headers() {
        let config = ArchivesConfig::builder()
            .username("archivist")
            .password("secret")
            .build()
            .unwrap();

        let headers = credential_headers(&config).unwrap();
        assert_eq!(headers.get("user").unwrap(), "archivist");
        assert_eq!(headers.get("password").unwrap(), "secret");
        assert!(headers.get("password").unwrap().is_sensitive());
    }

    #[test]
    fn test_invalid_credential_header() {
        let config = ArchivesConfig::builder()
            .username("line\nbreak")
            .build()
            .unwrap();

        assert!(matches!(
            credential_headers(&config),
            Err(ConfigurationError::InvalidCredentialHeader("user"))
        ));
    }
}
