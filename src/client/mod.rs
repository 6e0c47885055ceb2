//! Archives App API client implementation.

use crate::config::{ArchivesConfig, ArchivesConfigBuilder};
use crate::errors::ArchivesResult;
use crate::services::*;
use crate::transport::{HttpResponse, HttpTransport, ReqwestTransport};
use crate::types::{ArchiveRequest, EditRequest};
use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

mod endpoints;
mod executor;

pub use endpoints::{encode_query_value, Endpoints};
pub use executor::RequestExecutor;

/// Archives App API client.
///
/// Each operation is a single HTTP request carrying the configured `user` and
/// `password` headers. Responses come back as-is; a 4xx or 5xx status is not
/// an error at this layer.
pub struct ArchivesClient {
    /// Configuration.
    config: ArchivesConfig,
    /// Endpoint URLs derived from the configured origin.
    endpoints: Arc<Endpoints>,
    /// Request executor.
    executor: Arc<RequestExecutor>,
}

impl ArchivesClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use integrations_archives_app::{ArchivesClient, ArchivesConfig};
    ///
    /// # async fn example() -> Result<(), Box<dyn std::error::Error>> {
    /// let config = ArchivesConfig::builder()
    ///     .base_url("archives.example.edu")
    ///     .username("archivist")
    ///     .password("secret")
    ///     .build()?;
    ///
    /// let client = ArchivesClient::new(config)?;
    /// let response = client.enqueue_delete("/records/old/plan.pdf").await?;
    /// println!("{}", response.status);
    /// # Ok(())
    /// # }
    /// ```
    pub fn new(config: ArchivesConfig) -> ArchivesResult<Self> {
        let transport = Arc::new(ReqwestTransport::from_config(&config)?);
        Self::with_transport(config, transport)
    }

    /// Creates a client sending through a custom transport.
    pub fn with_transport(
        config: ArchivesConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> ArchivesResult<Self> {
        let endpoints = Arc::new(Endpoints::new(config.origin()));
        let executor = Arc::new(RequestExecutor::new(&config, transport)?);

        Ok(Self {
            config,
            endpoints,
            executor,
        })
    }

    /// Creates a client configured from the process environment.
    pub fn from_env() -> ArchivesResult<Self> {
        Self::new(ArchivesConfig::from_env()?)
    }

    /// Creates a new client builder.
    pub fn builder() -> ArchivesClientBuilder {
        ArchivesClientBuilder::new()
    }

    // Service accessors

    /// Access the edits service.
    pub fn edits(&self) -> EditsService {
        EditsService::new(self.executor.clone(), self.endpoints.clone())
    }

    /// Access the archiving service.
    pub fn archiving(&self) -> ArchivingService {
        ArchivingService::new(self.executor.clone(), self.endpoints.clone())
    }

    /// Access the locations service.
    pub fn locations(&self) -> LocationsService {
        LocationsService::new(self.executor.clone(), self.endpoints.clone())
    }

    // Operations

    /// Queues a server-side edit.
    pub async fn enqueue_edit(&self, edit: &EditRequest) -> ArchivesResult<HttpResponse> {
        self.edits().enqueue(edit).await
    }

    /// Queues a move of `target_path` to `destination_path`.
    pub async fn enqueue_move(
        &self,
        target_path: &str,
        destination_path: &str,
    ) -> ArchivesResult<HttpResponse> {
        self.edits().enqueue_move(target_path, destination_path).await
    }

    /// Queues deletion of `target_path`.
    pub async fn enqueue_delete(&self, target_path: &str) -> ArchivesResult<HttpResponse> {
        self.edits().enqueue_delete(target_path).await
    }

    /// Queues creation of `destination_path`.
    pub async fn enqueue_create(&self, destination_path: &str) -> ArchivesResult<HttpResponse> {
        self.edits().enqueue_create(destination_path).await
    }

    /// Queues a rename of `target_path` to `destination_path`.
    pub async fn enqueue_rename(
        &self,
        target_path: &str,
        destination_path: &str,
    ) -> ArchivesResult<HttpResponse> {
        self.edits().enqueue_rename(target_path, destination_path).await
    }

    /// Queues merging `asset_path` into `destination_path`.
    pub async fn enqueue_consolidation(
        &self,
        asset_path: &str,
        destination_path: &str,
    ) -> ArchivesResult<HttpResponse> {
        self.edits()
            .enqueue_consolidation(asset_path, destination_path)
            .await
    }

    /// Uploads a file for archiving.
    pub async fn enqueue_archiving(
        &self,
        request: &ArchiveRequest,
    ) -> ArchivesResult<HttpResponse> {
        self.archiving().enqueue(request).await
    }

    /// Looks up the location of a project.
    pub async fn get_project_location(&self, project_number: &str) -> ArchivesResult<HttpResponse> {
        self.locations().project_location(project_number).await
    }

    /// Asks where copies of the file at `file_path` are archived.
    pub async fn file_locations(
        &self,
        file_path: impl AsRef<Path>,
    ) -> ArchivesResult<HttpResponse> {
        self.locations().file_locations(file_path.as_ref()).await
    }

    /// Gets the configuration.
    pub fn config(&self) -> &ArchivesConfig {
        &self.config
    }

    /// Gets the endpoint URLs.
    pub fn endpoints(&self) -> &Endpoints {
        &self.endpoints
    }
}

/// Builder for ArchivesClient.
pub struct ArchivesClientBuilder {
    config_builder: ArchivesConfigBuilder,
    transport: Option<Arc<dyn HttpTransport>>,
}

impl ArchivesClientBuilder {
    /// Creates a new builder.
    pub fn new() -> Self {
        Self {
            config_builder: ArchivesConfig::builder(),
            transport: None,
        }
    }

    /// Sets the server URL.
    pub fn base_url(mut self, url: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.base_url(url);
        self
    }

    /// Sets the username.
    pub fn username(mut self, username: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.username(username);
        self
    }

    /// Sets the password.
    pub fn password(mut self, password: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.password(password);
        self
    }

    /// Disables TLS certificate validation.
    pub fn accept_invalid_certs(mut self, accept: bool) -> Self {
        self.config_builder = self.config_builder.accept_invalid_certs(accept);
        self
    }

    /// Sets the request timeout.
    pub fn timeout(mut self, timeout: Duration) -> Self {
        self.config_builder = self.config_builder.timeout(timeout);
        self
    }

    /// Sets the user agent.
    pub fn user_agent(mut self, ua: impl Into<String>) -> Self {
        self.config_builder = self.config_builder.user_agent(ua);
        self
    }

    /// Sends requests through `transport` instead of reqwest.
    pub fn transport(mut self, transport: Arc<dyn HttpTransport>) -> Self {
        self.transport = Some(transport);
        self
    }

    /// Builds the client.
    pub fn build(self) -> ArchivesResult<ArchivesClient> {
        let config = self.config_builder.build()?;
        match self.transport {
            Some(transport) => ArchivesClient::with_transport(config, transport),
            None => ArchivesClient::new(config),
        }
    }
}

impl Default for ArchivesClientBuilder {
    fn default() -> Self {
        Self::new()
    }
}
