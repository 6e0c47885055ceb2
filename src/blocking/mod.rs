//! Synchronous client.
//!
//! [`ArchivesClient`] wraps the async client and a current-thread runtime.
//! Each call blocks the calling thread until the response arrives. It must not
//! be used from within an async context.
//!
//! ```no_run
//! use integrations_archives_app::blocking::ArchivesClient;
//! use integrations_archives_app::ArchivesConfig;
//!
//! # fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let client = ArchivesClient::new(ArchivesConfig::from_env()?)?;
//! let response = client.get_project_location("10042")?;
//! println!("{}", response.text());
//! # Ok(())
//! # }
//! ```

use crate::config::ArchivesConfig;
use crate::errors::{ArchivesError, ArchivesResult};
use crate::transport::{HttpResponse, HttpTransport};
use crate::types::{ArchiveRequest, EditRequest};
use std::path::Path;
use std::sync::Arc;
use tokio::runtime::{Builder, Runtime};

/// Blocking Archives App client.
pub struct ArchivesClient {
    inner: crate::client::ArchivesClient,
    runtime: Runtime,
}

impl ArchivesClient {
    /// Creates a blocking client with the given configuration.
    pub fn new(config: ArchivesConfig) -> ArchivesResult<Self> {
        let runtime = runtime()?;
        let inner = {
            let _guard = runtime.enter();
            crate::client::ArchivesClient::new(config)?
        };
        Ok(Self { inner, runtime })
    }

    /// Creates a blocking client sending through a custom transport.
    pub fn with_transport(
        config: ArchivesConfig,
        transport: Arc<dyn HttpTransport>,
    ) -> ArchivesResult<Self> {
        let runtime = runtime()?;
        let inner = crate::client::ArchivesClient::with_transport(config, transport)?;
        Ok(Self { inner, runtime })
    }

    /// Creates a blocking client configured from the process environment.
    pub fn from_env() -> ArchivesResult<Self> {
        Self::new(ArchivesConfig::from_env()?)
    }

    /// Queues a server-side edit.
    pub fn enqueue_edit(&self, edit: &EditRequest) -> ArchivesResult<HttpResponse> {
        self.runtime.block_on(self.inner.enqueue_edit(edit))
    }

    /// Queues a move of `target_path` to `destination_path`.
    pub fn enqueue_move(
        &self,
        target_path: &str,
        destination_path: &str,
    ) -> ArchivesResult<HttpResponse> {
        self.runtime
            .block_on(self.inner.enqueue_move(target_path, destination_path))
    }

    /// Queues deletion of `target_path`.
    pub fn enqueue_delete(&self, target_path: &str) -> ArchivesResult<HttpResponse> {
        self.runtime.block_on(self.inner.enqueue_delete(target_path))
    }

    /// Queues creation of `destination_path`.
    pub fn enqueue_create(&self, destination_path: &str) -> ArchivesResult<HttpResponse> {
        self.runtime.block_on(self.inner.enqueue_create(destination_path))
    }

    /// Queues a rename of `target_path` to `destination_path`.
    pub fn enqueue_rename(
        &self,
        target_path: &str,
        destination_path: &str,
    ) -> ArchivesResult<HttpResponse> {
        self.runtime
            .block_on(self.inner.enqueue_rename(target_path, destination_path))
    }

    /// Queues merging `asset_path` into `destination_path`.
    pub fn enqueue_consolidation(
        &self,
        asset_path: &str,
        destination_path: &str,
    ) -> ArchivesResult<HttpResponse> {
        self.runtime
            .block_on(self.inner.enqueue_consolidation(asset_path, destination_path))
    }

    /// Uploads a file for archiving.
    pub fn enqueue_archiving(&self, request: &ArchiveRequest) -> ArchivesResult<HttpResponse> {
        self.runtime.block_on(self.inner.enqueue_archiving(request))
    }

    /// Looks up the location of a project.
    pub fn get_project_location(&self, project_number: &str) -> ArchivesResult<HttpResponse> {
        self.runtime
            .block_on(self.inner.get_project_location(project_number))
    }

    /// Asks where copies of the file at `file_path` are archived.
    pub fn file_locations(&self, file_path: impl AsRef<Path>) -> ArchivesResult<HttpResponse> {
        self.runtime.block_on(self.inner.file_locations(file_path))
    }

    /// Gets the configuration.
    pub fn config(&self) -> &ArchivesConfig {
        self.inner.config()
    }
}

fn runtime() -> ArchivesResult<Runtime> {
    Builder::new_current_thread()
        .enable_all()
        .build()
        .map_err(|e| ArchivesError::configuration(format!("Failed to create runtime: {}", e)))
}
