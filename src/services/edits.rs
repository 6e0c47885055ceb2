//! Server-side edit and consolidation requests.

use crate::client::{Endpoints, RequestExecutor};
use crate::errors::ArchivesResult;
use crate::transport::{HttpMethod, HttpResponse, RequestBody};
use crate::types::EditRequest;
use std::sync::Arc;
use tracing::debug;

/// Service queueing edits on the file server.
pub struct EditsService {
    executor: Arc<RequestExecutor>,
    endpoints: Arc<Endpoints>,
}

impl EditsService {
    /// Creates a new edits service.
    pub fn new(executor: Arc<RequestExecutor>, endpoints: Arc<Endpoints>) -> Self {
        Self {
            executor,
            endpoints,
        }
    }

    /// Queues an edit.
    pub async fn enqueue(&self, edit: &EditRequest) -> ArchivesResult<HttpResponse> {
        debug!(edit_type = edit.kind().as_str(), "Queueing edit");

        let url = self.endpoints.edit_url(edit)?;
        self.executor
            .execute(HttpMethod::Get, url, RequestBody::Empty)
            .await
    }

    /// Queues a move of `target_path` to `destination_path`.
    pub async fn enqueue_move(
        &self,
        target_path: &str,
        destination_path: &str,
    ) -> ArchivesResult<HttpResponse> {
        self.enqueue(&EditRequest::move_path(target_path, destination_path))
            .await
    }

    /// Queues deletion of `target_path`.
    pub async fn enqueue_delete(&self, target_path: &str) -> ArchivesResult<HttpResponse> {
        self.enqueue(&EditRequest::delete(target_path)).await
    }

    /// Queues creation of `destination_path`.
    pub async fn enqueue_create(&self, destination_path: &str) -> ArchivesResult<HttpResponse> {
        self.enqueue(&EditRequest::create(destination_path)).await
    }

    /// Queues a rename of `target_path` to `destination_path`.
    pub async fn enqueue_rename(
        &self,
        target_path: &str,
        destination_path: &str,
    ) -> ArchivesResult<HttpResponse> {
        self.enqueue(&EditRequest::rename(target_path, destination_path))
            .await
    }

    /// Queues merging the contents of `asset_path` into `destination_path`.
    pub async fn enqueue_consolidation(
        &self,
        asset_path: &str,
        destination_path: &str,
    ) -> ArchivesResult<HttpResponse> {
        debug!("Queueing consolidation");

        let url = self
            .endpoints
            .consolidation_url(asset_path, destination_path)?;
        self.executor
            .execute(HttpMethod::Get, url, RequestBody::Empty)
            .await
    }
}
