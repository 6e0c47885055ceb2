//! Project and file location lookups.

use super::FILE_FIELD;
use crate::client::{Endpoints, RequestExecutor};
use crate::errors::ArchivesResult;
use crate::transport::{FilePart, HttpMethod, HttpResponse, MultipartForm, RequestBody};
use crate::types::upload_file_name;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Service answering where things live on the file server.
pub struct LocationsService {
    executor: Arc<RequestExecutor>,
    endpoints: Arc<Endpoints>,
}

impl LocationsService {
    /// Creates a new locations service.
    pub fn new(executor: Arc<RequestExecutor>, endpoints: Arc<Endpoints>) -> Self {
        Self {
            executor,
            endpoints,
        }
    }

    /// Looks up the project details and file server location for `project_number`.
    pub async fn project_location(&self, project_number: &str) -> ArchivesResult<HttpResponse> {
        let url = self.endpoints.project_location_url(project_number)?;
        self.executor
            .execute(HttpMethod::Get, url, RequestBody::Empty)
            .await
    }

    /// Uploads the file at `file_path` and asks where copies of it are archived.
    pub async fn file_locations(&self, file_path: &Path) -> ArchivesResult<HttpResponse> {
        let file = FilePart::open(FILE_FIELD, upload_file_name(file_path), file_path).await?;

        debug!(file_name = %file.file_name, "Checking archived locations");

        let url = self.endpoints.file_locations_url()?;
        self.executor
            .execute(
                HttpMethod::Post,
                url,
                RequestBody::Multipart(MultipartForm::new(file)),
            )
            .await
    }
}
