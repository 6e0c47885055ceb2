//! File uploads for archiving.

use crate::client::{Endpoints, RequestExecutor};
use crate::errors::ArchivesResult;
use crate::transport::{FilePart, HttpMethod, HttpResponse, MultipartForm, RequestBody};
use crate::types::{upload_file_name, ArchiveRequest};
use std::sync::Arc;
use tracing::info;

/// Form field carrying the uploaded file.
pub const FILE_FIELD: &str = "file";

/// Service uploading files for the server to file away.
pub struct ArchivingService {
    executor: Arc<RequestExecutor>,
    endpoints: Arc<Endpoints>,
}

impl ArchivingService {
    /// Creates a new archiving service.
    pub fn new(executor: Arc<RequestExecutor>, endpoints: Arc<Endpoints>) -> Self {
        Self {
            executor,
            endpoints,
        }
    }

    /// Uploads `request.target_path` with its filing metadata.
    ///
    /// The request is validated before the file is opened. The file is
    /// streamed as the `file` part after the metadata fields.
    ///
    /// # Errors
    ///
    /// - Precondition error when neither a destination path nor both a
    ///   filing code and a project number are given
    /// - Filesystem access error when the file cannot be opened
    /// - Transport error when the upload fails
    pub async fn enqueue(&self, request: &ArchiveRequest) -> ArchivesResult<HttpResponse> {
        request.validate()?;

        let file_name = upload_file_name(&request.target_path);
        let file = FilePart::open(FILE_FIELD, file_name, &request.target_path).await?;

        info!(
            file_name = %file.file_name,
            size = file.length,
            "Uploading file for archiving"
        );

        let form = request
            .form_fields()
            .into_iter()
            .fold(MultipartForm::new(file), |form, (name, value)| {
                form.text(name, value)
            });

        let url = self.endpoints.upload_url()?;
        self.executor
            .execute(HttpMethod::Post, url, RequestBody::Multipart(form))
            .await
    }
}
