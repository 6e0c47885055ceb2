//! Endpoint URLs and query value encoding.

use crate::errors::TransportError;
use crate::types::EditRequest;
use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

/// Characters left as-is in query values. Everything else, `/` included, is
/// percent-encoded.
const QUERY_VALUE: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Percent-encodes a query value.
pub fn encode_query_value(value: &str) -> String {
    utf8_percent_encode(value, QUERY_VALUE).to_string()
}

/// Endpoint URLs derived once from the configured origin.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoints {
    edit: String,
    consolidation: String,
    upload: String,
    project_location: String,
    file_locations: String,
}

impl Endpoints {
    /// Derives all endpoint URLs from `origin` (no trailing slash).
    pub fn new(origin: &str) -> Self {
        Self {
            edit: format!("{}/api/server_change", origin),
            consolidation: format!("{}/api/consolidate_dirs", origin),
            upload: format!("{}/api/upload_file", origin),
            project_location: format!("{}/api/project_location", origin),
            file_locations: format!("{}/api/archived_or_not", origin),
        }
    }

    /// URL queueing a server-side edit.
    pub fn edit_url(&self, edit: &EditRequest) -> Result<Url, TransportError> {
        let url = format!(
            "{}?edit_type={}&old_path={}&new_path={}",
            self.edit,
            edit.kind().as_str(),
            encode_query_value(edit.old_path().unwrap_or_default()),
            encode_query_value(edit.new_path().unwrap_or_default()),
        );
        parse(&url)
    }

    /// URL queueing a directory consolidation.
    pub fn consolidation_url(
        &self,
        asset_path: &str,
        destination_path: &str,
    ) -> Result<Url, TransportError> {
        let url = format!(
            "{}?asset_path={}&destination_path={}",
            self.consolidation,
            encode_query_value(asset_path),
            encode_query_value(destination_path),
        );
        parse(&url)
    }

    /// URL for archiving uploads.
    pub fn upload_url(&self) -> Result<Url, TransportError> {
        parse(&self.upload)
    }

    /// URL looking up where a project's files live.
    pub fn project_location_url(&self, project_number: &str) -> Result<Url, TransportError> {
        let url = format!(
            "{}?project={}",
            self.project_location,
            encode_query_value(project_number)
        );
        parse(&url)
    }

    /// URL asking where copies of an uploaded file are archived.
    pub fn file_locations_url(&self) -> Result<Url, TransportError> {
        parse(&self.file_locations)
    }
}

fn parse(url: &str) -> Result<Url, TransportError> {
    Url::parse(url).map_err(|e| TransportError::InvalidUrl(format!("{}: {}", url, e)))
}
