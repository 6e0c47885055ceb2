//! Request types for the Archives App API.

use crate::errors::PreconditionError;
use chrono::NaiveDate;
use std::fmt;
use std::path::{Path, PathBuf};

/// Kind of server-side edit, as sent in the `edit_type` query parameter.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum EditKind {
    /// Move a file or directory.
    Move,
    /// Delete a file or directory.
    Delete,
    /// Create a directory.
    Create,
    /// Rename a file or directory.
    Rename,
}

impl EditKind {
    /// Wire representation of the edit kind.
    pub fn as_str(&self) -> &'static str {
        match self {
            EditKind::Move => "MOVE",
            EditKind::Delete => "DELETE",
            EditKind::Create => "CREATE",
            EditKind::Rename => "RENAME",
        }
    }
}

impl fmt::Display for EditKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A filesystem edit queued on the server.
///
/// Each variant carries only the paths its kind needs. Paths are server paths
/// and are sent exactly as given.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum EditRequest {
    /// Move `old_path` to `new_path`.
    Move {
        /// Current location.
        old_path: String,
        /// New location.
        new_path: String,
    },
    /// Delete `old_path`.
    Delete {
        /// Path to delete.
        old_path: String,
    },
    /// Create `new_path`.
    Create {
        /// Path to create.
        new_path: String,
    },
    /// Rename `old_path` to `new_path`.
    Rename {
        /// Current name.
        old_path: String,
        /// New name.
        new_path: String,
    },
}

impl EditRequest {
    /// Creates a move edit.
    pub fn move_path(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        EditRequest::Move {
            old_path: old_path.into(),
            new_path: new_path.into(),
        }
    }

    /// Creates a delete edit.
    pub fn delete(old_path: impl Into<String>) -> Self {
        EditRequest::Delete {
            old_path: old_path.into(),
        }
    }

    /// Creates a create edit.
    pub fn create(new_path: impl Into<String>) -> Self {
        EditRequest::Create {
            new_path: new_path.into(),
        }
    }

    /// Creates a rename edit.
    pub fn rename(old_path: impl Into<String>, new_path: impl Into<String>) -> Self {
        EditRequest::Rename {
            old_path: old_path.into(),
            new_path: new_path.into(),
        }
    }

    /// Kind of this edit.
    pub fn kind(&self) -> EditKind {
        match self {
            EditRequest::Move { .. } => EditKind::Move,
            EditRequest::Delete { .. } => EditKind::Delete,
            EditRequest::Create { .. } => EditKind::Create,
            EditRequest::Rename { .. } => EditKind::Rename,
        }
    }

    /// Existing path, if this kind has one.
    pub fn old_path(&self) -> Option<&str> {
        match self {
            EditRequest::Move { old_path, .. }
            | EditRequest::Delete { old_path }
            | EditRequest::Rename { old_path, .. } => Some(old_path),
            EditRequest::Create { .. } => None,
        }
    }

    /// Target path, if this kind has one.
    pub fn new_path(&self) -> Option<&str> {
        match self {
            EditRequest::Move { new_path, .. }
            | EditRequest::Create { new_path }
            | EditRequest::Rename { new_path, .. } => Some(new_path),
            EditRequest::Delete { .. } => None,
        }
    }
}

/// A local file to upload for archiving, with its filing metadata.
///
/// The server needs either an explicit `destination_path`, or both a
/// `filing_code` and a `project_number` to work out where the file goes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ArchiveRequest {
    /// Local file to upload.
    pub target_path: PathBuf,
    /// Explicit destination on the server.
    pub destination_path: Option<String>,
    /// Filing code, sent as `destination_directory`.
    pub filing_code: Option<String>,
    /// Project number.
    pub project_number: Option<String>,
    /// Date associated with the document.
    pub document_date: Option<NaiveDate>,
}

impl ArchiveRequest {
    /// Creates a request for `target_path` with no metadata.
    pub fn new(target_path: impl Into<PathBuf>) -> Self {
        Self {
            target_path: target_path.into(),
            destination_path: None,
            filing_code: None,
            project_number: None,
            document_date: None,
        }
    }

    /// Sets the destination path.
    pub fn destination_path(mut self, path: impl Into<String>) -> Self {
        self.destination_path = Some(path.into());
        self
    }

    /// Sets the filing code.
    pub fn filing_code(mut self, code: impl Into<String>) -> Self {
        self.filing_code = Some(code.into());
        self
    }

    /// Sets the project number.
    pub fn project_number(mut self, number: impl Into<String>) -> Self {
        self.project_number = Some(number.into());
        self
    }

    /// Sets the document date.
    pub fn document_date(mut self, date: NaiveDate) -> Self {
        self.document_date = Some(date);
        self
    }

    /// Checks that the server has enough information to place the file.
    ///
    /// Empty strings count as missing.
    pub fn validate(&self) -> Result<(), PreconditionError> {
        let has_destination = is_present(&self.destination_path);
        let has_filing = is_present(&self.filing_code) && is_present(&self.project_number);

        if has_destination || has_filing {
            Ok(())
        } else {
            Err(PreconditionError::MissingArchiveDestination)
        }
    }

    /// Text fields of the upload form, in the order they are sent.
    ///
    /// Missing values are sent as empty strings; `document_date` is only
    /// included when set.
    pub fn form_fields(&self) -> Vec<(&'static str, String)> {
        let mut fields = vec![
            ("project_number", self.project_number.clone().unwrap_or_default()),
            ("destination_directory", self.filing_code.clone().unwrap_or_default()),
            ("destination_path", self.destination_path.clone().unwrap_or_default()),
            (
                "notes",
                format!("Automatically archived from {}", self.target_path.display()),
            ),
        ];

        if let Some(date) = self.document_date {
            fields.push(("document_date", date.format("%Y-%m-%d").to_string()));
        }

        fields
    }
}

fn is_present(value: &Option<String>) -> bool {
    value.as_deref().is_some_and(|v| !v.is_empty())
}

/// Final path segment of `path`, used as the uploaded file name.
pub fn upload_file_name(path: &Path) -> String {
    path.file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .unwrap_or_default()
}
