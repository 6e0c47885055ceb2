//! Archives App Integration Module
//!
//! Client for the Archives App file server management API. It queues
//! server-side edits, uploads files for archiving and answers location
//! queries. Each operation is one HTTP request authenticated with static
//! `user`/`password` headers, and the raw response is handed back to the
//! caller without interpretation.
//!
//! # Features
//!
//! - **Edits**: Move, delete, create and rename paths on the file server
//! - **Consolidation**: Merge one directory into another
//! - **Archiving**: Upload a file with its project number, filing code or explicit destination
//! - **Locations**: Look up where a project lives, or where copies of a file are archived
//! - **Blocking API**: Synchronous wrapper in [`blocking`]
//!
//! # Example
//!
//! ```no_run
//! use integrations_archives_app::{ArchiveRequest, ArchivesClient, ArchivesConfig};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let config = ArchivesConfig::builder()
//!     .base_url("archives.example.edu")
//!     .username("archivist")
//!     .password("secret")
//!     .build()?;
//!
//! let client = ArchivesClient::new(config)?;
//!
//! client.enqueue_move("/projects/10042/old", "/projects/10042/new").await?;
//!
//! let request = ArchiveRequest::new("scans/site-plan.pdf")
//!     .filing_code("F5")
//!     .project_number("10042");
//! let response = client.enqueue_archiving(&request).await?;
//! println!("{}: {}", response.status, response.text());
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all)]

// Core modules
pub mod blocking;
pub mod client;
pub mod config;
pub mod errors;
pub mod services;
pub mod transport;
pub mod types;

// Test utilities
pub mod mocks;

// Re-exports for convenience
pub use client::{ArchivesClient, ArchivesClientBuilder};
pub use config::{ArchivesConfig, ArchivesConfigBuilder, EnvSource, ProcessEnv};
pub use errors::{ArchivesError, ArchivesResult};
pub use transport::HttpResponse;
pub use types::{ArchiveRequest, EditKind, EditRequest};

/// Prelude module with commonly used types and traits.
///
/// ```no_run
/// use integrations_archives_app::prelude::*;
/// ```
pub mod prelude {
    // Client
    pub use crate::client::{ArchivesClient, ArchivesClientBuilder};

    // Configuration
    pub use crate::config::{ArchivesConfig, ArchivesConfigBuilder, EnvSource, ProcessEnv};

    // Services
    pub use crate::services::{ArchivingService, EditsService, LocationsService};

    // Request types
    pub use crate::types::{ArchiveRequest, EditKind, EditRequest};

    // Transport
    pub use crate::transport::{HttpResponse, HttpTransport};

    // Errors
    pub use crate::errors::{ArchivesError, ArchivesResult};
}
