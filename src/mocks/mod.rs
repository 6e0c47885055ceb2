//! Mock implementations for testing.
//!
//! [`MockTransport`] records every request it receives instead of touching the
//! network, so tests can assert on URLs, headers and upload forms, and on how
//! many requests were attempted at all.

mod transport;

pub use transport::{MockResponse, MockTransport, RecordedFile, RecordedRequest};
