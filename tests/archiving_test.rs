//! Integration tests for archiving uploads.

use chrono::NaiveDate;
use integrations_archives_app::mocks::MockTransport;
use integrations_archives_app::transport::HttpMethod;
use integrations_archives_app::{ArchiveRequest, ArchivesClient};
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

fn create_test_client(transport: Arc<MockTransport>) -> ArchivesClient {
    ArchivesClient::builder()
        .base_url("example.edu")
        .username("archivist")
        .password("secret")
        .transport(transport)
        .build()
        .unwrap()
}

fn scan_file(content: &[u8]) -> NamedTempFile {
    let mut file = tempfile::Builder::new()
        .prefix("site-plan")
        .suffix(".pdf")
        .tempfile()
        .unwrap();
    file.write_all(content).unwrap();
    file
}

#[tokio::test]
async fn test_archiving_with_filing_code() {
    let transport = Arc::new(MockTransport::new());
    let client = create_test_client(transport.clone());
    let file = scan_file(b"%PDF-1.7 site plan");

    let request = ArchiveRequest::new(file.path())
        .filing_code("F5")
        .project_number("10042")
        .document_date(NaiveDate::from_ymd_opt(2023, 11, 2).unwrap());
    let response = client.enqueue_archiving(&request).await.unwrap();
    assert!(response.is_success());

    let recorded = transport.last_request().unwrap();
    assert_eq!(recorded.method, HttpMethod::Post);
    assert_eq!(recorded.url.as_str(), "https://example.edu/api/upload_file");
    assert_eq!(recorded.header("user"), Some("archivist"));

    assert_eq!(recorded.field("project_number"), Some("10042"));
    assert_eq!(recorded.field("destination_directory"), Some("F5"));
    assert_eq!(recorded.field("destination_path"), Some(""));
    assert_eq!(recorded.field("document_date"), Some("2023-11-02"));
    assert_eq!(
        recorded.field("notes").map(str::to_string),
        Some(format!("Automatically archived from {}", file.path().display()))
    );

    let uploaded = recorded.file.unwrap();
    assert_eq!(uploaded.field_name, "file");
    assert_eq!(
        uploaded.file_name,
        file.path().file_name().unwrap().to_string_lossy()
    );
    assert_eq!(uploaded.content.as_ref(), b"%PDF-1.7 site plan");
}

#[tokio::test]
async fn test_archiving_with_destination_only() {
    let transport = Arc::new(MockTransport::new());
    let client = create_test_client(transport.clone());
    let file = scan_file(b"contents");

    let request = ArchiveRequest::new(file.path()).destination_path("/records/10042/F5");
    client.enqueue_archiving(&request).await.unwrap();

    let recorded = transport.last_request().unwrap();
    assert_eq!(recorded.field("destination_path"), Some("/records/10042/F5"));
    assert_eq!(recorded.field("project_number"), Some(""));
    assert_eq!(recorded.field("document_date"), None);
}

#[tokio::test]
async fn test_archiving_precondition_before_io() {
    let transport = Arc::new(MockTransport::new());
    let client = create_test_client(transport.clone());

    let request = ArchiveRequest::new("/nonexistent/plan.pdf");
    let err = client.enqueue_archiving(&request).await.unwrap_err();

    assert!(err.is_precondition());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_archiving_missing_project_number() {
    let transport = Arc::new(MockTransport::new());
    let client = create_test_client(transport.clone());
    let file = scan_file(b"contents");

    let request = ArchiveRequest::new(file.path()).filing_code("F5");
    let err = client.enqueue_archiving(&request).await.unwrap_err();

    assert!(err.is_precondition());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_archiving_missing_file() {
    let transport = Arc::new(MockTransport::new());
    let client = create_test_client(transport.clone());
    let dir = tempfile::tempdir().unwrap();

    let request = ArchiveRequest::new(dir.path().join("missing.pdf"))
        .destination_path("/records");
    let err = client.enqueue_archiving(&request).await.unwrap_err();

    assert!(err.is_filesystem());
    assert_eq!(transport.request_count(), 0);
}

#[tokio::test]
async fn test_archiving_transport_failure() {
    let transport = Arc::new(MockTransport::failing("connection reset"));
    let client = create_test_client(transport.clone());
    let file = scan_file(b"contents");

    let request = ArchiveRequest::new(file.path()).destination_path("/records");
    let err = client.enqueue_archiving(&request).await.unwrap_err();

    assert!(err.is_transport());
}
