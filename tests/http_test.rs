//! Tests against a local HTTP server using the reqwest transport.

use integrations_archives_app::{ArchiveRequest, ArchivesClient};
use std::io::Write;
use wiremock::matchers::{header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn create_client(server: &MockServer) -> ArchivesClient {
    ArchivesClient::builder()
        .base_url(server.uri())
        .username("archivist")
        .password("secret")
        .build()
        .unwrap()
}

#[tokio::test]
async fn test_edit_request_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/server_change"))
        .and(query_param("edit_type", "MOVE"))
        .and(query_param("old_path", "/projects/a b/plan.pdf"))
        .and(query_param("new_path", "/projects/c&d/plan.pdf"))
        .and(header("user", "archivist"))
        .and(header("password", "secret"))
        .respond_with(ResponseTemplate::new(200).set_body_string("queued"))
        .expect(1)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client
        .enqueue_move("/projects/a b/plan.pdf", "/projects/c&d/plan.pdf")
        .await
        .unwrap();

    assert!(response.is_success());
    assert_eq!(response.text(), "queued");
}

#[tokio::test]
async fn test_error_status_returned_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/project_location"))
        .and(query_param("project", "99999"))
        .respond_with(
            ResponseTemplate::new(404)
                .insert_header("x-archives-reason", "unknown-project")
                .set_body_string("Project not found"),
        )
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client.get_project_location("99999").await.unwrap();

    assert_eq!(response.status.as_u16(), 404);
    assert_eq!(response.text(), "Project not found");
    assert_eq!(
        response.headers.get("x-archives-reason").unwrap(),
        "unknown-project"
    );
}

#[tokio::test]
async fn test_redirect_returned_verbatim() {
    let server = MockServer::start().await;

    Mock::given(method("GET"))
        .and(path("/api/project_location"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/login"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(path("/login"))
        .respond_with(ResponseTemplate::new(200).set_body_string("login page"))
        .expect(0)
        .mount(&server)
        .await;

    let client = create_client(&server);
    let response = client.get_project_location("10042").await.unwrap();

    assert_eq!(response.status.as_u16(), 302);
    assert_eq!(response.headers.get("location").unwrap(), "/login");
    assert_ne!(response.text(), "login page");
}

#[tokio::test]
async fn test_archiving_redirect_not_followed() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload_file"))
        .respond_with(ResponseTemplate::new(302).insert_header("location", "/login"))
        .expect(1)
        .mount(&server)
        .await;

    Mock::given(path("/login"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"scan").unwrap();

    let client = create_client(&server);
    let request = ArchiveRequest::new(file.path()).destination_path("/records/10042");
    let response = client.enqueue_archiving(&request).await.unwrap();

    assert_eq!(response.status.as_u16(), 302);
    assert_eq!(response.headers.get("location").unwrap(), "/login");

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);
}

#[tokio::test]
async fn test_archiving_multipart_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/upload_file"))
        .and(header("user", "archivist"))
        .respond_with(ResponseTemplate::new(201))
        .expect(1)
        .mount(&server)
        .await;

    let dir = tempfile::tempdir().unwrap();
    let file_path = dir.path().join("site-plan.pdf");
    std::fs::File::create(&file_path)
        .unwrap()
        .write_all(b"%PDF-1.7 plan")
        .unwrap();

    let client = create_client(&server);
    let request = ArchiveRequest::new(&file_path)
        .filing_code("F5")
        .project_number("10042");
    let response = client.enqueue_archiving(&request).await.unwrap();
    assert_eq!(response.status.as_u16(), 201);

    let received = server.received_requests().await.unwrap();
    assert_eq!(received.len(), 1);

    let content_type = received[0]
        .headers
        .get("content-type")
        .unwrap()
        .to_str()
        .unwrap();
    assert!(content_type.starts_with("multipart/form-data; boundary="));

    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"project_number\""));
    assert!(body.contains("10042"));
    assert!(body.contains("name=\"destination_directory\""));
    assert!(body.contains("name=\"notes\""));
    assert!(body.contains("name=\"file\"; filename=\"site-plan.pdf\""));
    assert!(body.contains("%PDF-1.7 plan"));
    assert!(!body.contains("document_date"));
}

#[tokio::test]
async fn test_file_locations_over_http() {
    let server = MockServer::start().await;

    Mock::given(method("POST"))
        .and(path("/api/archived_or_not"))
        .respond_with(ResponseTemplate::new(200).set_body_string("[]"))
        .expect(1)
        .mount(&server)
        .await;

    let file = tempfile::NamedTempFile::new().unwrap();
    std::fs::write(file.path(), b"payload").unwrap();

    let client = create_client(&server);
    let response = client.file_locations(file.path()).await.unwrap();
    assert_eq!(response.text(), "[]");

    let received = server.received_requests().await.unwrap();
    let body = String::from_utf8_lossy(&received[0].body);
    assert!(body.contains("name=\"file\""));
    assert!(!body.contains("name=\"notes\""));
}

#[tokio::test]
async fn test_connection_refused_is_transport_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = ArchivesClient::builder()
        .base_url(format!("http://127.0.0.1:{}", port))
        .build()
        .unwrap();
    let err = client.enqueue_delete("/a").await.unwrap_err();

    assert!(err.is_transport());
}
