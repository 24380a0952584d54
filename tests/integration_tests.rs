//! End-to-end tests for the analysis submission flow against a
//! single-shot local HTTP server.

use resume_scan::core::analyzer_client::{AnalyzerClient, AnalyzerError};
use resume_scan::file_validator::{ResumeErrorType, ResumeValidator, MAX_RESUME_BYTES};
use resume_scan::report::AnalysisReport;
use resume_scan::session::{AnalysisSession, SubmissionState, SubmitRefusal};
use resume_scan::types::analysis::AnalysisRequest;
use std::path::PathBuf;
use tempfile::TempDir;
use tokio::io::{AsyncReadExt, AsyncWriteExt};

/// Serve exactly one canned HTTP response, then close the connection.
/// Returns the base URL to point the client at.
async fn serve_once(status_line: &'static str, body: &'static str) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();

    tokio::spawn(async move {
        let Ok((mut socket, _)) = listener.accept().await else {
            return;
        };

        // Drain the full request (headers + declared body) before
        // answering, otherwise the client may see a reset mid-upload.
        let mut request = Vec::new();
        let mut buf = [0u8; 16384];
        loop {
            match socket.read(&mut buf).await {
                Ok(0) | Err(_) => break,
                Ok(n) => {
                    request.extend_from_slice(&buf[..n]);
                    if request_complete(&request) {
                        break;
                    }
                }
            }
        }

        let response = format!(
            "HTTP/1.1 {}\r\nContent-Type: application/json\r\nContent-Length: {}\r\nConnection: close\r\n\r\n{}",
            status_line,
            body.len(),
            body
        );
        let _ = socket.write_all(response.as_bytes()).await;
        let _ = socket.shutdown().await;
    });

    format!("http://{}", addr)
}

fn request_complete(request: &[u8]) -> bool {
    let Some(header_end) = request
        .windows(4)
        .position(|window| window == b"\r\n\r\n")
    else {
        return false;
    };

    let headers = String::from_utf8_lossy(&request[..header_end]);
    let content_length = headers
        .lines()
        .find_map(|line| {
            let (name, value) = line.split_once(':')?;
            name.eq_ignore_ascii_case("content-length")
                .then(|| value.trim().parse::<usize>().ok())?
        })
        .unwrap_or(0);

    request.len() >= header_end + 4 + content_length
}

fn write_resume(dir: &TempDir, name: &str, contents: &[u8]) -> PathBuf {
    let path = dir.path().join(name);
    std::fs::write(&path, contents).unwrap();
    path
}

#[tokio::test]
async fn txt_resume_is_rejected_before_any_network_call() {
    let dir = TempDir::new().unwrap();
    let path = write_resume(&dir, "resume.txt", b"plain text resume");

    let rejection = ResumeValidator::validate(&path).await.unwrap_err();
    assert_eq!(rejection.error_type, ResumeErrorType::UnsupportedType);
    assert_eq!(rejection.error_type.code(), "UNSUPPORTED_FILE_TYPE");
}

#[tokio::test]
async fn oversized_file_is_rejected_regardless_of_extension() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.pdf");
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(MAX_RESUME_BYTES + 1).unwrap();

    let rejection = ResumeValidator::validate(&path).await.unwrap_err();
    assert_eq!(rejection.error_type, ResumeErrorType::FileTooLarge);

    // Same size violation under an unsupported extension still reads as
    // too large.
    let path = dir.path().join("resume.txt");
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(MAX_RESUME_BYTES + 1).unwrap();
    let rejection = ResumeValidator::validate(&path).await.unwrap_err();
    assert_eq!(rejection.error_type, ResumeErrorType::FileTooLarge);
}

#[tokio::test]
async fn valid_files_at_the_boundary_are_accepted() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("resume.DOCX");
    let file = std::fs::File::create(&path).unwrap();
    file.set_len(MAX_RESUME_BYTES).unwrap();

    assert!(ResumeValidator::validate(&path).await.is_ok());
}

#[tokio::test]
async fn successful_analysis_renders_excellent_report() {
    let base_url = serve_once(
        "200 OK",
        r#"{"score":"87%","missing_keywords":["Python"],"suggestions":["Add metrics"]}"#,
    )
    .await;

    let dir = TempDir::new().unwrap();
    let path = write_resume(&dir, "resume.pdf", b"%PDF-1.4 minimal");

    let client = AnalyzerClient::new(base_url, 5).unwrap();
    let mut session = AnalysisSession::new(client);
    let request = AnalysisRequest::new(path);

    let state = session.submit(request).await.unwrap().clone();
    let result = match state {
        SubmissionState::Success(result) => result,
        other => panic!("expected success, got {:?}", other),
    };

    let report = AnalysisReport::from_result(&result);
    assert_eq!(report.score, 87);
    assert_eq!(report.band, "Excellent");
    assert_eq!(report.missing_keywords, vec!["Python"]);
    assert_eq!(report.suggestions, vec!["Add metrics"]);
}

#[tokio::test]
async fn server_error_message_is_surfaced_verbatim() {
    let base_url = serve_once("400 Bad Request", r#"{"error":"No resume file provided"}"#).await;

    let dir = TempDir::new().unwrap();
    let path = write_resume(&dir, "resume.pdf", b"%PDF-1.4 minimal");

    let client = AnalyzerClient::new(base_url, 5).unwrap();
    let err = client
        .analyze(&AnalysisRequest::new(path))
        .await
        .unwrap_err();

    match &err {
        AnalyzerError::Server { status, message } => {
            assert_eq!(*status, 400);
            assert_eq!(message.as_deref(), Some("No resume file provided"));
        }
        other => panic!("expected Server error, got {:?}", other),
    }
    assert_eq!(err.user_message(), "No resume file provided");
}

#[tokio::test]
async fn non_json_success_body_is_classified_as_malformed() {
    let base_url = serve_once("200 OK", "<html>definitely not json</html>").await;

    let dir = TempDir::new().unwrap();
    let path = write_resume(&dir, "resume.pdf", b"%PDF-1.4 minimal");

    let client = AnalyzerClient::new(base_url, 5).unwrap();
    let err = client
        .analyze(&AnalysisRequest::new(path))
        .await
        .unwrap_err();

    assert!(matches!(err, AnalyzerError::MalformedResponse { .. }));
}

#[tokio::test]
async fn connection_refused_is_classified_as_unreachable() {
    // Bind a port, then drop the listener so nothing answers on it.
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let dir = TempDir::new().unwrap();
    let path = write_resume(&dir, "resume.pdf", b"%PDF-1.4 minimal");

    let client = AnalyzerClient::new(format!("http://127.0.0.1:{}", port), 5).unwrap();
    let mut session = AnalysisSession::new(client);

    let state = session
        .submit(AnalysisRequest::new(path))
        .await
        .unwrap()
        .clone();
    let message = match state {
        SubmissionState::Failed(message) => message,
        other => panic!("expected failure, got {:?}", other),
    };
    assert!(message.contains("analysis server"));

    // Failure is recoverable: the session goes back to Idle.
    session.reset();
    assert_eq!(*session.state(), SubmissionState::Idle);
}

#[tokio::test]
async fn second_submission_is_refused_while_one_is_in_flight() {
    let client = AnalyzerClient::new("http://127.0.0.1:5001".to_string(), 1).unwrap();
    let mut session = AnalysisSession::new(client);

    session.begin_submission().unwrap();
    assert_eq!(
        session.begin_submission().unwrap_err(),
        SubmitRefusal::InFlight
    );
}

#[tokio::test]
async fn health_check_reports_unreachable_backend_as_false() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let port = listener.local_addr().unwrap().port();
    drop(listener);

    let client = AnalyzerClient::new(format!("http://127.0.0.1:{}", port), 5).unwrap();
    assert!(!client.health_check().await);
}

#[tokio::test]
async fn health_check_reports_reachable_backend_as_true() {
    let base_url = serve_once("200 OK", r#"{"status":"ok"}"#).await;
    let client = AnalyzerClient::new(base_url, 5).unwrap();
    assert!(client.health_check().await);
}
