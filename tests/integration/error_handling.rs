//! Integration tests for error classification on the synthesis path

use crate::integration::mock_server::{dir_entries, fake_audio, MockServerFixture};
use chatterbox_client::{Error, ErrorKind, SpeechClient, SynthesisRequest};
use std::io::Write;
use std::time::Duration;

#[tokio::test]
async fn test_empty_text_never_reaches_the_server() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_audio("/generate", fake_audio(10), 0).await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.wav");
    let err = fixture
        .client()
        .synthesize(&SynthesisRequest::new(""), &dest)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    mock.assert_async().await;
    assert!(!dest.exists());
    assert!(dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn test_out_of_range_temperature_is_rejected_locally() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_audio("/generate", fake_audio(10), 0).await;

    let mut out = Vec::new();
    let err = fixture
        .client()
        .synthesize_to_writer(&SynthesisRequest::new("hot").temperature(3.5), &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    mock.assert_async().await;
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_missing_audio_prompt_is_rejected_before_sending() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_audio("/generate", fake_audio(10), 0).await;

    let dir = tempfile::tempdir().unwrap();
    let request = SynthesisRequest::new("clone").audio_prompt(dir.path().join("missing.wav"));
    let err = fixture
        .client()
        .synthesize(&request, dir.path().join("out.wav"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Validation);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_server_error_surfaces_status_and_body() {
    let mut fixture = MockServerFixture::new().await;
    let body = r#"{"detail":"Voice 'Nobody' not found for gender 'Man'"}"#;
    let _mock = fixture.mock_error_response("/generate", 404, body).await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.wav");
    let request = SynthesisRequest::new("hello").voice("Nobody");
    let err = fixture
        .client()
        .synthesize(&request, &dest)
        .await
        .unwrap_err();

    match &err {
        Error::Server {
            status,
            body: got,
            detail,
        } => {
            assert_eq!(*status, 404);
            assert_eq!(got, body);
            assert_eq!(
                detail.as_deref(),
                Some("Voice 'Nobody' not found for gender 'Man'")
            );
        }
        other => panic!("expected server error, got {other:?}"),
    }
    assert!(!err.is_retryable());
    assert!(!dest.exists());
    assert!(dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn test_internal_server_error_is_retryable() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_error_response("/generate", 500, r#"{"detail":"Model not loaded yet. Please wait."}"#)
        .await;

    let mut out = Vec::new();
    let err = fixture
        .client()
        .synthesize_to_writer(&SynthesisRequest::new("hello"), &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(500));
    assert!(err.is_retryable());
    assert!(out.is_empty(), "error payload must not reach the sink");
}

#[tokio::test]
async fn test_connection_refused_is_a_transport_error() {
    let client = SpeechClient::builder()
        .base_url("http://127.0.0.1:1")
        .connect_timeout(Duration::from_secs(2))
        .build()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.wav");
    let err = client
        .synthesize(&SynthesisRequest::new("anyone there?"), &dest)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Transport);
    match &err {
        Error::Transport(t) => {
            assert!(t.is_connect(), "refused connection should be a connect error: {t}");
            assert!(!t.is_timeout());
        }
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(err.is_retryable());
    assert!(!dest.exists());
    assert!(dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn test_unwritable_destination_is_a_sink_error() {
    let mut fixture = MockServerFixture::new().await;
    let mock = fixture.mock_audio("/generate", fake_audio(10), 0).await;

    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not-a-dir");
    std::fs::write(&blocker, b"file").unwrap();

    let err = fixture
        .client()
        .synthesize(&SynthesisRequest::new("hello"), blocker.join("out.wav"))
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Sink);
    mock.assert_async().await;
}

#[tokio::test]
async fn test_timeout_leaves_no_output_behind() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/generate")
        .with_status(200)
        .with_chunked_body(|w| {
            w.write_all(b"RIFF")?;
            std::thread::sleep(Duration::from_secs(2));
            w.write_all(b"never mind")
        })
        .create_async()
        .await;

    let client = SpeechClient::builder()
        .base_url(&fixture.base_url)
        .timeout(Duration::from_millis(300))
        .build()
        .unwrap();

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("slow.wav");
    let err = client
        .synthesize(&SynthesisRequest::new("slow"), &dest)
        .await
        .unwrap_err();

    match &err {
        Error::Transport(t) => assert!(t.is_timeout(), "expected a timeout: {t}"),
        other => panic!("expected transport error, got {other:?}"),
    }
    assert!(!dest.exists());
    assert!(dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn test_cancelled_synthesis_leaves_no_output_behind() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/generate")
        .with_status(200)
        .with_chunked_body(|w| {
            w.write_all(b"RIFF")?;
            std::thread::sleep(Duration::from_secs(2));
            w.write_all(b"too late")
        })
        .create_async()
        .await;

    // No client timeout: the caller abandons the future instead.
    let client = fixture.client();
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("abandoned.wav");
    let request = SynthesisRequest::new("abandon me");

    let outcome =
        tokio::time::timeout(Duration::from_millis(300), client.synthesize(&request, &dest)).await;

    assert!(outcome.is_err(), "synthesis should still be in flight");
    assert!(!dest.exists());
    assert!(dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn test_no_content_response_is_a_server_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/generate")
        .with_status(204)
        .create_async()
        .await;

    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("out.wav");
    let err = fixture
        .client()
        .synthesize(&SynthesisRequest::new("hi"), &dest)
        .await
        .unwrap_err();

    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.status(), Some(204));
    assert!(!dest.exists());
    assert!(dir_entries(dir.path()).is_empty());
}

#[tokio::test]
async fn test_accepted_response_is_not_treated_as_audio() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("POST", "/generate")
        .with_status(202)
        .with_body("queued")
        .create_async()
        .await;

    let mut out = Vec::new();
    let err = fixture
        .client()
        .synthesize_to_writer(&SynthesisRequest::new("hi"), &mut out)
        .await
        .unwrap_err();

    assert_eq!(err.status(), Some(202));
    assert!(out.is_empty());
}

#[tokio::test]
async fn test_invalid_base_url_fails_at_build() {
    let err = SpeechClient::builder()
        .base_url("file:///tmp/socket")
        .build()
        .unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Configuration);
}
