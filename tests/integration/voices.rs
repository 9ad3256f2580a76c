//! Integration tests for the voice listing collaborator

use crate::integration::mock_server::MockServerFixture;
use chatterbox_client::{ErrorKind, Gender, SpeechClient, Voice};

#[tokio::test]
async fn test_list_voices_decodes_catalog() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_voices(200, r#"{"Man":["Achird","Algenib"],"Woman":["Aoede","Kore"]}"#)
        .await;

    let catalog = fixture.client().list_voices().await.unwrap();

    assert_eq!(catalog.len(), 4);
    assert!(catalog.contains("Achird", Gender::Man));
    assert!(catalog.contains("Kore", Gender::Woman));
    assert_eq!(
        catalog.voices().first(),
        Some(&Voice {
            name: "Achird".to_string(),
            gender: Gender::Man
        })
    );
}

#[tokio::test]
async fn test_list_voices_with_no_cloned_voices() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_voices(200, r#"{"Man":[],"Woman":[]}"#).await;

    let catalog = fixture.client().list_voices().await.unwrap();
    assert!(catalog.is_empty());
}

#[tokio::test]
async fn test_list_voices_server_error() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .mock_voices(503, r#"{"detail":"warming up"}"#)
        .await;

    let err = fixture.client().list_voices().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Server);
    assert_eq!(err.status(), Some(503));
}

#[tokio::test]
async fn test_list_voices_malformed_payload() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture.mock_voices(200, r#"["Achird","Aoede"]"#).await;

    let err = fixture.client().list_voices().await.unwrap_err();
    assert_eq!(err.kind(), ErrorKind::Serialization);
}

#[tokio::test]
async fn test_custom_voices_path() {
    let mut fixture = MockServerFixture::new().await;
    let _mock = fixture
        .server
        .mock("GET", "/api/voices")
        .with_status(200)
        .with_body(r#"{"Woman":["Aoede"]}"#)
        .create_async()
        .await;

    let client = SpeechClient::builder()
        .base_url(&fixture.base_url)
        .voices_path("/api/voices")
        .build()
        .unwrap();
    let catalog = client.list_voices().await.unwrap();
    assert_eq!(catalog.by_gender(Gender::Woman), ["Aoede".to_string()]);
}
