//! HTTP-level tests for the backend clients against a local mock server.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;
use std::time::Duration;

use recipecast::prelude::*;
use serde_json::json;
use wiremock::matchers::{body_partial_json, header, method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn openai(server: &MockServer) -> OpenAI {
    OpenAI::new(OpenAIConfig::new("sk-test").with_base_url(server.uri())).unwrap()
}

fn elevenlabs(server: &MockServer) -> ElevenLabs {
    ElevenLabs::new(ElevenLabsConfig::new("xi-test").with_base_url(server.uri())).unwrap()
}

fn replicate(server: &MockServer, max_polls: u32) -> Replicate {
    Replicate::new(
        ReplicateConfig::new("r8-test")
            .with_base_url(server.uri())
            .with_polling(Duration::from_millis(10), max_polls),
    )
    .unwrap()
}

fn prediction(server: &MockServer, status: &str, output: serde_json::Value) -> serde_json::Value {
    json!({
        "id": "p1",
        "status": status,
        "output": output,
        "error": null,
        "urls": { "get": format!("{}/predictions/p1", server.uri()) }
    })
}

fn provider_kind(err: &Error) -> ProviderErrorKind {
    err.as_provider()
        .map(|e| e.kind)
        .unwrap_or_else(|| panic!("expected provider error, got {err}"))
}

#[tokio::test]
async fn test_openai_sends_prompt_and_returns_text() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("Authorization", "Bearer sk-test"))
        .and(body_partial_json(json!({
            "model": "gpt-4o-mini",
            "max_tokens": 256,
            "messages": [{ "role": "user", "content": "Write soup." }]
        })))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "message": { "role": "assistant", "content": "Tomato Soup..." },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let request = ChatRequest::default().user("Write soup.").max_tokens(256);
    let response = openai(&server).chat(&request).await.unwrap();

    assert_eq!(response.text(), Some("Tomato Soup..."));
    assert_eq!(response.model.as_deref(), Some("gpt-4o-mini"));
}

#[tokio::test]
async fn test_openai_sends_organization_header() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .and(header("OpenAI-Organization", "org-kitchen"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "message": { "role": "assistant", "content": "Soup." },
                "finish_reason": "stop"
            }]
        })))
        .expect(1)
        .mount(&server)
        .await;

    let client = OpenAI::new(
        OpenAIConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_organization("org-kitchen"),
    )
    .unwrap();
    let response = client
        .chat(&ChatRequest::default().user("Write soup."))
        .await
        .unwrap();

    assert_eq!(response.text(), Some("Soup."));
}

#[tokio::test]
async fn test_openai_auth_failure() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "error": {
                "message": "Incorrect API key provided",
                "type": "invalid_request_error",
                "code": "invalid_api_key"
            }
        })))
        .mount(&server)
        .await;

    let err = openai(&server)
        .chat(&ChatRequest::default().user("Hi"))
        .await
        .unwrap_err();

    assert_eq!(provider_kind(&err), ProviderErrorKind::Auth);
    assert!(err.to_string().contains("Incorrect API key"));
}

#[tokio::test]
async fn test_openai_slow_response_is_timeout() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_delay(Duration::from_secs(5)))
        .mount(&server)
        .await;

    let client = OpenAI::new(
        OpenAIConfig::new("sk-test")
            .with_base_url(server.uri())
            .with_timeout(1),
    )
    .unwrap();
    let err = client
        .chat(&ChatRequest::default().user("Hi"))
        .await
        .unwrap_err();

    assert_eq!(provider_kind(&err), ProviderErrorKind::Timeout);
    assert_eq!(
        err.as_provider().and_then(|e| e.provider.as_deref()),
        Some("openai")
    );
    assert_eq!(ProviderErrorKind::Timeout.as_str(), "timeout");
}

#[tokio::test]
async fn test_openai_missing_key_sends_nothing() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&server)
        .await;

    let client = OpenAI::new(OpenAIConfig::new("").with_base_url(server.uri())).unwrap();
    let err = client
        .chat(&ChatRequest::default().user("Hi"))
        .await
        .unwrap_err();

    assert_eq!(provider_kind(&err), ProviderErrorKind::Auth);
    assert!(err.to_string().contains("OPENAI_API_KEY"));
}

#[tokio::test]
async fn test_elevenlabs_returns_audio_bytes() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path(format!("/text-to-speech/{}", Voice::Rachel.voice_id())))
        .and(query_param("output_format", "mp3_44100_128"))
        .and(header("xi-api-key", "xi-test"))
        .and(body_partial_json(json!({
            "text": "Preheat the oven.",
            "model_id": "eleven_monolingual_v1"
        })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x49, 0x44, 0x33, 0x04]))
        .expect(1)
        .mount(&server)
        .await;

    let request = SpeechRequest::new("", "Preheat the oven.", Voice::Rachel);
    let response = elevenlabs(&server).speech(&request).await.unwrap();

    assert_eq!(response.audio, vec![0x49, 0x44, 0x33, 0x04]);
    assert_eq!(response.mime_type(), "audio/mpeg");
}

#[tokio::test]
async fn test_elevenlabs_quota_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "detail": { "status": "quota_exceeded", "message": "You have 0 credits left." }
        })))
        .mount(&server)
        .await;

    let err = elevenlabs(&server)
        .speech(&SpeechRequest::new("", "text", Voice::Bella))
        .await
        .unwrap_err();

    assert!(err.to_string().contains("0 credits"));
    assert_eq!(
        err.as_provider().and_then(|e| e.provider.as_deref()),
        Some("elevenlabs")
    );
}

#[tokio::test]
async fn test_elevenlabs_empty_body_is_an_error() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let err = elevenlabs(&server)
        .speech(&SpeechRequest::new("", "text", Voice::Adam))
        .await
        .unwrap_err();

    assert_eq!(provider_kind(&err), ProviderErrorKind::ResponseFormat);
}

#[tokio::test]
async fn test_replicate_polls_until_succeeded() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predictions"))
        .and(header("Authorization", "Bearer r8-test"))
        .and(body_partial_json(json!({
            "version": "db21e45d3f7023abc2a46ee38a23973f6dce16bb082a930b0c49861f96d1e5bf",
            "input": { "prompt": "vegan chili" }
        })))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(prediction(&server, "starting", json!(null))),
        )
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/predictions/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prediction(
            &server,
            "processing",
            json!(null),
        )))
        .up_to_n_times(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/predictions/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prediction(
            &server,
            "succeeded",
            json!(["http://img/1.png", "http://img/2.png"]),
        )))
        .mount(&server)
        .await;

    let response = replicate(&server, 10)
        .generate(&ImageRequest::new("", "vegan chili"))
        .await
        .unwrap();

    assert_eq!(response.urls, ["http://img/1.png", "http://img/2.png"]);
}

#[tokio::test]
async fn test_replicate_failed_prediction() {
    let server = MockServer::start().await;
    let mut failed = prediction(&server, "failed", json!(null));
    failed["error"] = json!("NSFW content detected");
    Mock::given(method("POST"))
        .and(path("/predictions"))
        .respond_with(ResponseTemplate::new(201).set_body_json(failed))
        .mount(&server)
        .await;

    let err = replicate(&server, 10)
        .generate(&ImageRequest::new("", "soup"))
        .await
        .unwrap_err();

    assert_eq!(provider_kind(&err), ProviderErrorKind::Prediction);
    assert!(err.to_string().contains("NSFW"));
}

#[tokio::test]
async fn test_replicate_gives_up_after_max_polls() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predictions"))
        .respond_with(
            ResponseTemplate::new(201).set_body_json(prediction(&server, "starting", json!(null))),
        )
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path("/predictions/p1"))
        .respond_with(ResponseTemplate::new(200).set_body_json(prediction(
            &server,
            "processing",
            json!(null),
        )))
        .expect(2)
        .mount(&server)
        .await;

    let err = replicate(&server, 2)
        .generate(&ImageRequest::new("", "soup"))
        .await
        .unwrap_err();

    assert_eq!(provider_kind(&err), ProviderErrorKind::Timeout);
}

#[tokio::test]
async fn test_replicate_invalid_version() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/predictions"))
        .respond_with(ResponseTemplate::new(422).set_body_json(json!({
            "title": "Invalid version or not permitted",
            "detail": "The specified version does not exist"
        })))
        .mount(&server)
        .await;

    let err = replicate(&server, 2)
        .generate(&ImageRequest::new("bogus", "soup"))
        .await
        .unwrap_err();

    assert_eq!(provider_kind(&err), ProviderErrorKind::InvalidRequest);
}

#[tokio::test]
async fn test_full_pipeline_over_http() {
    let server = MockServer::start().await;
    Mock::given(method("POST"))
        .and(path("/chat/completions"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "model": "gpt-4o-mini",
            "choices": [{
                "message": { "role": "assistant", "content": "Vegan Chili Recipe..." },
                "finish_reason": "stop"
            }]
        })))
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path(format!("/text-to-speech/{}", Voice::Rachel.voice_id())))
        .and(body_partial_json(json!({ "text": "Vegan Chili Recipe..." })))
        .respond_with(ResponseTemplate::new(200).set_body_bytes(vec![0x00, 0x01]))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("POST"))
        .and(path("/predictions"))
        .and(body_partial_json(json!({ "input": { "prompt": "vegan chili" } })))
        .respond_with(ResponseTemplate::new(201).set_body_json(prediction(
            &server,
            "succeeded",
            json!(["http://img/1.png", "http://img/2.png"]),
        )))
        .expect(1)
        .mount(&server)
        .await;

    let pipeline = RecipePipeline::new(
        Arc::new(openai(&server)),
        Arc::new(elevenlabs(&server)),
        Arc::new(replicate(&server, 5)),
    );
    let request = RecipeRequest::new("vegan chili", 500, Voice::Rachel).unwrap();

    let artifacts = pipeline.run(&request).await.unwrap();

    assert_eq!(artifacts.recipe, "Vegan Chili Recipe...");
    assert_eq!(artifacts.audio.audio, vec![0x00, 0x01]);
    assert_eq!(artifacts.image_url, "http://img/1.png");
}
