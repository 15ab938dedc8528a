//! Route tests against the router with mock backends.

#![allow(clippy::unwrap_used, clippy::panic)]

use std::sync::Arc;

use axum::Router;
use axum::body::{Body, to_bytes};
use axum::http::{Request, StatusCode, header};
use recipecast::prelude::*;
use recipecast::providers::mock::{MockChat, MockImages, MockSpeech};
use recipecast_web::{AppState, build_router};
use serde_json::{Value, json};
use tower::ServiceExt;

struct TestApp {
    router: Router,
    chat: Arc<MockChat>,
    images: Arc<MockImages>,
}

impl TestApp {
    fn new(chat: MockChat) -> Self {
        let chat = Arc::new(chat);
        let speech = Arc::new(MockSpeech::new(vec![0x00, 0x01]));
        let images = Arc::new(MockImages::new(["http://img/1.png", "http://img/2.png"]));
        let pipeline = RecipePipeline::new(chat.clone(), speech, images.clone());

        Self {
            router: build_router(AppState::new(pipeline).unwrap()),
            chat,
            images,
        }
    }

    fn happy() -> Self {
        Self::new(MockChat::new("# Vegan Chili Recipe...\n\n* beans"))
    }

    async fn send(&self, request: Request<Body>) -> (StatusCode, String) {
        let response = self.router.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    async fn post_form(&self, body: &str) -> (StatusCode, String) {
        self.send(
            Request::builder()
                .method("POST")
                .uri("/recipe")
                .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded")
                .body(Body::from(body.to_owned()))
                .unwrap(),
        )
        .await
    }

    async fn post_json(&self, body: &Value) -> (StatusCode, Value) {
        let (status, text) = self
            .send(
                Request::builder()
                    .method("POST")
                    .uri("/api/recipe")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await;
        (status, serde_json::from_str(&text).unwrap())
    }
}

#[tokio::test]
async fn test_index_renders_form() {
    let app = TestApp::happy();
    let (status, page) = app
        .send(Request::builder().uri("/").body(Body::empty()).unwrap())
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<h1>Recipe Generator</h1>"));
    assert!(page.contains("Generate Recipe"));
    for voice in Voice::ALL {
        assert!(page.contains(&format!("<option value=\"{voice}\"")));
    }
    assert_eq!(app.chat.call_count(), 0);
}

#[tokio::test]
async fn test_form_submission_renders_artifacts() {
    let app = TestApp::happy();
    let (status, page) = app
        .post_form("food=vegan+chili&calories=500&voice=Rachel")
        .await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains("<h1>Vegan Chili Recipe...</h1>"));
    assert!(page.contains("<audio controls"));
    assert!(page.contains("base64,AAE="));
    assert!(page.contains("1.png"));
    assert!(!page.contains("2.png"));
    assert_eq!(app.images.calls()[0].prompt, "vegan chili");
}

#[tokio::test]
async fn test_form_neutralises_script_links_in_recipe() {
    let app = TestApp::new(MockChat::new(
        "# Soup\n\n[Full recipe](javascript:alert(document.cookie))",
    ));
    let (status, page) = app.post_form("food=soup&calories=200&voice=Bella").await;

    assert_eq!(status, StatusCode::OK);
    assert!(page.contains(">Full recipe</a>"));
    assert!(!page.contains("javascript:"));
}

#[tokio::test]
async fn test_form_rejects_out_of_range_calories() {
    let app = TestApp::happy();
    let (status, page) = app.post_form("food=soup&calories=3001&voice=Sam").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(page.contains("must be between 1 and 3000"));
    assert!(page.contains("value=\"soup\""));
    assert_eq!(app.chat.call_count(), 0);
}

#[tokio::test]
async fn test_form_rejects_empty_food() {
    let app = TestApp::happy();
    let (status, _) = app.post_form("food=++&calories=200&voice=Bella").await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(app.chat.call_count(), 0);
}

#[tokio::test]
async fn test_form_backend_failure_shows_error_without_artifacts() {
    let app = TestApp::new(MockChat::failing(ProviderError::auth(
        "openai",
        "Incorrect API key provided",
    )));
    let (status, page) = app.post_form("food=soup&calories=200&voice=Bella").await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert!(page.contains("Incorrect API key provided"));
    assert!(!page.contains("<audio"));
    assert_eq!(app.images.call_count(), 0);
}

#[tokio::test]
async fn test_api_recipe() {
    let app = TestApp::happy();
    let (status, body) = app
        .post_json(&json!({ "food": "vegan chili", "calories": 500, "voice": "Rachel" }))
        .await;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["recipe"], "# Vegan Chili Recipe...\n\n* beans");
    assert_eq!(body["audio_base64"], "AAE=");
    assert_eq!(body["audio_mime"], "audio/mpeg");
    assert_eq!(body["image_url"], "http://img/1.png");
}

#[tokio::test]
async fn test_api_validation_error() {
    let app = TestApp::happy();
    let (status, body) = app
        .post_json(&json!({ "food": "soup", "calories": 0, "voice": "Rachel" }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["kind"], "validation");
    assert_eq!(app.chat.call_count(), 0);
}

#[tokio::test]
async fn test_api_unknown_voice() {
    let app = TestApp::happy();
    let (status, body) = app
        .post_json(&json!({ "food": "soup", "calories": 200, "voice": "Morgan" }))
        .await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert!(body["error"]["message"].as_str().unwrap().contains("Morgan"));
}

#[tokio::test]
async fn test_api_malformed_body() {
    let app = TestApp::happy();
    let (status, body) = app.post_json(&json!({ "calories": 200 })).await;

    assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    assert_eq!(body["error"]["kind"], "body");
}

#[tokio::test]
async fn test_api_backend_error() {
    let app = TestApp::new(MockChat::failing(ProviderError::rate_limited("openai")));
    let (status, body) = app
        .post_json(&json!({ "food": "soup", "calories": 200 }))
        .await;

    assert_eq!(status, StatusCode::BAD_GATEWAY);
    assert_eq!(body["error"]["kind"], "rate_limited");
}

#[tokio::test]
async fn test_health() -> anyhow::Result<()> {
    let app = TestApp::happy();
    let (status, text) = app
        .send(Request::builder().uri("/health").body(Body::empty())?)
        .await;
    let body: Value = serde_json::from_str(&text)?;

    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "ok");
    assert_eq!(body["module"], "recipecast-web");
    assert!(body["version"].is_string());
    Ok(())
}
