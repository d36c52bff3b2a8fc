//! Route-level tests driving the real router with a mock generation
//! backend and a stub extractor, so no PDF parser or inference server is
//! needed.

use std::path::Path;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use tower::ServiceExt;

use pdfchat_core::generate::mock::{MockGenerator, MockResponse};
use pdfchat_core::{
    DocumentStore, ExtractError, ExtractedDocument, GenerationBackend, TextExtractor,
};
use pdfchat_web::AppState;

/// Extractor stub that treats the uploaded bytes as the document text.
struct BytesExtractor;

impl TextExtractor for BytesExtractor {
    fn extract(&self, path: &Path) -> Result<ExtractedDocument, ExtractError> {
        let bytes = std::fs::read(path)?;
        Ok(ExtractedDocument {
            text: String::from_utf8_lossy(&bytes).into_owned(),
            page_count: 1,
        })
    }
}

/// Extractor stub that always fails as an unparseable PDF.
struct FailingExtractor;

impl TextExtractor for FailingExtractor {
    fn extract(&self, _path: &Path) -> Result<ExtractedDocument, ExtractError> {
        Err(ExtractError::UnreadableDocument("broken xref".to_string()))
    }
}

fn app_with(generator: Arc<dyn GenerationBackend>, extractor: Arc<dyn TextExtractor>) -> Router {
    pdfchat_web::router(Arc::new(AppState {
        store: DocumentStore::new(),
        extractor,
        generator,
    }))
}

fn app(generator: Arc<dyn GenerationBackend>) -> Router {
    app_with(generator, Arc::new(BytesExtractor))
}

fn upload_request(field: &str, filename: &str, bytes: &[u8]) -> Request<Body> {
    let boundary = "test-boundary";
    let mut body = Vec::new();
    body.extend_from_slice(
        format!(
            "--{boundary}\r\nContent-Disposition: form-data; \
             name=\"{field}\"; filename=\"{filename}\"\r\n\
             Content-Type: application/pdf\r\n\r\n"
        )
        .as_bytes(),
    );
    body.extend_from_slice(bytes);
    body.extend_from_slice(format!("\r\n--{boundary}--\r\n").as_bytes());

    Request::builder()
        .method("POST")
        .uri("/upload-pdf")
        .header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={boundary}"),
        )
        .body(Body::from(body))
        .unwrap()
}

fn ask_request(body: &str) -> Request<Body> {
    Request::builder()
        .method("POST")
        .uri("/ask-question")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn summary_request() -> Request<Body> {
    Request::builder()
        .method("GET")
        .uri("/summary")
        .body(Body::empty())
        .unwrap()
}

async fn json_body(response: axum::response::Response) -> serde_json::Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn index_serves_the_chat_page() {
    let app = app(Arc::new(MockGenerator::echo()));
    let response = app
        .oneshot(
            Request::builder()
                .method("GET")
                .uri("/")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let content_type = response
        .headers()
        .get(header::CONTENT_TYPE)
        .unwrap()
        .to_str()
        .unwrap()
        .to_string();
    assert!(content_type.starts_with("text/html"));
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    let html = String::from_utf8(bytes.to_vec()).unwrap();
    assert!(html.contains("Chat with PDF"));
    // The page drives all three endpoints.
    assert!(html.contains("/upload-pdf"));
    assert!(html.contains("/ask-question"));
    assert!(html.contains("/summary"));
}

#[tokio::test]
async fn ask_before_any_upload_is_rejected() {
    let app = app(Arc::new(MockGenerator::echo()));
    let response = app
        .oneshot(ask_request(r#"{"question": "anything?"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No PDF uploaded yet.");
}

#[tokio::test]
async fn summary_before_any_upload_is_rejected() {
    let app = app(Arc::new(MockGenerator::echo()));
    let response = app.oneshot(summary_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No PDF uploaded yet.");
}

#[tokio::test]
async fn upload_without_file_part_is_rejected() {
    let app = app(Arc::new(MockGenerator::echo()));
    let response = app
        .oneshot(upload_request("not-a-file", "x.pdf", b"%PDF-whatever"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No file provided");
}

#[tokio::test]
async fn upload_without_pdf_magic_is_rejected() {
    let app = app(Arc::new(MockGenerator::echo()));
    let response = app
        .oneshot(upload_request("file", "x.pdf", b"plain text payload"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn upload_then_summary_round_trip() {
    let app = app(Arc::new(MockGenerator::echo()));

    let response = app
        .clone()
        .oneshot(upload_request("file", "hello.pdf", b"%PDF- Hello world."))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(
        json_body(response).await["message"],
        "PDF uploaded and processed successfully."
    );

    let response = app.oneshot(summary_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    let summary = body["summary"].as_str().unwrap();
    // Echo backend returns the model input: prompt prefix plus stored text.
    assert!(summary.starts_with("summarize: "));
    assert!(summary.contains("Hello world."));
}

#[tokio::test]
async fn repeated_summary_feeds_identical_model_input() {
    let generator = Arc::new(MockGenerator::echo());
    let app = app(generator.clone());

    app.clone()
        .oneshot(upload_request("file", "doc.pdf", b"%PDF- stable content"))
        .await
        .unwrap();

    let first = json_body(app.clone().oneshot(summary_request()).await.unwrap()).await;
    let second = json_body(app.oneshot(summary_request()).await.unwrap()).await;
    assert_eq!(first["summary"], second["summary"]);
    assert_eq!(generator.call_count(), 2);
}

#[tokio::test]
async fn ask_with_missing_null_or_empty_question_is_rejected() {
    let app = app(Arc::new(MockGenerator::echo()));
    app.clone()
        .oneshot(upload_request("file", "doc.pdf", b"%PDF- some text"))
        .await
        .unwrap();

    for body in ["{}", r#"{"question": null}"#, r#"{"question": ""}"#] {
        let response = app.clone().oneshot(ask_request(body)).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST, "body: {body}");
        assert_eq!(json_body(response).await["error"], "No question provided.");
    }
}

#[tokio::test]
async fn ask_with_malformed_body_still_checks_the_document_first() {
    // The missing-document error wins even when the body isn't JSON at
    // all, matching the documented check order.
    let app = app(Arc::new(MockGenerator::echo()));
    let response = app
        .oneshot(ask_request("this is not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No PDF uploaded yet.");
}

#[tokio::test]
async fn ask_with_malformed_body_after_upload_is_a_missing_question() {
    let app = app(Arc::new(MockGenerator::echo()));
    app.clone()
        .oneshot(upload_request("file", "doc.pdf", b"%PDF- some text"))
        .await
        .unwrap();

    // Unparseable body is treated as an empty request. The second request
    // has no content-type header at all.
    let response = app
        .clone()
        .oneshot(ask_request("this is not json"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No question provided.");

    let response = app
        .oneshot(
            Request::builder()
                .method("POST")
                .uri("/ask-question")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(json_body(response).await["error"], "No question provided.");
}

#[tokio::test]
async fn ask_returns_question_and_answer() {
    let generator = Arc::new(MockGenerator::new(MockResponse::Text(
        "The answer.".to_string(),
    )));
    let app = app(generator.clone());

    app.clone()
        .oneshot(upload_request("file", "doc.pdf", b"%PDF- context text"))
        .await
        .unwrap();

    let response = app
        .oneshot(ask_request(r#"{"question": "What is this?"}"#))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = json_body(response).await;
    assert_eq!(body["question"], "What is this?");
    assert_eq!(body["answer"], "The answer.");

    // The question must appear in the formatted prompt.
    let prompt = generator.last_prompt().unwrap();
    assert!(prompt.starts_with("question: What is this? context: "));
}

#[tokio::test]
async fn second_upload_replaces_the_document() {
    let app = app(Arc::new(MockGenerator::echo()));

    app.clone()
        .oneshot(upload_request("file", "a.pdf", b"%PDF- document alpha"))
        .await
        .unwrap();
    app.clone()
        .oneshot(upload_request("file", "b.pdf", b"%PDF- document beta"))
        .await
        .unwrap();

    let body = json_body(app.oneshot(summary_request()).await.unwrap()).await;
    let summary = body["summary"].as_str().unwrap();
    assert!(summary.contains("document beta"));
    assert!(!summary.contains("document alpha"));
}

#[tokio::test]
async fn generation_failure_maps_to_service_unavailable() {
    let app = app(Arc::new(MockGenerator::new(MockResponse::Unavailable(
        "model down".to_string(),
    ))));

    app.clone()
        .oneshot(upload_request("file", "doc.pdf", b"%PDF- text"))
        .await
        .unwrap();

    let response = app.oneshot(summary_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    assert!(json_body(response).await["error"].is_string());
}

#[tokio::test]
async fn unparseable_pdf_maps_to_unprocessable_entity() {
    let app = app_with(
        Arc::new(MockGenerator::echo()),
        Arc::new(FailingExtractor),
    );

    let response = app
        .clone()
        .oneshot(upload_request("file", "bad.pdf", b"%PDF- zzzz"))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);

    // The failed upload must not populate the store.
    let response = app.oneshot(summary_request()).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}
