pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::analysis::handlers as analysis_handlers;
use crate::extraction::handlers as extraction_handlers;
use crate::jd::handlers as jd_handlers;
use crate::state::AppState;

/// Headroom above the upload limit for multipart framing and JSON envelopes.
const BODY_OVERHEAD_BYTES: usize = 64 * 1024;

pub fn build_router(state: AppState) -> Router {
    let body_limit = state.config.max_upload_bytes + BODY_OVERHEAD_BYTES;

    Router::new()
        .route("/", get(health::root_handler))
        .route("/health", get(health::health_handler))
        .route(
            "/pdfs/extracttext",
            post(extraction_handlers::handle_extract_text),
        )
        .route("/jds/parse_text", post(jd_handlers::handle_parse_text))
        .route("/ats/analyse", post(analysis_handlers::handle_analyse))
        .layer(DefaultBodyLimit::max(body_limit))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::analysis::Analyzer;
    use crate::config::Config;
    use crate::errors::AppError;
    use crate::jd::KeywordExtractor;

    struct FixedExtractor(Value);

    #[async_trait]
    impl KeywordExtractor for FixedExtractor {
        async fn extract(&self, _jd_text: &str) -> Result<Value, AppError> {
            Ok(self.0.clone())
        }
    }

    fn state(extractor: Option<Value>) -> AppState {
        AppState {
            config: Config::for_tests(),
            analyzer: Arc::new(Analyzer::default()),
            llm: None,
            keyword_extractor: extractor
                .map(|v| Arc::new(FixedExtractor(v)) as Arc<dyn KeywordExtractor>),
        }
    }

    fn document(line_count: usize, text: &str) -> Value {
        let lines: Vec<Value> = (0..line_count)
            .map(|i| {
                json!({"spans": [{
                    "text": format!("Line number {i}"),
                    "font": "ArialMT",
                    "bbox": [50.0, 20.0 * i as f64, 300.0, 20.0 * i as f64 + 12.0]
                }]})
            })
            .collect();
        json!({
            "pages": [{
                "width": 612.0,
                "text": text,
                "image_count": 0,
                "blocks": [{"lines": lines}]
            }]
        })
    }

    async fn post_json(state: AppState, uri: &str, body: Value) -> (StatusCode, Value) {
        let response = build_router(state)
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri(uri)
                    .header("content-type", "application/json")
                    .body(Body::from(body.to_string()))
                    .unwrap(),
            )
            .await
            .unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        (status, serde_json::from_slice(&bytes).unwrap())
    }

    #[tokio::test]
    async fn test_root_reports_running() {
        let response = build_router(state(None))
            .oneshot(Request::builder().uri("/").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn test_analyse_clean_document_without_keywords() {
        let (status, body) = post_json(
            state(None),
            "/ats/analyse",
            json!({"document": document(6, "Jane Doe\nRust engineer\n")}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        let result = &body["result"];
        assert_eq!(result["column"], true);
        assert_eq!(result["poor text alignment"], false);
        assert_eq!(result["score"]["structure score"], 100.0);
        assert_eq!(result["score"]["overall score"], 100.0);
        assert_eq!(result["key words matched"], json!([]));
        assert!(body.get("diagnostics").is_none());
        assert!(body.get("response").is_none());
    }

    #[tokio::test]
    async fn test_analyse_short_document_is_422() {
        let (status, body) = post_json(
            state(None),
            "/ats/analyse",
            json!({"document": document(3, "too short")}),
        )
        .await;

        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
        assert_eq!(body["error"]["code"], "UNPROCESSABLE_ENTITY");
        assert!(body.get("result").is_none());
    }

    #[tokio::test]
    async fn test_analyse_uses_extractor_for_jd() {
        let extracted = json!({"job_title": "Engineer", "technical_skills": ["rust", "terraform"]});
        let (status, body) = post_json(
            state(Some(extracted)),
            "/ats/analyse",
            json!({
                "document": document(6, "Built services in Rust"),
                "jd": "We need Rust and Terraform",
                "include_diagnostics": true
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["key words matched"], json!(["rust"]));
        assert_eq!(body["result"]["keyword missing"], json!(["terraform"]));
        assert_eq!(body["result"]["score"]["keyword score"], 50.0);
        assert_eq!(body["result"]["score"]["overall score"], 70.0);
        assert_eq!(body["diagnostics"]["histogram"].as_array().unwrap().len(), 50);
        assert_eq!(body["diagnostics"]["total_keywords"], 2);
    }

    #[tokio::test]
    async fn test_jd_without_extractable_skills_still_blends() {
        let extracted = json!({"job_title": "Engineer", "technical_skills": [], "tools": []});
        let (status, body) = post_json(
            state(Some(extracted)),
            "/ats/analyse",
            json!({"document": document(6, "Built services in Rust"), "jd": "Engineer wanted"}),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["score"]["structure score"], 100.0);
        assert_eq!(body["result"]["score"]["keyword score"], 0.0);
        assert_eq!(body["result"]["score"]["overall score"], 40.0);
    }

    #[tokio::test]
    async fn test_explicit_keywords_skip_extractor() {
        let (status, body) = post_json(
            state(None),
            "/ats/analyse",
            json!({
                "document": document(6, "Kafka streaming"),
                "jd": "ignored",
                "keywords": ["kafka"]
            }),
        )
        .await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["result"]["key words matched"], json!(["kafka"]));
    }

    #[tokio::test]
    async fn test_jd_without_llm_is_503() {
        let (status, body) = post_json(
            state(None),
            "/ats/analyse",
            json!({"document": document(6, ""), "jd": "Rust engineer"}),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["error"]["code"], "LLM_NOT_CONFIGURED");
    }

    #[tokio::test]
    async fn test_narrative_without_llm_is_503() {
        let (status, _) = post_json(
            state(None),
            "/ats/analyse",
            json!({"document": document(6, ""), "narrative": true}),
        )
        .await;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn test_parse_text_rejects_blank_jd() {
        let (status, _) =
            post_json(state(Some(json!({}))), "/jds/parse_text", json!({"jd": "   "})).await;
        assert_eq!(status, StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[tokio::test]
    async fn test_parse_text_returns_extractor_output() {
        let extracted = json!({"technical_skills": ["go"]});
        let (status, body) = post_json(
            state(Some(extracted.clone())),
            "/jds/parse_text",
            json!({"jd": "Go developer"}),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, extracted);
    }

    #[tokio::test]
    async fn test_extract_text_requires_pdf_field() {
        let boundary = "XBOUNDARY";
        let body = format!(
            "--{boundary}\r\nContent-Disposition: form-data; name=\"other\"\r\n\r\nhello\r\n--{boundary}--\r\n"
        );
        let response = build_router(state(None))
            .oneshot(
                Request::builder()
                    .method("POST")
                    .uri("/pdfs/extracttext")
                    .header(
                        "content-type",
                        format!("multipart/form-data; boundary={boundary}"),
                    )
                    .body(Body::from(body))
                    .unwrap(),
            )
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    }
}
