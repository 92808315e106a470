use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::header,
    response::{IntoResponse, Json},
    routing::{get, post},
    Router,
};
use futures::FutureExt;
use serde::{Deserialize, Serialize};
use serde_json::{json, Value};
use slovo_parser::{render_document, InputError};
use slovo_protocol::SentenceRecord;
use tower_http::cors::CorsLayer;
use tracing::{error, warn};

use crate::error::ApiError;
use crate::pipeline::Pipeline;

/// Shared by every request handler.
#[derive(Clone)]
pub struct AppState {
    pub pipeline: Arc<Pipeline>,
}

impl AppState {
    pub fn new(pipeline: Pipeline) -> Self {
        Self {
            pipeline: Arc::new(pipeline),
        }
    }
}

#[derive(Debug, Deserialize)]
pub struct AnalyzeRequest {
    #[serde(default)]
    pub text: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AnalyzeResponse {
    pub results: Vec<SentenceRecord>,
}

#[derive(Debug, Deserialize)]
pub struct ExportRequest {
    pub results: Vec<SentenceRecord>,
    /// 1-based; the whole list when absent.
    #[serde(default)]
    pub sentence: Option<usize>,
}

pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(root))
        .route("/health", get(health))
        .route("/api/analyze", post(analyze))
        .route("/api/export", post(export))
        .layer(CorsLayer::permissive())
        .with_state(state)
}

async fn root() -> &'static str {
    "Russian Grammar Analyzer API is running"
}

async fn health(State(state): State<AppState>) -> Json<Value> {
    Json(json!({ "ok": true, "mode": state.pipeline.mode() }))
}

async fn analyze(
    State(state): State<AppState>,
    body: Result<Json<AnalyzeRequest>, JsonRejection>,
) -> Result<Json<AnalyzeResponse>, ApiError> {
    let text = match body {
        Ok(Json(req)) => req.text.unwrap_or_default(),
        Err(rejection) => {
            warn!(error = %rejection, "Rejected analyze request body");
            return Err(InputError::Missing.into());
        }
    };

    let results = AssertUnwindSafe(state.pipeline.analyze(&text))
        .catch_unwind()
        .await
        .map_err(|_| {
            error!("Analyze request panicked");
            ApiError::Internal
        })??;

    Ok(Json(AnalyzeResponse { results }))
}

async fn export(
    body: Result<Json<ExportRequest>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let req = match body {
        Ok(Json(req)) => req,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected export request body");
            return Err(ApiError::InvalidBody(rejection.body_text()));
        }
    };

    let records = match req.sentence {
        None => req.results,
        Some(n) => {
            let record = n
                .checked_sub(1)
                .and_then(|i| req.results.get(i))
                .cloned()
                .ok_or(ApiError::SentenceOutOfRange(n))?;
            vec![record]
        }
    };

    Ok((
        [(header::CONTENT_TYPE, "text/markdown; charset=utf-8")],
        render_document(&records),
    ))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::gemini::TextService;
    use crate::pipeline::testing::ScriptedService;
    use axum::{
        body::Body,
        http::{Request, StatusCode},
    };
    use http_body_util::BodyExt;
    use slovo_protocol::Lexicon;
    use tower::ServiceExt;

    fn offline_app() -> Router {
        router(AppState::new(Pipeline::new(None, Arc::new(Lexicon::builtin()), 4)))
    }

    async fn send(app: Router, request: Request<Body>) -> (StatusCode, String) {
        let response = app.oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = response.into_body().collect().await.unwrap().to_bytes();
        (status, String::from_utf8(bytes.to_vec()).unwrap())
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_root_and_health() {
        let get = |uri: &str| Request::get(uri).body(Body::empty()).unwrap();

        let (status, body) = send(offline_app(), get("/")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body, "Russian Grammar Analyzer API is running");

        let (status, body) = send(offline_app(), get("/health")).await;
        assert_eq!(status, StatusCode::OK);
        let value: Value = serde_json::from_str(&body).unwrap();
        assert_eq!(value, json!({"ok": true, "mode": "rule-based"}));
    }

    #[tokio::test]
    async fn test_analyze_rejects_bad_input() {
        let (status, body) = send(offline_app(), post_json("/api/analyze", json!({}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"error": "Text is required"})
        );

        let request = post_json("/api/analyze", json!({"text": "Hello world"}));
        let (status, body) = send(offline_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            serde_json::from_str::<Value>(&body).unwrap(),
            json!({"error": "Only Russian text can be analyzed"})
        );
    }

    #[tokio::test]
    async fn test_analyze_with_service() {
        let service: Arc<dyn TextService> = Arc::new(ScriptedService {
            translation: Some("我爱莫斯科。".to_string()),
            analysis: Some("- **谓语**: `люблю` \"爱\"".to_string()),
            ..Default::default()
        });
        let pipeline = Pipeline::new(Some(service), Arc::new(Lexicon::builtin()), 2);
        let app = router(AppState::new(pipeline));

        let request = post_json("/api/analyze", json!({"text": "Я люблю Москву!"}));
        let (status, body) = send(app, request).await;
        assert_eq!(status, StatusCode::OK);

        let response: AnalyzeResponse = serde_json::from_str(&body).unwrap();
        assert_eq!(response.results.len(), 1);
        assert_eq!(response.results[0].original, "Я люблю Москву");
        assert_eq!(response.results[0].translation, "我爱莫斯科。");
        assert_eq!(response.results[0].analysis.main_components[0].node.text, "люблю");
    }

    #[tokio::test]
    async fn test_export() {
        let results = vec![
            SentenceRecord::failed("Я читаю"),
            SentenceRecord::failed("Мы пишем"),
        ];

        let request = post_json("/api/export", json!({"results": results, "sentence": 2}));
        let (status, body) = send(offline_app(), request).await;
        assert_eq!(status, StatusCode::OK);
        assert!(body.contains("Мы пишем"));
        assert!(!body.contains("Я читаю"));

        let request = post_json("/api/export", json!({"results": results}));
        let (_, body) = send(offline_app(), request).await;
        assert!(body.contains("# 句子 2"));

        let request = post_json("/api/export", json!({"results": results, "sentence": 0}));
        let (status, body) = send(offline_app(), request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body.contains("Sentence 0 does not exist"));
    }

    #[tokio::test]
    async fn test_export_rejects_malformed_body() {
        let not_json = Request::builder()
            .method("POST")
            .uri("/api/export")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("not json"))
            .unwrap();
        let wrong_shape = post_json("/api/export", json!({"results": 5}));
        let no_content_type = Request::builder()
            .method("POST")
            .uri("/api/export")
            .body(Body::from("{}"))
            .unwrap();

        for request in [not_json, wrong_shape, no_content_type] {
            let (status, body) = send(offline_app(), request).await;
            assert_eq!(status, StatusCode::BAD_REQUEST);

            let value: Value = serde_json::from_str(&body).unwrap();
            let message = value["error"].as_str().unwrap();
            assert!(message.starts_with("Invalid export request"), "{message}");
        }
    }

    #[tokio::test]
    async fn test_export_content_type() {
        let request = post_json("/api/export", json!({"results": []}));
        let response = offline_app().oneshot(request).await.unwrap();
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "text/markdown; charset=utf-8"
        );
    }
}
