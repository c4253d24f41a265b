pub mod health;
pub mod resume;

use axum::{
    routing::{get, post},
    Router,
};

use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/optimize", post(resume::handle_optimize))
        .route("/api/parse", post(resume::handle_parse))
        .route("/api/render", post(resume::handle_render))
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use std::sync::{Arc, Mutex};

    use async_trait::async_trait;
    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use super::*;
    use crate::llm_client::{LlmError, Provider, ResumeOptimizer};
    use crate::render::ResumeRenderer;

    const OPTIMIZED: &str = "# Jane Doe\njane@example.com | [GitHub](https://github.com/jane)\n\n\
        ## EXPERIENCE\n**Acme | Engineer | 2020**\n- Cut p99 latency by 40%\n\n\
        ## Changes Summary\n- Added Kubernetes keyword";

    /// Returns canned output and records which provider it was called with.
    #[derive(Default)]
    struct StubOptimizer {
        calls: Mutex<Vec<Provider>>,
    }

    #[async_trait]
    impl ResumeOptimizer for StubOptimizer {
        async fn optimize(
            &self,
            provider: Provider,
            _api_key: &str,
            _resume: &str,
            _job_description: &str,
        ) -> Result<String, LlmError> {
            self.calls.lock().unwrap().push(provider);
            Ok(OPTIMIZED.to_string())
        }
    }

    struct FailingOptimizer;

    #[async_trait]
    impl ResumeOptimizer for FailingOptimizer {
        async fn optimize(
            &self,
            _provider: Provider,
            _api_key: &str,
            _resume: &str,
            _job_description: &str,
        ) -> Result<String, LlmError> {
            Err(LlmError::Api {
                status: 401,
                message: "Incorrect API key provided".to_string(),
            })
        }
    }

    fn app_with(optimizer: Arc<dyn ResumeOptimizer>) -> Router {
        build_router(AppState {
            optimizer,
            renderer: Arc::new(ResumeRenderer::default()),
        })
    }

    fn post_json(uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn read_json(response: axum::response::Response) -> Value {
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    fn optimize_body() -> Value {
        json!({
            "api_key": "sk-test",
            "resume": "# Jane Doe\n## EXPERIENCE\n- Did things",
            "job_description": "Platform engineer, Kubernetes"
        })
    }

    #[tokio::test]
    async fn test_health() {
        let app = app_with(Arc::new(StubOptimizer::default()));
        let response = app
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["status"], "ok");
        assert_eq!(body["service"], "ats-optimizer");
    }

    #[tokio::test]
    async fn test_optimize_defaults_to_claude_and_splits_summary() {
        let stub = Arc::new(StubOptimizer::default());
        let app = app_with(stub.clone());

        let response = app.oneshot(post_json("/api/optimize", optimize_body())).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);

        let body = read_json(response).await;
        assert_eq!(body["success"], true);
        let resume = body["optimized_resume"].as_str().unwrap();
        assert!(resume.starts_with("# Jane Doe"));
        assert!(resume.ends_with("- Cut p99 latency by 40%"));
        assert_eq!(
            body["changes_summary"],
            "## Changes Summary\n- Added Kubernetes keyword"
        );
        assert_eq!(*stub.calls.lock().unwrap(), vec![Provider::Claude]);
    }

    #[tokio::test]
    async fn test_optimize_accepts_display_name() {
        let stub = Arc::new(StubOptimizer::default());
        let app = app_with(stub.clone());

        let mut body = optimize_body();
        body["provider"] = json!("Gemini (Google)");
        let response = app.oneshot(post_json("/api/optimize", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(*stub.calls.lock().unwrap(), vec![Provider::Gemini]);
    }

    #[tokio::test]
    async fn test_optimize_missing_api_key_never_calls_provider() {
        let stub = Arc::new(StubOptimizer::default());
        let app = app_with(stub.clone());

        let mut body = optimize_body();
        body["api_key"] = json!("");
        let response = app.oneshot(post_json("/api/optimize", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["success"], false);
        assert_eq!(body["error"]["code"], "VALIDATION_ERROR");
        assert_eq!(body["error"]["message"], "API key is required");
        assert!(stub.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_optimize_missing_job_description() {
        let app = app_with(Arc::new(StubOptimizer::default()));
        let body = json!({ "api_key": "sk-test", "resume": "# Jane" });
        let response = app.oneshot(post_json("/api/optimize", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["message"], "Job description is required");
    }

    #[tokio::test]
    async fn test_optimize_unknown_provider() {
        let stub = Arc::new(StubOptimizer::default());
        let app = app_with(stub.clone());

        let mut body = optimize_body();
        body["provider"] = json!("Mistral");
        let response = app.oneshot(post_json("/api/optimize", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["message"], "Unknown provider: Mistral");
        assert!(stub.calls.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_optimize_provider_failure_is_tagged() {
        let app = app_with(Arc::new(FailingOptimizer));

        let mut body = optimize_body();
        body["provider"] = json!("OpenAI");
        let response = app.oneshot(post_json("/api/optimize", body)).await.unwrap();

        assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
        let body = read_json(response).await;
        assert_eq!(body["error"]["code"], "OPTIMIZATION_FAILED");
        let message = body["error"]["message"].as_str().unwrap();
        assert!(message.starts_with("OpenAI API Error: "));
        assert!(message.contains("Incorrect API key provided"));
    }

    #[tokio::test]
    async fn test_parse_returns_structured_resume() {
        let app = app_with(Arc::new(StubOptimizer::default()));
        let response = app
            .oneshot(post_json("/api/parse", json!({ "markdown": OPTIMIZED })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json(response).await;
        assert_eq!(body["name"], "Jane Doe");
        assert_eq!(
            body["contact"],
            "jane@example.com | [GitHub](https://github.com/jane)"
        );
        let sections = body["sections"].as_array().unwrap();
        assert_eq!(sections.len(), 1);
        assert_eq!(sections[0]["heading"], "EXPERIENCE");
        assert_eq!(
            sections[0]["content"],
            json!(["**Acme | Engineer | 2020**", "- Cut p99 latency by 40%"])
        );
    }

    #[tokio::test]
    async fn test_render_returns_pdf_attachment() {
        let app = app_with(Arc::new(StubOptimizer::default()));
        let response = app
            .oneshot(post_json("/api/render", json!({ "markdown": OPTIMIZED })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_TYPE],
            "application/pdf"
        );
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"optimized_resume.pdf\""
        );
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        assert!(bytes.starts_with(b"%PDF-"));
    }

    #[tokio::test]
    async fn test_render_empty_markdown_is_rejected() {
        let app = app_with(Arc::new(StubOptimizer::default()));
        let response = app
            .oneshot(post_json("/api/render", json!({ "markdown": "  \n" })))
            .await
            .unwrap();

        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        let body = read_json(response).await;
        assert_eq!(body["error"]["message"], "Markdown is required");
    }
}
