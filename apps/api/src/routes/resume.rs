use axum::{
    extract::State,
    http::header,
    response::{IntoResponse, Response},
    Json,
};
use bytes::Bytes;
use serde::{Deserialize, Serialize};
use tracing::info;
use uuid::Uuid;

use crate::errors::AppError;
use crate::llm_client::Provider;
use crate::resume::summary::split_changes_summary;
use crate::resume::{parse_resume, strip_changes_summary, StructuredResume};
use crate::state::AppState;

const PDF_FILENAME: &str = "optimized_resume.pdf";

#[derive(Debug, Deserialize)]
pub struct OptimizeRequest {
    pub provider: Option<String>,
    #[serde(default)]
    pub api_key: String,
    #[serde(default)]
    pub resume: String,
    #[serde(default)]
    pub job_description: String,
}

#[derive(Debug, Serialize)]
pub struct OptimizeResponse {
    pub success: bool,
    pub optimized_resume: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub changes_summary: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct MarkdownRequest {
    #[serde(default)]
    pub markdown: String,
}

fn require(value: &str, message: &str) -> Result<(), AppError> {
    if value.trim().is_empty() {
        return Err(AppError::Validation(message.to_string()));
    }
    Ok(())
}

impl OptimizeRequest {
    /// Checks required fields, then resolves the provider (Claude when omitted).
    fn validate(&self) -> Result<Provider, AppError> {
        require(&self.api_key, "API key is required")?;
        require(&self.resume, "Resume text is required")?;
        require(&self.job_description, "Job description is required")?;

        match self.provider.as_deref() {
            None => Ok(Provider::default()),
            Some(name) => name
                .parse::<Provider>()
                .map_err(|e| AppError::Validation(e.to_string())),
        }
    }
}

/// POST /api/optimize
pub async fn handle_optimize(
    State(state): State<AppState>,
    Json(req): Json<OptimizeRequest>,
) -> Result<Json<OptimizeResponse>, AppError> {
    let provider = req.validate()?;
    let request_id = Uuid::new_v4();
    info!(
        %request_id,
        %provider,
        resume_bytes = req.resume.len(),
        job_description_bytes = req.job_description.len(),
        "Optimizing resume"
    );

    let output = state
        .optimizer
        .optimize(provider, &req.api_key, &req.resume, &req.job_description)
        .await
        .map_err(|e| AppError::optimization(provider, e))?;

    let (optimized_resume, changes_summary) = split_changes_summary(&output);
    info!(
        %request_id,
        output_bytes = output.len(),
        has_changes_summary = changes_summary.is_some(),
        "Resume optimized"
    );

    Ok(Json(OptimizeResponse {
        success: true,
        optimized_resume,
        changes_summary,
    }))
}

/// POST /api/parse
pub async fn handle_parse(
    Json(req): Json<MarkdownRequest>,
) -> Result<Json<StructuredResume>, AppError> {
    require(&req.markdown, "Markdown is required")?;
    let doc = parse_resume(&strip_changes_summary(&req.markdown));
    info!(
        sections = doc.sections.len(),
        has_name = doc.name.is_some(),
        "Parsed resume markdown"
    );
    Ok(Json(doc))
}

/// POST /api/render
pub async fn handle_render(
    State(state): State<AppState>,
    Json(req): Json<MarkdownRequest>,
) -> Result<Response, AppError> {
    require(&req.markdown, "Markdown is required")?;
    let request_id = Uuid::new_v4();
    info!(%request_id, markdown_bytes = req.markdown.len(), "Rendering resume PDF");

    let renderer = state.renderer.clone();
    let markdown = req.markdown;
    let pdf = tokio::task::spawn_blocking(move || renderer.render_markdown(&markdown))
        .await
        .map_err(|e| AppError::Render(e.to_string()))?;

    info!(%request_id, pdf_bytes = pdf.len(), "Resume PDF ready");

    Ok((
        [
            (header::CONTENT_TYPE, "application/pdf".to_string()),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{PDF_FILENAME}\""),
            ),
        ],
        Bytes::from(pdf),
    )
        .into_response())
}
