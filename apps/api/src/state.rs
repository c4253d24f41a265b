use std::sync::Arc;

use crate::llm_client::ResumeOptimizer;
use crate::render::ResumeRenderer;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Provider-facing optimizer. `LlmClient` in production, a stub in tests.
    pub optimizer: Arc<dyn ResumeOptimizer>,
    /// Font resolved once at startup from `RESUME_FONT`.
    pub renderer: Arc<ResumeRenderer>,
}
