use std::sync::Arc;

use crate::llm_client::Completion;

/// Shared application state injected into all route handlers via Axum extractors.
#[derive(Clone)]
pub struct AppState {
    /// Completion backend behind the trait seam. Production wires `LlmClient`
    /// (Gemini); tests swap in a recording mock.
    pub llm: Arc<dyn Completion>,
}
