use std::sync::Arc;

use tokio::sync::RwLock;

use crate::{
    config::Config,
    diagnostics::DiagnosticSink,
    services::{
        assistant_service::Assistant, ingestion_service::FileIngestor,
        model_service::OllamaClient,
    },
};

/// One assistant instance serves one logical user; every request serializes
/// on the session lock.
#[derive(Clone)]
pub struct AppState {
    pub assistant: Arc<RwLock<Assistant>>,
    pub diagnostics: DiagnosticSink,
    pub config: Arc<Config>,
}

impl AppState {
    pub fn new(config: Config) -> Self {
        let diagnostics = DiagnosticSink::new();
        let ingestor = Arc::new(FileIngestor::new(diagnostics.clone()));
        let inference = Arc::new(OllamaClient::new(config.ollama_base_url.clone()));
        let assistant = Assistant::new(
            config.model.clone(),
            ingestor,
            inference,
            diagnostics.clone(),
        );

        Self {
            assistant: Arc::new(RwLock::new(assistant)),
            diagnostics,
            config: Arc::new(config),
        }
    }
}
