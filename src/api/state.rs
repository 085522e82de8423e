// src/api/state.rs
use crate::analyzer::AnalysisSession;
use crate::api::handlers::ws::WsBroker;
use crate::config::AppConfig;
use crate::providers::openai::OpenAiProvider;
use reqwest::Client;
use std::sync::Arc;

#[derive(Clone)]
pub struct AppState {
    pub session: Arc<AnalysisSession<OpenAiProvider>>,
}

impl AppState {
    pub fn new(config: AppConfig, broker: WsBroker) -> Self {
        let provider = OpenAiProvider::new(Client::new(), config.openai);
        let session = Arc::new(AnalysisSession::new(provider, Arc::new(broker)));
        Self { session }
    }
}
