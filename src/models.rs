// src/models.rs
use serde::Serialize;

use crate::analyzer::{ErrorInfo, RequestState, SessionView};
use crate::schema::AnalysisResult;

/// The wire form of a session state, shared by the snapshot endpoint and
/// the WebSocket push.
#[derive(Serialize, Clone)]
pub struct StateSnapshot {
    pub status: &'static str,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub result: Option<AnalysisResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<ErrorInfo>,
    pub celebrating: bool,
    pub updated_at: String,
}

impl From<SessionView> for StateSnapshot {
    fn from(view: SessionView) -> Self {
        let status = view.state.status();
        let (result, error) = match view.state {
            RequestState::Succeeded(result) => (Some(result), None),
            RequestState::Failed(error) => (None, Some(error)),
            RequestState::Idle | RequestState::Pending => (None, None),
        };
        Self {
            status,
            id: view.id,
            result,
            error,
            celebrating: view.celebrating,
            updated_at: view.updated_at,
        }
    }
}
