// src/api/handlers/analysis.rs
use actix_web::{HttpResponse, Result, web};
use std::sync::Arc;

use crate::api::AppState;
use crate::models::StateSnapshot;
use crate::prompt::AnalysisRequest;

/// Dispatch a new analysis. Replies 202 with the pending snapshot, or 409
/// with the current snapshot when a request is already in flight (the
/// re-entrancy guard made visible to HTTP callers).
pub async fn analyze(
    state: web::Data<AppState>,
    req: web::Json<AnalysisRequest>,
) -> Result<HttpResponse> {
    match state.session.begin(req.into_inner()).await {
        Some(dispatch) => {
            log::info!("dispatching analysis {}", dispatch.id);
            let session = Arc::clone(&state.session);
            actix_web::rt::spawn(async move {
                session.run(dispatch).await;
            });
            let snapshot = StateSnapshot::from(state.session.view().await);
            Ok(HttpResponse::Accepted().json(snapshot))
        }
        None => {
            log::warn!("analysis request ignored: one is already in flight");
            let snapshot = StateSnapshot::from(state.session.view().await);
            Ok(HttpResponse::Conflict().json(snapshot))
        }
    }
}

/// Current session state, for pages that missed the WebSocket push.
pub async fn get_analysis(state: web::Data<AppState>) -> Result<HttpResponse> {
    let snapshot = StateSnapshot::from(state.session.view().await);
    Ok(HttpResponse::Ok().json(snapshot))
}

/// Abandon any in-flight analysis and return the session to idle.
pub async fn reset_analysis(state: web::Data<AppState>) -> Result<HttpResponse> {
    state.session.reset().await;
    let snapshot = StateSnapshot::from(state.session.view().await);
    Ok(HttpResponse::Ok().json(snapshot))
}
