// src/analyzer.rs
use std::sync::Arc;
use std::time::Duration;

use serde::Serialize;
use tokio::sync::Mutex;
use uuid::Uuid;

use crate::errors::AnalysisError;
use crate::prompt::{AnalysisRequest, SYSTEM_INSTRUCTION};
use crate::providers::CompletionProvider;
use crate::reply;
use crate::schema::AnalysisResult;

/// How long the celebration stays lit after a successful analysis.
const CELEBRATION_DURATION: Duration = Duration::from_secs(6);

/// The lifecycle of one analysis session. `Pending` is entered exactly when
/// a dispatch is accepted and resolves exactly once per dispatch.
#[derive(Debug, Clone)]
pub enum RequestState {
    Idle,
    Pending,
    Succeeded(AnalysisResult),
    Failed(ErrorInfo),
}

impl RequestState {
    pub fn status(&self) -> &'static str {
        match self {
            RequestState::Idle => "idle",
            RequestState::Pending => "pending",
            RequestState::Succeeded(_) => "succeeded",
            RequestState::Failed(_) => "failed",
        }
    }
}

/// A failure absorbed into the session state. `raw_reply` keeps the model's
/// text around when it could not be parsed; it is diagnostic material and
/// must never be presented as a result.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorInfo {
    pub kind: &'static str,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub raw_reply: Option<String>,
}

impl ErrorInfo {
    fn new(err: &AnalysisError, raw_reply: Option<String>) -> Self {
        Self {
            kind: err.kind(),
            message: err.to_string(),
            raw_reply,
        }
    }
}

/// An accepted dispatch: the request plus the sequence number that ties its
/// completion back to this session epoch.
#[derive(Debug)]
pub struct Dispatch {
    pub id: String,
    seq: u64,
    request: AnalysisRequest,
}

/// A point-in-time copy of the session, handed to observers and snapshot
/// endpoints.
#[derive(Debug, Clone)]
pub struct SessionView {
    pub id: Option<String>,
    pub state: RequestState,
    pub celebrating: bool,
    pub updated_at: String,
}

/// Receives every session change, including celebration on/off flips.
#[async_trait::async_trait]
pub trait StateObserver: Send + Sync {
    async fn state_changed(&self, view: SessionView);
}

struct Inner {
    state: RequestState,
    id: Option<String>,
    seq: u64,
    celebrating: bool,
    celebration_round: u64,
    updated_at: String,
}

fn view_of(inner: &Inner) -> SessionView {
    SessionView {
        id: inner.id.clone(),
        state: inner.state.clone(),
        celebrating: inner.celebrating,
        updated_at: inner.updated_at.clone(),
    }
}

fn now() -> String {
    chrono::Utc::now().to_rfc3339()
}

/// Owns the single `RequestState` of a user session and drives the
/// analysis lifecycle against a completion provider.
///
/// At most one dispatch is in flight: `begin` refuses while `Pending`, and
/// completions carry a sequence number so anything resolving after a
/// `reset` (or after a newer dispatch) is discarded instead of clobbering
/// newer state.
pub struct AnalysisSession<P> {
    provider: P,
    observer: Arc<dyn StateObserver>,
    inner: Arc<Mutex<Inner>>,
    celebration_duration: Duration,
}

impl<P: CompletionProvider> AnalysisSession<P> {
    pub fn new(provider: P, observer: Arc<dyn StateObserver>) -> Self {
        Self {
            provider,
            observer,
            inner: Arc::new(Mutex::new(Inner {
                state: RequestState::Idle,
                id: None,
                seq: 0,
                celebrating: false,
                celebration_round: 0,
                updated_at: now(),
            })),
            celebration_duration: CELEBRATION_DURATION,
        }
    }

    pub fn with_celebration_duration(mut self, duration: Duration) -> Self {
        self.celebration_duration = duration;
        self
    }

    /// Accept a new dispatch, or return `None` while one is already in
    /// flight. Re-entrant calls are ignored, never interleaved.
    pub async fn begin(&self, request: AnalysisRequest) -> Option<Dispatch> {
        let (view, dispatch) = {
            let mut inner = self.inner.lock().await;
            if matches!(inner.state, RequestState::Pending) {
                return None;
            }
            inner.seq += 1;
            let id = Uuid::new_v4().to_string();
            inner.id = Some(id.clone());
            inner.state = RequestState::Pending;
            inner.updated_at = now();
            let dispatch = Dispatch {
                id,
                seq: inner.seq,
                request,
            };
            (view_of(&inner), dispatch)
        };
        self.observer.state_changed(view).await;
        Some(dispatch)
    }

    /// Perform the dispatched call and resolve the session exactly once.
    pub async fn run(&self, dispatch: Dispatch) {
        let user_prompt = dispatch.request.user_prompt();
        match self.provider.complete(SYSTEM_INSTRUCTION, &user_prompt).await {
            Ok((raw, latency_ms)) => {
                log::info!("analysis {} got a reply in {}ms", dispatch.id, latency_ms);
                match reply::parse_reply(&raw) {
                    Ok(result) => {
                        self.resolve(&dispatch, RequestState::Succeeded(result), true)
                            .await;
                    }
                    Err(err) => {
                        log::warn!("analysis {} reply rejected: {}", dispatch.id, err);
                        log::debug!("analysis {} raw reply: {}", dispatch.id, raw);
                        self.resolve(
                            &dispatch,
                            RequestState::Failed(ErrorInfo::new(&err, Some(raw))),
                            false,
                        )
                        .await;
                    }
                }
            }
            Err(err) => {
                log::warn!("analysis {} transport failure: {}", dispatch.id, err);
                self.resolve(&dispatch, RequestState::Failed(ErrorInfo::new(&err, None)), false)
                    .await;
            }
        }
    }

    /// Abandon any in-flight dispatch and return to `Idle`. The abandoned
    /// completion, if it ever arrives, no longer matches the sequence number
    /// and is discarded.
    pub async fn reset(&self) {
        let view = {
            let mut inner = self.inner.lock().await;
            inner.seq += 1;
            inner.id = None;
            inner.state = RequestState::Idle;
            inner.updated_at = now();
            view_of(&inner)
        };
        self.observer.state_changed(view).await;
    }

    pub async fn view(&self) -> SessionView {
        let inner = self.inner.lock().await;
        view_of(&inner)
    }

    async fn resolve(&self, dispatch: &Dispatch, outcome: RequestState, celebrate: bool) {
        let view = {
            let mut inner = self.inner.lock().await;
            if inner.seq != dispatch.seq {
                log::info!("discarding stale completion for analysis {}", dispatch.id);
                return;
            }
            inner.state = outcome;
            inner.updated_at = now();
            if celebrate {
                inner.celebrating = true;
                inner.celebration_round += 1;
                self.spawn_celebration_timer(inner.celebration_round);
            }
            view_of(&inner)
        };
        self.observer.state_changed(view).await;
    }

    /// The celebration auto-extinguishes after a fixed duration measured
    /// from trigger time. A re-trigger bumps the round, so an older timer
    /// waking up finds its round stale and leaves the light alone: timers
    /// restart, they never stack.
    fn spawn_celebration_timer(&self, round: u64) {
        let inner = Arc::clone(&self.inner);
        let observer = Arc::clone(&self.observer);
        let duration = self.celebration_duration;
        tokio::spawn(async move {
            tokio::time::sleep(duration).await;
            let view = {
                let mut inner = inner.lock().await;
                if inner.celebration_round != round || !inner.celebrating {
                    return;
                }
                inner.celebrating = false;
                view_of(&inner)
            };
            observer.state_changed(view).await;
        });
    }
}
