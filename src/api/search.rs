use std::convert::Infallible;

use axum::extract::State;
use axum::http::StatusCode;
use axum::response::sse::{Event, KeepAlive, Sse};
use axum::Json;
use futures_util::stream::{self, Stream};
use serde::Serialize;
use tokio::sync::broadcast::error::RecvError;

use crate::models::{ProgressSnapshot, SearchQuery};
use crate::search::progress::SearchStatus;
use crate::session::ResultsView;
use crate::state::AppState;

const MAX_QUERY_LEN: usize = 2000;

#[derive(Debug, Serialize)]
pub struct SearchResponse {
    pub request_id: uuid::Uuid,
    pub query: String,
    pub reply: String,
    pub progress: ProgressSnapshot,
    pub results: ResultsView,
}

/// POST /api/search - Run one search against the model service:
///   1. Record the user turn
///   2. Search while polling progress
///   3. Fold the outcome into the session
///   4. Return the filtered, ranked view
pub async fn search(
    State(state): State<AppState>,
    Json(req): Json<SearchQuery>,
) -> Result<Json<SearchResponse>, (StatusCode, String)> {
    let query = truncate_to_char_boundary(req.query.trim(), MAX_QUERY_LEN);
    if query.is_empty() {
        return Err((StatusCode::BAD_REQUEST, "Query is required".to_string()));
    }

    let _permit = state.search_semaphore.clone().try_acquire_owned().map_err(|_| {
        (
            StatusCode::CONFLICT,
            "A search is already in progress".to_string(),
        )
    })?;

    let history = {
        let mut session = state.session.write();
        let history = session.history(state.config.max_history_turns);
        session.record_user_message(&query);
        history
    };

    match state
        .orchestrator
        .run_search_with_history(&query, &history)
        .await
    {
        Ok(outcome) => {
            let results = {
                let mut session = state.session.write();
                session.apply_outcome(&outcome);
                session.results_view()
            };
            Ok(Json(SearchResponse {
                request_id: outcome.request.id,
                query: outcome.request.query,
                reply: outcome.reply.reply,
                progress: outcome.progress,
                results,
            }))
        }
        Err(e) => {
            let message = format!("{e:#}");
            state.session.write().apply_failure(&message);
            Err((StatusCode::BAD_GATEWAY, message))
        }
    }
}

/// GET /api/progress - Reconciled progress of the latest search
pub async fn progress(State(state): State<AppState>) -> Json<SearchStatus> {
    Json(state.orchestrator.status())
}

/// GET /api/events - Search events as SSE
pub async fn events(
    State(state): State<AppState>,
) -> Sse<impl Stream<Item = Result<Event, Infallible>>> {
    let rx = state.orchestrator.subscribe();

    let stream = stream::unfold(rx, |mut rx| async move {
        loop {
            match rx.recv().await {
                Ok(event) => {
                    let sse = Event::default()
                        .event("search")
                        .json_data(&event)
                        .unwrap_or_else(|_| Event::default().event("search"));
                    let event: Result<Event, Infallible> = Ok(sse);
                    return Some((event, rx));
                }
                Err(RecvError::Lagged(skipped)) => {
                    tracing::debug!("SSE subscriber lagged by {skipped} events");
                }
                Err(RecvError::Closed) => return None,
            }
        }
    });

    Sse::new(stream).keep_alive(KeepAlive::default())
}

fn truncate_to_char_boundary(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        return s.to_string();
    }
    let mut end = max_len;
    while !s.is_char_boundary(end) {
        end -= 1;
    }
    s[..end].to_string()
}
