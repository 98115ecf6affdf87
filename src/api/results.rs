use axum::extract::State;
use axum::http::StatusCode;
use axum::Json;
use serde::Serialize;

use crate::models::{AncestryFilterUpdate, ChatMessage};
use crate::search::ancestry::{self, AncestryFilter, ANCESTRY_LABELS};
use crate::session::ResultsView;
use crate::state::AppState;

#[derive(Debug, Serialize)]
pub struct AncestryOption {
    pub code: &'static str,
    pub label: &'static str,
}

/// GET /api/results - Current records, filtered and ranked
pub async fn list_results(State(state): State<AppState>) -> Json<ResultsView> {
    Json(state.session.read().results_view())
}

/// PUT /api/ancestry-filter - Replace the active ancestry filter
pub async fn set_ancestry_filter(
    State(state): State<AppState>,
    Json(req): Json<AncestryFilterUpdate>,
) -> Result<Json<ResultsView>, (StatusCode, String)> {
    let unknown: Vec<&str> = req
        .codes
        .iter()
        .map(|c| c.trim())
        .filter(|c| !c.is_empty() && !ancestry::is_known_code(c))
        .collect();
    if !unknown.is_empty() {
        return Err((
            StatusCode::BAD_REQUEST,
            format!("Unknown ancestry codes: {}", unknown.join(", ")),
        ));
    }

    let mut session = state.session.write();
    session.ancestry_filter = AncestryFilter::new(&req.codes);
    Ok(Json(session.results_view()))
}

/// GET /api/ancestries - Supported ancestry codes
pub async fn list_ancestries() -> Json<Vec<AncestryOption>> {
    Json(
        ANCESTRY_LABELS
            .iter()
            .map(|&(code, label)| AncestryOption { code, label })
            .collect(),
    )
}

/// GET /api/transcript - Chat transcript of the active session
pub async fn transcript(State(state): State<AppState>) -> Json<Vec<ChatMessage>> {
    Json(state.session.read().transcript.clone())
}
