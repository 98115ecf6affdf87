use axum::extract::State;
use axum::Json;
use serde::Deserialize;

use crate::navigator::{NavigationSnapshot, View};
use crate::state::AppState;

#[derive(Debug, Clone, Deserialize)]
pub struct PushRequest {
    pub view: View,
}

/// GET /api/navigation
pub async fn current(State(state): State<AppState>) -> Json<NavigationSnapshot> {
    Json(state.session.read().navigator.snapshot())
}

/// POST /api/navigation/push
pub async fn push(
    State(state): State<AppState>,
    Json(req): Json<PushRequest>,
) -> Json<NavigationSnapshot> {
    let mut session = state.session.write();
    session.navigator.push(req.view);
    Json(session.navigator.snapshot())
}

/// POST /api/navigation/back - No-op at the root
pub async fn back(State(state): State<AppState>) -> Json<NavigationSnapshot> {
    let mut session = state.session.write();
    session.navigator.back();
    Json(session.navigator.snapshot())
}

/// POST /api/navigation/forward - No-op without forward history
pub async fn forward(State(state): State<AppState>) -> Json<NavigationSnapshot> {
    let mut session = state.session.write();
    session.navigator.forward();
    Json(session.navigator.snapshot())
}
