pub mod navigation;
pub mod results;
pub mod search;

use axum::routing::{get, post, put};
use axum::Router;

use crate::state::AppState;

/// All `/api` routes over the shared state.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/api/search", post(search::search))
        .route("/api/progress", get(search::progress))
        .route("/api/events", get(search::events))
        .route("/api/results", get(results::list_results))
        .route("/api/ancestry-filter", put(results::set_ancestry_filter))
        .route("/api/ancestries", get(results::list_ancestries))
        .route("/api/transcript", get(results::transcript))
        .route("/api/navigation", get(navigation::current))
        .route("/api/navigation/push", post(navigation::push))
        .route("/api/navigation/back", post(navigation::back))
        .route("/api/navigation/forward", post(navigation::forward))
        .with_state(state)
}
