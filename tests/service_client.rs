//! The HTTP client against a throwaway model service bound to a local port.

use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use parking_lot::Mutex;
use uuid::Uuid;

use pgs_explorer::config::ServiceConfig;
use pgs_explorer::models::{
    ProgressSnapshot, ProgressStatus, ResultRecord, SearchPayload, SearchReply, SearchRequest,
    ServiceSearchBody,
};
use pgs_explorer::search::orchestrator::{SearchBackend, SearchOrchestrator};
use pgs_explorer::service::ModelSearchService;

#[derive(Clone, Default)]
struct FakeService {
    /// Poll count per request id seen by /chat
    polls: Arc<Mutex<HashMap<Uuid, u32>>>,
    fail_search: bool,
}

async fn chat(
    State(fake): State<FakeService>,
    Json(body): Json<ServiceSearchBody>,
) -> Result<Json<SearchReply>, (StatusCode, String)> {
    if fake.fail_search {
        return Err((StatusCode::INTERNAL_SERVER_ERROR, "model index offline".to_string()));
    }
    fake.polls.lock().entry(body.request_id).or_insert(0);
    tokio::time::sleep(Duration::from_millis(350)).await;

    let results = (0..3)
        .map(|i| ResultRecord {
            id: format!("PGS00000{i}"),
            name: format!("{} model {i}", body.message),
            ..ResultRecord::default()
        })
        .collect();
    Ok(Json(SearchReply {
        reply: format!("Found 3 models for {}", body.message),
        payload: Some(SearchPayload::ResultSet { results }),
    }))
}

async fn search_progress(
    State(fake): State<FakeService>,
    Path(id): Path<Uuid>,
) -> Result<Json<ProgressSnapshot>, StatusCode> {
    let mut polls = fake.polls.lock();
    let count = polls.get_mut(&id).ok_or(StatusCode::NOT_FOUND)?;
    *count += 1;
    Ok(Json(ProgressSnapshot {
        status: ProgressStatus::InProgress,
        total: 10,
        fetched: (*count).min(10),
        current_action: "Ranking models".to_string(),
    }))
}

async fn spawn_fake(fake: FakeService) -> ModelSearchService {
    let app = Router::new()
        .route("/chat", post(chat))
        .route("/search_progress/{id}", get(search_progress))
        .with_state(fake);
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    ModelSearchService::new(
        reqwest::Client::new(),
        ServiceConfig {
            base_url: format!("http://{addr}"),
            request_timeout_secs: 10,
            poll_timeout_secs: 2,
        },
    )
}

#[tokio::test]
async fn test_untracked_request_reads_as_unknown() {
    let service = spawn_fake(FakeService::default()).await;
    let snapshot = service.progress(Uuid::new_v4()).await.unwrap();
    assert_eq!(snapshot.status, ProgressStatus::Unknown);
}

#[tokio::test]
async fn test_search_reply_is_decoded() {
    let service = spawn_fake(FakeService::default()).await;
    let reply = service
        .search(&SearchRequest::new("asthma"), &[])
        .await
        .unwrap();
    assert_eq!(reply.reply, "Found 3 models for asthma");
    assert_eq!(reply.payload.unwrap().enumerated_count(), Some(3));
}

#[tokio::test]
async fn test_search_error_carries_status_and_body() {
    let service = spawn_fake(FakeService {
        fail_search: true,
        ..FakeService::default()
    })
    .await;
    let err = service
        .search(&SearchRequest::new("asthma"), &[])
        .await
        .unwrap_err();
    let message = format!("{err:#}");
    assert!(message.contains("500"));
    assert!(message.contains("model index offline"));
}

#[tokio::test]
async fn test_orchestrator_polls_live_service() {
    let fake = FakeService::default();
    let polls = fake.polls.clone();
    let service = spawn_fake(fake).await;
    let orch = SearchOrchestrator::new(service, Duration::from_millis(100));

    let outcome = orch.run_search("type 1 diabetes").await.unwrap();
    assert_eq!(outcome.count, 3);
    assert_eq!(outcome.progress, ProgressSnapshot::completed(3));

    let seen = polls.lock().get(&outcome.request.id).copied().unwrap_or(0);
    assert!(seen >= 1, "expected the progress endpoint to be polled, saw {seen}");
}
