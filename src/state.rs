use parking_lot::RwLock;
use std::sync::Arc;

use crate::config::Config;
use crate::search::orchestrator::SearchOrchestrator;
use crate::service::ModelSearchService;
use crate::session::Session;

/// Shared application state.
#[derive(Clone)]
pub struct AppState {
    pub config: Config,
    pub orchestrator: Arc<SearchOrchestrator<ModelSearchService>>,
    pub session: Arc<RwLock<Session>>,
    /// One search in flight per session
    pub search_semaphore: Arc<tokio::sync::Semaphore>,
}

impl AppState {
    pub fn new(config: Config) -> anyhow::Result<Self> {
        let http_client = reqwest::Client::builder()
            .connect_timeout(std::time::Duration::from_secs(10))
            .build()?;
        let service = ModelSearchService::new(http_client, config.service.clone());
        let orchestrator = SearchOrchestrator::new(service, config.poll_interval());

        Ok(Self {
            config,
            orchestrator: Arc::new(orchestrator),
            session: Arc::new(RwLock::new(Session::new())),
            search_semaphore: Arc::new(tokio::sync::Semaphore::new(1)),
        })
    }
}
