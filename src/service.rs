//! Client for the remote model-search/training service.

use anyhow::{Context, Result};
use reqwest::StatusCode;
use std::time::Duration;
use uuid::Uuid;

use crate::config::ServiceConfig;
use crate::models::{ChatMessage, ProgressSnapshot, SearchReply, SearchRequest, ServiceSearchBody};
use crate::search::orchestrator::SearchBackend;

#[derive(Clone)]
pub struct ModelSearchService {
    client: reqwest::Client,
    config: ServiceConfig,
}

impl ModelSearchService {
    pub fn new(client: reqwest::Client, config: ServiceConfig) -> Self {
        Self { client, config }
    }

    fn url(&self, path: &str) -> String {
        format!("{}/{}", self.config.base_url.trim_end_matches('/'), path)
    }
}

impl SearchBackend for ModelSearchService {
    async fn search(&self, request: &SearchRequest, history: &[ChatMessage]) -> Result<SearchReply> {
        let url = self.url("chat");
        let body = ServiceSearchBody {
            message: request.query.clone(),
            request_id: request.id,
            history: history.to_vec(),
        };

        let resp = self
            .client
            .post(&url)
            .timeout(Duration::from_secs(self.config.request_timeout_secs))
            .json(&body)
            .send()
            .await
            .context("Failed to reach model search service")?;

        if !resp.status().is_success() {
            let status = resp.status();
            let body = resp.text().await.unwrap_or_default();
            anyhow::bail!("Model search service returned {status}: {body}");
        }

        resp.json::<SearchReply>()
            .await
            .context("Malformed search reply")
    }

    async fn progress(&self, request_id: Uuid) -> Result<ProgressSnapshot> {
        let url = self.url(&format!("search_progress/{request_id}"));

        let resp = self
            .client
            .get(&url)
            .timeout(Duration::from_secs(self.config.poll_timeout_secs))
            .send()
            .await
            .context("Failed to poll search progress")?;

        // Not tracked (too early, expired, or never tracked) is not an error.
        if resp.status() == StatusCode::NOT_FOUND {
            return Ok(ProgressSnapshot::unknown());
        }
        if !resp.status().is_success() {
            anyhow::bail!("Progress endpoint returned {}", resp.status());
        }

        resp.json::<ProgressSnapshot>()
            .await
            .context("Malformed progress snapshot")
    }
}
