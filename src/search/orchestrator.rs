use std::convert::Infallible;
use std::future::Future;
use std::time::Duration;

use anyhow::Result;
use parking_lot::Mutex;
use serde::Serialize;
use tokio::sync::broadcast;
use tokio::time::MissedTickBehavior;
use uuid::Uuid;

use crate::models::{ChatMessage, ProgressSnapshot, SearchReply, SearchRequest};
use crate::search::progress::{ProgressReconciler, SearchStatus};

const EVENT_CAPACITY: usize = 64;

/// Remote collaborator a search runs against.
pub trait SearchBackend: Send + Sync {
    /// Issue the primary search. Settles once with the service's reply.
    fn search(
        &self,
        request: &SearchRequest,
        history: &[ChatMessage],
    ) -> impl Future<Output = Result<SearchReply>> + Send;

    /// Idempotent read of the progress recorded for `request_id`. Returns
    /// an `unknown` snapshot when the service does not track the id.
    fn progress(&self, request_id: Uuid) -> impl Future<Output = Result<ProgressSnapshot>> + Send;
}

/// Notification delivered to subscribers while a search runs.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "event", rename_all = "snake_case")]
pub enum SearchEvent {
    Started { request_id: Uuid, query: String },
    Progress { request_id: Uuid, progress: ProgressSnapshot },
    Completed { request_id: Uuid, progress: ProgressSnapshot },
    Failed { request_id: Uuid, message: String },
}

/// Result of one settled search.
#[derive(Debug, Clone)]
pub struct SearchOutcome {
    pub request: SearchRequest,
    pub reply: SearchReply,
    /// Count shown as the final total
    pub count: u32,
    /// Synthetic terminal snapshot, `completed` with fetched == total == count
    pub progress: ProgressSnapshot,
}

/// Owns the lifecycle of searches against one backend: issue the request,
/// poll progress alongside it, reconcile, and notify subscribers.
///
/// Each instance owns its own displayed-progress cell and active request
/// id, so separate search surfaces use separate orchestrators.
pub struct SearchOrchestrator<B> {
    backend: B,
    poll_interval: Duration,
    progress: Mutex<ProgressReconciler>,
    events: broadcast::Sender<SearchEvent>,
}

impl<B: SearchBackend> SearchOrchestrator<B> {
    pub fn new(backend: B, poll_interval: Duration) -> Self {
        let (events, _) = broadcast::channel(EVENT_CAPACITY);
        Self {
            backend,
            poll_interval,
            progress: Mutex::new(ProgressReconciler::new()),
            events,
        }
    }

    pub fn backend(&self) -> &B {
        &self.backend
    }

    pub fn subscribe(&self) -> broadcast::Receiver<SearchEvent> {
        self.events.subscribe()
    }

    pub fn status(&self) -> SearchStatus {
        self.progress.lock().status()
    }

    pub async fn run_search(&self, query: &str) -> Result<SearchOutcome> {
        self.run_search_with_history(query, &[]).await
    }

    /// Run one search to completion.
    ///
    /// The primary request and the progress poller run concurrently in this
    /// task. Polling is torn down as soon as the primary settles, before the
    /// terminal snapshot is applied, so a poll response still in flight can
    /// never land after it. Callers must not submit again for the same
    /// surface while a search is in flight.
    pub async fn run_search_with_history(
        &self,
        query: &str,
        history: &[ChatMessage],
    ) -> Result<SearchOutcome> {
        let query = query.trim();
        if query.is_empty() {
            anyhow::bail!("Query is required");
        }

        let request = SearchRequest::new(query);
        let request_id = request.id;
        self.progress.lock().begin(request_id);
        self.emit(SearchEvent::Started {
            request_id,
            query: request.query.clone(),
        });
        tracing::info!(%request_id, "Search started: {query}");

        let result = {
            let poll = self.poll_progress(request_id);
            tokio::pin!(poll);
            tokio::select! {
                biased;
                result = self.backend.search(&request, history) => result,
                never = &mut poll => match never {},
            }
        };

        match result {
            Ok(reply) => {
                let count = self.resolve_count(request_id, &reply);
                let progress = match self.progress.lock().complete(request_id, count) {
                    Some(terminal) => terminal,
                    None => {
                        tracing::debug!(%request_id, "Search superseded before completion");
                        ProgressSnapshot::completed(count)
                    }
                };
                self.emit(SearchEvent::Completed {
                    request_id,
                    progress: progress.clone(),
                });
                tracing::info!(%request_id, "Search completed with {count} results");
                Ok(SearchOutcome {
                    request,
                    reply,
                    count,
                    progress,
                })
            }
            Err(e) => {
                let message = format!("{e:#}");
                tracing::warn!(%request_id, "Search failed: {message}");
                self.progress.lock().fail(request_id, message.clone());
                self.emit(SearchEvent::Failed {
                    request_id,
                    message,
                });
                Err(e.context("Search failed"))
            }
        }
    }

    /// Final count precedence: results enumerated by the reply, then the
    /// last polled total for this request, then 0.
    fn resolve_count(&self, request_id: Uuid, reply: &SearchReply) -> u32 {
        if let Some(n) = reply.payload.as_ref().and_then(|p| p.enumerated_count()) {
            return u32::try_from(n).unwrap_or(u32::MAX);
        }
        let progress = self.progress.lock();
        if progress.is_active(request_id) {
            progress.last_polled_total().unwrap_or(0)
        } else {
            0
        }
    }

    /// Poll on a fixed cadence until dropped. The first tick fires
    /// immediately. Failures degrade to an `unknown` snapshot.
    async fn poll_progress(&self, request_id: Uuid) -> Infallible {
        let mut ticker = tokio::time::interval(self.poll_interval);
        ticker.set_missed_tick_behavior(MissedTickBehavior::Delay);

        loop {
            ticker.tick().await;
            let snapshot = match self.backend.progress(request_id).await {
                Ok(snapshot) => snapshot,
                Err(e) => {
                    tracing::debug!(%request_id, "Progress poll failed: {e:#}");
                    ProgressSnapshot::unknown()
                }
            };

            let accepted = self.progress.lock().observe(request_id, snapshot.clone());
            if accepted {
                self.emit(SearchEvent::Progress {
                    request_id,
                    progress: snapshot,
                });
            }
        }
    }

    fn emit(&self, event: SearchEvent) {
        // No subscribers is fine.
        let _ = self.events.send(event);
    }
}
