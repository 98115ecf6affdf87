use serde::Serialize;
use uuid::Uuid;

use crate::models::{ProgressSnapshot, ProgressStatus};

/// Reconciled progress the UI reads.
#[derive(Debug, Clone, Serialize, PartialEq, Default)]
#[serde(tag = "state", rename_all = "snake_case")]
pub enum SearchStatus {
    #[default]
    Idle,
    Running { request_id: Uuid, progress: ProgressSnapshot },
    Completed { request_id: Uuid, progress: ProgressSnapshot },
    Failed { request_id: Uuid, message: String },
}

/// Single displayed-progress cell shared by poll callbacks and the terminal
/// step of one orchestrator.
///
/// Every write carries the request id it belongs to and is dropped unless
/// that id is the active one. Once a request is pinned (completed or
/// failed) no further polled snapshot is accepted for it.
#[derive(Debug, Default)]
pub struct ProgressReconciler {
    active: Option<Uuid>,
    pinned: bool,
    status: SearchStatus,
    last_polled_total: Option<u32>,
}

impl ProgressReconciler {
    pub fn new() -> Self {
        Self::default()
    }

    /// Make `request_id` the active request, superseding any previous one.
    pub fn begin(&mut self, request_id: Uuid) {
        self.active = Some(request_id);
        self.pinned = false;
        self.last_polled_total = None;
        self.status = SearchStatus::Running {
            request_id,
            progress: ProgressSnapshot::starting(),
        };
    }

    pub fn is_active(&self, request_id: Uuid) -> bool {
        self.active == Some(request_id)
    }

    /// Apply a polled snapshot. Returns whether it became the displayed one.
    pub fn observe(&mut self, request_id: Uuid, snapshot: ProgressSnapshot) -> bool {
        if !self.is_active(request_id) || self.pinned {
            return false;
        }

        if snapshot.is_unknown() {
            // A hiccup, not a regression: only shown while nothing is known.
            if let SearchStatus::Running { progress, .. } = &self.status {
                if !progress.is_unknown() && progress.status != ProgressStatus::Starting {
                    return false;
                }
            }
        } else {
            self.last_polled_total = Some(snapshot.total);
        }

        self.status = SearchStatus::Running {
            request_id,
            progress: snapshot,
        };
        true
    }

    /// Total from the last accepted, known polled snapshot.
    pub fn last_polled_total(&self) -> Option<u32> {
        self.last_polled_total
    }

    /// Pin the terminal snapshot for `request_id`. The response-derived
    /// count always wins over anything polled.
    pub fn complete(&mut self, request_id: Uuid, count: u32) -> Option<ProgressSnapshot> {
        if !self.is_active(request_id) {
            return None;
        }
        let terminal = ProgressSnapshot::completed(count);
        self.pinned = true;
        self.status = SearchStatus::Completed {
            request_id,
            progress: terminal.clone(),
        };
        Some(terminal)
    }

    /// Replace in-flight progress with a terminal failure.
    pub fn fail(&mut self, request_id: Uuid, message: impl Into<String>) -> bool {
        if !self.is_active(request_id) {
            return false;
        }
        self.pinned = true;
        self.status = SearchStatus::Failed {
            request_id,
            message: message.into(),
        };
        true
    }

    pub fn status(&self) -> SearchStatus {
        self.status.clone()
    }

    /// The snapshot currently displayed, if a search has started.
    pub fn current(&self) -> Option<&ProgressSnapshot> {
        match &self.status {
            SearchStatus::Running { progress, .. } | SearchStatus::Completed { progress, .. } => {
                Some(progress)
            }
            _ => None,
        }
    }
}
