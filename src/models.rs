use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One user-visible search invocation
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SearchRequest {
    pub id: Uuid,
    pub query: String,
    pub issued_at: DateTime<Utc>,
}

impl SearchRequest {
    pub fn new(query: impl Into<String>) -> Self {
        Self {
            id: Uuid::new_v4(),
            query: query.into(),
            issued_at: Utc::now(),
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum ProgressStatus {
    Starting,
    InProgress,
    Completed,
    #[default]
    #[serde(other)]
    Unknown,
}

/// Point-in-time progress of an in-flight search, as reported by the
/// progress endpoint or synthesized on completion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct ProgressSnapshot {
    #[serde(default)]
    pub status: ProgressStatus,
    #[serde(default)]
    pub total: u32,
    #[serde(default)]
    pub fetched: u32,
    #[serde(default)]
    pub current_action: String,
}

impl ProgressSnapshot {
    pub fn unknown() -> Self {
        Self::default()
    }

    pub fn starting() -> Self {
        Self {
            status: ProgressStatus::Starting,
            total: 0,
            fetched: 0,
            current_action: "Starting search".to_string(),
        }
    }

    pub fn completed(count: u32) -> Self {
        Self {
            status: ProgressStatus::Completed,
            total: count,
            fetched: count,
            current_action: "Search complete".to_string(),
        }
    }

    pub fn is_unknown(&self) -> bool {
        self.status == ProgressStatus::Unknown
    }
}

/// Provenance of a result record
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    #[default]
    Catalog,
    UserTrained,
    UserUploaded,
    InProgress,
}

impl SourceKind {
    /// User-authored and in-progress records bypass the ancestry filter and
    /// rank ahead of catalog entries.
    pub fn is_user_authored(self) -> bool {
        !matches!(self, SourceKind::Catalog)
    }
}

/// Metrics of a model evaluated on one ancestry cohort
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct AncestryEvaluation {
    pub ancestry: String,
    #[serde(default)]
    pub auc: Option<f64>,
    #[serde(default)]
    pub r2: Option<f64>,
}

/// A candidate model/score returned by a search
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct ResultRecord {
    pub id: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub source: SourceKind,
    /// Training ancestry as free text from the upstream catalog
    #[serde(default)]
    pub ancestry: Option<String>,
    #[serde(default)]
    pub auc: Option<f64>,
    #[serde(default)]
    pub r2: Option<f64>,
    #[serde(default)]
    pub evaluations: Vec<AncestryEvaluation>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub trait_reported: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub num_variants: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub publication: Option<String>,
}

/// A follow-up action the service offers instead of a result set
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct DownstreamOption {
    pub id: String,
    pub label: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// Structured part of a search reply
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum SearchPayload {
    ResultSet { results: Vec<ResultRecord> },
    DownstreamOptions { options: Vec<DownstreamOption> },
    RecordUpdate { record: ResultRecord },
}

impl SearchPayload {
    /// Number of results the payload itself enumerates, if it enumerates any.
    pub fn enumerated_count(&self) -> Option<usize> {
        match self {
            SearchPayload::ResultSet { results } => Some(results.len()),
            _ => None,
        }
    }
}

/// Body returned by the remote search endpoint
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
pub struct SearchReply {
    #[serde(default)]
    pub reply: String,
    #[serde(default)]
    pub payload: Option<SearchPayload>,
}

/// A single chat turn (user or assistant)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ChatMessage {
    pub role: String,
    pub content: String,
}

impl ChatMessage {
    pub fn user(content: impl Into<String>) -> Self {
        Self {
            role: "user".to_string(),
            content: content.into(),
        }
    }

    pub fn assistant(content: impl Into<String>) -> Self {
        Self {
            role: "assistant".to_string(),
            content: content.into(),
        }
    }
}

/// Body sent to the remote search endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServiceSearchBody {
    pub message: String,
    pub request_id: Uuid,
    #[serde(default)]
    pub history: Vec<ChatMessage>,
}

/// Search request accepted by the local API
#[derive(Debug, Clone, Deserialize)]
pub struct SearchQuery {
    pub query: String,
}

/// Ancestry filter update request
#[derive(Debug, Clone, Deserialize)]
pub struct AncestryFilterUpdate {
    pub codes: Vec<String>,
}
