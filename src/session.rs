use serde::Serialize;

use crate::models::{ChatMessage, DownstreamOption, ResultRecord, SearchPayload};
use crate::navigator::{View, ViewNavigator};
use crate::search::ancestry::AncestryFilter;
use crate::search::filter::filter;
use crate::search::orchestrator::SearchOutcome;
use crate::search::rank::rank;

/// State of the single active client session. Lives in memory only.
#[derive(Debug, Default)]
pub struct Session {
    pub records: Vec<ResultRecord>,
    pub options: Vec<DownstreamOption>,
    pub ancestry_filter: AncestryFilter,
    pub navigator: ViewNavigator,
    pub transcript: Vec<ChatMessage>,
}

/// What the result list screen renders.
#[derive(Debug, Clone, Serialize)]
pub struct ResultsView {
    pub ancestry_filter: AncestryFilter,
    pub total: usize,
    pub records: Vec<ResultRecord>,
    pub options: Vec<DownstreamOption>,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn record_user_message(&mut self, query: &str) {
        self.transcript.push(ChatMessage::user(query));
    }

    /// Fold a settled search into the session.
    ///
    /// A result set replaces the records wholesale and moves to the summary
    /// screen. A record update upserts one record by id.
    pub fn apply_outcome(&mut self, outcome: &SearchOutcome) {
        match &outcome.reply.payload {
            Some(SearchPayload::ResultSet { results }) => {
                self.records = results.clone();
                self.options.clear();
                self.navigator.push(View::SearchSummary);
            }
            Some(SearchPayload::RecordUpdate { record }) => {
                match self.records.iter_mut().find(|r| r.id == record.id) {
                    Some(existing) => *existing = record.clone(),
                    None => self.records.push(record.clone()),
                }
            }
            Some(SearchPayload::DownstreamOptions { options }) => {
                self.options = options.clone();
            }
            None => {}
        }

        if !outcome.reply.reply.is_empty() {
            self.transcript
                .push(ChatMessage::assistant(outcome.reply.reply.clone()));
        }
    }

    pub fn apply_failure(&mut self, message: &str) {
        self.transcript.push(ChatMessage::assistant(format!(
            "Sorry, the search failed: {message}"
        )));
    }

    /// Last `max_turns` user/assistant turns, oldest first.
    pub fn history(&self, max_turns: usize) -> Vec<ChatMessage> {
        let turns: Vec<&ChatMessage> = self
            .transcript
            .iter()
            .filter(|m| m.role == "user" || m.role == "assistant")
            .collect();
        let skip = turns.len().saturating_sub(max_turns);
        turns.into_iter().skip(skip).cloned().collect()
    }

    pub fn visible_records(&self) -> Vec<ResultRecord> {
        rank(
            &filter(&self.records, &self.ancestry_filter),
            &self.ancestry_filter,
        )
    }

    pub fn results_view(&self) -> ResultsView {
        let records = self.visible_records();
        ResultsView {
            ancestry_filter: self.ancestry_filter.clone(),
            total: self.records.len(),
            records,
            options: self.options.clone(),
        }
    }
}
