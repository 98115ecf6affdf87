//! # pgs-explorer
//!
//! Session core of a chat-driven client for browsing, ranking, and training
//! polygenic/proteomic risk-score models. A browser front end talks to this
//! service; searches are forwarded to a remote model-search service.
//!
//! ## Search flow
//!
//! ```text
//!        ┌──────────────┐
//!        │  User Query  │
//!        └──────┬───────┘
//!               │ fresh request id (UUID v4)
//!      ┌────────┴─────────┐
//!      ▼                  ▼
//! ┌──────────┐     ┌──────────────┐
//! │ POST     │     │ GET progress │  every 500 ms, starting at once
//! │ /chat    │     │ (swallowed   │
//! │          │     │  on failure) │
//! └────┬─────┘     └──────┬───────┘
//!      │ settles          │ snapshots, id-checked
//!      │                  ▼
//!      │          ┌───────────────┐
//!      ├─ stop ──▶│  Reconciler   │  unknown never overrides known
//!      │ polling  └───────┬───────┘
//!      ▼                  │
//! ┌───────────────────┐   │
//! │ Terminal snapshot │◀──┘  count: reply results > last polled > 0
//! │ completed n/n     │
//! └────────┬──────────┘
//!          ▼
//!   Filter (ancestry, hard) ──▶ Rank (user first, AUC, R², name)
//! ```
//!
//! ## Module Overview
//!
//! - [`config`] - Environment-based configuration
//! - [`models`] - Shared data types: requests, progress snapshots, result records, replies
//! - [`search::ancestry`] - Ancestry code table and loose label matching
//! - [`search::filter`] - Hard ancestry filter
//! - [`search::rank`] - Multi-tier result ordering with ancestry-aware metrics
//! - [`search::progress`] - Progress reconciliation keyed by request id
//! - [`search::orchestrator`] - Search lifecycle: request, polling, terminal snapshot, events
//! - [`navigator`] - Two-stack back/forward view history
//! - [`service`] - HTTP client for the remote model-search service
//! - [`session`] - In-memory session: records, filter, navigator, transcript
//! - [`api`] - Axum HTTP handlers
//! - [`state`] - Shared application state

pub mod api;
pub mod config;
pub mod models;
pub mod navigator;
pub mod search;
pub mod service;
pub mod session;
pub mod state;
