//! Client side of DeadRepo Doctor: submit a repository URL, run the backend's
//! fetch and analyze phases in order, and turn the resulting report into
//! display values.
//!
//! - [`workflow`] — run lifecycle and URL validation.
//! - [`client`] — HTTP calls to the backend.
//! - [`toast`] — expiring notifications.
//! - [`storage`] — the remembered last URL.
//! - [`report`] — presentation model and terminal renderer.

pub mod cli;
pub mod client;
pub mod config;
pub mod error;
pub mod models;
pub mod report;
pub mod storage;
pub mod toast;
pub mod workflow;
