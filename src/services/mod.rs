//! Domain services used by the HTTP routes.
//!
//! ARCHITECTURE
//! ============
//! Service modules own business logic and persistence so route handlers can
//! stay focused on request parsing, auth plumbing and status mapping.
//! `auth`, `chat` and `session` work against Postgres; the rest operate on
//! the in-memory tables in `AppState` or on static data.

pub mod auth;
pub mod catalog;
pub mod chat;
pub mod content;
pub mod formatting;
pub mod hardware;
pub mod personalization;
pub mod progress;
pub mod rag;
pub mod session;
pub mod translation;
