//! Personal article archive — categorized notes, memo threads, and AI
//! summarization.
//!
//! packrat keeps a collection of **articles** (title, source, category,
//! keywords, body, optional file attachments), each carrying a thread of
//! **memos** — short annotations written by the user or produced by a
//! generative-AI summarization service. The whole collection lives in a
//! single JSON data file mirrored on every mutation; there is no server and
//! no database.
//!
//! # Architecture
//!
//! - **Storage**: one JSON document, rewritten atomically after every
//!   accepted mutation; an unreadable file falls back to seed data
//! - **Views**: the category → keyword filter index and list ordering are
//!   pure functions recomputed from the collection
//! - **AI**: summarization and attachment text-extraction go through a
//!   narrow gateway that always resolves to a display-ready string
//!
//! # Modules
//!
//! - [`config`] — Configuration loading from TOML files and environment variables
//! - [`archive`] — The article store, its types, and the derived filter views
//! - [`gateway`] — The never-throws bridge to the remote generative model
//! - [`ingest`] — Attachment gating and the sequential processing pipeline

pub mod archive;
pub mod config;
pub mod gateway;
pub mod ingest;
