//! Core archive engine: the persistent article store and its derived views.

pub mod index;
pub mod store;
pub mod types;

use thiserror::Error;

/// Validation and lookup failures raised by the store and attachment gating.
///
/// Every variant carries a user-facing message. Failures are terminal at the
/// boundary where they occur — callers print them, nothing re-throws upward.
#[derive(Debug, Error)]
pub enum ArchiveError {
    #[error("title is required")]
    EmptyTitle,

    #[error("category is required")]
    EmptyCategory,

    #[error("article not found: {0}")]
    ArticleNotFound(String),

    #[error("memo not found: {0}")]
    MemoNotFound(String),

    #[error("article id prefix '{0}' matches multiple articles")]
    AmbiguousId(String),

    #[error("'{name}' exceeds the {limit_mb} MB attachment size limit")]
    AttachmentTooLarge { name: String, limit_mb: u64 },

    #[error("'{name}' has an unsupported attachment type (allowed: PNG, JPEG, PDF)")]
    UnsupportedAttachment { name: String },
}
