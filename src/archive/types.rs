//! Core archive type definitions.
//!
//! Defines [`Format`] (the source-material tags), [`Article`] (a full archived
//! record with its memo thread), [`Memo`] (a single annotation), and
//! [`Attachment`] (an inline base64 file). Serialized field names are fixed —
//! the data file on disk is an array of these records.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// The kind of source material an article was captured from.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Format {
    /// News articles and press coverage.
    News,
    /// Blog posts and personal write-ups.
    Blog,
    /// Books or book chapters.
    Book,
    /// Academic papers.
    Paper,
    /// Video content (talks, streams, channels).
    Video,
    /// PDF documents.
    Pdf,
    /// Anything that fits none of the above.
    Other,
}

impl Format {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::News => "news",
            Self::Blog => "blog",
            Self::Book => "book",
            Self::Paper => "paper",
            Self::Video => "video",
            Self::Pdf => "pdf",
            Self::Other => "other",
        }
    }
}

impl std::fmt::Display for Format {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl std::str::FromStr for Format {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "news" => Ok(Self::News),
            "blog" => Ok(Self::Blog),
            "book" => Ok(Self::Book),
            "paper" => Ok(Self::Paper),
            "video" => Ok(Self::Video),
            "pdf" => Ok(Self::Pdf),
            "other" => Ok(Self::Other),
            _ => Err(format!("unknown format: {s}")),
        }
    }
}

/// A file attached to an article, stored inline as a base64 data URI.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Attachment {
    /// Original file name (for display and download).
    pub name: String,
    /// MIME type, e.g. `image/png` or `application/pdf`.
    pub mime_type: String,
    /// `data:<mime>;base64,<payload>` URI holding the file bytes.
    pub content: String,
}

impl Attachment {
    /// Decode the base64 payload of the data URI back into raw bytes.
    pub fn decoded_content(&self) -> Result<Vec<u8>, base64::DecodeError> {
        use base64::{engine::general_purpose::STANDARD, Engine};
        // Everything after the first comma is the base64 payload.
        let payload = self
            .content
            .split_once(',')
            .map(|(_, data)| data)
            .unwrap_or(self.content.as_str());
        STANDARD.decode(payload)
    }

    pub fn is_image(&self) -> bool {
        self.mime_type.starts_with("image/")
    }
}

/// A short annotation attached to one article.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memo {
    /// UUID v7 (time-sortable), unique within the owning article.
    pub id: String,
    /// The memo text.
    pub content: String,
    /// `true` when the content came from the summarization gateway.
    pub is_summary: bool,
    /// Creation timestamp, immutable after creation.
    pub created_at: DateTime<Utc>,
}

/// A single archived piece of content with metadata and its memo thread.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Article {
    /// UUID v7 primary key, unique across the collection.
    pub id: String,
    /// Non-empty display title.
    pub title: String,
    /// Body text, possibly empty.
    pub body: String,
    /// Where the content came from (URL or free text), possibly empty.
    pub source: String,
    /// Creation timestamp, immutable after creation.
    pub created_at: DateTime<Utc>,
    /// Source-material tag.
    pub format: Format,
    /// Free-form grouping label, the primary filter axis. Non-empty.
    pub category: String,
    /// Free-form tags, the secondary filter axis. Order preserved,
    /// duplicates allowed.
    pub keywords: Vec<String>,
    /// Memos are appended in creation order; display reverses them.
    pub memos: Vec<Memo>,
    /// Inline file attachments.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub attachments: Vec<Attachment>,
}

/// The mutable fields of an article, as submitted by the create/edit form.
///
/// `id`, `created_at`, and the memo thread are owned by the store and never
/// come from a draft.
#[derive(Debug, Clone, Default)]
pub struct ArticleDraft {
    pub title: String,
    pub body: String,
    pub source: String,
    pub format: Option<Format>,
    pub category: String,
    pub keywords: Vec<String>,
    pub attachments: Vec<Attachment>,
}
