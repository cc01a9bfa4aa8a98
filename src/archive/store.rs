//! Write path — the article collection and its write-through persistence.
//!
//! [`Store`] owns the in-memory collection and mirrors it to a single JSON
//! data file after every accepted mutation. Loading never fails: an absent or
//! unparseable data file falls back to the seeded default collection, and a
//! failed write is logged but keeps the in-memory state authoritative for the
//! rest of the session.
//!
//! Every mutation builds the next collection in full and swaps it in whole,
//! so no operation can partially apply.

use std::path::{Path, PathBuf};

use anyhow::Context;
use chrono::Utc;
use tracing::{debug, info, warn};

use crate::archive::types::{Article, ArticleDraft, Format, Memo};
use crate::archive::ArchiveError;

/// The persistent article collection.
pub struct Store {
    path: PathBuf,
    articles: Vec<Article>,
}

impl Store {
    /// Open the store backed by the data file at `path`.
    ///
    /// Reads the collection from disk; if the file is absent or does not
    /// decode as a collection, starts from the seeded default instead. This
    /// never fails — decode problems are logged and recovered locally.
    pub fn open(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let articles = load_collection(&path);
        Self { path, articles }
    }

    /// The full collection, in storage order (newest-created first).
    pub fn articles(&self) -> &[Article] {
        &self.articles
    }

    /// Look up an article by exact id.
    pub fn get(&self, id: &str) -> Option<&Article> {
        self.articles.iter().find(|a| a.id == id)
    }

    /// Resolve a full id or an unambiguous id prefix to a full id.
    pub fn resolve_id(&self, prefix: &str) -> Result<String, ArchiveError> {
        if let Some(article) = self.get(prefix) {
            return Ok(article.id.clone());
        }
        let mut matches = self.articles.iter().filter(|a| a.id.starts_with(prefix));
        match (matches.next(), matches.next()) {
            (Some(article), None) => Ok(article.id.clone()),
            (Some(_), Some(_)) => Err(ArchiveError::AmbiguousId(prefix.to_string())),
            _ => Err(ArchiveError::ArticleNotFound(prefix.to_string())),
        }
    }

    /// Distinct category names in first-encounter order, for the
    /// create-form's category suggestions.
    pub fn categories(&self) -> Vec<&str> {
        let mut seen = Vec::new();
        for article in &self.articles {
            if !seen.contains(&article.category.as_str()) {
                seen.push(article.category.as_str());
            }
        }
        seen
    }

    /// Validate a draft and add it to the collection as a new article.
    ///
    /// Assigns a fresh id and timestamp, starts with an empty memo thread,
    /// and prepends to the collection. Returns the stored article.
    pub fn create_article(&mut self, draft: ArticleDraft) -> Result<Article, ArchiveError> {
        validate_draft(&draft)?;

        let article = Article {
            id: uuid::Uuid::now_v7().to_string(),
            title: draft.title,
            body: draft.body,
            source: draft.source,
            created_at: Utc::now(),
            format: draft.format.unwrap_or(Format::Other),
            category: draft.category,
            keywords: draft.keywords,
            memos: Vec::new(),
            attachments: draft.attachments,
        };

        let mut next = Vec::with_capacity(self.articles.len() + 1);
        next.push(article.clone());
        next.append(&mut self.articles);
        self.articles = next;
        self.persist();

        debug!(id = %article.id, title = %article.title, "article created");
        Ok(article)
    }

    /// Replace all mutable fields of the article with the draft's values.
    ///
    /// `id`, `created_at`, and the memo thread are preserved.
    pub fn update_article(&mut self, id: &str, draft: ArticleDraft) -> Result<(), ArchiveError> {
        validate_draft(&draft)?;
        if self.get(id).is_none() {
            return Err(ArchiveError::ArticleNotFound(id.to_string()));
        }

        let next: Vec<Article> = self
            .articles
            .iter()
            .map(|a| {
                if a.id != id {
                    return a.clone();
                }
                Article {
                    id: a.id.clone(),
                    created_at: a.created_at,
                    memos: a.memos.clone(),
                    title: draft.title.clone(),
                    body: draft.body.clone(),
                    source: draft.source.clone(),
                    format: draft.format.unwrap_or(a.format),
                    category: draft.category.clone(),
                    keywords: draft.keywords.clone(),
                    attachments: draft.attachments.clone(),
                }
            })
            .collect();
        self.articles = next;
        self.persist();

        debug!(id, "article updated");
        Ok(())
    }

    /// Remove an article and its whole memo thread. Returns `false` when the
    /// id is unknown. Interactive confirmation is the caller's concern.
    pub fn delete_article(&mut self, id: &str) -> bool {
        let next: Vec<Article> = self
            .articles
            .iter()
            .filter(|a| a.id != id)
            .cloned()
            .collect();
        if next.len() == self.articles.len() {
            return false;
        }
        self.articles = next;
        self.persist();

        info!(id, "article deleted");
        true
    }

    /// Append a memo to the target article's thread. Display order reversal
    /// happens at view time, not here.
    pub fn add_memo(
        &mut self,
        article_id: &str,
        content: impl Into<String>,
        is_summary: bool,
    ) -> Result<Memo, ArchiveError> {
        if self.get(article_id).is_none() {
            return Err(ArchiveError::ArticleNotFound(article_id.to_string()));
        }

        let memo = Memo {
            id: uuid::Uuid::now_v7().to_string(),
            content: content.into(),
            is_summary,
            created_at: Utc::now(),
        };

        let next: Vec<Article> = self
            .articles
            .iter()
            .map(|a| {
                if a.id != article_id {
                    return a.clone();
                }
                let mut updated = a.clone();
                updated.memos.push(memo.clone());
                updated
            })
            .collect();
        self.articles = next;
        self.persist();

        debug!(article_id, memo_id = %memo.id, is_summary, "memo added");
        Ok(memo)
    }

    /// Replace a memo's content in place. Returns `false` (no-op) when either
    /// id is absent.
    pub fn update_memo(&mut self, article_id: &str, memo_id: &str, new_content: &str) -> bool {
        let exists = self
            .get(article_id)
            .is_some_and(|a| a.memos.iter().any(|m| m.id == memo_id));
        if !exists {
            return false;
        }

        let next: Vec<Article> = self
            .articles
            .iter()
            .map(|a| {
                if a.id != article_id {
                    return a.clone();
                }
                let mut updated = a.clone();
                for memo in &mut updated.memos {
                    if memo.id == memo_id {
                        memo.content = new_content.to_string();
                    }
                }
                updated
            })
            .collect();
        self.articles = next;
        self.persist();
        true
    }

    /// Remove a memo from its article's thread. Returns `false` (no-op) when
    /// either id is absent.
    pub fn delete_memo(&mut self, article_id: &str, memo_id: &str) -> bool {
        let exists = self
            .get(article_id)
            .is_some_and(|a| a.memos.iter().any(|m| m.id == memo_id));
        if !exists {
            return false;
        }

        let next: Vec<Article> = self
            .articles
            .iter()
            .map(|a| {
                if a.id != article_id {
                    return a.clone();
                }
                let mut updated = a.clone();
                updated.memos.retain(|m| m.id != memo_id);
                updated
            })
            .collect();
        self.articles = next;
        self.persist();
        true
    }

    /// Write the whole collection to the data file. Best-effort: a failed
    /// write is logged and the session continues with in-memory truth.
    pub fn persist(&self) {
        if let Err(err) = self.write_data_file() {
            warn!(
                error = %err,
                path = %self.path.display(),
                "failed to write data file, in-memory state kept"
            );
        }
    }

    /// Atomic write: serialize to a temp file, then rename over the target.
    fn write_data_file(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("failed to create directory {}", parent.display()))?;
        }

        let json = serde_json::to_string_pretty(&self.articles)?;
        let tmp_path = self.path.with_extension("tmp");
        std::fs::write(&tmp_path, json)
            .with_context(|| format!("failed to write {}", tmp_path.display()))?;
        std::fs::rename(&tmp_path, &self.path)
            .with_context(|| format!("failed to rename over {}", self.path.display()))?;
        Ok(())
    }
}

fn validate_draft(draft: &ArticleDraft) -> Result<(), ArchiveError> {
    if draft.title.trim().is_empty() {
        return Err(ArchiveError::EmptyTitle);
    }
    if draft.category.trim().is_empty() {
        return Err(ArchiveError::EmptyCategory);
    }
    Ok(())
}

/// Read the collection from disk, reseeding on any decode failure.
fn load_collection(path: &Path) -> Vec<Article> {
    match std::fs::read_to_string(path) {
        Ok(raw) => match serde_json::from_str::<Vec<Article>>(&raw) {
            Ok(articles) => {
                debug!(count = articles.len(), path = %path.display(), "collection loaded");
                articles
            }
            Err(err) => {
                warn!(
                    error = %err,
                    path = %path.display(),
                    "data file is not a valid collection, starting from seed data"
                );
                seed_collection()
            }
        },
        Err(err) if err.kind() == std::io::ErrorKind::NotFound => {
            info!(path = %path.display(), "no data file yet, starting from seed data");
            seed_collection()
        }
        Err(err) => {
            warn!(
                error = %err,
                path = %path.display(),
                "failed to read data file, starting from seed data"
            );
            seed_collection()
        }
    }
}

/// The default collection manufactured on first run: a single article so the
/// list view is never empty.
pub fn seed_collection() -> Vec<Article> {
    vec![Article {
        id: uuid::Uuid::now_v7().to_string(),
        title: "Understanding ownership in Rust".to_string(),
        body: "Ownership is Rust's central idea: every value has a single owner, \
               and when the owner goes out of scope the value is dropped. \
               Borrowing lets other code read or mutate a value without taking \
               ownership, checked at compile time so data races and dangling \
               references never reach a running program. Getting comfortable \
               with moves, borrows, and lifetimes pays for itself in every \
               other corner of the language."
            .to_string(),
        source: "https://doc.rust-lang.org/book/ch04-00-understanding-ownership.html".to_string(),
        created_at: Utc::now(),
        format: Format::Blog,
        category: "Tech".to_string(),
        keywords: vec![
            "Rust".to_string(),
            "Ownership".to_string(),
            "Memory".to_string(),
        ],
        memos: Vec::new(),
        attachments: Vec::new(),
    }]
}
