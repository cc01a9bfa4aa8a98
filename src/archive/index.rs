//! Derived views — the category/keyword index and list filtering.
//!
//! Everything here is a pure function of the collection; callers recompute
//! after each mutation (or cache on collection identity if they want to).

use crate::archive::types::{Article, Memo};

/// One sidebar entry: a category and the distinct keywords used by the
/// articles filed under it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CategoryEntry {
    pub category: String,
    pub keywords: Vec<String>,
}

/// The list view's filter axis.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    /// No filter — all articles.
    All,
    /// Exact category match, case-sensitive.
    Category(String),
    /// Exact keyword match, case-sensitive.
    Keyword(String),
}

/// Build the category → keyword index in a single pass.
///
/// Categories appear in first-encounter order over the collection; keywords
/// within a category in first-encounter order as well, deduplicated. Output
/// is deterministic for a fixed collection order.
pub fn category_index(articles: &[Article]) -> Vec<CategoryEntry> {
    let mut entries: Vec<CategoryEntry> = Vec::new();
    for article in articles {
        let position = entries.iter().position(|e| e.category == article.category);
        let entry = match position {
            Some(i) => &mut entries[i],
            None => {
                entries.push(CategoryEntry {
                    category: article.category.clone(),
                    keywords: Vec::new(),
                });
                entries.last_mut().expect("just pushed")
            }
        };
        for keyword in &article.keywords {
            if !entry.keywords.contains(keyword) {
                entry.keywords.push(keyword.clone());
            }
        }
    }
    entries
}

/// Select and order articles for the list view.
///
/// Matching is exact-string on category or keyword (no case-folding, no
/// trimming). Results are sorted descending by creation time; ties keep
/// their relative collection order (stable sort).
pub fn filter_articles<'a>(articles: &'a [Article], filter: &Filter) -> Vec<&'a Article> {
    let mut selected: Vec<&Article> = articles
        .iter()
        .filter(|article| match filter {
            Filter::All => true,
            Filter::Category(category) => article.category == *category,
            Filter::Keyword(keyword) => article.keywords.iter().any(|k| k == keyword),
        })
        .collect();
    selected.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    selected
}

/// Memo thread in display order: newest first.
///
/// Storage order is append (oldest first); the reversal is deliberately a
/// view concern so the stored sequence stays in creation order.
pub fn memos_newest_first(article: &Article) -> Vec<&Memo> {
    let mut memos: Vec<&Memo> = article.memos.iter().collect();
    memos.sort_by(|a, b| b.created_at.cmp(&a.created_at));
    memos
}
