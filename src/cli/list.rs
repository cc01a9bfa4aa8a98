//! CLI `list` and `categories` commands — the filterable list view and the
//! category sidebar.

use anyhow::Result;
use clap::Args;

use packrat::archive::index::{self, Filter};
use packrat::config::PackratConfig;

#[derive(Args)]
pub struct ListArgs {
    /// Only articles in this exact category
    #[arg(long, conflicts_with = "keyword")]
    pub category: Option<String>,

    /// Only articles tagged with this exact keyword
    #[arg(long)]
    pub keyword: Option<String>,
}

/// Print the (filtered) article list, newest first.
pub fn run(config: &PackratConfig, args: ListArgs) -> Result<()> {
    let store = super::open_store(config);

    let filter = match (args.category, args.keyword) {
        (Some(category), _) => Filter::Category(category),
        (_, Some(keyword)) => Filter::Keyword(keyword),
        _ => Filter::All,
    };

    let articles = index::filter_articles(store.articles(), &filter);
    if articles.is_empty() {
        println!("No articles match.");
        return Ok(());
    }

    for article in articles {
        println!(
            "{}  {}  [{}] {}",
            article.id,
            article.created_at.format("%Y-%m-%d"),
            article.category,
            article.title
        );
        if !article.keywords.is_empty() {
            println!("{:48}#{}", "", article.keywords.join(" #"));
        }
    }
    Ok(())
}

/// Print the category → keyword tree the list view filters on.
pub fn categories(config: &PackratConfig) -> Result<()> {
    let store = super::open_store(config);
    let entries = index::category_index(store.articles());

    if entries.is_empty() {
        println!("No categories yet.");
        return Ok(());
    }

    for entry in entries {
        println!("{}", entry.category);
        for keyword in &entry.keywords {
            println!("  # {keyword}");
        }
    }
    Ok(())
}
