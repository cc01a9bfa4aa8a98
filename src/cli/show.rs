//! CLI `show` command — the article detail view.

use anyhow::Result;

use packrat::archive::index;
use packrat::config::PackratConfig;

pub fn run(config: &PackratConfig, id: &str) -> Result<()> {
    let store = super::open_store(config);
    let id = store.resolve_id(id)?;
    let article = store.get(&id).expect("resolved id exists");

    println!("{}", article.title);
    println!(
        "[{}] {} · added {}",
        article.category,
        article.format,
        article.created_at.format("%Y-%m-%d %H:%M")
    );
    if !article.source.is_empty() {
        println!("source: {}", article.source);
    }
    if !article.keywords.is_empty() {
        println!("keywords: #{}", article.keywords.join(" #"));
    }
    println!("id: {}", article.id);

    if !article.attachments.is_empty() {
        println!("\nattachments:");
        for attachment in &article.attachments {
            println!("  {} ({})", attachment.name, attachment.mime_type);
        }
    }

    if !article.body.is_empty() {
        println!("\n{}", article.body);
    }

    let memos = index::memos_newest_first(article);
    if !memos.is_empty() {
        println!("\nmemos:");
        for memo in memos {
            let origin = if memo.is_summary { " [AI summary]" } else { "" };
            println!(
                "  {}  {}{}",
                memo.created_at.format("%Y-%m-%d %H:%M"),
                memo.id,
                origin
            );
            for line in memo.content.lines() {
                println!("    {line}");
            }
        }
    }

    Ok(())
}
