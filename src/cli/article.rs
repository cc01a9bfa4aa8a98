//! CLI `add`, `edit`, and `delete` commands — the create/edit form and the
//! confirmed delete action.

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use packrat::archive::types::{ArticleDraft, Attachment, Format};
use packrat::config::PackratConfig;
use packrat::gateway::{self, Gateway};
use packrat::ingest;

#[derive(Args)]
pub struct AddArgs {
    /// Article title (required to save)
    #[arg(long)]
    pub title: String,

    /// Category label (required to save)
    #[arg(long)]
    pub category: String,

    /// Where the content came from (URL or free text)
    #[arg(long, default_value = "")]
    pub source: String,

    /// Source-material tag: news, blog, book, paper, video, pdf, other
    #[arg(long, default_value = "other")]
    pub format: Format,

    /// Comma-separated keywords
    #[arg(long, default_value = "")]
    pub keywords: String,

    /// Body text
    #[arg(long)]
    pub body: Option<String>,

    /// Read the body text from a file
    #[arg(long, conflicts_with = "body")]
    pub body_file: Option<PathBuf>,

    /// Attach a file (PNG/JPEG: text extraction, PDF: summary); repeatable
    #[arg(long = "attach", value_name = "FILE")]
    pub attachments: Vec<PathBuf>,

    /// Append an AI summary of the finished body before saving
    #[arg(long)]
    pub summarize_body: bool,
}

#[derive(Args)]
pub struct EditArgs {
    /// Article id (or unambiguous prefix)
    pub id: String,

    #[arg(long)]
    pub title: Option<String>,

    #[arg(long)]
    pub category: Option<String>,

    #[arg(long)]
    pub source: Option<String>,

    /// Source-material tag: news, blog, book, paper, video, pdf, other
    #[arg(long)]
    pub format: Option<Format>,

    /// Comma-separated keywords (replaces the current set)
    #[arg(long)]
    pub keywords: Option<String>,

    /// Replace the body text
    #[arg(long)]
    pub body: Option<String>,

    /// Replace the body text from a file
    #[arg(long, conflicts_with = "body")]
    pub body_file: Option<PathBuf>,

    /// Attach an additional file; repeatable
    #[arg(long = "attach", value_name = "FILE")]
    pub attachments: Vec<PathBuf>,

    /// Append an AI summary of the finished body before saving
    #[arg(long)]
    pub summarize_body: bool,
}

pub async fn add(config: &PackratConfig, args: AddArgs) -> Result<()> {
    let mut store = super::open_store(config);

    // The form's category suggestions: surface the existing taxonomy when
    // the submission is about to fail validation on it.
    if args.category.trim().is_empty() && !store.categories().is_empty() {
        eprintln!("existing categories: {}", store.categories().join(", "));
    }

    let mut body = read_body(args.body, args.body_file)?.unwrap_or_default();
    let attachments = gate_attachments(&args.attachments);

    run_ai_steps(config, &attachments, args.summarize_body, &mut body).await?;

    let draft = ArticleDraft {
        title: args.title,
        body,
        source: args.source,
        format: Some(args.format),
        category: args.category,
        keywords: ingest::parse_keywords(&args.keywords),
        attachments,
    };
    let article = store.create_article(draft)?;

    println!("created {}", article.id);
    Ok(())
}

pub async fn edit(config: &PackratConfig, args: EditArgs) -> Result<()> {
    let mut store = super::open_store(config);
    let id = store.resolve_id(&args.id)?;
    let current = store.get(&id).expect("resolved id exists").clone();

    // The form starts pre-filled with the stored fields; flags replace them.
    let mut body = read_body(args.body, args.body_file)?.unwrap_or(current.body);

    let new_attachments = gate_attachments(&args.attachments);
    run_ai_steps(config, &new_attachments, args.summarize_body, &mut body).await?;

    let mut attachments = current.attachments;
    attachments.extend(new_attachments);

    let draft = ArticleDraft {
        title: args.title.unwrap_or(current.title),
        body,
        source: args.source.unwrap_or(current.source),
        format: Some(args.format.unwrap_or(current.format)),
        category: args.category.unwrap_or(current.category),
        keywords: args
            .keywords
            .map(|raw| ingest::parse_keywords(&raw))
            .unwrap_or(current.keywords),
        attachments,
    };
    store.update_article(&id, draft)?;

    println!("updated {id}");
    Ok(())
}

pub fn delete(config: &PackratConfig, id: &str, yes: bool) -> Result<()> {
    let mut store = super::open_store(config);
    let id = store.resolve_id(id)?;
    let title = store.get(&id).expect("resolved id exists").title.clone();

    if !yes {
        let prompt = format!("Delete '{title}' and all of its memos?");
        if !super::confirm(&prompt)? {
            println!("delete cancelled");
            return Ok(());
        }
    }

    store.delete_article(&id);
    println!("deleted {id}");
    Ok(())
}

/// Gate each submitted file; a rejected file is reported and skipped, the
/// rest of the submission continues.
fn gate_attachments(paths: &[PathBuf]) -> Vec<Attachment> {
    let mut accepted = Vec::new();
    for path in paths {
        match ingest::load_attachment(path) {
            Ok(attachment) => accepted.push(attachment),
            Err(err) => eprintln!("skipping {}: {err:#}", path.display()),
        }
    }
    accepted
}

/// Feed accepted attachments through the gateway (sequentially, in
/// submission order) and optionally append a body summary. The gateway is
/// only constructed when there is AI work to do, so purely local commands
/// never need an API key.
async fn run_ai_steps(
    config: &PackratConfig,
    attachments: &[Attachment],
    summarize_body: bool,
    body: &mut String,
) -> Result<()> {
    if attachments.is_empty() && !summarize_body {
        return Ok(());
    }

    let gateway = Gateway::new(gateway::create_model(&config.gateway)?);
    ingest::process_attachments(&gateway, attachments, body).await;

    if summarize_body {
        let summary = gateway.summarize(body).await;
        ingest::append_summary_to_body(body, &summary);
    }
    Ok(())
}

fn read_body(body: Option<String>, body_file: Option<PathBuf>) -> Result<Option<String>> {
    match (body, body_file) {
        (Some(text), _) => Ok(Some(text)),
        (None, Some(path)) => {
            let text = std::fs::read_to_string(&path)
                .with_context(|| format!("failed to read body file {}", path.display()))?;
            Ok(Some(text))
        }
        (None, None) => Ok(None),
    }
}
