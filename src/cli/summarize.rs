//! CLI `summarize` command — run a text (or a whole article body) through
//! the gateway and file the result as a summary memo.

use anyhow::Result;
use clap::Args;

use packrat::config::PackratConfig;
use packrat::gateway::{self, Gateway};

#[derive(Args)]
pub struct SummarizeArgs {
    /// Article to attach the summary memo to (id or unambiguous prefix)
    pub id: String,

    /// Summarize this text (e.g. a passage copied from the body) instead of
    /// the whole body
    #[arg(long)]
    pub text: Option<String>,
}

pub async fn run(config: &PackratConfig, args: SummarizeArgs) -> Result<()> {
    let mut store = super::open_store(config);
    let id = store.resolve_id(&args.id)?;

    let text = match args.text {
        Some(text) => text,
        None => store.get(&id).expect("resolved id exists").body.clone(),
    };

    let gateway = Gateway::new(gateway::create_model(&config.gateway)?);
    let summary = gateway.summarize(&text).await;

    // The result is always filed, fallback strings included — a degraded
    // summary reads like any other memo.
    let memo = store.add_memo(&id, summary.as_str(), true)?;

    println!("memo {} added:", memo.id);
    println!("{summary}");
    Ok(())
}
