//! CLI `memo` subcommands — add, edit, and delete entries in an article's
//! memo thread.

use anyhow::Result;
use clap::Subcommand;

use packrat::archive::ArchiveError;
use packrat::config::PackratConfig;

#[derive(Subcommand)]
pub enum MemoCommand {
    /// Add a memo to an article
    Add {
        /// Article id (or unambiguous prefix)
        article_id: String,
        /// Memo text
        content: String,
    },
    /// Replace a memo's content
    Edit {
        /// Article id (or unambiguous prefix)
        article_id: String,
        /// Memo id
        memo_id: String,
        /// New memo text
        content: String,
    },
    /// Delete a memo
    Delete {
        /// Article id (or unambiguous prefix)
        article_id: String,
        /// Memo id
        memo_id: String,
    },
}

pub fn run(config: &PackratConfig, command: MemoCommand) -> Result<()> {
    let mut store = super::open_store(config);

    match command {
        MemoCommand::Add { article_id, content } => {
            let id = store.resolve_id(&article_id)?;
            let memo = store.add_memo(&id, content, false)?;
            println!("memo {} added", memo.id);
        }
        MemoCommand::Edit {
            article_id,
            memo_id,
            content,
        } => {
            let id = store.resolve_id(&article_id)?;
            if !store.update_memo(&id, &memo_id, &content) {
                return Err(ArchiveError::MemoNotFound(memo_id).into());
            }
            println!("memo {memo_id} updated");
        }
        MemoCommand::Delete { article_id, memo_id } => {
            let id = store.resolve_id(&article_id)?;
            if !store.delete_memo(&id, &memo_id) {
                return Err(ArchiveError::MemoNotFound(memo_id).into());
            }
            println!("memo {memo_id} deleted");
        }
    }
    Ok(())
}
