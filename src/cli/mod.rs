pub mod article;
pub mod list;
pub mod memo;
pub mod show;
pub mod summarize;

use std::io::Write;

use anyhow::Result;

use packrat::archive::store::Store;
use packrat::config::PackratConfig;

/// Open the store at the configured data path.
pub fn open_store(config: &PackratConfig) -> Store {
    Store::open(config.resolved_data_path())
}

/// Ask a yes/no question on stdin. Anything but an explicit yes is a no.
pub fn confirm(prompt: &str) -> Result<bool> {
    print!("{prompt} [y/N]: ");
    std::io::stdout().flush()?;

    let mut input = String::new();
    std::io::stdin().read_line(&mut input)?;
    Ok(matches!(input.trim(), "y" | "Y" | "yes"))
}
