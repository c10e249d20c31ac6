use super::ui;
use crate::core::{ActionSink, Converter, RateProvider, ResultItem};
use anyhow::{Context, Result};
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::debug;

/// Writes the text a result would copy to stdout, for piping into a
/// clipboard tool.
pub struct StdoutSink;

impl ActionSink for StdoutSink {
    fn copy_to_clipboard(&self, text: &str) -> Result<()> {
        println!("{text}");
        Ok(())
    }
}

async fn lookup<P: RateProvider>(converter: &Converter<P>, text: &str) -> Vec<ResultItem> {
    let pb = ui::new_spinner("Fetching rate...");
    let items = converter.query(text).await;
    pb.finish_and_clear();
    items
}

/// Runs a single query. With `raw` set, only the first result is activated
/// instead of being displayed.
pub async fn run_query<P: RateProvider>(
    converter: &Converter<P>,
    text: &str,
    raw: bool,
) -> Result<()> {
    let items = lookup(converter, text).await;
    if items.is_empty() {
        anyhow::bail!("Not a currency conversion: '{}'", text);
    }

    if raw {
        let activated = items.first().is_some_and(|item| item.activate(&StdoutSink));
        if !activated {
            anyhow::bail!("Conversion failed for '{}'", text);
        }
        return Ok(());
    }

    println!("{}", ui::format_items(&items));
    Ok(())
}

/// Reads one query per line from stdin until EOF. Lines that are not
/// conversions print nothing.
pub async fn run_interactive<P: RateProvider>(converter: &Converter<P>) -> Result<()> {
    eprintln!(
        "{}",
        ui::style_text(
            "Enter '<amount>' or '<amount> <from> to <to>', Ctrl-D to quit.",
            ui::StyleType::Subtle
        )
    );

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines
        .next_line()
        .await
        .context("Failed to read from stdin")?
    {
        let items = lookup(converter, &line).await;
        if items.is_empty() {
            debug!("No results for '{}'", line);
            continue;
        }
        println!("{}", ui::format_items(&items));
    }
    Ok(())
}
