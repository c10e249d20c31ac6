use anyhow::Result;
use clap::{Parser, Subcommand};
use quickfx::core::log::init_logging;

#[derive(Parser)]
#[command(version, about)]
struct Cli {
    /// Enable verbose logging
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Path to optional configuration file
    #[arg(short, long, global = true)]
    config_path: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Create default configuration
    Setup,
    /// Convert once, e.g. `quickfx query 10 usd to jpy`
    Query {
        /// Print only the converted amount
        #[arg(short, long)]
        raw: bool,

        /// "<amount>" or "<amount> <from> to <to>"
        #[arg(required = true, num_args = 1.., allow_hyphen_values = true)]
        text: Vec<String>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    init_logging(cli.verbose);

    let result = match cli.command {
        Some(Commands::Setup) => setup(),
        Some(Commands::Query { raw, text }) => {
            let command = quickfx::AppCommand::Query {
                text: text.join(" "),
                raw,
            };
            quickfx::run_command(command, cli.config_path.as_deref()).await
        }
        None => {
            quickfx::run_command(quickfx::AppCommand::Interactive, cli.config_path.as_deref())
                .await
        }
    };

    if let Err(e) = &result {
        tracing::error!(error = %e, "Application failed");
    }
    result
}

fn setup() -> anyhow::Result<()> {
    use anyhow::Context;

    let path = quickfx::config::AppConfig::default_config_path()?;

    if path.exists() {
        anyhow::bail!("Configuration file already exists at {}", path.display());
    }

    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create directory: {}", parent.display()))?;
    }

    let default_config = r#"---
quick_conversion:
  # local_to_global or global_to_local
  direction: local_to_global
  # Empty means the currency of your locale
  local_currency: ""
  global_currency: "USD"

provider:
  base_url: "https://cdn.jsdelivr.net/gh/fawazahmed0/currency-api@1/latest/currencies"
  timeout_secs: 10

cache:
  validity_secs: 3600
"#;

    std::fs::write(&path, default_config)
        .with_context(|| format!("Failed to write config file to {}", path.display()))?;

    eprintln!("Created default configuration at {}", path.display());
    Ok(())
}
