use std::path::PathBuf;

use anyhow::Context;
use clap::Parser;
use tokio::io::{AsyncBufReadExt, BufReader};
use tracing::info;
use tracing_subscriber::EnvFilter;

use advisor::{CompletionGateway, Config, config};

/// Ask the Conestoga College Student Success Advisor a question.
#[derive(Debug, Parser)]
#[command(name = "advisor", version, about)]
struct Cli {
    /// Question to ask. Reads one question per stdin line when omitted.
    #[arg(trailing_var_arg = true)]
    question: Vec<String>,

    /// Load environment variables from this file instead of `.env`.
    #[arg(long, value_name = "PATH")]
    env_file: Option<PathBuf>,
}

impl Cli {
    /// The question joined from its words, if one was given.
    fn question(&self) -> Option<String> {
        (!self.question.is_empty()).then(|| self.question.join(" "))
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| "warn".into()))
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    config::load_env_file(cli.env_file.as_deref())?;
    let config = Config::from_env().context("cannot build completion gateway")?;
    let gateway = CompletionGateway::from_config(&config);
    info!(base_url = %config.base_url, model = %gateway.settings().model, "Gateway ready");

    if let Some(question) = cli.question() {
        println!("{}", gateway.reply_or_sentinel(&question).await);
        return Ok(());
    }

    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    while let Some(line) = lines.next_line().await? {
        if line.trim().is_empty() {
            continue;
        }
        println!("{}", gateway.reply_or_sentinel(&line).await);
    }

    Ok(())
}
