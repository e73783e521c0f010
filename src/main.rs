use clap::Parser;
use claimcheck::cli::{self, Cli, Command};

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Command::Text(args) => cli::check::run_text(args).await,
        Command::Url(args) => cli::check::run_url(args).await,
        Command::Serve => cli::serve::run().await,
    }
}
