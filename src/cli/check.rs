//! Text and URL check commands with terminal-formatted results.

use clap::Args;

use crate::config::AppConfig;
use crate::domain::{ClaimResult, Verdict};
use crate::infrastructure::logging;

const GREEN: &str = "\x1b[92m";
const RED: &str = "\x1b[91m";
const YELLOW: &str = "\x1b[93m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

#[derive(Args)]
pub struct TextArgs {
    /// Text to fact-check
    pub text: String,

    /// Maximum number of claims to extract (defaults to the configured value)
    #[arg(long)]
    pub max_claims: Option<usize>,
}

#[derive(Args)]
pub struct UrlArgs {
    /// URL of the page to fact-check
    pub url: String,

    /// Maximum number of claims to extract (defaults to the configured value)
    #[arg(long)]
    pub max_claims: Option<usize>,
}

pub async fn run_text(args: TextArgs) -> anyhow::Result<()> {
    let (config, pipeline) = setup()?;
    let max_claims = args.max_claims.unwrap_or(config.pipeline.max_claims);
    let results = pipeline
        .check_text(&args.text, max_claims, Some(&print_progress))
        .await?;

    print_results(&results);
    Ok(())
}

pub async fn run_url(args: UrlArgs) -> anyhow::Result<()> {
    let (config, pipeline) = setup()?;
    let max_claims = args.max_claims.unwrap_or(config.pipeline.max_claims);
    let results = pipeline
        .check_url(&args.url, max_claims, Some(&print_progress))
        .await?;

    print_results(&results);
    Ok(())
}

fn setup() -> anyhow::Result<(AppConfig, crate::FactCheckPipeline)> {
    dotenvy::dotenv().ok();

    let config = AppConfig::load().unwrap_or_default();
    logging::init_logging(&logging::LoggingConfig {
        level: config.logging.level.clone(),
        format: config.logging.format.clone(),
    });

    let pipeline = crate::create_pipeline(&config)?;
    Ok((config, pipeline))
}

fn print_progress(message: &str, _current: usize, _total: usize) {
    println!("\n{}", "=".repeat(60));
    println!("  {message}");
    println!("{}", "=".repeat(60));
}

fn verdict_color(verdict: Verdict) -> &'static str {
    match verdict {
        Verdict::True => GREEN,
        Verdict::False => RED,
        Verdict::Uncertain => YELLOW,
    }
}

fn print_results(results: &[ClaimResult]) {
    if results.is_empty() {
        println!("\nNo claims could be extracted from the input.");
        return;
    }

    println!("\n{BOLD}{}", "=".repeat(60));
    println!("  FACT-CHECK RESULTS");
    println!("{}{RESET}\n", "=".repeat(60));

    for (index, result) in results.iter().enumerate() {
        let color = verdict_color(result.verdict);
        println!("{BOLD}Claim {}:{RESET} {}", index + 1, result.claim);
        println!(
            "  Verdict: {color}{BOLD}{}{RESET}",
            result.verdict.as_str().to_uppercase()
        );
        println!("  Reason:  {}", result.reason);
        if !result.sources.is_empty() {
            println!("  Sources:");
            for source in &result.sources {
                println!("    - {source}");
            }
        }
        println!();
    }
}
