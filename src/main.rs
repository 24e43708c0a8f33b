// file: src/main.rs
// description: commandline application entry point with command handling
// reference: application bootstrap and orchestration

use anyhow::{Context, Result};
use clap::{ArgAction, Parser, Subcommand};
use reddit_qa::utils::logging::{format_error, format_step, format_success, format_warning};
use reddit_qa::{
    CSV_FILE_NAME, CSV_MIME_TYPE, Config, PipelineRunner, RedditClient, RunOutcome, Validator,
};
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Parser)]
#[command(name = "reddit_qa")]
#[command(author = "cipher")]
#[command(version = "0.1.0")]
#[command(about = "Harvests top Reddit threads into Q&A datasets with Gemini", long_about = None)]
struct Cli {
    #[arg(
        short,
        long,
        value_name = "FILE",
        default_value = "config/default.toml"
    )]
    config: PathBuf,

    #[arg(long, default_value_t = true, action = ArgAction::Set)]
    color: bool,

    #[arg(short, long, action = ArgAction::SetTrue)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the full fetch, convert, and export pipeline
    Run {
        #[arg(short, long)]
        subreddit: Option<String>,

        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=100))]
        count: Option<u32>,

        #[arg(short, long, value_name = "FILE")]
        output: Option<PathBuf>,

        /// Also persist the CSV byte stream to this path
        #[arg(long, value_name = "FILE")]
        csv: Option<PathBuf>,
    },

    /// Fetch threads and print the rendered bundles without converting
    Fetch {
        #[arg(short, long)]
        subreddit: Option<String>,

        #[arg(short = 'n', long, value_parser = clap::value_parser!(u32).range(1..=100))]
        count: Option<u32>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    reddit_qa::utils::logging::init_logger(cli.color, cli.verbose);

    info!("Reddit Q&A Harvester");
    info!("Loading configuration from: {}", cli.config.display());

    let config = if cli.config.exists() {
        Config::load(Some(cli.config.as_path())).context("Failed to load configuration")?
    } else {
        warn!(
            "Config file {} not found, using default configuration",
            cli.config.display()
        );
        Config::load(None).unwrap_or_else(|e| {
            warn!("Falling back to built-in defaults: {}", e);
            Config::default_config()
        })
    };

    match cli.command {
        Commands::Run {
            subreddit,
            count,
            output,
            csv,
        } => {
            let config = apply_overrides(config, subreddit, count, output);
            cmd_run(config, csv).await?;
        }
        Commands::Fetch { subreddit, count } => {
            let config = apply_overrides(config, subreddit, count, None);
            cmd_fetch(&config).await?;
        }
    }

    Ok(())
}

fn apply_overrides(
    mut config: Config,
    subreddit: Option<String>,
    count: Option<u32>,
    output: Option<PathBuf>,
) -> Config {
    if let Some(subreddit) = subreddit {
        config.scrape.subreddit = subreddit;
    }
    if let Some(count) = count {
        config.scrape.post_count = count;
    }
    if let Some(output) = output {
        config.output.xlsx_path = output;
    }
    config
}

async fn cmd_run(config: Config, csv_path: Option<PathBuf>) -> Result<()> {
    Validator::require_reddit_credentials(&config).context("Missing Reddit credentials")?;
    Validator::require_gemini_key(&config).context("Missing Gemini API key")?;
    Validator::validate_subreddit_name(config.subreddit_name())?;

    let subreddit = config.subreddit_name().to_string();
    let xlsx_path = config.output.xlsx_path.clone();
    let csv_path = csv_path.or_else(|| config.output.csv_path.clone());

    let runner = PipelineRunner::new(config);
    let outcome = runner.run().await.context("Pipeline run failed")?;

    report_outcome(&outcome, &subreddit, &xlsx_path, csv_path.as_deref())
}

fn report_outcome(
    outcome: &RunOutcome,
    subreddit: &str,
    xlsx_path: &std::path::Path,
    csv_path: Option<&std::path::Path>,
) -> Result<()> {
    for warning in &outcome.warnings {
        println!("{}", format_warning(warning));
    }

    if outcome.stats.threads_fetched == 0 {
        println!("{}", format_error(&format!("No posts found in r/{}", subreddit)));
        return Ok(());
    }

    let Some(table) = &outcome.table else {
        println!("{}", format_error("No Q&A pairs were generated."));
        return Ok(());
    };

    println!(
        "{}",
        format_success(&format!(
            "Retrieved {} posts from r/{}, produced {} Q&A pairs.",
            outcome.stats.threads_fetched, subreddit, table.len()
        ))
    );
    if outcome.xlsx_written {
        println!(
            "{}",
            format_success(&format!("Data saved to {}", xlsx_path.display()))
        );
    }

    print_preview(table);

    if let Some(csv_bytes) = &outcome.csv_bytes {
        match csv_path {
            Some(path) => {
                std::fs::write(path, csv_bytes)
                    .with_context(|| format!("Failed to write CSV to {}", path.display()))?;
                println!(
                    "{}",
                    format_success(&format!("CSV saved to {}", path.display()))
                );
            }
            None => {
                info!(
                    "CSV stream ready ({} bytes, {}, suggested name {}); pass --csv <FILE> to save it",
                    csv_bytes.len(),
                    CSV_MIME_TYPE,
                    CSV_FILE_NAME
                );
            }
        }
    }

    Ok(())
}

fn print_preview(table: &reddit_qa::ResultTable) {
    const PREVIEW_ROWS: usize = 5;

    println!("\n{}", "=".repeat(80));
    for (idx, pair) in table.rows().iter().take(PREVIEW_ROWS).enumerate() {
        println!("{}. {}", idx + 1, Validator::truncate_text(&pair.question, 76));
        println!("   {}", Validator::truncate_text(&pair.answer, 76));
    }
    if table.len() > PREVIEW_ROWS {
        println!("... and {} more rows", table.len() - PREVIEW_ROWS);
    }
    println!("{}", "=".repeat(80));
}

async fn cmd_fetch(config: &Config) -> Result<()> {
    Validator::require_reddit_credentials(config).context("Missing Reddit credentials")?;
    Validator::validate_subreddit_name(config.subreddit_name())?;

    let subreddit = config.subreddit_name();

    println!("{}", format_step(1, 2, "Authenticating with Reddit"));
    let reddit = RedditClient::connect(&config.reddit)
        .await
        .context("Reddit authentication failed")?;

    println!(
        "{}",
        format_step(2, 2, &format!("Fetching top {} threads from r/{}", config.scrape.post_count, subreddit))
    );
    let bundles = reddit
        .top_threads(subreddit, config.scrape.post_count)
        .await
        .context("Thread fetch failed")?;

    if bundles.is_empty() {
        println!("{}", format_error(&format!("No posts found in r/{}", subreddit)));
        return Ok(());
    }

    println!(
        "{}",
        format_success(&format!("Retrieved {} posts from r/{}", bundles.len(), subreddit))
    );

    for bundle in &bundles {
        println!("\n{}", "=".repeat(80));
        print!("{}", bundle.render());
    }
    println!("{}", "=".repeat(80));

    Ok(())
}
