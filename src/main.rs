use std::path::PathBuf;

use clap::{Args, Parser, Subcommand};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use hypha::config::AppConfig;
use hypha::discovery::{self, Source};
use hypha::output::clean::clean_failed_reviews;
use hypha::pipeline;

#[derive(Parser)]
#[command(name = "hypha", about = "Batch AI reviewer for generated MoonBit interface files")]
struct Cli {
    /// Path to configuration file
    #[arg(short, long)]
    config: Option<String>,

    /// Show detailed progress
    #[arg(long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Option<Command>,
}

#[derive(Subcommand)]
enum Command {
    /// Review interface files and write one report per file (default)
    Review(ReviewArgs),
    /// List discovered interface files
    List(ListArgs),
    /// Remove failed review reports so a rerun regenerates them
    Clean,
}

#[derive(Args)]
struct ReviewArgs {
    /// Only review files changed in git
    #[arg(long)]
    changed: bool,

    /// Specific files to review (comma-separated, relative to the root)
    #[arg(long, value_delimiter = ',')]
    files: Option<Vec<String>>,

    /// Number of concurrent reviews
    #[arg(long, default_value_t = 5)]
    concurrency: usize,

    /// Project root to scan
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

impl Default for ReviewArgs {
    fn default() -> Self {
        Self {
            changed: false,
            files: None,
            concurrency: 5,
            root: PathBuf::from("."),
        }
    }
}

#[derive(Args)]
struct ListArgs {
    /// Show absolute paths instead of root-relative ones
    #[arg(long)]
    absolute: bool,

    /// Only print the number of files
    #[arg(long)]
    count: bool,

    /// Output as a JSON array
    #[arg(long)]
    json: bool,

    /// Project root to scan
    #[arg(long, default_value = ".")]
    root: PathBuf,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // Initialize tracing; --verbose wins over RUST_LOG
    let filter = if cli.verbose {
        EnvFilter::new("debug")
    } else {
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
    };
    tracing_subscriber::registry()
        .with(filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    let config = AppConfig::load(cli.config.as_deref())?;

    match cli.command.unwrap_or(Command::Review(ReviewArgs::default())) {
        Command::Review(args) => {
            let source = if let Some(files) = args.files {
                Source::Explicit(files)
            } else if args.changed {
                Source::Changed
            } else {
                Source::All
            };
            pipeline::run_review(&config, &args.root, source, args.concurrency).await?;
        }
        Command::List(args) => {
            let items = discovery::discover(&args.root, &Source::All, &config.discovery).await?;

            if args.count {
                println!("{}", items.len());
                return Ok(());
            }

            let paths: Vec<String> = items
                .iter()
                .map(|item| {
                    if args.absolute {
                        item.path.display().to_string()
                    } else {
                        item.display.clone()
                    }
                })
                .collect();

            if args.json {
                println!("{}", serde_json::to_string_pretty(&paths)?);
            } else {
                for path in &paths {
                    println!("{path}");
                }
            }
        }
        Command::Clean => {
            let stats = clean_failed_reviews(&config.output.dir).await?;
            println!(
                "Removed {} failed review file(s), {} remaining",
                stats.removed, stats.remaining
            );
        }
    }

    Ok(())
}
