use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tokio::runtime::Runtime;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use listinglens::cli::commands::analyze::AnalyzeOptions;

#[derive(Parser)]
#[command(name = "listinglens")]
#[command(
    version,
    about = "AI photo quality scoring and marketability estimates for real-estate listings"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true)]
    verbose: bool,

    #[arg(long, short, global = true)]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Analyze a listing's photos
    Analyze {
        #[arg(help = "Photo URLs, in listing order")]
        urls: Vec<String>,
        #[arg(long, help = "File with one photo URL per line")]
        urls_file: Option<PathBuf>,
        #[arg(long, short = 'c', help = "Photos analyzed concurrently per wave")]
        concurrency: Option<usize>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Show the cost of analyzing a number of photos
    Cost {
        #[arg(help = "Number of photos")]
        count: usize,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Write the default global configuration file
    Init {
        #[arg(long, help = "Overwrite existing config")]
        force: bool,
    },
}

/// Set up panic handler for graceful error reporting
fn setup_panic_handler() {
    let default_hook = std::panic::take_hook();

    std::panic::set_hook(Box::new(move |panic_info| {
        let message = if let Some(s) = panic_info.payload().downcast_ref::<&str>() {
            s.to_string()
        } else if let Some(s) = panic_info.payload().downcast_ref::<String>() {
            s.clone()
        } else {
            "Unknown panic".to_string()
        };

        eprintln!("\n\x1b[1;31m━━━ PANIC ━━━\x1b[0m");
        eprintln!("\x1b[31mlistinglens encountered an unexpected error:\x1b[0m");
        eprintln!("  {}", message);

        if let Some(location) = panic_info.location() {
            eprintln!(
                "\x1b[90mLocation: {}:{}:{}\x1b[0m",
                location.file(),
                location.line(),
                location.column()
            );
        }
        eprintln!();

        // Call default hook for backtrace (if RUST_BACKTRACE=1)
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            ExitCode::FAILURE
        }
    }
}

fn run_cli() -> anyhow::Result<()> {
    let cli = Cli::parse();

    let filter = if cli.verbose {
        "debug"
    } else if cli.quiet {
        "error"
    } else {
        "info"
    };

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env().unwrap_or_else(|_| filter.into()),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    match cli.command {
        Commands::Analyze {
            urls,
            urls_file,
            concurrency,
            format,
        } => {
            let rt = Runtime::new()?;
            rt.block_on(listinglens::cli::commands::analyze::run(AnalyzeOptions {
                urls,
                urls_file,
                concurrency,
                format,
            }))?;
        }
        Commands::Cost { count, format } => {
            listinglens::cli::commands::cost::run(count, &format)?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { format } => {
                listinglens::cli::commands::config::show(&format)?;
            }
            ConfigAction::Path => {
                listinglens::cli::commands::config::path()?;
            }
            ConfigAction::Init { force } => {
                listinglens::cli::commands::config::init(force)?;
            }
        },
    }

    Ok(())
}
