use clap::{Parser, Subcommand};
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use studybuddy::cli::commands::generate::GenerateOptions;
use studybuddy::StudyError;
use studybuddy::config::ConfigOverrides;

#[derive(Parser)]
#[command(name = "studybuddy")]
#[command(
    version,
    about = "Turn study notes into simplified text, summaries, quizzes and flashcards"
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    #[arg(long, global = true, help = "Show debug logs")]
    verbose: bool,

    #[arg(long, short, global = true, help = "Only show errors")]
    quiet: bool,
}

#[derive(Subcommand)]
enum Commands {
    /// Generate study aids from text
    Generate {
        #[arg(long, short, conflicts_with = "text", help = "Read study text from a file")]
        input: Option<PathBuf>,
        #[arg(long, short, help = "Study text (default: read from stdin)")]
        text: Option<String>,
        #[command(flatten)]
        provider: ProviderArgs,
        #[arg(long, help = "Word budget per chunk")]
        max_words: Option<usize>,
        #[arg(long, help = "Maximum number of flashcards")]
        flashcards: Option<usize>,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            value_parser = ["text", "json"],
            help = "Output format: text, json"
        )]
        format: String,
        #[arg(long, help = "Print answers inline instead of prompting")]
        reveal: bool,
    },

    /// Check that the configured providers are reachable
    Check {
        #[command(flatten)]
        provider: ProviderArgs,
    },

    /// Manage configuration
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },
}

#[derive(clap::Args)]
struct ProviderArgs {
    #[arg(long, help = "LLM provider (ollama, openai)")]
    provider: Option<String>,
    #[arg(long, help = "Model to use for both transforms")]
    model: Option<String>,
}

impl ProviderArgs {
    fn into_overrides(self) -> ConfigOverrides {
        ConfigOverrides {
            provider: self.provider,
            model: self.model,
            ..Default::default()
        }
    }
}

#[derive(Subcommand)]
enum ConfigAction {
    /// Show current configuration (merged from all sources)
    Show {
        #[arg(short = 'g', long, help = "Show global config file only")]
        global: bool,
        #[arg(
            short = 'f',
            long,
            default_value = "text",
            value_parser = ["text", "json"],
            help = "Output format: text, json"
        )]
        format: String,
    },
    /// Show configuration file paths
    Path,
    /// Initialize configuration
    Init {
        #[arg(long, short, help = "Initialize global config")]
        global: bool,
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
        eprintln!("\x1b[31mStudyBuddy encountered an unexpected error:\x1b[0m");
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

        // Default hook prints the backtrace when RUST_BACKTRACE=1
        default_hook(panic_info);
    }));
}

fn main() -> ExitCode {
    setup_panic_handler();

    match run_cli() {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("\x1b[31mError:\x1b[0m {}", e);
            if let Some(hint) = e
                .downcast_ref::<StudyError>()
                .and_then(StudyError::category)
                .and_then(|category| category.hint())
            {
                eprintln!("\x1b[90mHint: {}\x1b[0m", hint);
            }
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

    // One pipeline run per invocation; the HTTP client is the only async part
    let rt = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;

    match cli.command {
        Commands::Generate {
            input,
            text,
            provider,
            max_words,
            flashcards,
            format,
            reveal,
        } => {
            let overrides = ConfigOverrides {
                max_chunk_words: max_words,
                num_flashcards: flashcards,
                ..provider.into_overrides()
            };

            rt.block_on(studybuddy::cli::commands::generate::run(GenerateOptions {
                input,
                text,
                overrides,
                json: format == "json",
                reveal,
            }))?;
        }
        Commands::Check { provider } => {
            rt.block_on(studybuddy::cli::commands::check::run(
                provider.into_overrides(),
            ))?;
        }
        Commands::Config { action } => match action {
            ConfigAction::Show { global, format } => {
                studybuddy::cli::commands::config::show(global, &format)?;
            }
            ConfigAction::Path => {
                studybuddy::cli::commands::config::path()?;
            }
            ConfigAction::Init { global, force } => {
                studybuddy::cli::commands::config::init(global, force)?;
            }
        },
    }

    Ok(())
}
