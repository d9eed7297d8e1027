//! CLI Adapter.

use std::io::{self, IsTerminal};
use std::path::PathBuf;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::app::api::{self, RenderOptions};
use crate::domain::{AppError, TemplateSource};

/// Environment variable holding the log filter.
pub const LOG_ENV_VAR: &str = "TMPLGATE_LOG";

/// Exit code for a failure envelope or the empty envelope.
const EXIT_RENDER_FAILED: i32 = 1;
/// Exit code for caller errors: contract violation, unknown engine, bad config.
const EXIT_USAGE: i32 = 2;

#[derive(Parser)]
#[command(name = "tmplgate")]
#[command(version)]
#[command(
    about = "Render templates through interchangeable engines with a uniform result envelope",
    long_about = None
)]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Render a template and print the {result, data} envelope as JSON
    #[clap(visible_alias = "r")]
    Render {
        /// Engine name (see `tmplgate engines`)
        #[arg(short, long)]
        engine: String,
        /// Template path, literal text with --from-str, or `-` for stdin
        source: String,
        /// Treat SOURCE as the template text itself
        #[arg(long)]
        from_str: bool,
        /// Return rendered text instead of a temp file path
        #[arg(long)]
        to_str: bool,
        /// YAML or JSON file with the base render context
        #[arg(short, long)]
        context: Option<PathBuf>,
        /// Context override as key=value (value parsed as YAML); repeatable
        #[arg(short, long = "set", value_name = "KEY=VALUE")]
        set: Vec<String>,
        /// Target environment identifier
        #[arg(long)]
        env: Option<String>,
        /// Path to tmplgate.toml
        #[arg(long)]
        config: Option<PathBuf>,
    },
    /// List registered engines
    #[clap(visible_alias = "ls")]
    Engines,
}

/// Entry point for the CLI.
pub fn run() {
    init_logging();
    let cli = Cli::parse();

    let result: Result<i32, AppError> = match cli.command {
        Commands::Render { engine, source, from_str, to_str, context, set, env, config } => {
            let source = if source == "-" {
                TemplateSource::from_reader(io::stdin())
            } else {
                TemplateSource::Text(source)
            };
            let options = RenderOptions {
                engine,
                source,
                from_str,
                to_str,
                context_file: context,
                overrides: set,
                env,
                config,
            };
            run_render(options)
        }
        Commands::Engines => {
            for name in api::engines() {
                println!("{name}");
            }
            Ok(0)
        }
    };

    match result {
        Ok(exit_code) => {
            if exit_code != 0 {
                std::process::exit(exit_code);
            }
        }
        Err(e) => {
            eprintln!("Error: {}", e);
            std::process::exit(EXIT_USAGE);
        }
    }
}

fn run_render(options: RenderOptions) -> Result<i32, AppError> {
    let envelope = api::render(options)?;
    println!("{}", serde_json::to_string(&envelope)?);
    Ok(if envelope.is_success() { 0 } else { EXIT_RENDER_FAILED })
}

fn init_logging() {
    let filter = EnvFilter::try_from_env(LOG_ENV_VAR).unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_ansi(io::stderr().is_terminal())
        .try_init();
}
