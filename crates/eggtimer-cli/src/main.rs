use clap::{CommandFactory, Parser, Subcommand};
use tracing_subscriber::EnvFilter;

mod commands;
mod host;
mod input;
mod render;

#[derive(Parser)]
#[command(name = "eggtimer", version, about = "Egg boiling countdown timer")]
struct Cli {
    /// Log debug output to stderr (overridden by EGGTIMER_LOG)
    #[arg(short, long, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// List the doneness presets
    Presets,
    /// Run an interactive countdown
    Run {
        /// Preset id to start on (defaults to timer.default_preset)
        #[arg(short, long)]
        preset: Option<String>,
        /// Start counting down immediately
        #[arg(short, long)]
        start: bool,
        /// Print each timer event as a JSON line instead of the status display
        #[arg(long)]
        json: bool,
    },
    /// Configuration management
    Config {
        #[command(subcommand)]
        action: commands::config::ConfigAction,
    },
    /// Print shell completions
    Completions {
        #[arg(value_enum)]
        shell: clap_complete::Shell,
    },
}

fn init_tracing(verbose: bool) {
    let fallback = if verbose { "debug" } else { "warn" };
    let filter =
        EnvFilter::try_from_env("EGGTIMER_LOG").unwrap_or_else(|_| EnvFilter::new(fallback));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() {
    let cli = Cli::parse();
    init_tracing(cli.verbose);

    let result = match cli.command {
        Commands::Presets => commands::presets::run(),
        Commands::Run {
            preset,
            start,
            json,
        } => {
            let output = if json {
                commands::run::Output::Json
            } else {
                commands::run::Output::Terminal
            };
            commands::run::run(preset, start, output)
        }
        Commands::Config { action } => commands::config::run(action),
        Commands::Completions { shell } => {
            clap_complete::generate(shell, &mut Cli::command(), "eggtimer", &mut std::io::stdout());
            Ok(())
        }
    };

    if let Err(e) = result {
        eprintln!("error: {e}");
        std::process::exit(1);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cli_definition_is_valid() {
        Cli::command().debug_assert();
    }

    #[test]
    fn run_accepts_preset_and_start() {
        let cli = Cli::try_parse_from(["eggtimer", "run", "--preset", "hard-8", "-s"]).unwrap();
        match cli.command {
            Commands::Run {
                preset,
                start,
                json,
            } => {
                assert_eq!(preset.as_deref(), Some("hard-8"));
                assert!(start);
                assert!(!json);
            }
            _ => panic!("Expected Run"),
        }
    }

    #[test]
    fn run_accepts_json_flag() {
        let cli = Cli::try_parse_from(["eggtimer", "run", "--json"]).unwrap();
        match cli.command {
            Commands::Run {
                preset,
                start,
                json,
            } => {
                assert!(preset.is_none());
                assert!(!start);
                assert!(json);
            }
            _ => panic!("Expected Run"),
        }
    }
}
