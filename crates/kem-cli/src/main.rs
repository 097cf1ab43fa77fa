//! `kem-play`: run KemLang playground programs from the terminal.

mod run;

use clap::{Parser, Subcommand, ValueEnum};
use kem_runner::{catalog, RunConfig, RunMode};
use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;
use tracing_subscriber::EnvFilter;

/// Exit code when an input file cannot be read.
pub const EXIT_NO_INPUT: u8 = 66;
/// Exit code for a refused request or a bad config file.
pub const EXIT_USAGE: u8 = 2;

#[derive(Parser)]
#[command(name = "kem-play", version)]
#[command(about = "Run KemLang playground programs", long_about = None)]
struct Cli {
    /// JSON run config (`mode`, `step_limit`, `max_io_size`)
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Run a KemLang file
    Run(run::RunArgs),
    /// List the playground's example programs
    Examples {
        /// Print the catalog as JSON
        #[arg(long)]
        json: bool,
        /// Print the code of one example
        #[arg(long, value_name = "KEY")]
        show: Option<String>,
    },
    /// Print the version
    Version,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum ModeArg {
    Mock,
    Scan,
}

impl From<ModeArg> for RunMode {
    fn from(mode: ModeArg) -> Self {
        match mode {
            ModeArg::Mock => RunMode::Mock,
            ModeArg::Scan => RunMode::Scan,
        }
    }
}

fn init_logging() {
    let filter = EnvFilter::try_from_env("KEM_LOG").unwrap_or_else(|_| EnvFilter::new("warn"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn load_config(path: Option<&PathBuf>) -> Result<RunConfig, String> {
    let Some(path) = path else {
        return Ok(RunConfig::default());
    };
    let text = fs::read_to_string(path)
        .map_err(|e| format!("cannot read config '{}': {e}", path.display()))?;
    RunConfig::from_json(&text).map_err(|e| format!("invalid config '{}': {e}", path.display()))
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    init_logging();

    let config = match load_config(cli.config.as_ref()) {
        Ok(config) => config,
        Err(message) => {
            eprintln!("Error: {message}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    match cli.command {
        Commands::Run(args) => run::run_file(&args, config),
        Commands::Examples { json, show } => list_examples(json, show.as_deref()),
        Commands::Version => {
            println!("kem-play {}", env!("CARGO_PKG_VERSION"));
            ExitCode::SUCCESS
        }
    }
}

fn list_examples(json: bool, show: Option<&str>) -> ExitCode {
    if let Some(key) = show {
        return match catalog::find(key) {
            Some(example) => {
                println!("{}", example.code);
                ExitCode::SUCCESS
            }
            None => {
                eprintln!("Error: no example named '{key}'");
                ExitCode::from(EXIT_USAGE)
            }
        };
    }

    if json {
        return match catalog::catalog_json() {
            Ok(text) => {
                println!("{text}");
                ExitCode::SUCCESS
            }
            Err(e) => {
                eprintln!("Error: {e}");
                ExitCode::FAILURE
            }
        };
    }

    for example in catalog::EXAMPLES {
        println!("{:<10} {}", example.key, example.name);
    }
    ExitCode::SUCCESS
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_cli_parses_run() {
        let cli = Cli::try_parse_from([
            "kem-play", "run", "hello.jsk", "--mode", "scan", "--trace", "--delay-ms", "10",
        ])
        .unwrap();
        match cli.command {
            Commands::Run(args) => {
                assert_eq!(args.file, PathBuf::from("hello.jsk"));
                assert_eq!(args.mode, Some(ModeArg::Scan));
                assert!(args.trace);
                assert_eq!(args.delay_ms, 10);
            }
            _ => panic!("expected run"),
        }
    }

    #[test]
    fn test_cli_global_config_after_subcommand() {
        let cli = Cli::try_parse_from(["kem-play", "examples", "--config", "kem.json"]).unwrap();
        assert_eq!(cli.config, Some(PathBuf::from("kem.json")));
    }

    #[test]
    fn test_cli_rejects_unknown_mode() {
        assert!(Cli::try_parse_from(["kem-play", "run", "a.jsk", "--mode", "eval"]).is_err());
    }

    #[test]
    fn test_missing_config_file() {
        let err = load_config(Some(&PathBuf::from("/nonexistent/kem.json"))).unwrap_err();
        assert!(err.starts_with("cannot read config"));
    }

    #[test]
    fn test_no_config_is_default() {
        assert_eq!(load_config(None), Ok(RunConfig::default()));
    }
}
