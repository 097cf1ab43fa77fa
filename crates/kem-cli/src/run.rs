//! `kem-play run`.

use crate::{ModeArg, EXIT_NO_INPUT, EXIT_USAGE};
use clap::Args;
use kem_lexer::tokenize;
use kem_runner::playground::{self, RunRequest};
use kem_runner::{RunConfig, RunResult};
use kem_types::{render_diagnostic, SourceFile};
use std::fs;
use std::io::{self, Write};
use std::path::{Path, PathBuf};
use std::process::ExitCode;
use std::thread;
use std::time::Duration;
use tracing::debug;

/// Tokens shown by `--trace` before the rest are summarised.
const TRACE_TOKEN_LIMIT: usize = 20;

#[derive(Args)]
pub struct RunArgs {
    /// KemLang file to run
    pub file: PathBuf,

    /// Runner to use (defaults to the config file, then `mock`)
    #[arg(long, value_enum)]
    pub mode: Option<ModeArg>,

    /// File whose lines answer `bapu tame bolo`
    #[arg(long, value_name = "FILE")]
    pub input: Option<PathBuf>,

    /// Show tokens before running
    #[arg(long)]
    pub trace: bool,

    /// Print the playground JSON response instead of plain output
    #[arg(long)]
    pub json: bool,

    /// Pause before showing output, like the web playground
    #[arg(long, default_value_t = 0)]
    pub delay_ms: u64,
}

fn read(path: &Path, what: &str) -> Result<String, ExitCode> {
    fs::read_to_string(path).map_err(|e| {
        eprintln!("Error: cannot read {what} '{}': {e}", path.display());
        ExitCode::from(EXIT_NO_INPUT)
    })
}

pub fn run_file(args: &RunArgs, mut config: RunConfig) -> ExitCode {
    let source = match read(&args.file, "file") {
        Ok(source) => source,
        Err(code) => return code,
    };
    if args.file.extension().and_then(|ext| ext.to_str()) != Some("jsk") {
        eprintln!(
            "Warning: File '{}' doesn't have .jsk extension",
            args.file.display()
        );
    }
    let input = match &args.input {
        Some(path) => match read(path, "input") {
            Ok(input) => input,
            Err(code) => return code,
        },
        None => String::new(),
    };
    if let Some(mode) = args.mode {
        config.mode = mode.into();
    }

    let file = SourceFile::new(args.file.display().to_string(), source);
    if args.trace {
        print!("{}", trace_tokens(&file));
    }
    debug!(file = %file.name, mode = %config.mode, "running");

    let request = RunRequest::new(file.source.clone())
        .with_input(input)
        .with_mode(config.mode);
    if args.json {
        return respond_json(&request, &config);
    }

    let code = match playground::validate(&request, &config) {
        Ok(code) => code,
        Err(rejection) => {
            eprintln!("Error: {rejection}");
            return ExitCode::from(EXIT_USAGE);
        }
    };

    let result = run_after_notice(&mut io::stderr(), args.delay_ms, || {
        kem_runner::run(code, &request.input, &config)
    });

    match result {
        Ok(output) => {
            println!("{output}");
            ExitCode::SUCCESS
        }
        Err(err) => {
            let diagnostics = err.diagnostics();
            if diagnostics.is_empty() {
                eprintln!("Error: {err}");
            }
            for diagnostic in diagnostics {
                eprintln!("{}", render_diagnostic(&file, diagnostic));
            }
            ExitCode::FAILURE
        }
    }
}

/// With a delay, show `Running...` and pause before the program runs,
/// like the playground's loading indicator.
fn run_after_notice(
    notice: &mut impl Write,
    delay_ms: u64,
    run: impl FnOnce() -> RunResult<String>,
) -> RunResult<String> {
    if delay_ms > 0 {
        // Write failures are ignored.
        let _ = writeln!(notice, "Running...").and_then(|()| notice.flush());
        thread::sleep(Duration::from_millis(delay_ms));
    }
    run()
}

fn respond_json(request: &RunRequest, config: &RunConfig) -> ExitCode {
    match playground::handle(request, config) {
        Ok(response) => {
            match serde_json::to_string(&response) {
                Ok(json) => println!("{json}"),
                Err(e) => {
                    eprintln!("Error: {e}");
                    return ExitCode::FAILURE;
                }
            }
            if response.success {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            }
        }
        Err(rejection) => {
            println!("{}", serde_json::json!({ "error": rejection.to_string() }));
            ExitCode::from(EXIT_USAGE)
        }
    }
}

/// Token listing for `--trace`: kind, lexeme and position per line.
fn trace_tokens(file: &SourceFile) -> String {
    let tokens = tokenize(file).tokens;
    let mut out = String::from("Tokens:\n");
    for token in tokens.iter().take(TRACE_TOKEN_LIMIT) {
        let lexeme = format!("{:?}", token.kind.to_string());
        out.push_str(&format!(
            "  {:15} {:15} {}:{}\n",
            token.kind.name(),
            lexeme,
            token.span.start_line,
            token.span.start_col
        ));
    }
    if tokens.len() > TRACE_TOKEN_LIMIT {
        out.push_str(&format!(
            "  ... and {} more tokens\n",
            tokens.len() - TRACE_TOKEN_LIMIT
        ));
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_notice_is_shown_before_running() {
        let mut notice = Vec::new();
        let mut ran = false;
        let output = run_after_notice(&mut notice, 1, || {
            ran = true;
            Ok("done".to_string())
        });
        assert_eq!(output, Ok("done".to_string()));
        assert!(ran);
        assert_eq!(String::from_utf8(notice).unwrap(), "Running...\n");
    }

    #[test]
    fn test_no_notice_without_delay() {
        let mut notice = Vec::new();
        let output = run_after_notice(&mut notice, 0, || Ok("done".to_string()));
        assert_eq!(output, Ok("done".to_string()));
        assert!(notice.is_empty());
    }

    #[test]
    fn test_trace_tokens_listing() {
        let file = SourceFile::new("t.jsk", "bhai bol naam");
        let trace = trace_tokens(&file);
        let lines: Vec<&str> = trace.lines().collect();
        assert_eq!(lines[0], "Tokens:");
        assert!(lines[1].starts_with("  BHAI_BOL"));
        assert!(lines[1].ends_with("1:1"));
        assert!(lines[2].contains("\"naam\""));
        assert!(lines[2].ends_with("1:10"));
        assert!(lines[3].starts_with("  EOF"));
    }

    #[test]
    fn test_trace_tokens_summarises_long_programs() {
        let file = SourceFile::new("t.jsk", "bhai bol 1\n".repeat(10));
        let trace = trace_tokens(&file);
        // 10 lines of 3 tokens plus Eof.
        assert!(trace.ends_with("  ... and 11 more tokens\n"));
    }
}
