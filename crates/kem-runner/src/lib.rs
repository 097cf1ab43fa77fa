//! KemLang playground runner.
//!
//! Two ways to turn a playground program into console text:
//!
//! - [`MockRunner`] reproduces the playground page's substring simulator
//!   exactly, including its two hard-coded variables.
//! - [`ScanRunner`] scans statements over declared-before-use bindings
//!   of any number and adds integers with `+`.
//!
//! [`run`] picks one from a [`RunConfig`]; [`run_to_string`] folds any
//! failure into a single `Error: ...` line the way the page shows it.
//!
//! ```
//! use kem_runner::{run_to_string, RunConfig};
//!
//! let program = "kem bhai\naa naam che \"World\"\nbhai bol \"Hello, \" + naam + \"!\"\naavjo bhai";
//! assert_eq!(run_to_string(program, "", &RunConfig::default()), "Hello, World!");
//! ```

pub mod catalog;
pub mod config;
mod env;
mod error;
pub mod mock;
pub mod playground;
pub mod scanner;
mod value;

pub use config::{RunConfig, RunMode, DEFAULT_STEP_LIMIT, MAX_IO_SIZE};
pub use env::Bindings;
pub use error::{ParseModeError, RunError, RunRejection, RunResult};
pub use mock::MockRunner;
pub use scanner::ScanRunner;
pub use value::Value;

use kem_types::SourceFile;
use tracing::debug;

/// Output of a run that printed nothing.
pub const NO_OUTPUT_MESSAGE: &str = "Program executed successfully (no output)";

/// File name used in diagnostics for editor programs.
pub const PLAYGROUND_FILE: &str = "program.jsk";

/// Something that can execute a playground program.
///
/// Runners hold configuration only; all per-run state is created inside
/// [`Runner::run`], so running the same program twice gives the same
/// output.
pub trait Runner {
    fn run(&self, source: &SourceFile, input: &str) -> RunResult<String>;
}

/// The runner selected by `config.mode`.
pub fn runner_for(config: &RunConfig) -> Box<dyn Runner> {
    match config.mode {
        RunMode::Mock => Box::new(MockRunner::new()),
        RunMode::Scan => Box::new(ScanRunner::new(config.step_limit)),
    }
}

/// Run `source` with one line of `input` per `bapu tame bolo`.
pub fn run(source: &str, input: &str, config: &RunConfig) -> RunResult<String> {
    let file = SourceFile::new(PLAYGROUND_FILE, source);
    debug!(mode = %config.mode, lines = file.line_count(), "run");
    runner_for(config).run(&file, input)
}

/// Like [`run`], but failures become `Error: <message>`.
pub fn run_to_string(source: &str, input: &str, config: &RunConfig) -> String {
    run(source, input, config).unwrap_or_else(|err| format!("Error: {err}"))
}
