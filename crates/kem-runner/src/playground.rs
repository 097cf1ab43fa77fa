//! Request/response envelope of the playground's run endpoint.
//!
//! Validates sizes before running, turns runner errors into an
//! `Error:`-prefixed message, and truncates oversized output.

use crate::config::{RunConfig, RunMode};
use crate::error::RunRejection;
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Exit code reported for a successful run.
pub const EXIT_OK: i32 = 0;
/// Exit code reported when the runner fails.
pub const EXIT_RUN_FAILED: i32 = 1;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    /// `None` when the field is missing; an empty program is allowed.
    #[serde(default)]
    pub code: Option<String>,
    #[serde(default)]
    pub input: String,
    /// Overrides the configured mode for this request.
    #[serde(default)]
    pub mode: Option<RunMode>,
}

impl RunRequest {
    pub fn new(code: impl Into<String>) -> Self {
        Self {
            code: Some(code.into()),
            ..Self::default()
        }
    }

    pub fn with_input(mut self, input: impl Into<String>) -> Self {
        self.input = input.into();
        self
    }

    pub fn with_mode(mut self, mode: RunMode) -> Self {
        self.mode = Some(mode);
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunResponse {
    pub output: String,
    pub error: String,
    pub exit_code: i32,
    pub success: bool,
}

/// Check a request against the size limits and return its program text.
pub fn validate<'r>(request: &'r RunRequest, config: &RunConfig) -> Result<&'r str, RunRejection> {
    let code = request.code.as_deref().ok_or(RunRejection::NoCode)?;
    if code.chars().count() > config.max_io_size {
        return Err(RunRejection::CodeTooLong);
    }
    if request.input.chars().count() > config.max_io_size {
        return Err(RunRejection::InputTooLong);
    }
    Ok(code)
}

/// Run a request. Runner failures are part of the response; only
/// requests that fail validation are rejected.
pub fn handle(request: &RunRequest, config: &RunConfig) -> Result<RunResponse, RunRejection> {
    let code = validate(request, config)?;
    let config = RunConfig {
        mode: request.mode.unwrap_or(config.mode),
        ..config.clone()
    };
    debug!(mode = %config.mode, code_len = code.len(), "playground run");

    let response = match crate::run(code, &request.input, &config) {
        Ok(output) => RunResponse {
            output: truncate(&output, config.max_io_size, "output"),
            error: String::new(),
            exit_code: EXIT_OK,
            success: true,
        },
        Err(err) => RunResponse {
            output: String::new(),
            error: truncate(&format!("Error: {err}"), config.max_io_size, "error"),
            exit_code: EXIT_RUN_FAILED,
            success: false,
        },
    };
    Ok(response)
}

/// JSON in, JSON out. A rejection becomes `{"error": "<reason>"}`;
/// a body that is not a JSON request counts as missing code.
pub fn handle_json(body: &str, config: &RunConfig) -> String {
    let outcome = serde_json::from_str::<RunRequest>(body)
        .map_err(|_| RunRejection::NoCode)
        .and_then(|request| handle(&request, config));
    let json = match outcome {
        Ok(response) => serde_json::to_value(response),
        Err(rejection) => Ok(serde_json::json!({ "error": rejection.to_string() })),
    };
    json.map(|value| value.to_string()).unwrap_or_else(|e| {
        serde_json::json!({ "error": format!("Serialization error: {e}") }).to_string()
    })
}

/// Cut `text` to `limit` characters, marking the cut with
/// `\n... (<what> truncated)`.
pub fn truncate(text: &str, limit: usize, what: &str) -> String {
    match text.char_indices().nth(limit) {
        Some((cut, _)) => format!("{}\n... ({what} truncated)", &text[..cut]),
        None => text.to_string(),
    }
}
