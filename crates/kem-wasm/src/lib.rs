//! KemLang playground runner as a WASM module for the browser.
//!
//! # Usage (JavaScript)
//!
//! ```js
//! import init, { run, run_request, examples } from 'kem-wasm';
//!
//! await init();
//!
//! run('kem bhai\naa naam che "World"\nbhai bol "Hello, " + naam + "!"\naavjo bhai', 'mock');
//! // "Hello, World!"
//!
//! JSON.parse(run_request(JSON.stringify({ code, input: 'Sanket', mode: 'scan' })));
//! // { output: "kem cho, Sanket!", error: "", exit_code: 0, success: true }
//! ```

use kem_runner::{catalog, playground, RunConfig, RunMode};
use wasm_bindgen::prelude::*;

/// Run a program and return what the output pane shows: the program's
/// output, or a single `Error: ...` line.
///
/// `mode` is `"mock"` or `"scan"`.
#[wasm_bindgen]
pub fn run(code: &str, mode: &str) -> String {
    match mode.parse::<RunMode>() {
        Ok(mode) => kem_runner::run_to_string(code, "", &RunConfig::default().with_mode(mode)),
        Err(e) => format!("Error: {e}"),
    }
}

/// Handle a JSON run request (`{"code", "input"?, "mode"?}`).
///
/// Returns a JSON `RunResponse`:
/// ```json
/// { "output": "Hello, World!", "error": "", "exit_code": 0, "success": true }
/// ```
/// or `{"error": "Code too long"}` when the request is refused.
#[wasm_bindgen]
pub fn run_request(json: &str) -> String {
    playground::handle_json(json, &RunConfig::default())
}

/// The example programs as a JSON object keyed by example key.
#[wasm_bindgen]
pub fn examples() -> String {
    catalog::catalog_json()
        .unwrap_or_else(|e| format!(r#"{{"error":"Serialization error: {}"}}"#, e))
}

/// Program shown in the editor on load and after a reset.
#[wasm_bindgen]
pub fn default_program() -> String {
    catalog::DEFAULT_PROGRAM.to_string()
}

#[wasm_bindgen]
pub fn version() -> String {
    env!("CARGO_PKG_VERSION").to_string()
}
