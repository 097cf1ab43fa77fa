//! Shared types for the KemLang playground.
//!
//! Source spans, the source file wrapper used for diagnostics, and the
//! structured error type every other crate reports through.

mod error;
mod span;

pub use error::{render_diagnostic, ErrorCategory, ErrorCode, KemError, RunErrors, MAX_ERRORS};
pub use span::{SourceFile, Span};
