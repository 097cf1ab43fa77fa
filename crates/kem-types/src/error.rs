use crate::{SourceFile, Span};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Maximum number of errors kept before the rest are only counted.
pub const MAX_ERRORS: usize = 20;

/// Error category, determined by error code range.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ErrorCategory {
    Syntax,
    Scope,
    Runtime,
}

impl fmt::Display for ErrorCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Syntax => f.write_str("syntax"),
            Self::Scope => f.write_str("scope"),
            Self::Runtime => f.write_str("runtime"),
        }
    }
}

/// Numeric error code (E100–E399).
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct ErrorCode(pub u16);

impl ErrorCode {
    // ── Syntax errors (E100–E199) ──
    pub const UNEXPECTED_CHARACTER: Self = Self(100);
    pub const UNSUPPORTED_OPERATOR: Self = Self(101);
    pub const UNTERMINATED_STRING: Self = Self(102);
    pub const UNEXPECTED_TOKEN: Self = Self(103);

    // ── Scope errors (E200–E299) ──
    pub const UNDEFINED_VARIABLE: Self = Self(200);
    pub const UNDECLARED_ASSIGNMENT: Self = Self(201);

    // ── Runtime errors (E300–E399) ──
    pub const ARITHMETIC_OVERFLOW: Self = Self(300);
    pub const STEP_LIMIT_EXCEEDED: Self = Self(301);

    pub fn category(self) -> ErrorCategory {
        match self.0 {
            200..=299 => ErrorCategory::Scope,
            300..=399 => ErrorCategory::Runtime,
            _ => ErrorCategory::Syntax,
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "E{}", self.0)
    }
}

/// A structured error raised while lexing or scanning a program.
///
/// The playground front ends render these; they never parse the
/// `Display` text back.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct KemError {
    pub file: String,
    pub code: ErrorCode,
    pub category: ErrorCategory,
    pub message: String,
    #[serde(flatten)]
    pub span: Span,
    /// The offending source line, for context.
    pub source_line: String,
    #[serde(skip_serializing_if = "Option::is_none", default)]
    pub suggestion: Option<String>,
}

impl KemError {
    pub fn new(
        file: impl Into<String>,
        code: ErrorCode,
        message: impl Into<String>,
        span: Span,
        source_line: impl Into<String>,
    ) -> Self {
        Self {
            file: file.into(),
            code,
            category: code.category(),
            message: message.into(),
            span,
            source_line: source_line.into(),
            suggestion: None,
        }
    }

    /// Build an error whose context line is looked up in `source`.
    pub fn at(source: &SourceFile, code: ErrorCode, message: impl Into<String>, span: Span) -> Self {
        let line = source.line(span.start_line).unwrap_or("");
        Self::new(&source.name, code, message, span, line)
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }
}

impl fmt::Display for KemError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}: {} [{}] {}",
            self.span, self.code, self.category, self.message
        )
    }
}

impl std::error::Error for KemError {}

/// Errors collected over one pass, capped at [`MAX_ERRORS`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RunErrors {
    pub errors: Vec<KemError>,
    pub total_errors: usize,
}

impl RunErrors {
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn has_errors(&self) -> bool {
        self.total_errors > 0
    }

    /// Record an error. Past the cap only the count grows.
    pub fn push_error(&mut self, error: KemError) {
        if self.errors.len() < MAX_ERRORS {
            self.errors.push(error);
        }
        self.total_errors += 1;
    }

    pub fn first(&self) -> Option<&KemError> {
        self.errors.first()
    }
}

impl fmt::Display for RunErrors {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.errors.first() {
            Some(first) if self.total_errors > 1 => {
                write!(f, "{first} (and {} more)", self.total_errors - 1)
            }
            Some(first) => write!(f, "{first}"),
            None => f.write_str("no errors"),
        }
    }
}

impl std::error::Error for RunErrors {}

/// Render an error with its source line and a caret under the column:
///
/// ```text
/// Error: undefined variable 'naam'
///  --> line 2:10
/// 2 | bhai bol naam
///              ^
/// ```
pub fn render_diagnostic(source: &SourceFile, error: &KemError) -> String {
    let line = error.span.start_line;
    let col = error.span.start_col;
    let Some(text) = source.line(line) else {
        return format!("Error: {} (line {line}:{col})", error.message);
    };

    let gutter = line.to_string().len();
    let caret_pad = " ".repeat(gutter + 3 + (col as usize).saturating_sub(1));
    let mut out = format!("Error: {}\n --> line {line}:{col}\n{line} | {text}\n{caret_pad}^", error.message);
    if let Some(suggestion) = &error.suggestion {
        out.push_str("\nhelp: ");
        out.push_str(suggestion);
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn undefined_naam() -> KemError {
        KemError::new(
            "hello.jsk",
            ErrorCode::UNDEFINED_VARIABLE,
            "undefined variable 'naam'",
            Span::new(2, 10, 2, 13),
            "bhai bol naam",
        )
    }

    #[test]
    fn test_error_code_category() {
        assert_eq!(ErrorCode::UNEXPECTED_CHARACTER.category(), ErrorCategory::Syntax);
        assert_eq!(ErrorCode::UNEXPECTED_TOKEN.category(), ErrorCategory::Syntax);
        assert_eq!(ErrorCode::UNDEFINED_VARIABLE.category(), ErrorCategory::Scope);
        assert_eq!(ErrorCode::UNDECLARED_ASSIGNMENT.category(), ErrorCategory::Scope);
        assert_eq!(ErrorCode::ARITHMETIC_OVERFLOW.category(), ErrorCategory::Runtime);
        assert_eq!(ErrorCode::STEP_LIMIT_EXCEEDED.category(), ErrorCategory::Runtime);
    }

    #[test]
    fn test_error_display() {
        assert_eq!(ErrorCode::UNDEFINED_VARIABLE.to_string(), "E200");
        assert_eq!(
            undefined_naam().to_string(),
            "2:10: E200 [scope] undefined variable 'naam'"
        );
    }

    #[test]
    fn test_error_json_shape() {
        let err = undefined_naam().with_suggestion("declare it first: aa naam che \"...\"");
        let json = serde_json::to_string(&err).unwrap();
        assert!(json.contains(r#""code":200"#));
        assert!(json.contains(r#""category":"scope""#));
        assert!(json.contains(r#""line":2"#));
        assert!(json.contains(r#""column":10"#));
        assert!(json.contains(r#""suggestion""#));

        let back: KemError = serde_json::from_str(&json).unwrap();
        assert_eq!(back, err);
    }

    #[test]
    fn test_suggestion_omitted_when_absent() {
        let json = serde_json::to_string(&undefined_naam()).unwrap();
        assert!(!json.contains("suggestion"));
    }

    #[test]
    fn test_run_errors_cap() {
        let mut errs = RunErrors::empty();
        for i in 0..25 {
            errs.push_error(KemError::new(
                "t.jsk",
                ErrorCode::UNEXPECTED_CHARACTER,
                format!("error {i}"),
                Span::point(i + 1, 1),
                "",
            ));
        }
        assert_eq!(errs.errors.len(), MAX_ERRORS);
        assert_eq!(errs.total_errors, 25);
        assert!(errs.to_string().ends_with("error 0 (and 24 more)"));
    }

    #[test]
    fn test_render_diagnostic_caret() {
        let src = SourceFile::new("hello.jsk", "kem bhai\nbhai bol naam\naavjo bhai");
        let rendered = render_diagnostic(&src, &undefined_naam());
        let lines: Vec<&str> = rendered.lines().collect();
        assert_eq!(lines[0], "Error: undefined variable 'naam'");
        assert_eq!(lines[1], " --> line 2:10");
        assert_eq!(lines[2], "2 | bhai bol naam");
        assert_eq!(lines[3], format!("{}^", " ".repeat(13)));
    }

    #[test]
    fn test_render_diagnostic_out_of_range() {
        let src = SourceFile::new("hello.jsk", "kem bhai");
        let rendered = render_diagnostic(&src, &undefined_naam());
        assert_eq!(rendered, "Error: undefined variable 'naam' (line 2:10)");
    }
}
