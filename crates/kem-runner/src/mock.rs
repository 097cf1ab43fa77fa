//! The playground's mock program runner.
//!
//! No parsing and no evaluation: print statements are found by substring
//! search, two hard-coded variables are substituted textually, and `" + "`
//! is deleted to fake concatenation. The output is kept byte-compatible
//! with the page's mock, quirks included:
//!
//! - declarations are found anywhere in the program, before or after use;
//! - only `naam` and `number` are ever substituted;
//! - substitution ignores quoting and word boundaries, so `naam` inside
//!   `naamkaran` is replaced too;
//! - numbers are never added.

use crate::error::RunResult;
use crate::{Runner, NO_OUTPUT_MESSAGE};
use kem_types::SourceFile;
use tracing::debug;

/// Marker that starts a print statement, including its trailing space.
pub const PRINT_MARKER: &str = "bhai bol ";

/// The text variable the mock knows about, and its declaration prefix.
pub const TEXT_VARIABLE: &str = "naam";
const TEXT_DECLARATION: &str = "aa naam che \"";

/// The numeric variable the mock knows about, and its declaration prefix.
pub const NUMBER_VARIABLE: &str = "number";
const NUMBER_DECLARATION: &str = "aa number che ";

/// Substring simulator. Stateless: every run starts from the program text.
#[derive(Debug, Clone, Copy, Default)]
pub struct MockRunner;

impl MockRunner {
    pub fn new() -> Self {
        Self
    }

    /// Simulate the console output of `source`.
    pub fn simulate(&self, source: &str) -> String {
        let statements = print_statements(source);
        debug!(prints = statements.len(), "mock run");
        if statements.is_empty() {
            return NO_OUTPUT_MESSAGE.to_string();
        }

        let text_value = text_binding(source);
        let number_value = number_binding(source);
        statements
            .into_iter()
            .map(|statement| render_print(statement, text_value, number_value))
            .collect::<Vec<_>>()
            .join("\n")
    }
}

impl Runner for MockRunner {
    fn run(&self, source: &SourceFile, _input: &str) -> RunResult<String> {
        Ok(self.simulate(&source.source))
    }
}

fn is_line_terminator(c: char) -> bool {
    matches!(c, '\n' | '\r' | '\u{2028}' | '\u{2029}')
}

/// Every print statement in encounter order: the marker plus the rest of
/// its line. A line yields at most one statement, and a marker with
/// nothing after it on the line is not a statement.
pub fn print_statements(source: &str) -> Vec<&str> {
    source
        .split(is_line_terminator)
        .filter_map(|line| {
            let start = line.find(PRINT_MARKER)?;
            let statement = &line[start..];
            (statement.len() > PRINT_MARKER.len()).then_some(statement)
        })
        .collect()
}

/// Value of the first `aa naam che "<text>"` declaration with a non-empty
/// literal. The literal may run across lines.
pub fn text_binding(source: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(found) = source[from..].find(TEXT_DECLARATION) {
        let at = from + found;
        let literal = &source[at + TEXT_DECLARATION.len()..];
        match literal.find('"') {
            Some(0) => from = at + 1,
            Some(end) => return Some(&literal[..end]),
            // No closing quote anywhere after this point.
            None => return None,
        }
    }
    None
}

/// Digits of the first `aa number che <digits>` declaration.
pub fn number_binding(source: &str) -> Option<&str> {
    let mut from = 0;
    while let Some(found) = source[from..].find(NUMBER_DECLARATION) {
        let at = from + found;
        let rest = &source[at + NUMBER_DECLARATION.len()..];
        let digits = rest.bytes().take_while(u8::is_ascii_digit).count();
        if digits > 0 {
            return Some(&rest[..digits]);
        }
        from = at + 1;
    }
    None
}

/// Turn one print statement into its output line.
fn render_print(statement: &str, text_value: Option<&str>, number_value: Option<&str>) -> String {
    let argument = statement
        .strip_prefix(PRINT_MARKER)
        .unwrap_or(statement)
        .replace('"', "");

    // Both checks look at the quote-stripped argument, not at the text
    // after the first substitution.
    let mut rendered = argument.clone();
    if let Some(value) = text_value.filter(|_| argument.contains(TEXT_VARIABLE)) {
        rendered = replace_all(&rendered, TEXT_VARIABLE, value);
    }
    if let Some(value) = number_value.filter(|_| argument.contains(NUMBER_VARIABLE)) {
        rendered = replace_all(&rendered, NUMBER_VARIABLE, value);
    }
    rendered.replace(" + ", "")
}

/// Replace every `needle` in `haystack`, expanding the `$` patterns a
/// browser applies to replacement strings: `$$`, `$&`, `` $` `` and `$'`.
/// Any other `$` is copied as-is.
fn replace_all(haystack: &str, needle: &str, replacement: &str) -> String {
    let mut out = String::with_capacity(haystack.len());
    let mut last = 0;
    for (at, matched) in haystack.match_indices(needle) {
        out.push_str(&haystack[last..at]);
        let mut chars = replacement.chars().peekable();
        while let Some(c) = chars.next() {
            if c != '$' {
                out.push(c);
                continue;
            }
            match chars.peek() {
                Some('$') => out.push('$'),
                Some('&') => out.push_str(matched),
                Some('`') => out.push_str(&haystack[..at]),
                Some('\'') => out.push_str(&haystack[at + matched.len()..]),
                _ => {
                    out.push('$');
                    continue;
                }
            }
            chars.next();
        }
        last = at + matched.len();
    }
    out.push_str(&haystack[last..]);
    out
}
