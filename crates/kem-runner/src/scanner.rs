//! Binding scanner: a small statement scanner over lexer tokens.
//!
//! Understands four statement shapes, one per line:
//!
//! ```text
//! kem bhai / aavjo bhai        program markers, ignored
//! aa <name> che <expr>         declare (or redeclare) a binding
//! <name> che <expr>            update a declared binding
//! bhai bol <expr>              print
//! ```
//!
//! `<expr>` is operands joined by `+`. Operands are string and integer
//! literals, names declared on an earlier line, `bapu tame bolo` (one
//! line of run input) and parenthesised expressions. Any other line is
//! skipped without output.

use crate::env::Bindings;
use crate::error::{RunError, RunResult};
use crate::value::Value;
use crate::{Runner, NO_OUTPUT_MESSAGE};
use kem_lexer::{Lexer, Token, TokenKind};
use kem_types::{ErrorCode, KemError, SourceFile, Span};
use tracing::{debug, trace};

/// Deepest parenthesis nesting an expression may use.
pub const MAX_PAREN_DEPTH: usize = 64;

/// Runs programs through the token scanner.
#[derive(Debug, Clone, Copy)]
pub struct ScanRunner {
    step_limit: u64,
}

impl ScanRunner {
    pub fn new(step_limit: u64) -> Self {
        Self { step_limit }
    }
}

impl Runner for ScanRunner {
    fn run(&self, source: &SourceFile, input: &str) -> RunResult<String> {
        let lexed = Lexer::new(source).lex();
        if lexed.errors.has_errors() {
            return Err(RunError::Lex(lexed.errors));
        }

        let mut scan = Scan::new(source, input, self.step_limit);
        for statement in lexed.tokens.split(|t| matches!(t.kind, TokenKind::Newline | TokenKind::Eof)) {
            scan.statement(statement)?;
        }
        debug!(
            prints = scan.output.len(),
            bindings = scan.env.len(),
            steps = scan.steps,
            "scan run"
        );

        if scan.output.is_empty() {
            Ok(NO_OUTPUT_MESSAGE.to_string())
        } else {
            Ok(scan.output.join("\n"))
        }
    }
}

/// Lines of run input, handed out one per `bapu tame bolo`.
struct InputLines<'a> {
    lines: std::str::Split<'a, char>,
}

impl<'a> InputLines<'a> {
    fn new(input: &'a str) -> Self {
        Self {
            lines: input.split('\n'),
        }
    }

    /// Next line without its terminator; empty once input runs out.
    fn next_line(&mut self) -> String {
        self.lines
            .next()
            .map(|line| line.trim_end_matches('\r').to_string())
            .unwrap_or_default()
    }
}

/// State of one run. Built fresh for every program.
struct Scan<'a> {
    source: &'a SourceFile,
    env: Bindings,
    input: InputLines<'a>,
    output: Vec<String>,
    steps: u64,
    step_limit: u64,
    /// Open parentheses around the operand being read.
    depth: usize,
}

/// Read position inside one statement's tokens.
struct Cursor<'t> {
    tokens: &'t [Token],
    pos: usize,
}

impl<'t> Cursor<'t> {
    fn new(tokens: &'t [Token]) -> Self {
        Self { tokens, pos: 0 }
    }

    fn peek(&self) -> Option<&'t Token> {
        self.tokens.get(self.pos)
    }

    fn next(&mut self) -> Option<&'t Token> {
        let token = self.tokens.get(self.pos)?;
        self.pos += 1;
        Some(token)
    }

    /// Span just past the last token, for "expected ..." errors.
    fn end_span(&self) -> Span {
        self.tokens
            .last()
            .map(|t| Span::point(t.span.end_line, t.span.end_col + 1))
            .unwrap_or(Span::point(1, 1))
    }
}

impl<'a> Scan<'a> {
    fn new(source: &'a SourceFile, input: &'a str, step_limit: u64) -> Self {
        Self {
            source,
            env: Bindings::new(),
            input: InputLines::new(input),
            output: Vec::new(),
            steps: 0,
            step_limit,
            depth: 0,
        }
    }

    fn error(&self, code: ErrorCode, message: impl Into<String>, span: Span) -> RunError {
        RunError::Scan(KemError::at(self.source, code, message, span))
    }

    fn tick(&mut self, span: Span) -> RunResult<()> {
        self.steps += 1;
        if self.steps > self.step_limit {
            return Err(self.error(
                ErrorCode::STEP_LIMIT_EXCEEDED,
                format!("step limit of {} exceeded", self.step_limit),
                span,
            ));
        }
        Ok(())
    }

    // ─────────────────────────────────────────────────────────────
    // Statements
    // ─────────────────────────────────────────────────────────────

    fn statement(&mut self, tokens: &[Token]) -> RunResult<()> {
        let mut cursor = Cursor::new(tokens);
        let Some(first) = cursor.next() else {
            return Ok(());
        };

        match &first.kind {
            TokenKind::KemBhai | TokenKind::AavjoBhai => self.expect_end(&cursor),
            TokenKind::BhaiBol => {
                let value = self.expression(&mut cursor)?;
                self.expect_end(&cursor)?;
                self.output.push(value.to_string());
                Ok(())
            }
            TokenKind::Aa => {
                let name = self.expect_name(&mut cursor)?;
                self.expect_che(&mut cursor)?;
                let value = self.expression(&mut cursor)?;
                self.expect_end(&cursor)?;
                trace!(name = %name, kind = value.type_name(), "declare");
                self.env.define(&name, value);
                Ok(())
            }
            TokenKind::Identifier(name)
                if cursor.peek().is_some_and(|t| t.kind == TokenKind::Che) =>
            {
                let target = cursor.next().map_or(first.span, |che| first.span.merge(che.span));
                let value = self.expression(&mut cursor)?;
                self.expect_end(&cursor)?;
                if self.env.set(name, value) {
                    Ok(())
                } else {
                    Err(KemError::at(
                        self.source,
                        ErrorCode::UNDECLARED_ASSIGNMENT,
                        format!("cannot assign to '{name}' before it is declared"),
                        target,
                    )
                    .with_suggestion(format!("declare it first: aa {name} che ..."))
                    .into())
                }
            }
            other => {
                trace!(line = first.span.start_line, start = %other, "skipping statement");
                Ok(())
            }
        }
    }

    fn expect_name(&self, cursor: &mut Cursor<'_>) -> RunResult<String> {
        match cursor.next() {
            Some(Token {
                kind: TokenKind::Identifier(name),
                ..
            }) => Ok(name.clone()),
            Some(token) => Err(self.error(
                ErrorCode::UNEXPECTED_TOKEN,
                format!("expected a variable name after 'aa', found '{}'", token.kind),
                token.span,
            )),
            None => Err(self.error(
                ErrorCode::UNEXPECTED_TOKEN,
                "expected a variable name after 'aa'",
                cursor.end_span(),
            )),
        }
    }

    fn expect_che(&self, cursor: &mut Cursor<'_>) -> RunResult<()> {
        match cursor.next() {
            Some(token) if token.kind == TokenKind::Che => Ok(()),
            Some(token) => Err(self.error(
                ErrorCode::UNEXPECTED_TOKEN,
                format!("expected 'che', found '{}'", token.kind),
                token.span,
            )),
            None => Err(self.error(
                ErrorCode::UNEXPECTED_TOKEN,
                "expected 'che'",
                cursor.end_span(),
            )),
        }
    }

    fn expect_end(&self, cursor: &Cursor<'_>) -> RunResult<()> {
        match cursor.peek() {
            None => Ok(()),
            Some(token) => Err(self.error(
                ErrorCode::UNEXPECTED_TOKEN,
                format!("unexpected '{}' at end of statement", token.kind),
                token.span,
            )),
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Expressions
    // ─────────────────────────────────────────────────────────────

    fn expression(&mut self, cursor: &mut Cursor<'_>) -> RunResult<Value> {
        let mut acc = self.operand(cursor)?;
        while let Some(token) = cursor.peek() {
            match &token.kind {
                TokenKind::Plus => {
                    cursor.next();
                    let rhs = self.operand(cursor)?;
                    acc = self.add(acc, rhs, token.span)?;
                }
                kind if kind.is_unsupported_operator() => {
                    return Err(KemError::at(
                        self.source,
                        ErrorCode::UNSUPPORTED_OPERATOR,
                        format!("operator '{kind}' is not supported in the playground"),
                        token.span,
                    )
                    .with_suggestion("only '+' is evaluated here")
                    .into());
                }
                _ => break,
            }
        }
        Ok(acc)
    }

    fn operand(&mut self, cursor: &mut Cursor<'_>) -> RunResult<Value> {
        let Some(token) = cursor.next() else {
            return Err(self.error(
                ErrorCode::UNEXPECTED_TOKEN,
                "expected a value",
                cursor.end_span(),
            ));
        };
        self.tick(token.span)?;

        match &token.kind {
            TokenKind::StringLiteral(s) => Ok(Value::Text(s.clone())),
            TokenKind::IntLit(n) => Ok(Value::Number(*n)),
            TokenKind::BapuTameBolo => Ok(Value::Text(self.input.next_line())),
            TokenKind::Identifier(name) => self.env.get(name).cloned().ok_or_else(|| {
                KemError::at(
                    self.source,
                    ErrorCode::UNDEFINED_VARIABLE,
                    format!("undefined variable '{name}'"),
                    token.span,
                )
                .with_suggestion(format!("declare it on an earlier line: aa {name} che ..."))
                .into()
            }),
            TokenKind::LParen => {
                self.depth += 1;
                if self.depth > MAX_PAREN_DEPTH {
                    self.depth -= 1;
                    return Err(self.error(
                        ErrorCode::UNEXPECTED_TOKEN,
                        format!("maximum parenthesis nesting depth is {MAX_PAREN_DEPTH}"),
                        token.span,
                    ));
                }
                let result = self.group(cursor);
                self.depth -= 1;
                result
            }
            other => Err(self.error(
                ErrorCode::UNEXPECTED_TOKEN,
                format!("expected a value, found '{other}'"),
                token.span,
            )),
        }
    }

    /// Rest of a parenthesised expression; the `(` is already consumed.
    fn group(&mut self, cursor: &mut Cursor<'_>) -> RunResult<Value> {
        let value = self.expression(cursor)?;
        match cursor.next() {
            Some(close) if close.kind == TokenKind::RParen => Ok(value),
            Some(other) => Err(self.error(
                ErrorCode::UNEXPECTED_TOKEN,
                format!("expected ')', found '{}'", other.kind),
                other.span,
            )),
            None => Err(self.error(
                ErrorCode::UNEXPECTED_TOKEN,
                "expected ')'",
                cursor.end_span(),
            )),
        }
    }

    /// `+`: integer addition when both sides are numbers, otherwise the
    /// displayed values are concatenated.
    fn add(&self, lhs: Value, rhs: Value, span: Span) -> RunResult<Value> {
        match (lhs, rhs) {
            (Value::Number(a), Value::Number(b)) => a.checked_add(b).map(Value::Number).ok_or_else(|| {
                self.error(
                    ErrorCode::ARITHMETIC_OVERFLOW,
                    format!("{a} + {b} overflows"),
                    span,
                )
            }),
            (lhs, rhs) => Ok(Value::Text(format!("{lhs}{rhs}"))),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scan(source: &str, input: &str) -> RunResult<String> {
        let sf = SourceFile::new("t.jsk", source);
        ScanRunner::new(100).run(&sf, input)
    }

    #[test]
    fn test_input_lines_run_out() {
        let mut lines = InputLines::new("a\r\nb");
        assert_eq!(lines.next_line(), "a");
        assert_eq!(lines.next_line(), "b");
        assert_eq!(lines.next_line(), "");
        assert_eq!(lines.next_line(), "");
    }

    #[test]
    fn test_step_limit() {
        let sf = SourceFile::new("t.jsk", "bhai bol 1 + 2 + 3");
        let err = ScanRunner::new(2).run(&sf, "").unwrap_err();
        assert_eq!(err.diagnostics()[0].code, ErrorCode::STEP_LIMIT_EXCEEDED);
    }

    #[test]
    fn test_missing_operand_span_is_end_of_line() {
        let err = scan("bhai bol 1 +", "").unwrap_err();
        let diag = err.diagnostics()[0];
        assert_eq!(diag.code, ErrorCode::UNEXPECTED_TOKEN);
        assert_eq!((diag.span.start_line, diag.span.start_col), (1, 13));
    }

    #[test]
    fn test_paren_depth_limit() {
        let at_limit = format!("bhai bol {}1{}", "(".repeat(MAX_PAREN_DEPTH), ")".repeat(MAX_PAREN_DEPTH));
        assert_eq!(scan(&at_limit, "").unwrap(), "1");

        let over = MAX_PAREN_DEPTH + 1;
        let too_deep = format!("bhai bol {}1{}", "(".repeat(over), ")".repeat(over));
        let err = scan(&too_deep, "").unwrap_err();
        let diag = err.diagnostics()[0];
        assert_eq!(diag.code, ErrorCode::UNEXPECTED_TOKEN);
        // The first paren past the limit, after `bhai bol `.
        assert_eq!((diag.span.start_line, diag.span.start_col), (1, 10 + MAX_PAREN_DEPTH as u32));
    }

    #[test]
    fn test_parenthesised_addition() {
        assert_eq!(scan("bhai bol \"n=\" + (1 + 2)", "").unwrap(), "n=3");
        assert_eq!(scan("bhai bol \"n=\" + 1 + 2", "").unwrap(), "n=12");
    }
}
