//! Core KemLang lexer: converts source text to a token stream.
//!
//! Features:
//! - Multi-word keywords (`bhai bol`, `bapu tame bolo`, ...) matched on raw
//!   text with a word boundary check, before plain identifiers
//! - Integer and string literals (`\n`, `\t`, `\"`, `\\` escapes)
//! - Newlines kept as statement separators
//! - Error recovery: collects up to [`kem_types::MAX_ERRORS`] errors

use kem_types::{ErrorCode, KemError, RunErrors, SourceFile, Span, MAX_ERRORS};
use tracing::trace;

use crate::token::{Token, TokenKind, MULTIWORD_KEYWORDS};

pub struct Lexer<'src> {
    source: &'src str,
    source_file: &'src SourceFile,
    /// Current byte offset into `source`.
    pos: usize,
    line: u32,
    /// Column in characters, not bytes.
    col: u32,
    errors: RunErrors,
}

/// Tokens plus any errors collected along the way.
pub struct LexResult {
    /// Always ends with [`TokenKind::Eof`].
    pub tokens: Vec<Token>,
    pub errors: RunErrors,
}

impl<'src> Lexer<'src> {
    pub fn new(source_file: &'src SourceFile) -> Self {
        Self {
            source: &source_file.source,
            source_file,
            pos: 0,
            line: 1,
            col: 1,
            errors: RunErrors::empty(),
        }
    }

    /// Lex the whole file.
    pub fn lex(mut self) -> LexResult {
        let mut tokens = Vec::new();

        loop {
            if self.errors.total_errors >= MAX_ERRORS {
                break;
            }
            let token = self.scan_token();
            let is_eof = token.kind == TokenKind::Eof;
            tokens.push(token);
            if is_eof {
                break;
            }
        }

        if tokens.last().is_none_or(|t| t.kind != TokenKind::Eof) {
            tokens.push(Token::new(TokenKind::Eof, self.current_span()));
        }

        trace!(
            file = %self.source_file.name,
            tokens = tokens.len(),
            errors = self.errors.total_errors,
            "lexed"
        );

        LexResult {
            tokens,
            errors: self.errors,
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Character-level helpers
    // ─────────────────────────────────────────────────────────────

    fn peek(&self) -> Option<u8> {
        self.source.as_bytes().get(self.pos).copied()
    }

    fn advance(&mut self) -> Option<u8> {
        let byte = self.peek()?;
        self.pos += 1;
        if byte == b'\n' {
            self.line += 1;
            self.col = 1;
        } else if byte & 0xC0 != 0x80 {
            // UTF-8 continuation bytes do not start a new column.
            self.col += 1;
        }
        Some(byte)
    }

    /// Advance past one full (possibly multi-byte) character.
    fn advance_char(&mut self) -> Option<char> {
        let ch = self.source[self.pos..].chars().next()?;
        for _ in 0..ch.len_utf8() {
            self.advance();
        }
        Some(ch)
    }

    fn current_span(&self) -> Span {
        Span::point(self.line, self.col)
    }

    fn span_from(&self, start_line: u32, start_col: u32) -> Span {
        Span::new(
            start_line,
            start_col,
            self.line,
            self.col.saturating_sub(1).max(1),
        )
    }

    fn emit_error(&mut self, code: ErrorCode, message: impl Into<String>, span: Span) {
        let err = KemError::at(self.source_file, code, message, span);
        self.errors.push_error(err);
    }

    fn skip_whitespace(&mut self) {
        while let Some(b' ' | b'\t' | b'\r') = self.peek() {
            self.advance();
        }
    }

    // ─────────────────────────────────────────────────────────────
    // Scanning
    // ─────────────────────────────────────────────────────────────

    fn scan_token(&mut self) -> Token {
        loop {
            self.skip_whitespace();

            let start_line = self.line;
            let start_col = self.col;
            let start = self.pos;
            let Some(byte) = self.peek() else {
                return Token::new(TokenKind::Eof, self.current_span());
            };

            let simple = match byte {
                b'\n' => Some(TokenKind::Newline),
                b'+' => Some(TokenKind::Plus),
                b'-' => Some(TokenKind::Minus),
                b'*' => Some(TokenKind::Star),
                b'/' => Some(TokenKind::Slash),
                b'%' => Some(TokenKind::Percent),
                b'(' => Some(TokenKind::LParen),
                b')' => Some(TokenKind::RParen),
                b'{' => Some(TokenKind::LBrace),
                b'}' => Some(TokenKind::RBrace),
                _ => None,
            };
            if let Some(kind) = simple {
                self.advance();
                return Token::new(kind, self.span_from(start_line, start_col));
            }

            match byte {
                b'=' | b'!' | b'<' | b'>' => {
                    self.advance();
                    let followed_by_eq = self.peek() == Some(b'=');
                    if followed_by_eq {
                        self.advance();
                    }
                    let kind = match (byte, followed_by_eq) {
                        (b'=', true) => TokenKind::EqEq,
                        (b'!', true) => TokenKind::BangEq,
                        (b'<', true) => TokenKind::LessEq,
                        (b'>', true) => TokenKind::GreaterEq,
                        (b'<', false) => TokenKind::Less,
                        (b'>', false) => TokenKind::Greater,
                        _ => {
                            let span = self.span_from(start_line, start_col);
                            self.emit_error(
                                ErrorCode::UNEXPECTED_CHARACTER,
                                format!("Unexpected character '{}'", byte as char),
                                span,
                            );
                            continue;
                        }
                    };
                    return Token::new(kind, self.span_from(start_line, start_col));
                }
                b'"' => {
                    self.advance();
                    return self.scan_string(start_line, start_col);
                }
                b'0'..=b'9' => return self.scan_number(start, start_line, start_col),
                b'a'..=b'z' | b'A'..=b'Z' | b'_' => {
                    return self.scan_identifier(start, start_line, start_col)
                }
                _ => {
                    let ch = self.advance_char().unwrap_or('\u{FFFD}');
                    let span = self.span_from(start_line, start_col);
                    self.emit_error(
                        ErrorCode::UNEXPECTED_CHARACTER,
                        format!("Unexpected character '{ch}'"),
                        span,
                    );
                    if self.errors.total_errors >= MAX_ERRORS {
                        return Token::new(TokenKind::Eof, self.current_span());
                    }
                }
            }
        }
    }

    fn scan_number(&mut self, start: usize, start_line: u32, start_col: u32) -> Token {
        while let Some(b'0'..=b'9') = self.peek() {
            self.advance();
        }
        let span = self.span_from(start_line, start_col);
        let source = self.source;
        let text = &source[start..self.pos];
        let value = match text.parse::<i64>() {
            Ok(v) => v,
            Err(_) => {
                self.emit_error(
                    ErrorCode::ARITHMETIC_OVERFLOW,
                    format!("Integer literal '{text}' is out of range"),
                    span,
                );
                0
            }
        };
        Token::new(TokenKind::IntLit(value), span)
    }

    fn scan_identifier(&mut self, start: usize, start_line: u32, start_col: u32) -> Token {
        let source = self.source;
        let rest = &source[start..];
        for (keyword, kind) in MULTIWORD_KEYWORDS {
            if !rest.starts_with(keyword) {
                continue;
            }
            let boundary = rest[keyword.len()..]
                .bytes()
                .next()
                .is_none_or(|b| !(b.is_ascii_alphanumeric() || b == b'_'));
            if boundary {
                for _ in 0..keyword.len() {
                    self.advance();
                }
                return Token::new(kind.clone(), self.span_from(start_line, start_col));
            }
        }

        while let Some(b) = self.peek() {
            if b.is_ascii_alphanumeric() || b == b'_' {
                self.advance();
            } else {
                break;
            }
        }
        let text = &source[start..self.pos];
        let kind = TokenKind::from_keyword(text)
            .unwrap_or_else(|| TokenKind::Identifier(text.to_string()));
        Token::new(kind, self.span_from(start_line, start_col))
    }

    /// Scan a string literal; the opening `"` is already consumed.
    fn scan_string(&mut self, start_line: u32, start_col: u32) -> Token {
        let mut buf = String::new();
        loop {
            match self.peek() {
                None | Some(b'\n') => {
                    let span = self.span_from(start_line, start_col);
                    self.emit_error(
                        ErrorCode::UNTERMINATED_STRING,
                        "Unterminated string",
                        span,
                    );
                    return Token::new(TokenKind::StringLiteral(buf), span);
                }
                Some(b'"') => {
                    self.advance();
                    return Token::new(
                        TokenKind::StringLiteral(buf),
                        self.span_from(start_line, start_col),
                    );
                }
                Some(b'\\') => {
                    if let Some(escaped) = self.scan_escape_sequence() {
                        buf.push(escaped);
                    }
                }
                Some(_) => {
                    if let Some(ch) = self.advance_char() {
                        buf.push(ch);
                    }
                }
            }
        }
    }

    /// Resolve the escape at `\`. Unknown escapes are reported and kept
    /// as the escaped character.
    fn scan_escape_sequence(&mut self) -> Option<char> {
        let start_line = self.line;
        let start_col = self.col;
        self.advance();

        match self.peek() {
            Some(b'n') => {
                self.advance();
                Some('\n')
            }
            Some(b't') => {
                self.advance();
                Some('\t')
            }
            Some(b'"') => {
                self.advance();
                Some('"')
            }
            Some(b'\\') => {
                self.advance();
                Some('\\')
            }
            // Leave the newline for `scan_string` to report.
            None | Some(b'\n') => None,
            Some(_) => {
                let ch = self.advance_char()?;
                let span = self.span_from(start_line, start_col);
                self.emit_error(
                    ErrorCode::UNEXPECTED_CHARACTER,
                    format!("Unknown escape sequence '\\{ch}'"),
                    span,
                );
                Some(ch)
            }
        }
    }
}

/// Lex `source_file` in one call.
pub fn tokenize(source_file: &SourceFile) -> LexResult {
    Lexer::new(source_file).lex()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn spans(source: &str) -> Vec<(TokenKind, u32, u32)> {
        let sf = SourceFile::new("t.jsk", source);
        tokenize(&sf)
            .tokens
            .into_iter()
            .map(|t| (t.kind, t.span.start_line, t.span.start_col))
            .collect()
    }

    #[test]
    fn test_columns_after_multiword_keyword() {
        let toks = spans("bhai bol naam");
        assert_eq!(toks[0], (TokenKind::BhaiBol, 1, 1));
        assert_eq!(toks[1], (TokenKind::Identifier("naam".into()), 1, 10));
    }

    #[test]
    fn test_columns_count_characters_not_bytes() {
        let toks = spans("\"ગુજરાતી\" x");
        assert_eq!(toks[0].0, TokenKind::StringLiteral("ગુજરાતી".into()));
        // 7 characters inside the quotes, plus both quotes and a space.
        assert_eq!(toks[1], (TokenKind::Identifier("x".into()), 1, 11));
    }

    #[test]
    fn test_newline_advances_line() {
        let toks = spans("kem bhai\naavjo bhai");
        assert_eq!(toks[0], (TokenKind::KemBhai, 1, 1));
        assert_eq!(toks[1].0, TokenKind::Newline);
        assert_eq!(toks[2], (TokenKind::AavjoBhai, 2, 1));
        assert_eq!(toks[3].0, TokenKind::Eof);
    }
}
