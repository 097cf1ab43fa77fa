//! Token types for the KemLang lexer.

use kem_types::Span;
use std::fmt;

/// Keywords spelled as two or three words separated by single spaces.
///
/// Order matters: the lexer tries them in this order before falling
/// back to single-word keywords and identifiers.
pub const MULTIWORD_KEYWORDS: &[(&str, TokenKind)] = &[
    ("kem bhai", TokenKind::KemBhai),
    ("aavjo bhai", TokenKind::AavjoBhai),
    ("bhai bol", TokenKind::BhaiBol),
    ("bapu tame bolo", TokenKind::BapuTameBolo),
    ("bhai chhe", TokenKind::BhaiChhe),
    ("bhai nathi", TokenKind::BhaiNathi),
    ("jya sudhi", TokenKind::JyaSudhi),
    ("tame jao", TokenKind::TameJao),
    ("aagal vado", TokenKind::AagalVado),
    ("nahi to", TokenKind::NahiTo),
];

/// A single token with its source location.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    pub kind: TokenKind,
    pub span: Span,
}

impl Token {
    pub fn new(kind: TokenKind, span: Span) -> Self {
        Self { kind, span }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum TokenKind {
    // ── Literals ──────────────────────────────────────────────
    /// Unsigned integer literal: `42`
    IntLit(i64),
    /// `"hello"`, escapes already resolved
    StringLiteral(String),
    Identifier(String),

    // ── Program & statement keywords ─────────────────────────
    /// `kem bhai` (program start)
    KemBhai,
    /// `aavjo bhai` (program end)
    AavjoBhai,
    /// `bhai bol` (print)
    BhaiBol,
    /// `bapu tame bolo` (read a line of input)
    BapuTameBolo,
    /// `aa` (declaration)
    Aa,
    /// `che` (binding)
    Che,

    // ── Control-flow keywords ────────────────────────────────
    /// `bhai chhe` (true)
    BhaiChhe,
    /// `bhai nathi` (false)
    BhaiNathi,
    /// `jo` (if)
    Jo,
    /// `nahi to` (else)
    NahiTo,
    /// `nahi`
    Nahi,
    /// `to`
    To,
    /// `farvu` (loop)
    Farvu,
    /// `jya sudhi` (while)
    JyaSudhi,
    /// `tame jao` (break)
    TameJao,
    /// `aagal vado` (continue)
    AagalVado,

    // ── Operators ────────────────────────────────────────────
    Plus,
    Minus,
    Star,
    Slash,
    Percent,
    EqEq,
    BangEq,
    Less,
    Greater,
    LessEq,
    GreaterEq,

    // ── Punctuation ──────────────────────────────────────────
    LParen,
    RParen,
    LBrace,
    RBrace,

    Newline,
    Eof,
}

impl TokenKind {
    /// Single-word keywords. Multi-word ones are matched on raw text
    /// via [`MULTIWORD_KEYWORDS`].
    pub fn from_keyword(s: &str) -> Option<TokenKind> {
        Some(match s {
            "aa" => TokenKind::Aa,
            "che" => TokenKind::Che,
            "jo" => TokenKind::Jo,
            "nahi" => TokenKind::Nahi,
            "to" => TokenKind::To,
            "farvu" => TokenKind::Farvu,
            _ => return None,
        })
    }

    /// Operators the playground scanner does not evaluate.
    pub fn is_unsupported_operator(&self) -> bool {
        matches!(
            self,
            TokenKind::Minus
                | TokenKind::Star
                | TokenKind::Slash
                | TokenKind::Percent
                | TokenKind::EqEq
                | TokenKind::BangEq
                | TokenKind::Less
                | TokenKind::Greater
                | TokenKind::LessEq
                | TokenKind::GreaterEq
        )
    }

    /// Short name used by `--trace` output.
    pub fn name(&self) -> &'static str {
        match self {
            TokenKind::IntLit(_) => "INTEGER",
            TokenKind::StringLiteral(_) => "STRING",
            TokenKind::Identifier(_) => "IDENTIFIER",
            TokenKind::KemBhai => "KEM_BHAI",
            TokenKind::AavjoBhai => "AAVJO_BHAI",
            TokenKind::BhaiBol => "BHAI_BOL",
            TokenKind::BapuTameBolo => "BAPU_TAME_BOLO",
            TokenKind::Aa => "AA",
            TokenKind::Che => "CHE",
            TokenKind::BhaiChhe => "BHAI_CHHE",
            TokenKind::BhaiNathi => "BHAI_NATHI",
            TokenKind::Jo => "JO",
            TokenKind::NahiTo => "ELSE",
            TokenKind::Nahi => "NAHI",
            TokenKind::To => "TO",
            TokenKind::Farvu => "FARVU",
            TokenKind::JyaSudhi => "JYA_SUDHI",
            TokenKind::TameJao => "TAME_JAO",
            TokenKind::AagalVado => "AAGAL_VADO",
            TokenKind::Plus => "PLUS",
            TokenKind::Minus => "MINUS",
            TokenKind::Star => "MULTIPLY",
            TokenKind::Slash => "DIVIDE",
            TokenKind::Percent => "MODULO",
            TokenKind::EqEq => "EQUAL",
            TokenKind::BangEq => "NOT_EQUAL",
            TokenKind::Less => "LESS",
            TokenKind::Greater => "GREATER",
            TokenKind::LessEq => "LESS_EQUAL",
            TokenKind::GreaterEq => "GREATER_EQUAL",
            TokenKind::LParen => "LEFT_PAREN",
            TokenKind::RParen => "RIGHT_PAREN",
            TokenKind::LBrace => "LEFT_BRACE",
            TokenKind::RBrace => "RIGHT_BRACE",
            TokenKind::Newline => "NEWLINE",
            TokenKind::Eof => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TokenKind::IntLit(n) => write!(f, "{n}"),
            TokenKind::StringLiteral(s) => write!(f, "\"{s}\""),
            TokenKind::Identifier(name) => f.write_str(name),
            TokenKind::KemBhai => f.write_str("kem bhai"),
            TokenKind::AavjoBhai => f.write_str("aavjo bhai"),
            TokenKind::BhaiBol => f.write_str("bhai bol"),
            TokenKind::BapuTameBolo => f.write_str("bapu tame bolo"),
            TokenKind::Aa => f.write_str("aa"),
            TokenKind::Che => f.write_str("che"),
            TokenKind::BhaiChhe => f.write_str("bhai chhe"),
            TokenKind::BhaiNathi => f.write_str("bhai nathi"),
            TokenKind::Jo => f.write_str("jo"),
            TokenKind::NahiTo => f.write_str("nahi to"),
            TokenKind::Nahi => f.write_str("nahi"),
            TokenKind::To => f.write_str("to"),
            TokenKind::Farvu => f.write_str("farvu"),
            TokenKind::JyaSudhi => f.write_str("jya sudhi"),
            TokenKind::TameJao => f.write_str("tame jao"),
            TokenKind::AagalVado => f.write_str("aagal vado"),
            TokenKind::Plus => f.write_str("+"),
            TokenKind::Minus => f.write_str("-"),
            TokenKind::Star => f.write_str("*"),
            TokenKind::Slash => f.write_str("/"),
            TokenKind::Percent => f.write_str("%"),
            TokenKind::EqEq => f.write_str("=="),
            TokenKind::BangEq => f.write_str("!="),
            TokenKind::Less => f.write_str("<"),
            TokenKind::Greater => f.write_str(">"),
            TokenKind::LessEq => f.write_str("<="),
            TokenKind::GreaterEq => f.write_str(">="),
            TokenKind::LParen => f.write_str("("),
            TokenKind::RParen => f.write_str(")"),
            TokenKind::LBrace => f.write_str("{"),
            TokenKind::RBrace => f.write_str("}"),
            TokenKind::Newline => f.write_str("newline"),
            TokenKind::Eof => f.write_str("end of file"),
        }
    }
}
