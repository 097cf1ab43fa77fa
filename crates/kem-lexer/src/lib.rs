//! KemLang lexer: converts playground source text into a token stream.

pub mod lexer;
pub mod token;

pub use lexer::{tokenize, LexResult, Lexer};
pub use token::{Token, TokenKind, MULTIWORD_KEYWORDS};
