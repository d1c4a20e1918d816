//! Token and position types shared by the lexer and parser.

use std::fmt;
use std::sync::Arc;

/// A source position: file, 1-based line, 1-based column.
///
/// Attached to every [`Token`] and carried into every diagnostic.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Position {
    pub file: Arc<str>,
    pub line: u32,
    pub column: u32,
}

impl Position {
    pub fn new(file: Arc<str>, line: u32, column: u32) -> Self {
        Self { file, line, column }
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}:{}:{}", self.file, self.line, self.column)
    }
}

/// All token kinds produced by the lexer.
///
/// Comment delimiters are handled inside the lexer and never appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    // Punctuation
    LBrace,    // {
    RBrace,    // }
    LParen,    // (
    RParen,    // )
    Semicolon, // ;
    Comma,     // ,

    // Operators
    Plus,  // +
    Minus, // -
    Star,  // *
    Slash, // /
    Lt,    // <
    Le,    // <=
    Gt,    // >
    Ge,    // >=
    EqEq,  // ==
    Eq,    // =

    // Keywords
    Class,
    Final,
    Public,
    Void,
    Int,
    If,
    Else,
    While,
    Return,

    Ident,
    Number,
    Eof,
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            TokenKind::LBrace => "'{'",
            TokenKind::RBrace => "'}'",
            TokenKind::LParen => "'('",
            TokenKind::RParen => "')'",
            TokenKind::Semicolon => "';'",
            TokenKind::Comma => "','",
            TokenKind::Plus => "'+'",
            TokenKind::Minus => "'-'",
            TokenKind::Star => "'*'",
            TokenKind::Slash => "'/'",
            TokenKind::Lt => "'<'",
            TokenKind::Le => "'<='",
            TokenKind::Gt => "'>'",
            TokenKind::Ge => "'>='",
            TokenKind::EqEq => "'=='",
            TokenKind::Eq => "'='",
            TokenKind::Class => "'class'",
            TokenKind::Final => "'final'",
            TokenKind::Public => "'public'",
            TokenKind::Void => "'void'",
            TokenKind::Int => "'int'",
            TokenKind::If => "'if'",
            TokenKind::Else => "'else'",
            TokenKind::While => "'while'",
            TokenKind::Return => "'return'",
            TokenKind::Ident => "identifier",
            TokenKind::Number => "number",
            TokenKind::Eof => "end of file",
        };
        f.write_str(text)
    }
}

/// An immutable lexeme with its kind and source position.
///
/// The position is that of the lexeme's first character.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token {
    pub lexeme: String,
    pub kind: TokenKind,
    pub position: Position,
}

impl Token {
    pub fn new(lexeme: String, kind: TokenKind, position: Position) -> Self {
        Self {
            lexeme,
            kind,
            position,
        }
    }
}

impl fmt::Display for Token {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            TokenKind::Ident => write!(f, "identifier '{}'", self.lexeme),
            TokenKind::Number => write!(f, "number {}", self.lexeme),
            TokenKind::Eof => write!(f, "end of file"),
            _ => write!(f, "'{}'", self.lexeme),
        }
    }
}
