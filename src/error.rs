//! Diagnostics for the three failure families of the front end.
//!
//! All errors are fatal: the first one aborts the compile and no partial
//! AST escapes. Every message carries a `file:line:column` position.

use std::fmt;

use crate::scanner::token::{Position, Token, TokenKind};

/// Any error the front end can produce.
#[derive(thiserror::Error, Debug)]
pub enum CompileError {
    #[error(transparent)]
    Lex(#[from] LexError),
    #[error(transparent)]
    Parse(#[from] ParseError),
    #[error(transparent)]
    Semantic(#[from] SemanticError),
}

/// The current character sequence matches no token rule.
#[derive(thiserror::Error, Debug)]
#[error("{position}: {kind}")]
pub struct LexError {
    pub position: Position,
    pub kind: LexErrorKind,
}

#[derive(Debug)]
pub enum LexErrorKind {
    UnexpectedCharacter(char),
    UnterminatedComment,
}

impl fmt::Display for LexErrorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            LexErrorKind::UnexpectedCharacter(c) => {
                write!(f, "unexpected character '{c}'")
            }
            LexErrorKind::UnterminatedComment => {
                write!(f, "unterminated comment")
            }
        }
    }
}

/// The current token is not in the expected set of the active production.
#[derive(thiserror::Error, Debug)]
pub enum ParseError {
    #[error("{}: expected {}, found {found}", found.position, format_expected(expected))]
    UnexpectedToken {
        found: Token,
        expected: Vec<TokenKind>,
    },
    #[error("{}: integer literal '{}' out of range", token.position, token.lexeme)]
    NumberOutOfRange { token: Token },
}

/// A name-resolution or declaration error.
#[derive(thiserror::Error, Debug)]
pub enum SemanticError {
    #[error("{position}: '{name}' is already declared in this scope")]
    DuplicateSymbol { name: String, position: Position },
    #[error("{position}: unknown symbol '{name}'")]
    UnknownSymbol { name: String, position: Position },
    #[error("{}: unknown return type, expected 'void' or 'int', found {found}", found.position)]
    UnknownReturnType { found: Token },
}

fn format_expected(expected: &[TokenKind]) -> String {
    match expected {
        [] => "nothing".to_string(),
        [kind] => kind.to_string(),
        _ => {
            let kinds: Vec<String> = expected.iter().map(|k| k.to_string()).collect();
            format!("one of {}", kinds.join(", "))
        }
    }
}
