//! Lexical analysis
//!
//! Splits source text into [`token::Token`]s. The lexer is pull-based:
//! the parser requests one token at a time and the lexer in turn pulls
//! characters from a [`source::SourceStream`], which tracks positions.

pub mod lexer;
pub mod source;
pub mod token;
