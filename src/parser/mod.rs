//! Parsing, symbol construction and AST definitions
//!
//! The parser is recursive descent with one token of lookahead. It builds
//! the AST and the scoped symbol table in a single pass over the token
//! stream; a separate link pass afterwards resolves calls to functions
//! declared later in the class body.

pub mod ast;
mod declarations;
mod expressions;
mod link;
mod parse;
mod statements;
pub mod symbols;

pub use parse::{Parser, Program};
