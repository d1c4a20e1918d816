//! A compiler front end for the JavaSST teaching language.
//!
//! JavaSST is a small Java-like language: one class per file, `int` as the
//! only value type, functions with parameters and locals, and structured
//! control flow. This crate covers the front half of a compiler for it:
//!
//! - [`scanner`]: characters → tokens, with positions for diagnostics
//! - [`parser`]: tokens → AST plus a scoped symbol table, in one pass
//! - [`dump`]: textual renderings of the parse results
//! - [`error`]: the diagnostic types shared by all stages
//!
//! # Example
//!
//! ```
//! use javasst::parser::Parser;
//!
//! let source = "class Answer { public int get() { return 42; } }";
//! let program = Parser::new("answer.sst", source)?.parse()?;
//! assert_eq!(program.class.name, "Answer");
//! # Ok::<(), javasst::error::CompileError>(())
//! ```

pub mod dump;
pub mod error;
pub mod parser;
pub mod scanner;
