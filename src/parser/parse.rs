//! Main parser coordinator
//!
//! This module provides the [`Parser`] struct and its shared
//! infrastructure: token plumbing against the pull-based lexer, scope
//! bookkeeping, FIRST-set checks, and the `parse` entry point.
//!
//! # Parser Architecture
//!
//! Recursive descent, one production per method, split across modules
//! using `impl Parser` blocks:
//! - `declarations`: class, constants, variables, functions, parameters
//! - `statements`: statement sequences and the statement forms
//! - `expressions`: expression grammar and actual parameter lists
//! - `link`: post-parse resolution of forward-referenced call targets
//!
//! The parser holds exactly one current token and pulls the next one from
//! the lexer as it advances; there is no token buffer. Symbols are created
//! and inserted while the grammar is walked, so a successful parse yields
//! the finished AST and symbol table together.

use log::trace;

use crate::error::{CompileError, ParseError};
use crate::parser::ast::ClassDecl;
use crate::parser::link;
use crate::parser::symbols::{ScopeId, SymbolId, SymbolTable};
use crate::scanner::lexer::Lexer;
use crate::scanner::source::SourceStream;
use crate::scanner::token::{Token, TokenKind};

/// Result of a successful parse: the class AST plus the symbol table its
/// nodes refer into.
#[derive(Debug)]
pub struct Program {
    pub class: ClassDecl,
    pub symbols: SymbolTable,
}

/// Recursive descent parser for JavaSST.
pub struct Parser {
    lexer: Lexer,
    /// The one-token lookahead window.
    token: Token,
    pub(crate) symbols: SymbolTable,
    /// The scope declarations and lookups currently apply to. Pushed on
    /// entering a class or function body, popped on leaving it.
    pub(crate) current_scope: ScopeId,
}

impl Parser {
    /// Create a parser over the given source text. `file` is the name used
    /// in diagnostics.
    pub fn new(file: &str, source: &str) -> Result<Self, CompileError> {
        let mut lexer = Lexer::new(SourceStream::new(file, source));
        let token = lexer.next_token()?;
        let symbols = SymbolTable::new();
        let current_scope = symbols.root();
        Ok(Self {
            lexer,
            token,
            symbols,
            current_scope,
        })
    }

    /// Parse one translation unit: a single class followed by end of input.
    pub fn parse(mut self) -> Result<Program, CompileError> {
        let class = self.class()?;
        self.expect(TokenKind::Eof)?;

        let mut program = Program {
            class,
            symbols: self.symbols,
        };
        link::resolve_calls(&mut program)?;
        Ok(program)
    }

    // ===== Token plumbing =====

    /// Consume the current token and pull the next one from the lexer.
    /// Returns the consumed token.
    pub(crate) fn advance(&mut self) -> Result<Token, CompileError> {
        let next = self.lexer.next_token()?;
        trace!("consumed {}", self.token);
        Ok(std::mem::replace(&mut self.token, next))
    }

    pub(crate) fn current(&self) -> &Token {
        &self.token
    }

    pub(crate) fn check(&self, kind: TokenKind) -> bool {
        self.token.kind == kind
    }

    /// Consume the current token if it has the expected kind, otherwise
    /// fail with the expected set.
    pub(crate) fn expect(&mut self, kind: TokenKind) -> Result<Token, CompileError> {
        if self.token.kind == kind {
            self.advance()
        } else {
            Err(self.unexpected(&[kind]))
        }
    }

    pub(crate) fn expect_identifier(&mut self) -> Result<Token, CompileError> {
        self.expect(TokenKind::Ident)
    }

    /// Build the fatal mismatch error for the current token.
    pub(crate) fn unexpected(&self, expected: &[TokenKind]) -> CompileError {
        ParseError::UnexpectedToken {
            found: self.token.clone(),
            expected: expected.to_vec(),
        }
        .into()
    }

    /// Parse the integer value of a `Number` token.
    pub(crate) fn number_value(token: &Token) -> Result<i64, CompileError> {
        token.lexeme.parse().map_err(|_| {
            ParseError::NumberOutOfRange {
                token: token.clone(),
            }
            .into()
        })
    }

    // ===== FIRST sets =====

    pub(crate) fn at_type(&self) -> bool {
        self.check(TokenKind::Int)
    }

    pub(crate) fn at_statement_start(&self) -> bool {
        matches!(
            self.token.kind,
            TokenKind::Ident | TokenKind::If | TokenKind::While | TokenKind::Return
        )
    }

    pub(crate) fn at_expression_start(&self) -> bool {
        matches!(
            self.token.kind,
            TokenKind::Ident | TokenKind::Number | TokenKind::LParen
        )
    }

    // ===== Scopes =====

    /// Open a child scope and make it current. Returns the previous scope,
    /// which must be handed back to [`Parser::leave_scope`].
    pub(crate) fn enter_scope(&mut self) -> ScopeId {
        let child = self.symbols.open_child(self.current_scope);
        std::mem::replace(&mut self.current_scope, child)
    }

    /// Restore the enclosing scope on leaving a class or function body.
    pub(crate) fn leave_scope(&mut self, enclosing: ScopeId) {
        self.current_scope = enclosing;
    }

    /// Resolve an identifier token through the active scope chain. Used
    /// for variable and constant references, which never defer.
    pub(crate) fn resolve(&self, token: &Token) -> Result<SymbolId, CompileError> {
        self.symbols
            .lookup(self.current_scope, &token.lexeme)
            .ok_or_else(|| {
                crate::error::SemanticError::UnknownSymbol {
                    name: token.lexeme.clone(),
                    position: token.position.clone(),
                }
                .into()
            })
    }
}
