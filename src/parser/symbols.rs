//! Symbols and the scoped symbol table.
//!
//! The table is an arena: scopes and symbols live in flat vectors and are
//! addressed through copyable [`ScopeId`] / [`SymbolId`] handles. A scope
//! keeps a non-owning `parent` handle instead of an owning pointer chain,
//! which lets the finished table be handed to the backend as one value
//! while AST nodes refer into it by id.
//!
//! Name resolution walks outward from the innermost scope, so a function
//! local shadows a class-level declaration of the same name. Within one
//! scope names are unique; a duplicate insert is a hard error.

use std::fmt;

use rustc_hash::FxHashMap;

use crate::error::SemanticError;
use crate::scanner::token::Position;

/// Handle to a [`Symbol`] inside a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct SymbolId(usize);

/// Handle to a scope inside a [`SymbolTable`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScopeId(usize);

/// Return type of a function. `int` is the only value type, so this is the
/// whole type system.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ReturnType {
    Void,
    Int,
}

impl fmt::Display for ReturnType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ReturnType::Void => f.write_str("void"),
            ReturnType::Int => f.write_str("int"),
        }
    }
}

/// Kind-specific data of a declared entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SymbolKind {
    /// A class; owns the class-level scope.
    Class { scope: ScopeId },
    /// A `final int` constant with its compile-time value.
    Constant { value: i64 },
    /// A class field or function local.
    Variable,
    /// A formal parameter.
    Parameter,
    /// A function; owns its body scope. `params` are in declaration order
    /// and also live inside `scope`.
    Function {
        return_type: ReturnType,
        params: Vec<SymbolId>,
        scope: ScopeId,
    },
}

/// A named, kind-tagged semantic entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Symbol {
    pub name: String,
    pub position: Position,
    pub kind: SymbolKind,
}

#[derive(Debug, Default)]
struct Scope {
    parent: Option<ScopeId>,
    /// Symbols in insertion order; the backend relies on this order.
    order: Vec<SymbolId>,
    names: FxHashMap<String, SymbolId>,
}

/// All scopes and symbols of one translation unit.
#[derive(Debug)]
pub struct SymbolTable {
    symbols: Vec<Symbol>,
    scopes: Vec<Scope>,
}

impl SymbolTable {
    /// Create a table containing only the empty root scope.
    pub fn new() -> Self {
        Self {
            symbols: Vec::new(),
            scopes: vec![Scope::default()],
        }
    }

    /// The root scope, which has no parent.
    pub fn root(&self) -> ScopeId {
        ScopeId(0)
    }

    /// Create a new scope nested inside `parent`.
    pub fn open_child(&mut self, parent: ScopeId) -> ScopeId {
        let id = ScopeId(self.scopes.len());
        self.scopes.push(Scope {
            parent: Some(parent),
            ..Scope::default()
        });
        id
    }

    /// Insert a symbol into `scope` only. Fails if the name already exists
    /// in this scope; shadowing an outer scope is allowed.
    pub fn insert(&mut self, scope: ScopeId, symbol: Symbol) -> Result<SymbolId, SemanticError> {
        if self.scopes[scope.0].names.contains_key(&symbol.name) {
            return Err(SemanticError::DuplicateSymbol {
                name: symbol.name,
                position: symbol.position,
            });
        }

        let id = SymbolId(self.symbols.len());
        self.scopes[scope.0].names.insert(symbol.name.clone(), id);
        self.scopes[scope.0].order.push(id);
        self.symbols.push(symbol);
        Ok(id)
    }

    /// Resolve `name` starting at `scope` and walking outward; returns the
    /// innermost match.
    pub fn lookup(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        let mut current = Some(scope);
        while let Some(id) = current {
            let scope = &self.scopes[id.0];
            if let Some(&symbol) = scope.names.get(name) {
                return Some(symbol);
            }
            current = scope.parent;
        }
        None
    }

    /// Resolve `name` in `scope` alone, without walking outward.
    pub fn lookup_local(&self, scope: ScopeId, name: &str) -> Option<SymbolId> {
        self.scopes[scope.0].names.get(name).copied()
    }

    pub fn symbol(&self, id: SymbolId) -> &Symbol {
        &self.symbols[id.0]
    }

    /// All symbols of `scope` in insertion order.
    pub fn symbols_in(&self, scope: ScopeId) -> impl Iterator<Item = SymbolId> + '_ {
        self.scopes[scope.0].order.iter().copied()
    }

    /// The functions declared in `scope`, in declaration order.
    pub fn functions(&self, scope: ScopeId) -> Vec<SymbolId> {
        self.filter_kind(scope, |kind| matches!(kind, SymbolKind::Function { .. }))
    }

    /// The variables declared in `scope`, in declaration order.
    pub fn variables(&self, scope: ScopeId) -> Vec<SymbolId> {
        self.filter_kind(scope, |kind| matches!(kind, SymbolKind::Variable))
    }

    /// The constants declared in `scope`, in declaration order.
    pub fn constants(&self, scope: ScopeId) -> Vec<SymbolId> {
        self.filter_kind(scope, |kind| matches!(kind, SymbolKind::Constant { .. }))
    }

    /// The parameters declared in `scope`, in declaration order.
    pub fn parameters(&self, scope: ScopeId) -> Vec<SymbolId> {
        self.filter_kind(scope, |kind| matches!(kind, SymbolKind::Parameter))
    }

    fn filter_kind(&self, scope: ScopeId, keep: impl Fn(&SymbolKind) -> bool) -> Vec<SymbolId> {
        self.symbols_in(scope)
            .filter(|&id| keep(&self.symbol(id).kind))
            .collect()
    }
}

impl Default for SymbolTable {
    fn default() -> Self {
        Self::new()
    }
}
