//! AST (Abstract Syntax Tree) definitions for JavaSST.
//!
//! Nodes are tagged unions with named fields; statement and declaration
//! sequences are plain `Vec`s. Nodes that reference a declared entity carry
//! the resolved [`SymbolId`] into the symbol table. Call targets are
//! `Option<SymbolId>` because a function may be called before its own
//! declaration has been parsed; the link pass fills the remaining `None`s
//! once the class body is complete.
//!
//! [`Visitor`] is the generic traversal entry point for downstream
//! consumers (code generator, renderers).

use std::fmt;

use crate::parser::symbols::{ReturnType, SymbolId};
use crate::scanner::token::Position;

/// The single class a translation unit declares.
#[derive(Debug, Clone)]
pub struct ClassDecl {
    pub name: String,
    pub symbol: SymbolId,
    pub constants: Vec<ConstantDecl>,
    pub fields: Vec<VarDecl>,
    pub functions: Vec<FunctionDecl>,
    pub position: Position,
}

/// `final int NAME = NUMBER;`
#[derive(Debug, Clone)]
pub struct ConstantDecl {
    pub name: String,
    pub symbol: SymbolId,
    pub value: i64,
    pub position: Position,
}

/// `int NAME;` — a class field or a function local.
#[derive(Debug, Clone)]
pub struct VarDecl {
    pub name: String,
    pub symbol: SymbolId,
    pub position: Position,
}

/// `public (void|int) NAME(params) { locals... statements... }`
#[derive(Debug, Clone)]
pub struct FunctionDecl {
    pub name: String,
    pub symbol: SymbolId,
    pub return_type: ReturnType,
    pub params: Vec<ParamDecl>,
    pub locals: Vec<VarDecl>,
    pub body: Vec<Stmt>,
    pub position: Position,
}

/// One formal parameter.
#[derive(Debug, Clone)]
pub struct ParamDecl {
    pub name: String,
    pub symbol: SymbolId,
    pub position: Position,
}

/// A function call, used both as a statement and as an expression.
///
/// `symbol` is `None` until the call target has been resolved; after a
/// successful parse it is always `Some`.
#[derive(Debug, Clone)]
pub struct CallExpr {
    pub name: String,
    pub symbol: Option<SymbolId>,
    pub args: Vec<Expr>,
    pub position: Position,
}

/// Statements.
#[derive(Debug, Clone)]
pub enum Stmt {
    Assign {
        name: String,
        symbol: SymbolId,
        value: Expr,
        position: Position,
    },
    Call(CallExpr),
    If {
        condition: Expr,
        then_branch: Vec<Stmt>,
        else_branch: Vec<Stmt>,
        position: Position,
    },
    While {
        condition: Expr,
        body: Vec<Stmt>,
        position: Position,
    },
    Return {
        value: Option<Expr>,
        position: Position,
    },
}

impl Stmt {
    pub fn position(&self) -> &Position {
        match self {
            Stmt::Assign { position, .. } => position,
            Stmt::Call(call) => &call.position,
            Stmt::If { position, .. } => position,
            Stmt::While { position, .. } => position,
            Stmt::Return { position, .. } => position,
        }
    }
}

/// Binary operators. `*` and `/` bind tighter than `+` and `-` by grammar
/// nesting; the relational operators bind weakest and do not chain.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Eq,
    Lt,
    Le,
    Gt,
    Ge,
}

impl fmt::Display for BinOp {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let text = match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Eq => "==",
            BinOp::Lt => "<",
            BinOp::Le => "<=",
            BinOp::Gt => ">",
            BinOp::Ge => ">=",
        };
        f.write_str(text)
    }
}

/// Expressions.
#[derive(Debug, Clone)]
pub enum Expr {
    Number {
        value: i64,
        position: Position,
    },
    Var {
        name: String,
        symbol: SymbolId,
        position: Position,
    },
    Call(CallExpr),
    Binary {
        op: BinOp,
        left: Box<Expr>,
        right: Box<Expr>,
        position: Position,
    },
}

impl Expr {
    pub fn position(&self) -> &Position {
        match self {
            Expr::Number { position, .. } => position,
            Expr::Var { position, .. } => position,
            Expr::Call(call) => &call.position,
            Expr::Binary { position, .. } => position,
        }
    }
}

/// Generic AST traversal. Override the hooks you care about; the default
/// methods walk the whole tree in source order.
pub trait Visitor {
    fn visit_class(&mut self, class: &ClassDecl) {
        walk_class(self, class);
    }

    fn visit_constant(&mut self, _constant: &ConstantDecl) {}

    fn visit_var(&mut self, _var: &VarDecl) {}

    fn visit_param(&mut self, _param: &ParamDecl) {}

    fn visit_function(&mut self, function: &FunctionDecl) {
        walk_function(self, function);
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        walk_stmt(self, stmt);
    }

    fn visit_expr(&mut self, expr: &Expr) {
        walk_expr(self, expr);
    }
}

pub fn walk_class<V: Visitor + ?Sized>(visitor: &mut V, class: &ClassDecl) {
    for constant in &class.constants {
        visitor.visit_constant(constant);
    }
    for field in &class.fields {
        visitor.visit_var(field);
    }
    for function in &class.functions {
        visitor.visit_function(function);
    }
}

pub fn walk_function<V: Visitor + ?Sized>(visitor: &mut V, function: &FunctionDecl) {
    for param in &function.params {
        visitor.visit_param(param);
    }
    for local in &function.locals {
        visitor.visit_var(local);
    }
    for stmt in &function.body {
        visitor.visit_stmt(stmt);
    }
}

pub fn walk_stmt<V: Visitor + ?Sized>(visitor: &mut V, stmt: &Stmt) {
    match stmt {
        Stmt::Assign { value, .. } => visitor.visit_expr(value),
        Stmt::Call(call) => {
            for arg in &call.args {
                visitor.visit_expr(arg);
            }
        }
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            visitor.visit_expr(condition);
            for stmt in then_branch {
                visitor.visit_stmt(stmt);
            }
            for stmt in else_branch {
                visitor.visit_stmt(stmt);
            }
        }
        Stmt::While {
            condition, body, ..
        } => {
            visitor.visit_expr(condition);
            for stmt in body {
                visitor.visit_stmt(stmt);
            }
        }
        Stmt::Return { value, .. } => {
            if let Some(value) = value {
                visitor.visit_expr(value);
            }
        }
    }
}

pub fn walk_expr<V: Visitor + ?Sized>(visitor: &mut V, expr: &Expr) {
    match expr {
        Expr::Number { .. } | Expr::Var { .. } => {}
        Expr::Call(call) => {
            for arg in &call.args {
                visitor.visit_expr(arg);
            }
        }
        Expr::Binary { left, right, .. } => {
            visitor.visit_expr(left);
            visitor.visit_expr(right);
        }
    }
}
