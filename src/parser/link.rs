//! Call-target resolution
//!
//! A call may name a function that is declared later in the class body.
//! The parser leaves such targets as `None`; this pass runs once the class
//! is complete, when every function symbol exists, and fills in the
//! remaining targets. After it succeeds every [`CallExpr::symbol`] in the
//! program is `Some`.
//!
//! [`CallExpr::symbol`]: crate::parser::ast::CallExpr::symbol

use log::debug;

use crate::error::SemanticError;
use crate::parser::ast::{CallExpr, Expr, FunctionDecl, Stmt};
use crate::parser::parse::Program;
use crate::parser::symbols::{ScopeId, SymbolKind, SymbolTable};

/// Resolve every still-open call target in the program.
pub(crate) fn resolve_calls(program: &mut Program) -> Result<(), SemanticError> {
    let Program { class, symbols } = program;

    for function in &mut class.functions {
        let scope = function_scope(symbols, function);
        for stmt in &mut function.body {
            link_stmt(symbols, scope, stmt)?;
        }
    }
    Ok(())
}

fn function_scope(symbols: &SymbolTable, function: &FunctionDecl) -> ScopeId {
    match symbols.symbol(function.symbol).kind {
        SymbolKind::Function { scope, .. } => scope,
        // The parser only ever stores function symbols here.
        ref other => unreachable!("function declaration with symbol kind {:?}", other),
    }
}

fn link_stmt(
    symbols: &SymbolTable,
    scope: ScopeId,
    stmt: &mut Stmt,
) -> Result<(), SemanticError> {
    match stmt {
        Stmt::Assign { value, .. } => link_expr(symbols, scope, value),
        Stmt::Call(call) => link_call(symbols, scope, call),
        Stmt::If {
            condition,
            then_branch,
            else_branch,
            ..
        } => {
            link_expr(symbols, scope, condition)?;
            for stmt in then_branch.iter_mut().chain(else_branch.iter_mut()) {
                link_stmt(symbols, scope, stmt)?;
            }
            Ok(())
        }
        Stmt::While { condition, body, .. } => {
            link_expr(symbols, scope, condition)?;
            for stmt in body {
                link_stmt(symbols, scope, stmt)?;
            }
            Ok(())
        }
        Stmt::Return { value, .. } => match value {
            Some(value) => link_expr(symbols, scope, value),
            None => Ok(()),
        },
    }
}

fn link_expr(
    symbols: &SymbolTable,
    scope: ScopeId,
    expr: &mut Expr,
) -> Result<(), SemanticError> {
    match expr {
        Expr::Number { .. } | Expr::Var { .. } => Ok(()),
        Expr::Call(call) => link_call(symbols, scope, call),
        Expr::Binary { left, right, .. } => {
            link_expr(symbols, scope, left)?;
            link_expr(symbols, scope, right)
        }
    }
}

fn link_call(
    symbols: &SymbolTable,
    scope: ScopeId,
    call: &mut CallExpr,
) -> Result<(), SemanticError> {
    for arg in &mut call.args {
        link_expr(symbols, scope, arg)?;
    }

    if call.symbol.is_none() {
        let target = symbols.lookup(scope, &call.name).ok_or_else(|| {
            SemanticError::UnknownSymbol {
                name: call.name.clone(),
                position: call.position.clone(),
            }
        })?;
        debug!("linked forward call to '{}' at {}", call.name, call.position);
        call.symbol = Some(target);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::CompileError;
    use crate::parser::parse::Parser;

    fn parse(source: &str) -> Result<Program, CompileError> {
        Parser::new("test.sst", source)?.parse()
    }

    #[test]
    fn test_forward_call_in_nested_statement_is_linked() {
        let program = parse(
            "class A { \
                 public void f(int a) { \
                     while (a > 0) { if (a == 1) { g(); } else { a = g(); } } } \
                 public int g() { return 0; } }",
        )
        .unwrap();

        let g = program.class.functions[1].symbol;
        match &program.class.functions[0].body[0] {
            Stmt::While { body, .. } => match &body[0] {
                Stmt::If {
                    then_branch,
                    else_branch,
                    ..
                } => {
                    match &then_branch[0] {
                        Stmt::Call(call) => assert_eq!(call.symbol, Some(g)),
                        other => panic!("expected call, got {:?}", other),
                    }
                    match &else_branch[0] {
                        Stmt::Assign { value: Expr::Call(call), .. } => {
                            assert_eq!(call.symbol, Some(g))
                        }
                        other => panic!("expected call assignment, got {:?}", other),
                    }
                }
                other => panic!("expected if statement, got {:?}", other),
            },
            other => panic!("expected while statement, got {:?}", other),
        }
    }

    #[test]
    fn test_forward_call_in_argument_is_linked() {
        let program = parse(
            "class A { \
                 public int f() { return f(g()); } \
                 public int g() { return 0; } }",
        )
        .unwrap();

        let g = program.class.functions[1].symbol;
        match &program.class.functions[0].body[0] {
            Stmt::Return { value: Some(Expr::Call(outer)), .. } => match &outer.args[0] {
                Expr::Call(inner) => assert_eq!(inner.symbol, Some(g)),
                other => panic!("expected call argument, got {:?}", other),
            },
            other => panic!("expected return of a call, got {:?}", other),
        }
    }

    #[test]
    fn test_unknown_forward_target_is_reported() {
        let err = parse("class A { public void f() { missing(); } }").unwrap_err();
        assert!(matches!(
            err,
            CompileError::Semantic(SemanticError::UnknownSymbol { ref name, .. })
                if name == "missing"
        ));
    }
}
