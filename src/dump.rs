//! Human-readable dumps of the parse results
//!
//! Renders the AST and the symbol table as indented text for the
//! `--dump-ast` and `--dump-symbols` command line flags. The AST dump is
//! driven by the [`Visitor`] trait, so it doubles as its reference
//! implementation.

use std::fmt::Write;

use crate::parser::ast::{
    ClassDecl, ConstantDecl, Expr, FunctionDecl, ParamDecl, Stmt, VarDecl, Visitor,
};
use crate::parser::symbols::{ScopeId, SymbolKind, SymbolTable};
use crate::parser::Program;

/// Render the program's AST as indented text.
pub fn ast(program: &Program) -> String {
    let mut printer = AstPrinter {
        out: String::new(),
        indent: 0,
    };
    printer.visit_class(&program.class);
    printer.out
}

/// Render the program's symbol table, one scope per block.
pub fn symbols(program: &Program) -> String {
    let mut out = String::new();
    scope(&mut out, &program.symbols, program.symbols.root(), 0);
    out
}

fn scope(out: &mut String, table: &SymbolTable, id: ScopeId, indent: usize) {
    for symbol_id in table.symbols_in(id) {
        let symbol = table.symbol(symbol_id);
        let pad = "  ".repeat(indent);
        match &symbol.kind {
            SymbolKind::Class { scope: inner } => {
                let _ = writeln!(out, "{pad}class {}", symbol.name);
                scope(out, table, *inner, indent + 1);
            }
            SymbolKind::Constant { value } => {
                let _ = writeln!(out, "{pad}const {} = {value}", symbol.name);
            }
            SymbolKind::Variable => {
                let _ = writeln!(out, "{pad}var {}", symbol.name);
            }
            SymbolKind::Parameter => {
                let _ = writeln!(out, "{pad}param {}", symbol.name);
            }
            SymbolKind::Function {
                return_type,
                params,
                scope: inner,
            } => {
                let names: Vec<&str> = params
                    .iter()
                    .map(|&p| table.symbol(p).name.as_str())
                    .collect();
                let _ = writeln!(
                    out,
                    "{pad}function {}({}) -> {return_type}",
                    symbol.name,
                    names.join(", ")
                );
                scope(out, table, *inner, indent + 1);
            }
        }
    }
}

struct AstPrinter {
    out: String,
    indent: usize,
}

impl AstPrinter {
    fn line(&mut self, text: &str) {
        let pad = "  ".repeat(self.indent);
        let _ = writeln!(self.out, "{pad}{text}");
    }

    fn nested(&mut self, f: impl FnOnce(&mut Self)) {
        self.indent += 1;
        f(self);
        self.indent -= 1;
    }
}

impl Visitor for AstPrinter {
    fn visit_class(&mut self, class: &ClassDecl) {
        self.line(&format!("class {}", class.name));
        self.nested(|p| crate::parser::ast::walk_class(p, class));
    }

    fn visit_constant(&mut self, constant: &ConstantDecl) {
        self.line(&format!("const {} = {}", constant.name, constant.value));
    }

    fn visit_var(&mut self, var: &VarDecl) {
        self.line(&format!("var {}", var.name));
    }

    fn visit_param(&mut self, param: &ParamDecl) {
        self.line(&format!("param {}", param.name));
    }

    fn visit_function(&mut self, function: &FunctionDecl) {
        self.line(&format!(
            "function {} -> {}",
            function.name, function.return_type
        ));
        self.nested(|p| crate::parser::ast::walk_function(p, function));
    }

    fn visit_stmt(&mut self, stmt: &Stmt) {
        match stmt {
            Stmt::Assign { name, value, .. } => {
                self.line(&format!("{name} = {}", render(value)));
            }
            Stmt::Call(call) => {
                let args: Vec<String> = call.args.iter().map(render).collect();
                self.line(&format!("call {}({})", call.name, args.join(", ")));
            }
            Stmt::If {
                condition,
                then_branch,
                else_branch,
                ..
            } => {
                self.line(&format!("if {}", render(condition)));
                self.nested(|p| {
                    for stmt in then_branch {
                        p.visit_stmt(stmt);
                    }
                });
                self.line("else");
                self.nested(|p| {
                    for stmt in else_branch {
                        p.visit_stmt(stmt);
                    }
                });
            }
            Stmt::While {
                condition, body, ..
            } => {
                self.line(&format!("while {}", render(condition)));
                self.nested(|p| {
                    for stmt in body {
                        p.visit_stmt(stmt);
                    }
                });
            }
            Stmt::Return { value, .. } => match value {
                Some(value) => self.line(&format!("return {}", render(value))),
                None => self.line("return"),
            },
        }
    }
}

/// Render an expression on one line, fully parenthesised.
fn render(expr: &Expr) -> String {
    match expr {
        Expr::Number { value, .. } => value.to_string(),
        Expr::Var { name, .. } => name.clone(),
        Expr::Call(call) => {
            let args: Vec<String> = call.args.iter().map(render).collect();
            format!("{}({})", call.name, args.join(", "))
        }
        Expr::Binary { op, left, right, .. } => {
            format!("({} {op} {})", render(left), render(right))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::Parser;

    fn parse(source: &str) -> Program {
        Parser::new("test.sst", source).unwrap().parse().unwrap()
    }

    #[test]
    fn test_ast_dump() {
        let program = parse(
            "class A { final int c = 3; int y; \
                 public int f(int x) { \
                     if (x < c) { return c; } else { return x; } } }",
        );
        assert_eq!(
            ast(&program),
            "class A\n\
             \x20 const c = 3\n\
             \x20 var y\n\
             \x20 function f -> int\n\
             \x20   param x\n\
             \x20   if (x < c)\n\
             \x20     return c\n\
             \x20   else\n\
             \x20     return x\n"
        );
    }

    #[test]
    fn test_symbol_dump() {
        let program = parse(
            "class A { final int c = 3; public void f(int x, int y) { return; } }",
        );
        assert_eq!(
            symbols(&program),
            "class A\n\
             \x20 const c = 3\n\
             \x20 function f(x, y) -> void\n\
             \x20   param x\n\
             \x20   param y\n"
        );
    }

    #[test]
    fn test_expression_rendering_is_parenthesised() {
        let program =
            parse("class A { public int f(int a) { return 1 + a * 2; } }");
        let dump = ast(&program);
        assert!(dump.contains("return (1 + (a * 2))"));
    }
}
