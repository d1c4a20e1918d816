//! Statement parsing
//!
//! The statement forms: assignment, procedure call, `if`/`else`, `while`
//! and `return`. Branches and loop bodies are always braced and `else` is
//! mandatory, so statement nesting is never ambiguous.
//!
//! Assignment and call both start with an identifier; the token after it
//! decides which production applies. Assignment targets resolve
//! immediately, call targets may stay unresolved until the link pass.

use crate::error::CompileError;
use crate::parser::ast::{CallExpr, Stmt};
use crate::parser::parse::Parser;
use crate::scanner::token::TokenKind;

impl Parser {
    /// One or more statements. A sequence must not be empty, so the first
    /// statement is parsed unconditionally; a token that cannot start a
    /// statement fails there with the statement FIRST set.
    pub(crate) fn statement_sequence(&mut self) -> Result<Vec<Stmt>, CompileError> {
        let mut statements = vec![self.statement()?];
        while self.at_statement_start() {
            statements.push(self.statement()?);
        }
        Ok(statements)
    }

    fn statement(&mut self) -> Result<Stmt, CompileError> {
        match self.current().kind {
            TokenKind::Ident => self.assignment_or_call(),
            TokenKind::If => self.if_statement(),
            TokenKind::While => self.while_statement(),
            TokenKind::Return => self.return_statement(),
            _ => Err(self.unexpected(&[
                TokenKind::Ident,
                TokenKind::If,
                TokenKind::While,
                TokenKind::Return,
            ])),
        }
    }

    /// `IDENT = expression ;` or `IDENT ( args ) ;`
    fn assignment_or_call(&mut self) -> Result<Stmt, CompileError> {
        let name = self.expect_identifier()?;

        match self.current().kind {
            TokenKind::Eq => {
                self.advance()?;
                let value = self.expression()?;
                self.expect(TokenKind::Semicolon)?;

                let symbol = self.resolve(&name)?;
                Ok(Stmt::Assign {
                    name: name.lexeme,
                    symbol,
                    value,
                    position: name.position,
                })
            }
            TokenKind::LParen => {
                let args = self.actual_parameters()?;
                self.expect(TokenKind::Semicolon)?;

                // The callee may be declared further down the class body.
                let symbol = self.symbols.lookup(self.current_scope, &name.lexeme);
                Ok(Stmt::Call(CallExpr {
                    name: name.lexeme,
                    symbol,
                    args,
                    position: name.position,
                }))
            }
            _ => Err(self.unexpected(&[TokenKind::Eq, TokenKind::LParen])),
        }
    }

    /// `if ( expression ) { seq } else { seq }`
    fn if_statement(&mut self) -> Result<Stmt, CompileError> {
        let keyword = self.expect(TokenKind::If)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.expression()?;
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::LBrace)?;
        let then_branch = self.statement_sequence()?;
        self.expect(TokenKind::RBrace)?;

        self.expect(TokenKind::Else)?;
        self.expect(TokenKind::LBrace)?;
        let else_branch = self.statement_sequence()?;
        self.expect(TokenKind::RBrace)?;

        Ok(Stmt::If {
            condition,
            then_branch,
            else_branch,
            position: keyword.position,
        })
    }

    /// `while ( expression ) { seq }`
    fn while_statement(&mut self) -> Result<Stmt, CompileError> {
        let keyword = self.expect(TokenKind::While)?;
        self.expect(TokenKind::LParen)?;
        let condition = self.expression()?;
        self.expect(TokenKind::RParen)?;

        self.expect(TokenKind::LBrace)?;
        let body = self.statement_sequence()?;
        self.expect(TokenKind::RBrace)?;

        Ok(Stmt::While {
            condition,
            body,
            position: keyword.position,
        })
    }

    /// `return ;` or `return expression ;`
    fn return_statement(&mut self) -> Result<Stmt, CompileError> {
        let keyword = self.expect(TokenKind::Return)?;
        let value = if self.at_expression_start() {
            Some(self.expression()?)
        } else {
            None
        };
        self.expect(TokenKind::Semicolon)?;

        Ok(Stmt::Return {
            value,
            position: keyword.position,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::parser::parse::Program;

    fn parse(source: &str) -> Result<Program, CompileError> {
        Parser::new("test.sst", source)?.parse()
    }

    fn body(program: &Program) -> &[Stmt] {
        &program.class.functions[0].body
    }

    #[test]
    fn test_if_requires_else() {
        let err =
            parse("class A { public void f(int a) { if (a < 1) { return; } } }")
                .unwrap_err();
        assert!(matches!(
            err,
            CompileError::Parse(ParseError::UnexpectedToken { ref expected, .. })
                if *expected == [TokenKind::Else]
        ));
    }

    #[test]
    fn test_if_else_keeps_both_branches() {
        let program = parse(
            "class A { public int f(int a) { \
                 if (a < 1) { return 0; } else { return a; } } }",
        )
        .unwrap();
        match &body(&program)[0] {
            Stmt::If {
                then_branch,
                else_branch,
                ..
            } => {
                assert_eq!(then_branch.len(), 1);
                assert_eq!(else_branch.len(), 1);
            }
            other => panic!("expected if statement, got {:?}", other),
        }
    }

    #[test]
    fn test_while_loop() {
        let program = parse(
            "class A { public int f(int n) { \
                 int s; s = 0; \
                 while (n > 0) { s = s + n; n = n - 1; } \
                 return s; } }",
        )
        .unwrap();
        match &body(&program)[1] {
            Stmt::While { body, .. } => assert_eq!(body.len(), 2),
            other => panic!("expected while statement, got {:?}", other),
        }
    }

    #[test]
    fn test_bare_and_valued_return() {
        let program = parse(
            "class A { public void f() { return; } public int g() { return 1; } }",
        )
        .unwrap();
        assert!(matches!(
            program.class.functions[0].body[0],
            Stmt::Return { value: None, .. }
        ));
        assert!(matches!(
            program.class.functions[1].body[0],
            Stmt::Return { value: Some(_), .. }
        ));
    }

    #[test]
    fn test_call_statement_keeps_arguments() {
        let program = parse(
            "class A { public void f(int a, int b) { f(1, a + b); } }",
        )
        .unwrap();
        match &body(&program)[0] {
            Stmt::Call(call) => {
                assert_eq!(call.name, "f");
                assert_eq!(call.args.len(), 2);
                assert!(call.symbol.is_some());
            }
            other => panic!("expected call statement, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_function_body_is_rejected() {
        let err = parse("class A { public void f() { } }").unwrap_err();
        assert!(matches!(
            err,
            CompileError::Parse(ParseError::UnexpectedToken { ref found, ref expected })
                if found.kind == TokenKind::RBrace
                    && *expected
                        == [
                            TokenKind::Ident,
                            TokenKind::If,
                            TokenKind::While,
                            TokenKind::Return
                        ]
        ));
    }

    #[test]
    fn test_empty_if_branches_are_rejected() {
        let then_empty =
            parse("class A { public void f(int a) { if (a < 1) { } else { return; } } }");
        assert!(then_empty.is_err());

        let else_empty =
            parse("class A { public void f(int a) { if (a < 1) { return; } else { } } }");
        assert!(else_empty.is_err());
    }

    #[test]
    fn test_empty_while_body_is_rejected() {
        let err =
            parse("class A { public void f(int a) { while (a > 0) { } return; } }")
                .unwrap_err();
        assert!(matches!(
            err,
            CompileError::Parse(ParseError::UnexpectedToken { ref found, .. })
                if found.kind == TokenKind::RBrace
        ));
    }

    #[test]
    fn test_identifier_without_assign_or_call_is_rejected() {
        let err = parse("class A { public void f(int a) { a; } }").unwrap_err();
        assert!(matches!(
            err,
            CompileError::Parse(ParseError::UnexpectedToken { ref expected, .. })
                if *expected == [TokenKind::Eq, TokenKind::LParen]
        ));
    }

    #[test]
    fn test_missing_semicolon_after_assignment() {
        let err = parse("class A { public void f(int a) { a = 1 } }").unwrap_err();
        assert!(matches!(
            err,
            CompileError::Parse(ParseError::UnexpectedToken { ref expected, .. })
                if *expected == [TokenKind::Semicolon]
        ));
    }
}
