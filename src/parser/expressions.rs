//! Expression parsing
//!
//! Precedence is encoded by grammar nesting, not climbing: an expression
//! is a simple expression with at most one relational comparison, a simple
//! expression is a chain of `+`/`-` over terms, a term is a chain of
//! `*`/`/` over factors. Chains fold left, so `1 - 2 + 3` is
//! `(1 - 2) + 3`. Relational operators do not chain at all; `a < b < c`
//! is a syntax error at the second `<`.

use crate::error::CompileError;
use crate::parser::ast::{BinOp, CallExpr, Expr};
use crate::parser::parse::Parser;
use crate::scanner::token::TokenKind;

fn relational_op(kind: TokenKind) -> Option<BinOp> {
    match kind {
        TokenKind::EqEq => Some(BinOp::Eq),
        TokenKind::Lt => Some(BinOp::Lt),
        TokenKind::Le => Some(BinOp::Le),
        TokenKind::Gt => Some(BinOp::Gt),
        TokenKind::Ge => Some(BinOp::Ge),
        _ => None,
    }
}

impl Parser {
    /// `simple_expression [relop simple_expression]`
    pub(crate) fn expression(&mut self) -> Result<Expr, CompileError> {
        let left = self.simple_expression()?;

        if let Some(op) = relational_op(self.current().kind) {
            let operator = self.advance()?;
            let right = self.simple_expression()?;
            return Ok(Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position: operator.position,
            });
        }

        Ok(left)
    }

    /// `term {(+|-) term}`
    fn simple_expression(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.term()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Plus => BinOp::Add,
                TokenKind::Minus => BinOp::Sub,
                _ => break,
            };
            let operator = self.advance()?;
            let right = self.term()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position: operator.position,
            };
        }

        Ok(left)
    }

    /// `factor {(*|/) factor}`
    fn term(&mut self) -> Result<Expr, CompileError> {
        let mut left = self.factor()?;

        loop {
            let op = match self.current().kind {
                TokenKind::Star => BinOp::Mul,
                TokenKind::Slash => BinOp::Div,
                _ => break,
            };
            let operator = self.advance()?;
            let right = self.factor()?;
            left = Expr::Binary {
                op,
                left: Box::new(left),
                right: Box::new(right),
                position: operator.position,
            };
        }

        Ok(left)
    }

    /// A number, a variable or constant reference, a call, or a
    /// parenthesised expression.
    fn factor(&mut self) -> Result<Expr, CompileError> {
        match self.current().kind {
            TokenKind::Number => {
                let token = self.advance()?;
                let value = Self::number_value(&token)?;
                Ok(Expr::Number {
                    value,
                    position: token.position,
                })
            }
            TokenKind::Ident => {
                let name = self.advance()?;
                if self.check(TokenKind::LParen) {
                    let args = self.actual_parameters()?;
                    // The callee may be declared further down the class body.
                    let symbol = self.symbols.lookup(self.current_scope, &name.lexeme);
                    Ok(Expr::Call(CallExpr {
                        name: name.lexeme,
                        symbol,
                        args,
                        position: name.position,
                    }))
                } else {
                    let symbol = self.resolve(&name)?;
                    Ok(Expr::Var {
                        name: name.lexeme,
                        symbol,
                        position: name.position,
                    })
                }
            }
            TokenKind::LParen => {
                self.advance()?;
                let inner = self.expression()?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            _ => Err(self.unexpected(&[
                TokenKind::Ident,
                TokenKind::Number,
                TokenKind::LParen,
            ])),
        }
    }

    /// `( [expression {, expression}] )`
    pub(crate) fn actual_parameters(&mut self) -> Result<Vec<Expr>, CompileError> {
        self.expect(TokenKind::LParen)?;

        let mut args = Vec::new();
        if self.at_expression_start() {
            args.push(self.expression()?);
            while self.check(TokenKind::Comma) {
                self.advance()?;
                args.push(self.expression()?);
            }
        }

        self.expect(TokenKind::RParen)?;
        Ok(args)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ParseError;
    use crate::parser::parse::Program;

    fn parse_expr(expr: &str) -> Result<Expr, CompileError> {
        let source =
            format!("class A {{ public int f(int a, int b) {{ return {expr}; }} }}");
        let program: Program = Parser::new("test.sst", &source)?.parse()?;
        match program.class.functions.into_iter().next().unwrap().body.remove(0) {
            crate::parser::ast::Stmt::Return { value: Some(expr), .. } => Ok(expr),
            other => panic!("expected return statement, got {:?}", other),
        }
    }

    fn binary(expr: &Expr) -> (BinOp, &Expr, &Expr) {
        match expr {
            Expr::Binary { op, left, right, .. } => (*op, left, right),
            other => panic!("expected binary expression, got {:?}", other),
        }
    }

    #[test]
    fn test_additive_chain_folds_left() {
        // 1 - 2 + 3 is (1 - 2) + 3.
        let expr = parse_expr("1 - 2 + 3").unwrap();
        let (op, left, right) = binary(&expr);
        assert_eq!(op, BinOp::Add);
        assert!(matches!(right, Expr::Number { value: 3, .. }));
        let (op, left, right) = binary(left);
        assert_eq!(op, BinOp::Sub);
        assert!(matches!(left, Expr::Number { value: 1, .. }));
        assert!(matches!(right, Expr::Number { value: 2, .. }));
    }

    #[test]
    fn test_term_binds_tighter_than_sum() {
        // 1 + 2 * 3 is 1 + (2 * 3).
        let expr = parse_expr("1 + 2 * 3").unwrap();
        let (op, left, right) = binary(&expr);
        assert_eq!(op, BinOp::Add);
        assert!(matches!(left, Expr::Number { value: 1, .. }));
        let (op, _, _) = binary(right);
        assert_eq!(op, BinOp::Mul);
    }

    #[test]
    fn test_parentheses_override_precedence() {
        let expr = parse_expr("(1 + 2) * 3").unwrap();
        let (op, left, _) = binary(&expr);
        assert_eq!(op, BinOp::Mul);
        let (op, _, _) = binary(left);
        assert_eq!(op, BinOp::Add);
    }

    #[test]
    fn test_relational_op_binds_weakest() {
        let expr = parse_expr("a + 1 == b * 2").unwrap();
        let (op, left, right) = binary(&expr);
        assert_eq!(op, BinOp::Eq);
        assert_eq!(binary(left).0, BinOp::Add);
        assert_eq!(binary(right).0, BinOp::Mul);
    }

    #[test]
    fn test_relational_ops_do_not_chain() {
        let err = parse_expr("a < b < 3").unwrap_err();
        // The second '<' cannot follow a complete expression.
        assert!(matches!(
            err,
            CompileError::Parse(ParseError::UnexpectedToken { ref found, .. })
                if found.kind == TokenKind::Lt
        ));
    }

    #[test]
    fn test_call_in_expression() {
        let expr = parse_expr("f(a, b) + 1").unwrap();
        let (op, left, _) = binary(&expr);
        assert_eq!(op, BinOp::Add);
        match left {
            Expr::Call(call) => {
                assert_eq!(call.name, "f");
                assert_eq!(call.args.len(), 2);
            }
            other => panic!("expected call expression, got {:?}", other),
        }
    }

    #[test]
    fn test_empty_factor_is_rejected() {
        let err = parse_expr("1 +").unwrap_err();
        assert!(matches!(
            err,
            CompileError::Parse(ParseError::UnexpectedToken { ref expected, .. })
                if *expected == [TokenKind::Ident, TokenKind::Number, TokenKind::LParen]
        ));
    }
}
