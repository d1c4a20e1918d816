//! Declaration parsing
//!
//! Productions for the class, its constants and fields, and its functions.
//! Each declaration both builds an AST node and inserts the corresponding
//! symbol into the active scope as it is parsed.

use crate::error::{CompileError, SemanticError};
use crate::parser::ast::{ClassDecl, ConstantDecl, FunctionDecl, ParamDecl, VarDecl};
use crate::parser::parse::Parser;
use crate::parser::symbols::{ReturnType, Symbol, SymbolKind};
use crate::scanner::token::TokenKind;

impl Parser {
    /// `class IDENT { constants fields functions }`
    ///
    /// Declarations come in fixed order: constants first, then fields, then
    /// functions. The class symbol is inserted into the root scope once the
    /// body is complete, when its scope is fully populated.
    pub(crate) fn class(&mut self) -> Result<ClassDecl, CompileError> {
        let keyword = self.expect(TokenKind::Class)?;
        let name = self.expect_identifier()?;

        let enclosing = self.enter_scope();
        let scope = self.current_scope;

        self.expect(TokenKind::LBrace)?;

        let mut constants = Vec::new();
        while self.check(TokenKind::Final) {
            constants.push(self.constant()?);
        }

        let mut fields = Vec::new();
        while self.at_type() {
            fields.push(self.variable_declaration()?);
        }

        let mut functions = Vec::new();
        while self.check(TokenKind::Public) {
            functions.push(self.function_declaration()?);
        }

        self.expect(TokenKind::RBrace)?;
        self.leave_scope(enclosing);

        let symbol = self.symbols.insert(
            enclosing,
            Symbol {
                name: name.lexeme.clone(),
                position: name.position,
                kind: SymbolKind::Class { scope },
            },
        )?;

        Ok(ClassDecl {
            name: name.lexeme,
            symbol,
            constants,
            fields,
            functions,
            position: keyword.position,
        })
    }

    /// `final int IDENT = NUMBER;`
    fn constant(&mut self) -> Result<ConstantDecl, CompileError> {
        self.expect(TokenKind::Final)?;
        self.type_name()?;
        let name = self.expect_identifier()?;
        self.expect(TokenKind::Eq)?;
        let number = self.expect(TokenKind::Number)?;
        let value = Self::number_value(&number)?;
        self.expect(TokenKind::Semicolon)?;

        let symbol = self.symbols.insert(
            self.current_scope,
            Symbol {
                name: name.lexeme.clone(),
                position: name.position.clone(),
                kind: SymbolKind::Constant { value },
            },
        )?;

        Ok(ConstantDecl {
            name: name.lexeme,
            symbol,
            value,
            position: name.position,
        })
    }

    /// `int IDENT;` as a class field or a function local.
    pub(crate) fn variable_declaration(&mut self) -> Result<VarDecl, CompileError> {
        self.type_name()?;
        let name = self.expect_identifier()?;
        self.expect(TokenKind::Semicolon)?;

        let symbol = self.symbols.insert(
            self.current_scope,
            Symbol {
                name: name.lexeme.clone(),
                position: name.position.clone(),
                kind: SymbolKind::Variable,
            },
        )?;

        Ok(VarDecl {
            name: name.lexeme,
            symbol,
            position: name.position,
        })
    }

    /// `int`, the only value type.
    fn type_name(&mut self) -> Result<(), CompileError> {
        self.expect(TokenKind::Int)?;
        Ok(())
    }

    /// `public (void|int) IDENT ( params ) { locals statements }`
    ///
    /// The function symbol is inserted into the class scope before the body
    /// is parsed, so direct recursion resolves without the link pass.
    fn function_declaration(&mut self) -> Result<FunctionDecl, CompileError> {
        let keyword = self.expect(TokenKind::Public)?;
        let return_type = self.return_type()?;
        let name = self.expect_identifier()?;

        let enclosing = self.enter_scope();
        let scope = self.current_scope;
        let params = self.formal_parameters()?;

        let symbol = self.symbols.insert(
            enclosing,
            Symbol {
                name: name.lexeme.clone(),
                position: name.position,
                kind: SymbolKind::Function {
                    return_type,
                    params: params.iter().map(|p| p.symbol).collect(),
                    scope,
                },
            },
        )?;

        self.expect(TokenKind::LBrace)?;

        let mut locals = Vec::new();
        while self.at_type() {
            locals.push(self.variable_declaration()?);
        }

        let body = self.statement_sequence()?;
        self.expect(TokenKind::RBrace)?;
        self.leave_scope(enclosing);

        Ok(FunctionDecl {
            name: name.lexeme,
            symbol,
            return_type,
            params,
            locals,
            body,
            position: keyword.position,
        })
    }

    /// `void` or `int`. Any other token here is a semantic error rather
    /// than a plain mismatch, to keep the message specific.
    fn return_type(&mut self) -> Result<ReturnType, CompileError> {
        match self.current().kind {
            TokenKind::Void => {
                self.advance()?;
                Ok(ReturnType::Void)
            }
            TokenKind::Int => {
                self.advance()?;
                Ok(ReturnType::Int)
            }
            _ => Err(SemanticError::UnknownReturnType {
                found: self.current().clone(),
            }
            .into()),
        }
    }

    /// `( [fp_section {, fp_section}] )`
    fn formal_parameters(&mut self) -> Result<Vec<ParamDecl>, CompileError> {
        self.expect(TokenKind::LParen)?;

        let mut params = Vec::new();
        if self.at_type() {
            params.push(self.fp_section()?);
            while self.check(TokenKind::Comma) {
                self.advance()?;
                params.push(self.fp_section()?);
            }
        }

        self.expect(TokenKind::RParen)?;
        Ok(params)
    }

    /// `int IDENT`
    fn fp_section(&mut self) -> Result<ParamDecl, CompileError> {
        self.type_name()?;
        let name = self.expect_identifier()?;

        let symbol = self.symbols.insert(
            self.current_scope,
            Symbol {
                name: name.lexeme.clone(),
                position: name.position.clone(),
                kind: SymbolKind::Parameter,
            },
        )?;

        Ok(ParamDecl {
            name: name.lexeme,
            symbol,
            position: name.position,
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

    #[test]
    fn test_empty_class() {
        let program = parse("class Empty { }").unwrap();
        assert_eq!(program.class.name, "Empty");
        assert!(program.class.constants.is_empty());
        assert!(program.class.fields.is_empty());
        assert!(program.class.functions.is_empty());
    }

    #[test]
    fn test_constant_records_value() {
        let program = parse("class A { final int limit = 4711; }").unwrap();
        let constant = &program.class.constants[0];
        assert_eq!(constant.name, "limit");
        assert_eq!(constant.value, 4711);
        assert_eq!(
            program.symbols.symbol(constant.symbol).kind,
            SymbolKind::Constant { value: 4711 }
        );
    }

    #[test]
    fn test_parameter_list_forms() {
        let none = parse("class A { public void f() { return; } }").unwrap();
        assert!(none.class.functions[0].params.is_empty());

        let two =
            parse("class A { public void f(int a, int b) { return; } }").unwrap();
        let params = &two.class.functions[0].params;
        assert_eq!(params.len(), 2);
        assert_eq!(params[0].name, "a");
        assert_eq!(params[1].name, "b");
    }

    #[test]
    fn test_unknown_return_type() {
        let err = parse("class A { public bool f() { return; } }").unwrap_err();
        assert!(matches!(
            err,
            CompileError::Semantic(SemanticError::UnknownReturnType { ref found })
                if found.lexeme == "bool"
        ));
    }

    #[test]
    fn test_declarations_out_of_order_are_rejected() {
        // A constant after a field violates the fixed declaration order.
        let err = parse("class A { int x; final int c = 1; }").unwrap_err();
        assert!(matches!(
            err,
            CompileError::Parse(ParseError::UnexpectedToken { .. })
        ));
    }

    #[test]
    fn test_duplicate_parameter_is_rejected() {
        let err =
            parse("class A { public void f(int a, int a) { return; } }").unwrap_err();
        assert!(matches!(
            err,
            CompileError::Semantic(SemanticError::DuplicateSymbol { ref name, .. }) if name == "a"
        ));
    }

    #[test]
    fn test_parameter_may_shadow_field() {
        let program =
            parse("class A { int a; public void f(int a) { return; } }").unwrap();
        let field = program.class.fields[0].symbol;
        let param = program.class.functions[0].params[0].symbol;
        assert_ne!(field, param);
    }
}
