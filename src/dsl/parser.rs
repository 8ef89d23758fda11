//! Parser for the ladder description language.

use std::collections::HashSet;

use super::ast::*;
use super::lexer::{Lexer, Token, TokenKind};
use crate::circuit::Link;
use crate::components::ElementKind;
use crate::error::{LadderError, Result};
use crate::solver::ZeroBranchPolicy;

/// Parser for ladder descriptions.
pub struct Parser<'a> {
    lexer: Lexer<'a>,
    current: Token,
}

impl<'a> Parser<'a> {
    /// Create a new parser with the given lexer.
    pub fn new(mut lexer: Lexer<'a>) -> Result<Self> {
        let current = lexer.next_token()?;
        Ok(Self { lexer, current })
    }

    /// Parse the entire description.
    pub fn parse(&mut self) -> Result<LadderAst> {
        let mut ast = LadderAst::new();
        let mut names = HashSet::new();

        while self.current.kind != TokenKind::Eof {
            // Skip empty lines
            if self.current.kind == TokenKind::Newline {
                self.advance()?;
                continue;
            }

            match self.current.kind {
                TokenKind::Directive => {
                    self.parse_directive(&mut ast)?;
                }
                TokenKind::Identifier => {
                    let def = self.parse_element()?;
                    if !names.insert(def.name.clone()) {
                        return Err(LadderError::invalid_component(
                            def.name,
                            def.line,
                            "duplicate component name",
                        ));
                    }
                    ast.components.push(def);
                }
                _ => {
                    return Err(LadderError::parse(
                        self.current.line,
                        format!("unexpected token: {:?}", self.current.text),
                    ));
                }
            }

            self.end_of_line()?;
        }

        Ok(ast)
    }

    fn advance(&mut self) -> Result<()> {
        self.current = self.lexer.next_token()?;
        Ok(())
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Token> {
        if self.current.kind == kind {
            let tok = self.current.clone();
            self.advance()?;
            Ok(tok)
        } else {
            Err(LadderError::parse(
                self.current.line,
                format!("expected {:?}, got {:?}", kind, self.current.kind),
            ))
        }
    }

    /// Consume the statement terminator. Anything else left on the line is an error.
    fn end_of_line(&mut self) -> Result<()> {
        match self.current.kind {
            TokenKind::Newline => self.advance(),
            TokenKind::Eof => Ok(()),
            _ => Err(LadderError::parse(
                self.current.line,
                format!("unexpected trailing token: {:?}", self.current.text),
            )),
        }
    }

    fn number(&mut self) -> Result<f64> {
        let tok = self.expect(TokenKind::Number)?;
        tok.text
            .parse::<f64>()
            .map_err(|_| LadderError::parse(tok.line, format!("invalid number: {}", tok.text)))
    }

    fn parse_directive(&mut self, ast: &mut LadderAst) -> Result<()> {
        let directive = self.current.text.clone();
        let line = self.current.line;
        self.advance()?;

        match directive.to_lowercase().as_str() {
            ".frequency" | ".freq" => {
                if ast.frequency.is_some() {
                    return Err(LadderError::parse(line, "duplicate .frequency directive"));
                }
                ast.frequency = Some(self.number()?);
            }
            ".source" | ".voltage" => {
                if ast.source.is_some() {
                    return Err(LadderError::parse(line, "duplicate .source directive"));
                }
                let magnitude = self.number()?;
                let phase_deg = if self.current.kind == TokenKind::Number {
                    self.number()?
                } else {
                    0.0
                };
                ast.source = Some(SourceDef { magnitude, phase_deg });
            }
            ".policy" => {
                let tok = self.expect(TokenKind::Identifier)?;
                let policy = ZeroBranchPolicy::from_keyword(&tok.text).ok_or_else(|| {
                    LadderError::parse(line, format!("unknown zero-branch policy: {}", tok.text))
                })?;
                ast.policy = Some(policy);
            }
            _ => {
                return Err(LadderError::parse(
                    line,
                    format!("unknown directive: {}", directive),
                ));
            }
        }

        Ok(())
    }

    /// `<name> <link> <value> [unit]`
    fn parse_element(&mut self) -> Result<ElementDef> {
        let name_tok = self.expect(TokenKind::Identifier)?;
        let name = name_tok.text;
        let line = name_tok.line;

        let kind = ElementKind::from_prefix(&name).ok_or_else(|| LadderError::UnknownComponentType {
            component_type: name.clone(),
            line,
        })?;

        if self.current.kind != TokenKind::Identifier {
            return Err(LadderError::invalid_component(
                &name,
                line,
                "expected link (first, series or parallel)",
            ));
        }
        let link = Link::from_keyword(&self.current.text).ok_or_else(|| {
            LadderError::invalid_component(
                &name,
                line,
                format!("unknown link '{}'", self.current.text),
            )
        })?;
        self.advance()?;

        if self.current.kind != TokenKind::Number {
            return Err(LadderError::invalid_component(&name, line, "expected a magnitude"));
        }
        let value = self.number()?;

        let unit = if self.current.kind == TokenKind::Identifier {
            let tok = self.current.text.clone();
            self.advance()?;
            Some(tok)
        } else {
            None
        };

        Ok(ElementDef {
            kind,
            name,
            link,
            value,
            unit,
            line,
        })
    }
}
