//! Lexer (tokenizer) for the ladder description language.

use crate::error::{LadderError, Result};

/// A token produced by the lexer.
#[derive(Debug, Clone, PartialEq)]
pub struct Token {
    /// The kind of token
    pub kind: TokenKind,
    /// The token's text
    pub text: String,
    /// Line number (1-indexed)
    pub line: usize,
    /// Column number (1-indexed)
    pub column: usize,
}

/// Token types in the description language.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    /// A name, link keyword or unit symbol
    Identifier,
    /// A number (integer or floating point, optional exponent)
    Number,
    /// A directive (starts with '.')
    Directive,
    /// Newline
    Newline,
    /// End of file
    Eof,
}

/// Lexer for tokenizing ladder descriptions.
pub struct Lexer<'a> {
    chars: std::iter::Peekable<std::str::Chars<'a>>,
    line: usize,
    column: usize,
}

impl<'a> Lexer<'a> {
    /// Create a new lexer for the given input.
    pub fn new(input: &'a str) -> Self {
        Self {
            chars: input.chars().peekable(),
            line: 1,
            column: 1,
        }
    }

    /// Get the next token.
    pub fn next_token(&mut self) -> Result<Token> {
        self.skip_whitespace_and_comments();

        let line = self.line;
        let column = self.column;

        let ch = match self.chars.peek().copied() {
            Some(ch) => ch,
            None => {
                return Ok(Token {
                    kind: TokenKind::Eof,
                    text: String::new(),
                    line,
                    column,
                });
            }
        };

        let (kind, text) = match ch {
            '\n' => {
                self.advance();
                (TokenKind::Newline, "\n".to_string())
            }
            '.' => {
                self.advance();
                let name = self.read_identifier();
                if name.is_empty() {
                    return Err(LadderError::lexer(line, column, "expected directive name after '.'"));
                }
                (TokenKind::Directive, format!(".{}", name))
            }
            '-' | '+' | '0'..='9' => {
                let text = self.read_number();
                if !text.chars().any(|c| c.is_ascii_digit()) {
                    return Err(LadderError::lexer(line, column, format!("malformed number '{}'", text)));
                }
                (TokenKind::Number, text)
            }
            _ if ch.is_alphabetic() || ch == '_' => (TokenKind::Identifier, self.read_identifier()),
            _ => {
                return Err(LadderError::lexer(
                    line,
                    column,
                    format!("unexpected character '{}'", ch),
                ));
            }
        };

        Ok(Token {
            kind,
            text,
            line,
            column,
        })
    }

    fn advance(&mut self) -> Option<char> {
        let ch = self.chars.next()?;
        if ch == '\n' {
            self.line += 1;
            self.column = 1;
        } else {
            self.column += 1;
        }
        Some(ch)
    }

    fn skip_whitespace_and_comments(&mut self) {
        while let Some(&ch) = self.chars.peek() {
            if ch == ' ' || ch == '\t' || ch == '\r' {
                self.advance();
            } else if ch == '#' || ch == ';' {
                // Skip comment until end of line
                while let Some(&c) = self.chars.peek() {
                    if c == '\n' {
                        break;
                    }
                    self.advance();
                }
            } else {
                break;
            }
        }
    }

    fn read_identifier(&mut self) -> String {
        let mut text = String::new();
        while let Some(&ch) = self.chars.peek() {
            if ch.is_alphanumeric() || ch == '_' {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
        text
    }

    fn read_digits(&mut self, text: &mut String) {
        while let Some(&ch) = self.chars.peek() {
            if ch.is_ascii_digit() {
                text.push(ch);
                self.advance();
            } else {
                break;
            }
        }
    }

    /// Reads sign, integer, fraction and exponent. A unit glued to the
    /// number (`10mH`) is left for the next token.
    fn read_number(&mut self) -> String {
        let mut text = String::new();

        // Optional sign
        if let Some(&ch) = self.chars.peek() {
            if ch == '-' || ch == '+' {
                text.push(ch);
                self.advance();
            }
        }

        // Integer part
        self.read_digits(&mut text);

        // Decimal part
        if let Some(&'.') = self.chars.peek() {
            text.push('.');
            self.advance();
            self.read_digits(&mut text);
        }

        // Exponent part; `e` is never a unit prefix
        if let Some(&ch) = self.chars.peek() {
            if ch == 'e' || ch == 'E' {
                text.push(ch);
                self.advance();
                if let Some(&sign) = self.chars.peek() {
                    if sign == '-' || sign == '+' {
                        text.push(sign);
                        self.advance();
                    }
                }
                self.read_digits(&mut text);
            }
        }

        text
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(input: &str) -> Vec<(TokenKind, String)> {
        let mut lexer = Lexer::new(input);
        let mut out = Vec::new();
        loop {
            let tok = lexer.next_token().unwrap();
            if tok.kind == TokenKind::Eof {
                break;
            }
            out.push((tok.kind, tok.text));
        }
        out
    }

    #[test]
    fn test_lexer_basic() {
        let tokens = kinds("R1 first 4.7 kΩ");
        assert_eq!(
            tokens,
            vec![
                (TokenKind::Identifier, "R1".to_string()),
                (TokenKind::Identifier, "first".to_string()),
                (TokenKind::Number, "4.7".to_string()),
                (TokenKind::Identifier, "kΩ".to_string()),
            ]
        );
    }

    #[test]
    fn test_glued_unit_and_exponent() {
        let tokens = kinds("10mH 1e-6F");
        assert_eq!(tokens[0], (TokenKind::Number, "10".to_string()));
        assert_eq!(tokens[1], (TokenKind::Identifier, "mH".to_string()));
        assert_eq!(tokens[2], (TokenKind::Number, "1e-6".to_string()));
        assert_eq!(tokens[3], (TokenKind::Identifier, "F".to_string()));
    }

    #[test]
    fn test_micro_sign_identifier() {
        let tokens = kinds("4.7µF");
        assert_eq!(tokens[1], (TokenKind::Identifier, "µF".to_string()));
    }

    #[test]
    fn test_lexer_directive_and_comments() {
        let mut lexer = Lexer::new("# header\n.frequency 60 ; mains\n");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Newline);

        let tok = lexer.next_token().unwrap();
        assert_eq!(tok.kind, TokenKind::Directive);
        assert_eq!(tok.text, ".frequency");
        assert_eq!(tok.line, 2);

        assert_eq!(lexer.next_token().unwrap().text, "60");
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Newline);
        assert_eq!(lexer.next_token().unwrap().kind, TokenKind::Eof);
    }

    #[test]
    fn test_unexpected_character() {
        let mut lexer = Lexer::new("R1 @");
        lexer.next_token().unwrap();
        let err = lexer.next_token().unwrap_err();
        assert!(matches!(err, LadderError::LexerError { line: 1, column: 4, .. }));
    }
}
