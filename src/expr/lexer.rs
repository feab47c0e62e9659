use crate::error::FormulaError;
use crate::expr::token::{Span, Token, TokenKind};

/// Namespace prefix accepted in front of function and constant names.
const NAMESPACE: &str = "np";

pub struct Lexer {
    source: Vec<char>,
    pos: usize,
    tokens: Vec<Token>,
}

impl Lexer {
    pub fn new(source: &str) -> Self {
        Self {
            source: source.chars().collect(),
            pos: 0,
            tokens: Vec::new(),
        }
    }

    pub fn tokenize(mut self) -> Result<Vec<Token>, FormulaError> {
        loop {
            self.skip_whitespace();
            if self.is_at_end() {
                break;
            }
            let token = self.next_token()?;
            self.tokens.push(token);
        }
        self.tokens
            .push(Token::new(TokenKind::Eof, Span::new(self.pos, self.pos)));
        Ok(self.tokens)
    }

    fn next_token(&mut self) -> Result<Token, FormulaError> {
        let start = self.pos;
        let ch = self.advance();

        let kind = match ch {
            '+' => TokenKind::Plus,
            '-' => TokenKind::Minus,
            '*' => {
                if self.peek() == Some('*') {
                    self.advance();
                    TokenKind::Pow
                } else {
                    TokenKind::Star
                }
            }
            '/' => TokenKind::Slash,
            '%' => TokenKind::Percent,
            '^' => TokenKind::Pow,
            '(' => TokenKind::LParen,
            ')' => TokenKind::RParen,
            ',' => TokenKind::Comma,
            '.' if self.peek().is_some_and(|c| c.is_ascii_digit()) => {
                return self.read_number(start);
            }
            c if c.is_ascii_digit() => return self.read_number(start),
            c if is_ident_start(c) => return self.read_identifier(start),
            _ => {
                return Err(FormulaError::UnexpectedChar {
                    ch,
                    span: Span::new(start, self.pos),
                })
            }
        };
        Ok(Token::new(kind, Span::new(start, self.pos)))
    }

    /// Reads `12`, `1.5`, `.5`, `1.`, `2e-3`. `start` points at the first char,
    /// which has already been consumed.
    fn read_number(&mut self, start: usize) -> Result<Token, FormulaError> {
        self.consume_digits();
        if self.source[start] != '.' && self.peek() == Some('.') {
            self.advance();
            self.consume_digits();
        }

        // Exponent only when digits follow, so `2e` stays a number and a name
        if matches!(self.peek(), Some('e') | Some('E')) {
            let has_sign = matches!(self.peek_at(1), Some('+') | Some('-'));
            let digit_at = if has_sign { 2 } else { 1 };
            if self.peek_at(digit_at).is_some_and(|c| c.is_ascii_digit()) {
                for _ in 0..digit_at {
                    self.advance();
                }
                self.consume_digits();
            }
        }

        let text: String = self.source[start..self.pos].iter().collect();
        let span = Span::new(start, self.pos);
        text.parse::<f64>()
            .map(|n| Token::new(TokenKind::Number(n), span))
            .map_err(|_| FormulaError::BadNumber { text, span })
    }

    fn read_identifier(&mut self, start: usize) -> Result<Token, FormulaError> {
        let mut name = self.consume_word(start);

        // `np.sin` folds into `sin`
        if name == NAMESPACE && self.peek() == Some('.') {
            self.advance();
            let member_start = self.pos;
            match self.peek() {
                Some(c) if is_ident_start(c) => {
                    self.advance();
                    name = self.consume_word(member_start);
                }
                other => {
                    let end = if other.is_some() { self.pos + 1 } else { self.pos };
                    return Err(FormulaError::Unexpected {
                        expected: format!("a name after '{}.'", NAMESPACE),
                        found: other.map_or("end of input".to_string(), |c| format!("'{}'", c)),
                        span: Span::new(start, end),
                    });
                }
            }
        }

        Ok(Token::new(TokenKind::Ident(name), Span::new(start, self.pos)))
    }

    /// Consume the rest of an identifier whose first char is at `start`.
    fn consume_word(&mut self, start: usize) -> String {
        while let Some(c) = self.peek() {
            if is_ident_continue(c) {
                self.advance();
            } else {
                break;
            }
        }
        self.source[start..self.pos].iter().collect()
    }

    fn consume_digits(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_ascii_digit() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn skip_whitespace(&mut self) {
        while let Some(c) = self.peek() {
            if c.is_whitespace() {
                self.advance();
            } else {
                break;
            }
        }
    }

    fn is_at_end(&self) -> bool {
        self.pos >= self.source.len()
    }

    fn peek(&self) -> Option<char> {
        self.source.get(self.pos).copied()
    }

    fn peek_at(&self, offset: usize) -> Option<char> {
        self.source.get(self.pos + offset).copied()
    }

    fn advance(&mut self) -> char {
        let ch = self.source[self.pos];
        self.pos += 1;
        ch
    }
}

fn is_ident_start(c: char) -> bool {
    c.is_ascii_alphabetic() || c == '_'
}

fn is_ident_continue(c: char) -> bool {
    c.is_ascii_alphanumeric() || c == '_'
}

#[cfg(test)]
mod tests {
    use super::*;

    fn kinds(src: &str) -> Vec<TokenKind> {
        Lexer::new(src)
            .tokenize()
            .unwrap()
            .into_iter()
            .map(|t| t.kind)
            .collect()
    }

    #[test]
    fn test_power_operators() {
        assert_eq!(
            kinds("X**2 ^ 3"),
            vec![
                TokenKind::Ident("X".into()),
                TokenKind::Pow,
                TokenKind::Number(2.0),
                TokenKind::Pow,
                TokenKind::Number(3.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_namespace_prefix_is_folded() {
        assert_eq!(
            kinds("np.sin(np.pi)"),
            vec![
                TokenKind::Ident("sin".into()),
                TokenKind::LParen,
                TokenKind::Ident("pi".into()),
                TokenKind::RParen,
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(
            kinds("1.5 .25 3. 2e-3 1E2"),
            vec![
                TokenKind::Number(1.5),
                TokenKind::Number(0.25),
                TokenKind::Number(3.0),
                TokenKind::Number(0.002),
                TokenKind::Number(100.0),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_exponent_needs_digits() {
        assert_eq!(
            kinds("2e"),
            vec![
                TokenKind::Number(2.0),
                TokenKind::Ident("e".into()),
                TokenKind::Eof,
            ]
        );
    }

    #[test]
    fn test_unexpected_character() {
        let err = Lexer::new("X $ Y").tokenize().unwrap_err();
        assert_eq!(
            err,
            FormulaError::UnexpectedChar {
                ch: '$',
                span: Span::new(2, 3)
            }
        );
    }

    #[test]
    fn test_dangling_namespace() {
        assert!(Lexer::new("np.(X)").tokenize().is_err());
        assert!(Lexer::new("np.").tokenize().is_err());
    }
}
