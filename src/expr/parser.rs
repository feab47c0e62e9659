use crate::error::FormulaError;
use crate::expr::ast::{BinOp, Expr, Func, Var};
use crate::expr::token::{Span, Token, TokenKind};

/// Deepest operator/parenthesis nesting accepted before parsing bails out.
pub const MAX_DEPTH: usize = 200;

/// Binding power of the operand of a prefix `-`/`+`: tighter than `*`, looser than `**`.
const UNARY_BP: u8 = 5;

/// Pratt parser for surface formulas.
pub struct Parser {
    tokens: Vec<Token>,
    pos: usize,
    depth: usize,
}

impl Parser {
    pub fn new(tokens: Vec<Token>) -> Self {
        Self {
            tokens,
            pos: 0,
            depth: 0,
        }
    }

    /// Parse a whole formula; trailing tokens are an error.
    pub fn parse_formula(&mut self) -> Result<Expr, FormulaError> {
        if self.peek_kind() == &TokenKind::Eof {
            return Err(FormulaError::Empty);
        }
        let (expr, _) = self.parse_expr(0)?;
        if self.peek_kind() != &TokenKind::Eof {
            let tok = self.peek();
            return Err(FormulaError::Unexpected {
                expected: "an operator or end of input".to_string(),
                found: tok.kind.describe(),
                span: tok.span,
            });
        }
        Ok(expr)
    }

    /// Pratt loop: parse expression with given minimum binding power.
    ///
    /// Returns the expression with its tree height. Both the recursion depth
    /// and the height are capped at `MAX_DEPTH`, so long operator chains
    /// cannot build a tree too deep to evaluate.
    fn parse_expr(&mut self, min_bp: u8) -> Result<(Expr, usize), FormulaError> {
        self.depth += 1;
        if self.depth > MAX_DEPTH {
            return Err(self.too_deep());
        }

        let (mut lhs, mut height) = self.parse_prefix()?;

        loop {
            let (op, left_bp, right_bp) = match self.peek_kind() {
                TokenKind::Plus => (BinOp::Add, 1, 2),
                TokenKind::Minus => (BinOp::Sub, 1, 2),
                TokenKind::Star => (BinOp::Mul, 3, 4),
                TokenKind::Slash => (BinOp::Div, 3, 4),
                TokenKind::Percent => (BinOp::Mod, 3, 4),
                TokenKind::Pow => (BinOp::Pow, 8, 7), // right-associative
                _ => break,
            };

            if left_bp < min_bp {
                break;
            }

            self.advance();
            let (rhs, rhs_height) = self.parse_expr(right_bp)?;
            height = self.grow(height.max(rhs_height))?;
            lhs = Expr::Binary {
                op,
                lhs: Box::new(lhs),
                rhs: Box::new(rhs),
            };
        }

        self.depth -= 1;
        Ok((lhs, height))
    }

    fn parse_prefix(&mut self) -> Result<(Expr, usize), FormulaError> {
        let tok = self.advance();
        match tok.kind {
            TokenKind::Number(n) => Ok((Expr::Number(n), 1)),
            TokenKind::Ident(name) => self.parse_name(name, tok.span),
            TokenKind::LParen => {
                let inner = self.parse_expr(0)?;
                self.expect(TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Minus => {
                let (operand, height) = self.parse_expr(UNARY_BP)?;
                Ok((Expr::Neg(Box::new(operand)), self.grow(height)?))
            }
            TokenKind::Plus => self.parse_expr(UNARY_BP),
            other => Err(FormulaError::Unexpected {
                expected: "an expression".to_string(),
                found: other.describe(),
                span: tok.span,
            }),
        }
    }

    /// Resolve an identifier into a variable, constant or function call.
    fn parse_name(&mut self, name: String, span: Span) -> Result<(Expr, usize), FormulaError> {
        if let Some(var) = Var::from_name(&name) {
            return Ok((Expr::Var(var), 1));
        }
        match name.as_str() {
            "pi" => return Ok((Expr::Number(std::f64::consts::PI), 1)),
            "e" => return Ok((Expr::Number(std::f64::consts::E), 1)),
            _ => {}
        }

        let Some(func) = Func::from_name(&name) else {
            return Err(FormulaError::UnknownName { name, span });
        };

        if self.peek_kind() != &TokenKind::LParen {
            return Err(FormulaError::BareFunction { name, span });
        }
        self.advance();

        let mut args = Vec::new();
        let mut height = 0;
        if self.peek_kind() != &TokenKind::RParen {
            loop {
                let (arg, arg_height) = self.parse_expr(0)?;
                args.push(arg);
                height = height.max(arg_height);
                if self.peek_kind() != &TokenKind::Comma {
                    break;
                }
                self.advance();
            }
        }
        let close = self.expect(TokenKind::RParen)?;

        if args.len() != func.arity() {
            return Err(FormulaError::Arity {
                name,
                expected: func.arity(),
                got: args.len(),
                span: span.merge(close),
            });
        }
        Ok((Expr::Call { func, args }, self.grow(height)?))
    }

    /// Height of a node whose tallest child is `child_height`.
    fn grow(&self, child_height: usize) -> Result<usize, FormulaError> {
        let height = child_height + 1;
        if height > MAX_DEPTH {
            return Err(self.too_deep());
        }
        Ok(height)
    }

    fn too_deep(&self) -> FormulaError {
        FormulaError::TooDeep {
            limit: MAX_DEPTH,
            span: self.peek().span,
        }
    }

    fn expect(&mut self, kind: TokenKind) -> Result<Span, FormulaError> {
        if self.peek_kind() == &kind {
            Ok(self.advance().span)
        } else {
            let tok = self.peek();
            Err(FormulaError::Unexpected {
                expected: kind.describe(),
                found: tok.kind.describe(),
                span: tok.span,
            })
        }
    }

    fn peek(&self) -> &Token {
        // The lexer always terminates the stream with Eof
        &self.tokens[self.pos.min(self.tokens.len() - 1)]
    }

    fn peek_kind(&self) -> &TokenKind {
        &self.peek().kind
    }

    fn advance(&mut self) -> Token {
        let tok = self.peek().clone();
        if self.pos < self.tokens.len() - 1 {
            self.pos += 1;
        }
        tok
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::lexer::Lexer;

    fn parse(src: &str) -> Result<Expr, FormulaError> {
        let tokens = Lexer::new(src).tokenize()?;
        Parser::new(tokens).parse_formula()
    }

    fn shape(src: &str) -> String {
        parse(src).unwrap().to_string()
    }

    #[test]
    fn test_precedence() {
        assert_eq!(shape("a + b * c"), "(a + (b * c))");
        assert_eq!(shape("a * X**2 + c"), "((a * (X ** 2)) + c)");
        assert_eq!(shape("X - Y - a"), "((X - Y) - a)");
    }

    #[test]
    fn test_power_is_right_associative() {
        assert_eq!(shape("X**Y**a"), "(X ** (Y ** a))");
        assert_eq!(shape("X^2"), "(X ** 2)");
    }

    #[test]
    fn test_unary_minus_binds_looser_than_power() {
        assert_eq!(shape("-X**2"), "(-(X ** 2))");
        assert_eq!(shape("X**-1"), "(X ** (-1))");
        assert_eq!(shape("-a*b"), "((-a) * b)");
    }

    #[test]
    fn test_calls_and_constants() {
        assert_eq!(shape("np.sin(np.pi * X)"), format!("sin(({} * X))", std::f64::consts::PI));
        assert_eq!(shape("arctan2(Y, X)"), "arctan2(Y, X)");
    }

    #[test]
    fn test_unknown_name() {
        assert!(matches!(
            parse("d * X"),
            Err(FormulaError::UnknownName { name, .. }) if name == "d"
        ));
        assert!(matches!(
            parse("np.foo(X)"),
            Err(FormulaError::UnknownName { name, .. }) if name == "foo"
        ));
    }

    #[test]
    fn test_arity_mismatch() {
        assert!(matches!(
            parse("sqrt(X, Y)"),
            Err(FormulaError::Arity { expected: 1, got: 2, .. })
        ));
        assert!(matches!(
            parse("arctan2(X)"),
            Err(FormulaError::Arity { expected: 2, got: 1, .. })
        ));
    }

    #[test]
    fn test_function_without_call() {
        assert!(matches!(parse("sin + X"), Err(FormulaError::BareFunction { .. })));
    }

    #[test]
    fn test_malformed_input() {
        assert!(parse("a * X +").is_err());
        assert!(parse("(a * X").is_err());
        assert!(parse("a * X)").is_err());
        assert!(parse("X Y").is_err());
        assert_eq!(parse("   "), Err(FormulaError::Empty));
    }

    #[test]
    fn test_messages_carry_position() {
        assert_eq!(parse("X * d").unwrap_err().to_string(), "unknown name 'd' at 4");
        assert!(parse("a * X)").unwrap_err().to_string().ends_with(" at 5"));
        assert!(parse("X + sqrt(X, Y)").unwrap_err().to_string().ends_with(" at 4"));
        assert_eq!(
            parse("cos + X").unwrap_err().to_string(),
            "'cos' at 0 is a function and must be called"
        );
    }

    #[test]
    fn test_nesting_limit() {
        let deep = format!("{}X{}", "(".repeat(MAX_DEPTH + 5), ")".repeat(MAX_DEPTH + 5));
        assert!(matches!(parse(&deep), Err(FormulaError::TooDeep { .. })));

        let shallow = format!("{}X{}", "(".repeat(20), ")".repeat(20));
        assert!(parse(&shallow).is_ok());
    }

    #[test]
    fn test_long_flat_chain_is_rejected() {
        let long = format!("a*X + b*Y + c{}", " + X".repeat(1_000_000));
        assert!(matches!(parse(&long), Err(FormulaError::TooDeep { limit: MAX_DEPTH, .. })));

        let negations = format!("{}X", "-".repeat(MAX_DEPTH + 1));
        assert!(matches!(parse(&negations), Err(FormulaError::TooDeep { .. })));
    }

    #[test]
    fn test_chain_within_limit_is_accepted() {
        // Leaves sit at height 1, so a chain of MAX_DEPTH terms is MAX_DEPTH tall
        let fits = format!("X{}", " + X".repeat(MAX_DEPTH - 1));
        assert!(parse(&fits).is_ok());
        let over = format!("X{}", " + X".repeat(MAX_DEPTH));
        assert!(matches!(parse(&over), Err(FormulaError::TooDeep { .. })));
    }
}
