//! Formula language: lexer, Pratt parser and tree-walking evaluator.
//!
//! Formulas use the surface variables `X, Y, a, b, c`, the constants `pi`
//! and `e`, and a fixed set of math functions. Names may carry an `np.`
//! prefix (`np.sin(X)` and `sin(X)` are the same formula).

pub mod ast;
pub mod eval;
pub mod lexer;
pub mod parser;
pub mod token;

use crate::error::FormulaError;

pub use ast::{Expr, Func, Var};
pub use eval::Bindings;

/// A compiled formula together with the text it was compiled from.
#[derive(Debug, Clone, PartialEq)]
pub struct Formula {
    source: String,
    expr: Expr,
}

impl Formula {
    pub fn compile(source: &str) -> Result<Self, FormulaError> {
        let tokens = lexer::Lexer::new(source).tokenize()?;
        let expr = parser::Parser::new(tokens).parse_formula()?;
        Ok(Self {
            source: source.to_string(),
            expr,
        })
    }

    pub fn source(&self) -> &str {
        &self.source
    }

    pub fn eval(&self, env: &Bindings) -> f64 {
        eval::eval(&self.expr, env)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_compile_keeps_source() {
        let formula = Formula::compile("a * X**2 + b * Y**2 + c").unwrap();
        assert_eq!(formula.source(), "a * X**2 + b * Y**2 + c");
    }

    #[test]
    fn test_eval_binds_every_variable() {
        let formula = Formula::compile("np.sin(X) + Y * a - b / c").unwrap();
        let env = Bindings {
            x: 0.0,
            y: 2.0,
            a: 3.0,
            b: 4.0,
            c: 8.0,
        };
        assert_eq!(formula.eval(&env), 5.5);
    }

    #[test]
    fn test_all_bundled_examples_compile() {
        for src in crate::params::EXAMPLE_FUNCTIONS {
            assert!(Formula::compile(src).is_ok(), "failed to compile {}", src);
        }
    }
}
