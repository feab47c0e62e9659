//! Formula validation before a submitted formula replaces the current one.
//!
//! Two stages:
//! 1. Identifier screen: every whitelisted token is removed by plain substring
//!    replacement, then the residue must contain each of `X, Y, a, b, c` and no
//!    other alphabetic character.
//! 2. Compilation: the formula must parse into an expression tree, so malformed
//!    text that happens to contain all five variables is rejected up front.

use crate::error::ValidationError;
use crate::expr::{Formula, Var};
use crate::params::ALLOWED_CALCULATIONS;

/// Result of the identifier screen, in the shape the UI presents it
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Validation {
    pub accepted: bool,
    pub message: String,
}

impl Validation {
    fn from_result(result: Result<(), ValidationError>) -> Self {
        match result {
            Ok(()) => Self {
                accepted: true,
                message: String::new(),
            },
            Err(e) => Self {
                accepted: false,
                message: e.to_string(),
            },
        }
    }
}

/// Identifier screen only (stage 1).
pub fn validate_formula(text: &str) -> Validation {
    Validation::from_result(screen_identifiers(text))
}

/// Full gate (both stages), returning the compiled formula on success.
pub fn check_formula(text: &str) -> Result<Formula, ValidationError> {
    screen_identifiers(text)?;
    Ok(Formula::compile(text)?)
}

fn screen_identifiers(text: &str) -> Result<(), ValidationError> {
    let residue = strip_allowed(text);

    // Checked in the fixed order X, Y, a, b, c
    for var in Var::ALL {
        if !residue.contains(var.symbol()) {
            return Err(ValidationError::MissingVariable(var.symbol()));
        }
    }

    let illegal = residue
        .chars()
        .find(|ch| ch.is_alphabetic() && Var::ALL.iter().all(|v| v.symbol() != *ch));
    match illegal {
        Some(ch) => Err(ValidationError::IllegalCharacter(ch)),
        None => Ok(()),
    }
}

fn strip_allowed(text: &str) -> String {
    ALLOWED_CALCULATIONS
        .iter()
        .fold(text.to_string(), |acc, token| acc.replace(token, ""))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::FormulaError;
    use crate::params::{EXAMPLE_FUNCTIONS, START_FUNCTION};

    #[test]
    fn test_accepts_start_formula() {
        let v = validate_formula(START_FUNCTION);
        assert!(v.accepted);
        assert!(v.message.is_empty());
    }

    #[test]
    fn test_reports_first_missing_variable_in_order() {
        let v = validate_formula("a * b * c");
        assert!(!v.accepted);
        assert_eq!(
            v.message,
            "The function input must contain X, Y, a, b, c. You are missing X."
        );

        let v = validate_formula("X * a * b * c");
        assert!(v.message.ends_with("You are missing Y."));

        let v = validate_formula("X + Y + a + b");
        assert!(v.message.ends_with("You are missing c."));
    }

    #[test]
    fn test_reports_illegal_letter() {
        let v = validate_formula("a * X + b * Y + c + d");
        assert!(!v.accepted);
        assert_eq!(
            v.message,
            "The function input contains other variables than X, Y, a, b, c. Remove the character d."
        );
    }

    #[test]
    fn test_bare_function_names_are_not_whitelisted() {
        // Only the np-prefixed spellings are stripped
        let v = validate_formula("sin(X) + Y + a + b + c");
        assert!(!v.accepted);
        assert!(v.message.ends_with("Remove the character s."));
    }

    #[test]
    fn test_whitelisted_tokens_are_stripped() {
        let v = validate_formula("np.arcsinh(X) * np.sinh(Y) + np.exp(a) * np.e + np.pi * b + c");
        assert!(v.accepted, "{}", v.message);
    }

    #[test]
    fn test_bundled_examples_pass() {
        for src in EXAMPLE_FUNCTIONS {
            assert!(check_formula(src).is_ok(), "rejected example {}", src);
        }
    }

    #[test]
    fn test_check_rejects_malformed_text_with_all_variables() {
        // Passes the identifier screen, fails compilation
        assert!(validate_formula("a * X + b * Y + c +").accepted);
        let err = check_formula("a * X + b * Y + c +").unwrap_err();
        assert!(matches!(err, ValidationError::Syntax(_)));
        assert!(err.to_string().starts_with("The function input could not be parsed"));
    }

    #[test]
    fn test_check_rejects_runaway_chain() {
        let long = format!("a * X + b * Y + c{}", " + X".repeat(1_000_000));
        assert!(matches!(
            check_formula(&long),
            Err(ValidationError::Syntax(FormulaError::TooDeep { .. }))
        ));
    }

    #[test]
    fn test_check_returns_compiled_formula() {
        let formula = check_formula(START_FUNCTION).unwrap();
        assert_eq!(formula.source(), START_FUNCTION);
    }
}
