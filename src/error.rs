//! Error types shared across the plotting core.

use thiserror::Error;

use crate::expr::token::Span;

/// Failure to turn formula text into an expression tree.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum FormulaError {
    #[error("unexpected character '{ch}' at {}", span.start)]
    UnexpectedChar { ch: char, span: Span },

    #[error("malformed number '{text}' at {}", span.start)]
    BadNumber { text: String, span: Span },

    #[error("expected {expected}, found {found} at {}", span.start)]
    Unexpected {
        expected: String,
        found: String,
        span: Span,
    },

    #[error("unknown name '{name}' at {}", span.start)]
    UnknownName { name: String, span: Span },

    #[error("'{name}' takes {expected} argument(s), got {got} at {}", span.start)]
    Arity {
        name: String,
        expected: usize,
        got: usize,
        span: Span,
    },

    #[error("'{name}' at {} is a function and must be called", span.start)]
    BareFunction { name: String, span: Span },

    #[error("formula nests deeper than {limit} levels")]
    TooDeep { limit: usize, span: Span },

    #[error("empty formula")]
    Empty,
}

/// Rejection of a submitted formula. The previous formula stays in effect.
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ValidationError {
    #[error("The function input must contain X, Y, a, b, c. You are missing {0}.")]
    MissingVariable(char),

    #[error("The function input contains other variables than X, Y, a, b, c. Remove the character {0}.")]
    IllegalCharacter(char),

    #[error("The function input could not be parsed: {0}")]
    Syntax(#[from] FormulaError),
}

/// Colormap name outside the supported palette list.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown colormap '{0}'")]
pub struct UnknownColormap(pub String);

/// Geometry update rejected; the mesh keeps its previous contents.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MeshError {
    #[error("shape mismatch: mesh has {expected} vertices, got {got} {what}")]
    ShapeMismatch {
        expected: usize,
        got: usize,
        what: &'static str,
    },
}

/// Failure while creating the GPU rendering system.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("failed to create surface: {0}")]
    Surface(#[from] wgpu::CreateSurfaceError),

    #[error("failed to find suitable GPU adapter")]
    NoAdapter,

    #[error("surface supports no texture format on this adapter")]
    NoSurfaceFormat,

    #[error("failed to request device: {0}")]
    Device(#[from] wgpu::RequestDeviceError),
}
