//! Surfplot library - animated formula surfaces
//!
//! A formula `Z = f(X, Y, a, b, c)` is sampled over a symmetric grid, colored
//! through a named colormap, and re-evaluated every frame while the
//! coefficients `a`, `b`, `c` oscillate.

pub mod animation;
pub mod camera;
pub mod cli;
pub mod colormap;
pub mod error;
pub mod expr;
pub mod fps;
pub mod grid;
pub mod params;
pub mod rendering;
pub mod surface;
pub mod validate;
