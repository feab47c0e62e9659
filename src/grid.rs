//! Sample grid and height field evaluation.
//!
//! Fields are stored row-major in flat vectors with `xy` mesh indexing: the
//! row index `i` walks the Y samples and the column index `j` walks the X
//! samples, so `X[i][j] = x[j]` and `Y[i][j] = y[i]`.

use log::warn;

use crate::animation::Coefficients;
use crate::expr::{Bindings, Formula};

/// Symmetric sampling intervals and the per-axis sample count
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct GridSpec {
    pub x_limit: u32,
    pub y_limit: u32,
    pub resolution: usize,
}

impl GridSpec {
    pub fn new(x_limit: u32, y_limit: u32, resolution: usize) -> Self {
        Self {
            x_limit,
            y_limit,
            resolution,
        }
    }

    pub fn cell_count(&self) -> usize {
        self.resolution * self.resolution
    }
}

/// `n` evenly spaced samples over `[lo, hi]`, both ends included.
pub fn linspace(lo: f64, hi: f64, n: usize) -> Vec<f64> {
    match n {
        0 => Vec::new(),
        1 => vec![lo],
        _ => {
            let step = (hi - lo) / (n - 1) as f64;
            // Last sample pinned to `hi` so rounding never shrinks the interval
            (0..n)
                .map(|k| if k == n - 1 { hi } else { lo + step * k as f64 })
                .collect()
        }
    }
}

/// Sample coordinates and evaluated heights over an n×n mesh
#[derive(Debug, Clone, PartialEq)]
pub struct Field {
    spec: GridSpec,
    x: Vec<f64>,
    y: Vec<f64>,
    z: Vec<f64>,
}

impl Field {
    /// Build the coordinate mesh for `spec` with an all-zero height field.
    pub fn sample(spec: GridSpec) -> Self {
        let n = spec.resolution;
        let xs = linspace(-(spec.x_limit as f64), spec.x_limit as f64, n);
        let ys = linspace(-(spec.y_limit as f64), spec.y_limit as f64, n);

        let mut x = Vec::with_capacity(n * n);
        let mut y = Vec::with_capacity(n * n);
        for &yi in &ys {
            for &xj in &xs {
                x.push(xj);
                y.push(yi);
            }
        }

        Self {
            spec,
            x,
            y,
            z: vec![0.0; n * n],
        }
    }

    /// Recompute the heights in place over the existing mesh.
    pub fn reevaluate(&mut self, formula: &Formula, coeffs: Coefficients) {
        let mut env = Bindings {
            a: coeffs.a,
            b: coeffs.b,
            c: coeffs.c,
            ..Bindings::default()
        };
        for ((z, &x), &y) in self.z.iter_mut().zip(&self.x).zip(&self.y) {
            env.x = x;
            env.y = y;
            *z = formula.eval(&env);
        }
    }

    /// Flatten the surface to zero height.
    pub fn clear(&mut self) {
        self.z.iter_mut().for_each(|z| *z = 0.0);
    }

    pub fn spec(&self) -> GridSpec {
        self.spec
    }

    pub fn resolution(&self) -> usize {
        self.spec.resolution
    }

    pub fn xs(&self) -> &[f64] {
        &self.x
    }

    pub fn ys(&self) -> &[f64] {
        &self.y
    }

    pub fn zs(&self) -> &[f64] {
        &self.z
    }

    pub fn x_at(&self, i: usize, j: usize) -> f64 {
        self.x[i * self.spec.resolution + j]
    }

    pub fn y_at(&self, i: usize, j: usize) -> f64 {
        self.y[i * self.spec.resolution + j]
    }

    pub fn z_at(&self, i: usize, j: usize) -> f64 {
        self.z[i * self.spec.resolution + j]
    }

    /// Smallest and largest finite height, if any cell is finite.
    pub fn z_range(&self) -> Option<(f64, f64)> {
        finite_range(&self.z)
    }
}

/// Min and max over the finite values of `values`.
pub fn finite_range(values: &[f64]) -> Option<(f64, f64)> {
    values
        .iter()
        .copied()
        .filter(|v| v.is_finite())
        .fold(None, |acc, v| match acc {
            None => Some((v, v)),
            Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
        })
}

/// Sample the grid and evaluate `formula_text` over it.
///
/// A formula that fails to compile is logged and yields an all-zero field of
/// the requested shape; the surface flattens instead of disappearing.
pub fn evaluate(spec: GridSpec, formula_text: &str, coeffs: Coefficients) -> Field {
    let mut field = Field::sample(spec);
    match Formula::compile(formula_text) {
        Ok(formula) => field.reevaluate(&formula, coeffs),
        Err(e) => warn!("Error during field evaluation of '{}': {}", formula_text, e),
    }
    field
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_linspace_endpoints() {
        let xs = linspace(-2.0, 2.0, 5);
        assert_eq!(xs, vec![-2.0, -1.0, 0.0, 1.0, 2.0]);
        assert_eq!(linspace(-3.0, 3.0, 1), vec![-3.0]);
        assert!(linspace(0.0, 1.0, 0).is_empty());
    }

    #[test]
    fn test_linspace_keeps_upper_bound() {
        let xs = linspace(-7.0, 7.0, 333);
        assert_eq!(xs.len(), 333);
        assert_eq!(xs[0], -7.0);
        assert_eq!(xs[332], 7.0);
    }

    #[test]
    fn test_mesh_orientation() {
        let field = Field::sample(GridSpec::new(2, 4, 3));
        // Columns walk X, rows walk Y
        assert_eq!(field.x_at(0, 0), -2.0);
        assert_eq!(field.x_at(0, 2), 2.0);
        assert_eq!(field.x_at(2, 0), -2.0);
        assert_eq!(field.y_at(0, 0), -4.0);
        assert_eq!(field.y_at(2, 0), 4.0);
        assert_eq!(field.y_at(0, 2), -4.0);
    }

    #[test]
    fn test_evaluate_substitutes_coefficients() {
        let coeffs = Coefficients {
            a: 0.0,
            b: 0.0,
            c: 1.5,
        };
        let field = evaluate(GridSpec::new(1, 1, 4), "a * X + b * Y + c", coeffs);
        assert!(field.zs().iter().all(|&z| z == 1.5));
    }

    #[test]
    fn test_evaluate_failure_yields_zero_field() {
        let field = evaluate(GridSpec::new(3, 3, 7), "a * X + (b * Y + c", Coefficients::default());
        assert_eq!(field.zs().len(), 49);
        assert!(field.zs().iter().all(|&z| z == 0.0));
    }

    #[test]
    fn test_finite_range_skips_nan_and_inf() {
        let values = [f64::NAN, 3.0, -1.0, f64::INFINITY, 0.5];
        assert_eq!(finite_range(&values), Some((-1.0, 3.0)));
        assert_eq!(finite_range(&[f64::NAN]), None);
    }

    #[test]
    fn test_reevaluate_in_place() {
        let formula = Formula::compile("a * X + b * Y + c").unwrap();
        let mut field = Field::sample(GridSpec::new(2, 2, 5));
        field.reevaluate(
            &formula,
            Coefficients {
                a: 1.0,
                b: 0.0,
                c: 0.0,
            },
        );
        assert_relative_eq!(field.z_at(3, 4), 2.0);
        field.reevaluate(
            &formula,
            Coefficients {
                a: 0.0,
                b: 1.0,
                c: 0.0,
            },
        );
        assert_relative_eq!(field.z_at(3, 4), 1.0);
        field.clear();
        assert!(field.zs().iter().all(|&z| z == 0.0));
    }
}
