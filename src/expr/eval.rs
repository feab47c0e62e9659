use crate::expr::ast::{BinOp, Expr, Func, Var};

/// Values substituted for the formula variables at one grid cell.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Bindings {
    pub x: f64,
    pub y: f64,
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Bindings {
    pub fn get(&self, var: Var) -> f64 {
        match var {
            Var::X => self.x,
            Var::Y => self.y,
            Var::A => self.a,
            Var::B => self.b,
            Var::C => self.c,
        }
    }
}

/// Tree-walking evaluation with IEEE semantics: domain errors yield NaN or
/// infinities instead of failing.
pub fn eval(expr: &Expr, env: &Bindings) -> f64 {
    match expr {
        Expr::Number(n) => *n,
        Expr::Var(v) => env.get(*v),
        Expr::Neg(inner) => -eval(inner, env),
        Expr::Binary { op, lhs, rhs } => {
            let l = eval(lhs, env);
            let r = eval(rhs, env);
            apply_binary(*op, l, r)
        }
        Expr::Call { func, args } => match (func, args.as_slice()) {
            (Func::Arctan2, [y, x]) => eval(y, env).atan2(eval(x, env)),
            (_, [arg]) => apply_unary(*func, eval(arg, env)),
            // Arity is checked by the parser
            _ => f64::NAN,
        },
    }
}

fn apply_binary(op: BinOp, l: f64, r: f64) -> f64 {
    match op {
        BinOp::Add => l + r,
        BinOp::Sub => l - r,
        BinOp::Mul => l * r,
        BinOp::Div => l / r,
        BinOp::Mod => floor_mod(l, r),
        BinOp::Pow => l.powf(r),
    }
}

/// Modulo taking the sign of the divisor.
fn floor_mod(l: f64, r: f64) -> f64 {
    let m = l % r;
    if m != 0.0 && (m < 0.0) != (r < 0.0) {
        m + r
    } else {
        m
    }
}

fn apply_unary(func: Func, v: f64) -> f64 {
    match func {
        Func::Sin => v.sin(),
        Func::Cos => v.cos(),
        Func::Tan => v.tan(),
        Func::Arcsin => v.asin(),
        Func::Arccos => v.acos(),
        Func::Arctan => v.atan(),
        Func::Sinh => v.sinh(),
        Func::Cosh => v.cosh(),
        Func::Tanh => v.tanh(),
        Func::Arcsinh => v.asinh(),
        Func::Arccosh => v.acosh(),
        Func::Arctanh => v.atanh(),
        Func::Sqrt => v.sqrt(),
        Func::Exp => v.exp(),
        Func::Log => v.ln(),
        Func::Abs => v.abs(),
        Func::Arctan2 => f64::NAN,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::expr::Formula;
    use approx::assert_relative_eq;

    fn at(src: &str, x: f64, y: f64) -> f64 {
        let formula = Formula::compile(src).unwrap();
        formula.eval(&Bindings {
            x,
            y,
            a: 1.0,
            b: 2.0,
            c: 3.0,
        })
    }

    #[test]
    fn test_arithmetic() {
        assert_relative_eq!(at("a * X**2 + b * Y**2 + c", 2.0, 1.0), 1.0 * 4.0 + 2.0 + 3.0);
        assert_relative_eq!(at("(X - Y) / b", 5.0, 1.0), 2.0);
        assert_relative_eq!(at("-X**2", 3.0, 0.0), -9.0);
    }

    #[test]
    fn test_functions() {
        assert_relative_eq!(at("np.sin(np.pi / 2) * X", 2.0, 0.0), 2.0, epsilon = 1e-12);
        assert_relative_eq!(at("np.log(np.e)", 0.0, 0.0), 1.0, epsilon = 1e-12);
        assert_relative_eq!(at("np.abs(X) + np.sqrt(Y)", -3.0, 16.0), 7.0);
        assert_relative_eq!(
            at("np.arctan2(Y, X)", -1.0, 0.0),
            std::f64::consts::PI,
            epsilon = 1e-12
        );
    }

    #[test]
    fn test_modulo_follows_divisor_sign() {
        assert_relative_eq!(at("X % 3", -1.0, 0.0), 2.0);
        assert_relative_eq!(at("X % -3", 1.0, 0.0), -2.0);
        assert_relative_eq!(at("X % 3", 7.0, 0.0), 1.0);
    }

    #[test]
    fn test_domain_errors_do_not_fail() {
        assert!(at("np.sqrt(X)", -1.0, 0.0).is_nan());
        assert!(at("np.log(X)", 0.0, 0.0).is_infinite());
        assert!(at("a / X", 0.0, 0.0).is_infinite());
        assert!(at("np.arccos(X)", 2.0, 0.0).is_nan());
    }
}
