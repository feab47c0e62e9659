use std::fmt;

/// Surface variables a formula may reference.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Var {
    X,
    Y,
    A,
    B,
    C,
}

impl Var {
    pub const ALL: [Var; 5] = [Var::X, Var::Y, Var::A, Var::B, Var::C];

    pub fn from_name(name: &str) -> Option<Var> {
        match name {
            "X" => Some(Var::X),
            "Y" => Some(Var::Y),
            "a" => Some(Var::A),
            "b" => Some(Var::B),
            "c" => Some(Var::C),
            _ => None,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Var::X => 'X',
            Var::Y => 'Y',
            Var::A => 'a',
            Var::B => 'b',
            Var::C => 'c',
        }
    }
}

/// Whitelisted math functions.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Arcsin,
    Arccos,
    Arctan,
    Sinh,
    Cosh,
    Tanh,
    Arcsinh,
    Arccosh,
    Arctanh,
    Sqrt,
    Exp,
    Log,
    Abs,
    Arctan2,
}

impl Func {
    pub fn from_name(name: &str) -> Option<Func> {
        let func = match name {
            "sin" => Func::Sin,
            "cos" => Func::Cos,
            "tan" => Func::Tan,
            "arcsin" => Func::Arcsin,
            "arccos" => Func::Arccos,
            "arctan" => Func::Arctan,
            "sinh" => Func::Sinh,
            "cosh" => Func::Cosh,
            "tanh" => Func::Tanh,
            "arcsinh" => Func::Arcsinh,
            "arccosh" => Func::Arccosh,
            "arctanh" => Func::Arctanh,
            "sqrt" => Func::Sqrt,
            "exp" => Func::Exp,
            "log" => Func::Log,
            "abs" => Func::Abs,
            "arctan2" => Func::Arctan2,
            _ => return None,
        };
        Some(func)
    }

    pub fn name(self) -> &'static str {
        match self {
            Func::Sin => "sin",
            Func::Cos => "cos",
            Func::Tan => "tan",
            Func::Arcsin => "arcsin",
            Func::Arccos => "arccos",
            Func::Arctan => "arctan",
            Func::Sinh => "sinh",
            Func::Cosh => "cosh",
            Func::Tanh => "tanh",
            Func::Arcsinh => "arcsinh",
            Func::Arccosh => "arccosh",
            Func::Arctanh => "arctanh",
            Func::Sqrt => "sqrt",
            Func::Exp => "exp",
            Func::Log => "log",
            Func::Abs => "abs",
            Func::Arctan2 => "arctan2",
        }
    }

    pub fn arity(self) -> usize {
        match self {
            Func::Arctan2 => 2,
            _ => 1,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BinOp {
    Add,
    Sub,
    Mul,
    Div,
    Mod,
    Pow,
}

impl BinOp {
    fn symbol(self) -> &'static str {
        match self {
            BinOp::Add => "+",
            BinOp::Sub => "-",
            BinOp::Mul => "*",
            BinOp::Div => "/",
            BinOp::Mod => "%",
            BinOp::Pow => "**",
        }
    }
}

/// Resolved expression tree. Names are bound at parse time, so evaluating a
/// tree cannot fail.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Number(f64),
    Var(Var),
    Neg(Box<Expr>),
    Binary {
        op: BinOp,
        lhs: Box<Expr>,
        rhs: Box<Expr>,
    },
    Call {
        func: Func,
        args: Vec<Expr>,
    },
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Expr::Number(n) => write!(f, "{}", n),
            Expr::Var(v) => write!(f, "{}", v.symbol()),
            Expr::Neg(inner) => write!(f, "(-{})", inner),
            Expr::Binary { op, lhs, rhs } => write!(f, "({} {} {})", lhs, op.symbol(), rhs),
            Expr::Call { func, args } => {
                write!(f, "{}(", func.name())?;
                for (i, arg) in args.iter().enumerate() {
                    if i > 0 {
                        write!(f, ", ")?;
                    }
                    write!(f, "{}", arg)?;
                }
                write!(f, ")")
            }
        }
    }
}
