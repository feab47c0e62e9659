//! Per-frame animation of the coefficients `a`, `b`, `c`.

use std::fmt;

use crate::params::{AnimationConfig, SPEED_PERCENTAGES};

/// Periodic function driving one coefficient
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Rule {
    #[default]
    Sin,
    Cos,
    Tan,
    /// Constant 1
    Static,
}

impl Rule {
    pub const ALL: [Rule; 4] = [Rule::Sin, Rule::Cos, Rule::Tan, Rule::Static];

    /// Map a selector index (0 sin, 1 cos, 2 tan, 3 static).
    pub fn from_index(index: usize) -> Option<Rule> {
        Self::ALL.get(index).copied()
    }

    pub fn index(self) -> usize {
        match self {
            Rule::Sin => 0,
            Rule::Cos => 1,
            Rule::Tan => 2,
            Rule::Static => 3,
        }
    }

    pub fn next(self) -> Rule {
        Self::ALL[(self.index() + 1) % Self::ALL.len()]
    }

    pub fn label(self) -> &'static str {
        match self {
            Rule::Sin => "sin(t)",
            Rule::Cos => "cos(t)",
            Rule::Tan => "tan(t)",
            Rule::Static => "1; static",
        }
    }

    /// Evaluate the rule at `phase` (time already scaled by speed).
    ///
    /// `tan` is passed through unguarded: near its poles it produces very
    /// large magnitudes.
    pub fn apply(self, phase: f64) -> f64 {
        match self {
            Rule::Sin => phase.sin(),
            Rule::Cos => phase.cos(),
            Rule::Tan => phase.tan(),
            Rule::Static => 1.0,
        }
    }
}

/// Percentage multiplier on elapsed time, restricted to the offered options
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Speed(u32);

impl Default for Speed {
    fn default() -> Self {
        Speed(100)
    }
}

impl Speed {
    pub fn from_percent(percent: u32) -> Option<Speed> {
        SPEED_PERCENTAGES
            .contains(&percent)
            .then_some(Speed(percent))
    }

    pub fn percent(self) -> u32 {
        self.0
    }

    pub fn factor(self) -> f64 {
        self.0 as f64 / 100.0
    }

    /// Next option, wrapping from the fastest to the slowest.
    pub fn next(self) -> Speed {
        let pos = SPEED_PERCENTAGES
            .iter()
            .position(|&p| p == self.0)
            .unwrap_or(0);
        Speed(SPEED_PERCENTAGES[(pos + 1) % SPEED_PERCENTAGES.len()])
    }

    pub fn label(self) -> String {
        format!("Speed = {} %", self.0)
    }
}

/// Which coefficient a setting applies to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Coefficient {
    A,
    B,
    C,
}

impl Coefficient {
    pub const ALL: [Coefficient; 3] = [Coefficient::A, Coefficient::B, Coefficient::C];

    fn slot(self) -> usize {
        match self {
            Coefficient::A => 0,
            Coefficient::B => 1,
            Coefficient::C => 2,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Coefficient::A => 'a',
            Coefficient::B => 'b',
            Coefficient::C => 'c',
        }
    }
}

impl fmt::Display for Coefficient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

/// Current values of the animated coefficients
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Coefficients {
    pub a: f64,
    pub b: f64,
    pub c: f64,
}

impl Default for Coefficients {
    /// Values in effect before the first frame tick
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 1.0,
            c: 0.0,
        }
    }
}

/// Accumulates elapsed time and derives the coefficients from it
#[derive(Debug, Clone)]
pub struct Animator {
    time: f64,
    rules: [Rule; 3],
    speeds: [Speed; 3],
}

impl Animator {
    pub fn new(config: &AnimationConfig) -> Self {
        Self {
            time: 0.0,
            rules: config.rules,
            speeds: config.speeds,
        }
    }

    /// Advance time by `delta_s` and compute this frame's coefficients.
    ///
    /// Negative or non-finite deltas leave the clock where it is.
    pub fn advance(&mut self, delta_s: f64) -> Coefficients {
        if delta_s.is_finite() && delta_s > 0.0 {
            self.time += delta_s;
        }
        self.coefficients()
    }

    /// Coefficients at the current time without advancing it.
    pub fn coefficients(&self) -> Coefficients {
        Coefficients {
            a: self.value(Coefficient::A),
            b: self.value(Coefficient::B),
            c: self.value(Coefficient::C),
        }
    }

    fn value(&self, coefficient: Coefficient) -> f64 {
        let slot = coefficient.slot();
        self.rules[slot].apply(self.time * self.speeds[slot].factor())
    }

    pub fn time(&self) -> f64 {
        self.time
    }

    pub fn rule(&self, coefficient: Coefficient) -> Rule {
        self.rules[coefficient.slot()]
    }

    pub fn speed(&self, coefficient: Coefficient) -> Speed {
        self.speeds[coefficient.slot()]
    }

    pub fn set_rule(&mut self, coefficient: Coefficient, rule: Rule) {
        self.rules[coefficient.slot()] = rule;
    }

    pub fn set_speed(&mut self, coefficient: Coefficient, speed: Speed) {
        self.speeds[coefficient.slot()] = speed;
    }
}
