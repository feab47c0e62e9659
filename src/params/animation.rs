//! Coefficient animation defaults.

use crate::animation::{Rule, Speed};

/// Speed percentages offered for every coefficient
pub const SPEED_PERCENTAGES: [u32; 7] = [5, 10, 25, 50, 100, 150, 200];

/// Per-coefficient rule and speed selection, indexed `[a, b, c]`
#[derive(Debug, Clone, PartialEq)]
pub struct AnimationConfig {
    pub rules: [Rule; 3],
    pub speeds: [Speed; 3],
}

impl Default for AnimationConfig {
    fn default() -> Self {
        Self {
            // c starts static so the default paraboloid only breathes in a and b
            rules: [Rule::Sin, Rule::Sin, Rule::Static],
            speeds: [Speed::default(); 3],
        }
    }
}
