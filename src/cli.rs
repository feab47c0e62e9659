//! Command-line argument parsing.

use clap::{Parser, ValueEnum};

use crate::animation::{Rule, Speed};
use crate::params::{AnimationConfig, PlotConfig, SPEED_PERCENTAGES, START_FUNCTION};
use crate::surface::PlotSettings;

/// Animation rule as spelled on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum RuleArg {
    Sin,
    Cos,
    Tan,
    Static,
}

impl From<RuleArg> for Rule {
    fn from(arg: RuleArg) -> Self {
        match arg {
            RuleArg::Sin => Rule::Sin,
            RuleArg::Cos => Rule::Cos,
            RuleArg::Tan => Rule::Tan,
            RuleArg::Static => Rule::Static,
        }
    }
}

/// Command line arguments
#[derive(Parser, Debug)]
#[command(name = "surfplot")]
#[command(about = "Animated 3D surface plotter for Z = f(X, Y, a, b, c)", long_about = None)]
pub struct Args {
    /// Starting formula
    #[arg(long, value_name = "FORMULA", default_value = START_FUNCTION)]
    pub formula: String,

    /// Starting colormap (see --list-colormaps)
    #[arg(long, value_name = "NAME", default_value = "viridis")]
    pub colormap: String,

    /// Half-width of the X interval
    #[arg(long, value_name = "N", default_value_t = 2)]
    pub x_limit: u32,

    /// Half-width of the Y interval
    #[arg(long, value_name = "N", default_value_t = 2)]
    pub y_limit: u32,

    /// Samples per axis
    #[arg(long, value_name = "N", default_value_t = 100)]
    pub resolution: usize,

    /// Animation rule for a
    #[arg(long, value_enum, default_value = "sin")]
    pub rule_a: RuleArg,

    /// Animation rule for b
    #[arg(long, value_enum, default_value = "sin")]
    pub rule_b: RuleArg,

    /// Animation rule for c
    #[arg(long, value_enum, default_value = "static")]
    pub rule_c: RuleArg,

    /// Speed of a in percent (5, 10, 25, 50, 100, 150, 200)
    #[arg(long, value_name = "PERCENT", default_value = "100", value_parser = parse_speed)]
    pub speed_a: Speed,

    /// Speed of b in percent
    #[arg(long, value_name = "PERCENT", default_value = "100", value_parser = parse_speed)]
    pub speed_b: Speed,

    /// Speed of c in percent
    #[arg(long, value_name = "PERCENT", default_value = "100", value_parser = parse_speed)]
    pub speed_c: Speed,

    /// Frame deltas averaged by the FPS overlay
    #[arg(long, value_name = "FRAMES", default_value_t = 10)]
    pub fps_window: usize,

    /// Start with the FPS overlay hidden
    #[arg(long)]
    pub hide_fps: bool,

    /// Print the supported colormaps and exit
    #[arg(long)]
    pub list_colormaps: bool,

    /// Print the example formulas and exit
    #[arg(long)]
    pub list_examples: bool,

    /// Validate a formula and exit without opening a window
    #[arg(long, value_name = "FORMULA")]
    pub check: Option<String>,
}

fn parse_speed(s: &str) -> Result<Speed, String> {
    let percent: u32 = s
        .trim()
        .trim_end_matches('%')
        .parse()
        .map_err(|e| format!("invalid speed '{}': {}", s, e))?;
    Speed::from_percent(percent)
        .ok_or_else(|| format!("speed must be one of {:?} percent", SPEED_PERCENTAGES))
}

impl Args {
    /// Collect plot settings from the parsed arguments
    pub fn plot_settings(&self) -> PlotSettings {
        PlotSettings {
            plot: PlotConfig {
                x_limit: self.x_limit,
                y_limit: self.y_limit,
                resolution: self.resolution,
                colormap: self.colormap.clone(),
                fps_window: self.fps_window,
                show_fps: !self.hide_fps,
                ..PlotConfig::default()
            },
            animation: AnimationConfig {
                rules: [self.rule_a.into(), self.rule_b.into(), self.rule_c.into()],
                speeds: [self.speed_a, self.speed_b, self.speed_c],
            },
            formula: self.formula.clone(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults_match_params() {
        let args = Args::try_parse_from(["surfplot"]).unwrap();
        let settings = args.plot_settings();
        let defaults = PlotSettings::default();
        assert_eq!(settings.formula, defaults.formula);
        assert_eq!(settings.animation, defaults.animation);
        assert_eq!(settings.plot.x_limit, defaults.plot.x_limit);
        assert_eq!(settings.plot.resolution, defaults.plot.resolution);
        assert_eq!(settings.plot.colormap, defaults.plot.colormap);
        assert!(settings.plot.show_fps);
    }

    #[test]
    fn test_overrides() {
        let args = Args::try_parse_from([
            "surfplot",
            "--rule-b",
            "tan",
            "--speed-c",
            "25%",
            "--resolution",
            "40",
            "--hide-fps",
        ])
        .unwrap();
        let settings = args.plot_settings();
        assert_eq!(settings.animation.rules[1], Rule::Tan);
        assert_eq!(settings.animation.speeds[2].percent(), 25);
        assert_eq!(settings.plot.resolution, 40);
        assert!(!settings.plot.show_fps);
    }

    #[test]
    fn test_rejects_unoffered_speed() {
        assert!(Args::try_parse_from(["surfplot", "--speed-a", "33"]).is_err());
        assert!(Args::try_parse_from(["surfplot", "--speed-a", "fast"]).is_err());
    }
}
