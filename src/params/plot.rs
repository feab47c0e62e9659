//! Grid, colormap and overlay defaults with their allowed ranges.

use std::ops::RangeInclusive;

/// Plot sampling and display parameters
#[derive(Debug, Clone)]
pub struct PlotConfig {
    /// Half-width of the X interval: samples span `[-x_limit, x_limit]`
    pub x_limit: u32,

    /// Half-width of the Y interval: samples span `[-y_limit, y_limit]`
    pub y_limit: u32,

    /// Samples per axis (shared by X and Y)
    pub resolution: usize,

    /// Accepted range for both axis limits
    pub limit_range: RangeInclusive<u32>,

    /// Accepted range for the resolution
    pub resolution_range: RangeInclusive<usize>,

    /// Starting colormap name
    pub colormap: String,

    /// Frame deltas averaged by the FPS overlay
    pub fps_window: usize,

    /// Whether the FPS overlay starts visible
    pub show_fps: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            x_limit: 2,
            y_limit: 2,
            resolution: 100,
            limit_range: 1..=100,
            resolution_range: 10..=1000,
            colormap: "viridis".to_string(),
            fps_window: 10,
            show_fps: true,
        }
    }
}

impl PlotConfig {
    pub fn clamp_limit(&self, value: u32) -> u32 {
        value.clamp(*self.limit_range.start(), *self.limit_range.end())
    }

    pub fn clamp_resolution(&self, value: usize) -> usize {
        value.clamp(*self.resolution_range.start(), *self.resolution_range.end())
    }
}
