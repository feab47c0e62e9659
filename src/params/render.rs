//! Window and rendering configuration.

/// Rendering configuration
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Window title prefix
    pub title: String,

    /// Window width (pixels)
    pub window_width: u32,

    /// Window height (pixels)
    pub window_height: u32,

    /// Initial window position (pixels from the top-left of the screen)
    pub window_pos: (i32, i32),

    /// Clear color behind the surface (linear RGB)
    pub background: [f64; 3],
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            title: "Function Plotter".to_string(),
            window_width: 1500,
            window_height: 900,
            window_pos: (100, 100),
            background: [0.0, 0.0, 0.0],
        }
    }
}
