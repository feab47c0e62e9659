//! Parameter definitions with documented defaults and ranges.
//!
//! All tunable numbers live here:
//! - Grid limits, resolution and their accepted ranges
//! - Animation rules and speed options
//! - Camera and window settings
//! - Formula tables (start formula, examples, whitelist)

mod animation;
mod camera;
mod formulas;
mod plot;
mod render;

// Re-export all types
pub use animation::{AnimationConfig, SPEED_PERCENTAGES};
pub use camera::TurntableCamera;
pub use formulas::{ALLOWED_CALCULATIONS, EXAMPLE_FUNCTIONS, INFO_TEXT, START_FUNCTION};
pub use plot::PlotConfig;
pub use render::RenderConfig;
