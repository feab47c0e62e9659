//! The plotted surface: geometry and the controller that keeps it current.

mod controller;
mod mesh;

pub use controller::{PlotSettings, SurfaceController};
pub use mesh::{SurfaceMesh, Vertex};
