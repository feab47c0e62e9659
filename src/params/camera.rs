//! Turntable camera configuration.

/// Orbiting camera around the plot origin
#[derive(Debug, Clone)]
pub struct TurntableCamera {
    /// Vertical field of view (degrees)
    pub fov_degrees: f32,

    /// Distance from the orbit center (world units)
    pub distance: f32,

    /// Angle above the XY plane (degrees)
    pub elevation_degrees: f32,

    /// Rotation around the Z axis (degrees)
    pub azimuth_degrees: f32,

    /// Degrees rotated per arrow-key press
    pub key_step_degrees: f32,

    /// Degrees rotated per pixel of mouse drag
    pub drag_degrees_per_pixel: f32,

    /// Distance multiplier per scroll line (< 1 zooms in)
    pub zoom_factor: f32,

    /// Allowed distance range
    pub min_distance: f32,
    pub max_distance: f32,

    /// Clipping planes (world units)
    pub near_plane: f32,
    pub far_plane: f32,
}

impl Default for TurntableCamera {
    fn default() -> Self {
        Self {
            fov_degrees: 45.0,
            distance: 20.0,
            elevation_degrees: 30.0,
            azimuth_degrees: 30.0,
            key_step_degrees: 5.0,
            drag_degrees_per_pixel: 0.4,
            zoom_factor: 0.9,
            min_distance: 1.0,
            max_distance: 2000.0,
            near_plane: 0.1,
            far_plane: 10_000.0,
        }
    }
}
