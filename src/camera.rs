//! Turntable camera orbiting the plot origin with Z up.

use glam::{Mat4, Vec3};

use crate::params::TurntableCamera;

/// Elevation limit keeping the view direction off the up axis
const MAX_ELEVATION_DEGREES: f32 = 89.0;

/// Camera system tracking the current orbit
pub struct CameraSystem {
    params: TurntableCamera,
    azimuth_degrees: f32,
    elevation_degrees: f32,
    distance: f32,
    center: Vec3,
}

impl CameraSystem {
    /// Create a camera at the configured starting orbit
    pub fn new(params: TurntableCamera) -> Self {
        let mut camera = Self {
            azimuth_degrees: params.azimuth_degrees,
            elevation_degrees: 0.0,
            distance: params.distance.clamp(params.min_distance, params.max_distance),
            center: Vec3::ZERO,
            params,
        };
        camera.rotate(0.0, camera.params.elevation_degrees);
        camera
    }

    /// Rotate by the given angles (degrees). Elevation is clamped, azimuth wraps.
    pub fn rotate(&mut self, d_azimuth: f32, d_elevation: f32) {
        self.azimuth_degrees = (self.azimuth_degrees + d_azimuth).rem_euclid(360.0);
        self.elevation_degrees = (self.elevation_degrees + d_elevation)
            .clamp(-MAX_ELEVATION_DEGREES, MAX_ELEVATION_DEGREES);
    }

    /// Rotate by one key step in each direction given by the signs.
    pub fn step(&mut self, azimuth_sign: f32, elevation_sign: f32) {
        let step = self.params.key_step_degrees;
        self.rotate(azimuth_sign * step, elevation_sign * step);
    }

    /// Rotate from a mouse drag of `dx`, `dy` pixels.
    pub fn drag(&mut self, dx: f32, dy: f32) {
        let k = self.params.drag_degrees_per_pixel;
        self.rotate(-dx * k, dy * k);
    }

    /// Zoom by `lines` scroll lines; positive zooms in.
    pub fn zoom(&mut self, lines: f32) {
        let factor = self.params.zoom_factor.powf(lines);
        self.distance =
            (self.distance * factor).clamp(self.params.min_distance, self.params.max_distance);
    }

    pub fn azimuth_degrees(&self) -> f32 {
        self.azimuth_degrees
    }

    pub fn elevation_degrees(&self) -> f32 {
        self.elevation_degrees
    }

    pub fn distance(&self) -> f32 {
        self.distance
    }

    /// Eye position on the orbit sphere
    pub fn eye(&self) -> Vec3 {
        let az = self.azimuth_degrees.to_radians();
        let el = self.elevation_degrees.to_radians();
        let dir = Vec3::new(el.cos() * az.sin(), -el.cos() * az.cos(), el.sin());
        self.center + dir * self.distance
    }

    /// Create view-projection matrix for the given viewport aspect ratio
    pub fn view_proj(&self, aspect_ratio: f32) -> Mat4 {
        let view = Mat4::look_at_rh(self.eye(), self.center, Vec3::Z);
        let proj = Mat4::perspective_rh(
            self.params.fov_degrees.to_radians(),
            aspect_ratio.max(f32::EPSILON),
            self.params.near_plane,
            self.params.far_plane,
        );
        proj * view
    }
}
