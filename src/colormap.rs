//! Named colormaps and height-field normalization.
//!
//! Palettes are piecewise-linear blends between color stops, except
//! `cubehelix`, `hsl` and `husl`, which are computed from their defining
//! formulas. Names follow the plotting library the tool grew up with.

use std::f32::consts::TAU;
use std::fmt;

use glam::Vec3;

use crate::error::UnknownColormap;
use crate::grid::finite_range;

/// RGBA color with components in [0, 1]
pub type Rgba = [f32; 4];

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum Colormap {
    GrBu,
    GrBuD,
    PuGr,
    RdBu,
    RdYeBuCy,
    Autumn,
    Blues,
    Cool,
    Coolwarm,
    Cubehelix,
    Diverging,
    Greens,
    Hsl,
    Husl,
    LightBlues,
    Orange,
    Reds,
    Spring,
    Summer,
    #[default]
    Viridis,
}

impl Colormap {
    /// Every supported palette, in the order the selector lists them
    pub const ALL: [Colormap; 20] = [
        Colormap::GrBu,
        Colormap::GrBuD,
        Colormap::PuGr,
        Colormap::RdBu,
        Colormap::RdYeBuCy,
        Colormap::Autumn,
        Colormap::Blues,
        Colormap::Cool,
        Colormap::Coolwarm,
        Colormap::Cubehelix,
        Colormap::Diverging,
        Colormap::Greens,
        Colormap::Hsl,
        Colormap::Husl,
        Colormap::LightBlues,
        Colormap::Orange,
        Colormap::Reds,
        Colormap::Spring,
        Colormap::Summer,
        Colormap::Viridis,
    ];

    pub fn name(self) -> &'static str {
        match self {
            Colormap::GrBu => "GrBu",
            Colormap::GrBuD => "GrBu_d",
            Colormap::PuGr => "PuGr",
            Colormap::RdBu => "RdBu",
            Colormap::RdYeBuCy => "RdYeBuCy",
            Colormap::Autumn => "autumn",
            Colormap::Blues => "blues",
            Colormap::Cool => "cool",
            Colormap::Coolwarm => "coolwarm",
            Colormap::Cubehelix => "cubehelix",
            Colormap::Diverging => "diverging",
            Colormap::Greens => "greens",
            Colormap::Hsl => "hsl",
            Colormap::Husl => "husl",
            Colormap::LightBlues => "light_blues",
            Colormap::Orange => "orange",
            Colormap::Reds => "reds",
            Colormap::Spring => "spring",
            Colormap::Summer => "summer",
            Colormap::Viridis => "viridis",
        }
    }

    /// Resolve a palette by its exact (case-sensitive) name.
    pub fn from_name(name: &str) -> Result<Colormap, UnknownColormap> {
        Self::ALL
            .iter()
            .copied()
            .find(|cm| cm.name() == name)
            .ok_or_else(|| UnknownColormap(name.to_string()))
    }

    fn position(self) -> usize {
        Self::ALL.iter().position(|&cm| cm == self).unwrap_or(0)
    }

    pub fn next(self) -> Colormap {
        Self::ALL[(self.position() + 1) % Self::ALL.len()]
    }

    pub fn prev(self) -> Colormap {
        let len = Self::ALL.len();
        Self::ALL[(self.position() + len - 1) % len]
    }

    /// Map a normalized value to a color; `t` is clamped to [0, 1].
    pub fn map(self, t: f32) -> Rgba {
        let t = if t.is_nan() { 0.0 } else { t.clamp(0.0, 1.0) };
        let rgb = match self {
            Colormap::Cubehelix => cubehelix(t),
            Colormap::Hsl => hsl_to_rgb(t * 330.0, 1.0, 0.5),
            // Softer, evenly bright variant of the hue wheel
            Colormap::Husl => hsl_to_rgb(t * 330.0, 0.7, 0.65),
            stop_based => lerp_stops(stop_based.stops(), t),
        };
        let rgb = rgb.clamp(Vec3::ZERO, Vec3::ONE);
        [rgb.x, rgb.y, rgb.z, 1.0]
    }

    /// Normalize `z` and map every cell, in the same order as `z`.
    pub fn map_field(self, z: &[f64]) -> Vec<Rgba> {
        let mut colors = Vec::with_capacity(z.len());
        self.map_field_into(z, &mut colors);
        colors
    }

    /// Like [`Colormap::map_field`], reusing `out`'s allocation.
    pub fn map_field_into(self, z: &[f64], out: &mut Vec<Rgba>) {
        out.clear();
        out.extend(normalize(z).into_iter().map(|t| self.map(t)));
    }

    fn stops(self) -> &'static [[f32; 3]] {
        match self {
            Colormap::GrBu => &[[0.20, 0.80, 0.20], [0.10, 0.20, 0.90]],
            Colormap::GrBuD => &[[0.00, 0.40, 0.10], [0.00, 0.10, 0.50]],
            Colormap::PuGr => &[[0.50, 0.10, 0.60], [0.95, 0.95, 0.95], [0.20, 0.70, 0.20]],
            Colormap::RdBu => &[[0.80, 0.10, 0.10], [0.95, 0.95, 0.95], [0.10, 0.20, 0.80]],
            Colormap::RdYeBuCy => &[
                [1.00, 0.00, 0.00],
                [1.00, 1.00, 0.00],
                [0.00, 0.00, 1.00],
                [0.00, 1.00, 1.00],
            ],
            Colormap::Autumn => &[[1.00, 0.00, 0.00], [1.00, 1.00, 0.00]],
            Colormap::Blues => &[[1.00, 1.00, 1.00], [0.00, 0.00, 1.00]],
            Colormap::Cool => &[[0.00, 1.00, 1.00], [1.00, 0.00, 1.00]],
            Colormap::Coolwarm => &[
                [0.230, 0.299, 0.754],
                [0.865, 0.865, 0.865],
                [0.706, 0.016, 0.150],
            ],
            Colormap::Diverging => &[
                [0.26, 0.47, 0.78],
                [0.95, 0.95, 0.95],
                [0.82, 0.29, 0.29],
            ],
            Colormap::Greens => &[[1.00, 1.00, 1.00], [0.00, 1.00, 0.00]],
            Colormap::LightBlues => &[[1.00, 1.00, 1.00], [0.55, 0.75, 0.95]],
            Colormap::Orange => &[[1.00, 1.00, 1.00], [1.00, 0.50, 0.00]],
            Colormap::Reds => &[[1.00, 1.00, 1.00], [1.00, 0.00, 0.00]],
            Colormap::Spring => &[[1.00, 0.00, 1.00], [1.00, 1.00, 0.00]],
            Colormap::Summer => &[[0.00, 0.50, 0.40], [1.00, 1.00, 0.40]],
            Colormap::Viridis => &[
                [0.267, 0.005, 0.329],
                [0.229, 0.322, 0.546],
                [0.128, 0.567, 0.551],
                [0.369, 0.789, 0.383],
                [0.993, 0.906, 0.144],
            ],
            Colormap::Cubehelix | Colormap::Hsl | Colormap::Husl => &[[0.0, 0.0, 0.0]],
        }
    }
}

impl fmt::Display for Colormap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Min-max normalize to [0, 1] over the finite cells.
///
/// A constant field, an all-non-finite field and every non-finite cell map to 0.
pub fn normalize(z: &[f64]) -> Vec<f32> {
    match finite_range(z) {
        Some((lo, hi)) if hi != lo => {
            let span = hi - lo;
            z.iter()
                .map(|&v| {
                    if v.is_finite() {
                        ((v - lo) / span) as f32
                    } else {
                        0.0
                    }
                })
                .collect()
        }
        _ => vec![0.0; z.len()],
    }
}

fn lerp_stops(stops: &[[f32; 3]], t: f32) -> Vec3 {
    if stops.len() == 1 {
        return Vec3::from_array(stops[0]);
    }
    let segments = (stops.len() - 1) as f32;
    let scaled = t * segments;
    let idx = (scaled.floor() as usize).min(stops.len() - 2);
    let local = scaled - idx as f32;
    Vec3::from_array(stops[idx]).lerp(Vec3::from_array(stops[idx + 1]), local)
}

/// Green's cubehelix: start 0.5, -1.5 rotations, hue 1.2, gamma 1.
fn cubehelix(t: f32) -> Vec3 {
    const START: f32 = 0.5;
    const ROTATIONS: f32 = -1.5;
    const HUE: f32 = 1.2;

    let phi = TAU * (START / 3.0 + ROTATIONS * t);
    let amp = HUE * t * (1.0 - t) / 2.0;
    let (sin, cos) = phi.sin_cos();
    Vec3::new(
        t + amp * (-0.14861 * cos + 1.78277 * sin),
        t + amp * (-0.29227 * cos - 0.90649 * sin),
        t + amp * (1.97294 * cos),
    )
}

/// HSL to RGB; hue in degrees, saturation and lightness in [0, 1].
fn hsl_to_rgb(hue: f32, saturation: f32, lightness: f32) -> Vec3 {
    let chroma = (1.0 - (2.0 * lightness - 1.0).abs()) * saturation;
    let h = (hue.rem_euclid(360.0)) / 60.0;
    let x = chroma * (1.0 - (h % 2.0 - 1.0).abs());
    let (r, g, b) = match h as u32 {
        0 => (chroma, x, 0.0),
        1 => (x, chroma, 0.0),
        2 => (0.0, chroma, x),
        3 => (0.0, x, chroma),
        4 => (x, 0.0, chroma),
        _ => (chroma, 0.0, x),
    };
    let m = lightness - chroma / 2.0;
    Vec3::new(r + m, g + m, b + m)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_names_round_trip_through_lookup() {
        for cm in Colormap::ALL {
            assert_eq!(Colormap::from_name(cm.name()), Ok(cm));
        }
        assert_eq!(
            Colormap::from_name("Viridis"),
            Err(UnknownColormap("Viridis".to_string()))
        );
    }

    #[test]
    fn test_offers_twenty_palettes() {
        assert_eq!(Colormap::ALL.len(), 20);
        assert!(Colormap::from_name("single_hue").is_err());
        assert_eq!(Colormap::from_name("summer"), Ok(Colormap::Summer));
    }

    #[test]
    fn test_default_is_viridis() {
        assert_eq!(Colormap::default().name(), "viridis");
    }

    #[test]
    fn test_cycling_wraps() {
        assert_eq!(Colormap::Viridis.next(), Colormap::GrBu);
        assert_eq!(Colormap::GrBu.prev(), Colormap::Viridis);
        assert_eq!(Colormap::Cool.next().prev(), Colormap::Cool);
    }

    #[test]
    fn test_constant_field_normalizes_to_zero() {
        let z = vec![4.2; 16];
        assert!(normalize(&z).iter().all(|&t| t == 0.0));
    }

    #[test]
    fn test_normalize_spans_unit_interval() {
        let norm = normalize(&[-2.0, 0.0, 2.0, 6.0]);
        assert_eq!(norm, vec![0.0, 0.25, 0.5, 1.0]);
    }

    #[test]
    fn test_non_finite_cells_map_to_zero() {
        let norm = normalize(&[f64::NAN, 1.0, f64::NEG_INFINITY, 3.0]);
        assert_eq!(norm, vec![0.0, 0.0, 0.0, 1.0]);
        assert!(normalize(&[f64::NAN, f64::NAN]).iter().all(|&t| t == 0.0));
    }

    #[test]
    fn test_endpoints_hit_first_and_last_stop() {
        let lo = Colormap::Autumn.map(0.0);
        let hi = Colormap::Autumn.map(1.0);
        assert_eq!(lo, [1.0, 0.0, 0.0, 1.0]);
        assert_eq!(hi, [1.0, 1.0, 0.0, 1.0]);
        let mid = Colormap::Autumn.map(0.5);
        assert_relative_eq!(mid[1], 0.5);
    }

    #[test]
    fn test_map_clamps_out_of_range() {
        assert_eq!(Colormap::Cool.map(-3.0), Colormap::Cool.map(0.0));
        assert_eq!(Colormap::Cool.map(7.0), Colormap::Cool.map(1.0));
        assert_eq!(Colormap::Cool.map(f32::NAN), Colormap::Cool.map(0.0));
    }

    #[test]
    fn test_every_palette_stays_in_gamut() {
        for cm in Colormap::ALL {
            for k in 0..=64 {
                let rgba = cm.map(k as f32 / 64.0);
                assert!(rgba.iter().all(|c| (0.0..=1.0).contains(c)), "{} out of gamut", cm);
                assert_eq!(rgba[3], 1.0);
            }
        }
    }

    #[test]
    fn test_cubehelix_runs_dark_to_light() {
        let dark = Colormap::Cubehelix.map(0.0);
        let light = Colormap::Cubehelix.map(1.0);
        assert_eq!(&dark[..3], &[0.0, 0.0, 0.0]);
        assert_relative_eq!(light[0], 1.0, epsilon = 1e-6);
        assert_relative_eq!(light[2], 1.0, epsilon = 1e-6);
    }

    #[test]
    fn test_map_field_preserves_order() {
        let colors = Colormap::Reds.map_field(&[0.0, 1.0]);
        assert_eq!(colors.len(), 2);
        assert_eq!(colors[0], [1.0, 1.0, 1.0, 1.0]);
        assert_eq!(colors[1], [1.0, 0.0, 0.0, 1.0]);
    }
}
