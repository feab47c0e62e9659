//! Surface controller owning every piece of plot state.
//!
//! Each entry point performs one transition and leaves the mesh ready to
//! upload:
//! - formula change: validate, then re-evaluate and recolor
//! - limits or resolution change: re-evaluate and recolor
//! - colormap change: recolor only
//! - frame tick: advance coefficients, re-evaluate, recolor, record the delta

use log::{debug, info, warn};

use crate::animation::{Animator, Coefficient, Coefficients, Rule, Speed};
use crate::colormap::{Colormap, Rgba};
use crate::error::{UnknownColormap, ValidationError};
use crate::expr::Formula;
use crate::fps::FpsEstimator;
use crate::grid::{Field, GridSpec};
use crate::params::{AnimationConfig, PlotConfig, START_FUNCTION};
use crate::validate::check_formula;

use super::mesh::SurfaceMesh;

/// Everything needed to start a plot
#[derive(Debug, Clone)]
pub struct PlotSettings {
    pub plot: PlotConfig,
    pub animation: AnimationConfig,
    pub formula: String,
}

impl Default for PlotSettings {
    fn default() -> Self {
        Self {
            plot: PlotConfig::default(),
            animation: AnimationConfig::default(),
            formula: START_FUNCTION.to_string(),
        }
    }
}

pub struct SurfaceController {
    config: PlotConfig,
    formula: Formula,
    grid: GridSpec,
    field: Field,
    colormap: Colormap,
    animator: Animator,
    coefficients: Coefficients,
    fps: FpsEstimator,
    mesh: SurfaceMesh,
    /// Color scratch buffer, refilled on every redisplay
    colors: Vec<Rgba>,
    /// Message from the last rejected formula, cleared on acceptance
    message: Option<String>,
}

impl SurfaceController {
    /// Build the controller and compute the first surface.
    ///
    /// An invalid start formula is logged and replaced with the default one.
    pub fn new(settings: PlotSettings) -> Result<Self, ValidationError> {
        let PlotSettings {
            plot: config,
            animation,
            formula,
        } = settings;

        let formula = match check_formula(&formula) {
            Ok(f) => f,
            Err(e) => {
                warn!("Start formula '{}' rejected: {}", formula, e);
                check_formula(START_FUNCTION)?
            }
        };

        let colormap = Colormap::from_name(&config.colormap).unwrap_or_else(|e| {
            warn!("{}, using {}", e, Colormap::default());
            Colormap::default()
        });

        let grid = GridSpec::new(
            config.clamp_limit(config.x_limit),
            config.clamp_limit(config.y_limit),
            config.clamp_resolution(config.resolution),
        );

        let mut fps = FpsEstimator::new(config.fps_window);
        fps.set_visible(config.show_fps);

        let mut controller = Self {
            formula,
            grid,
            field: Field::sample(grid),
            colormap,
            animator: Animator::new(&animation),
            coefficients: Coefficients::default(),
            fps,
            mesh: SurfaceMesh::new(grid.resolution),
            colors: Vec::with_capacity(grid.cell_count()),
            message: None,
            config,
        };
        controller.refresh_field();
        controller.redisplay();

        info!(
            "Plotting '{}' on {}x{} samples over x ±{}, y ±{}",
            controller.formula.source(),
            grid.resolution,
            grid.resolution,
            grid.x_limit,
            grid.y_limit
        );
        Ok(controller)
    }

    /// Replace the formula if it passes validation.
    ///
    /// On rejection the previous formula and surface stay in effect and the
    /// message is kept for the overlay.
    pub fn set_formula(&mut self, text: &str) -> Result<(), ValidationError> {
        match check_formula(text) {
            Ok(formula) => {
                self.formula = formula;
                self.message = None;
                self.refresh_field();
                self.redisplay();
                match self.field.z_range() {
                    Some((lo, hi)) => info!(
                        "Formula set to '{}', Z in [{:.3}, {:.3}]",
                        self.formula.source(),
                        lo,
                        hi
                    ),
                    None => warn!(
                        "Formula set to '{}', no finite heights on this grid",
                        self.formula.source()
                    ),
                }
                Ok(())
            }
            Err(e) => {
                warn!("Formula '{}' rejected: {}", text, e);
                self.message = Some(e.to_string());
                Err(e)
            }
        }
    }

    pub fn set_x_limit(&mut self, limit: u32) {
        let limit = self.clamped_limit(limit, 'X');
        self.set_grid(GridSpec {
            x_limit: limit,
            ..self.grid
        });
    }

    pub fn set_y_limit(&mut self, limit: u32) {
        let limit = self.clamped_limit(limit, 'Y');
        self.set_grid(GridSpec {
            y_limit: limit,
            ..self.grid
        });
    }

    pub fn set_resolution(&mut self, resolution: usize) {
        let clamped = self.config.clamp_resolution(resolution);
        if clamped != resolution {
            debug!("Resolution {} clamped to {}", resolution, clamped);
        }
        self.set_grid(GridSpec {
            resolution: clamped,
            ..self.grid
        });
    }

    /// Switch palettes by name; the field is left as is.
    pub fn set_colormap(&mut self, name: &str) -> Result<(), UnknownColormap> {
        let colormap = Colormap::from_name(name)?;
        self.select_colormap(colormap);
        Ok(())
    }

    pub fn select_colormap(&mut self, colormap: Colormap) {
        if colormap != self.colormap {
            info!("Colormap set to {}", colormap);
        }
        self.colormap = colormap;
        self.redisplay();
    }

    pub fn set_fps_overlay_visible(&mut self, visible: bool) {
        self.fps.set_visible(visible);
    }

    /// Advance the animation by one frame of `delta_s` seconds.
    pub fn on_frame_tick(&mut self, delta_s: f64) {
        self.coefficients = self.animator.advance(delta_s);
        self.refresh_field();
        self.redisplay();
        self.fps.record(Some(delta_s));
    }

    pub fn set_rule(&mut self, coefficient: Coefficient, rule: Rule) {
        debug!("Rule for {} set to {}", coefficient, rule.label());
        self.animator.set_rule(coefficient, rule);
    }

    pub fn set_speed(&mut self, coefficient: Coefficient, speed: Speed) {
        debug!("Speed for {} set to {}", coefficient, speed.label());
        self.animator.set_speed(coefficient, speed);
    }

    pub fn set_fps_window(&mut self, window: usize) {
        self.fps.set_capacity(window);
    }

    pub fn formula(&self) -> &Formula {
        &self.formula
    }

    pub fn field(&self) -> &Field {
        &self.field
    }

    pub fn mesh(&self) -> &SurfaceMesh {
        &self.mesh
    }

    pub fn coefficients(&self) -> Coefficients {
        self.coefficients
    }

    pub fn fps(&self) -> &FpsEstimator {
        &self.fps
    }

    pub fn colormap(&self) -> Colormap {
        self.colormap
    }

    pub fn grid(&self) -> GridSpec {
        self.grid
    }

    pub fn config(&self) -> &PlotConfig {
        &self.config
    }

    pub fn rule(&self, coefficient: Coefficient) -> Rule {
        self.animator.rule(coefficient)
    }

    pub fn speed(&self, coefficient: Coefficient) -> Speed {
        self.animator.speed(coefficient)
    }

    /// Message from the last rejected formula, if any.
    pub fn message(&self) -> Option<&str> {
        self.message.as_deref()
    }

    /// One-line summary for the overlay.
    pub fn status_line(&self) -> String {
        let mut line = format!(
            "Z = {} | {} | x ±{} y ±{} | n = {}",
            self.formula.source(),
            self.colormap,
            self.grid.x_limit,
            self.grid.y_limit,
            self.grid.resolution
        );
        if let Some(msg) = &self.message {
            line.push_str(" | ");
            line.push_str(msg);
        }
        if let Some(fps) = self.fps.label() {
            line.push_str(" | ");
            line.push_str(&fps);
        }
        line
    }

    fn clamped_limit(&self, limit: u32, axis: char) -> u32 {
        let clamped = self.config.clamp_limit(limit);
        if clamped != limit {
            debug!("{} limit {} clamped to {}", axis, limit, clamped);
        }
        clamped
    }

    fn set_grid(&mut self, grid: GridSpec) {
        self.grid = grid;
        self.refresh_field();
        self.redisplay();
    }

    /// Re-evaluate the field, resampling the coordinates only when the grid
    /// changed.
    fn refresh_field(&mut self) {
        if self.field.spec() != self.grid {
            self.field = Field::sample(self.grid);
        }
        self.field.reevaluate(&self.formula, self.coefficients);
    }

    /// Recolor and push the field into the mesh. Failures keep the last mesh.
    fn redisplay(&mut self) {
        self.colormap
            .map_field_into(self.field.zs(), &mut self.colors);
        if let Err(e) = self.mesh.update(&self.field, &self.colors) {
            warn!("Error during surface update: {}", e);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn controller() -> SurfaceController {
        SurfaceController::new(PlotSettings::default()).unwrap()
    }

    #[test]
    fn test_initial_surface_uses_start_coefficients() {
        let ctl = controller();
        // a = b = 1, c = 0 before the first tick: z = X^2 + Y^2
        let field = ctl.field();
        let (i, j) = (0, 0);
        let expected = field.x_at(i, j).powi(2) + field.y_at(i, j).powi(2);
        assert_relative_eq!(field.z_at(i, j), expected);
        assert_eq!(ctl.mesh().revision(), 1);
        assert_eq!(ctl.mesh().vertices().len(), 100 * 100);
    }

    #[test]
    fn test_invalid_start_formula_falls_back() {
        let ctl = SurfaceController::new(PlotSettings {
            formula: "X + Y".to_string(),
            ..PlotSettings::default()
        })
        .unwrap();
        assert_eq!(ctl.formula().source(), START_FUNCTION);
    }

    #[test]
    fn test_unknown_start_colormap_falls_back() {
        let mut settings = PlotSettings::default();
        settings.plot.colormap = "plasma".to_string();
        let ctl = SurfaceController::new(settings).unwrap();
        assert_eq!(ctl.colormap(), Colormap::Viridis);
    }

    #[test]
    fn test_rejected_formula_leaves_state() {
        let mut ctl = controller();
        let before = ctl.field().clone();
        let err = ctl.set_formula("a * X + b * Y + c + d").unwrap_err();
        assert!(matches!(err, ValidationError::IllegalCharacter('d')));
        assert_eq!(ctl.formula().source(), START_FUNCTION);
        assert_eq!(ctl.field(), &before);
        assert!(ctl.message().unwrap().contains("Remove the character d"));
        assert!(ctl.status_line().contains("Remove the character d"));

        ctl.set_formula("a * X + b * Y + c").unwrap();
        assert_eq!(ctl.message(), None);
    }

    #[test]
    fn test_accepted_formula_reports_height_range() {
        let mut ctl = controller();
        // a = b = 1, c = 0 over [-2, 2]^2
        ctl.set_formula("a * X + b * Y + c").unwrap();
        let (lo, hi) = ctl.field().z_range().unwrap();
        assert_relative_eq!(lo, -4.0, epsilon = 1e-12);
        assert_relative_eq!(hi, 4.0, epsilon = 1e-12);
    }

    #[test]
    fn test_limits_and_resolution_are_clamped() {
        let mut ctl = controller();
        ctl.set_x_limit(0);
        ctl.set_y_limit(500);
        ctl.set_resolution(2);
        assert_eq!(ctl.grid(), GridSpec::new(1, 100, 10));
        assert_eq!(ctl.field().zs().len(), 100);
        assert_eq!(ctl.mesh().resolution(), 10);
    }

    #[test]
    fn test_resolution_change_is_idempotent() {
        let mut ctl = controller();
        ctl.set_resolution(40);
        let once = ctl.field().clone();
        let topology = ctl.mesh().topology();
        ctl.set_resolution(40);
        assert_eq!(ctl.field(), &once);
        assert_eq!(ctl.mesh().topology(), topology);
    }

    #[test]
    fn test_colormap_change_keeps_field() {
        let mut ctl = controller();
        let field = ctl.field().clone();
        let before = ctl.mesh().vertices()[0].color;
        ctl.set_colormap("autumn").unwrap();
        assert_eq!(ctl.field(), &field);
        assert_ne!(ctl.mesh().vertices()[0].color, before);

        let err = ctl.set_colormap("jet").unwrap_err();
        assert_eq!(err, UnknownColormap("jet".to_string()));
        assert_eq!(ctl.colormap(), Colormap::Autumn);
    }

    #[test]
    fn test_frame_tick_animates_and_counts() {
        let mut ctl = controller();
        ctl.set_rule(Coefficient::A, Rule::Static);
        ctl.set_rule(Coefficient::B, Rule::Static);
        ctl.set_rule(Coefficient::C, Rule::Static);
        for _ in 0..10 {
            ctl.on_frame_tick(0.1);
        }
        let c = ctl.coefficients();
        assert_eq!((c.a, c.b, c.c), (1.0, 1.0, 1.0));
        assert_relative_eq!(ctl.fps().rate().unwrap(), 10.0, epsilon = 1e-9);
        assert!(ctl.status_line().ends_with("FPS: 10.0"));

        ctl.set_fps_overlay_visible(false);
        assert!(!ctl.status_line().contains("FPS"));
    }

    #[test]
    fn test_non_finite_heights_render_flat() {
        let mut ctl = controller();
        ctl.set_resolution(11);
        ctl.set_formula("a * X / (b * Y * 0) + c").unwrap();
        assert!(ctl.field().zs().iter().any(|z| !z.is_finite()));
        assert!(ctl.mesh().vertices().iter().all(|v| v.position[2].is_finite()));
    }
}
