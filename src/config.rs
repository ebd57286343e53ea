// Tunable constants for the particle field. Defaults reproduce the look of the
// portfolio page background: violet points that fade in and out of each other

#[derive(Clone, Debug, PartialEq)]
pub struct FieldConfig {
    /// Viewports narrower than this get `narrow_count` particles
    pub narrow_breakpoint: f64,
    pub narrow_count: usize,
    pub wide_count: usize,
    /// Pairs closer than this are joined by a line
    pub connection_distance: f64,
    /// Particles closer than this to the pointer are pushed away
    pub pointer_radius: f64,
    pub repulsion_strength: f64,
    /// Fraction of the repulsion force applied to velocity each frame
    pub repulsion_damping: f64,
    /// Initial velocity components are drawn from [-initial_speed / 2, initial_speed / 2)
    pub initial_speed: f64,
    pub min_size: f64,
    pub max_size: f64,
    pub min_alpha: f64,
    pub max_alpha: f64,
    /// RRGGBBAA, alpha byte is ignored for particles
    pub base_color: u32,
    pub line_width: f64,
    /// Upper bound on particle speed. Unset means velocity is never clamped
    pub max_speed: Option<f64>,
    pub log_frame_timings: bool,
}

impl FieldConfig {
    pub const NARROW_BREAKPOINT: f64 = 768.0;
    pub const CONNECTION_DISTANCE: f64 = 150.0;
    pub const POINTER_RADIUS: f64 = 200.0;

    pub fn particle_count(&self, viewport_width: f64) -> usize {
        if viewport_width < self.narrow_breakpoint {
            self.narrow_count
        } else {
            self.wide_count
        }
    }
}

impl Default for FieldConfig {
    fn default() -> Self {
        FieldConfig {
            narrow_breakpoint: FieldConfig::NARROW_BREAKPOINT,
            narrow_count: 50,
            wide_count: 100,
            connection_distance: FieldConfig::CONNECTION_DISTANCE,
            pointer_radius: FieldConfig::POINTER_RADIUS,
            repulsion_strength: 1.0,
            repulsion_damping: 0.05,
            initial_speed: 0.5,
            min_size: 1.0,
            max_size: 3.0,
            min_alpha: 0.1,
            max_alpha: 0.6,
            base_color: 0x8b5cf6ff,
            line_width: 1.0,
            max_speed: None,
            log_frame_timings: false,
        }
    }
}
