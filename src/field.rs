// The particle field: a fixed set of particles that drift, bounce off the edges of
// the surface, shy away from the pointer and get joined by lines when close together

use crate::color::Color;
use crate::config::FieldConfig;
use crate::particle::Particle;
use crate::pointer::SharedPointer;
use crate::renderer::Surface;
use crate::ticker::Tick;
use rand::Rng;
use vecmath::Vector2;

pub struct Field {
    width: f64,
    height: f64,
    particles: Vec<Particle>,
    config: FieldConfig,
}

impl Field {
    // Particle count is decided here from the viewport width and never revisited
    pub fn new<R: Rng + ?Sized>(
        rng: &mut R,
        viewport_width: f64,
        width: f64,
        height: f64,
        config: FieldConfig,
    ) -> Field {
        let num_particles = config.particle_count(viewport_width);
        let mut particles = Vec::with_capacity(num_particles);
        for _ in 0..num_particles {
            particles.push(Particle::random(rng, width, height, &config));
        }

        Field {
            width,
            height,
            particles,
            config,
        }
    }

    pub fn from_particles(
        width: f64,
        height: f64,
        particles: Vec<Particle>,
        config: FieldConfig,
    ) -> Field {
        Field {
            width,
            height,
            particles,
            config,
        }
    }

    pub fn width(&self) -> f64 {
        self.width
    }

    pub fn height(&self) -> f64 {
        self.height
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    pub fn config(&self) -> &FieldConfig {
        &self.config
    }

    pub fn config_mut(&mut self) -> &mut FieldConfig {
        &mut self.config
    }

    // Positions are not rescaled; particles left outside find their own way back
    pub fn resize(&mut self, width: f64, height: f64) {
        self.width = width;
        self.height = height;
    }

    fn advance(&self, particle: &mut Particle, pointer: Option<Vector2<f64>>) {
        particle.integrate();
        particle.bounce(self.width, self.height);
        if let Some(pointer) = pointer {
            particle.repel(pointer, &self.config);
        }
        if let Some(max_speed) = self.config.max_speed {
            particle.limit_speed(max_speed);
        }
    }

    // Physics only, no drawing
    pub fn step(&mut self, pointer: Option<Vector2<f64>>) {
        let mut particles = std::mem::take(&mut self.particles);
        for particle in &mut particles {
            self.advance(particle, pointer);
        }
        self.particles = particles;
    }

    pub fn frame<S: Surface>(
        &mut self,
        surface: &mut S,
        pointer: Option<Vector2<f64>>,
    ) -> Result<(), S::Error> {
        surface.clear(self.width, self.height)?;

        let mut particles = std::mem::take(&mut self.particles);
        let mut result = Ok(());
        for particle in &mut particles {
            self.advance(particle, pointer);
            result = surface.fill_circle(particle.pos, particle.size, particle.color);
            if result.is_err() {
                break;
            }
        }
        self.particles = particles;
        result?;

        self.render_connections(surface)
    }

    pub fn render_connections<S: Surface>(&self, surface: &mut S) -> Result<(), S::Error> {
        let line_color = Color::from_u32(self.config.base_color);
        for (a, b, opacity) in self.connections() {
            surface.stroke_line(
                self.particles[a].pos,
                self.particles[b].pos,
                self.config.line_width,
                line_color.with_alpha(opacity),
            )?;
        }
        Ok(())
    }

    // Every unordered pair closer than the connection distance, with the line opacity
    pub fn connections(&self) -> Vec<(usize, usize, f64)> {
        let max_distance = self.config.connection_distance;
        let mut pairs = Vec::new();
        for i in 0..self.particles.len() {
            for j in i + 1..self.particles.len() {
                let delta = vecmath::vec2_sub(self.particles[i].pos, self.particles[j].pos);
                let distance = vecmath::vec2_len(delta);
                if distance < max_distance {
                    pairs.push((i, j, connection_opacity(distance, max_distance)));
                }
            }
        }
        pairs
    }
}

// One frame of the field as a scheduled task: reads the shared pointer, updates and
// draws. Draw errors are kept for the host to report since ticks cannot fail.
pub struct FieldTask<S: Surface> {
    pub field: Field,
    pub surface: S,
    pub pointer: SharedPointer,
    last_error: Option<S::Error>,
}

impl<S: Surface> FieldTask<S> {
    pub fn new(field: Field, surface: S, pointer: SharedPointer) -> Self {
        FieldTask {
            field,
            surface,
            pointer,
            last_error: None,
        }
    }

    pub fn take_error(&mut self) -> Option<S::Error> {
        self.last_error.take()
    }
}

impl<S: Surface> Tick for FieldTask<S> {
    fn tick(&mut self, _timestamp: f64) {
        if let Err(err) = self.field.frame(&mut self.surface, self.pointer.get()) {
            self.last_error = Some(err);
        }
    }
}

// 1 for touching particles, fading linearly to 0 at max_distance
pub fn connection_opacity(distance: f64, max_distance: f64) -> f64 {
    if max_distance <= 0.0 {
        return 0.0;
    }
    (1.0 - distance / max_distance).max(0.0).min(1.0)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::{DrawCommand, RecordingSurface};
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn particle(x: f64, y: f64, vx: f64, vy: f64) -> Particle {
        Particle::new(x, y, vx, vy, 2.0, Color::from_u32(0x8b5cf6ff).with_alpha(0.3))
    }

    #[test]
    fn opacity_is_linear_in_distance() {
        assert_eq!(connection_opacity(0.0, 150.0), 1.0);
        assert_eq!(connection_opacity(150.0, 150.0), 0.0);
        assert_eq!(connection_opacity(75.0, 150.0), 0.5);
        assert_eq!(connection_opacity(300.0, 150.0), 0.0);
    }

    #[test]
    fn count_is_fixed_at_creation() {
        let mut rng = StdRng::seed_from_u64(1);
        let mut field = Field::new(&mut rng, 500.0, 500.0, 800.0, FieldConfig::default());
        assert_eq!(field.particles().len(), 50);
        field.resize(1920.0, 1080.0);
        assert_eq!(field.particles().len(), 50);
        assert_eq!((field.width(), field.height()), (1920.0, 1080.0));
    }

    #[test]
    fn resize_keeps_positions() {
        let mut field = Field::from_particles(
            400.0,
            400.0,
            vec![particle(350.0, 350.0, 0.0, 0.0)],
            FieldConfig::default(),
        );
        field.resize(100.0, 100.0);
        assert_eq!(field.particles()[0].pos, [350.0, 350.0]);
    }

    #[test]
    fn shrunk_field_pulls_particles_back() {
        let mut field = Field::from_particles(
            400.0,
            400.0,
            vec![particle(350.0, 20.0, 0.25, 0.0)],
            FieldConfig::default(),
        );
        field.resize(100.0, 100.0);
        for _ in 0..2000 {
            field.step(None);
        }
        let p = field.particles()[0];
        assert!(p.pos[0] <= 100.25, "x = {}", p.pos[0]);
    }

    #[test]
    fn frame_draws_clear_then_particles_then_lines() {
        let mut field = Field::from_particles(
            1024.0,
            768.0,
            vec![particle(100.0, 100.0, 0.0, 0.0), particle(200.0, 100.0, 0.0, 0.0)],
            FieldConfig::default(),
        );
        let mut surface = RecordingSurface::new();
        field.frame(&mut surface, None).unwrap();

        assert_eq!(surface.commands.len(), 4);
        assert_eq!(
            surface.commands[0],
            DrawCommand::Clear {
                width: 1024.0,
                height: 768.0
            }
        );
        assert!(matches!(surface.commands[1], DrawCommand::Circle { .. }));
        assert!(matches!(surface.commands[2], DrawCommand::Circle { .. }));
        match &surface.commands[3] {
            DrawCommand::Line { from, to, width, color } => {
                assert_eq!(*from, [100.0, 100.0]);
                assert_eq!(*to, [200.0, 100.0]);
                assert_eq!(*width, 1.0);
                assert!((color.a - (1.0 - 100.0 / 150.0)).abs() < 1e-12);
            }
            other => panic!("expected a line, got {:?}", other),
        }
    }

    #[test]
    fn distant_pairs_are_not_connected() {
        let field = Field::from_particles(
            1024.0,
            768.0,
            vec![
                particle(0.0, 0.0, 0.0, 0.0),
                particle(150.0, 0.0, 0.0, 0.0),
                particle(149.0, 0.0, 0.0, 0.0),
            ],
            FieldConfig::default(),
        );
        let pairs = field.connections();
        // (0, 1) is exactly at the limit and skipped
        assert_eq!(pairs.len(), 2);
        assert!(pairs.iter().all(|&(a, b, _)| (a, b) != (0, 1)));
    }

    #[test]
    fn pointer_repels_nearby_particles_only() {
        let mut field = Field::from_particles(
            1000.0,
            1000.0,
            vec![particle(500.0, 500.0, 0.0, 0.0), particle(900.0, 900.0, 0.0, 0.0)],
            FieldConfig::default(),
        );
        field.step(Some([450.0, 500.0]));
        assert!(field.particles()[0].vel[0] > 0.0);
        assert_eq!(field.particles()[1].vel, [0.0, 0.0]);
    }

    #[test]
    fn max_speed_clamps_when_configured() {
        let config = FieldConfig {
            max_speed: Some(0.1),
            ..FieldConfig::default()
        };
        let mut field =
            Field::from_particles(1000.0, 1000.0, vec![particle(500.0, 500.0, 0.0, 0.0)], config);
        for _ in 0..500 {
            field.step(Some([501.0, 500.0]));
        }
        assert!(field.particles()[0].speed() <= 0.1 + 1e-12);
    }
}
