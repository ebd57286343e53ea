// Simple particle struct to keep track of individual position, velocity, size and color,
// plus the per-frame physics: Euler step, edge bounce and pointer repulsion

use crate::color::Color;
use crate::config::FieldConfig;
use rand::Rng;
use vecmath::Vector2;

#[derive(Copy, Clone, Debug, PartialEq)]
pub struct Particle {
    pub pos: Vector2<f64>,
    pub vel: Vector2<f64>,
    pub size: f64,
    pub color: Color,
}

impl Particle {
    pub fn new(
        pos_x: f64,
        pos_y: f64,
        vel_x: f64,
        vel_y: f64,
        size: f64,
        color: Color,
    ) -> Particle {
        Particle {
            pos: [pos_x, pos_y],
            vel: [vel_x, vel_y],
            size,
            color,
        }
    }

    // Uniformly placed inside [0, width] x [0, height] with a small random drift
    pub fn random<R: Rng + ?Sized>(
        rng: &mut R,
        width: f64,
        height: f64,
        config: &FieldConfig,
    ) -> Particle {
        let pos_x = rng.gen::<f64>() * width;
        let pos_y = rng.gen::<f64>() * height;
        let vel_x = (rng.gen::<f64>() - 0.5) * config.initial_speed;
        let vel_y = (rng.gen::<f64>() - 0.5) * config.initial_speed;
        let size = rng.gen::<f64>() * (config.max_size - config.min_size) + config.min_size;
        let alpha = rng.gen::<f64>() * (config.max_alpha - config.min_alpha) + config.min_alpha;
        let color = Color::from_u32(config.base_color).with_alpha(alpha);

        Particle::new(pos_x, pos_y, vel_x, vel_y, size, color)
    }

    // One frame of motion, unit time step
    pub fn integrate(&mut self) {
        self.pos = vecmath::vec2_add(self.pos, self.vel);
    }

    // Reflects velocity on any axis where the particle has left [0, bound] and is
    // still heading away. Position is left alone, so a particle may sit outside the
    // bounds for a frame. Returns which axes flipped.
    pub fn bounce(&mut self, width: f64, height: f64) -> [bool; 2] {
        let bounds = [width, height];
        let mut flipped = [false; 2];
        for axis in 0..2 {
            let p = self.pos[axis];
            let v = self.vel[axis];
            if (p < 0.0 && v < 0.0) || (p > bounds[axis] && v > 0.0) {
                self.vel[axis] = -v;
                flipped[axis] = true;
            }
        }
        flipped
    }

    pub fn repel(&mut self, pointer: Vector2<f64>, config: &FieldConfig) {
        let to_pointer = vecmath::vec2_sub(pointer, self.pos);
        let distance = vecmath::vec2_len(to_pointer);
        // Direction is undefined when sitting exactly on the pointer
        if distance <= 0.0 || distance >= config.pointer_radius {
            return;
        }

        let direction = vecmath::vec2_scale(to_pointer, 1.0 / distance);
        let force = repulsion_factor(distance, config.pointer_radius) * config.repulsion_strength;
        let push = vecmath::vec2_scale(direction, force * config.repulsion_damping);
        self.vel = vecmath::vec2_sub(self.vel, push);
    }

    pub fn speed(&self) -> f64 {
        vecmath::vec2_len(self.vel)
    }

    pub fn limit_speed(&mut self, max_speed: f64) {
        let speed = self.speed();
        if speed > max_speed && speed > 0.0 {
            self.vel = vecmath::vec2_scale(self.vel, max_speed / speed);
        }
    }
}

// Strength of the pointer's push at a given distance: 1 right at the pointer,
// fading linearly to 0 at the edge of the radius
pub fn repulsion_factor(distance: f64, radius: f64) -> f64 {
    if radius <= 0.0 || distance >= radius {
        0.0
    } else {
        (radius - distance.max(0.0)) / radius
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    fn still(x: f64, y: f64) -> Particle {
        Particle::new(x, y, 0.0, 0.0, 2.0, Color::from_u32(0x8b5cf6ff))
    }

    #[test]
    fn random_particles_respect_ranges() {
        let config = FieldConfig::default();
        let mut rng = StdRng::seed_from_u64(7);
        for _ in 0..500 {
            let p = Particle::random(&mut rng, 640.0, 480.0, &config);
            assert!(p.pos[0] >= 0.0 && p.pos[0] <= 640.0);
            assert!(p.pos[1] >= 0.0 && p.pos[1] <= 480.0);
            assert!(p.vel[0].abs() <= 0.25 && p.vel[1].abs() <= 0.25);
            assert!(p.size >= 1.0 && p.size < 3.0);
            assert!(p.color.a >= 0.1 && p.color.a < 0.6);
            assert_eq!((p.color.r, p.color.g, p.color.b), (139, 92, 246));
        }
    }

    #[test]
    fn bounce_flips_only_crossed_axis() {
        let mut p = still(100.0, 50.0);
        p.vel = [0.5, 0.3];
        p.pos = [100.2, 50.0];
        assert_eq!(p.bounce(100.0, 100.0), [true, false]);
        assert_eq!(p.vel, [-0.5, 0.3]);

        p.pos = [40.0, -0.1];
        p.vel = [0.2, -0.4];
        assert_eq!(p.bounce(100.0, 100.0), [false, true]);
        assert_eq!(p.vel, [0.2, 0.4]);
    }

    #[test]
    fn bounce_ignores_inside_and_returning_particles() {
        let mut p = still(0.0, 100.0);
        p.vel = [-0.3, 0.3];
        // On the boundary itself counts as inside
        assert_eq!(p.bounce(100.0, 100.0), [false, false]);

        // Already outside but heading back in
        p.pos = [-2.0, 130.0];
        p.vel = [0.3, -0.3];
        assert_eq!(p.bounce(100.0, 100.0), [false, false]);
        assert_eq!(p.vel, [0.3, -0.3]);
    }

    #[test]
    fn repulsion_factor_fades_to_zero() {
        assert_eq!(repulsion_factor(200.0, 200.0), 0.0);
        assert_eq!(repulsion_factor(350.0, 200.0), 0.0);
        assert_eq!(repulsion_factor(100.0, 200.0), 0.5);

        let mut last = 0.0;
        for step in (1..200).rev() {
            let f = repulsion_factor(step as f64, 200.0);
            assert!(f > last);
            last = f;
        }
    }

    #[test]
    fn repel_pushes_away_from_pointer() {
        let config = FieldConfig::default();
        let mut p = still(100.0, 100.0);
        p.repel([150.0, 100.0], &config);
        // force 0.75, times damping 0.05, straight along -x
        assert!((p.vel[0] + 0.0375).abs() < 1e-12);
        assert_eq!(p.vel[1], 0.0);
    }

    #[test]
    fn repel_outside_radius_or_on_pointer_is_noop() {
        let config = FieldConfig::default();
        let mut far = still(0.0, 0.0);
        far.repel([200.0, 0.0], &config);
        assert_eq!(far.vel, [0.0, 0.0]);

        let mut on_top = still(10.0, 10.0);
        on_top.repel([10.0, 10.0], &config);
        assert_eq!(on_top.vel, [0.0, 0.0]);
        assert!(!on_top.vel[0].is_nan());
    }

    #[test]
    fn limit_speed_keeps_direction() {
        let mut p = still(0.0, 0.0);
        p.vel = [3.0, 4.0];
        p.limit_speed(1.0);
        assert!((p.speed() - 1.0).abs() < 1e-12);
        assert!((p.vel[0] - 0.6).abs() < 1e-12);
        assert!((p.vel[1] - 0.8).abs() < 1e-12);
    }
}
