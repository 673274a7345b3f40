use rand::seq::SliceRandom;
use rand::Rng;
use std::time::SystemTime;

const PARTICLE_COUNT: usize = 100;
const SPREAD_DEGREES: f64 = 70.0;
const BURST_SECS: f64 = 3.0;
const GRAVITY: f64 = 15.0;

/// One piece of confetti.
#[derive(Debug, Clone)]
pub struct Particle {
    pub x: f64,
    pub y: f64,
    vel_x: f64,
    vel_y: f64,
    pub symbol: char,
    pub color_index: usize,
    age: f64,
    max_age: f64,
}

impl Particle {
    fn new(x: f64, y: f64, rng: &mut impl Rng) -> Self {
        // Launch upward within the spread cone, measured from vertical
        let half_spread = SPREAD_DEGREES.to_radians() / 2.0;
        let angle = rng.gen_range(-half_spread..half_spread);
        let speed = rng.gen_range(8.0..18.0);

        Self {
            x,
            y,
            vel_x: speed * angle.sin(),
            vel_y: -speed * angle.cos(),
            symbol: *['*', 'o', '+', '.', '~'].choose(rng).unwrap_or(&'*'),
            color_index: rng.gen_range(0..7),
            age: 0.0,
            max_age: rng.gen_range(2.0..4.0),
        }
    }

    fn update(&mut self, dt: f64) -> bool {
        self.x += self.vel_x * dt;
        self.y += self.vel_y * dt;
        self.vel_y += GRAVITY * dt;
        self.age += dt;
        self.age < self.max_age
    }

    /// Remaining life fraction, 1.0 fresh down to 0.0 expired.
    pub fn fade(&self) -> f64 {
        1.0 - self.age / self.max_age
    }
}

/// Confetti burst fired over the results screen after a fast and clean
/// session.
#[derive(Debug)]
pub struct Confetti {
    pub particles: Vec<Particle>,
    started_at: SystemTime,
    pub is_active: bool,
    terminal_width: f64,
    terminal_height: f64,
}

impl Confetti {
    pub fn new() -> Self {
        Self {
            particles: Vec::new(),
            started_at: SystemTime::now(),
            is_active: false,
            terminal_width: 80.0,
            terminal_height: 24.0,
        }
    }

    /// Fire a burst from the center of the screen.
    pub fn launch(&mut self, width: u16, height: u16) {
        let mut rng = rand::thread_rng();

        self.particles.clear();
        self.started_at = SystemTime::now();
        self.is_active = true;
        self.terminal_width = width as f64;
        self.terminal_height = height as f64;

        let center_x = width as f64 / 2.0;
        let center_y = height as f64 / 2.0;

        for _ in 0..PARTICLE_COUNT {
            self.particles
                .push(Particle::new(center_x, center_y, &mut rng));
        }
    }

    /// Advance the animation by one tick; expires after a few seconds
    /// or once every particle has fallen off screen.
    pub fn update(&mut self) {
        if !self.is_active {
            return;
        }

        let elapsed = self.started_at.elapsed().unwrap_or_default().as_secs_f64();
        if elapsed >= BURST_SECS {
            self.is_active = false;
            self.particles.clear();
            return;
        }

        let dt = 0.1;
        let (width, height) = (self.terminal_width, self.terminal_height);
        self.particles.retain_mut(|particle| {
            let still_alive = particle.update(dt);

            let buffer = 5.0;
            let off_screen = particle.y > height + buffer
                || particle.x < -buffer
                || particle.x > width + buffer;
            still_alive && !off_screen
        });

        if self.particles.is_empty() {
            self.is_active = false;
        }
    }
}

impl Default for Confetti {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_confetti_is_inactive() {
        let confetti = Confetti::new();

        assert!(!confetti.is_active);
        assert!(confetti.particles.is_empty());
    }

    #[test]
    fn test_launch_spawns_full_burst() {
        let mut confetti = Confetti::new();

        confetti.launch(80, 24);

        assert!(confetti.is_active);
        assert_eq!(confetti.particles.len(), PARTICLE_COUNT);
    }

    #[test]
    fn test_particles_move_and_fall() {
        let mut rng = rand::thread_rng();
        let mut particle = Particle::new(40.0, 12.0, &mut rng);
        let initial_y = particle.y;
        let initial_vel_y = particle.vel_y;

        let still_alive = particle.update(0.1);

        assert!(still_alive);
        assert_ne!(particle.y, initial_y);
        // Gravity pulls the vertical velocity down each step
        assert!(particle.vel_y > initial_vel_y);
    }

    #[test]
    fn test_burst_spread_is_mostly_upward() {
        let mut rng = rand::thread_rng();

        for _ in 0..50 {
            let particle = Particle::new(40.0, 12.0, &mut rng);
            assert!(particle.vel_y < 0.0, "fresh confetti should fly upward");
        }
    }

    #[test]
    fn test_update_keeps_animation_alive_initially() {
        let mut confetti = Confetti::new();
        confetti.launch(80, 24);

        for _ in 0..5 {
            confetti.update();
        }

        assert!(confetti.is_active);
    }

    #[test]
    fn test_fade_decreases_with_age() {
        let mut rng = rand::thread_rng();
        let mut particle = Particle::new(40.0, 12.0, &mut rng);

        let fresh = particle.fade();
        particle.update(0.5);
        let aged = particle.fade();

        assert!(fresh > aged);
    }

    #[test]
    fn test_off_screen_particles_are_culled() {
        let mut confetti = Confetti::new();
        confetti.launch(20, 10);

        for _ in 0..20 {
            confetti.update();
        }

        for particle in &confetti.particles {
            assert!(particle.y <= 15.0);
            assert!(particle.x >= -5.0 && particle.x <= 25.0);
        }
    }

    #[test]
    fn test_update_when_inactive_is_a_no_op() {
        let mut confetti = Confetti::new();

        confetti.update();

        assert!(!confetti.is_active);
        assert!(confetti.particles.is_empty());
    }
}
