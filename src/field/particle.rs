use rand::Rng;

use super::FieldParams;
use crate::math::Vec2;

/// A single point of light. Only `pos` and the sign of `vel` change
/// after spawning.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Particle {
    pub pos: Vec2<f32>,
    /// Displacement per frame
    pub vel: Vec2<f32>,
    pub radius: f32,
    pub opacity: f32,
}

fn uniform<R: Rng + ?Sized>(rng: &mut R, min: f32, max: f32) -> f32 {
    if max > min {
        rng.random_range(min..max)
    } else {
        min
    }
}

impl Particle {
    pub fn new(pos: Vec2<f32>, vel: Vec2<f32>, radius: f32, opacity: f32) -> Self {
        Self {
            pos,
            vel,
            radius,
            opacity,
        }
    }

    pub fn spawn<R: Rng + ?Sized>(rng: &mut R, width: f32, height: f32, params: &FieldParams) -> Self {
        let speed = params.speed;
        let [r_min, r_max] = params.radius;
        let [o_min, o_max] = params.opacity;

        Self {
            pos: Vec2::<f32>::new(uniform(rng, 0.0, width), uniform(rng, 0.0, height)),
            vel: Vec2::<f32>::new(uniform(rng, -speed, speed), uniform(rng, -speed, speed)),
            radius: uniform(rng, r_min, r_max),
            opacity: uniform(rng, o_min, o_max),
        }
    }

    /// Moves one frame forward, then reflects off the surface edges.
    ///
    /// The position is never clamped: a particle may sit up to one step
    /// outside `[0, width] x [0, height]` before the flipped velocity
    /// brings it back.
    pub fn advance(&mut self, width: f32, height: f32) {
        self.pos += self.vel;

        if self.pos.x < 0.0 || self.pos.x > width {
            self.vel.x = -self.vel.x;
        }

        if self.pos.y < 0.0 || self.pos.y > height {
            self.vel.y = -self.vel.y;
        }
    }
}
