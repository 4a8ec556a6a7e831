use rand::Rng;

use super::{surface::DrawSurface, FieldParams, Particle};
use crate::graphics::Rgba;

/// Number of particles for a `width` x `height` surface: one per
/// `area_per_particle` square pixels, capped at `max_particles`.
pub fn particle_count(width: usize, height: usize, params: &FieldParams) -> usize {
    let area = (width as u64).saturating_mul(height as u64);
    let count = area / params.area_per_particle.max(1);

    usize::try_from(count).map_or(params.max_particles, |c| c.min(params.max_particles))
}

/// Opacity of the link between two particles `distance` apart. Falls
/// linearly from `link_opacity` at zero to nothing at `link_distance`.
pub fn link_opacity(distance: f32, params: &FieldParams) -> f32 {
    if distance >= params.link_distance {
        return 0.0;
    }

    params.link_opacity * (1.0 - distance / params.link_distance)
}

/// The particles alive for one surface size.
#[derive(Debug, Clone, Default)]
pub struct ParticlePool {
    particles: Vec<Particle>,
}

impl ParticlePool {
    pub fn generate<R: Rng + ?Sized>(
        width: usize,
        height: usize,
        params: &FieldParams,
        rng: &mut R,
    ) -> Self {
        let count = particle_count(width, height, params);
        let (w, h) = (width as f32, height as f32);

        Self {
            particles: (0..count)
                .map(|_| Particle::spawn(rng, w, h, params))
                .collect(),
        }
    }

    pub fn from_particles(particles: Vec<Particle>) -> Self {
        Self { particles }
    }

    pub fn len(&self) -> usize {
        self.particles.len()
    }

    pub fn is_empty(&self) -> bool {
        self.particles.is_empty()
    }

    pub fn particles(&self) -> &[Particle] {
        &self.particles
    }

    /// Draws one frame onto `surface`.
    ///
    /// Each particle is moved, drawn, then linked to the next
    /// `link_window` particles in pool order. Those have not moved yet
    /// in this frame when the link is drawn.
    pub fn step<S: DrawSurface + ?Sized>(&mut self, surface: &mut S, params: &FieldParams) {
        surface.clear();

        let (w, h) = surface.size();
        let (w, h) = (w as f32, h as f32);

        let color = Rgba::rgb(params.color, 0.0);
        let n = self.particles.len();

        for i in 0..n {
            self.particles[i].advance(w, h);

            let p = self.particles[i];
            surface.fill_disc(p.pos, p.radius, color.with_alpha(p.opacity));

            let window_end = (i + 1).saturating_add(params.link_window).min(n);

            for other in &self.particles[i + 1..window_end] {
                let distance = p.pos.dist(other.pos);

                if distance < params.link_distance {
                    surface.stroke_line(
                        p.pos,
                        other.pos,
                        params.link_width,
                        color.with_alpha(link_opacity(distance, params)),
                    );
                }
            }
        }
    }
}
