//! The ambient particle network.
//!
//! A [`ParticleField`] owns its drawing surface and a pool of drifting
//! particles. Once mounted it draws a frame, asks its scheduler for the
//! next one, and keeps doing so until it is unmounted or dropped.
//! Resizes are debounced and rebuild the pool from scratch.

pub mod params;
pub mod particle;
pub mod pool;
pub mod surface;


use std::time::Instant;

use rand::Rng;

pub use params::{FieldParams, ParamsError};
pub use particle::Particle;
pub use pool::{link_opacity, particle_count, ParticlePool};
pub use surface::DrawSurface;

use crate::schedule::{debounce::Debouncer, FrameScheduler, FrameToken};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldState {
    Inactive,
    Running,
}

pub struct ParticleField<S: DrawSurface, F: FrameScheduler, R: Rng> {
    state: FieldState,
    surface: Option<S>,
    pool: ParticlePool,
    params: FieldParams,

    scheduler: F,
    pending: Option<FrameToken>,
    resize: Debouncer<(usize, usize)>,

    rng: R,
    generation: u64,
}

impl<S: DrawSurface, F: FrameScheduler, R: Rng> ParticleField<S, F, R> {
    pub fn new(scheduler: F, rng: R, params: FieldParams) -> Self {
        Self {
            state: FieldState::Inactive,
            surface: None,
            pool: ParticlePool::default(),
            resize: Debouncer::new(params.resize_debounce()),
            params,

            scheduler,
            pending: None,

            rng,
            generation: 0,
        }
    }

    /// Starts animating on `surface`, drawing the first frame right away.
    ///
    /// Without a surface the field stays inactive and does nothing.
    pub fn mount(&mut self, surface: Option<S>) -> FieldState {
        if self.state == FieldState::Running {
            log::warn!("Particle field is already mounted.");
            return self.state;
        }

        let Some(surface) = surface else {
            log::warn!("No drawing surface available, the particle field is disabled.");
            return self.state;
        };

        self.surface = Some(surface);
        self.state = FieldState::Running;
        self.regenerate();

        log::debug!("Particle field mounted with {} particles.", self.pool.len());

        self.draw_frame();
        self.pending = Some(self.scheduler.schedule_next_frame());

        self.state
    }

    /// Stops the animation. The pending frame is cancelled, pending
    /// resizes are forgotten and the pool and surface are released.
    pub fn unmount(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }

        self.resize.reset();
        self.pool = ParticlePool::default();
        self.surface = None;

        if self.state == FieldState::Running {
            log::debug!("Particle field unmounted.");
        }

        self.state = FieldState::Inactive;
    }

    /// Runs the frame `token` was issued for. Returns whether anything
    /// was drawn.
    pub fn on_frame(&mut self, token: FrameToken) -> bool {
        if self.state != FieldState::Running || self.pending != Some(token) {
            log::trace!("Ignoring stale frame {token:?}.");
            return false;
        }

        self.pending = None;
        self.draw_frame();
        self.pending = Some(self.scheduler.schedule_next_frame());

        true
    }

    /// Records a viewport resize. Only the last of a burst is applied, by
    /// [`poll_resize`](Self::poll_resize), once the burst has settled.
    pub fn request_resize(&mut self, width: usize, height: usize, now: Instant) {
        if self.state != FieldState::Running {
            return;
        }

        self.resize.push((width, height), now);
    }

    /// Applies a settled resize, returning the new surface size.
    pub fn poll_resize(&mut self, now: Instant) -> Option<(usize, usize)> {
        if self.state != FieldState::Running {
            return None;
        }

        let (w, h) = self.resize.poll(now)?;

        if let Some(surface) = self.surface.as_mut() {
            surface.resize(w, h);
        }

        self.regenerate();

        log::debug!("Resized to {w}x{h}, {} particles.", self.pool.len());

        Some((w, h))
    }

    pub fn resize_deadline(&self) -> Option<Instant> {
        self.resize.deadline()
    }

    /// Throws the pool away and spawns a new one for the current size.
    pub fn regenerate(&mut self) {
        let Some(surface) = self.surface.as_ref() else {
            return;
        };

        let (w, h) = surface.size();

        self.pool = ParticlePool::generate(w, h, &self.params, &mut self.rng);
        self.generation += 1;
    }

    fn draw_frame(&mut self) {
        if let Some(surface) = self.surface.as_mut() {
            self.pool.step(surface, &self.params);
        }
    }

    pub fn state(&self) -> FieldState {
        self.state
    }

    pub fn surface(&self) -> Option<&S> {
        self.surface.as_ref()
    }

    pub fn pool(&self) -> &ParticlePool {
        &self.pool
    }

    /// How many pools have been generated so far.
    pub fn generation(&self) -> u64 {
        self.generation
    }

    pub fn scheduler(&self) -> &F {
        &self.scheduler
    }

    pub fn scheduler_mut(&mut self) -> &mut F {
        &mut self.scheduler
    }
}

impl<S: DrawSurface, F: FrameScheduler, R: Rng> Drop for ParticleField<S, F, R> {
    fn drop(&mut self) {
        if let Some(token) = self.pending.take() {
            self.scheduler.cancel(token);
        }
    }
}
