//! Ambient particle-network background.
//!
//! [`field::ParticleField`] is the animation itself. It draws through the
//! [`field::DrawSurface`] port onto a [`graphics::Canvas`] and is paced by
//! a [`schedule::FrameScheduler`]. [`modes::windowed_mode`] hosts it in a
//! window.

pub mod data;
pub mod field;
pub mod graphics;
pub mod math;
pub mod modes;
pub mod schedule;
