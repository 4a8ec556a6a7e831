use serde::{Deserialize, Serialize};
use thiserror::Error;

use std::time::Duration;

pub const MAX_PARTICLES: usize = 50;
pub const AREA_PER_PARTICLE: u64 = 15_000;
pub const SPEED: f32 = 0.15;
pub const RADIUS_RANGE: [f32; 2] = [0.5, 2.0];
pub const OPACITY_RANGE: [f32; 2] = [0.1, 0.4];
pub const COLOR: [u8; 3] = [0, 212, 255];
pub const LINK_DISTANCE: f32 = 80.0;
pub const LINK_WINDOW: usize = 4;
pub const LINK_OPACITY: f32 = 0.05;
pub const LINK_WIDTH: f32 = 0.5;
pub const RESIZE_DEBOUNCE_MS: u64 = 100;

/// Tunables of the particle field. The defaults are the reference look.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FieldParams {
    /// Upper bound on the pool size regardless of surface area
    pub max_particles: usize,
    /// One particle per this many square pixels
    pub area_per_particle: u64,
    /// Velocity components are drawn from `[-speed, speed)`
    pub speed: f32,
    /// Disc radius range, `[min, max)`
    pub radius: [f32; 2],
    /// Disc opacity range, `[min, max)`
    pub opacity: [f32; 2],
    /// Hue shared by discs and links
    pub color: [u8; 3],
    /// Links are drawn between particles closer than this
    pub link_distance: f32,
    /// How many following particles in pool order are considered for links
    pub link_window: usize,
    /// Link opacity at zero distance
    pub link_opacity: f32,
    pub link_width: f32,
    pub resize_debounce_ms: u64,
}

impl Default for FieldParams {
    fn default() -> Self {
        Self {
            max_particles: MAX_PARTICLES,
            area_per_particle: AREA_PER_PARTICLE,
            speed: SPEED,
            radius: RADIUS_RANGE,
            opacity: OPACITY_RANGE,
            color: COLOR,
            link_distance: LINK_DISTANCE,
            link_window: LINK_WINDOW,
            link_opacity: LINK_OPACITY,
            link_width: LINK_WIDTH,
            resize_debounce_ms: RESIZE_DEBOUNCE_MS,
        }
    }
}

#[derive(Debug, Error, PartialEq)]
pub enum ParamsError {
    #[error("area_per_particle must be positive")]
    ZeroArea,
    #[error("{name} range is inverted: [{min}, {max})")]
    InvertedRange { name: &'static str, min: f32, max: f32 },
    #[error("{name} must be within [0, 1], got {value}")]
    OutOfUnit { name: &'static str, value: f32 },
    #[error("{name} must be a finite non-negative number, got {value}")]
    Negative { name: &'static str, value: f32 },
    #[error("speed {0} is too large")]
    TooFast(f32),
}

impl FieldParams {
    pub fn resize_debounce(&self) -> Duration {
        Duration::from_millis(self.resize_debounce_ms)
    }

    pub fn validate(&self) -> Result<(), ParamsError> {
        if self.area_per_particle == 0 {
            return Err(ParamsError::ZeroArea);
        }

        for (name, value) in [
            ("speed", self.speed),
            ("link_distance", self.link_distance),
            ("link_width", self.link_width),
            ("radius", self.radius[0]),
            ("radius", self.radius[1]),
        ] {
            if !value.is_finite() || value < 0.0 {
                return Err(ParamsError::Negative { name, value });
            }
        }

        // Velocities are drawn from [-speed, speed), whose span must be finite.
        if !(self.speed * 2.0).is_finite() {
            return Err(ParamsError::TooFast(self.speed));
        }

        for (name, [min, max]) in [("radius", self.radius), ("opacity", self.opacity)] {
            if min > max {
                return Err(ParamsError::InvertedRange { name, min, max });
            }
        }

        for (name, value) in [
            ("opacity", self.opacity[0]),
            ("opacity", self.opacity[1]),
            ("link_opacity", self.link_opacity),
        ] {
            if !(0.0..=1.0).contains(&value) {
                return Err(ParamsError::OutOfUnit { name, value });
            }
        }

        Ok(())
    }
}
