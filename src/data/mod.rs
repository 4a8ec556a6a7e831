pub mod config;
pub mod log;

use std::time::Duration;

use rand::{rngs::StdRng, SeedableRng};
use thiserror::Error;

use crate::field::ParamsError;
use config::AppConfig;

pub const DEFAULT_MILLI_HZ: u32 = 60 * 1000;

/// Monitors reporting more than this are paced at this rate.
pub const CAP_MILLI_HZ: u32 = 240 * 1000;

#[derive(Debug, Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(#[from] figment::Error),

    #[error("Invalid field parameters: {0}")]
    Params(#[from] ParamsError),

    #[error("Argument error: {0}")]
    Args(String),

    #[error("Event loop error: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum RefreshRateMode {
    Sync,
    Specified,
}

/// Main program struct
pub struct Program {
    pub config: AppConfig,

    milli_hz: u32,
    refresh_rate_mode: RefreshRateMode,
    refresh_rate: Duration,
}

impl Program {
    pub fn new(config: AppConfig) -> Self {
        let mut prog = Self {
            config,
            milli_hz: DEFAULT_MILLI_HZ,
            refresh_rate_mode: RefreshRateMode::Sync,
            refresh_rate: Duration::from_micros(1_000_000_000 / DEFAULT_MILLI_HZ as u64),
        };

        if let Some(fps) = prog.config.render.fps {
            prog.change_fps_frac((fps * 1000.0) as u32);
            prog.refresh_rate_mode = RefreshRateMode::Specified;
        }

        prog
    }

    pub fn change_fps_frac(&mut self, milli_hz: u32) {
        let milli_hz = milli_hz.clamp(1000, CAP_MILLI_HZ);

        self.milli_hz = milli_hz;
        self.refresh_rate = Duration::from_micros(1_000_000_000 / milli_hz as u64);
    }

    pub fn milli_hz(&self) -> u32 {
        self.milli_hz
    }

    pub fn refresh_rate(&self) -> Duration {
        self.refresh_rate
    }

    pub fn refresh_rate_mode(&self) -> RefreshRateMode {
        self.refresh_rate_mode
    }

    /// The random source for particle generation: seeded when the
    /// configuration asks for reproducible output.
    pub fn field_rng(&self) -> StdRng {
        match self.config.debug.seed {
            Some(seed) => StdRng::seed_from_u64(seed),
            None => StdRng::from_rng(&mut rand::rng()),
        }
    }

    pub fn print_startup_info(&self) {
        let window = &self.config.window;

        ::log::info!("Starting driftnet {}", env!("CARGO_PKG_VERSION"));
        ::log::info!("Window: {}x{}", window.width, window.height);

        match self.refresh_rate_mode {
            RefreshRateMode::Specified => {
                ::log::info!("Refresh rate: {}hz (locked)", self.milli_hz as f32 / 1000.0)
            }
            RefreshRateMode::Sync => ::log::info!("Refresh rate: following the monitor"),
        }

        if let Some(seed) = self.config.debug.seed {
            ::log::info!("Particle seed: {seed}");
        }

        if !window.passthrough {
            ::log::info!("Mouse pass-through is off, the window will take input.");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    #[test]
    fn default_program_runs_at_60hz() {
        let prog = Program::new(AppConfig::default());
        assert_eq!(prog.milli_hz(), 60_000);
        assert_eq!(prog.refresh_rate(), Duration::from_micros(16_666));
        assert_eq!(prog.refresh_rate_mode(), RefreshRateMode::Sync);
    }

    #[test]
    fn configured_fps_locks_rate() {
        let mut config = AppConfig::default();
        config.render.fps = Some(30.0);

        let prog = Program::new(config);
        assert_eq!(prog.milli_hz(), 30_000);
        assert_eq!(prog.refresh_rate(), Duration::from_micros(33_333));
        assert_eq!(prog.refresh_rate_mode(), RefreshRateMode::Specified);
    }

    #[test]
    fn fps_is_capped() {
        let mut prog = Program::new(AppConfig::default());
        prog.change_fps_frac(1_000_000);
        assert_eq!(prog.milli_hz(), CAP_MILLI_HZ);

        prog.change_fps_frac(0);
        assert_eq!(prog.milli_hz(), 1000);
    }

    #[test]
    fn seeded_rng_is_reproducible() {
        let mut config = AppConfig::default();
        config.debug.seed = Some(1234);
        let prog = Program::new(config);

        let a: u64 = prog.field_rng().random();
        let b: u64 = prog.field_rng().random();
        assert_eq!(a, b);
    }
}
