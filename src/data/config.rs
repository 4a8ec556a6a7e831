//! Configuration
//!
//! Configuration is layered, lowest to highest priority:
//! 1. built-in defaults
//! 2. `<dir>/default.toml`
//! 3. `<dir>/user.toml`
//! 4. environment variables (`DRIFTNET_SECTION__KEY`)
//! 5. command-line flags

use std::path::{Path, PathBuf};

use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};

use super::Error;
use crate::field::FieldParams;

pub const DEFAULT_CONFIG_DIR: &str = "config";
pub const ENV_PREFIX: &str = "DRIFTNET_";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    pub window: WindowConfig,
    pub render: RenderConfig,
    pub field: FieldParams,
    pub debug: DebugConfig,
}

impl AppConfig {
    /// Loads `default.toml` and `user.toml` from `config_dir`, both
    /// optional, then applies environment overrides.
    pub fn load_from<P: AsRef<Path>>(config_dir: P) -> Result<Self, Error> {
        let config_dir = config_dir.as_ref();

        let mut figment = Figment::from(Serialized::defaults(AppConfig::default()));

        for name in ["default.toml", "user.toml"] {
            let path = config_dir.join(name);
            if path.exists() {
                figment = figment.merge(Toml::file(path));
            }
        }

        // DRIFTNET_FIELD__MAX_PARTICLES=20 -> field.max_particles = 20
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        Ok(figment.extract()?)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct WindowConfig {
    pub title: String,
    /// Initial inner width in logical pixels
    pub width: u32,
    /// Initial inner height in logical pixels
    pub height: u32,
    /// `#RRGGBB` drawn behind the particles
    pub background: String,
    /// Let mouse input fall through the window
    pub passthrough: bool,
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self {
            title: "driftnet".to_string(),
            width: 1280,
            height: 720,
            background: "#0A0A14".to_string(),
            passthrough: true,
        }
    }
}

impl WindowConfig {
    pub fn background_argb(&self) -> Result<u32, Error> {
        parse_hex_color(&self.background)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Lock the frame rate instead of following the monitor
    pub fps: Option<f32>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DebugConfig {
    pub log_level: String,
    /// Seed for reproducible particle layouts
    pub seed: Option<u64>,
}

impl Default for DebugConfig {
    fn default() -> Self {
        Self {
            log_level: "info".to_string(),
            seed: None,
        }
    }
}

pub fn parse_hex_color(s: &str) -> Result<u32, Error> {
    let hex = s.strip_prefix('#').unwrap_or(s);

    if hex.len() != 6 || !hex.bytes().all(|b| b.is_ascii_hexdigit()) {
        return Err(Error::Args(format!("Invalid color {s:?}, expected #RRGGBB")));
    }

    u32::from_str_radix(hex, 16)
        .map(|rgb| 0xFF_00_00_00 | rgb)
        .map_err(|_| Error::Args(format!("Invalid color {s:?}, expected #RRGGBB")))
}

pub const USAGE: &str = "\
Usage: driftnet [OPTIONS]

Options:
  --size WxH          initial window size
  --fps N             lock the frame rate (default: monitor refresh rate)
  --seed N            reproducible particle layout
  --config DIR        configuration directory (default: config)
  --background HEX    background color, #RRGGBB
  --no-passthrough    let the window receive mouse input
  --quiet             only print warnings and errors
  --help              print this message

Keys:
  Escape              quit
  r                   regenerate the particles
";

/// Flags given on the command line. Anything left `None` falls back to
/// the loaded configuration.
#[derive(Debug, Default, PartialEq)]
pub struct CliArgs {
    pub config_dir: Option<PathBuf>,
    pub size: Option<(u32, u32)>,
    pub fps: Option<f32>,
    pub seed: Option<u64>,
    pub background: Option<String>,
    pub passthrough: Option<bool>,
    pub quiet: bool,
    pub help: bool,
}

impl CliArgs {
    /// Parses the process arguments. The first item is the program name.
    pub fn eval_args<I>(args: I) -> Result<Self, Error>
    where
        I: IntoIterator<Item = String>,
    {
        let mut out = Self::default();

        let mut args = args.into_iter().skip(1);

        while let Some(arg) = args.next() {
            let mut value = |what: &str| {
                args.next()
                    .ok_or_else(|| Error::Args(format!("Expected value for {what}.")))
            };

            match arg.as_str() {
                "--size" => {
                    let s = value("size")?;

                    let parsed = s
                        .split_once('x')
                        .and_then(|(w, h)| Some((w.parse::<u32>().ok()?, h.parse::<u32>().ok()?)));

                    match parsed {
                        Some((w, h)) if w > 0 && h > 0 => out.size = Some((w, h)),
                        _ => return Err(Error::Args(format!("Invalid size {s:?}, expected WxH."))),
                    }
                }

                "--fps" => {
                    let s = value("refresh rate")?;

                    match s.parse::<f32>() {
                        Ok(rate) if rate.is_finite() && rate > 0.0 => out.fps = Some(rate),
                        _ => return Err(Error::Args(format!("Invalid refresh rate {s:?}."))),
                    }
                }

                "--seed" => {
                    let s = value("seed")?;

                    out.seed = Some(
                        s.parse::<u64>()
                            .map_err(|_| Error::Args(format!("Invalid seed {s:?}.")))?,
                    );
                }

                "--config" => out.config_dir = Some(PathBuf::from(value("config directory")?)),

                "--background" => {
                    let s = value("background")?;
                    parse_hex_color(&s)?;
                    out.background = Some(s);
                }

                "--no-passthrough" => out.passthrough = Some(false),

                "--quiet" => out.quiet = true,

                "--help" | "-h" => out.help = true,

                _ => return Err(Error::Args(format!("Unknown option {arg}"))),
            }
        }

        Ok(out)
    }

    pub fn config_dir(&self) -> &Path {
        self.config_dir
            .as_deref()
            .unwrap_or(Path::new(DEFAULT_CONFIG_DIR))
    }

    /// Overrides `config` with whatever was given on the command line.
    pub fn apply(&self, config: &mut AppConfig) {
        if let Some((w, h)) = self.size {
            config.window.width = w;
            config.window.height = h;
        }

        if let Some(fps) = self.fps {
            config.render.fps = Some(fps);
        }

        if let Some(seed) = self.seed {
            config.debug.seed = Some(seed);
        }

        if let Some(bg) = &self.background {
            config.window.background = bg.clone();
        }

        if let Some(passthrough) = self.passthrough {
            config.window.passthrough = passthrough;
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Result<CliArgs, Error> {
        CliArgs::eval_args(
            std::iter::once("driftnet")
                .chain(list.iter().copied())
                .map(String::from),
        )
    }

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.window.width, 1280);
        assert_eq!(config.field.max_particles, 50);
        assert_eq!(config.field.link_distance, 80.0);
        assert_eq!(config.render.fps, None);
    }

    #[test]
    fn test_config_serialization() {
        let config = AppConfig::default();
        let toml = toml::to_string(&config).unwrap();
        assert!(toml.contains("[field]"));
        assert!(toml.contains("area_per_particle = 15000"));

        let back: AppConfig = toml::from_str(&toml).unwrap();
        assert_eq!(back, config);
    }

    #[test]
    fn partial_section_keeps_other_defaults() {
        let config: AppConfig = toml::from_str("[field]\nmax_particles = 10\n").unwrap();
        assert_eq!(config.field.max_particles, 10);
        assert_eq!(config.field.area_per_particle, 15_000);
        assert_eq!(config.window, WindowConfig::default());
    }

    #[test]
    fn hex_colors() {
        assert_eq!(parse_hex_color("#0A0A14").unwrap(), 0xFF_0A_0A_14);
        assert_eq!(parse_hex_color("ffffff").unwrap(), 0xFF_FF_FF_FF);
        assert!(parse_hex_color("#fff").is_err());
        assert!(parse_hex_color("#gggggg").is_err());
    }

    #[test]
    fn sign_is_not_a_hex_digit() {
        assert!(parse_hex_color("+FFFFF").is_err());
        assert!(parse_hex_color("#+FFFFF").is_err());
        assert!(matches!(args(&["--background", "+FFFFF"]), Err(Error::Args(_))));
    }

    #[test]
    fn no_args_is_default() {
        assert_eq!(args(&[]).unwrap(), CliArgs::default());
    }

    #[test]
    fn parses_all_flags() {
        let cli = args(&[
            "--size",
            "800x600",
            "--fps",
            "30",
            "--seed",
            "7",
            "--config",
            "/tmp/cfg",
            "--background",
            "#101010",
            "--no-passthrough",
            "--quiet",
        ])
        .unwrap();

        assert_eq!(cli.size, Some((800, 600)));
        assert_eq!(cli.fps, Some(30.0));
        assert_eq!(cli.seed, Some(7));
        assert_eq!(cli.config_dir(), Path::new("/tmp/cfg"));
        assert_eq!(cli.background.as_deref(), Some("#101010"));
        assert_eq!(cli.passthrough, Some(false));
        assert!(cli.quiet);
        assert!(!cli.help);
    }

    #[test]
    fn rejects_bad_values() {
        assert!(matches!(args(&["--size", "800"]), Err(Error::Args(_))));
        assert!(matches!(args(&["--size", "0x600"]), Err(Error::Args(_))));
        assert!(matches!(args(&["--fps", "-3"]), Err(Error::Args(_))));
        assert!(matches!(args(&["--seed"]), Err(Error::Args(_))));
        assert!(matches!(args(&["--bogus"]), Err(Error::Args(_))));
    }

    #[test]
    fn flags_override_config() {
        let mut config = AppConfig::default();
        let cli = args(&["--size", "300x300", "--seed", "5", "--fps", "24"]).unwrap();

        cli.apply(&mut config);

        assert_eq!((config.window.width, config.window.height), (300, 300));
        assert_eq!(config.debug.seed, Some(5));
        assert_eq!(config.render.fps, Some(24.0));
        assert!(config.window.passthrough);
    }
}
