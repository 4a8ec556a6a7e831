use log::LevelFilter;

/// Sets up `env_logger`. `RUST_LOG` still overrides `level`.
pub fn init(level: &str, quiet: bool) {
    let level = match quiet {
        true => LevelFilter::Warn,
        false => level.parse().unwrap_or(LevelFilter::Info),
    };

    let _ = env_logger::Builder::new()
        .filter_level(level)
        .parse_default_env()
        .format_timestamp(None)
        .try_init();
}
