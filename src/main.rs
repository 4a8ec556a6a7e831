use std::process::ExitCode;

use driftnet::data::{
    config::{AppConfig, CliArgs, USAGE},
    log, Error, Program,
};
use driftnet::modes::windowed_mode::winit_main;

macro_rules! eprintln_red {
    ($arg:expr) => {
        eprintln!("\x1B[31;1m{}\x1B[0m", $arg)
    };
}

fn run(cli: CliArgs) -> Result<(), Error> {
    let mut config = AppConfig::load_from(cli.config_dir())?;
    cli.apply(&mut config);

    log::init(&config.debug.log_level, cli.quiet);

    config.field.validate()?;
    config.window.background_argb()?;

    winit_main(Program::new(config))
}

fn main() -> ExitCode {
    let cli = match CliArgs::eval_args(std::env::args()) {
        Ok(cli) => cli,
        Err(err) => {
            eprintln_red!(err);
            eprint!("\n{USAGE}");
            return ExitCode::FAILURE;
        }
    };

    if cli.help {
        print!("{USAGE}");
        return ExitCode::SUCCESS;
    }

    match run(cli) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln_red!(err);
            ExitCode::FAILURE
        }
    }
}
