mod board;
mod config;
mod console;
mod error;
mod food;
mod game;
mod input;
mod render;
mod signal;
mod snake;

use std::fs::File;
use std::io;
use std::process::ExitCode;

use log::{error, info};
use simplelog::{Config, WriteLogger};

use crate::config::Settings;
use crate::console::TuiConsole;
use crate::error::GameError;
use crate::signal::Interrupt;

/// Exit code after Ctrl+C, as a shell would report SIGINT.
const INTERRUPTED_EXIT: u8 = 130;

fn init_logging(settings: &Settings) -> io::Result<()> {
    WriteLogger::init(
        settings.log_level,
        Config::default(),
        File::create(&settings.log_file)?,
    )
    .map_err(io::Error::other)
}

fn run(settings: &Settings) -> Result<game::Outcome, GameError> {
    // Set up logging before anything else
    init_logging(settings)?;
    info!("Starting terminal snake");

    console::install_panic_hook();
    let interrupt = Interrupt::install()?;
    let mut console = TuiConsole::stdout()?;
    game::play(&mut console, settings, &interrupt, rand::thread_rng())
}

fn main() -> ExitCode {
    let settings = Settings::from_env();

    match run(&settings) {
        Ok(outcome) => {
            info!("Exiting after {:?}", outcome);
            ExitCode::SUCCESS
        }
        Err(GameError::Interrupted) => {
            info!("Interrupted by user");
            eprintln!("Game interrupted by user");
            ExitCode::from(INTERRUPTED_EXIT)
        }
        Err(e) => {
            error!("{}", e);
            eprintln!("An error occurred: {}", e);
            if e.is_startup() {
                eprintln!(
                    "Make sure your terminal supports raw mode and is large enough for the game."
                );
            }
            ExitCode::FAILURE
        }
    }
}
