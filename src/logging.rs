//! Logger setup for the binary: errors go to the terminal, everything at the
//! configured level goes to the log file.

use crate::settings::ClientSettings;
use log::LevelFilter;
use simplelog::{
    ColorChoice, CombinedLogger, Config, SharedLogger, TermLogger, TerminalMode, WriteLogger,
};
use std::fs::File;

/// Installs the global logger. A log file that cannot be created only costs the
/// file half; calling this twice leaves the first logger in place.
pub fn init_logging(settings: &ClientSettings) {
    let mut loggers: Vec<Box<dyn SharedLogger>> = vec![TermLogger::new(
        LevelFilter::Error,
        Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )];
    match File::create(&settings.log_file) {
        Ok(file) => loggers.push(WriteLogger::new(
            settings.log_level_filter(),
            Config::default(),
            file,
        )),
        Err(e) => eprintln!("Cannot create log file '{}': {}", settings.log_file, e),
    }
    if let Err(e) = CombinedLogger::init(loggers) {
        eprintln!("Logger already initialised: {}", e);
    }
}
