use std::env;
use std::fs::File;

use log::LevelFilter;
use simplelog::{Config, WriteLogger};

/// Wire up file logging when `GHOSTWAVE_LOG` names a path. Without it no
/// logger is installed and log macros are no-ops, which keeps the
/// alternate screen clean.
pub fn init() {
    let Ok(path) = env::var("GHOSTWAVE_LOG") else {
        return;
    };
    match File::create(&path) {
        Ok(file) => {
            let _ = WriteLogger::init(LevelFilter::Debug, Config::default(), file);
        }
        Err(e) => eprintln!("ghostwave: cannot open log file {path}: {e}"),
    }
}
