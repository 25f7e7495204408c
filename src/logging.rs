//! Logger bootstrap.
//!
//! The terminal belongs to the UI, so log records only ever go to a file.
//! Without a configured file no logger is installed and `log` macros are
//! no-ops.

use std::fs::OpenOptions;
use std::path::Path;

use env_logger::{Builder, Env, Target};

use crate::error::{Error, Result};

pub fn init_logging(log_file: Option<&Path>, default_level: &str) -> Result<()> {
    let Some(path) = log_file else {
        return Ok(());
    };

    let file = OpenOptions::new().create(true).append(true).open(path)?;

    Builder::from_env(Env::default().default_filter_or(default_level))
        .target(Target::Pipe(Box::new(file)))
        .format_timestamp_millis()
        .try_init()
        .map_err(|err| Error::Logger(err.to_string()))?;

    log::info!("Logging to {}", path.display());
    Ok(())
}
