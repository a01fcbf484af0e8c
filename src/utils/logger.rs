//! Logger utilities for application-wide logging
//!
//! Console diagnostics go through the `log` facade and `env_logger`. On top
//! of that, a run can keep a plain-text log file listing every region
//! written; [`Logger`] owns that file and can be shared between workers.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::LevelFilter;

/// Run log writing to an optional file
pub struct Logger {
    /// File handle for log output, `None` when disabled
    file: Mutex<Option<File>>,
}

impl Logger {
    /// Creates a new logger writing to a file
    ///
    /// # Arguments
    ///
    /// * `log_file` - Path to the log file, truncated if it exists
    ///
    /// # Returns
    ///
    /// A new Logger instance or an error if the file cannot be created
    pub fn new(log_file: &Path) -> io::Result<Self> {
        let file = File::create(log_file)?;
        Ok(Logger {
            file: Mutex::new(Some(file)),
        })
    }

    /// Creates a logger that discards all messages
    pub fn disabled() -> Self {
        Logger {
            file: Mutex::new(None),
        }
    }

    /// Logs a message to the log file
    ///
    /// # Arguments
    ///
    /// * `message` - The message to log, written as one line
    pub fn log(&self, message: &str) -> io::Result<()> {
        let mut guard = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        if let Some(file) = guard.as_mut() {
            writeln!(file, "{}", message)?;
            file.flush()?;
        }
        Ok(())
    }

    /// Map `-v`/`-q` counts to a console log level
    ///
    /// Warnings are shown by default; each `-v` adds a level, `-q` shows
    /// errors only.
    pub fn level_for(verbosity: u8, quiet: bool) -> LevelFilter {
        if quiet {
            return LevelFilter::Error;
        }
        match verbosity {
            0 => LevelFilter::Warn,
            1 => LevelFilter::Info,
            2 => LevelFilter::Debug,
            _ => LevelFilter::Trace,
        }
    }

    /// Static method to initialize the global console logger
    ///
    /// The level is set explicitly; the environment is not consulted.
    pub fn init_global_logger(level: LevelFilter) {
        let result = env_logger::Builder::new()
            .filter_level(level)
            .format_target(false)
            .try_init();
        if result.is_err() {
            eprintln!("Warning: Global logger was already initialized");
        }
    }
}

impl Default for Logger {
    fn default() -> Self {
        Logger::disabled()
    }
}
