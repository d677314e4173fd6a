#![cfg(feature = "std")]

use std::env;
use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::Path;
use std::sync::Mutex;

use log::{LevelFilter, Metadata, Record};

/// Where log lines go. stderr shares the terminal with the game grid, so it
/// is only used when explicitly asked for.
enum Sink {
    File(File),
    Stderr,
}

struct SimpleLogger {
    sink: Mutex<Sink>,
}

impl log::Log for SimpleLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if !self.enabled(record.metadata()) {
            return;
        }
        let Ok(mut sink) = self.sink.lock() else {
            return;
        };
        let _ = match &mut *sink {
            Sink::File(file) => writeln!(file, "{} {} - {}", record.level(), record.target(), record.args()),
            Sink::Stderr => writeln!(io::stderr(), "{} - {}", record.level(), record.args()),
        };
    }

    fn flush(&self) {
        if let Ok(mut sink) = self.sink.lock() {
            if let Sink::File(file) = &mut *sink {
                let _ = file.flush();
            }
        }
    }
}

/// Initialize logging with a level taken from the `HOTSEAT_LOG` environment variable.
///
/// With `log_file`, lines are appended there and the level defaults to `info`.
/// Without it, logging goes to stderr only when `HOTSEAT_LOG` is set.
pub fn init_logging(log_file: Option<&Path>) -> io::Result<()> {
    let env_level = env::var("HOTSEAT_LOG")
        .ok()
        .and_then(|lvl| lvl.parse::<LevelFilter>().ok());
    let (sink, level) = match log_file {
        Some(path) => {
            let file = OpenOptions::new().create(true).append(true).open(path)?;
            (Sink::File(file), env_level.unwrap_or(LevelFilter::Info))
        }
        None => (Sink::Stderr, env_level.unwrap_or(LevelFilter::Off)),
    };
    let logger = SimpleLogger {
        sink: Mutex::new(sink),
    };
    if log::set_boxed_logger(Box::new(logger)).is_ok() {
        log::set_max_level(level);
    }
    Ok(())
}
