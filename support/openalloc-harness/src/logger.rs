//! A minimal [`log::Log`] implementation for the CLI tools, writing
//! directly to stderr. Avoids pulling in `env_logger`/`fern` for a
//! handful of binaries that only ever run on one thread at a time.

use log::{LevelFilter, Log, Metadata, Record};

struct StderrLogger;

static LOGGER: StderrLogger = StderrLogger;

impl Log for StderrLogger {
    fn enabled(&self, metadata: &Metadata) -> bool {
        metadata.level() <= log::max_level()
    }

    fn log(&self, record: &Record) {
        if self.enabled(record.metadata()) {
            eprintln!("[{}] {}", record.level(), record.args());
        }
    }

    fn flush(&self) {}
}

/// Installs [`StderrLogger`] as the global logger at `level`.
///
/// # Panics
/// Panics if a logger has already been installed for this process.
pub fn init(level: LevelFilter) {
    log::set_logger(&LOGGER).expect("logger already initialized");
    log::set_max_level(level);
}
