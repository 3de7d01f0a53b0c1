//! Logging setup: `log` facade dispatched to stderr through `fern`.

use log::LevelFilter;

/// Environment variable overriding the level chosen by flags.
pub const LOG_ENV: &str = "NAMESPACER_LOG";

/// Level for the given flags: `warn` by default, each `-v` one step louder,
/// `-q` errors only.
#[must_use]
pub fn level_for(verbose: u8, quiet: bool) -> LevelFilter {
    if quiet {
        return LevelFilter::Error;
    }
    match verbose {
        0 => LevelFilter::Warn,
        1 => LevelFilter::Info,
        2 => LevelFilter::Debug,
        _ => LevelFilter::Trace,
    }
}

/// Installs the global logger.
///
/// `NAMESPACER_LOG` (e.g. `debug`) wins over the flags when it parses.
/// A logger that is already installed is left in place.
pub fn init(verbose: u8, quiet: bool) {
    let level = std::env::var(LOG_ENV)
        .ok()
        .and_then(|value| value.parse::<LevelFilter>().ok())
        .unwrap_or_else(|| level_for(verbose, quiet));

    let installed = fern::Dispatch::new()
        .format(|out, message, record| {
            out.finish(format_args!("[{} {}] {}", record.level(), record.target(), message));
        })
        .level(level)
        .chain(std::io::stderr())
        .apply();

    if installed.is_err() {
        log::set_max_level(level);
    }
}
