//! Logger setup: `log` output goes to stdout, optionally teed to a file.

use std::fs::File;
use std::io::{self, Write};
use std::path::Path;

use log::LevelFilter;

/// Writes to stdout and to a log file with ANSI escapes stripped.
struct Tee {
    file: File,
}

impl Write for Tee {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        io::stdout().write_all(buf)?;
        self.file.write_all(&strip_ansi_escapes::strip(buf))?;
        Ok(buf.len())
    }

    fn flush(&mut self) -> io::Result<()> {
        io::stdout().flush()?;
        self.file.flush()
    }
}

/// Level used when `RUST_LOG` is not set.
pub(crate) fn default_level(quiet: bool, verbose: bool) -> LevelFilter {
    if verbose {
        LevelFilter::Debug
    } else if quiet {
        LevelFilter::Warn
    } else {
        LevelFilter::Info
    }
}

/// Initialize the global logger.
///
/// Normal output is the bare message. Verbose output adds a timestamp and
/// the level. `RUST_LOG` overrides the level chosen by the flags.
pub(crate) fn init(quiet: bool, verbose: bool, logfile: Option<&Path>) -> io::Result<()> {
    let mut builder = env_logger::Builder::new();
    builder.filter_level(default_level(quiet, verbose));
    builder.filter_module("html5ever", LevelFilter::Warn);
    builder.filter_module("selectors", LevelFilter::Warn);
    builder.parse_default_env();

    if verbose {
        builder.format(|buf, record| {
            writeln!(
                buf,
                "{} {:<5} {}",
                chrono::Local::now().format("%H:%M:%S%.3f"),
                record.level(),
                record.args()
            )
        });
    } else {
        builder.format(|buf, record| writeln!(buf, "{}", record.args()));
    }

    match logfile {
        Some(path) => {
            let file = File::create(path)?;
            builder.target(env_logger::Target::Pipe(Box::new(Tee { file })));
        }
        None => {
            builder.target(env_logger::Target::Stdout);
        }
    }

    builder.try_init().map_err(io::Error::other)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn level_from_flags() {
        assert_eq!(default_level(false, false), LevelFilter::Info);
        assert_eq!(default_level(true, false), LevelFilter::Warn);
        assert_eq!(default_level(false, true), LevelFilter::Debug);
        assert_eq!(default_level(true, true), LevelFilter::Debug);
    }
}
