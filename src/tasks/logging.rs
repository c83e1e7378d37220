use crate::FailResult;
use crate::color::gpaint;

use std::fmt;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use log::{Level, LevelFilter};

/// Builder-style setup for logging
#[derive(Debug, Clone, Default)]
pub struct GlobalLogger {
    path: Option<PathBuf>,
    verbosity: Verbosity,
}

impl GlobalLogger {
    /// Also write the log to a file.
    ///
    /// NOTE: Relative paths will not be resolved until apply() is called.
    pub fn path<P: AsRef<Path>>(&mut self, path: P) -> &mut Self
    { self.path = Some(path.as_ref().to_owned()); self }

    /// Any integer will be accepted; the level will be truncated
    /// to the most extreme value supported.
    pub fn verbosity(&mut self, level: i32) -> &mut Self {
        self.verbosity = match level > 0 {
            true => Verbosity::Loud,
            false => Verbosity::Default,
        };
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
enum Verbosity { Default, Loud }

impl Default for Verbosity {
    fn default() -> Self { Verbosity::Default }
}

impl GlobalLogger {
    fn our_level(&self) -> LevelFilter {
        match self.verbosity {
            Verbosity::Default => LevelFilter::Debug,
            Verbosity::Loud => LevelFilter::Trace,
        }
    }

    /// Install the logger.  This can only succeed once per process.
    ///
    /// Messages go to stderr, leaving stdout for program output.
    /// The log file gets the same lines without color codes.
    pub fn apply(&mut self) -> FailResult<()> {
        let start = Instant::now();
        let ours = self.our_level();

        let terminal = fern::Dispatch::new()
            .format(move |out, message, record| {
                out.finish(format_args!("{}", LogLine {
                    elapsed: start.elapsed(),
                    target: record.target(),
                    level: ColorizedLevel(record.level()),
                    message,
                }))
            })
            .chain(std::io::stderr());

        let mut dispatch = fern::Dispatch::new()
            .level(LevelFilter::Info)
            .level_for("symtoep_tasks", ours)
            .level_for("symtoep_project", ours)
            .chain(terminal);

        if let Some(path) = self.path.as_ref() {
            let file = fern::Dispatch::new()
                .format(move |out, message, record| {
                    out.finish(format_args!("{}", LogLine {
                        elapsed: start.elapsed(),
                        target: record.target(),
                        level: record.level(),
                        message,
                    }))
                })
                .chain(fern::log_file(path)?);
            dispatch = dispatch.chain(file);
        }

        dispatch.apply()?;
        Ok(())
    }
}

/// One line of log output, `[   1.234s][target][LEVEL] message`.
struct LogLine<'a, L, M> {
    elapsed: Duration,
    target: &'a str,
    level: L,
    message: M,
}

impl<'a, L: fmt::Display, M: fmt::Display> fmt::Display for LogLine<'a, L, M> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{:>4}.{:03}s][{}][{}] {}",
            self.elapsed.as_secs(),
            self.elapsed.subsec_millis(),
            self.target,
            self.level,
            self.message)
    }
}

#[derive(Debug, Copy, Clone)]
pub struct ColorizedLevel(pub Level);
impl fmt::Display for ColorizedLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let style = match self.0 {
            Level::Error => ansi_term::Colour::Red.bold(),
            Level::Warn  => ansi_term::Colour::Red.normal(),
            Level::Info  => ansi_term::Colour::Cyan.bold(),
            Level::Debug => ansi_term::Colour::Yellow.dimmed(),
            Level::Trace => ansi_term::Colour::Cyan.normal(),
        };
        write!(f, "{}", gpaint::<_, Level>(style, self.0))
    }
}
