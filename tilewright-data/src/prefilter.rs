//! Regional pre-filtering through an external extractor.
//!
//! Cutting a regional dataset down to the requested rectangle once makes the
//! per-tile scans much cheaper. The step is an optimisation: callers treat
//! every [`PrefilterError`] as a signal to scan the unfiltered dataset.

use std::io::{self, Read};
use std::process::{Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use camino::{Utf8Path, Utf8PathBuf};
use log::debug;
use thiserror::Error;
use tilewright_core::GeoBounds;

/// Default wall-clock limit for one extraction.
pub const DEFAULT_PREFILTER_TIMEOUT: Duration = Duration::from_secs(300);

const POLL_INTERVAL: Duration = Duration::from_millis(100);

const STDERR_TAIL_LINES: usize = 20;

/// Errors raised while pre-filtering a dataset.
#[derive(Debug, Error)]
pub enum PrefilterError {
    /// The extractor executable was not found.
    #[error("`{program}` is not installed or not on PATH")]
    ToolMissing {
        /// Program name.
        program: String,
    },
    /// The extractor could not be started.
    #[error("failed to start `{program}`")]
    Spawn {
        /// Program name.
        program: String,
        /// Spawn error.
        #[source]
        source: io::Error,
    },
    /// The extractor exited unsuccessfully.
    #[error("`{program}` exited with {status}: {stderr}")]
    Failed {
        /// Program name.
        program: String,
        /// Exit status.
        status: ExitStatus,
        /// Last lines of standard error.
        stderr: String,
    },
    /// The extractor ran past its time limit and was killed.
    #[error("`{program}` did not finish within {timeout:?}")]
    TimedOut {
        /// Program name.
        program: String,
        /// Limit that was exceeded.
        timeout: Duration,
    },
    /// The output was implausibly small.
    #[error("filtered dataset {path} is only {size} bytes (minimum {minimum})")]
    TooSmall {
        /// Output path.
        path: Utf8PathBuf,
        /// Observed size.
        size: u64,
        /// Required size.
        minimum: u64,
    },
    /// Reading or writing the output failed.
    #[error("filesystem error at {path}")]
    Io {
        /// Path involved.
        path: Utf8PathBuf,
        /// Underlying error.
        #[source]
        source: io::Error,
    },
}

/// Produces a copy of `source` restricted to `bounds`.
pub trait RegionalPrefilter: Send + Sync {
    /// Write the filtered dataset to `output`, replacing any existing file.
    ///
    /// # Errors
    /// Returns [`PrefilterError`] when extraction fails for any reason.
    fn extract(
        &self,
        source: &Utf8Path,
        output: &Utf8Path,
        bounds: &GeoBounds,
    ) -> Result<(), PrefilterError>;
}

/// Runs `osmium extract --bbox` under a timeout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OsmiumExtract {
    program: String,
    timeout: Duration,
}

impl Default for OsmiumExtract {
    fn default() -> Self {
        Self {
            program: "osmium".to_owned(),
            timeout: DEFAULT_PREFILTER_TIMEOUT,
        }
    }
}

impl OsmiumExtract {
    /// Use a specific executable instead of `osmium` from `PATH`.
    #[must_use]
    pub fn with_program(mut self, program: impl Into<String>) -> Self {
        self.program = program.into();
        self
    }

    /// Override the time limit.
    #[must_use]
    pub const fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    fn command(&self, source: &Utf8Path, output: &Utf8Path, bounds: &GeoBounds) -> Command {
        let bbox = format!(
            "{},{},{},{}",
            bounds.west(),
            bounds.south(),
            bounds.east(),
            bounds.north()
        );
        let mut command = Command::new(&self.program);
        command
            .arg("extract")
            .arg("--bbox")
            .arg(bbox)
            .arg("--overwrite")
            .arg("--output")
            .arg(output.as_std_path())
            .arg(source.as_std_path())
            .stdin(Stdio::null())
            .stdout(Stdio::null())
            .stderr(Stdio::piped());
        command
    }
}

impl RegionalPrefilter for OsmiumExtract {
    fn extract(
        &self,
        source: &Utf8Path,
        output: &Utf8Path,
        bounds: &GeoBounds,
    ) -> Result<(), PrefilterError> {
        debug!("{}: extracting {source} into {output}", self.program);
        let mut child = self
            .command(source, output, bounds)
            .spawn()
            .map_err(|err| match err.kind() {
                io::ErrorKind::NotFound => PrefilterError::ToolMissing {
                    program: self.program.clone(),
                },
                _ => PrefilterError::Spawn {
                    program: self.program.clone(),
                    source: err,
                },
            })?;

        // Drain stderr while polling; a chatty tool would otherwise block on a
        // full pipe and never exit.
        let drain = child.stderr.take().map(|mut pipe| {
            thread::spawn(move || {
                let mut captured = Vec::new();
                let _read = pipe.read_to_end(&mut captured);
                captured
            })
        });

        let started = Instant::now();
        let status = loop {
            let polled = child.try_wait().map_err(|source| PrefilterError::Spawn {
                program: self.program.clone(),
                source,
            })?;
            if let Some(status) = polled {
                break status;
            }
            if started.elapsed() >= self.timeout {
                // The child may exit between the poll and the kill.
                let _killed = child.kill();
                let _reaped = child.wait();
                // A grandchild may still hold the pipe; leave the drain detached.
                drop(drain);
                return Err(PrefilterError::TimedOut {
                    program: self.program.clone(),
                    timeout: self.timeout,
                });
            }
            thread::sleep(POLL_INTERVAL);
        };

        let stderr = collect_stderr(drain);
        if status.success() {
            return Ok(());
        }
        Err(PrefilterError::Failed {
            program: self.program.clone(),
            status,
            stderr,
        })
    }
}

/// Trailing lines of the drained stderr, trimmed.
fn collect_stderr(drain: Option<thread::JoinHandle<Vec<u8>>>) -> String {
    let captured = drain
        .and_then(|handle| handle.join().ok())
        .unwrap_or_default();
    let text = String::from_utf8_lossy(&captured);
    let lines: Vec<&str> = text.trim().lines().collect();
    let tail = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines.get(tail..).unwrap_or_default().join("\n")
}
