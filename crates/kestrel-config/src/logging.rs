use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::path::PathBuf;
use std::sync::{Arc, Once};

use parking_lot::Mutex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use tracing_subscriber::fmt::writer::{BoxMakeWriter, MakeWriterExt};
use tracing_subscriber::layer::SubscriberExt;
use tracing_subscriber::{EnvFilter, Layer};

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[schemars(deny_unknown_fields)]
pub struct LoggingConfig {
    /// Either a bare level (`trace`, `debug`, `info`, `warn`, `error`) or a full `EnvFilter`
    /// directive string such as `kestrel.resolve=debug,info`.
    #[serde(default = "LoggingConfig::default_level")]
    pub level: String,

    /// Emit one JSON object per event instead of human-readable lines.
    #[serde(default)]
    pub json: bool,

    #[serde(default = "LoggingConfig::default_stderr")]
    pub stderr: bool,

    /// Append log lines to this file as well.
    #[serde(default)]
    #[schemars(with = "Option<String>")]
    pub file: Option<PathBuf>,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: Self::default_level(),
            json: false,
            stderr: Self::default_stderr(),
            file: None,
        }
    }
}

impl LoggingConfig {
    fn default_level() -> String {
        "info".to_owned()
    }

    fn default_stderr() -> bool {
        true
    }

    /// Maps the accepted shorthands onto `EnvFilter` syntax; anything else passes through.
    pub(crate) fn normalize_level_directives(level: &str) -> String {
        let trimmed = level.trim();
        if trimmed.is_empty() {
            return Self::default_level();
        }

        match trimmed.to_ascii_lowercase().as_str() {
            "trace" => "trace".to_owned(),
            "debug" => "debug".to_owned(),
            "info" => "info".to_owned(),
            "warn" | "warning" => "warn".to_owned(),
            "error" => "error".to_owned(),
            _ => trimmed.to_owned(),
        }
    }

    pub fn config_env_filter(&self) -> EnvFilter {
        let directives = Self::normalize_level_directives(&self.level);
        EnvFilter::try_new(directives).unwrap_or_else(|_| EnvFilter::new("info"))
    }

    /// The configured filter with `RUST_LOG` appended, so environment directives win on
    /// conflicts.
    pub fn env_filter(&self) -> EnvFilter {
        let config_directives = Self::normalize_level_directives(&self.level);
        match std::env::var("RUST_LOG") {
            Ok(env) if !env.trim().is_empty() => {
                let env = env.trim();
                EnvFilter::try_new(format!("{config_directives},{env}"))
                    .or_else(|_| EnvFilter::try_new(env))
                    .unwrap_or_else(|_| self.config_env_filter())
            }
            _ => self.config_env_filter(),
        }
    }
}

static TRACING_INIT: Once = Once::new();

/// Install the global `tracing` subscriber described by `config`.
///
/// Only the first call in a process has any effect. Returns an error only when the log file
/// cannot be opened; an already-installed global subscriber is left alone.
pub fn init_tracing(config: &LoggingConfig) -> io::Result<()> {
    let file = match &config.file {
        Some(path) => Some(
            OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)?,
        ),
        None => None,
    };

    TRACING_INIT.call_once(|| {
        let writer = make_writer(config.stderr, file);
        let layer = if config.json {
            tracing_subscriber::fmt::layer()
                .json()
                .with_writer(writer)
                .with_ansi(false)
                .boxed()
        } else {
            tracing_subscriber::fmt::layer()
                .with_writer(writer)
                .with_ansi(false)
                .boxed()
        };

        let subscriber = tracing_subscriber::registry()
            .with(config.env_filter())
            .with(layer);
        let _ = tracing::subscriber::set_global_default(subscriber);
    });
    Ok(())
}

fn make_writer(stderr: bool, file: Option<File>) -> BoxMakeWriter {
    let file = file.map(|file| MutexFileMakeWriter {
        file: Arc::new(Mutex::new(file)),
    });

    match (stderr, file) {
        (true, Some(file)) => BoxMakeWriter::new(stderr_writer().and(file)),
        (true, None) => BoxMakeWriter::new(stderr_writer()),
        (false, Some(file)) => BoxMakeWriter::new(file),
        (false, None) => BoxMakeWriter::new(io::sink),
    }
}

// Under `cargo test` this routes through libtest's capture.
#[cfg(debug_assertions)]
fn stderr_writer() -> tracing_subscriber::fmt::TestWriter {
    tracing_subscriber::fmt::TestWriter::with_stderr()
}

#[cfg(not(debug_assertions))]
fn stderr_writer() -> fn() -> io::Stderr {
    io::stderr
}

#[derive(Clone)]
struct MutexFileMakeWriter {
    file: Arc<Mutex<File>>,
}

struct MutexFileWriter {
    file: Arc<Mutex<File>>,
}

impl<'a> tracing_subscriber::fmt::MakeWriter<'a> for MutexFileMakeWriter {
    type Writer = MutexFileWriter;

    fn make_writer(&'a self) -> Self::Writer {
        MutexFileWriter {
            file: Arc::clone(&self.file),
        }
    }
}

impl Write for MutexFileWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.file.lock().write(buf)
    }

    fn flush(&mut self) -> io::Result<()> {
        self.file.lock().flush()
    }
}
