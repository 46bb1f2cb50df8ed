use std::fs::{self, File, OpenOptions};
use std::io::{self, Read, Seek, SeekFrom, Write};
use std::path::Path;
use std::sync::{Arc, Mutex};

use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::{EnvFilter, fmt, layer::SubscriberExt, util::SubscriberInitExt};

/// Maximum log file size before rotation (5 MB)
const MAX_LOG_SIZE: u64 = 5 * 1024 * 1024;
/// Size to keep after rotation (1 MB of most recent logs)
const KEEP_SIZE: u64 = 1024 * 1024;

/// Rotate log file if it exceeds the maximum size.
/// Keeps only the most recent KEEP_SIZE bytes.
fn rotate_log_if_needed(log_path: &Path) -> io::Result<()> {
    if !log_path.exists() {
        return Ok(());
    }

    let metadata = fs::metadata(log_path)?;
    if metadata.len() <= MAX_LOG_SIZE {
        return Ok(());
    }

    let mut file = File::open(log_path)?;
    let start_pos = metadata.len().saturating_sub(KEEP_SIZE);
    file.seek(SeekFrom::Start(start_pos))?;
    let mut buffer = Vec::new();
    file.read_to_end(&mut buffer)?;
    drop(file);

    // Skip to the first newline to avoid partial lines
    let skip = buffer
        .iter()
        .position(|&b| b == b'\n')
        .map_or(0, |i| i + 1);

    let mut file = File::create(log_path)?;
    file.write_all(b"--- Log rotated (older entries removed) ---\n")?;
    file.write_all(&buffer[skip..])?;
    Ok(())
}

/// Writer factory sharing one log file between subscriber threads
#[derive(Clone)]
struct LogWriterFactory {
    file: Arc<Mutex<File>>,
}

struct LogWriter {
    file: Arc<Mutex<File>>,
}

impl LogWriter {
    fn with_file<T>(&self, f: impl FnOnce(&mut File) -> io::Result<T>) -> io::Result<T> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| io::Error::other("log file lock poisoned"))?;
        f(&mut file)
    }
}

impl Write for LogWriter {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        self.with_file(|file| file.write(buf))
    }

    fn flush(&mut self) -> io::Result<()> {
        self.with_file(|file| file.flush())
    }
}

impl<'a> MakeWriter<'a> for LogWriterFactory {
    type Writer = LogWriter;

    fn make_writer(&'a self) -> Self::Writer {
        LogWriter {
            file: self.file.clone(),
        }
    }
}

/// Default filter when `RUST_LOG` is unset: the binary at `level`, the engine
/// at warn.
fn default_filter(level: &str) -> String {
    format!("nestegg={level},nestegg_core=warn")
}

/// Initialize logging to stderr, or to `log_file` when given.
///
/// A log file over 5MB is trimmed to its last 1MB before appending.
/// `RUST_LOG` overrides `level`.
pub fn init_logging(level: &str, log_file: Option<&Path>) -> color_eyre::Result<()> {
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter(level)));
    let registry = tracing_subscriber::registry().with(env_filter);

    match log_file {
        Some(log_path) => {
            if let Some(dir) = log_path.parent().filter(|d| !d.as_os_str().is_empty()) {
                fs::create_dir_all(dir)?;
            }
            if let Err(e) = rotate_log_if_needed(log_path) {
                eprintln!("Warning: Failed to rotate log file: {e}");
            }
            let file = OpenOptions::new()
                .create(true)
                .append(true)
                .open(log_path)?;
            let writer_factory = LogWriterFactory {
                file: Arc::new(Mutex::new(file)),
            };
            registry
                .with(
                    fmt::layer()
                        .with_writer(writer_factory)
                        .with_ansi(false)
                        .with_target(true),
                )
                .init();
            tracing::info!(log_path = %log_path.display(), "logging initialized");
        }
        None => {
            registry
                .with(fmt::layer().with_writer(io::stderr).with_target(true))
                .init();
        }
    }
    Ok(())
}
