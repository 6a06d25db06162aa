//! Logging Setup
//!
//! Installs the global tracing subscriber:
//! - stdout layer, human readable
//! - file layer, JSON, written through a non-blocking daily-rolling appender
//! - `log` crate macros forwarded into tracing
//!
//! Filtering follows `RUST_LOG` and defaults to `info`.

use std::fs;
use std::io;
use std::path::{Path, PathBuf};

use flate2::write::GzEncoder;
use flate2::Compression;
use tracing_appender::non_blocking::WorkerGuard;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter, Layer};

/// Base name of the rolling log files.
pub const LOG_FILE_PREFIX: &str = "llm-spellcheck.log";

/// Initialize logging into `log_dir`.
///
/// Returns a `WorkerGuard` which must be kept alive for the duration of the
/// process so buffered file logs are flushed on shutdown.
pub fn init(log_dir: &Path) -> WorkerGuard {
    if !log_dir.exists() {
        if let Err(e) = fs::create_dir_all(log_dir) {
            eprintln!("Failed to create logs directory {}: {}", log_dir.display(), e);
        }
    }

    let file_appender = tracing_appender::rolling::daily(log_dir, LOG_FILE_PREFIX);
    let (non_blocking, guard) = tracing_appender::non_blocking(file_appender);

    let file_layer = tracing_subscriber::fmt::layer()
        .with_writer(non_blocking)
        .json()
        .with_file(true)
        .with_line_number(true)
        .with_thread_ids(true)
        .with_target(true)
        .with_filter(env_filter());

    let stdout_layer = tracing_subscriber::fmt::layer()
        .with_writer(io::stdout)
        .with_target(false)
        .with_filter(env_filter());

    // try_init also installs the `log` -> tracing bridge.
    if let Err(e) = tracing_subscriber::registry()
        .with(file_layer)
        .with(stdout_layer)
        .try_init()
    {
        eprintln!("Logging already initialized: {}", e);
    }

    let dir = log_dir.to_path_buf();
    std::thread::spawn(move || compress_old_logs(&dir));

    log::info!(
        "Logging initialized. Writing to: {:?} (daily rolling)",
        log_dir.join(LOG_FILE_PREFIX)
    );

    guard
}

fn env_filter() -> EnvFilter {
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"))
}

/// Whether `name` is a rolled log from a previous day that is not yet compressed.
fn should_compress(name: &str, today_suffix: &str) -> bool {
    name.starts_with(&format!("{}.", LOG_FILE_PREFIX))
        && !name.ends_with(today_suffix)
        && !name.ends_with(".gz")
}

/// Gzip rolled log files from previous days.
pub fn compress_old_logs(log_dir: &Path) -> Vec<PathBuf> {
    let today_suffix = chrono::Local::now().format("%Y-%m-%d").to_string();
    let mut compressed = Vec::new();

    let Ok(entries) = fs::read_dir(log_dir) else {
        return compressed;
    };

    for entry in entries.flatten() {
        let path = entry.path();
        let Some(name) = path.file_name().and_then(|n| n.to_str()) else {
            continue;
        };
        if !should_compress(name, &today_suffix) {
            continue;
        }

        match compress_file(&path) {
            Ok(gz_path) => {
                log::info!("Compressed old log: {:?}", path);
                compressed.push(gz_path);
            }
            Err(e) => log::warn!("Failed to compress old log {:?}: {}", path, e),
        }
    }

    compressed
}

fn compress_file(path: &Path) -> io::Result<PathBuf> {
    let mut gz_name = path
        .file_name()
        .ok_or_else(|| io::Error::new(io::ErrorKind::Other, "No filename"))?
        .to_os_string();
    gz_name.push(".gz");
    let gz_path = path.with_file_name(gz_name);

    if gz_path.exists() {
        return Ok(gz_path);
    }

    let mut reader = io::BufReader::new(fs::File::open(path)?);
    let mut encoder = GzEncoder::new(fs::File::create(&gz_path)?, Compression::default());
    io::copy(&mut reader, &mut encoder)?;
    encoder.finish()?;

    fs::remove_file(path)?;
    Ok(gz_path)
}
