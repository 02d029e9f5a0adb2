//! Logging setup
//!
//! Console output by default; daily rolling files when a log directory is
//! configured and exists. `RUST_LOG` takes precedence over the configured
//! level.

use std::path::{Path, PathBuf};

use tracing_subscriber::EnvFilter;

const LOG_FILE_PREFIX: &str = "intake-server";

/// Initialize the global subscriber
pub fn init_logger(log_level: &str, log_dir: Option<&str>) {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| default_filter(log_level).into());

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(true)
        .with_thread_ids(false);

    if let Some(dir) = log_dir.and_then(existing_dir) {
        let file_appender = tracing_appender::rolling::daily(dir, LOG_FILE_PREFIX);
        subscriber.with_ansi(false).with_writer(file_appender).init();
        return;
    }

    subscriber.init();
}

/// Filter directive applied when `RUST_LOG` is unset
fn default_filter(level: &str) -> String {
    format!("intake_server={level},shared={level},telemetry={level},security=warn,tower_http=info")
}

fn existing_dir(dir: &str) -> Option<PathBuf> {
    let path = Path::new(dir);
    path.is_dir().then(|| path.to_path_buf())
}

/// In-memory log sink for tests, installed as the thread's default subscriber
#[cfg(test)]
pub(crate) struct LogCapture {
    buffer: std::sync::Arc<parking_lot::Mutex<Vec<u8>>>,
    _guard: tracing::subscriber::DefaultGuard,
}

#[cfg(test)]
impl LogCapture {
    pub(crate) fn start() -> Self {
        let buffer = std::sync::Arc::new(parking_lot::Mutex::new(Vec::new()));
        let writer = {
            let buffer = buffer.clone();
            move || CaptureWriter(buffer.clone())
        };
        let subscriber = tracing_subscriber::fmt()
            .with_max_level(tracing::Level::TRACE)
            .with_ansi(false)
            .with_target(true)
            .with_writer(writer)
            .finish();
        Self {
            buffer,
            _guard: tracing::subscriber::set_default(subscriber),
        }
    }

    pub(crate) fn contents(&self) -> String {
        String::from_utf8_lossy(&self.buffer.lock()).into_owned()
    }
}

#[cfg(test)]
struct CaptureWriter(std::sync::Arc<parking_lot::Mutex<Vec<u8>>>);

#[cfg(test)]
impl std::io::Write for CaptureWriter {
    fn write(&mut self, buf: &[u8]) -> std::io::Result<usize> {
        self.0.lock().extend_from_slice(buf);
        Ok(buf.len())
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_filter_parses() {
        let directive = default_filter("debug");
        assert!(directive.starts_with("intake_server=debug"));
        assert!(EnvFilter::try_new(directive).is_ok());
    }

    #[test]
    fn test_missing_log_dir_falls_back_to_console() {
        let tmp = tempfile::tempdir().unwrap();
        let dir = tmp.path().to_str().unwrap();
        assert_eq!(existing_dir(dir), Some(tmp.path().to_path_buf()));

        let missing = tmp.path().join("nope");
        assert!(existing_dir(missing.to_str().unwrap()).is_none());
    }
}
