use std::fs::{File, OpenOptions};
use std::io;
use std::path::Path;
use std::sync::Mutex;

use tracing_subscriber::EnvFilter;

use crate::settings::LogSettings;

/// Install the global subscriber. Logs go to the configured file, else stderr.
///
/// A log file that cannot be opened is not fatal: stdout still has to carry
/// the JSON result, so logging falls back to stderr with a one-line note.
pub fn init_tracing(log: &LogSettings) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&log.level))
        .unwrap_or_else(|_| EnvFilter::new("info"));

    let file = log.file_path.as_deref().and_then(|path| {
        open_log_file(path)
            .map_err(|e| {
                eprintln!(
                    "log file {} unavailable ({}); logging to stderr",
                    path.display(),
                    e
                )
            })
            .ok()
    });

    match file {
        Some(file) => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_ansi(false)
                .with_writer(Mutex::new(file))
                .init();
        }
        None => {
            tracing_subscriber::fmt()
                .with_env_filter(filter)
                .with_writer(io::stderr)
                .init();
        }
    }
}

/// Open `path` for appending, creating its parent directory if needed.
pub fn open_log_file(path: &Path) -> io::Result<File> {
    if let Some(dir) = path.parent().filter(|d| !d.as_os_str().is_empty()) {
        std::fs::create_dir_all(dir)?;
    }
    OpenOptions::new().create(true).append(true).open(path)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn creates_missing_log_directory() {
        let dir = std::env::temp_dir()
            .join(format!("linkedin_crawler_logs_{}", std::process::id()));
        let path = dir.join("nested").join("crawler.log");
        let _ = std::fs::remove_dir_all(&dir);

        assert!(open_log_file(&path).is_ok());
        assert!(path.exists());
        // Appending to an existing file also works.
        assert!(open_log_file(&path).is_ok());

        let _ = std::fs::remove_dir_all(&dir);
    }

    #[test]
    fn uncreatable_path_is_an_error_not_a_panic() {
        let path = Path::new("/proc/nonexistent/crawler.log");
        assert!(open_log_file(path).is_err());
    }
}
