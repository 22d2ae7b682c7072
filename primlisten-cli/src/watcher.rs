//! File watcher for development mode.
//!
//! This module watches the configuration file so contracts are regenerated
//! whenever the type list or output options change.

use crate::error::{CliResult, WatchError};
use notify::{RecommendedWatcher, RecursiveMode};
use notify_debouncer_mini::{new_debouncer, DebouncedEvent, Debouncer};
use std::path::{Path, PathBuf};
use std::sync::mpsc::{channel, Receiver};
use std::time::Duration;
use tracing::debug;

/// Event types for file changes.
#[derive(Debug, Clone)]
pub enum WatchEvent {
    /// The file was created or modified.
    Modified(PathBuf),
    /// The file was deleted.
    Deleted(PathBuf),
    /// An error occurred.
    Error(String),
}

/// Watches a single file for changes.
pub struct FileWatcher {
    /// File to watch.
    path: PathBuf,
    /// Debounce duration in milliseconds.
    debounce_ms: u64,
}

impl FileWatcher {
    /// Create a new watcher for the given file.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            debounce_ms: 500,
        }
    }

    /// Set the debounce duration in milliseconds.
    pub fn with_debounce(mut self, ms: u64) -> Self {
        self.debounce_ms = ms;
        self
    }

    /// Start watching for changes of the file.
    ///
    /// The parent directory is watched so editors that replace the file on
    /// save are still seen. The debouncer must be kept alive for events to
    /// arrive on the returned receiver.
    pub fn watch(&self) -> CliResult<(Debouncer<RecommendedWatcher>, Receiver<WatchEvent>)> {
        let (tx, rx) = channel::<WatchEvent>();
        let file_name = self.path.file_name().map(|name| name.to_os_string());

        let mut debouncer = new_debouncer(
            Duration::from_millis(self.debounce_ms),
            move |result: Result<Vec<DebouncedEvent>, notify::Error>| match result {
                Ok(events) => {
                    for event in events {
                        let path = event.path;
                        if path.file_name().map(|name| name.to_os_string()) != file_name {
                            continue;
                        }

                        debug!(path = %path.display(), "watched file changed");
                        let watch_event = if path.exists() {
                            WatchEvent::Modified(path)
                        } else {
                            WatchEvent::Deleted(path)
                        };
                        let _ = tx.send(watch_event);
                    }
                }
                Err(e) => {
                    let _ = tx.send(WatchEvent::Error(e.to_string()));
                }
            },
        )
        .map_err(|e| WatchError::Init(e.to_string()))?;

        debouncer
            .watcher()
            .watch(self.watch_dir(), RecursiveMode::NonRecursive)
            .map_err(|e| WatchError::Notify(e.to_string()))?;

        Ok((debouncer, rx))
    }

    /// Get the file being watched.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Directory registered with the OS watcher.
    pub fn watch_dir(&self) -> &Path {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent,
            _ => Path::new("."),
        }
    }
}

impl WatchEvent {
    /// Get the path associated with this event.
    pub fn path(&self) -> Option<&Path> {
        match self {
            WatchEvent::Modified(p) | WatchEvent::Deleted(p) => Some(p),
            WatchEvent::Error(_) => None,
        }
    }

    /// Check if this is an error event.
    pub fn is_error(&self) -> bool {
        matches!(self, WatchEvent::Error(_))
    }

    /// Get the error message if this is an error event.
    pub fn error_message(&self) -> Option<&str> {
        match self {
            WatchEvent::Error(msg) => Some(msg),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_watch_event_path() {
        let path = PathBuf::from("/test/primlisten.toml");

        let modified = WatchEvent::Modified(path.clone());
        assert_eq!(modified.path(), Some(path.as_path()));

        let deleted = WatchEvent::Deleted(path.clone());
        assert_eq!(deleted.path(), Some(path.as_path()));

        let error = WatchEvent::Error("test error".to_string());
        assert_eq!(error.path(), None);
    }

    #[test]
    fn test_watch_event_error_message() {
        let modified = WatchEvent::Modified(PathBuf::from("/test"));
        assert!(!modified.is_error());
        assert_eq!(modified.error_message(), None);

        let error = WatchEvent::Error("test error".to_string());
        assert!(error.is_error());
        assert_eq!(error.error_message(), Some("test error"));
    }

    #[test]
    fn test_file_watcher_new() {
        let watcher = FileWatcher::new("/test/path/primlisten.toml").with_debounce(1000);
        assert_eq!(watcher.path(), Path::new("/test/path/primlisten.toml"));
        assert_eq!(watcher.watch_dir(), Path::new("/test/path"));
        assert_eq!(watcher.debounce_ms, 1000);
    }

    #[test]
    fn test_watch_dir_of_bare_file_name() {
        let watcher = FileWatcher::new("primlisten.toml");
        assert_eq!(watcher.watch_dir(), Path::new("."));
        assert_eq!(watcher.debounce_ms, 500);
    }
}
