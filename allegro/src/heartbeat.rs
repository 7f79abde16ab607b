//! Liveness heartbeat marker.
//!
//! Long-running applications call [`Heartbeat::beat`] periodically from
//! their main loop. Each beat bumps the modification time of a
//! well-known marker file; an external probe compares that timestamp
//! against a threshold to decide whether the process is still making
//! progress. Only the mtime matters — the file's content is irrelevant.
//!
//! Beating is best-effort: a failed write is logged and swallowed,
//! because the caller can do nothing useful about it and the probe will
//! observe the stale marker anyway.

use std::fs::OpenOptions;
use std::io;
use std::path::{Path, PathBuf};

use filetime::FileTime;

/// Default marker path shared with the external probe.
pub const DEFAULT_PING_FILE: &str = "/tmp/allegro.ping";

/// Writes the liveness timestamp marker.
#[derive(Debug, Clone)]
pub struct Heartbeat {
    path: PathBuf,
}

impl Default for Heartbeat {
    fn default() -> Self {
        Self::new(DEFAULT_PING_FILE)
    }
}

impl Heartbeat {
    /// A heartbeat writing to `path` instead of the default marker.
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// The marker path.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Touches the marker, creating it if absent. Best-effort.
    pub fn beat(&self) {
        if let Err(e) = self.touch() {
            tracing::debug!("heartbeat marker {} not updated: {e}", self.path.display());
        }
    }

    fn touch(&self) -> io::Result<()> {
        OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        filetime::set_file_mtime(&self.path, FileTime::now())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn test_beat_creates_marker() {
        let tmp = TempDir::new().unwrap();
        let marker = tmp.path().join("allegro.ping");
        let heartbeat = Heartbeat::new(&marker);
        assert!(!marker.exists());
        heartbeat.beat();
        assert!(marker.exists());
    }

    #[test]
    fn test_beat_bumps_mtime_of_existing_marker() {
        let tmp = TempDir::new().unwrap();
        let marker = tmp.path().join("allegro.ping");
        fs::write(&marker, "").unwrap();
        // Push the marker two minutes into the past.
        let past = FileTime::from_unix_time(FileTime::now().unix_seconds() - 120, 0);
        filetime::set_file_mtime(&marker, past).unwrap();

        Heartbeat::new(&marker).beat();

        let mtime = FileTime::from_last_modification_time(&fs::metadata(&marker).unwrap());
        assert!(
            mtime.unix_seconds() >= FileTime::now().unix_seconds() - 5,
            "beat should move mtime to now"
        );
    }

    #[test]
    fn test_beat_failure_is_swallowed() {
        let heartbeat = Heartbeat::new("/nonexistent-dir/allegro.ping");
        // Must not panic or report anything to the caller.
        heartbeat.beat();
    }

    #[test]
    fn test_default_marker_path() {
        assert_eq!(Heartbeat::default().path(), Path::new(DEFAULT_PING_FILE));
    }
}
