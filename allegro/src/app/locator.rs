//! Application root directory resolution.
//!
//! Every relative file in an Allegro application resolves against a
//! single root directory. The root is identified by the presence of the
//! marker file `config/allegro.yml`, found by walking upward from the
//! current working directory. This upward search lets tooling invoked
//! from any subdirectory of a project still find the true root.
//!
//! The `ALLEGRO_APP_DIR` environment variable short-circuits the search:
//! when set and non-empty its value is returned verbatim, with no
//! existence check, so deployment environments can pin the root exactly.

use std::env;
use std::path::{Path, PathBuf};

use crate::error::AllegroError;

/// Environment variable overriding the application root directory.
pub const APP_DIR_ENV: &str = "ALLEGRO_APP_DIR";

/// Marker file whose presence identifies the application root.
pub const ROOT_MARKER: &str = "config/allegro.yml";

/// Locates the application root directory.
///
/// Resolution order: the `ALLEGRO_APP_DIR` override, then an upward walk
/// from the current working directory looking for [`ROOT_MARKER`].
pub fn find_app_dir() -> Result<PathBuf, AllegroError> {
    if let Ok(dir) = env::var(APP_DIR_ENV) {
        if !dir.is_empty() {
            return Ok(PathBuf::from(dir));
        }
    }
    let cwd = env::current_dir().map_err(|e| {
        AllegroError::Configuration(format!("cannot determine current directory: {e}"))
    })?;
    find_app_dir_from(&cwd)
}

/// Walks upward from `start` looking for the nearest ancestor containing
/// [`ROOT_MARKER`].
pub fn find_app_dir_from(start: &Path) -> Result<PathBuf, AllegroError> {
    for dir in start.ancestors() {
        if dir.join(ROOT_MARKER).is_file() {
            return Ok(dir.to_path_buf());
        }
    }
    Err(AllegroError::Configuration(format!(
        "Allegro app dir not found above {}. Did you forget to add allegro.yml?",
        start.display()
    )))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use std::sync::Mutex;
    use tempfile::TempDir;

    // Serializes tests that mutate ALLEGRO_APP_DIR.
    static ENV_LOCK: Mutex<()> = Mutex::new(());

    fn make_app_root(dir: &Path) {
        fs::create_dir_all(dir.join("config")).unwrap();
        fs::write(dir.join(ROOT_MARKER), "parameters: {}\n").unwrap();
    }

    #[test]
    fn test_finds_marker_in_start_directory() {
        let tmp = TempDir::new().unwrap();
        make_app_root(tmp.path());
        let found = find_app_dir_from(tmp.path()).unwrap();
        assert_eq!(found, tmp.path());
    }

    #[test]
    fn test_finds_nearest_ancestor_from_descendant() {
        let tmp = TempDir::new().unwrap();
        make_app_root(tmp.path());
        let nested = tmp.path().join("src/deeply/nested");
        fs::create_dir_all(&nested).unwrap();
        let found = find_app_dir_from(&nested).unwrap();
        assert_eq!(found, tmp.path());
    }

    #[test]
    fn test_inner_marker_shadows_outer() {
        let tmp = TempDir::new().unwrap();
        make_app_root(tmp.path());
        let inner = tmp.path().join("apps/worker");
        make_app_root(&inner);
        // bin does not exist on disk; ancestors() does not care
        let found = find_app_dir_from(&inner.join("bin")).unwrap();
        assert_eq!(found, inner);
    }

    #[test]
    fn test_no_marker_fails_with_configuration_error() {
        let tmp = TempDir::new().unwrap();
        let err = find_app_dir_from(tmp.path()).unwrap_err();
        assert!(matches!(err, AllegroError::Configuration(_)));
        assert!(err.to_string().contains("allegro.yml"));
    }

    #[test]
    fn test_env_override_returned_verbatim_without_existence_check() {
        let _guard = ENV_LOCK.lock().unwrap();
        env::set_var(APP_DIR_ENV, "/nonexistent/app/root");
        let found = find_app_dir().unwrap();
        env::remove_var(APP_DIR_ENV);
        assert_eq!(found, PathBuf::from("/nonexistent/app/root"));
    }

    #[test]
    fn test_empty_env_override_is_ignored() {
        let _guard = ENV_LOCK.lock().unwrap();
        let tmp = TempDir::new().unwrap();
        make_app_root(tmp.path());
        let cwd = env::current_dir().unwrap();
        env::set_var(APP_DIR_ENV, "");
        env::set_current_dir(tmp.path()).unwrap();
        let found = find_app_dir();
        env::set_current_dir(cwd).unwrap();
        env::remove_var(APP_DIR_ENV);
        // Canonicalized comparison: the tempdir may live behind a symlink
        // (e.g. /tmp on macOS) while current_dir() reports the real path.
        assert_eq!(
            found.unwrap().canonicalize().unwrap(),
            tmp.path().canonicalize().unwrap()
        );
    }
}
