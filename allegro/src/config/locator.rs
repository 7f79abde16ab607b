//! Description-file lookup relative to the application root.
//!
//! Files are searched in `<root>/config` first, then `<root>` itself,
//! so configuration normally lives under `config/` while paths such as
//! the vendored service definitions resolve from the root.

use std::path::{Path, PathBuf};

use crate::error::AllegroError;

/// Locates description files against an ordered list of search paths.
#[derive(Debug, Clone)]
pub struct ConfigLocator {
    search_paths: Vec<PathBuf>,
}

impl ConfigLocator {
    /// Builds the conventional locator for an application root:
    /// `<root>/config`, then `<root>`.
    pub fn new(app_dir: &Path) -> Self {
        Self {
            search_paths: vec![app_dir.join("config"), app_dir.to_path_buf()],
        }
    }

    /// Builds a locator over explicit search paths. Mainly useful for
    /// extensions loading additional configuration.
    pub fn with_paths(search_paths: Vec<PathBuf>) -> Self {
        Self { search_paths }
    }

    /// The search paths, in probe order.
    pub fn search_paths(&self) -> &[PathBuf] {
        &self.search_paths
    }

    /// Resolves `name` against the search paths.
    ///
    /// Returns `Ok(Some(path))` for the first match, `Ok(None)` when an
    /// optional file is absent, and an initialization error when a
    /// required file is absent.
    pub fn locate(&self, name: &str, required: bool) -> Result<Option<PathBuf>, AllegroError> {
        for base in &self.search_paths {
            let candidate = base.join(name);
            if candidate.is_file() {
                return Ok(Some(candidate));
            }
        }
        if required {
            Err(AllegroError::initialization(
                format!(
                    "required config file '{name}' not found in {}",
                    self.describe_paths()
                ),
                None,
            ))
        } else {
            Ok(None)
        }
    }

    fn describe_paths(&self) -> String {
        self.search_paths
            .iter()
            .map(|p| p.display().to_string())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    fn locator_for(tmp: &TempDir) -> ConfigLocator {
        fs::create_dir_all(tmp.path().join("config")).unwrap();
        ConfigLocator::new(tmp.path())
    }

    #[test]
    fn test_config_directory_takes_precedence_over_root() {
        let tmp = TempDir::new().unwrap();
        let locator = locator_for(&tmp);
        fs::write(tmp.path().join("config/services.yml"), "a: 1\n").unwrap();
        fs::write(tmp.path().join("services.yml"), "b: 2\n").unwrap();

        let found = locator.locate("services.yml", true).unwrap().unwrap();
        assert_eq!(found, tmp.path().join("config/services.yml"));
    }

    #[test]
    fn test_root_is_searched_when_config_misses() {
        let tmp = TempDir::new().unwrap();
        let locator = locator_for(&tmp);
        fs::create_dir_all(tmp.path().join("vendor/allegro/config")).unwrap();
        fs::write(
            tmp.path().join("vendor/allegro/config/services.yml"),
            "services: {}\n",
        )
        .unwrap();

        let found = locator
            .locate("vendor/allegro/config/services.yml", true)
            .unwrap()
            .unwrap();
        assert!(found.starts_with(tmp.path()));
    }

    #[test]
    fn test_missing_optional_file_is_skipped() {
        let tmp = TempDir::new().unwrap();
        let locator = locator_for(&tmp);
        assert!(locator.locate("config.yml", false).unwrap().is_none());
    }

    #[test]
    fn test_missing_required_file_is_an_initialization_error() {
        let tmp = TempDir::new().unwrap();
        let locator = locator_for(&tmp);
        let err = locator.locate("services.yml", true).unwrap_err();
        assert!(matches!(err, AllegroError::Initialization { .. }));
        assert!(err.to_string().contains("services.yml"));
    }
}
