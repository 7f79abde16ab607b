//! Ordered description-file load plan.
//!
//! Configuration assembly is an explicit ordered pipeline of
//! `(file, required)` merge operations; later files override earlier
//! ones. The built-in plan mirrors the framework's conventional layout:
//!
//! 1. `allegro.yml` — framework defaults, required.
//! 2. The file named by `ALLEGRO_ENV_CONFIG` — required when the
//!    variable is set; otherwise `config.yml`, optional.
//! 3. `vendor/allegro/config/services.yml` — vendored default service
//!    definitions, required.
//! 4. `services.yml` — application service definitions, required.

use std::env;

/// Environment variable naming the environment-specific override file.
pub const ENV_CONFIG_ENV: &str = "ALLEGRO_ENV_CONFIG";

/// Framework defaults file, doubling as the root marker.
pub const FRAMEWORK_DEFAULTS_FILE: &str = "allegro.yml";

/// Conventional override file used when `ALLEGRO_ENV_CONFIG` is unset.
pub const DEFAULT_ENV_CONFIG_FILE: &str = "config.yml";

/// Vendored default service definitions.
pub const VENDOR_SERVICES_FILE: &str = "vendor/allegro/config/services.yml";

/// Application-local service definitions.
pub const APP_SERVICES_FILE: &str = "services.yml";

/// One step of the load plan.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigSource {
    /// File name, resolved through the [`crate::config::ConfigLocator`].
    pub file: String,
    /// Whether a missing file aborts assembly.
    pub required: bool,
}

/// Ordered list of description files to load.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ConfigDescriptor {
    sources: Vec<ConfigSource>,
}

impl ConfigDescriptor {
    /// Creates an empty descriptor for a custom pipeline.
    pub fn new() -> Self {
        Self::default()
    }

    /// Builds the conventional four-step plan, consulting
    /// `ALLEGRO_ENV_CONFIG` for the override file.
    pub fn standard() -> Self {
        let mut descriptor = Self::new();
        descriptor.push(FRAMEWORK_DEFAULTS_FILE, true);
        match env::var(ENV_CONFIG_ENV) {
            Ok(file) if !file.is_empty() => descriptor.push(&file, true),
            _ => descriptor.push(DEFAULT_ENV_CONFIG_FILE, false),
        };
        descriptor.push(VENDOR_SERVICES_FILE, true);
        descriptor.push(APP_SERVICES_FILE, true);
        descriptor
    }

    /// Appends a load step.
    pub fn push(&mut self, file: &str, required: bool) -> &mut Self {
        self.sources.push(ConfigSource {
            file: file.to_string(),
            required,
        });
        self
    }

    /// The steps, in load order.
    pub fn sources(&self) -> &[ConfigSource] {
        &self.sources
    }
}
