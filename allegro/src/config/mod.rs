//! Layered configuration assembly.
//!
//! Configuration is assembled from an ordered sequence of YAML
//! description files into one accumulating registry, with later files
//! overriding earlier ones. The pieces:
//!
//! - [`ConfigDescriptor`] — the ordered `(file, required)` load plan.
//! - [`ConfigLocator`] — resolves file names against the application
//!   root's search paths.
//! - [`ConfigDocument`] — the parsed `parameters:`/`services:` model of
//!   one file.
//! - [`placeholder`] — `%param%` / `%env(VAR)%` substitution, applied
//!   lazily before compilation and permanently at compile time.
//!
//! The merged result feeds [`crate::container::ContainerBuilder`].

mod descriptor;
mod document;
mod locator;
pub(crate) mod placeholder;

pub use descriptor::{
    ConfigDescriptor, ConfigSource, APP_SERVICES_FILE, DEFAULT_ENV_CONFIG_FILE, ENV_CONFIG_ENV,
    FRAMEWORK_DEFAULTS_FILE, VENDOR_SERVICES_FILE,
};
pub use document::{Argument, ConfigDocument, ServiceDefinition};
pub use locator::ConfigLocator;
