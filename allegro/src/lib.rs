//! Allegro — bootstrap substrate for service-style applications.
//!
//! The crate locates the application's root directory, assembles a
//! layered configuration and service registry from YAML description
//! files, compiles it into an immutable container, and provides the
//! small runtime facilities every hosted application depends on: a
//! fallback-capable logging facade, a cooperative shutdown flag and a
//! liveness heartbeat consumed by the external `allegro-probe` tool.
//!
//! # Startup sequence
//!
//! ```text
//! error_trap ──► find_app_dir ──► ConfigDescriptor / ConfigLocator
//!                                        │
//!                                        ▼
//!                               ContainerBuilder ──compile()──► Container
//!                                        │
//!          LoggerFacade ◄── services ◄───┘
//!          ShutdownSignal (installed at compile)
//!          Heartbeat.beat() from the hosting loop
//! ```
//!
//! See [`app::AllegroApp`] for the type that ties the sequence together.

pub mod app;
pub mod config;
pub mod container;
pub mod error;
pub mod error_trap;
pub mod heartbeat;
pub mod logging;
pub mod signal;

pub use app::{AllegroApp, AppHandle};
pub use error::AllegroError;

/// Crate version, as reported by tooling.
pub const VERSION: &str = env!("CARGO_PKG_VERSION");
