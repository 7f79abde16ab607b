//! Application bootstrap and lifecycle.
//!
//! This module provides the `AllegroApp` type which sequences
//! initialization — fault trap, root location, configuration assembly,
//! container compilation — and exposes the runtime facilities every
//! hosted application depends on: parameter access, the logger facade,
//! the shutdown flag and the heartbeat.
//!
//! # Example
//!
//! ```ignore
//! use allegro::AllegroApp;
//!
//! let mut app = AllegroApp::new()?;
//! app.compile()?;
//!
//! let log = app.get_logger();
//! while !app.is_term_signal_received() {
//!     app.ping();
//!     // one unit of work
//! }
//! log.info("shutting down");
//! ```

mod bootstrap;
mod locator;

pub use bootstrap::{AllegroApp, AppHandle, APP_DIR_PARAMETER, APP_SERVICE, APP_SERVICE_ALIAS};
pub use locator::{find_app_dir, find_app_dir_from, APP_DIR_ENV, ROOT_MARKER};
