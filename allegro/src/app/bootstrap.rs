//! Application bootstrap sequencing.
//!
//! `AllegroApp` owns the startup order that everything else relies on:
//!
//! 1. Arm the fault trap (construction time, before anything can fail).
//! 2. Locate the application root.
//! 3. Assemble the container from the description files.
//! 4. Self-register the application handle.
//!
//! Compilation is a separate, explicit step: [`AllegroApp::compile`]
//! installs the shutdown handler and freezes the container. Keeping it
//! out of construction lets callers register factories and synthetic
//! services first, and keeps signal capture from starting during a long
//! configuration load.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use serde_yaml::Value;

use crate::app::locator::find_app_dir;
use crate::config::{ConfigDescriptor, ConfigDocument, ConfigLocator};
use crate::container::{Container, ContainerBuilder, ResolvedArgument, ServiceObject};
use crate::error::AllegroError;
use crate::error_trap;
use crate::heartbeat::Heartbeat;
use crate::logging::{Logger, LoggerFacade, LoggerService, LOGGER_SERVICE};
use crate::signal::ShutdownSignal;

/// Canonical service name the application registers itself under.
pub const APP_SERVICE: &str = "allegro.app";

/// Legacy alias kept for older service definitions.
pub const APP_SERVICE_ALIAS: &str = "app";

/// Built-in parameter holding the resolved application root.
pub const APP_DIR_PARAMETER: &str = "allegro.app_dir";

/// Lightweight handle to the owning application, injectable into
/// services that need to know where they run.
#[derive(Debug, Clone)]
pub struct AppHandle {
    app_dir: PathBuf,
}

impl AppHandle {
    /// The application root directory.
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }
}

enum AppState {
    Building(ContainerBuilder),
    Compiled(Container),
    Failed,
}

/// The core application object: shared components essential to any
/// hosted application, regardless of its type.
pub struct AllegroApp {
    app_dir: PathBuf,
    config_locator: ConfigLocator,
    state: AppState,
    shutdown: ShutdownSignal,
    logger_facade: LoggerFacade,
    heartbeat: Heartbeat,
}

impl std::fmt::Debug for AllegroApp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AllegroApp")
            .field("app_dir", &self.app_dir)
            .field("config_locator", &self.config_locator)
            .field("heartbeat", &self.heartbeat)
            .finish_non_exhaustive()
    }
}

impl AllegroApp {
    /// Initializes the core components: arms the fault trap, locates
    /// the application root and assembles (but does not compile) the
    /// container from the standard description files.
    ///
    /// A missing application root surfaces as
    /// [`AllegroError::Configuration`]; every other failure is wrapped
    /// into [`AllegroError::Initialization`].
    pub fn new() -> Result<Self, AllegroError> {
        crate::logging::init_tracing();
        error_trap::install();
        let app_dir = find_app_dir()?;
        let config_locator = ConfigLocator::new(&app_dir);
        let descriptor = ConfigDescriptor::standard();
        let mut builder = load_definitions(&config_locator, &descriptor, &app_dir)?;

        let handle: ServiceObject = Arc::new(AppHandle {
            app_dir: app_dir.clone(),
        });
        builder.register_service(APP_SERVICE, handle.clone());
        builder.register_service(APP_SERVICE_ALIAS, handle);

        tracing::debug!(app_dir = %app_dir.display(), "Allegro application assembled");

        Ok(Self {
            app_dir,
            config_locator,
            state: AppState::Building(builder),
            shutdown: ShutdownSignal::unavailable(),
            logger_facade: LoggerFacade::new(),
            heartbeat: Heartbeat::default(),
        })
    }

    /// The application root directory.
    pub fn app_dir(&self) -> &Path {
        &self.app_dir
    }

    /// Locator for loading additional configuration. Mainly useful for
    /// extensions.
    pub fn config_locator(&self) -> &ConfigLocator {
        &self.config_locator
    }

    /// Registers a service factory. Only possible before compilation.
    pub fn register_factory<F>(
        &mut self,
        class: impl Into<String>,
        factory: F,
    ) -> Result<(), AllegroError>
    where
        F: Fn(&[ResolvedArgument]) -> Result<ServiceObject, AllegroError> + Send + Sync + 'static,
    {
        self.builder_mut()?.register_factory(class, factory);
        Ok(())
    }

    /// Registers a pre-built service. Only possible before compilation.
    pub fn register_service(
        &mut self,
        name: impl Into<String>,
        object: ServiceObject,
    ) -> Result<(), AllegroError> {
        self.builder_mut()?.register_service(name, object);
        Ok(())
    }

    /// Prepares the application for runtime: installs the termination
    /// signal handler, then compiles the container.
    pub fn compile(&mut self) -> Result<(), AllegroError> {
        let builder = match std::mem::replace(&mut self.state, AppState::Failed) {
            AppState::Building(builder) => builder,
            AppState::Compiled(container) => {
                self.state = AppState::Compiled(container);
                return Err(AllegroError::initialization(
                    "container is already compiled",
                    None,
                ));
            }
            AppState::Failed => {
                return Err(AllegroError::initialization(
                    "container compilation already failed",
                    None,
                ));
            }
        };
        self.shutdown = ShutdownSignal::install();
        let container = builder.compile()?;
        self.state = AppState::Compiled(container);
        Ok(())
    }

    /// Whether [`compile`](Self::compile) has succeeded.
    pub fn is_compiled(&self) -> bool {
        matches!(self.state, AppState::Compiled(_))
    }

    /// The compiled container.
    pub fn container(&self) -> Result<&Container, AllegroError> {
        match &self.state {
            AppState::Compiled(container) => Ok(container),
            AppState::Building(_) => Err(AllegroError::initialization(
                "container is not compiled yet",
                None,
            )),
            AppState::Failed => Err(AllegroError::initialization(
                "container compilation failed",
                None,
            )),
        }
    }

    /// Returns a configuration parameter value with placeholders
    /// resolved: on demand before compilation, from the frozen registry
    /// after.
    pub fn get_parameter(&self, name: &str) -> Result<Value, AllegroError> {
        match &self.state {
            AppState::Building(builder) => builder.get_parameter(name),
            AppState::Compiled(container) => Ok(container.get_parameter(name)?.clone()),
            AppState::Failed => Err(AllegroError::initialization(
                "container compilation failed",
                None,
            )),
        }
    }

    /// The configured logger, or the console fallback when it cannot be
    /// resolved. Never fails; the first substitution is announced once.
    pub fn get_logger(&self) -> Arc<dyn Logger> {
        self.logger_facade.resolve(self.lookup_logger())
    }

    fn lookup_logger(&self) -> Result<Arc<dyn Logger>, AllegroError> {
        let container = self.container()?;
        Ok(container.get::<LoggerService>(LOGGER_SERVICE)?.logger())
    }

    /// Returns whether a termination signal has been received. Always
    /// `false` before [`compile`](Self::compile) and on platforms
    /// without signal support.
    pub fn is_term_signal_received(&self) -> bool {
        self.shutdown.poll()
    }

    /// Notifies the external monitoring system that the process is
    /// alive.
    pub fn ping(&self) {
        self.heartbeat.beat();
    }

    fn builder_mut(&mut self) -> Result<&mut ContainerBuilder, AllegroError> {
        match &mut self.state {
            AppState::Building(builder) => Ok(builder),
            _ => Err(AllegroError::initialization(
                "container is already compiled",
                None,
            )),
        }
    }
}

fn load_definitions(
    locator: &ConfigLocator,
    descriptor: &ConfigDescriptor,
    app_dir: &Path,
) -> Result<ContainerBuilder, AllegroError> {
    let mut builder = ContainerBuilder::new();
    builder.set_parameter(
        APP_DIR_PARAMETER,
        Value::String(app_dir.display().to_string()),
    );
    for source in descriptor.sources() {
        match locator.locate(&source.file, source.required)? {
            Some(path) => {
                tracing::debug!(file = %path.display(), "loading config file");
                builder.merge_document(ConfigDocument::load(&path)?);
            }
            None => {
                tracing::debug!(file = %source.file, "optional config file absent, skipping");
            }
        }
    }
    Ok(builder)
}
