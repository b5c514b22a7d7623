//! Application lifecycle management
//!
//! [`ApplicationLifecycle::run`] executes the bootstrap phases in order:
//!
//! 1. initialize the windowing subsystem
//! 2. open the window
//! 3. load the driver and negotiate/create the Vulkan instance
//! 4. poll until the user closes the window
//! 5. tear down in reverse order: instance, window, subsystem
//!
//! Every resource is owned by a local in `run`, declared in creation order.
//! A failure in phases 1–3 returns early, and the locals created so far drop
//! in reverse. Partial initialization is therefore cleaned up without any
//! bookkeeping.

use std::thread;
use thiserror::Error;

use crate::core::config::{BootstrapConfig, InstanceConfig};
use crate::render::vulkan::{
    CapabilityCatalog, CapabilityKind, InstanceDriver, InstanceNegotiator, VulkanError, VulkanInstance,
    VulkanResult,
};
use crate::render::window::{WindowError, WindowResult, WindowSession, WindowSystem};

/// Application-level errors
#[derive(Error, Debug)]
pub enum AppError {
    /// Windowing failure, reported unchanged
    #[error(transparent)]
    Window(#[from] WindowError),

    /// Vulkan failure, reported unchanged
    #[error(transparent)]
    Vulkan(#[from] VulkanError),

    /// Configuration error
    #[error("Config error: {0}")]
    Config(String),
}

/// Result type for application operations
pub type AppResult<T> = Result<T, AppError>;

/// Summary of a completed run
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunReport {
    /// How many times the run loop polled for a close request
    pub poll_count: u64,
    /// Extensions the instance was created with
    pub extensions: Vec<String>,
    /// Layers the instance was created with
    pub layers: Vec<String>,
}

/// Orchestrates the window and the Vulkan instance in strict phase order
pub struct ApplicationLifecycle {
    config: BootstrapConfig,
}

impl ApplicationLifecycle {
    /// Create a lifecycle for the given configuration
    pub fn new(config: BootstrapConfig) -> Self {
        Self { config }
    }

    /// Configuration this lifecycle runs with
    pub fn config(&self) -> &BootstrapConfig {
        &self.config
    }

    /// Run every phase to completion
    ///
    /// `init_windowing` initializes the process-wide windowing subsystem and
    /// `load_driver` loads the graphics driver; both are only called when
    /// their phase is reached.
    pub fn run<S, D, I, L>(&self, init_windowing: I, load_driver: L) -> AppResult<RunReport>
    where
        S: WindowSystem,
        D: InstanceDriver,
        I: FnOnce() -> WindowResult<S>,
        L: FnOnce() -> VulkanResult<D>,
    {
        self.config.validate().map_err(AppError::Config)?;
        let window_config = &self.config.window;

        log::info!("Initializing windowing subsystem...");
        let mut system = init_windowing()?;

        let mut session = WindowSession::open(
            &mut system,
            window_config.width,
            window_config.height,
            &window_config.title,
        )?;

        log::info!("Initializing Vulkan...");
        let driver = load_driver()?;
        let instance = Self::create_instance(&driver, &session, &self.config.instance)?;
        Self::log_available_extensions(&driver);

        log::info!("Starting main loop...");
        let mut poll_count = 0;
        loop {
            poll_count += 1;
            if session.poll_close_requested() {
                break;
            }
            thread::yield_now();
        }
        log::info!("Close requested after {} polls", poll_count);

        let report = RunReport {
            poll_count,
            extensions: instance.extensions().to_vec(),
            layers: instance.layers().to_vec(),
        };

        instance.destroy();
        drop(driver);
        session.close();
        log::info!("Terminating windowing subsystem");
        drop(system);

        log::info!("Shutdown complete");
        Ok(report)
    }

    fn create_instance<'d, S, D>(
        driver: &'d D,
        session: &WindowSession<'_, S>,
        config: &InstanceConfig,
    ) -> AppResult<VulkanInstance<'d, D>>
    where
        S: WindowSystem,
        D: InstanceDriver,
    {
        let mandatory = session.required_instance_extensions()?;
        log::debug!("Windowing layer requires {:?}", mandatory);

        let negotiator = InstanceNegotiator::new(driver, config.identity());
        let instance = negotiator.negotiate_and_create(
            &mandatory,
            &config.optional_capabilities(),
            config.enable_validation,
        )?;
        Ok(instance)
    }

    /// Diagnostics only; enumeration failures here are not fatal
    fn log_available_extensions<D: InstanceDriver>(driver: &D) {
        match CapabilityCatalog::enumerate(driver, CapabilityKind::Extension) {
            Ok(catalog) => {
                log::info!("{} instance extensions available", catalog.len());
                for extension in catalog.iter() {
                    log::debug!("\t{} {}", extension.name, extension.spec_version);
                }
            }
            Err(e) => log::warn!("Could not list instance extensions: {}", e),
        }
    }
}

impl Default for ApplicationLifecycle {
    fn default() -> Self {
        Self::new(BootstrapConfig::default())
    }
}
