//! # Vulkan Bootstrap
//!
//! The start-up layer of a Vulkan application. It opens a native window,
//! negotiates the instance capabilities with the driver, creates the Vulkan
//! instance and keeps both alive until the user closes the window.
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use vk_bootstrap::prelude::*;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let lifecycle = ApplicationLifecycle::new(BootstrapConfig::default());
//!     lifecycle.run(GlfwSystem::init, AshDriver::load)?;
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![warn(clippy::all, clippy::pedantic, clippy::nursery)]
#![allow(clippy::module_name_repetitions, clippy::similar_names)]

pub mod config;
pub mod core;
pub mod foundation;
pub mod render;

mod application;

#[cfg(test)]
pub(crate) mod testing;

pub use application::{AppError, AppResult, ApplicationLifecycle, RunReport};

/// Common imports for bootstrap users
pub mod prelude {
    pub use crate::{
        AppError, AppResult, ApplicationLifecycle, RunReport,
        core::config::{BootstrapConfig, Config, InstanceConfig, WindowConfig},
        render::vulkan::{
            AshDriver, CapabilityCatalog, CapabilityKind, InstanceNegotiator, OptionalCapabilities,
            VulkanError, VulkanInstance,
        },
        render::window::{GlfwSystem, WindowError, WindowSession},
    };
}
