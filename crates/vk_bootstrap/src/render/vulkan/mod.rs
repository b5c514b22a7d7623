//! Vulkan instance bootstrap
//!
//! - [`capability`]: two-call enumeration and membership checks
//! - [`driver`]: the trait the rest of the module talks to
//! - [`ash_driver`]: the real driver, backed by `ash`
//! - [`instance`]: negotiation and the owned instance handle

pub mod ash_driver;
pub mod capability;
pub mod driver;
pub mod instance;

pub use ash_driver::{AshDriver, AshInstance};
pub use capability::{Capability, CapabilityCatalog, CapabilityKind, CapabilityReport};
pub use driver::{ApplicationIdentity, InstanceDriver, InstanceRequest};
pub use instance::{InstanceNegotiator, InstancePlan, OptionalCapabilities, VulkanInstance};

use ash::vk;
use thiserror::Error;

/// Vulkan bootstrap errors
#[derive(Error, Debug)]
pub enum VulkanError {
    /// The Vulkan loader library could not be found or loaded
    #[error("Failed to load Vulkan: {0}")]
    LoaderUnavailable(String),

    /// The driver refused to enumerate its capabilities
    #[error("Failed to enumerate instance {kind}s: {code:?}")]
    EnumerationFailed {
        /// What was being enumerated
        kind: CapabilityKind,
        /// Driver result code
        code: vk::Result,
    },

    /// A requested optional capability is not advertised by the driver
    #[error("Requested {kind}(s) not available: {}", .missing.join(", "))]
    CapabilityUnavailable {
        /// Kind of the missing capabilities
        kind: CapabilityKind,
        /// Every requested name the driver does not advertise
        missing: Vec<String>,
    },

    /// A capability name cannot be passed to the driver
    #[error("Capability name contains a NUL byte: {0:?}")]
    InvalidCapabilityName(String),

    /// `vkCreateInstance` failed
    #[error("Failed to create Vulkan instance: {0:?}")]
    InstanceCreationFailed(vk::Result),
}

/// Result type for Vulkan operations
pub type VulkanResult<T> = Result<T, VulkanError>;
