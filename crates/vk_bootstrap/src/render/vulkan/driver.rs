//! Graphics-driver seam
//!
//! Everything the bootstrap needs from Vulkan goes through [`InstanceDriver`]:
//! the two enumeration queries, instance creation and instance destruction.
//! [`super::AshDriver`] is the real implementation; tests substitute a fake.

use ash::vk;

use super::capability::{Capability, CapabilityKind};

/// Application identity passed to the driver at instance creation
///
/// None of these values are interpreted by the bootstrap.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApplicationIdentity {
    /// `VkApplicationInfo::pApplicationName`
    pub application_name: String,
    /// Packed with `vk::make_api_version`
    pub application_version: u32,
    /// `VkApplicationInfo::pEngineName`
    pub engine_name: String,
    /// Packed with `vk::make_api_version`
    pub engine_version: u32,
    /// Highest Vulkan API version the application targets
    pub api_version: u32,
}

impl Default for ApplicationIdentity {
    fn default() -> Self {
        Self {
            application_name: "Vulkan Triangle".to_string(),
            application_version: vk::make_api_version(0, 1, 0, 0),
            engine_name: "No Engine".to_string(),
            engine_version: vk::make_api_version(0, 1, 0, 0),
            api_version: vk::API_VERSION_1_0,
        }
    }
}

/// Everything the driver receives for `vkCreateInstance`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstanceRequest {
    /// Application metadata
    pub identity: ApplicationIdentity,
    /// Enabled instance extensions
    pub extensions: Vec<String>,
    /// Enabled instance layers
    pub layers: Vec<String>,
}

/// Low-level instance operations of a graphics driver
pub trait InstanceDriver {
    /// Driver-specific instance handle
    type Instance;

    /// First half of the enumeration protocol: how many capabilities of
    /// `kind` the driver currently advertises
    fn capability_count(&self, kind: CapabilityKind) -> Result<u32, vk::Result>;

    /// Second half of the enumeration protocol: read at most `capacity`
    /// entries
    ///
    /// Returns `Err(vk::Result::INCOMPLETE)` if more than `capacity` entries
    /// are now available.
    fn read_capabilities(&self, kind: CapabilityKind, capacity: u32) -> Result<Vec<Capability>, vk::Result>;

    /// `vkCreateInstance`
    fn create_instance(&self, request: &InstanceRequest) -> Result<Self::Instance, vk::Result>;

    /// `vkDestroyInstance`
    ///
    /// Called exactly once per instance returned by `create_instance`; the
    /// handle is never touched again afterwards.
    fn destroy_instance(&self, instance: &Self::Instance);
}
