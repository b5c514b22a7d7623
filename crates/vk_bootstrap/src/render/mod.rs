//! Windowing and graphics-API bootstrap
//!
//! No rendering happens here yet: [`window`] owns the native window and
//! [`vulkan`] negotiates and owns the Vulkan instance.

pub mod vulkan;
pub mod window;

pub use vulkan::{AshDriver, InstanceNegotiator, VulkanError, VulkanInstance, VulkanResult};
pub use window::{GlfwSystem, WindowError, WindowResult, WindowSession};
