//! # Bootstrap Configuration
//!
//! Window parameters and Vulkan instance settings, with builder-style setters
//! and validation. Every type here is serializable, so a whole
//! [`BootstrapConfig`] can be loaded through [`crate::config::Config`].
//!
//! Optional diagnostics are an explicit field
//! ([`InstanceConfig::enable_validation`]) that is passed into negotiation.
//! Nothing reads a process-wide flag.

use ash::vk;
use serde::{Deserialize, Serialize};

pub use crate::config::{Config, ConfigError, ConfigFormat};
use crate::render::vulkan::{ApplicationIdentity, OptionalCapabilities};

/// Khronos validation layer
pub const KHRONOS_VALIDATION_LAYER: &str = "VK_LAYER_KHRONOS_validation";

/// Debug utils extension, used to route validation messages to the log
pub const DEBUG_UTILS_EXTENSION: &str = "VK_EXT_debug_utils";

/// # Window Configuration
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct WindowConfig {
    /// Window title
    pub title: String,
    /// Window width
    pub width: u32,
    /// Window height
    pub height: u32,
}

impl WindowConfig {
    /// Create a window configuration
    pub fn new(title: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            title: title.into(),
            width,
            height,
        }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.title.is_empty() {
            return Err("Window title cannot be empty".to_string());
        }
        if self.width == 0 || self.height == 0 {
            return Err(format!(
                "Window size must be non-zero, got {}x{}",
                self.width, self.height
            ));
        }
        Ok(())
    }
}

impl Default for WindowConfig {
    fn default() -> Self {
        Self::new("Vulkan Triangle", 800, 600)
    }
}

/// # Vulkan Instance Configuration
///
/// Application metadata reported to the driver, plus the optional diagnostic
/// capabilities that are requested when validation is enabled.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstanceConfig {
    /// Application name for Vulkan instance creation
    pub application_name: String,
    /// Application version (major, minor, patch)
    pub application_version: (u32, u32, u32),
    /// Engine name for Vulkan instance creation
    pub engine_name: String,
    /// Engine version (major, minor, patch)
    pub engine_version: (u32, u32, u32),
    /// Targeted Vulkan API version (major, minor)
    pub api_version: (u32, u32),
    /// Whether to request the optional diagnostic capabilities
    pub enable_validation: bool,
    /// Layers requested when validation is enabled
    pub validation_layers: Vec<String>,
    /// Extensions requested when validation is enabled
    pub debug_extensions: Vec<String>,
}

impl InstanceConfig {
    /// Create a new instance configuration
    pub fn new(app_name: impl Into<String>) -> Self {
        Self {
            application_name: app_name.into(),
            application_version: (1, 0, 0),
            engine_name: "No Engine".to_string(),
            engine_version: (1, 0, 0),
            api_version: (1, 0),
            enable_validation: false,
            validation_layers: vec![KHRONOS_VALIDATION_LAYER.to_string()],
            debug_extensions: vec![DEBUG_UTILS_EXTENSION.to_string()],
        }
    }

    /// Set application version
    pub fn with_version(mut self, major: u32, minor: u32, patch: u32) -> Self {
        self.application_version = (major, minor, patch);
        self
    }

    /// Set engine name and version
    pub fn with_engine(mut self, name: impl Into<String>, version: (u32, u32, u32)) -> Self {
        self.engine_name = name.into();
        self.engine_version = version;
        self
    }

    /// Set the targeted Vulkan API version
    pub fn with_api_version(mut self, major: u32, minor: u32) -> Self {
        self.api_version = (major, minor);
        self
    }

    /// Enable or disable the optional diagnostic capabilities
    pub fn with_validation(mut self, enabled: bool) -> Self {
        self.enable_validation = enabled;
        self
    }

    /// Enables validation in debug builds and disables it in release builds
    pub fn with_auto_validation(mut self) -> Self {
        self.enable_validation = cfg!(debug_assertions);
        self
    }

    /// Replace the layers requested when validation is enabled
    pub fn with_validation_layers<S: Into<String>>(mut self, layers: impl IntoIterator<Item = S>) -> Self {
        self.validation_layers = layers.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the extensions requested when validation is enabled
    pub fn with_debug_extensions<S: Into<String>>(mut self, extensions: impl IntoIterator<Item = S>) -> Self {
        self.debug_extensions = extensions.into_iter().map(Into::into).collect();
        self
    }

    /// Identity reported in `VkApplicationInfo`
    pub fn identity(&self) -> ApplicationIdentity {
        let (app_major, app_minor, app_patch) = self.application_version;
        let (engine_major, engine_minor, engine_patch) = self.engine_version;
        let (api_major, api_minor) = self.api_version;

        ApplicationIdentity {
            application_name: self.application_name.clone(),
            application_version: vk::make_api_version(0, app_major, app_minor, app_patch),
            engine_name: self.engine_name.clone(),
            engine_version: vk::make_api_version(0, engine_major, engine_minor, engine_patch),
            api_version: vk::make_api_version(0, api_major, api_minor, 0),
        }
    }

    /// Diagnostic capabilities, requested only if validation is enabled
    pub fn optional_capabilities(&self) -> OptionalCapabilities {
        OptionalCapabilities::layers(self.validation_layers.iter().cloned())
            .with_extensions(self.debug_extensions.iter().cloned())
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        if self.application_name.is_empty() {
            return Err("Application name cannot be empty".to_string());
        }
        if self.api_version.0 == 0 {
            return Err(format!(
                "Vulkan API version {}.{} is not a valid target",
                self.api_version.0, self.api_version.1
            ));
        }
        Ok(())
    }
}

impl Default for InstanceConfig {
    fn default() -> Self {
        Self::new("Vulkan Triangle").with_auto_validation()
    }
}

/// # Bootstrap Configuration
///
/// Everything [`crate::ApplicationLifecycle`] needs for one run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BootstrapConfig {
    /// Window settings
    pub window: WindowConfig,
    /// Vulkan instance settings
    pub instance: InstanceConfig,
}

impl BootstrapConfig {
    /// Combine window and instance settings
    pub fn new(window: WindowConfig, instance: InstanceConfig) -> Self {
        Self { window, instance }
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), String> {
        self.window.validate()?;
        self.instance.validate()
    }
}

impl Config for BootstrapConfig {}
