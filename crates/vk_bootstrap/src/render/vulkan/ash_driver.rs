//! `ash`-backed graphics driver
//!
//! Enumeration calls the raw entry points directly so the count query and the
//! fill query stay visible as two separate operations.

use ash::extensions::ext::DebugUtils;
use ash::{vk, Entry, Instance};
use std::ffi::{c_char, CStr, CString};
use std::ptr;

use super::capability::{Capability, CapabilityKind};
use super::driver::{InstanceDriver, InstanceRequest};
use super::{VulkanError, VulkanResult};

/// Vulkan loader entry point
pub struct AshDriver {
    entry: Entry,
}

impl AshDriver {
    /// Load the system Vulkan loader
    pub fn load() -> VulkanResult<Self> {
        let entry = unsafe { Entry::load() }
            .map_err(|e| VulkanError::LoaderUnavailable(format!("{:?}", e)))?;
        log::debug!("Vulkan loader loaded");
        Ok(Self { entry })
    }

    /// Raw `ash` entry
    pub fn entry(&self) -> &Entry {
        &self.entry
    }
}

impl InstanceDriver for AshDriver {
    type Instance = AshInstance;

    fn capability_count(&self, kind: CapabilityKind) -> Result<u32, vk::Result> {
        let fp = self.entry.fp_v1_0();
        let mut count = 0;
        let result = unsafe {
            match kind {
                CapabilityKind::Layer => {
                    (fp.enumerate_instance_layer_properties)(&mut count, ptr::null_mut())
                }
                CapabilityKind::Extension => (fp.enumerate_instance_extension_properties)(
                    ptr::null(),
                    &mut count,
                    ptr::null_mut(),
                ),
            }
        };
        result.result_with_success(count)
    }

    fn read_capabilities(&self, kind: CapabilityKind, capacity: u32) -> Result<Vec<Capability>, vk::Result> {
        let fp = self.entry.fp_v1_0();
        let mut count = capacity;

        match kind {
            CapabilityKind::Layer => {
                let mut properties = vec![vk::LayerProperties::default(); capacity as usize];
                unsafe { (fp.enumerate_instance_layer_properties)(&mut count, properties.as_mut_ptr()) }
                    .result()?;
                properties.truncate(count as usize);

                Ok(properties
                    .iter()
                    .map(|p| Capability::new(fixed_name(&p.layer_name), kind, p.spec_version))
                    .collect())
            }
            CapabilityKind::Extension => {
                let mut properties = vec![vk::ExtensionProperties::default(); capacity as usize];
                unsafe {
                    (fp.enumerate_instance_extension_properties)(
                        ptr::null(),
                        &mut count,
                        properties.as_mut_ptr(),
                    )
                }
                .result()?;
                properties.truncate(count as usize);

                Ok(properties
                    .iter()
                    .map(|p| Capability::new(fixed_name(&p.extension_name), kind, p.spec_version))
                    .collect())
            }
        }
    }

    fn create_instance(&self, request: &InstanceRequest) -> Result<AshInstance, vk::Result> {
        let identity = &request.identity;
        let app_name = to_cstring(&identity.application_name)?;
        let engine_name = to_cstring(&identity.engine_name)?;
        let app_info = vk::ApplicationInfo::builder()
            .application_name(&app_name)
            .application_version(identity.application_version)
            .engine_name(&engine_name)
            .engine_version(identity.engine_version)
            .api_version(identity.api_version);

        let extension_names = request
            .extensions
            .iter()
            .map(|name| to_cstring(name))
            .collect::<Result<Vec<_>, _>>()?;
        let layer_names = request
            .layers
            .iter()
            .map(|name| to_cstring(name))
            .collect::<Result<Vec<_>, _>>()?;
        let extension_ptrs: Vec<*const c_char> = extension_names.iter().map(|n| n.as_ptr()).collect();
        let layer_ptrs: Vec<*const c_char> = layer_names.iter().map(|n| n.as_ptr()).collect();

        let create_info = vk::InstanceCreateInfo::builder()
            .application_info(&app_info)
            .enabled_extension_names(&extension_ptrs)
            .enabled_layer_names(&layer_ptrs);

        let instance = unsafe { self.entry.create_instance(&create_info, None)? };

        let wants_debug_utils = extension_names
            .iter()
            .any(|name| name.as_c_str() == DebugUtils::name());
        let debug = if wants_debug_utils {
            match DebugMessenger::new(&self.entry, &instance) {
                Ok(messenger) => Some(messenger),
                Err(code) => {
                    // Diagnostics only; the instance itself is fine
                    log::warn!("Failed to create debug messenger: {:?}", code);
                    None
                }
            }
        } else {
            None
        };

        Ok(AshInstance { instance, debug })
    }

    fn destroy_instance(&self, instance: &AshInstance) {
        unsafe {
            if let Some(debug) = &instance.debug {
                debug.loader.destroy_debug_utils_messenger(debug.messenger, None);
            }
            instance.instance.destroy_instance(None);
        }
    }
}

/// Instance created by [`AshDriver`]
pub struct AshInstance {
    instance: Instance,
    debug: Option<DebugMessenger>,
}

impl AshInstance {
    /// The `ash` instance function table
    pub fn handle(&self) -> &Instance {
        &self.instance
    }
}

struct DebugMessenger {
    loader: DebugUtils,
    messenger: vk::DebugUtilsMessengerEXT,
}

impl DebugMessenger {
    fn new(entry: &Entry, instance: &Instance) -> Result<Self, vk::Result> {
        let loader = DebugUtils::new(entry, instance);
        let create_info = vk::DebugUtilsMessengerCreateInfoEXT::builder()
            .message_severity(
                vk::DebugUtilsMessageSeverityFlagsEXT::WARNING
                    | vk::DebugUtilsMessageSeverityFlagsEXT::ERROR,
            )
            .message_type(
                vk::DebugUtilsMessageTypeFlagsEXT::GENERAL
                    | vk::DebugUtilsMessageTypeFlagsEXT::VALIDATION
                    | vk::DebugUtilsMessageTypeFlagsEXT::PERFORMANCE,
            )
            .pfn_user_callback(Some(debug_callback));

        let messenger = unsafe { loader.create_debug_utils_messenger(&create_info, None)? };
        log::debug!("Debug messenger installed");

        Ok(Self { loader, messenger })
    }
}

/// Debug callback for validation layers
unsafe extern "system" fn debug_callback(
    message_severity: vk::DebugUtilsMessageSeverityFlagsEXT,
    message_type: vk::DebugUtilsMessageTypeFlagsEXT,
    callback_data: *const vk::DebugUtilsMessengerCallbackDataEXT,
    _user_data: *mut std::ffi::c_void,
) -> vk::Bool32 {
    if callback_data.is_null() || (*callback_data).p_message.is_null() {
        return vk::FALSE;
    }
    let message = CStr::from_ptr((*callback_data).p_message).to_string_lossy();

    if message_severity >= vk::DebugUtilsMessageSeverityFlagsEXT::ERROR {
        log::error!("[Vulkan] {:?} - {}", message_type, message);
    } else if message_severity >= vk::DebugUtilsMessageSeverityFlagsEXT::WARNING {
        log::warn!("[Vulkan] {:?} - {}", message_type, message);
    } else {
        log::debug!("[Vulkan] {:?} - {}", message_type, message);
    }

    vk::FALSE
}

/// Names are NUL-terminated by the driver; a missing terminator is truncated
/// at the array end.
fn fixed_name(raw: &[c_char]) -> String {
    let bytes: Vec<u8> = raw
        .iter()
        .take_while(|&&c| c != 0)
        .map(|&c| c as u8)
        .collect();
    String::from_utf8_lossy(&bytes).into_owned()
}

// Names are checked for NUL bytes during negotiation
fn to_cstring(name: &str) -> Result<CString, vk::Result> {
    CString::new(name).map_err(|_| vk::Result::ERROR_INITIALIZATION_FAILED)
}
