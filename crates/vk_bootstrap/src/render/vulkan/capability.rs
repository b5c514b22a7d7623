//! Driver capability enumeration
//!
//! The driver reports instance layers and instance extensions through the
//! Vulkan "ask for the count, then ask again with a buffer" protocol.
//! [`CapabilityCatalog::enumerate`] hides that protocol and produces a plain
//! list that can answer membership questions.

use ash::vk;
use std::fmt;

use super::driver::InstanceDriver;
use super::{VulkanError, VulkanResult};

/// What kind of instance capability a name refers to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum CapabilityKind {
    /// Instance extension (`vkEnumerateInstanceExtensionProperties`)
    Extension,
    /// Instance layer (`vkEnumerateInstanceLayerProperties`)
    Layer,
}

impl fmt::Display for CapabilityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Extension => f.write_str("extension"),
            Self::Layer => f.write_str("layer"),
        }
    }
}

/// A capability advertised by the driver
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capability {
    /// Name as reported by the driver, e.g. `VK_LAYER_KHRONOS_validation`
    pub name: String,
    /// Extension or layer
    pub kind: CapabilityKind,
    /// Driver-reported specification version
    pub spec_version: u32,
}

impl Capability {
    /// Create a capability entry
    pub fn new(name: impl Into<String>, kind: CapabilityKind, spec_version: u32) -> Self {
        Self {
            name: name.into(),
            kind,
            spec_version,
        }
    }
}

/// Whether a single requested name was found in a catalog
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CapabilityReport {
    /// Requested name
    pub name: String,
    /// True if the catalog advertises it
    pub found: bool,
}

/// Snapshot of every capability of one kind the driver offers
#[derive(Debug, Clone)]
pub struct CapabilityCatalog {
    kind: CapabilityKind,
    capabilities: Vec<Capability>,
}

impl CapabilityCatalog {
    /// Query the driver for every capability of `kind`
    ///
    /// A count of zero yields an empty catalog. If the driver's list grows
    /// between the count and the fill query it answers `VK_INCOMPLETE`, and
    /// the whole exchange is restarted.
    pub fn enumerate<D: InstanceDriver>(driver: &D, kind: CapabilityKind) -> VulkanResult<Self> {
        let capabilities = loop {
            let count = driver
                .capability_count(kind)
                .map_err(|code| VulkanError::EnumerationFailed { kind, code })?;

            if count == 0 {
                break Vec::new();
            }

            match driver.read_capabilities(kind, count) {
                Ok(capabilities) => break capabilities,
                Err(vk::Result::INCOMPLETE) => {
                    log::debug!("Instance {} list changed during enumeration, retrying", kind);
                }
                Err(code) => return Err(VulkanError::EnumerationFailed { kind, code }),
            }
        };

        log::debug!("Driver advertises {} instance {}(s)", capabilities.len(), kind);
        Ok(Self::from_capabilities(kind, capabilities))
    }

    /// Build a catalog from an already-enumerated list
    pub fn from_capabilities(kind: CapabilityKind, capabilities: Vec<Capability>) -> Self {
        Self { kind, capabilities }
    }

    /// The kind of capability this catalog holds
    pub fn kind(&self) -> CapabilityKind {
        self.kind
    }

    /// Number of advertised capabilities
    pub fn len(&self) -> usize {
        self.capabilities.len()
    }

    /// True if the driver advertised nothing of this kind
    pub fn is_empty(&self) -> bool {
        self.capabilities.is_empty()
    }

    /// Iterate over the advertised capabilities in driver order
    pub fn iter(&self) -> impl Iterator<Item = &Capability> {
        self.capabilities.iter()
    }

    /// Advertised names in driver order
    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.capabilities.iter().map(|c| c.name.as_str())
    }

    /// Exact, case-sensitive lookup of a single name
    pub fn contains(&self, name: &str) -> bool {
        self.capabilities.iter().any(|c| c.name == name)
    }

    /// True iff every requested name is advertised
    ///
    /// An empty request is always supported.
    pub fn supports<S: AsRef<str>>(&self, requested: &[S]) -> bool {
        let mut supported = true;
        for report in self.report(requested) {
            if report.found {
                log::debug!("[{}] {} available", self.kind, report.name);
            } else {
                log::debug!("[{}] {} not advertised by driver", self.kind, report.name);
                supported = false;
            }
        }
        supported
    }

    /// Per-name lookup result, in request order
    pub fn report<S: AsRef<str>>(&self, requested: &[S]) -> Vec<CapabilityReport> {
        requested
            .iter()
            .map(|name| CapabilityReport {
                name: name.as_ref().to_string(),
                found: self.contains(name.as_ref()),
            })
            .collect()
    }

    /// Requested names the catalog does not advertise, in request order
    pub fn missing<S: AsRef<str>>(&self, requested: &[S]) -> Vec<String> {
        self.report(requested)
            .into_iter()
            .filter(|report| !report.found)
            .map(|report| report.name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::FakeDriver;

    fn layer_catalog() -> CapabilityCatalog {
        CapabilityCatalog::from_capabilities(
            CapabilityKind::Layer,
            vec![
                Capability::new("VK_LAYER_KHRONOS_validation", CapabilityKind::Layer, 1),
                Capability::new("VK_LAYER_LUNARG_monitor", CapabilityKind::Layer, 1),
            ],
        )
    }

    #[test]
    fn test_supports_present_names() {
        let catalog = layer_catalog();

        assert!(catalog.supports(&["VK_LAYER_KHRONOS_validation"]));
        assert!(catalog.supports(&["VK_LAYER_LUNARG_monitor", "VK_LAYER_KHRONOS_validation"]));
    }

    #[test]
    fn test_supports_rejects_absent_names() {
        let catalog = layer_catalog();

        assert!(!catalog.supports(&["VK_LAYER_missing"]));
        assert!(!catalog.supports(&["VK_LAYER_KHRONOS_validation", "VK_LAYER_missing"]));
        // Matching is exact and case-sensitive
        assert!(!catalog.supports(&["vk_layer_khronos_validation"]));
        assert!(!catalog.supports(&["VK_LAYER_KHRONOS"]));
    }

    #[test]
    fn test_empty_request_is_always_supported() {
        let empty: [&str; 0] = [];

        assert!(layer_catalog().supports(&empty));
        assert!(CapabilityCatalog::from_capabilities(CapabilityKind::Layer, Vec::new()).supports(&empty));
    }

    #[test]
    fn test_report_and_missing_keep_request_order() {
        let catalog = layer_catalog();
        let requested = ["b-missing", "VK_LAYER_LUNARG_monitor", "a-missing"];

        let report = catalog.report(&requested);
        assert_eq!(report.len(), 3);
        assert!(!report[0].found);
        assert!(report[1].found);
        assert_eq!(catalog.missing(&requested), vec!["b-missing", "a-missing"]);
    }

    #[test]
    fn test_enumerate_uses_count_then_fill() {
        let driver = FakeDriver::new().with_layers(&["debug-layer", "other-layer"]);

        let catalog = CapabilityCatalog::enumerate(&driver, CapabilityKind::Layer).unwrap();

        assert_eq!(catalog.len(), 2);
        assert_eq!(catalog.names().collect::<Vec<_>>(), vec!["debug-layer", "other-layer"]);
        assert_eq!(driver.count_calls(), 1);
        assert_eq!(driver.read_calls(), 1);
    }

    #[test]
    fn test_enumerate_tolerates_zero_count() {
        let driver = FakeDriver::new();

        let catalog = CapabilityCatalog::enumerate(&driver, CapabilityKind::Extension).unwrap();

        assert!(catalog.is_empty());
        assert_eq!(catalog.kind(), CapabilityKind::Extension);
        assert_eq!(driver.read_calls(), 0);
    }

    #[test]
    fn test_enumerate_restarts_on_incomplete() {
        let driver = FakeDriver::new()
            .with_extensions(&["platform-surface"])
            .with_incomplete_reads(2);

        let catalog = CapabilityCatalog::enumerate(&driver, CapabilityKind::Extension).unwrap();

        assert!(catalog.contains("platform-surface"));
        assert_eq!(driver.count_calls(), 3);
        assert_eq!(driver.read_calls(), 3);
    }

    #[test]
    fn test_enumerate_propagates_driver_errors() {
        let driver = FakeDriver::new().with_enumeration_error(vk::Result::ERROR_OUT_OF_HOST_MEMORY);

        let err = CapabilityCatalog::enumerate(&driver, CapabilityKind::Layer).unwrap_err();

        assert!(matches!(
            err,
            VulkanError::EnumerationFailed {
                kind: CapabilityKind::Layer,
                code: vk::Result::ERROR_OUT_OF_HOST_MEMORY,
            }
        ));
    }
}
