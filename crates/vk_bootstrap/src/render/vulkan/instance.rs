//! Instance negotiation and ownership
//!
//! Negotiation runs in two steps. [`InstanceNegotiator::negotiate`] works out
//! the exact extension and layer lists and checks every optional name against
//! the driver's catalog. [`InstanceNegotiator::create`] then makes the single
//! `vkCreateInstance` call. Nothing irreversible happens until the plan has
//! been validated.
//!
//! The created [`VulkanInstance`] owns the driver handle. Destroying it
//! consumes the value, and dropping it releases the handle, so the handle is
//! destroyed exactly once on every path.

use std::fmt;

use super::capability::{CapabilityCatalog, CapabilityKind};
use super::driver::{ApplicationIdentity, InstanceDriver, InstanceRequest};
use super::{VulkanError, VulkanResult};

/// Diagnostic capabilities the application may opt into
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct OptionalCapabilities {
    /// Instance layers, e.g. `VK_LAYER_KHRONOS_validation`
    pub layers: Vec<String>,
    /// Instance extensions, e.g. `VK_EXT_debug_utils`
    pub extensions: Vec<String>,
}

impl OptionalCapabilities {
    /// No optional capabilities at all
    pub fn none() -> Self {
        Self::default()
    }

    /// Optional layers only
    pub fn layers<S: Into<String>>(layers: impl IntoIterator<Item = S>) -> Self {
        Self {
            layers: layers.into_iter().map(Into::into).collect(),
            extensions: Vec::new(),
        }
    }

    /// Add optional extensions
    pub fn with_extensions<S: Into<String>>(mut self, extensions: impl IntoIterator<Item = S>) -> Self {
        self.extensions.extend(extensions.into_iter().map(Into::into));
        self
    }

    /// True if nothing optional is requested
    pub fn is_empty(&self) -> bool {
        self.layers.is_empty() && self.extensions.is_empty()
    }
}

/// A validated instance configuration, ready for `vkCreateInstance`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InstancePlan {
    request: InstanceRequest,
}

impl InstancePlan {
    /// Extensions that will be enabled
    pub fn extensions(&self) -> &[String] {
        &self.request.extensions
    }

    /// Layers that will be enabled
    pub fn layers(&self) -> &[String] {
        &self.request.layers
    }

    /// Application identity that will be reported to the driver
    pub fn identity(&self) -> &ApplicationIdentity {
        &self.request.identity
    }
}

/// Computes and validates the capability set, then creates the instance
pub struct InstanceNegotiator<'d, D: InstanceDriver> {
    driver: &'d D,
    identity: ApplicationIdentity,
}

impl<'d, D: InstanceDriver> InstanceNegotiator<'d, D> {
    /// Create a negotiator for the given driver
    pub fn new(driver: &'d D, identity: ApplicationIdentity) -> Self {
        Self { driver, identity }
    }

    /// Work out the final extension and layer lists
    ///
    /// `mandatory` comes from the windowing layer and is used verbatim. The
    /// optional capabilities are only considered when `enable_optional` is
    /// set; in that case every one of them must be advertised by the driver,
    /// otherwise this fails with [`VulkanError::CapabilityUnavailable`].
    /// When `enable_optional` is false the driver is not queried at all.
    pub fn negotiate(
        &self,
        mandatory: &[String],
        optional: &OptionalCapabilities,
        enable_optional: bool,
    ) -> VulkanResult<InstancePlan> {
        let mut extensions = mandatory.to_vec();
        let mut layers = Vec::new();

        if enable_optional {
            self.require(CapabilityKind::Layer, &optional.layers)?;
            self.require(CapabilityKind::Extension, &optional.extensions)?;

            layers.extend(optional.layers.iter().cloned());
            for extension in &optional.extensions {
                if !extensions.contains(extension) {
                    extensions.push(extension.clone());
                }
            }
        } else if !optional.is_empty() {
            log::info!("Optional diagnostics disabled, not requesting {:?}", optional);
        }

        if let Some(name) = extensions.iter().chain(&layers).find(|name| name.contains('\0')) {
            return Err(VulkanError::InvalidCapabilityName(name.clone()));
        }

        Ok(InstancePlan {
            request: InstanceRequest {
                identity: self.identity.clone(),
                extensions,
                layers,
            },
        })
    }

    /// Create the instance described by a negotiated plan
    ///
    /// Driver failures are reported as
    /// [`VulkanError::InstanceCreationFailed`] and are not retried.
    pub fn create(&self, plan: InstancePlan) -> VulkanResult<VulkanInstance<'d, D>> {
        log::debug!(
            "Creating instance with extensions {:?} and layers {:?}",
            plan.request.extensions,
            plan.request.layers
        );

        let raw = self
            .driver
            .create_instance(&plan.request)
            .map_err(VulkanError::InstanceCreationFailed)?;

        log::info!("Vulkan instance created successfully");

        Ok(VulkanInstance {
            driver: self.driver,
            raw,
            extensions: plan.request.extensions,
            layers: plan.request.layers,
        })
    }

    /// [`negotiate`](Self::negotiate) followed by [`create`](Self::create)
    pub fn negotiate_and_create(
        &self,
        mandatory: &[String],
        optional: &OptionalCapabilities,
        enable_optional: bool,
    ) -> VulkanResult<VulkanInstance<'d, D>> {
        let plan = self.negotiate(mandatory, optional, enable_optional)?;
        self.create(plan)
    }

    fn require(&self, kind: CapabilityKind, requested: &[String]) -> VulkanResult<()> {
        if requested.is_empty() {
            return Ok(());
        }

        let catalog = CapabilityCatalog::enumerate(self.driver, kind)?;
        if catalog.supports(requested) {
            Ok(())
        } else {
            Err(VulkanError::CapabilityUnavailable {
                kind,
                missing: catalog.missing(requested),
            })
        }
    }
}

/// Exclusively-owned driver instance
///
/// Lives no longer than the driver that created it.
pub struct VulkanInstance<'d, D: InstanceDriver> {
    driver: &'d D,
    raw: D::Instance,
    extensions: Vec<String>,
    layers: Vec<String>,
}

impl<'d, D: InstanceDriver> VulkanInstance<'d, D> {
    /// Driver-specific handle
    pub fn raw(&self) -> &D::Instance {
        &self.raw
    }

    /// Extensions the instance was created with
    pub fn extensions(&self) -> &[String] {
        &self.extensions
    }

    /// Layers the instance was created with
    pub fn layers(&self) -> &[String] {
        &self.layers
    }

    /// Destroy the instance
    pub fn destroy(self) {
        log::info!("Destroying Vulkan instance");
        drop(self);
    }
}

impl<D: InstanceDriver> fmt::Debug for VulkanInstance<'_, D> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("VulkanInstance")
            .field("extensions", &self.extensions)
            .field("layers", &self.layers)
            .finish_non_exhaustive()
    }
}

impl<D: InstanceDriver> Drop for VulkanInstance<'_, D> {
    fn drop(&mut self) {
        self.driver.destroy_instance(&self.raw);
    }
}
