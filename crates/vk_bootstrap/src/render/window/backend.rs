//! Backend-agnostic windowing traits
//!
//! The bootstrap only ever needs a handful of operations from the platform:
//! initialize and terminate the subsystem, create and destroy a window, pump
//! events, and ask whether a close was requested. Termination and destruction
//! are expressed as `Drop`.

use thiserror::Error;

/// Window management errors
#[derive(Error, Debug)]
pub enum WindowError {
    /// The process-wide windowing subsystem failed to initialize
    #[error("Windowing subsystem initialization failed: {0}")]
    InitializationFailed(String),

    /// The platform returned no window handle
    #[error("Window creation failed: '{title}'")]
    WindowCreationFailed {
        /// Title of the window that could not be created
        title: String,
    },

    /// The windowing layer cannot present with Vulkan on this host
    #[error("Windowing layer reports no Vulkan support (no required instance extensions)")]
    VulkanUnsupported,
}

/// Result type for window operations
pub type WindowResult<T> = Result<T, WindowError>;

/// Parameters for creating a window
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WindowDescriptor {
    /// Client-area width in screen coordinates
    pub width: u32,
    /// Client-area height in screen coordinates
    pub height: u32,
    /// Title bar text
    pub title: String,
    /// Whether the user may resize the window
    pub resizable: bool,
}

/// A live native window
///
/// Dropping the value destroys the window.
pub trait PlatformWindow {
    /// Handle events queued for this window since the last call
    fn process_events(&mut self);

    /// True once a close has been requested
    fn should_close(&self) -> bool;
}

/// Initialized process-wide windowing subsystem
///
/// Dropping the value terminates the subsystem.
pub trait WindowSystem {
    /// Window type produced by this system
    type Window: PlatformWindow;

    /// Create a window with no client graphics API attached
    ///
    /// Returns `None` if the platform refuses.
    fn create_window(&mut self, descriptor: &WindowDescriptor) -> Option<Self::Window>;

    /// Pump pending platform events without blocking
    fn poll_events(&mut self);

    /// Instance extensions Vulkan needs to present to this platform's windows
    ///
    /// `None` if Vulkan is not usable with this windowing layer.
    fn required_instance_extensions(&self) -> Option<Vec<String>>;
}
