//! Window management subsystem
//!
//! ```text
//! ┌─────────────────────────────────┐
//! │     ApplicationLifecycle        │
//! └─────────────┬───────────────────┘
//!               │ Uses
//!       ┌───────▼───────┐
//!       │ WindowSession │ ← Owns one window (session.rs)
//!       └───────┬───────┘
//!               │ Borrows
//!      ┌────────▼────────┐
//!      │ WindowSystem    │ ← Backend traits (backend.rs)
//!      └────────┬────────┘
//!               │ Implemented by
//!      ┌────────▼────────┐
//!      │ GlfwSystem      │ ← GLFW backend (glfw_window.rs)
//!      └─────────────────┘
//! ```
//!
//! The session borrows the windowing subsystem for its whole lifetime, so a
//! window can never outlive the subsystem that created it.

pub mod backend;
pub mod glfw_window;
pub mod session;

pub use backend::{PlatformWindow, WindowDescriptor, WindowError, WindowResult, WindowSystem};
pub use glfw_window::{GlfwSystem, GlfwWindow};
pub use session::WindowSession;
