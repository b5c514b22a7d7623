//! Single-window session
//!
//! A [`WindowSession`] is either open (the value exists) or closed (the value
//! has been consumed by [`WindowSession::close`] or dropped). It mutably
//! borrows the [`WindowSystem`], which guarantees the subsystem is already
//! initialized when the window is created and is still alive when it is
//! destroyed.

use super::backend::{PlatformWindow, WindowDescriptor, WindowError, WindowResult, WindowSystem};

/// Owns one native window for its whole lifetime
pub struct WindowSession<'s, S: WindowSystem> {
    system: &'s mut S,
    window: S::Window,
    title: String,
}

impl<'s, S: WindowSystem> WindowSession<'s, S> {
    /// Open a fixed-size window with no client graphics API
    ///
    /// Surface setup is left to the caller.
    pub fn open(system: &'s mut S, width: u32, height: u32, title: &str) -> WindowResult<Self> {
        let descriptor = WindowDescriptor {
            width,
            height,
            title: title.to_string(),
            resizable: false,
        };

        let window = system
            .create_window(&descriptor)
            .ok_or_else(|| WindowError::WindowCreationFailed {
                title: descriptor.title.clone(),
            })?;

        log::info!("Window '{}' opened ({}x{})", title, width, height);

        Ok(Self {
            system,
            window,
            title: descriptor.title,
        })
    }

    /// Drain pending events and report whether a close was requested
    ///
    /// Never blocks. Once a close is requested it keeps returning true.
    pub fn poll_close_requested(&mut self) -> bool {
        self.system.poll_events();
        self.window.process_events();
        self.window.should_close()
    }

    /// Vulkan instance extensions the windowing layer needs
    pub fn required_instance_extensions(&self) -> WindowResult<Vec<String>> {
        self.system
            .required_instance_extensions()
            .ok_or(WindowError::VulkanUnsupported)
    }

    /// Window title
    pub fn title(&self) -> &str {
        &self.title
    }

    /// Platform window
    pub fn window(&self) -> &S::Window {
        &self.window
    }

    /// Destroy the window
    pub fn close(self) {
        drop(self);
    }
}

impl<S: WindowSystem> Drop for WindowSession<'_, S> {
    fn drop(&mut self) {
        log::info!("Closing window '{}'", self.title);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{EventLog, FakeWindowSystem};

    #[test]
    fn test_open_creates_non_resizable_window() {
        let log = EventLog::new();
        let mut system = FakeWindowSystem::new(&log);

        let session = WindowSession::open(&mut system, 800, 600, "Vulkan Triangle").unwrap();
        assert_eq!(session.title(), "Vulkan Triangle");
        drop(session);

        let descriptor = system.last_descriptor().unwrap();
        assert_eq!(descriptor.width, 800);
        assert_eq!(descriptor.height, 600);
        assert!(!descriptor.resizable);
    }

    #[test]
    fn test_open_failure_is_window_creation_failed() {
        let log = EventLog::new();
        let mut system = FakeWindowSystem::new(&log).failing_window_creation();

        let err = WindowSession::open(&mut system, 800, 600, "Nope").err().unwrap();

        assert!(matches!(err, WindowError::WindowCreationFailed { ref title } if title == "Nope"));
        assert!(!log.contains("destroy_window"));
    }

    #[test]
    fn test_poll_reports_close_after_event() {
        let log = EventLog::new();
        let mut system = FakeWindowSystem::new(&log).close_after_polls(3);
        let mut session = WindowSession::open(&mut system, 1, 1, "poll").unwrap();

        assert!(!session.poll_close_requested());
        assert!(!session.poll_close_requested());
        assert!(session.poll_close_requested());
        // Sticky once requested
        assert!(session.poll_close_requested());
        assert_eq!(session.window().polls(), 4);
    }

    #[test]
    fn test_poll_is_safe_in_a_tight_loop() {
        let log = EventLog::new();
        let mut system = FakeWindowSystem::new(&log);
        let mut session = WindowSession::open(&mut system, 1, 1, "loop").unwrap();

        for _ in 0..10_000 {
            assert!(!session.poll_close_requested());
        }
    }

    #[test]
    fn test_required_extensions() {
        let log = EventLog::new();
        let mut system = FakeWindowSystem::new(&log);
        let session = WindowSession::open(&mut system, 1, 1, "ext").unwrap();
        assert_eq!(session.required_instance_extensions().unwrap(), vec!["platform-surface"]);
        drop(session);

        let mut headless = FakeWindowSystem::new(&log).without_vulkan();
        let session = WindowSession::open(&mut headless, 1, 1, "ext").unwrap();
        assert!(matches!(
            session.required_instance_extensions(),
            Err(WindowError::VulkanUnsupported)
        ));
    }

    #[test]
    fn test_close_destroys_window_once() {
        let log = EventLog::new();
        let mut system = FakeWindowSystem::new(&log);

        let session = WindowSession::open(&mut system, 1, 1, "close").unwrap();
        session.close();

        assert_eq!(log.count("destroy_window"), 1);
        drop(system);
        assert_eq!(log.events(), vec!["init_window_system", "create_window", "destroy_window", "terminate_window_system"]);
    }
}
