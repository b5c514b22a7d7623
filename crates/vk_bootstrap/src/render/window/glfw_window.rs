//! GLFW windowing backend
//!
//! GLFW is terminated when the last `glfw::Glfw` handle is dropped. Every
//! window keeps its own handle internally, so termination always follows the
//! destruction of the last window.

use glfw::{Action, ClientApiHint, Key, WindowEvent, WindowHint, WindowMode};

use super::backend::{PlatformWindow, WindowDescriptor, WindowError, WindowResult, WindowSystem};

/// Initialized GLFW library
pub struct GlfwSystem {
    glfw: glfw::Glfw,
}

impl GlfwSystem {
    /// Initialize GLFW
    ///
    /// GLFW errors reported after initialization are logged rather than
    /// panicking. Failed calls still signal failure through their return
    /// values.
    pub fn init() -> WindowResult<Self> {
        let glfw = glfw::init(glfw::log_errors)
            .map_err(|e| WindowError::InitializationFailed(format!("{:?}", e)))?;

        log::debug!("GLFW initialized, Vulkan supported: {}", glfw.vulkan_supported());
        Ok(Self { glfw })
    }
}

impl WindowSystem for GlfwSystem {
    type Window = GlfwWindow;

    fn create_window(&mut self, descriptor: &WindowDescriptor) -> Option<GlfwWindow> {
        // Configure for Vulkan (no OpenGL context)
        self.glfw.window_hint(WindowHint::ClientApi(ClientApiHint::NoApi));
        self.glfw.window_hint(WindowHint::Resizable(descriptor.resizable));

        let (mut window, events) = self.glfw.create_window(
            descriptor.width,
            descriptor.height,
            &descriptor.title,
            WindowMode::Windowed,
        )?;

        window.set_close_polling(true);
        window.set_key_polling(true);

        Some(GlfwWindow { window, events })
    }

    fn poll_events(&mut self) {
        self.glfw.poll_events();
    }

    fn required_instance_extensions(&self) -> Option<Vec<String>> {
        self.glfw.get_required_instance_extensions()
    }
}

impl Drop for GlfwSystem {
    fn drop(&mut self) {
        log::debug!("Terminating GLFW");
    }
}

/// GLFW window wrapper with proper resource management
pub struct GlfwWindow {
    window: glfw::PWindow,
    events: glfw::GlfwReceiver<(f64, WindowEvent)>,
}

impl PlatformWindow for GlfwWindow {
    fn process_events(&mut self) {
        for (_, event) in glfw::flush_messages(&self.events) {
            match event {
                WindowEvent::Close | WindowEvent::Key(Key::Escape, _, Action::Press, _) => {
                    self.window.set_should_close(true);
                }
                _ => {}
            }
        }
    }

    fn should_close(&self) -> bool {
        self.window.should_close()
    }
}
