//! Fake windowing and driver backends shared by unit tests

use ash::vk;
use std::cell::{Cell, RefCell};
use std::rc::Rc;

use crate::render::vulkan::{Capability, CapabilityKind, InstanceDriver, InstanceRequest};
use crate::render::window::{PlatformWindow, WindowDescriptor, WindowSystem};

/// Ordered record of create/destroy calls across fakes
#[derive(Debug, Clone, Default)]
pub struct EventLog(Rc<RefCell<Vec<String>>>);

impl EventLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&self, event: &str) {
        self.0.borrow_mut().push(event.to_string());
    }

    pub fn events(&self) -> Vec<String> {
        self.0.borrow().clone()
    }

    pub fn contains(&self, event: &str) -> bool {
        self.0.borrow().iter().any(|e| e == event)
    }

    pub fn count(&self, event: &str) -> usize {
        self.0.borrow().iter().filter(|e| *e == event).count()
    }
}

pub struct FakeDriver {
    layers: Vec<Capability>,
    extensions: Vec<Capability>,
    enumeration_error: Option<vk::Result>,
    create_error: Option<vk::Result>,
    incomplete_reads: Cell<usize>,
    count_calls: Cell<usize>,
    read_calls: Cell<usize>,
    create_calls: Cell<usize>,
    destroy_calls: Cell<usize>,
    next_handle: Cell<u64>,
    last_request: RefCell<Option<InstanceRequest>>,
    log: Option<EventLog>,
}

impl FakeDriver {
    pub fn new() -> Self {
        Self {
            layers: Vec::new(),
            extensions: Vec::new(),
            enumeration_error: None,
            create_error: None,
            incomplete_reads: Cell::new(0),
            count_calls: Cell::new(0),
            read_calls: Cell::new(0),
            create_calls: Cell::new(0),
            destroy_calls: Cell::new(0),
            next_handle: Cell::new(1),
            last_request: RefCell::new(None),
            log: None,
        }
    }

    pub fn with_layers(mut self, names: &[&str]) -> Self {
        self.layers = names.iter().map(|n| Capability::new(*n, CapabilityKind::Layer, 1)).collect();
        self
    }

    pub fn with_extensions(mut self, names: &[&str]) -> Self {
        self.extensions = names
            .iter()
            .map(|n| Capability::new(*n, CapabilityKind::Extension, 1))
            .collect();
        self
    }

    pub fn with_enumeration_error(mut self, code: vk::Result) -> Self {
        self.enumeration_error = Some(code);
        self
    }

    pub fn with_create_error(mut self, code: vk::Result) -> Self {
        self.create_error = Some(code);
        self
    }

    /// The next `reads` fill queries report `VK_INCOMPLETE`
    pub fn with_incomplete_reads(self, reads: usize) -> Self {
        self.incomplete_reads.set(reads);
        self
    }

    pub fn with_log(mut self, log: &EventLog) -> Self {
        self.log = Some(log.clone());
        self
    }

    pub fn count_calls(&self) -> usize {
        self.count_calls.get()
    }

    pub fn read_calls(&self) -> usize {
        self.read_calls.get()
    }

    pub fn create_calls(&self) -> usize {
        self.create_calls.get()
    }

    pub fn destroy_calls(&self) -> usize {
        self.destroy_calls.get()
    }

    pub fn last_request(&self) -> Option<InstanceRequest> {
        self.last_request.borrow().clone()
    }

    fn catalog(&self, kind: CapabilityKind) -> &[Capability] {
        match kind {
            CapabilityKind::Layer => &self.layers,
            CapabilityKind::Extension => &self.extensions,
        }
    }

    fn record(&self, event: &str) {
        if let Some(log) = &self.log {
            log.push(event);
        }
    }
}

impl InstanceDriver for FakeDriver {
    type Instance = u64;

    fn capability_count(&self, kind: CapabilityKind) -> Result<u32, vk::Result> {
        self.count_calls.set(self.count_calls.get() + 1);
        if let Some(code) = self.enumeration_error {
            return Err(code);
        }
        Ok(self.catalog(kind).len() as u32)
    }

    fn read_capabilities(&self, kind: CapabilityKind, capacity: u32) -> Result<Vec<Capability>, vk::Result> {
        self.read_calls.set(self.read_calls.get() + 1);
        let pending = self.incomplete_reads.get();
        if pending > 0 {
            self.incomplete_reads.set(pending - 1);
            return Err(vk::Result::INCOMPLETE);
        }

        let catalog = self.catalog(kind);
        if catalog.len() > capacity as usize {
            return Err(vk::Result::INCOMPLETE);
        }
        Ok(catalog.to_vec())
    }

    fn create_instance(&self, request: &InstanceRequest) -> Result<u64, vk::Result> {
        self.create_calls.set(self.create_calls.get() + 1);
        *self.last_request.borrow_mut() = Some(request.clone());

        if let Some(code) = self.create_error {
            self.record("create_instance_failed");
            return Err(code);
        }

        let handle = self.next_handle.get();
        self.next_handle.set(handle + 1);
        self.record("create_instance");
        Ok(handle)
    }

    fn destroy_instance(&self, _instance: &u64) {
        self.destroy_calls.set(self.destroy_calls.get() + 1);
        self.record("destroy_instance");
    }
}

pub struct FakeWindowSystem {
    log: EventLog,
    fail_create: bool,
    close_after: Option<usize>,
    vulkan: bool,
    last_descriptor: Option<WindowDescriptor>,
}

impl FakeWindowSystem {
    pub fn new(log: &EventLog) -> Self {
        log.push("init_window_system");
        Self {
            log: log.clone(),
            fail_create: false,
            close_after: None,
            vulkan: true,
            last_descriptor: None,
        }
    }

    pub fn failing_window_creation(mut self) -> Self {
        self.fail_create = true;
        self
    }

    /// Windows report a close request on their `polls`-th poll
    pub fn close_after_polls(mut self, polls: usize) -> Self {
        self.close_after = Some(polls);
        self
    }

    pub fn without_vulkan(mut self) -> Self {
        self.vulkan = false;
        self
    }

    pub fn last_descriptor(&self) -> Option<&WindowDescriptor> {
        self.last_descriptor.as_ref()
    }
}

impl WindowSystem for FakeWindowSystem {
    type Window = FakeWindow;

    fn create_window(&mut self, descriptor: &WindowDescriptor) -> Option<FakeWindow> {
        self.last_descriptor = Some(descriptor.clone());
        if self.fail_create {
            return None;
        }

        self.log.push("create_window");
        Some(FakeWindow {
            log: self.log.clone(),
            close_after: self.close_after,
            polls: 0,
        })
    }

    fn poll_events(&mut self) {}

    fn required_instance_extensions(&self) -> Option<Vec<String>> {
        self.vulkan.then(|| vec!["platform-surface".to_string()])
    }
}

impl Drop for FakeWindowSystem {
    fn drop(&mut self) {
        self.log.push("terminate_window_system");
    }
}

pub struct FakeWindow {
    log: EventLog,
    close_after: Option<usize>,
    polls: usize,
}

impl FakeWindow {
    pub fn polls(&self) -> usize {
        self.polls
    }
}

impl PlatformWindow for FakeWindow {
    fn process_events(&mut self) {
        self.polls += 1;
    }

    fn should_close(&self) -> bool {
        self.close_after.map_or(false, |after| self.polls >= after)
    }
}

impl Drop for FakeWindow {
    fn drop(&mut self) {
        self.log.push("destroy_window");
    }
}
