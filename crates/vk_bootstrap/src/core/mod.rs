//! Core engine modules
//!
//! Configuration types shared by the windowing and Vulkan layers.

pub mod config;
