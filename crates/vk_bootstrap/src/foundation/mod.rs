//! Foundation module - Core utilities shared by the bootstrap layers
//!
//! Currently this is only the logging facade; everything else in the crate
//! reaches for `log` through here or directly.

pub mod logging;
