//! Hello triangle bootstrap
//!
//! Opens an 800x600 window, creates a Vulkan instance and waits for the
//! window to be closed. Exit status is 0 on a clean shutdown and 1 if any
//! start-up phase failed.

use std::process::ExitCode;

use vk_bootstrap::foundation::logging;
use vk_bootstrap::prelude::*;

fn main() -> ExitCode {
    logging::init();

    let lifecycle = ApplicationLifecycle::new(BootstrapConfig::default());
    log::info!(
        "Starting '{}' (validation {})",
        lifecycle.config().window.title,
        if lifecycle.config().instance.enable_validation { "enabled" } else { "disabled" }
    );

    match lifecycle.run(GlfwSystem::init, AshDriver::load) {
        Ok(report) => {
            log::info!(
                "Exited cleanly after {} polls (extensions: {:?}, layers: {:?})",
                report.poll_count,
                report.extensions,
                report.layers
            );
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("{}", e);
            ExitCode::FAILURE
        }
    }
}
