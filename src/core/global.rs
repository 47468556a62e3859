//! Process-wide logger
//!
//! The global logger is created on first access with node name `"default"`
//! and location capture enabled, so messages logged through the global macros
//! carry a `[file:line]` prefix. [`init`] names the node; calling it again
//! overwrites the name rather than failing.
//!
//! ```
//! use node_logger::{global, log_info};
//!
//! global::init("fpga_driver");
//! log_info!("link up on {}", "eth0");
//! assert!(global::is_initialized());
//! ```

use super::config::{LoggerConfig, DEFAULT_NODE_NAME};
use super::logger::Logger;
use super::publish::PublishCallback;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::OnceLock;

static GLOBAL_LOGGER: OnceLock<Logger> = OnceLock::new();
static INITIALIZED: AtomicBool = AtomicBool::new(false);

/// The process-wide logger, created on first use
pub fn global() -> &'static Logger {
    GLOBAL_LOGGER.get_or_init(|| {
        Logger::from_config(LoggerConfig::new(DEFAULT_NODE_NAME).with_capture_location(true))
    })
}

/// Name the process-wide logger
///
/// Local output only until a publish callback is registered. There is no
/// guard against calling this twice; the last name wins.
pub fn init(node_name: impl Into<String>) -> &'static Logger {
    let logger = global();
    logger.set_node_name(node_name);
    INITIALIZED.store(true, Ordering::Release);
    logger
}

/// Name the process-wide logger and register its publish callback
pub fn init_with_callback(node_name: impl Into<String>, callback: PublishCallback) -> &'static Logger {
    let logger = init(node_name);
    logger.set_publish_callback(Some(callback));
    logger
}

/// Whether [`init`] has been called
pub fn is_initialized() -> bool {
    INITIALIZED.load(Ordering::Acquire)
}
