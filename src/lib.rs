macro_rules! debug_print {
    ($($arg:tt)*) => {
        #[cfg(feature = "debug-logs")]
        {
            eprintln!("[lc] {}", format_args!($($arg)*));
        }
        #[cfg(not(feature = "debug-logs"))]
        {
            let _ = format_args!($($arg)*);
        }
    }
}

mod client;
mod config;
mod error;
mod event_bridge;
mod log_bridge;
mod registry;
mod sentry_client;
mod shutdown;

pub use client::{ErrorClass, ErrorReport, LastError, Severity, TrackerClient};
pub use config::{ClientConfig, Config};
pub use error::Error;
pub use event_bridge::{EventBridge, LifecycleHooks};
pub use log_bridge::{LogBridge, LogLevel, LogRecord};
pub use registry::{ClientFactory, ClientRegistry, DEFAULT_CLIENT};
pub use sentry_client::{SentryClient, SentryFactory};
pub use shutdown::{MemoryReserve, ShutdownFlag};
