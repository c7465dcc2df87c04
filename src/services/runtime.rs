//! Tokio Runtime Bridge
//!
//! The terminal loop is synchronous; the device ticker runs on tokio.
//! This module owns the process-wide runtime the loop hands tasks to.
//!
//! ## Pattern
//!
//! ```text
//! read-eval-print loop
//!       │
//!       ▼
//! runtime_handle()
//!       │
//!       ▼
//! spawn_named(&handle, "device-ticker", async { ... })
//!       │
//!       ▼ DeviceEvent (crossbeam)
//! SessionState drains on each pass
//! ```

use std::future::Future;
use std::sync::OnceLock;

use tokio::runtime::{Handle, Runtime};
use tokio::task::JoinHandle;

use crate::error::{Error, Result};

/// Global tokio runtime instance
static TOKIO_RUNTIME: OnceLock<Runtime> = OnceLock::new();

/// Get or initialize the global tokio runtime
fn get_runtime() -> Result<&'static Runtime> {
    if let Some(runtime) = TOKIO_RUNTIME.get() {
        return Ok(runtime);
    }
    let runtime = Runtime::new().map_err(|e| Error::Device {
        message: format!("Failed to create tokio runtime: {e}"),
    })?;
    Ok(TOKIO_RUNTIME.get_or_init(|| runtime))
}

/// Get a handle to the global tokio runtime
pub fn runtime_handle() -> Result<Handle> {
    Ok(get_runtime()?.handle().clone())
}

/// Spawn a detached task with a name (for debugging)
pub fn spawn_named<F>(handle: &Handle, name: &'static str, future: F) -> JoinHandle<()>
where
    F: Future<Output = ()> + Send + 'static,
{
    tracing::debug!("Spawning tokio task: {}", name);
    handle.spawn(async move {
        future.await;
        tracing::debug!("Tokio task completed: {}", name);
    })
}
