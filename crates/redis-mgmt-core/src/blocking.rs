//! Blocking bridge for the `_sync` call forms
//!
//! The `_sync` twins on the surface clients drive the one async pipeline to
//! completion on a shared runtime owned here. The runtime is built lazily on
//! first use and reused for the life of the process.

use std::sync::OnceLock;

use tokio::runtime::Runtime;

static RUNTIME: OnceLock<Runtime> = OnceLock::new();

fn runtime() -> &'static Runtime {
    RUNTIME.get_or_init(|| {
        tokio::runtime::Builder::new_multi_thread()
            .enable_all()
            .thread_name("redis-mgmt-blocking")
            .build()
            .expect("failed to build blocking bridge runtime")
    })
}

/// Run `future` to completion on the shared bridge runtime.
///
/// # Panics
///
/// Panics when called from inside an async context, like any nested
/// `block_on`. Use the async form of the operation there instead.
pub fn block_on<F: Future>(future: F) -> F::Output {
    runtime().block_on(future)
}
