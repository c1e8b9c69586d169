//! Poll-and-reconcile machinery shared by every view that mirrors server state.
//!
//! Nothing in here knows about Dioxus: views drive it through signals and
//! spawned tasks, tests drive it through a local tokio runtime.

mod poller;
mod reconciler;
mod sequence;
mod session;

pub use poller::*;
pub use reconciler::*;
pub use sequence::*;
pub use session::*;

use std::time::Duration;

#[cfg(not(target_arch = "wasm32"))]
pub async fn sleep(duration: Duration) {
    tokio::time::sleep(duration).await;
}

#[cfg(target_arch = "wasm32")]
pub async fn sleep(duration: Duration) {
    gloo_timers::future::TimeoutFuture::new(duration.as_millis().min(u32::MAX as u128) as u32)
        .await;
}
