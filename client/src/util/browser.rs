//! Browser clock and detached-task spawner for the session manager.

use futures::future::LocalBoxFuture;
use session::{Clock, Spawner};

/// Wall clock read from `Date.now()`; `std::time` is unavailable in WASM.
#[derive(Debug, Default, Clone, Copy)]
pub struct BrowserClock;

impl Clock for BrowserClock {
    fn now_secs(&self) -> f64 {
        #[cfg(feature = "hydrate")]
        {
            js_sys::Date::now() / 1000.0
        }
        #[cfg(not(feature = "hydrate"))]
        {
            session::SystemClock.now_secs()
        }
    }
}

/// Spawns detached work on the page's microtask queue.
#[derive(Debug, Default, Clone, Copy)]
pub struct LocalSpawner;

impl Spawner for LocalSpawner {
    fn spawn_detached(&self, task: LocalBoxFuture<'static, ()>) {
        #[cfg(feature = "hydrate")]
        {
            wasm_bindgen_futures::spawn_local(task);
        }
        #[cfg(not(feature = "hydrate"))]
        {
            drop(task);
        }
    }
}
