use app_core::platform::Spawner;
use futures::future::LocalBoxFuture;

/// Runs background work on the browser's microtask queue.
pub struct LocalSpawner;

impl Spawner for LocalSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        wasm_bindgen_futures::spawn_local(task);
    }
}
