use app_core::platform::Spawner;
use futures::future::LocalBoxFuture;

/// Spawns onto the current `LocalSet`.
pub struct TokioSpawner;

impl Spawner for TokioSpawner {
    fn spawn(&self, task: LocalBoxFuture<'static, ()>) {
        tokio::task::spawn_local(task);
    }
}
