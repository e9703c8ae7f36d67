//! Runtime abstraction layer for async operations
//!
//! The animation timer runs as a spawned task. Spawning goes through
//! [`AsyncSpawner`] so an embedder can route tasks onto its own executor;
//! the default spawner uses the ambient Tokio runtime.

use crate::{
    prelude::{Future, Pin},
    MapError, Result,
};

/// A trait for spawning async tasks (object-safe version)
pub trait AsyncSpawner: Send + Sync + 'static {
    /// Spawn a future and return a handle to it
    fn spawn_boxed(
        &self,
        future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
    ) -> Result<Box<dyn AsyncHandle>>;
}

/// Handle to a spawned async task
pub trait AsyncHandle: Send + Sync {
    /// Check if the task is finished
    fn is_finished(&self) -> bool;

    /// Cancel the task
    fn cancel(&self);
}

/// Convenience function for spawning with type safety
pub fn spawn<F>(future: F) -> Result<Box<dyn AsyncHandle>>
where
    F: Future<Output = ()> + Send + 'static,
{
    log::trace!("runtime::spawn() - spawning new async task");
    runtime().spawn_boxed(Box::pin(future))
}

/// Default spawner implementations
pub mod spawners {
    use super::*;
    use ::tokio::task::JoinHandle;

    /// Tokio-based async spawner; needs to be called from inside a runtime
    pub struct TokioSpawner;

    impl AsyncSpawner for TokioSpawner {
        fn spawn_boxed(
            &self,
            future: Pin<Box<dyn Future<Output = ()> + Send + 'static>>,
        ) -> Result<Box<dyn AsyncHandle>> {
            let runtime = ::tokio::runtime::Handle::try_current().map_err(|err| {
                MapError::Animation(format!("no Tokio runtime to spawn on: {err}"))
            })?;
            Ok(Box::new(TokioHandle(runtime.spawn(future))))
        }
    }

    struct TokioHandle(JoinHandle<()>);

    impl AsyncHandle for TokioHandle {
        fn is_finished(&self) -> bool {
            self.0.is_finished()
        }

        fn cancel(&self) {
            self.0.abort();
        }
    }
}

/// Global runtime instance
static RUNTIME: std::sync::OnceLock<Box<dyn AsyncSpawner>> = std::sync::OnceLock::new();

/// Initialize the runtime with a specific spawner. Only the first call wins.
///
/// Spawned futures may sleep on Tokio's timer, so the spawner must run them
/// on a Tokio runtime.
pub fn init_runtime(spawner: Box<dyn AsyncSpawner>) {
    if RUNTIME.set(spawner).is_err() {
        log::debug!("Runtime already initialised, keeping the existing spawner");
    }
}

/// Get the global runtime spawner
pub fn runtime() -> &'static dyn AsyncSpawner {
    RUNTIME
        .get_or_init(|| Box::new(spawners::TokioSpawner))
        .as_ref()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[::tokio::test]
    async fn test_tokio_spawner() {
        let handle = spawn(async {
            ::tokio::time::sleep(::tokio::time::Duration::from_millis(10)).await;
        })
        .unwrap();

        assert!(!handle.is_finished());

        ::tokio::time::sleep(::tokio::time::Duration::from_millis(50)).await;
        assert!(handle.is_finished());
    }

    #[::tokio::test]
    async fn test_cancel() {
        let handle = spawn(async {
            ::tokio::time::sleep(::tokio::time::Duration::from_secs(60)).await;
        })
        .unwrap();

        handle.cancel();
        ::tokio::time::sleep(::tokio::time::Duration::from_millis(10)).await;
        assert!(handle.is_finished());
    }

    #[test]
    fn test_spawn_outside_runtime_is_an_error() {
        let result = spawn(async {});
        assert!(matches!(result, Err(MapError::Animation(_))));
    }
}
