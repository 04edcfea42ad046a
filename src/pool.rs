use std::sync::OnceLock;

use futures::executor::{ThreadPool, ThreadPoolBuilder};

static THREAD_POOL: OnceLock<ThreadPool> = OnceLock::new();

// Shared pool for detached task execution, initialized on first use.
pub(crate) fn get() -> &'static ThreadPool {
    THREAD_POOL.get_or_init(|| {
        ThreadPoolBuilder::new()
            .pool_size(40)
            .create()
            .expect("Thread pool creation failed")
    })
}
