use rayon::{ThreadPool, ThreadPoolBuilder};
use std::sync::Arc;

use mf_types::{MfError, MfResult};

/// Worker pool borrowed by an engine for the duration of one run.
///
/// An `Owned` pool lives and dies with the engine; a `Shared` pool is managed
/// by the caller, who may reuse it across runs and is responsible for its
/// lifetime.
#[derive(Debug)]
pub enum PoolHandle {
    Owned(ThreadPool),
    Shared(Arc<ThreadPool>),
}

impl PoolHandle {
    /// Build an engine-owned pool with the given number of worker threads.
    pub fn owned(threads: usize) -> MfResult<Self> {
        let pool = ThreadPoolBuilder::new()
            .num_threads(threads)
            .build()
            .map_err(|e| MfError::Pool(e.to_string()))?;
        Ok(Self::Owned(pool))
    }

    /// Borrow a caller-managed pool.
    pub fn shared(pool: Arc<ThreadPool>) -> Self {
        Self::Shared(pool)
    }

    pub fn get(&self) -> &ThreadPool {
        match self {
            Self::Owned(pool) => pool,
            Self::Shared(pool) => pool,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn owned_pool_uses_requested_thread_count() {
        let handle = PoolHandle::owned(3).unwrap();
        assert_eq!(handle.get().current_num_threads(), 3);
    }

    #[test]
    fn shared_pool_is_reusable_across_handles() {
        let pool = Arc::new(ThreadPoolBuilder::new().num_threads(2).build().unwrap());
        let a = PoolHandle::shared(Arc::clone(&pool));
        let b = PoolHandle::shared(pool);
        assert_eq!(a.get().current_num_threads(), 2);
        assert_eq!(b.get().current_num_threads(), 2);
    }
}
