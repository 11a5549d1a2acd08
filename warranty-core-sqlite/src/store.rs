use sqlx::SqlitePool;
use std::sync::Arc;
use warranty_core_db::interceptor::{Clock, SystemClock};

use crate::config::{connect, StoreConfig};
use crate::unit_of_work::UnitOfWork;

/// Entry point of the crate: a connection pool plus the clock every unit of
/// work stamps with.
#[derive(Clone)]
pub struct SqliteStore {
    pool: SqlitePool,
    clock: Arc<dyn Clock>,
}

impl SqliteStore {
    pub fn new(pool: SqlitePool) -> Self {
        Self {
            pool,
            clock: Arc::new(SystemClock),
        }
    }

    pub async fn connect(config: &StoreConfig) -> Result<Self, sqlx::Error> {
        Ok(Self::new(connect(config).await?))
    }

    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn pool(&self) -> &SqlitePool {
        &self.pool
    }

    /// Fresh unit of work; nothing is shared with previously created ones
    /// except the pool.
    pub fn unit_of_work(&self) -> UnitOfWork {
        UnitOfWork::with_clock(self.pool.clone(), Arc::clone(&self.clock))
    }
}
