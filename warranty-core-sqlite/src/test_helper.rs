//! Isolated databases for tests.
//!
//! Every context owns a fresh SQLite file in its own temporary directory with
//! the schema applied; the directory is removed when the context is dropped.

use std::sync::Arc;
use tempfile::TempDir;
use tracing_subscriber::EnvFilter;
use warranty_core_db::interceptor::Clock;

use crate::config::StoreConfig;
use crate::repository::db_init::init_database;
use crate::store::SqliteStore;
use crate::unit_of_work::UnitOfWork;

pub struct TestContext {
    pub store: SqliteStore,
    pub pool: sqlx::SqlitePool,
    _dir: TempDir,
}

impl TestContext {
    pub fn uow(&self) -> UnitOfWork {
        self.store.unit_of_work()
    }

    pub fn uow_with_clock(&self, clock: Arc<dyn Clock>) -> UnitOfWork {
        UnitOfWork::with_clock(self.pool.clone(), clock)
    }
}

/// Honours `RUST_LOG`; only the first call installs the subscriber.
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

pub async fn setup_test_context() -> Result<TestContext, Box<dyn std::error::Error + Send + Sync>> {
    init_tracing();

    let dir = tempfile::tempdir()?;
    let config = StoreConfig {
        url: format!("sqlite://{}", dir.path().join("warranty.db").display()),
        ..StoreConfig::default()
    };
    let store = SqliteStore::connect(&config).await?;
    init_database(store.pool()).await?;

    Ok(TestContext {
        pool: store.pool().clone(),
        store,
        _dir: dir,
    })
}
