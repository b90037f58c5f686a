use std::path::{Path, PathBuf};

use diesel::prelude::*;
use tempfile::TempDir;
use trackwell::adapter::outbound::sqlite::database::connection::{
    create_pool, run_migrations, DbPool,
};
use trackwell::adapter::outbound::sqlite::{SqliteStore, WriteStatements};

/// Temporary SQLite database for integration tests.
///
/// File-backed so every pooled connection sees the same data; removed with
/// its directory on drop.
pub struct TempDb {
    _dir: TempDir,
    path: PathBuf,
    pool: DbPool,
}

impl TempDb {
    pub fn create(name: &str) -> Self {
        Self::with_pool_size(name, 4)
    }

    pub fn with_pool_size(name: &str, pool_size: u32) -> Self {
        let dir = tempfile::tempdir().expect("create temp dir");
        let path = dir.path().join(format!("trackwell-{name}.db"));

        let pool = create_pool(&path.display().to_string(), pool_size).expect("create sqlite pool");
        run_migrations(&pool).expect("run migrations");

        // WAL mode improves concurrent writer behavior in tests.
        {
            let mut conn = pool.get().expect("get sqlite connection");
            diesel::sql_query("PRAGMA journal_mode=WAL")
                .execute(&mut conn)
                .expect("enable WAL mode");
        }

        Self {
            _dir: dir,
            path,
            pool,
        }
    }

    pub fn pool(&self) -> &DbPool {
        &self.pool
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn store(&self) -> SqliteStore {
        SqliteStore::new(self.pool.clone())
    }

    pub fn store_with(&self, statements: WriteStatements) -> SqliteStore {
        SqliteStore::with_statements(self.pool.clone(), statements)
    }
}
