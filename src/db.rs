use std::path::{Path, PathBuf};

use sqlx::sqlite::{SqliteConnectOptions, SqliteConnection};
use sqlx::{ConnectOptions, Connection};
use tracing::{debug, warn};

use crate::error::AppError;

/// Handle to the SQLite file holding the `trips` table.
///
/// No connection is kept open: every operation opens its own with
/// [`TripStore::open`] and hands it back through [`TripStore::release`].
#[derive(Debug, Clone)]
pub struct TripStore {
    path: PathBuf,
    options: SqliteConnectOptions,
}

impl TripStore {
    pub fn new(path: impl AsRef<Path>) -> Self {
        let path = path.as_ref().to_path_buf();
        let options = SqliteConnectOptions::new()
            .filename(&path)
            .create_if_missing(true);
        Self { path, options }
    }

    pub async fn open(&self) -> Result<SqliteConnection, AppError> {
        self.options
            .connect()
            .await
            .map_err(AppError::StoreUnavailable)
    }

    pub async fn release(&self, conn: SqliteConnection) {
        if let Err(err) = conn.close().await {
            warn!("closing trip store connection failed: {err}");
        }
    }

    /// Creates the `trips` table if it does not exist yet.
    pub async fn bootstrap(&self) -> Result<(), AppError> {
        let mut conn = self.open().await?;
        let outcome = sqlx::migrate!("./migrations").run(&mut conn).await;
        self.release(conn).await;
        outcome?;
        debug!(path = %self.path.display(), "trip store ready");
        Ok(())
    }
}
