use std::sync::Arc;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use tracing::error;

use crate::errors::{Result, TinylinkError};

pub mod backend;

/// One stored short link.
///
/// `code` and `target_url` are immutable after creation; only the redirect
/// path mutates `clicks` and `last_clicked`.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq, Eq)]
pub struct Link {
    pub code: String,
    pub target_url: String,
    pub clicks: i64,
    pub last_clicked: Option<DateTime<Utc>>,
    pub created_at: DateTime<Utc>,
}

#[async_trait::async_trait]
pub trait Repository: Send + Sync {
    /// Insert a new link. Fails with `Duplicate` if the code already exists.
    async fn insert(&self, code: &str, target_url: &str) -> Result<Link>;

    /// All links, most recently created first.
    async fn list(&self) -> Result<Vec<Link>>;

    async fn get(&self, code: &str) -> Result<Link>;

    async fn remove(&self, code: &str) -> Result<()>;

    /// Atomically record a click and return the target URL.
    ///
    /// The row is locked for the duration of the read-modify-write, so
    /// concurrent redirects on the same code serialize; on any failure the
    /// transaction rolls back and `clicks`/`last_clicked` stay untouched.
    async fn redirect_and_track(&self, code: &str) -> Result<String>;

    fn backend_name(&self) -> &str;
}

pub struct RepositoryFactory;

impl RepositoryFactory {
    pub async fn create() -> Result<Arc<dyn Repository>> {
        let config = crate::config::get_config();
        let backend = &config.database.backend;
        let database_url = &config.database.database_url;

        match backend.as_str() {
            "sqlite" | "mysql" | "postgres" | "mariadb" => {
                let repository =
                    backend::SeaOrmRepository::new(database_url, backend).await?;
                Ok(Arc::new(repository) as Arc<dyn Repository>)
            }
            _ => {
                error!("Unknown repository backend: {}", backend);
                Err(TinylinkError::database_config(format!(
                    "Unknown repository backend: {}. Supported: sqlite, mysql, postgres, mariadb",
                    backend
                )))
            }
        }
    }
}
