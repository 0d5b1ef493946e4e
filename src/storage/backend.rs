use async_trait::async_trait;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectOptions, Database, DatabaseConnection, EntityTrait,
    ExprTrait, QueryFilter, QueryOrder, QuerySelect, TransactionTrait,
    sea_query::Expr,
};
use tracing::{error, info, warn};

use crate::errors::{Result, TinylinkError};
use crate::storage::{Link, Repository};

use migration::{Migrator, MigratorTrait, entities::link};

#[derive(Clone)]
pub struct SeaOrmRepository {
    db: DatabaseConnection,
    backend_name: String,
}

impl SeaOrmRepository {
    pub async fn new(database_url: &str, backend_name: &str) -> Result<Self> {
        if database_url.is_empty() {
            return Err(TinylinkError::database_config("DATABASE_URL 未设置"));
        }

        // 根据不同数据库类型配置连接选项
        let db = if backend_name == "sqlite" {
            Self::connect_sqlite(database_url).await?
        } else {
            Self::connect_generic(database_url, backend_name).await?
        };

        let repository = SeaOrmRepository {
            db,
            backend_name: backend_name.to_string(),
        };

        // 运行迁移
        repository.run_migrations().await?;

        warn!(
            "{} Repository initialized.",
            repository.backend_name.to_uppercase()
        );
        Ok(repository)
    }

    /// 连接 SQLite 数据库（带自动创建和性能优化）
    async fn connect_sqlite(database_url: &str) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(database_url)
            .map_err(|e| TinylinkError::database_config(format!("SQLite URL 解析失败: {}", e)))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(std::time::Duration::from_secs(5));

        // SQLite 只有一个写者；单连接让并发的读-改-写事务排队，
        // 而不是在升级写锁时报 SQLITE_BUSY
        let pool = SqlitePoolOptions::new()
            .max_connections(1)
            .connect_with(opt)
            .await
            .map_err(|e| {
                TinylinkError::database_connection(format!("无法连接到 SQLite 数据库: {}", e))
            })?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 连接通用数据库（MySQL/PostgreSQL）
    async fn connect_generic(database_url: &str, backend_name: &str) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(database_url.to_owned());
        opt.max_connections(100)
            .min_connections(5)
            .connect_timeout(std::time::Duration::from_secs(8))
            .acquire_timeout(std::time::Duration::from_secs(8))
            .sqlx_logging(false);

        Database::connect(opt).await.map_err(|e| {
            TinylinkError::database_connection(format!(
                "无法连接到 {} 数据库: {}",
                backend_name.to_uppercase(),
                e
            ))
        })
    }

    async fn run_migrations(&self) -> Result<()> {
        Migrator::up(&self.db, None)
            .await
            .map_err(|e| TinylinkError::database_operation(format!("迁移失败: {}", e)))?;

        info!("Database migrations completed");
        Ok(())
    }

    fn model_to_link(model: link::Model) -> Link {
        Link {
            code: model.code,
            target_url: model.target_url,
            clicks: Ord::max(model.clicks, 0),
            last_clicked: model.last_clicked,
            created_at: model.created_at,
        }
    }

    /// 判断是否是唯一约束冲突错误
    fn is_unique_violation(err: &sea_orm::DbErr) -> bool {
        use sea_orm::RuntimeErr;
        use sea_orm::sqlx::Error;

        let sqlx_err = match err {
            sea_orm::DbErr::Exec(RuntimeErr::SqlxError(e))
            | sea_orm::DbErr::Query(RuntimeErr::SqlxError(e)) => e,
            _ => return false,
        };

        match &**sqlx_err {
            Error::Database(db_err) => {
                let code = db_err.code();
                // SQLite: SQLITE_CONSTRAINT_PRIMARYKEY (1555) / SQLITE_CONSTRAINT_UNIQUE (2067)
                // MySQL: ER_DUP_ENTRY (1062)
                // PostgreSQL: unique_violation (23505)
                code.as_ref()
                    .map(|c| c == "1555" || c == "2067" || c == "1062" || c == "23505")
                    .unwrap_or(false)
            }
            _ => false,
        }
    }
}

#[async_trait]
impl Repository for SeaOrmRepository {
    async fn insert(&self, code: &str, target_url: &str) -> Result<Link> {
        use sea_orm::ActiveValue::Set;

        let model = link::ActiveModel {
            code: Set(code.to_string()),
            target_url: Set(target_url.to_string()),
            clicks: Set(0),
            last_clicked: Set(None),
            created_at: Set(chrono::Utc::now()),
        };

        match model.insert(&self.db).await {
            Ok(inserted) => {
                info!("Short link created: {}", code);
                Ok(Self::model_to_link(inserted))
            }
            Err(e) if Self::is_unique_violation(&e) => Err(TinylinkError::duplicate(format!(
                "短码已存在: {}",
                code
            ))),
            Err(e) => Err(TinylinkError::database_operation(format!(
                "插入短链接失败: {}",
                e
            ))),
        }
    }

    async fn list(&self) -> Result<Vec<Link>> {
        let models = link::Entity::find()
            .order_by_desc(link::Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| {
                TinylinkError::database_operation(format!("加载所有短链接失败: {}", e))
            })?;

        Ok(models.into_iter().map(Self::model_to_link).collect())
    }

    async fn get(&self, code: &str) -> Result<Link> {
        let model = link::Entity::find_by_id(code)
            .one(&self.db)
            .await
            .map_err(|e| TinylinkError::database_operation(format!("查询短链接失败: {}", e)))?;

        match model {
            Some(model) => Ok(Self::model_to_link(model)),
            None => Err(TinylinkError::not_found(format!("短链接不存在: {}", code))),
        }
    }

    async fn remove(&self, code: &str) -> Result<()> {
        let result = link::Entity::delete_by_id(code)
            .exec(&self.db)
            .await
            .map_err(|e| TinylinkError::database_operation(format!("删除短链接失败: {}", e)))?;

        if result.rows_affected == 0 {
            return Err(TinylinkError::not_found(format!("短链接不存在: {}", code)));
        }

        info!("Short link deleted: {}", code);
        Ok(())
    }

    async fn redirect_and_track(&self, code: &str) -> Result<String> {
        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TinylinkError::database_operation(format!("开始事务失败: {}", e)))?;

        // SELECT ... FOR UPDATE：同一短码的并发跳转在这里排队。
        // SQLite 不支持锁子句，由事务写锁串行化。
        let model = match link::Entity::find_by_id(code)
            .lock_exclusive()
            .one(&txn)
            .await
        {
            Ok(model) => model,
            Err(e) => {
                txn.rollback().await.ok();
                return Err(TinylinkError::database_operation(format!(
                    "查询短链接失败: {}",
                    e
                )));
            }
        };

        let Some(model) = model else {
            txn.rollback().await.ok();
            return Err(TinylinkError::not_found(format!("短链接不存在: {}", code)));
        };

        let update_result = link::Entity::update_many()
            .col_expr(
                link::Column::Clicks,
                Expr::col(link::Column::Clicks).add(1),
            )
            .col_expr(
                link::Column::LastClicked,
                Expr::value(Some(chrono::Utc::now())),
            )
            .filter(link::Column::Code.eq(code))
            .exec(&txn)
            .await;

        if let Err(e) = update_result {
            txn.rollback().await.ok();
            error!("点击计数更新失败 {}: {}", code, e);
            return Err(TinylinkError::database_operation(format!(
                "点击计数更新失败: {}",
                e
            )));
        }

        txn.commit()
            .await
            .map_err(|e| TinylinkError::database_operation(format!("提交事务失败: {}", e)))?;

        Ok(model.target_url)
    }

    fn backend_name(&self) -> &str {
        &self.backend_name
    }
}
