//! SQLite Database - 数据库连接和迁移

use sqlx::{sqlite::SqlitePoolOptions, Pool, Sqlite};

/// 数据库配置
#[derive(Debug, Clone)]
pub struct DatabaseConfig {
    /// 数据库连接串
    pub database_url: String,
    /// 最大连接数
    pub max_connections: u32,
}

impl DatabaseConfig {
    /// 测试用内存数据库，单连接保证所有查询看到同一个库
    pub fn in_memory() -> Self {
        Self {
            database_url: "sqlite::memory:".to_string(),
            max_connections: 1,
        }
    }
}

/// 数据库连接池
pub type DbPool = Pool<Sqlite>;

/// 创建数据库连接池
pub async fn create_pool(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    let pool = SqlitePoolOptions::new()
        .max_connections(config.max_connections)
        .connect(&config.database_url)
        .await?;

    // 启用 WAL 模式，允许并发读写
    sqlx::query("PRAGMA journal_mode=WAL")
        .execute(&pool)
        .await?;

    // 设置 busy_timeout=5000ms，遇到锁时等待而不是立即失败
    sqlx::query("PRAGMA busy_timeout=5000")
        .execute(&pool)
        .await?;

    tracing::info!("SQLite pool created with WAL mode and busy_timeout=5000ms");

    Ok(pool)
}

/// 连接数据库并记录结果
///
/// 连接失败时记录错误日志并返回错误，由调用方决定是否退出
pub async fn connect_database(config: &DatabaseConfig) -> Result<DbPool, sqlx::Error> {
    match create_pool(config).await {
        Ok(pool) => {
            tracing::info!("Database connection established");
            Ok(pool)
        }
        Err(e) => {
            tracing::error!(error = %e, "Error connecting to database");
            Err(e)
        }
    }
}

/// 运行数据库迁移
pub async fn run_migrations(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query(
        r#"
        CREATE TABLE IF NOT EXISTS products (
            id INTEGER PRIMARY KEY AUTOINCREMENT,
            name TEXT NOT NULL CHECK (length(name) > 0),
            price REAL NOT NULL CHECK (price > 0),
            availability INTEGER NOT NULL DEFAULT 1,
            created_at TEXT NOT NULL,
            updated_at TEXT NOT NULL
        )
        "#,
    )
    .execute(pool)
    .await?;

    tracing::info!("Database migrations completed");
    Ok(())
}

/// 清空数据库：删除并重建所有表
pub async fn reset_database(pool: &DbPool) -> Result<(), sqlx::Error> {
    sqlx::query("DROP TABLE IF EXISTS products")
        .execute(pool)
        .await?;

    run_migrations(pool).await?;

    tracing::info!("Database cleared");
    Ok(())
}
