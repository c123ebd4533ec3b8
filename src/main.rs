//! Product API - 商品管理 REST 服务
//!
//! 启动流程：加载配置、连接数据库、运行迁移、启动 HTTP 服务。
//! `--clear` 只清空数据库后退出。

use std::path::{Path, PathBuf};
use std::sync::Arc;

use clap::Parser;

use product_api::config::{load_config_from_path, print_config, AppConfig};
use product_api::infrastructure::http::{AppState, CorsPolicy, HttpServer, ServerConfig};
use product_api::infrastructure::persistence::sqlite::{
    connect_database, reset_database, run_migrations, DatabaseConfig, SqliteProductRepository,
};

#[derive(Debug, Parser)]
#[command(name = "product-api", version, about = "Products REST API")]
struct Cli {
    /// 配置文件路径
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// 清空数据库后退出
    #[arg(long)]
    clear: bool,
}

fn init_tracing(config: &AppConfig) {
    let log_filter = format!(
        "{},product_api={},tower_http=debug",
        config.log.level, config.log.level
    );
    let filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(&log_filter));

    if config.log.json {
        tracing_subscriber::fmt()
            .json()
            .with_env_filter(filter)
            .init();
    } else {
        tracing_subscriber::fmt().with_env_filter(filter).init();
    }
}

async fn shutdown_signal() {
    match tokio::signal::ctrl_c().await {
        Ok(()) => tracing::info!("Received shutdown signal"),
        Err(e) => tracing::error!(error = %e, "Failed to listen for ctrl-c"),
    }
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();

    // .env 不存在时忽略
    dotenvy::dotenv().ok();

    // 加载配置（优先级：兼容变量 > 环境变量 > 配置文件 > 默认值）
    let config = load_config_from_path(cli.config.as_deref())
        .map_err(|e| anyhow::anyhow!("Failed to load config: {}", e))?;

    init_tracing(&config);
    print_config(&config);

    // 确保数据目录存在
    if let Some(parent) = config.database.file_path().and_then(|p| Path::new(p).parent()) {
        if !parent.as_os_str().is_empty() {
            tokio::fs::create_dir_all(parent).await?;
        }
    }

    let db_config = DatabaseConfig {
        database_url: config.database.url.clone(),
        max_connections: config.database.max_connections,
    };
    let pool = connect_database(&db_config).await?;
    run_migrations(&pool).await?;

    if cli.clear {
        if let Err(e) = reset_database(&pool).await {
            tracing::error!(error = %e, "Failed to clear database");
            return Err(e.into());
        }
        return Ok(());
    }

    let product_repo = Arc::new(SqliteProductRepository::new(pool));
    let state = AppState::new(product_repo);
    let cors = CorsPolicy::new(config.cors.front_end_url.as_deref());
    let server_config = ServerConfig::new(&config.server.host, config.server.port);

    tracing::info!(
        docs = %format!("{}/docs", config.server.public_base_url()),
        "REST API ready"
    );

    HttpServer::new(server_config, state, cors)
        .run_with_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Server shutdown complete");

    Ok(())
}
