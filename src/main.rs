//! # Chirpy 主程序
//!
//! 加载配置、初始化数据库并启动 HTTP 服务

use std::sync::Arc;

use chirpy::{
    Result,
    api,
    app::AppContext,
    config::ConfigManager,
    database, lerror, linfo,
    logging::{self, LogComponent, LogStage},
};
use clap::Parser;

#[derive(Parser)]
#[command(name = "chirpy")]
#[command(about = "Chirpy social posting backend")]
struct Cli {
    /// 配置文件路径，默认读取 CHIRPY_CONFIG_PATH 或 config/config.{RUST_ENV}.toml
    #[arg(short, long)]
    config: Option<String>,

    /// 监听端口，覆盖配置文件和 PORT 环境变量
    #[arg(short, long)]
    port: Option<u16>,
}

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli).await {
        lerror!(
            "system",
            LogStage::Startup,
            LogComponent::Main,
            "service_start_failed",
            &format!("服务启动失败: {e:?}")
        );
        eprintln!("chirpy: {e}");
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    let manager = match cli.config.as_deref() {
        Some(path) => ConfigManager::load(path, &|key: &str| std::env::var(key).ok())?,
        None => ConfigManager::new()?,
    };

    logging::init_logging(manager.config().log_level.as_deref());
    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Main,
        "config_source",
        &format!(
            "配置来源: {}",
            manager
                .source()
                .map_or_else(|| "默认值".to_string(), |p| p.display().to_string())
        )
    );

    let mut config = manager.into_config();
    if let Some(port) = cli.port {
        config.server.port = port;
    }

    let db = database::init_database(&config.database).await?;
    database::run_migrations(&db).await?;

    let context = Arc::new(AppContext::new(Arc::new(config), Arc::new(db)));

    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::Main,
        "service_starting",
        &format!("服务启动, platform={}", context.config.auth.platform)
    );
    api::serve(context).await?;

    linfo!(
        "system",
        LogStage::Shutdown,
        LogComponent::Main,
        "service_shutdown",
        "服务正常关闭"
    );
    Ok(())
}
