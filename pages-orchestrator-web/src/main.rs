//! Pages Orchestrator Web 后端
//!
//! 基于 Actix-web 的控制面板 API：登录、用户配置、子域名生成，以及带 CNAME
//! 联动的 Cloudflare Pages 自定义域名代理。

mod adapters;
mod config;
mod error;
mod handlers;
mod state;

use std::sync::Arc;

use actix_cors::Cors;
use actix_web::{App, HttpServer, middleware, web};
use pages_orchestrator_core::{CloudflareProviderFactory, ServiceContext};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use adapters::JsonFileConfigRepository;
use config::AppConfig;
use state::AppState;

/// 组装服务上下文
fn build_context(config: &AppConfig) -> anyhow::Result<ServiceContext> {
    let client = pages_orchestrator_provider::create_http_client()?;
    let factory = CloudflareProviderFactory::with_api_base(client, &config.cloudflare.api_base);
    let repository = JsonFileConfigRepository::new(&config.storage.config_path);
    tracing::info!("用户配置文件: {}", repository.path().display());

    Ok(
        ServiceContext::new(Arc::new(repository), Arc::new(factory))
            .with_pages_suffix(&config.cloudflare.pages_suffix),
    )
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // 初始化日志（同时接管 core/provider 的 log 输出）
    tracing_subscriber::registry()
        .with(tracing_subscriber::EnvFilter::new(
            std::env::var("RUST_LOG")
                .unwrap_or_else(|_| "info,pages_orchestrator_web=debug".into()),
        ))
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Pages Orchestrator Web 后端启动中...");

    let config = AppConfig::load()?;
    tracing::info!("配置加载完成: {:?}", config.cloudflare);

    let ctx = Arc::new(build_context(&config)?);
    let state = AppState::new(ctx, &config.auth.password);

    let bind_addr = config.bind_addr();
    let workers = config.workers();
    tracing::info!("服务器启动于 http://{} (workers: {})", bind_addr, workers);

    HttpServer::new(move || {
        let cors = Cors::default()
            .allow_any_origin()
            .allow_any_method()
            .allow_any_header()
            .max_age(3600);

        App::new()
            .app_data(web::Data::new(state.clone()))
            .wrap(cors)
            .wrap(middleware::Logger::default())
            .configure(handlers::configure_routes)
            .default_service(web::to(handlers::invalid_route))
    })
    .workers(workers)
    .bind(&bind_addr)?
    .run()
    .await?;

    Ok(())
}
