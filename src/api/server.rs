//! # HTTP 服务器
//!
//! 组装 axum 路由、中间件和静态文件服务，并负责优雅关闭。

use axum::Router;
use axum::body::Body;
use axum::http::{HeaderValue, Request, header};
use axum::middleware::{from_fn, from_fn_with_state};
use std::net::SocketAddr;
use std::ops::Deref;
use std::sync::Arc;
use tokio::net::TcpListener;
use tower::ServiceBuilder;
use tower_http::services::ServeDir;
use tower_http::set_header::SetResponseHeaderLayer;
use tower_http::trace::TraceLayer;

use super::middleware::{RequestId, count_file_server_hits, request_id_middleware};
use crate::app::AppContext;
use crate::error::{ChirpyError, Result};
use crate::logging::{LogComponent, LogStage};
use crate::{linfo, lwarn};

/// 应用状态
#[derive(Clone)]
pub struct AppState {
    context: Arc<AppContext>,
}

impl AppState {
    #[must_use]
    pub const fn new(context: Arc<AppContext>) -> Self {
        Self { context }
    }
}

impl Deref for AppState {
    type Target = AppContext;

    fn deref(&self) -> &Self::Target {
        &self.context
    }
}

/// 构建完整的路由器
pub fn create_router(context: Arc<AppContext>) -> Router {
    let state = AppState::new(context);
    let static_dir = state.config.server.static_dir.clone();

    if !std::path::Path::new(&static_dir).exists() {
        lwarn!(
            "system",
            LogStage::Startup,
            LogComponent::ServerSetup,
            "static_dir_not_found",
            &format!("Static directory {static_dir} not found, /app will return 404")
        );
    }

    let file_server = ServiceBuilder::new()
        .layer(from_fn_with_state(state.clone(), count_file_server_hits))
        .layer(SetResponseHeaderLayer::overriding(
            header::CACHE_CONTROL,
            HeaderValue::from_static("no-cache"),
        ))
        .service(ServeDir::new(static_dir));

    let trace_layer = TraceLayer::new_for_http().make_span_with(|request: &Request<Body>| {
        let request_id = request
            .extensions()
            .get::<RequestId>()
            .map_or("-", RequestId::as_str);
        tracing::info_span!(
            "http_request",
            request_id = %request_id,
            method = %request.method(),
            uri = %request.uri(),
        )
    });

    Router::new()
        .nest("/api", super::routes::api_routes())
        .nest("/admin", super::routes::admin_routes())
        .nest_service("/app", file_server)
        .with_state(state)
        .layer(trace_layer)
        .layer(from_fn(request_id_middleware))
}

/// 启动服务器，直到收到 Ctrl-C
pub async fn serve(context: Arc<AppContext>) -> Result<()> {
    let listen = context.config.server.listen_addr();
    let addr: SocketAddr = listen.parse().map_err(|e| {
        ChirpyError::config_with_source(format!("Invalid listen address '{listen}'"), e)
    })?;

    let router = create_router(context);
    let listener = TcpListener::bind(addr).await?;

    linfo!(
        "system",
        LogStage::Startup,
        LogComponent::ServerSetup,
        "server_start",
        &format!("Serving on http://{addr}")
    );

    axum::serve(listener, router)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    linfo!(
        "system",
        LogStage::Shutdown,
        LogComponent::ServerSetup,
        "server_stopped",
        "服务器已停止"
    );
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        lwarn!(
            "system",
            LogStage::Shutdown,
            LogComponent::ServerSetup,
            "signal_handler_failed",
            &format!("无法监听 Ctrl-C: {e}")
        );
        return;
    }
    linfo!(
        "system",
        LogStage::Shutdown,
        LogComponent::ServerSetup,
        "shutdown_signal",
        "收到关闭信号，开始优雅关闭"
    );
}
