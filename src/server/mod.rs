// Server module - Pingora server setup: HTTP listener plus the stats ticker

use pingora_core::apps::http_app::HttpServer;
use pingora_core::server::configuration::Opt;
use pingora_core::server::Server;
use pingora_core::services::background::{background_service, GenBackgroundService};
use pingora_core::services::listening::Service;
use std::sync::Arc;

use crate::context::ServiceContext;
use crate::error::GatewayError;
use crate::proxy::GatewayApp;
use crate::stats::ticker::StatsTicker;

/// Command-line switches forwarded to pingora
#[derive(Debug, Clone, Copy, Default)]
pub struct ServerOptions {
    pub daemon: bool,
    pub test: bool,
    pub upgrade: bool,
}

impl From<ServerOptions> for Opt {
    fn from(options: ServerOptions) -> Self {
        Opt {
            daemon: options.daemon,
            test: options.test,
            upgrade: options.upgrade,
            ..Default::default()
        }
    }
}

/// HTTP listening service bound to `server.address:server.port`.
pub fn http_service(ctx: Arc<ServiceContext>) -> Service<HttpServer<GatewayApp>> {
    let listen_addr = ctx.config.server.listen_addr();
    let threads = ctx.config.server.threads;

    let mut service = Service::new(
        "imgate http".to_string(),
        HttpServer::new_app(GatewayApp::new(ctx)),
    );
    service.add_tcp(&listen_addr);
    service.threads = Some(threads);
    service
}

/// Background service that advances the stats windows every second.
pub fn stats_service(ctx: &ServiceContext) -> GenBackgroundService<StatsTicker> {
    background_service("stats ticker", StatsTicker::new(Arc::clone(&ctx.stats)))
}

/// Bootstrapped pingora server with both services registered.
pub fn build(options: ServerOptions, ctx: Arc<ServiceContext>) -> Result<Server, GatewayError> {
    let mut server = Server::new(Some(options.into()))
        .map_err(|e| GatewayError::Internal(format!("Failed to create server: {}", e)))?;
    server.bootstrap();

    let listen_addr = ctx.config.server.listen_addr();
    server.add_service(stats_service(&ctx));
    server.add_service(http_service(Arc::clone(&ctx)));

    tracing::info!(
        address = %listen_addr,
        threads = ctx.config.server.threads,
        "Starting imgate"
    );

    Ok(server)
}
