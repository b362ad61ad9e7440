// Proxy module - Pingora ServeHttp implementation
// Routes requests to the special endpoints or the image pipeline

use async_trait::async_trait;
use http::{HeaderMap, Method, Response, Uri};
use pingora_core::apps::http_app::ServeHttp;
use pingora_core::protocols::http::ServerSession;
use std::sync::Arc;
use std::time::Instant;

use crate::constants::{STATUS_PATH, VERSION_PATH};
use crate::context::ServiceContext;
use crate::logging::panic_message;
use crate::pipeline::{plain_response, process_request, RequestContext};
use crate::stats::Counter;

pub mod helpers;
pub mod logging;
pub mod special_endpoints;

use helpers::{client_ip, extract_query_params};
use logging::AccessLogRecord;
use special_endpoints::{handle_status, handle_version};

/// GatewayApp implements the Pingora ServeHttp trait
/// Handles routing, the per-request task boundary and access logging
pub struct GatewayApp {
    ctx: Arc<ServiceContext>,
}

impl GatewayApp {
    pub fn new(ctx: Arc<ServiceContext>) -> Self {
        Self { ctx }
    }

    pub fn context(&self) -> &Arc<ServiceContext> {
        &self.ctx
    }

    /// Route one request and produce its response.
    ///
    /// Session-free so it can be driven directly in tests.
    pub async fn handle(
        &self,
        method: &Method,
        uri: &Uri,
        headers: &HeaderMap,
        peer: Option<&str>,
    ) -> Response<Vec<u8>> {
        let start = Instant::now();

        let mut response = match *method {
            Method::GET | Method::HEAD => self.route(method, uri).await,
            _ => {
                tracing::debug!(method = %method, path = %uri.path(), "Method not allowed");
                let mut response = plain_response(405, "405 Method Not Allowed");
                response
                    .headers_mut()
                    .insert(http::header::ALLOW, http::HeaderValue::from_static("GET, HEAD"));
                response
            }
        };

        if *method == Method::HEAD {
            response.body_mut().clear();
        }

        if self.ctx.config.server.access_log {
            AccessLogRecord {
                remote_addr: client_ip(headers, peer),
                method: method.to_string(),
                request_url: uri.to_string(),
                status: response.status().as_u16(),
                response_time: start.elapsed(),
            }
            .emit();
        }

        response
    }

    async fn route(&self, method: &Method, uri: &Uri) -> Response<Vec<u8>> {
        match uri.path() {
            STATUS_PATH => handle_status(&self.ctx.stats).into_response(),
            VERSION_PATH => handle_version().into_response(),
            path => {
                let req = RequestContext::with_query_params(
                    method.to_string(),
                    path.to_string(),
                    extract_query_params(uri),
                );
                self.run_pipeline(req).await
            }
        }
    }

    /// Run the pipeline in its own task. A panic inside it becomes a 500 for
    /// this request only.
    async fn run_pipeline(&self, req: RequestContext) -> Response<Vec<u8>> {
        let request_id = req.request_id().to_string();
        let path = req.path().to_string();

        match tokio::spawn(process_request(Arc::clone(&self.ctx), req)).await {
            Ok(response) => response,
            Err(e) => {
                let error = if e.is_panic() {
                    panic_message(e.into_panic().as_ref())
                } else {
                    e.to_string()
                };
                tracing::error!(
                    request_id = %request_id,
                    path = %path,
                    error = %error,
                    response_code = 500,
                    "An error occurred while handling request."
                );
                self.ctx.stats.increment(Counter::Failures);
                plain_response(500, "500 Internal Server Error")
            }
        }
    }
}

#[async_trait]
impl ServeHttp for GatewayApp {
    async fn response(&self, session: &mut ServerSession) -> Response<Vec<u8>> {
        let req = session.req_header();
        let method = req.method.clone();
        let uri = req.uri.clone();
        let headers = req.headers.clone();
        let peer = session.client_addr().map(|addr| addr.to_string());

        self.handle(&method, &uri, &headers, peer.as_deref()).await
    }
}
