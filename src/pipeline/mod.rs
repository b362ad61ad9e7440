// Request pipeline module - request context and the fetch/transform/encode orchestration

use http::{header, Response, StatusCode};
use std::collections::HashMap;
use std::sync::Arc;
use tracing::Instrument;
use uuid::Uuid;

use crate::constants::FORWARDED_HEADER_PREFIX;
use crate::context::ServiceContext;
use crate::error::GatewayError;
use crate::image::{decode_image, EncodedImage, EncoderFactory};
use crate::stats::Counter;
use crate::watermark::WatermarkOutcome;

pub mod query;

pub use query::TransformRequest;

/// Request context that holds all information about an HTTP request
/// as it flows through the pipeline
#[derive(Debug, Clone)]
pub struct RequestContext {
    request_id: String,
    method: String,
    path: String,
    query_params: HashMap<String, String>,
}

impl RequestContext {
    /// Create a new RequestContext from HTTP request information
    /// Automatically generates a unique request ID (UUID v4)
    pub fn new(method: String, path: String) -> Self {
        Self::with_query_params(method, path, HashMap::new())
    }

    pub fn with_query_params(
        method: String,
        path: String,
        query_params: HashMap<String, String>,
    ) -> Self {
        Self {
            request_id: Uuid::new_v4().to_string(),
            method,
            path,
            query_params,
        }
    }

    /// Get the unique request ID
    pub fn request_id(&self) -> &str {
        &self.request_id
    }

    /// Get the HTTP method
    pub fn method(&self) -> &str {
        &self.method
    }

    /// Get the request path
    pub fn path(&self) -> &str {
        &self.path
    }

    /// Get the query parameters
    pub fn query_params(&self) -> &HashMap<String, String> {
        &self.query_params
    }
}

/// Span wrapping everything logged for one request, exported to OTLP when enabled.
pub fn request_span(req: &RequestContext) -> tracing::Span {
    tracing::info_span!(
        "request",
        request_id = %req.request_id(),
        http.method = %req.method(),
        http.target = %req.path(),
        otel.kind = "server",
    )
}

/// Run one request through fetch, decode, resize, watermark and encode.
///
/// Increments `nb_requests` on entry and exactly one of `nb_success` or
/// `nb_failures` on exit. Never returns an error: every failure becomes a
/// response.
pub async fn process_request(ctx: Arc<ServiceContext>, req: RequestContext) -> Response<Vec<u8>> {
    let span = request_span(&req);
    handle_request(ctx, req).instrument(span).await
}

async fn handle_request(ctx: Arc<ServiceContext>, req: RequestContext) -> Response<Vec<u8>> {
    ctx.stats.increment(Counter::Requests);

    let mut forwarded = Vec::new();
    match run(&ctx, &req, &mut forwarded).await {
        Ok(encoded) => {
            ctx.stats.increment(Counter::Success);
            tracing::debug!(
                request_id = %req.request_id(),
                path = %req.path(),
                format = encoded.format.as_str(),
                bytes = encoded.len(),
                "Image served"
            );
            image_response(encoded, &forwarded)
        }
        Err(err) => {
            ctx.stats.increment(Counter::Failures);
            tracing::error!(
                request_id = %req.request_id(),
                path = %req.path(),
                error = %err,
                response_code = err.to_http_status(),
                "{}",
                failure_message(&err)
            );
            error_response(&err, &forwarded)
        }
    }
}

async fn run(
    ctx: &Arc<ServiceContext>,
    req: &RequestContext,
    forwarded: &mut Vec<(String, String)>,
) -> Result<EncodedImage, GatewayError> {
    let transform = TransformRequest::parse(req.path(), req.query_params());

    let response = ctx.origin.fetch(&transform.source_path).await?;
    if !response.is_ok() {
        return Err(GatewayError::UpstreamStatus {
            status: response.status,
            reason: response.reason,
        });
    }

    forwarded.extend(
        response
            .headers_with_prefix(FORWARDED_HEADER_PREFIX)
            .cloned(),
    );

    // Codec work is CPU-bound and must not stall the async workers
    let ctx = Arc::clone(ctx);
    let body = response.body;
    let span = tracing::Span::current();
    let task = move || span.in_scope(|| transform_image(&ctx, &transform, &body));
    match tokio::task::spawn_blocking(task).await {
        Ok(result) => result,
        Err(e) if e.is_panic() => std::panic::resume_unwind(e.into_panic()),
        Err(e) => Err(GatewayError::Internal(e.to_string())),
    }
}

/// Decode `body`, apply the requested resize and watermark, then encode.
pub fn transform_image(
    ctx: &ServiceContext,
    request: &TransformRequest,
    body: &[u8],
) -> Result<EncodedImage, GatewayError> {
    let mut image = decode_image(body)?;

    if let Some(target) = request.resize_target() {
        image = ctx.resizer.resize(image, target, request.bestfit)?;
    }

    if request.apply_watermark {
        match &ctx.watermarker {
            Some(watermarker) => {
                let (marked, outcome) = watermarker.apply(image, &mut rand::thread_rng());
                if let WatermarkOutcome::Applied { filename, rect, .. } = &outcome {
                    tracing::debug!(
                        filename = %filename,
                        x = rect.x,
                        y = rect.y,
                        "Watermark applied"
                    );
                }
                image = marked;
            }
            None => {
                tracing::warn!(path = %request.source_path, "Watermark requested but not configured");
            }
        }
    }

    let encoder = EncoderFactory::create(request.format, ctx.jpeg_quality());
    Ok(encoder.encode_image(image)?)
}

fn failure_message(err: &GatewayError) -> &'static str {
    match err {
        GatewayError::UpstreamTimeout { .. } => "Error while requesting remote file",
        GatewayError::UpstreamStatus { .. } => "Wrong status received",
        GatewayError::Decode { .. } => "Error while reading image from response",
        GatewayError::Resize { .. } => "Error resizing image",
        GatewayError::Encode { .. } => "Error encoding image",
        _ => "Error processing request",
    }
}

fn image_response(encoded: EncodedImage, forwarded: &[(String, String)]) -> Response<Vec<u8>> {
    let mut builder = Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, encoded.content_type)
        .header(header::CONTENT_LENGTH, encoded.len());

    for (name, value) in forwarded {
        builder = builder.header(name.as_str(), value.as_str());
    }

    builder.body(encoded.data).unwrap_or_else(|e| {
        tracing::error!(error = %e, "Failed to build image response");
        plain_response(500, "500 Internal Server Error")
    })
}

/// Plain-text error response carrying the forwarded origin headers.
pub fn error_response(err: &GatewayError, forwarded: &[(String, String)]) -> Response<Vec<u8>> {
    let mut response = plain_response(err.to_http_status(), &err.response_body());
    let headers = response.headers_mut();
    for (name, value) in forwarded {
        if let (Ok(name), Ok(value)) = (
            header::HeaderName::from_bytes(name.as_bytes()),
            header::HeaderValue::from_str(value),
        ) {
            headers.append(name, value);
        }
    }
    response
}

/// `text/plain` response with a trailing newline after `body`.
pub fn plain_response(status: u16, body: &str) -> Response<Vec<u8>> {
    let body = format!("{}\n", body).into_bytes();
    let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);

    let mut response = Response::new(body);
    *response.status_mut() = status;

    let headers = response.headers_mut();
    headers.insert(
        header::CONTENT_TYPE,
        header::HeaderValue::from_static("text/plain; charset=utf-8"),
    );
    headers.insert(
        header::X_CONTENT_TYPE_OPTIONS,
        header::HeaderValue::from_static("nosniff"),
    );
    let length = response.body().len();
    response
        .headers_mut()
        .insert(header::CONTENT_LENGTH, header::HeaderValue::from(length));
    response
}
