// Request pipeline unit tests
// Drive transform_image and process_request with an in-memory origin

use async_trait::async_trait;
use bytes::Bytes;
use image::{DynamicImage, ImageFormat, Rgba, RgbaImage};
use imgate::config::{Config, WatermarkConfig};
use imgate::context::ServiceContext;
use imgate::error::GatewayError;
use imgate::image::{Color, OutputFormat, Size};
use imgate::pipeline::{process_request, transform_image, RequestContext, TransformRequest};
use imgate::stats::Counter;
use imgate::upstream::{Origin, OriginResponse};
use imgate::watermark::{WatermarkAssets, Watermarker};
use std::collections::HashMap;
use std::io::Cursor;
use std::path::PathBuf;
use std::sync::Arc;

/// Origin that always answers with the same result
struct StaticOrigin {
    result: Result<OriginResponse, GatewayError>,
}

#[async_trait]
impl Origin for StaticOrigin {
    async fn fetch(&self, _path: &str) -> Result<OriginResponse, GatewayError> {
        self.result.clone()
    }
}

fn config() -> Config {
    Config::from_yaml_with_env(
        "server:\n  address: 127.0.0.1\n  port: 0\nproxy:\n  url: http://origin.local\n",
    )
    .unwrap()
}

fn encode(img: RgbaImage, format: ImageFormat) -> Vec<u8> {
    let mut buffer = Cursor::new(Vec::new());
    DynamicImage::ImageRgba8(img)
        .write_to(&mut buffer, format)
        .unwrap();
    buffer.into_inner()
}

fn solid_png(width: u32, height: u32, color: [u8; 4]) -> Vec<u8> {
    encode(
        RgbaImage::from_pixel(width, height, Rgba(color)),
        ImageFormat::Png,
    )
}

fn watermarker() -> Watermarker {
    let config = WatermarkConfig {
        path: PathBuf::from("/unused"),
        file_white_big: "wb.png".into(),
        file_white_small: "ws.png".into(),
        file_black_big: "bb.png".into(),
        file_black_small: "bs.png".into(),
        margin: 4,
        size_threshold: Size::new(100, 100),
        color_threshold: Color::new(200, 200, 200),
    };
    let mut images = HashMap::new();
    images.insert("wb.png".to_string(), RgbaImage::from_pixel(20, 10, Rgba([255, 255, 255, 255])));
    images.insert("ws.png".to_string(), RgbaImage::from_pixel(8, 4, Rgba([255, 255, 255, 255])));
    images.insert("bb.png".to_string(), RgbaImage::from_pixel(20, 10, Rgba([0, 0, 0, 255])));
    images.insert("bs.png".to_string(), RgbaImage::from_pixel(8, 4, Rgba([0, 0, 0, 255])));
    Watermarker::new(WatermarkAssets::from_images(config, images).unwrap())
}

fn context(origin: StaticOrigin, watermarker: Option<Watermarker>) -> Arc<ServiceContext> {
    Arc::new(ServiceContext::new(config(), Arc::new(origin), watermarker))
}

fn request(path: &str, query: &[(&str, &str)]) -> TransformRequest {
    let query = query
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    TransformRequest::parse(path, &query)
}

fn unreachable_origin() -> StaticOrigin {
    StaticOrigin {
        result: Err(GatewayError::upstream_timeout("unused")),
    }
}

#[test]
fn test_contain_pads_with_background() {
    let ctx = context(unreachable_origin(), None);
    let body = solid_png(200, 100, [0, 0, 255, 255]);

    let encoded = transform_image(&ctx, &request("/a.png", &[("size", "100x100")]), &body).unwrap();
    let out = image::load_from_memory(&encoded.data).unwrap().into_rgba8();

    assert_eq!(out.dimensions(), (100, 100));
    assert_eq!(out.get_pixel(50, 0), &Rgba([255, 255, 255, 255]));
    assert_eq!(out.get_pixel(50, 50), &Rgba([0, 0, 255, 255]));
    assert_eq!(out.get_pixel(50, 99), &Rgba([255, 255, 255, 255]));
}

#[test]
fn test_bestfit_fills_target() {
    let ctx = context(unreachable_origin(), None);
    let body = solid_png(300, 100, [10, 200, 10, 255]);

    let encoded = transform_image(
        &ctx,
        &request("/a.png", &[("size", "50x50"), ("bestfit", "1")]),
        &body,
    )
    .unwrap();
    let out = image::load_from_memory(&encoded.data).unwrap();

    assert_eq!((out.width(), out.height()), (50, 50));
}

#[test]
fn test_no_size_keeps_dimensions_and_reencodes() {
    let ctx = context(unreachable_origin(), None);
    let body = solid_png(37, 21, [1, 2, 3, 255]);

    let encoded = transform_image(&ctx, &request("/photo", &[]), &body).unwrap();

    assert_eq!(encoded.content_type, "image/jpeg");
    assert_eq!(&encoded.data[..2], &[0xFF, 0xD8]);
    let out = image::load_from_memory(&encoded.data).unwrap();
    assert_eq!((out.width(), out.height()), (37, 21));
}

#[test]
fn test_output_format_follows_extension() {
    let ctx = context(unreachable_origin(), None);
    let body = solid_png(16, 16, [1, 2, 3, 255]);

    for (path, content_type) in [
        ("/a.gif", "image/gif"),
        ("/a.png", "image/png"),
        ("/a.webp", "image/webp"),
        ("/a.jpeg", "image/jpeg"),
    ] {
        let encoded = transform_image(&ctx, &request(path, &[]), &body).unwrap();
        assert_eq!(encoded.content_type, content_type, "{}", path);
    }
}

#[test]
fn test_undecodable_body_is_decode_error() {
    let ctx = context(unreachable_origin(), None);
    let err = transform_image(&ctx, &request("/a.png", &[]), b"not an image").unwrap_err();
    assert_eq!(err.to_http_status(), 502);
}

#[test]
fn test_black_mark_on_white_image() {
    let ctx = context(unreachable_origin(), Some(watermarker()));
    let body = solid_png(200, 200, [255, 255, 255, 255]);

    let encoded = transform_image(&ctx, &request("/a.png", &[("watermark", "1")]), &body).unwrap();
    let out = image::load_from_memory(&encoded.data).unwrap().into_rgba8();

    // Every corner placement of a 20x10 mark with margin 4 covers one of these
    let corners = [(176, 186), (4, 186), (176, 4), (4, 4)];
    let black = corners
        .iter()
        .filter(|(x, y)| out.get_pixel(*x + 1, *y + 1) == &Rgba([0, 0, 0, 255]))
        .count();
    assert_eq!(black, 1);
}

#[tokio::test]
async fn test_process_request_counts_success() {
    let body = Bytes::from(solid_png(10, 10, [9, 9, 9, 255]));
    let ctx = context(
        StaticOrigin {
            result: Ok(OriginResponse {
                status: 200,
                reason: "200 OK".into(),
                headers: vec![],
                body,
            }),
        },
        None,
    );

    let req = RequestContext::new("GET".into(), "/a.png".into());
    let response = process_request(Arc::clone(&ctx), req).await;

    assert_eq!(response.status(), 200);
    assert_eq!(ctx.stats.get(Counter::Requests), 1);
    assert_eq!(ctx.stats.get(Counter::Success), 1);
    assert_eq!(ctx.stats.get(Counter::Failures), 0);
}

#[tokio::test]
async fn test_process_request_counts_failure() {
    let ctx = context(unreachable_origin(), None);

    let req = RequestContext::new("GET".into(), "/a.png".into());
    let response = process_request(Arc::clone(&ctx), req).await;

    assert_eq!(response.status(), 504);
    assert_eq!(response.body(), b"504 Gateway Timeout\n");
    assert_eq!(ctx.stats.get(Counter::Requests), 1);
    assert_eq!(ctx.stats.get(Counter::Failures), 1);
}

#[test]
fn test_zero_target_is_a_resize_failure() {
    let ctx = context(unreachable_origin(), None);
    let body = solid_png(10, 10, [1, 2, 3, 255]);
    let request = TransformRequest {
        target_width: Some(0),
        target_height: Some(10),
        bestfit: false,
        apply_watermark: false,
        source_path: "/a.png".into(),
        format: OutputFormat::Png,
    };

    let err = transform_image(&ctx, &request, &body).unwrap_err();

    assert!(matches!(err, GatewayError::Resize { .. }));
    assert_eq!(err.to_http_status(), 500);
}

#[tokio::test]
async fn test_process_request_counts_resize_failure() {
    let body = Bytes::from(solid_png(10, 10, [9, 9, 9, 255]));
    let ctx = context(
        StaticOrigin {
            result: Ok(OriginResponse {
                status: 200,
                reason: "200 OK".into(),
                headers: vec![("x-trace".into(), "t1".into())],
                body,
            }),
        },
        None,
    );

    let mut query = HashMap::new();
    query.insert("size".to_string(), "5000x5000".to_string());
    let req = RequestContext::with_query_params("GET".into(), "/a.png".into(), query);
    let response = process_request(Arc::clone(&ctx), req).await;

    assert_eq!(response.status(), 500);
    assert_eq!(response.body(), b"500 Internal Server Error\n");
    assert_eq!(response.headers()["x-trace"], "t1");
    assert_eq!(ctx.stats.get(Counter::Requests), 1);
    assert_eq!(ctx.stats.get(Counter::Failures), 1);
    assert_eq!(ctx.stats.get(Counter::Success), 0);
}
