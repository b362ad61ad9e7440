// End-to-end gateway tests against a mock origin

use super::test_harness::{body_text, solid_image, MockOrigin, MockRoute, TestGateway};
use image::{ImageFormat, Rgba};
use imgate::stats::Counter;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn test_resize_bestfit_end_to_end() {
    let origin = MockOrigin::start(vec![(
        "/photos/cat.jpg",
        MockRoute::ok(solid_image(400, 300, [120, 80, 40, 255], ImageFormat::Jpeg)),
    )])
    .await;
    let gateway = TestGateway::new(&origin.base_url, 1000, "");

    let response = gateway
        .get("/photos/cat.jpg?size=100x100&bestfit=1")
        .await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "image/jpeg");
    let out = image::load_from_memory(response.body()).unwrap();
    assert_eq!((out.width(), out.height()), (100, 100));
}

#[tokio::test]
async fn test_query_string_is_not_forwarded() {
    let origin = MockOrigin::start(vec![(
        "/a.png",
        MockRoute::ok(solid_image(10, 10, [0, 0, 0, 255], ImageFormat::Png)),
    )])
    .await;
    let gateway = TestGateway::new(&format!("{}/", origin.base_url), 1000, "");

    let response = gateway.get("/a.png?size=5x5&watermark=0").await;

    assert_eq!(response.status(), 200);
    assert_eq!(origin.requests(), vec!["/a.png".to_string()]);
}

#[tokio::test]
async fn test_upstream_404_is_passed_through() {
    let origin = MockOrigin::start(vec![]).await;
    let gateway = TestGateway::new(&origin.base_url, 1000, "");

    let response = gateway.get("/missing.jpg").await;

    assert_eq!(response.status(), 404);
    assert_eq!(body_text(&response), "404 Not Found\n");
    assert_eq!(gateway.app.context().stats.get(Counter::Failures), 1);
}

#[tokio::test]
async fn test_upstream_reason_phrase_is_canonical() {
    let origin = MockOrigin::start(vec![
        ("/gone.jpg", MockRoute::status(404, "Gone Fishing")),
        ("/teapot.jpg", MockRoute::status(503, "Back Soon")),
    ])
    .await;
    let gateway = TestGateway::new(&origin.base_url, 1000, "");

    let response = gateway.get("/gone.jpg").await;
    assert_eq!(response.status(), 404);
    assert_eq!(body_text(&response), "404 Not Found\n");

    let response = gateway.get("/teapot.jpg").await;
    assert_eq!(response.status(), 503);
    assert_eq!(body_text(&response), "503 Service Unavailable\n");
}

#[tokio::test]
async fn test_slow_origin_times_out_with_504() {
    let origin = MockOrigin::start(vec![(
        "/slow.jpg",
        MockRoute::ok(solid_image(10, 10, [0, 0, 0, 255], ImageFormat::Jpeg))
            .with_delay(Duration::from_millis(800)),
    )])
    .await;
    let gateway = TestGateway::new(&origin.base_url, 100, "");

    let response = gateway.get("/slow.jpg").await;

    assert_eq!(response.status(), 504);
    assert_eq!(body_text(&response), "504 Gateway Timeout\n");
}

#[tokio::test]
async fn test_unreachable_origin_is_504() {
    // Bind then drop to get a port nobody listens on
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let url = format!("http://{}", listener.local_addr().unwrap());
    drop(listener);
    let gateway = TestGateway::new(&url, 200, "");

    let response = gateway.get("/a.jpg").await;

    assert_eq!(response.status(), 504);
}

#[tokio::test]
async fn test_garbage_body_is_502_with_forwarded_headers() {
    let origin = MockOrigin::start(vec![(
        "/broken.jpg",
        MockRoute::ok(b"<html>definitely not a jpeg</html>".to_vec())
            .with_header("X-Origin-Trace", "abc123")
            .with_header("Cache-Control", "max-age=60"),
    )])
    .await;
    let gateway = TestGateway::new(&origin.base_url, 1000, "");

    let response = gateway.get("/broken.jpg").await;

    assert_eq!(response.status(), 502);
    assert_eq!(body_text(&response), "502 Bad Gateway\n");
    assert_eq!(response.headers()["x-origin-trace"], "abc123");
    assert!(response.headers().get("cache-control").is_none());
}

#[tokio::test]
async fn test_x_headers_forwarded_on_success() {
    let origin = MockOrigin::start(vec![(
        "/a.gif",
        MockRoute::ok(solid_image(8, 8, [200, 10, 10, 255], ImageFormat::Png))
            .with_header("X-Image-Id", "777")
            .with_header("ETag", "\"v1\""),
    )])
    .await;
    let gateway = TestGateway::new(&origin.base_url, 1000, "");

    let response = gateway.get("/a.gif").await;

    assert_eq!(response.status(), 200);
    assert_eq!(response.headers()["content-type"], "image/gif");
    assert_eq!(response.headers()["x-image-id"], "777");
    assert!(response.headers().get("etag").is_none());
}

#[tokio::test]
async fn test_watermark_black_on_white() {
    let dir = tempfile::TempDir::new().unwrap();
    for (name, color) in [
        ("wb.png", [255, 255, 255, 255]),
        ("ws.png", [255, 255, 255, 255]),
        ("bb.png", [0, 0, 0, 255]),
        ("bs.png", [0, 0, 0, 255]),
    ] {
        let bytes = solid_image(20, 10, color, ImageFormat::Png);
        std::fs::write(dir.path().join(name), bytes).unwrap();
    }
    let watermark = format!(
        "watermark:\n  path: {}\n  file_white_big: wb.png\n  file_white_small: ws.png\n  \
         file_black_big: bb.png\n  file_black_small: bs.png\n  margin: 5\n  \
         size_threshold: 50x50\n  color_threshold: \"200,200,200\"\n",
        dir.path().display()
    );

    let origin = MockOrigin::start(vec![(
        "/white.png",
        MockRoute::ok(solid_image(120, 80, [255, 255, 255, 255], ImageFormat::Png)),
    )])
    .await;
    let gateway = TestGateway::new(&origin.base_url, 1000, &watermark);

    let response = gateway.get("/white.png?watermark=1").await;

    assert_eq!(response.status(), 200);
    let out = image::load_from_memory(response.body()).unwrap().into_rgba8();
    let black = out
        .pixels()
        .filter(|p| **p == Rgba([0, 0, 0, 255]))
        .count();
    assert_eq!(black, 20 * 10);
}

#[tokio::test]
async fn test_concurrent_requests_keep_counters_consistent() {
    let origin = MockOrigin::start(vec![
        (
            "/ok.png",
            MockRoute::ok(solid_image(64, 64, [1, 2, 3, 255], ImageFormat::Png)),
        ),
        ("/bad.png", MockRoute::ok(b"garbage".to_vec())),
    ])
    .await;
    let gateway = Arc::new(TestGateway::new(&origin.base_url, 1000, ""));

    let mut handles = Vec::new();
    for i in 0..20 {
        let gateway = Arc::clone(&gateway);
        let path = if i % 4 == 0 {
            "/bad.png"
        } else {
            "/ok.png?size=32x32"
        };
        handles.push(tokio::spawn(async move { gateway.get(path).await.status() }));
    }
    for handle in handles {
        handle.await.unwrap();
    }

    let stats = &gateway.app.context().stats;
    assert_eq!(stats.get(Counter::Requests), 20);
    assert_eq!(stats.get(Counter::Failures), 5);
    assert_eq!(stats.get(Counter::Success), 15);
    assert_eq!(
        stats.get(Counter::Requests),
        stats.get(Counter::Failures) + stats.get(Counter::Success)
    );
}
