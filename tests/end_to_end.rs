//! End-to-end tests over real sockets.

use axum::http::StatusCode;
use echoes::config::parse_forward;
use echoes::Shutdown;

mod common;

#[tokio::test]
async fn test_unmatched_paths_are_classified() {
    let shutdown = Shutdown::new();
    let addr = common::start_server(Vec::new(), &shutdown).await;
    let client = common::client();

    let cases = [
        ("/", StatusCode::OK, "your call is [empty]"),
        ("/200", StatusCode::OK, "return status will be 200"),
        ("/400", StatusCode::BAD_REQUEST, "return status will be 400"),
        ("/500", StatusCode::INTERNAL_SERVER_ERROR, "return status will be 500"),
        ("/abc", StatusCode::OK, "return status will be 200"),
        ("/anything", StatusCode::OK, "your call is anything"),
    ];

    for (path, status, body) in cases {
        let res = client.get(format!("http://{}{}", addr, path)).send().await.unwrap();
        assert_eq!(res.status().as_u16(), status.as_u16(), "path {}", path);
        assert_eq!(res.text().await.unwrap(), body, "path {}", path);
    }

    shutdown.trigger();
}

#[tokio::test]
async fn test_forwarded_route_wraps_upstream_body() {
    // Upstream status is not propagated, only its body.
    let upstream = common::start_mock_upstream("404 Not Found", "X").await;
    let target = parse_forward(&format!("/mock:127.0.0.1:{}/thing", upstream.port())).unwrap();
    let expected_address = format!("http://127.0.0.1:{}/thing", upstream.port());

    let shutdown = Shutdown::new();
    let addr = common::start_server(vec![target], &shutdown).await;

    let res = common::client()
        .get(format!("http://{}/mock", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("<- (delay "), "body: {}", body);
    assert!(body.contains(&format!("from {})", expected_address)), "body: {}", body);
    assert!(body.ends_with(") X"), "body: {}", body);

    shutdown.trigger();
}

#[tokio::test]
async fn test_unreachable_upstream_is_bad_gateway() {
    let closed = common::closed_addr().await;
    let target = parse_forward(&format!("/down:127.0.0.1:{}", closed.port())).unwrap();

    let shutdown = Shutdown::new();
    let addr = common::start_server(vec![target], &shutdown).await;

    let res = common::client()
        .get(format!("http://{}/down", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 502);
    let body = res.text().await.unwrap();
    assert!(body.starts_with("<- (delay "), "body: {}", body);
    assert!(body.contains("error sending request"), "body: {}", body);

    shutdown.trigger();
}

#[tokio::test]
async fn test_post_to_forward_route_is_classified() {
    let upstream = common::start_mock_upstream("200 OK", "never").await;
    let target = parse_forward(&format!("/abc:127.0.0.1:{}", upstream.port())).unwrap();

    let shutdown = Shutdown::new();
    let addr = common::start_server(vec![target], &shutdown).await;

    let res = common::client()
        .post(format!("http://{}/abc", addr))
        .send()
        .await
        .unwrap();
    assert_eq!(res.status().as_u16(), 200);
    assert_eq!(res.text().await.unwrap(), "return status will be 200");

    shutdown.trigger();
}
