//! Integration tests for the scrape server endpoints.

use std::sync::Arc;

use t212_client::Position;
use t212_telemetry::server::{create_router, AppState};
use t212_telemetry::PortfolioMetrics;

/// Serve the router on an ephemeral port and return its base URL.
async fn spawn_server(metrics: Arc<PortfolioMetrics>) -> String {
    let app = create_router(AppState::new(metrics));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
        .await
        .expect("bind test server");
    let addr = listener.local_addr().expect("local addr");

    tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });

    format!("http://{addr}")
}

#[tokio::test]
async fn test_scrape_returns_published_gauges() {
    let metrics = Arc::new(PortfolioMetrics::new().expect("build metrics"));
    metrics.publish(&[Position {
        ticker: "AAPL_US_EQ".to_string(),
        quantity: 2.0,
        average_price: 150.0,
        current_price: 190.0,
        ppl: 80.0,
        fx_ppl: -0.5,
    }]);

    let base_url = spawn_server(metrics).await;

    let response = reqwest::get(format!("{base_url}/metrics"))
        .await
        .expect("scrape");
    assert_eq!(response.status(), 200);

    let content_type = response
        .headers()
        .get("content-type")
        .and_then(|v| v.to_str().ok())
        .unwrap_or_default()
        .to_string();
    assert!(content_type.starts_with("text/plain"));

    let body = response.text().await.expect("body");
    assert!(body.contains("trading212_open_positions_total 1"));
    assert!(body.contains(r#"trading212_position_quantity{ticker="AAPL_US_EQ"} 2"#));
    assert!(body.contains(r#"trading212_position_value{ticker="AAPL_US_EQ"} 380"#));
    assert!(body.contains(r#"trading212_position_cost{ticker="AAPL_US_EQ"} 300"#));
}

#[tokio::test]
async fn test_scrape_with_no_publishes_shows_zero_total() {
    let metrics = Arc::new(PortfolioMetrics::new().expect("build metrics"));
    let base_url = spawn_server(metrics).await;

    let body = reqwest::get(format!("{base_url}/metrics"))
        .await
        .expect("scrape")
        .text()
        .await
        .expect("body");

    assert!(body.contains("trading212_open_positions_total 0"));
}

#[tokio::test]
async fn test_health_endpoint() {
    let metrics = Arc::new(PortfolioMetrics::new().expect("build metrics"));
    let base_url = spawn_server(metrics).await;

    let response = reqwest::get(format!("{base_url}/health")).await.expect("get");
    assert_eq!(response.status(), 200);
    assert_eq!(response.text().await.expect("body"), "ok");
}

#[tokio::test]
async fn test_concurrent_scrapes() {
    let metrics = Arc::new(PortfolioMetrics::new().expect("build metrics"));
    metrics.publish(&[]);
    let base_url = spawn_server(metrics.clone()).await;

    let mut handles = Vec::new();
    for _ in 0..8 {
        let url = format!("{base_url}/metrics");
        handles.push(tokio::spawn(async move {
            reqwest::get(url).await.expect("scrape").status()
        }));
    }

    for handle in handles {
        assert_eq!(handle.await.expect("join"), 200);
    }
}
