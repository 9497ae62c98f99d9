use std::collections::HashMap;
use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::extract::Query;
use axum::http::StatusCode;
use axum::response::Json;
use axum::routing::get;
use axum::Router;
use tokio::net::TcpListener;
use tokio::sync::mpsc;

use token_pulse::api;
use token_pulse::error::AppError;
use token_pulse::event::AppEvent;
use token_pulse::fetch::{spawn_fetch, FetchState, HttpTokenSource, MockTokenSource, TokenSource};
use token_pulse::fixtures::mock_tokens;
use token_pulse::model::filter::{CategoryTab, TimeWindow, TokenFilters};

const TIMEOUT: Duration = Duration::from_secs(5);

async fn serve(router: Router) -> SocketAddr {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    tokio::spawn(async move {
        axum::serve(listener, router).await.ok();
    });
    addr
}

#[tokio::test(start_paused = true)]
/// Verifies the mock source answers with the full fixture set after its
/// configured latency.
async fn mock_source_returns_fixtures_after_latency() {
    let source = MockTokenSource::new(Duration::from_millis(1_500));
    let started = tokio::time::Instant::now();
    let tokens = source.fetch(TokenFilters::default()).await.expect("mock never fails");
    assert!(started.elapsed() >= Duration::from_millis(1_500));
    assert_eq!(tokens, mock_tokens());
}

#[tokio::test]
/// Verifies the HTTP source reads the listing served by the bundled API.
async fn http_source_reads_listing_api() {
    let addr = serve(api::router(Duration::ZERO)).await;
    let source = HttpTokenSource::new(&format!("http://{}/", addr), TIMEOUT).expect("client");
    assert_eq!(source.base_url(), format!("http://{}", addr));

    let tokens = source
        .fetch(TokenFilters {
            tab: CategoryTab::PumpLive,
            time: TimeWindow::OneHour,
        })
        .await
        .expect("listing should load");
    assert_eq!(tokens.len(), 6);
    assert_eq!(tokens[0].id, "pumpbook");
    assert_eq!(tokens[0].market_cap.sparkline.len(), 10);
}

#[tokio::test]
/// Verifies the selected filters travel as `tab` and `time` query parameters.
async fn http_source_forwards_filters() {
    let router = Router::new().route(
        "/api/tokens",
        get(|Query(q): Query<HashMap<String, String>>| async move {
            if q.get("tab").map(String::as_str) == Some("dex-screener")
                && q.get("time").map(String::as_str) == Some("30m")
            {
                Ok(Json(mock_tokens()))
            } else {
                Err(StatusCode::BAD_REQUEST)
            }
        }),
    );
    let addr = serve(router).await;
    let source = HttpTokenSource::new(&format!("http://{}", addr), TIMEOUT).expect("client");
    let tokens = source
        .fetch(TokenFilters {
            tab: CategoryTab::DexScreener,
            time: TimeWindow::ThirtyMinutes,
        })
        .await
        .expect("filters should match");
    assert_eq!(tokens.len(), 6);
}

#[tokio::test]
/// Verifies a non-success status surfaces as a fetch error carrying the status.
async fn http_source_reports_server_error() {
    let router = Router::new().route(
        "/api/tokens",
        get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "") }),
    );
    let addr = serve(router).await;
    let source = HttpTokenSource::new(&format!("http://{}", addr), TIMEOUT).expect("client");
    let err = source
        .fetch(TokenFilters::default())
        .await
        .expect_err("500 must fail");
    match err {
        AppError::Fetch { status, msg } => {
            assert_eq!(status, 500);
            assert_eq!(msg, "network response was not ok");
        }
        other => panic!("unexpected error: {}", other),
    }
}

#[tokio::test]
/// Verifies a malformed body is a decode error, not an empty listing.
async fn http_source_rejects_malformed_body() {
    let router = Router::new().route("/api/tokens", get(|| async { "not json" }));
    let addr = serve(router).await;
    let source = HttpTokenSource::new(&format!("http://{}", addr), TIMEOUT).expect("client");
    let err = source.fetch(TokenFilters::default()).await.expect_err("must fail");
    assert!(matches!(err, AppError::Http(ref e) if e.is_decode()), "got {}", err);
}

#[tokio::test]
/// Verifies a server that accepts the request and then stalls ends in a
/// timeout error instead of leaving the listing loading forever.
async fn http_source_times_out_on_stalled_server() {
    let router = Router::new().route(
        "/api/tokens",
        get(|| async {
            tokio::time::sleep(Duration::from_secs(30)).await;
            Json(mock_tokens())
        }),
    );
    let addr = serve(router).await;
    let source = HttpTokenSource::new(&format!("http://{}", addr), Duration::from_millis(200))
        .expect("client");

    let started = std::time::Instant::now();
    let err = source.fetch(TokenFilters::default()).await.expect_err("must time out");
    assert!(matches!(err, AppError::Http(ref e) if e.is_timeout()), "got {}", err);
    assert!(started.elapsed() < Duration::from_secs(5));
}

#[tokio::test]
/// Verifies background fetches report their result tagged with the request id.
async fn spawn_fetch_reports_result() {
    let (tx, mut rx) = mpsc::channel(4);
    let source = Arc::new(TokenSource::Mock(MockTokenSource::new(Duration::ZERO)));
    spawn_fetch(source, TokenFilters::default(), 7, tx)
        .await
        .expect("fetch task");

    match rx.recv().await {
        Some(AppEvent::TokensLoaded { request_id, tokens }) => {
            assert_eq!(request_id, 7);
            assert_eq!(tokens.len(), 6);
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[tokio::test]
/// Verifies an unreachable endpoint reports `FetchFailed` instead of an empty list.
async fn spawn_fetch_reports_failure() {
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let (tx, mut rx) = mpsc::channel(4);
    let source = Arc::new(TokenSource::Http(
        HttpTokenSource::new(&format!("http://{}", addr), TIMEOUT).expect("client"),
    ));
    spawn_fetch(source, TokenFilters::default(), 3, tx)
        .await
        .expect("fetch task");

    match rx.recv().await {
        Some(AppEvent::FetchFailed { request_id, message }) => {
            assert_eq!(request_id, 3);
            assert!(!message.is_empty());
        }
        other => panic!("unexpected event: {:?}", other),
    }
}

#[test]
/// Verifies the three fetch states stay distinguishable, including an
/// empty successful listing.
fn fetch_state_labels() {
    assert_eq!(FetchState::Loading.label(), "LOADING");
    assert!(FetchState::Loading.is_loading());
    assert_eq!(FetchState::Loaded(Vec::new()).label(), "EMPTY");
    assert_eq!(FetchState::Loaded(mock_tokens()).label(), "LIVE");
    assert_eq!(FetchState::Failed("boom".to_string()).label(), "ERROR");
    assert!(FetchState::Failed("boom".to_string()).tokens().is_none());
    assert_eq!(FetchState::Loaded(Vec::new()).tokens().map(<[_]>::len), Some(0));
}
