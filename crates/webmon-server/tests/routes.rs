#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]
#![allow(clippy::panic)]

use std::path::Path;
use std::sync::Arc;
use std::time::Duration;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use tokio_util::sync::CancellationToken;
use tower::ServiceExt;

use webmon_core::error::{Result, WebmonError};
use webmon_core::metrics::SeriesValue;
use webmon_server::app_state::AppState;
use webmon_server::config::WebmonConfig;
use webmon_server::host::{DiskSource, SysinfoHost};
use webmon_server::obs::metrics::names;
use webmon_server::{pages, router, sampler};

/// Disk source returning a fixed reading, or failing when `None`.
struct FixedDisk(Option<f64>);

impl DiskSource for FixedDisk {
    fn usage_percent(&self, _mount: &Path) -> Result<f64> {
        self.0
            .ok_or_else(|| WebmonError::Sampling("disk unavailable".into()))
    }
}

fn state_with_disk(disk: Option<f64>) -> AppState {
    AppState::with_disk_source(WebmonConfig::default(), Arc::new(FixedDisk(disk))).unwrap()
}

async fn get(app: &Router, uri: &str) -> (StatusCode, String, Option<String>) {
    let resp = app
        .clone()
        .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = resp.status();
    let content_type = resp
        .headers()
        .get(header::CONTENT_TYPE)
        .map(|v| v.to_str().unwrap().to_string());
    let bytes = resp.into_body().collect().await.unwrap().to_bytes();
    (status, String::from_utf8(bytes.to_vec()).unwrap(), content_type)
}

fn requests(state: &AppState, path: &str, code: &str) -> Option<u64> {
    state.metrics().requests.get(&[path, code]).unwrap()
}

#[tokio::test]
async fn content_routes_serve_fixed_bodies() {
    let state = state_with_disk(Some(10.0));
    let app = router::build_router(state.clone());

    for (path, body) in [
        (pages::INDEX_PATH, pages::INDEX_BODY),
        (pages::ABOUT_PATH, pages::ABOUT_BODY),
        (pages::STATUS_PATH, pages::STATUS_BODY),
    ] {
        for n in 1..=3u64 {
            let (status, text, _) = get(&app, path).await;
            assert_eq!(status, StatusCode::OK);
            assert_eq!(text, body);
            assert_eq!(requests(&state, path, "200"), Some(n));
        }
    }
}

#[tokio::test]
async fn latency_histogram_tracks_each_request() {
    let state = state_with_disk(Some(10.0));
    let app = router::build_router(state.clone());

    for _ in 0..5 {
        get(&app, "/about").await;
    }

    let h = state
        .metrics()
        .request_duration
        .get(&["/about"])
        .unwrap()
        .expect("series exists");
    assert_eq!(h.count, 5);
    assert!(h.sum >= 0.0);
    assert_eq!(h.buckets.last().unwrap().1, 5);
    assert!(h.buckets.windows(2).all(|w| w[0].1 <= w[1].1));
    assert!(state.metrics().request_duration.get(&["/"]).unwrap().is_none());
}

#[tokio::test]
async fn metrics_before_any_request() {
    let state = state_with_disk(Some(10.0));
    let app = router::build_router(state);

    let (status, text, content_type) = get(&app, "/metrics").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        content_type.as_deref(),
        Some("text/plain; version=0.0.4; charset=utf-8")
    );

    for (name, kind) in [
        (names::REQUESTS_TOTAL, "counter"),
        (names::REQUEST_DURATION_SECONDS, "histogram"),
        (names::CPU_USAGE_PERCENT, "gauge"),
        (names::MEMORY_USAGE_BYTES, "gauge"),
        (names::DISK_USAGE_PERCENT, "gauge"),
    ] {
        assert!(text.contains(&format!("# HELP {name} ")), "missing HELP for {name}");
        assert!(text.contains(&format!("# TYPE {name} {kind}\n")), "missing TYPE for {name}");
    }
    assert!(text.lines().all(|l| l.starts_with('#')), "unexpected series:\n{text}");
}

#[tokio::test]
async fn metrics_endpoint_is_read_only() {
    let state = state_with_disk(Some(10.0));
    let app = router::build_router(state.clone());

    let (_, first, _) = get(&app, "/metrics").await;
    let (_, second, _) = get(&app, "/metrics").await;
    assert_eq!(first, second);
    assert_eq!(requests(&state, "/metrics", "200"), None);
}

#[tokio::test]
async fn disk_gauge_set_only_by_status() {
    let state = state_with_disk(Some(42.7));
    let app = router::build_router(state.clone());

    get(&app, "/").await;
    get(&app, "/about").await;
    assert_eq!(state.metrics().disk_usage.get(&[]).unwrap(), None);

    get(&app, "/status").await;
    assert_eq!(state.metrics().disk_usage.get(&[]).unwrap(), Some(42.7));

    let (_, text, _) = get(&app, "/metrics").await;
    assert!(text.contains("\nwebapp_disk_usage_percent 42.7\n"));
}

#[tokio::test]
async fn status_surfaces_disk_failure() {
    let state = state_with_disk(None);
    let app = router::build_router(state.clone());

    let (status, body, _) = get(&app, "/status").await;
    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    let json: serde_json::Value = serde_json::from_str(&body).unwrap();
    assert_eq!(json["error"], "SAMPLING_FAILED");

    assert_eq!(requests(&state, "/status", "500"), Some(1));
    assert_eq!(requests(&state, "/status", "200"), None);
    assert_eq!(state.metrics().disk_usage.get(&[]).unwrap(), None);
}

#[tokio::test]
async fn unknown_route_is_not_recorded() {
    let state = state_with_disk(Some(1.0));
    let app = router::build_router(state.clone());

    let (status, _, _) = get(&app, "/nope").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    let snap = state.metrics().registry().snapshot();
    assert!(snap[0].series.is_empty());
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_requests_lose_no_updates() {
    let state = state_with_disk(Some(1.0));
    let app = router::build_router(state.clone());

    get(&app, "/").await;
    let before = requests(&state, "/", "200").unwrap();

    let tasks: Vec<_> = (0..100)
        .map(|_| {
            let app = app.clone();
            tokio::spawn(async move { get(&app, "/").await.0 })
        })
        .collect();
    for t in tasks {
        assert_eq!(t.await.unwrap(), StatusCode::OK);
    }

    assert_eq!(requests(&state, "/", "200"), Some(before + 100));
    let h = state.metrics().request_duration.get(&["/"]).unwrap().unwrap();
    assert_eq!(h.count, before + 100);
}

#[tokio::test]
async fn end_to_end_scrape() {
    let state = state_with_disk(Some(63.2));
    let app = router::build_router(state);

    get(&app, "/").await;
    get(&app, "/about").await;
    get(&app, "/status").await;
    let (_, text, _) = get(&app, "/metrics").await;

    assert!(text.contains("webapp_requests_total{path=\"/\",status_code=\"200\"} 1\n"));
    assert!(text.contains("webapp_requests_total{path=\"/about\",status_code=\"200\"} 1\n"));
    assert!(text.contains("webapp_requests_total{path=\"/status\",status_code=\"200\"} 1\n"));
    assert!(text.contains("webapp_request_duration_seconds_count{path=\"/status\"} 1\n"));
    assert!(text.contains("webapp_request_duration_seconds_bucket{path=\"/\",le=\"+Inf\"} 1\n"));

    let disk = text
        .lines()
        .find_map(|l| l.strip_prefix("webapp_disk_usage_percent "))
        .expect("disk line present");
    let disk: f64 = disk.parse().unwrap();
    assert!((0.0..=100.0).contains(&disk));
}

#[tokio::test]
async fn real_sampler_fills_cpu_and_memory() {
    if !sysinfo::IS_SUPPORTED_SYSTEM {
        return;
    }
    let state = state_with_disk(Some(1.0));
    let cancel = CancellationToken::new();
    sampler::spawn(
        state.metrics().clone(),
        SysinfoHost::new(),
        Duration::from_millis(250),
        cancel.clone(),
    );

    let deadline = tokio::time::Instant::now() + Duration::from_secs(10);
    loop {
        let snap = state.metrics().registry().snapshot();
        let cpu = snap.iter().find(|f| f.name == names::CPU_USAGE_PERCENT).unwrap();
        let mem = snap.iter().find(|f| f.name == names::MEMORY_USAGE_BYTES).unwrap();
        if let (Some(SeriesValue::Gauge(c)), Some(SeriesValue::Gauge(m))) =
            (cpu.series(&[]), mem.series(&[]))
        {
            assert!(*c >= 0.0);
            assert!(*m >= 0.0);
            break;
        }
        assert!(tokio::time::Instant::now() < deadline, "sampler produced nothing");
        tokio::time::sleep(Duration::from_millis(50)).await;
    }
    cancel.cancel();
}

#[cfg(unix)]
#[tokio::test]
async fn status_reads_real_root_filesystem() {
    let state = AppState::new(WebmonConfig::default()).unwrap();
    let app = router::build_router(state.clone());

    let (status, body, _) = get(&app, "/status").await;
    assert_eq!(status, StatusCode::OK, "body: {body}");

    let reported = state.metrics().disk_usage.get(&[]).unwrap().expect("disk gauge set");
    let expected = webmon_server::host::fs_stats(Path::new("/")).unwrap().usage_percent();
    assert!((0.0..=100.0).contains(&reported));
    assert!((reported - expected).abs() < 0.5, "reported={reported} statvfs={expected}");
}
