//! 分片下载引擎测试：全新下载、续传、幂等恢复、整文件回退、并发上限、取消、错误路径。
//!
//! 全部对本地 [`MockOrigin`] 发请求，结果逐字节对比源站数据。

use std::sync::atomic::{AtomicU64, AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use tokio_util::sync::CancellationToken;

use crate::credential::{CookieRecord, SessionCredentials};
use crate::downloader::{download, ChunkedDownloader, DownloadError};
use crate::tests::{test_body, MockOrigin, OriginOptions};

const LEN: usize = 1_000_000;
const CHUNK: u64 = 100_000;

fn anon() -> Arc<SessionCredentials> {
    Arc::new(SessionCredentials::anonymous(None))
}

#[tokio::test]
async fn fresh_download_matches_origin() {
    let origin = MockOrigin::start(test_body(LEN, 1)).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("v.mp4.part");

    let received = Arc::new(AtomicU64::new(0));
    let calls = Arc::new(AtomicUsize::new(0));
    let peak = Arc::new(AtomicU64::new(0));
    let completed = Arc::new(AtomicUsize::new(0));
    let (r, c, pk, done) = (
        Arc::clone(&received),
        Arc::clone(&calls),
        Arc::clone(&peak),
        Arc::clone(&completed),
    );

    let downloader = ChunkedDownloader::new(origin.url("/v.mp4"), anon())
        .save_to(&dest)
        .chunk_size(CHUNK)
        .max_concurrent_chunks(4)
        .with_on_bytes_hook(move |n| {
            r.fetch_add(n, Ordering::SeqCst);
            c.fetch_add(1, Ordering::SeqCst);
        })
        .with_on_progress_hook(move |bytes_done, total| {
            assert_eq!(total, Some(LEN as u64));
            pk.fetch_max(bytes_done, Ordering::SeqCst);
        })
        .with_after_complete_hook(move || {
            done.fetch_add(1, Ordering::SeqCst);
            async {}
        });
    let progress = downloader.progress();
    let path = downloader.send().await.unwrap();

    assert_eq!(path, dest);
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), origin.body());
    assert_eq!(received.load(Ordering::SeqCst), LEN as u64);
    // 每个分片只上报一次
    assert_eq!(calls.load(Ordering::SeqCst), 10);

    assert_eq!(peak.load(Ordering::SeqCst), LEN as u64);
    assert_eq!(completed.load(Ordering::SeqCst), 1);

    // 并发分片的进度写入可能乱序，只检查总量与上界
    let p = progress.get_current().unwrap();
    assert_eq!(p.total, Some(LEN as u64));
    assert!(p.bytes_done <= LEN as u64);

    let mut starts: Vec<u64> = origin.gets().iter().filter_map(|g| g.range_start()).collect();
    starts.sort();
    assert_eq!(starts, (0..10).map(|i| i * CHUNK).collect::<Vec<_>>());
    assert!(origin.gets().iter().any(|g| g.range.as_deref() == Some("bytes=900000-999999")));
    assert!(origin.requests().iter().all(|r| r.path == "/v.mp4"));
}

#[tokio::test]
async fn chunk_concurrency_is_bounded() {
    let options = OriginOptions {
        get_delay: Some(Duration::from_millis(40)),
        ..OriginOptions::default()
    };
    let origin = MockOrigin::start_with(test_body(LEN, 2), options).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("v.part");

    ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(&dest)
        .chunk_size(50_000)
        .max_concurrent_chunks(3)
        .send()
        .await
        .unwrap();

    assert_eq!(origin.gets().len(), 20);
    assert!(origin.max_in_flight() <= 3, "并发分片数 {} 超过上限", origin.max_in_flight());
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), origin.body());
}

#[tokio::test]
async fn resume_fetches_only_missing_bytes() {
    let origin = MockOrigin::start(test_body(LEN, 3)).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("v.part");
    tokio::fs::write(&dest, &origin.body()[..250_000]).await.unwrap();

    let received = Arc::new(AtomicU64::new(0));
    let r = Arc::clone(&received);
    ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(&dest)
        .chunk_size(CHUNK)
        .with_on_bytes_hook(move |n| {
            r.fetch_add(n, Ordering::SeqCst);
        })
        .send()
        .await
        .unwrap();

    assert_eq!(tokio::fs::read(&dest).await.unwrap(), origin.body());
    assert_eq!(received.load(Ordering::SeqCst), (LEN - 250_000) as u64);
    let gets = origin.gets();
    assert!(gets.iter().any(|g| g.range.as_deref() == Some("bytes=250000-299999")));
    assert!(gets.iter().all(|g| g.range_start().unwrap() >= 250_000));
}

#[tokio::test]
async fn complete_file_is_left_untouched() {
    let origin = MockOrigin::start(test_body(LEN, 4)).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("v.part");
    tokio::fs::write(&dest, origin.body()).await.unwrap();

    ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(&dest)
        .send()
        .await
        .unwrap();

    assert!(origin.gets().is_empty());
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), origin.body());
}

#[tokio::test]
async fn stale_longer_file_is_redownloaded() {
    let origin = MockOrigin::start(test_body(LEN, 5)).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("v.part");
    tokio::fs::write(&dest, vec![0xAAu8; LEN + 10]).await.unwrap();

    ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(&dest)
        .chunk_size(CHUNK)
        .send()
        .await
        .unwrap();

    assert_eq!(origin.gets().len(), 10);
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), origin.body());
}

#[tokio::test]
async fn failed_window_truncates_and_rerun_is_idempotent() {
    let origin = MockOrigin::start(test_body(LEN, 6)).await;
    origin.fail_once_at(300_000);
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("v.part");

    let err = ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(&dest)
        .chunk_size(CHUNK)
        .max_concurrent_chunks(2)
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, DownloadError::UnexpectedStatus { status: 500, .. }), "{err:?}");

    // 失败后的文件长度只覆盖真正写完的连续前缀
    let partial = tokio::fs::read(&dest).await.unwrap();
    assert!(partial.len() <= 300_000, "截断后长度 {}", partial.len());
    assert_eq!(partial.as_slice(), &origin.body()[..partial.len()]);

    let before = origin.gets().len();
    ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(&dest)
        .chunk_size(CHUNK)
        .max_concurrent_chunks(2)
        .send()
        .await
        .unwrap();

    assert_eq!(tokio::fs::read(&dest).await.unwrap(), origin.body());
    let rerun = &origin.gets()[before..];
    assert!(rerun.iter().all(|g| g.range_start().unwrap() >= partial.len() as u64));
}

#[tokio::test]
async fn short_body_is_a_failure() {
    let origin = MockOrigin::start(test_body(LEN, 7)).await;
    origin.short_once_at(0);
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("v.part");

    let result = ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(&dest)
        .chunk_size(CHUNK)
        .max_concurrent_chunks(1)
        .send()
        .await;
    assert!(result.is_err());
    // 首个分片没写完，可信前缀为 0
    assert_eq!(tokio::fs::metadata(&dest).await.unwrap().len(), 0);

    ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(&dest)
        .chunk_size(CHUNK)
        .send()
        .await
        .unwrap();
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), origin.body());
}

#[tokio::test]
async fn non_ranged_origin_uses_single_plain_get() {
    let options = OriginOptions {
        accept_ranges: false,
        ..OriginOptions::default()
    };
    let origin = MockOrigin::start_with(test_body(LEN, 8), options).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("v.part");
    // 已有前缀在不支持 Range 时被忽略
    tokio::fs::write(&dest, &origin.body()[..123_456]).await.unwrap();

    let calls = Arc::new(AtomicUsize::new(0));
    let c = Arc::clone(&calls);
    ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(&dest)
        .chunk_size(CHUNK)
        .with_on_bytes_hook(move |n| {
            assert_eq!(n, LEN as u64);
            c.fetch_add(1, Ordering::SeqCst);
        })
        .send()
        .await
        .unwrap();

    let gets = origin.gets();
    assert_eq!(gets.len(), 1);
    assert!(gets[0].range.is_none());
    assert_eq!(calls.load(Ordering::SeqCst), 1);
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), origin.body());
}

#[tokio::test]
async fn unknown_size_falls_back_to_whole_body() {
    let options = OriginOptions {
        advertise_length: false,
        ..OriginOptions::default()
    };
    let origin = MockOrigin::start_with(test_body(LEN, 9), options).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("v.part");

    let received = Arc::new(AtomicU64::new(0));
    let r = Arc::clone(&received);
    let path = download(&origin.url("/v"), &dest, anon(), CHUNK, 4, move |n| {
        r.fetch_add(n, Ordering::SeqCst);
    })
    .await
    .unwrap();

    assert_eq!(path, dest);
    assert_eq!(origin.gets().len(), 1);
    assert!(origin.gets()[0].range.is_none());
    assert_eq!(received.load(Ordering::SeqCst), LEN as u64);
    assert_eq!(tokio::fs::read(&dest).await.unwrap(), origin.body());
}

#[tokio::test]
async fn range_ignored_by_origin_is_an_error() {
    let options = OriginOptions {
        ignore_range: true,
        ..OriginOptions::default()
    };
    let origin = MockOrigin::start_with(test_body(LEN, 10), options).await;
    let dir = tempfile::tempdir().unwrap();

    let err = ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(dir.path().join("v.part"))
        .chunk_size(CHUNK)
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, DownloadError::RangeIgnored { .. }), "{err:?}");
}

#[tokio::test]
async fn probe_failure_schedules_nothing() {
    let options = OriginOptions {
        head_status: 403,
        ..OriginOptions::default()
    };
    let origin = MockOrigin::start_with(test_body(1_000, 11), options).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("v.part");

    let err = ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(&dest)
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, DownloadError::Probe { status: 403 }));
    assert!(origin.gets().is_empty());
    assert!(!dest.exists());
}

#[tokio::test]
async fn missing_destination_and_zero_chunk_rejected() {
    let err = ChunkedDownloader::new("http://127.0.0.1:9/v", anon()).send().await.unwrap_err();
    assert!(matches!(err, DownloadError::NoDestination));

    let err = ChunkedDownloader::new("http://127.0.0.1:9/v", anon())
        .save_to("x.part")
        .chunk_size(0)
        .send()
        .await
        .unwrap_err();
    assert!(matches!(err, DownloadError::InvalidChunkSize));
}

#[tokio::test]
async fn cancellation_stops_in_flight_windows() {
    let options = OriginOptions {
        get_delay: Some(Duration::from_millis(500)),
        ..OriginOptions::default()
    };
    let origin = MockOrigin::start_with(test_body(LEN, 12), options).await;
    let dir = tempfile::tempdir().unwrap();
    let dest = dir.path().join("v.part");

    let token = CancellationToken::new();
    let t = token.clone();
    tokio::spawn(async move {
        tokio::time::sleep(Duration::from_millis(100)).await;
        t.cancel();
    });

    let err = ChunkedDownloader::new(origin.url("/v"), anon())
        .save_to(&dest)
        .chunk_size(CHUNK)
        .with_cancel_token(token)
        .send()
        .await
        .unwrap_err();
    assert!(err.is_cancelled(), "{err:?}");
    assert_eq!(tokio::fs::metadata(&dest).await.unwrap().len(), 0);
}

#[tokio::test]
async fn every_request_carries_credentials() {
    let origin = MockOrigin::start(test_body(300_000, 13)).await;
    let dir = tempfile::tempdir().unwrap();
    let creds = Arc::new(SessionCredentials::new(
        vec![CookieRecord::new("cf_clearance", "ok")],
        "Browser/2.0",
    ));

    ChunkedDownloader::new(origin.url("/v"), creds)
        .save_to(dir.path().join("v.part"))
        .chunk_size(CHUNK)
        .send()
        .await
        .unwrap();

    let requests = origin.requests();
    assert_eq!(requests.len(), 4); // HEAD + 3 个分片
    for req in requests {
        assert_eq!(req.cookie.as_deref(), Some("cf_clearance=ok"));
        assert_eq!(req.user_agent.as_deref(), Some("Browser/2.0"));
    }
}
