//! 响应式属性测试：基础读写、watch 监听、并发 update_field 不丢修改、销毁后监听器退出。

use std::time::Duration;

use crate::browser::ResponseMonitor;
use crate::states::unlock_reactive::{UnlockReactiveProperty, UnlockReactivePropertyError};

#[tokio::test]
async fn basic_update_and_read() {
    let prop = UnlockReactiveProperty::new(0u64);
    prop.update(42);
    assert_eq!(prop.get_current(), Some(42));

    prop.update_field(|v| *v += 8);
    assert_eq!(prop.get_current(), Some(50));
}

#[tokio::test]
async fn watch_receives_updates() {
    let prop = UnlockReactiveProperty::new(0i32);
    let mut watcher = prop.watch();

    prop.update(1);
    assert_eq!(watcher.changed().await.unwrap(), 1);

    prop.update(2);
    assert_eq!(watcher.changed().await.unwrap(), 2);
}

#[tokio::test]
async fn watcher_sees_latest_after_burst() {
    let prop = UnlockReactiveProperty::new(0u32);
    let mut watcher = prop.watch();
    for i in 1..=100 {
        prop.update(i);
    }
    // 中间值可以被合并，但最新值一定可见
    assert_eq!(watcher.changed().await.unwrap(), 100);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_update_field_does_not_lose_increments() {
    const TASKS: u64 = 8;
    const PER_TASK: u64 = 1_000;

    let prop = UnlockReactiveProperty::new(0u64);
    let mut handles = Vec::new();
    for _ in 0..TASKS {
        let p = prop.clone();
        handles.push(tokio::spawn(async move {
            for _ in 0..PER_TASK {
                p.update_field(|v| *v += 1);
            }
        }));
    }
    for h in handles {
        h.await.unwrap();
    }
    assert_eq!(prop.get_current(), Some(TASKS * PER_TASK));
}

#[tokio::test]
async fn watcher_errors_after_all_handles_dropped() {
    let prop = UnlockReactiveProperty::new(1u8);
    let mut watcher = prop.watch();
    drop(prop);

    let result = tokio::time::timeout(Duration::from_secs(1), watcher.changed())
        .await
        .expect("销毁后监听器应立即返回");
    assert!(matches!(
        result,
        Err(UnlockReactivePropertyError::WatcherClosed) | Err(UnlockReactivePropertyError::RecvError(_))
    ));
}

#[tokio::test]
async fn response_monitor_tracks_last_and_seen() {
    let monitor = ResponseMonitor::new();
    let shared = monitor.clone();

    shared.record(403);
    shared.record(200);
    shared.record(403);

    let obs = monitor.snapshot();
    assert_eq!(obs.last_status, Some(403));
    assert_eq!(obs.seen, vec![403, 200]);
    assert!(obs.has_seen(200));
    assert!(obs.last_is(403));

    monitor.reset();
    let obs = shared.snapshot();
    assert_eq!(obs.last_status, None);
    assert!(obs.seen.is_empty());
}
