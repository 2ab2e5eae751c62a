use std::collections::HashMap;
use std::path::PathBuf;
use std::time::Duration;

use crate::config::{AppConfig, ConfigError, DEFAULT_OUTPUT_DIR};
use crate::downloader::{DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CONCURRENT_CHUNKS};
use crate::orchestrator::DEFAULT_MAX_CONCURRENT_TASKS;

fn lookup(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
    let map: HashMap<String, String> = pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect();
    move |key: &str| map.get(key).cloned()
}

#[test]
fn defaults_without_overrides() {
    let cfg = AppConfig::from_lookup(lookup(&[])).unwrap();
    assert_eq!(cfg, AppConfig::default());
    assert_eq!(cfg.output_dir, PathBuf::from(DEFAULT_OUTPUT_DIR));
    assert_eq!(cfg.max_tasks, DEFAULT_MAX_CONCURRENT_TASKS);
    assert_eq!(cfg.chunk_threads, DEFAULT_MAX_CONCURRENT_CHUNKS);
    assert_eq!(cfg.chunk_size, DEFAULT_CHUNK_SIZE);
    assert!(!cfg.headless);
    assert!(cfg.user_data_dir.ends_with("browser_user_data"));
}

#[test]
fn overrides_are_applied() {
    let cfg = AppConfig::from_lookup(lookup(&[
        ("HDL_OUTPUT_DIR", "/tmp/out"),
        ("HDL_USER_DATA_DIR", "/tmp/profile"),
        ("HDL_HEADLESS", "Yes"),
        ("HDL_MAX_TASKS", "5"),
        ("HDL_CHUNK_THREADS", " 16 "),
        ("HDL_CHUNK_SIZE", "1048576"),
        ("HDL_REQUEST_TIMEOUT_SECS", "30"),
        ("HDL_TASK_RETRIES", "0"),
    ]))
    .unwrap();

    assert_eq!(cfg.output_dir, PathBuf::from("/tmp/out"));
    assert_eq!(cfg.user_data_dir, PathBuf::from("/tmp/profile"));
    assert!(cfg.headless);
    assert_eq!(cfg.max_tasks, 5);
    assert_eq!(cfg.chunk_threads, 16);
    assert_eq!(cfg.chunk_size, 1_048_576);
    assert_eq!(cfg.request_timeout, Duration::from_secs(30));
    assert_eq!(cfg.task_retries, 0);
}

#[test]
fn invalid_values_name_the_key() {
    let cases = [
        ("HDL_MAX_TASKS", "0"),
        ("HDL_MAX_TASKS", "many"),
        ("HDL_CHUNK_THREADS", "-1"),
        ("HDL_CHUNK_SIZE", "0"),
        ("HDL_HEADLESS", "maybe"),
        ("HDL_REQUEST_TIMEOUT_SECS", "0"),
    ];
    for (key, value) in cases {
        let err = AppConfig::from_lookup(lookup(&[(key, value)])).unwrap_err();
        assert_eq!(
            err,
            ConfigError::Invalid {
                key: key.to_string(),
                value: value.to_string(),
            }
        );
    }
}

#[test]
fn derived_configs_follow_app_config() {
    let cfg = AppConfig {
        output_dir: PathBuf::from("out"),
        max_tasks: 4,
        chunk_threads: 2,
        chunk_size: 1024,
        task_retries: 7,
        navigation_timeout: Duration::from_secs(5),
        poll_interval: Duration::from_millis(250),
        ..AppConfig::default()
    };

    let download = cfg.download_config();
    assert!(download.save_path.is_none());
    assert_eq!(download.chunk_size, 1024);
    assert_eq!(download.max_concurrent_chunks, 2);

    let orch = cfg.orchestrator_config();
    assert_eq!(orch.output_dir, PathBuf::from("out"));
    assert_eq!(orch.max_concurrent_tasks, 4);
    assert_eq!(orch.max_task_retries, 7);
    assert_eq!(orch.download.chunk_size, 1024);
    assert!(orch.skip_existing);

    let gate = cfg.gate_config();
    assert_eq!(gate.navigation_timeout, Duration::from_secs(5));
    assert_eq!(gate.poll_interval, Duration::from_millis(250));
}
