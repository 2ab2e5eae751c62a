use std::path::PathBuf;
use std::str::FromStr;
use std::time::Duration;

use crate::internal::downloader::structs::{
    DownloadConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CONCURRENT_CHUNKS, DEFAULT_REQUEST_TIMEOUT,
};
use crate::internal::gate::structs::gate_config::{DEFAULT_NAVIGATION_TIMEOUT, DEFAULT_POLL_INTERVAL};
use crate::internal::gate::structs::GateConfig;
use crate::internal::orchestrator::structs::{
    OrchestratorConfig, DEFAULT_MAX_CONCURRENT_TASKS, DEFAULT_MAX_TASK_RETRIES, DEFAULT_RETRY_DELAY,
};

use super::config_error::ConfigError;

/// 环境变量前缀
pub const ENV_PREFIX: &str = "HDL_";

/// 默认输出目录
pub const DEFAULT_OUTPUT_DIR: &str = "downloads";

/// 浏览器用户数据目录名（持久化 Cookie，减少重复验证）
pub const BROWSER_USER_DATA_DIR_NAME: &str = "browser_user_data";

#[derive(Debug, Clone, PartialEq)]
pub struct AppConfig {
    pub output_dir: PathBuf,
    pub user_data_dir: PathBuf,
    pub headless: bool,
    pub max_tasks: usize,
    pub chunk_threads: usize,
    pub chunk_size: u64,
    pub request_timeout: Duration,
    pub navigation_timeout: Duration,
    pub poll_interval: Duration,
    pub task_retries: u32,
    pub retry_delay: Duration,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from(DEFAULT_OUTPUT_DIR),
            user_data_dir: default_user_data_dir(),
            headless: false,
            max_tasks: DEFAULT_MAX_CONCURRENT_TASKS,
            chunk_threads: DEFAULT_MAX_CONCURRENT_CHUNKS,
            chunk_size: DEFAULT_CHUNK_SIZE,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            task_retries: DEFAULT_MAX_TASK_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
        }
    }
}

/// `<本地数据目录>/h_downloader/browser_user_data`，取不到本地数据目录时用当前目录。
fn default_user_data_dir() -> PathBuf {
    match dirs::data_local_dir() {
        Some(base) => base.join("h_downloader").join(BROWSER_USER_DATA_DIR_NAME),
        None => PathBuf::from(BROWSER_USER_DATA_DIR_NAME),
    }
}

impl AppConfig {
    /// 从进程环境变量读取覆盖项。
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// 从任意键值来源读取覆盖项；未出现的键保持默认值。
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut cfg = Self::default();
        let get = |name: &str| {
            let key = format!("{ENV_PREFIX}{name}");
            lookup(&key).map(|value| (key, value))
        };

        if let Some((_, v)) = get("OUTPUT_DIR") {
            cfg.output_dir = PathBuf::from(v);
        }
        if let Some((_, v)) = get("USER_DATA_DIR") {
            cfg.user_data_dir = PathBuf::from(v);
        }
        if let Some((k, v)) = get("HEADLESS") {
            cfg.headless = parse_bool(&k, &v)?;
        }
        if let Some((k, v)) = get("MAX_TASKS") {
            cfg.max_tasks = parse_positive(&k, &v)?;
        }
        if let Some((k, v)) = get("CHUNK_THREADS") {
            cfg.chunk_threads = parse_positive(&k, &v)?;
        }
        if let Some((k, v)) = get("CHUNK_SIZE") {
            cfg.chunk_size = parse_positive(&k, &v)?;
        }
        if let Some((k, v)) = get("REQUEST_TIMEOUT_SECS") {
            cfg.request_timeout = Duration::from_secs(parse_positive(&k, &v)?);
        }
        if let Some((k, v)) = get("TASK_RETRIES") {
            cfg.task_retries = parse_value(&k, &v)?;
        }
        Ok(cfg)
    }

    pub fn download_config(&self) -> DownloadConfig {
        DownloadConfig {
            save_path: None,
            chunk_size: self.chunk_size,
            max_concurrent_chunks: self.chunk_threads,
            request_timeout: self.request_timeout,
        }
    }

    pub fn orchestrator_config(&self) -> OrchestratorConfig {
        OrchestratorConfig {
            output_dir: self.output_dir.clone(),
            max_concurrent_tasks: self.max_tasks,
            download: self.download_config(),
            max_task_retries: self.task_retries,
            retry_delay: self.retry_delay,
            skip_existing: true,
        }
    }

    pub fn gate_config(&self) -> GateConfig {
        GateConfig {
            navigation_timeout: self.navigation_timeout,
            poll_interval: self.poll_interval,
            ..GateConfig::default()
        }
    }
}

fn invalid(key: &str, value: &str) -> ConfigError {
    ConfigError::Invalid {
        key: key.to_string(),
        value: value.to_string(),
    }
}

fn parse_value<T: FromStr>(key: &str, value: &str) -> Result<T, ConfigError> {
    value.trim().parse::<T>().map_err(|_| invalid(key, value))
}

/// 解析为正整数（0 视为无效）
fn parse_positive<T>(key: &str, value: &str) -> Result<T, ConfigError>
where
    T: FromStr + PartialOrd + Default,
{
    let parsed: T = parse_value(key, value)?;
    if parsed <= T::default() {
        return Err(invalid(key, value));
    }
    Ok(parsed)
}

fn parse_bool(key: &str, value: &str) -> Result<bool, ConfigError> {
    match value.trim().to_ascii_lowercase().as_str() {
        "1" | "true" | "yes" | "on" => Ok(true),
        "0" | "false" | "no" | "off" => Ok(false),
        _ => Err(invalid(key, value)),
    }
}
