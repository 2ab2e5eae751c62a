use std::path::PathBuf;
use std::time::Duration;

use crate::internal::downloader::structs::DownloadConfig;

/// 默认最大并发任务数
pub const DEFAULT_MAX_CONCURRENT_TASKS: usize = 3;

/// 默认任务级重试次数（不含首次）
pub const DEFAULT_MAX_TASK_RETRIES: u32 = 2;

/// 默认首次重试延迟，之后每次翻倍
pub const DEFAULT_RETRY_DELAY: Duration = Duration::from_secs(1);

#[derive(Debug, Clone)]
pub struct OrchestratorConfig {
    pub output_dir: PathBuf,
    pub max_concurrent_tasks: usize,
    /// 每个任务的分片引擎配置；`save_path` 由编排器按任务填写
    pub download: DownloadConfig,
    pub max_task_retries: u32,
    pub retry_delay: Duration,
    /// 最终文件已存在时直接记为成功
    pub skip_existing: bool,
}

impl Default for OrchestratorConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("downloads"),
            max_concurrent_tasks: DEFAULT_MAX_CONCURRENT_TASKS,
            download: DownloadConfig::default(),
            max_task_retries: DEFAULT_MAX_TASK_RETRIES,
            retry_delay: DEFAULT_RETRY_DELAY,
            skip_existing: true,
        }
    }
}

impl OrchestratorConfig {
    pub fn output_dir(mut self, dir: impl Into<PathBuf>) -> Self {
        self.output_dir = dir.into();
        self
    }

    /// 第 `attempt` 次重试前的等待（从 1 开始）：`retry_delay * 2^(attempt-1)`
    pub fn backoff_for(&self, attempt: u32) -> Duration {
        let factor = 1u32 << attempt.saturating_sub(1).min(16);
        self.retry_delay.saturating_mul(factor)
    }
}
