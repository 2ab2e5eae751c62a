use std::path::PathBuf;
use std::time::Duration;

/// 默认分片大小：4MB
pub const DEFAULT_CHUNK_SIZE: u64 = 4 * 1024 * 1024;

/// 默认最大并发分片数
pub const DEFAULT_MAX_CONCURRENT_CHUNKS: usize = 8;

/// 默认单个 HTTP 请求超时：120 秒
pub const DEFAULT_REQUEST_TIMEOUT: Duration = Duration::from_secs(120);

/// 本次下载的配置。
#[derive(Debug, Clone)]
pub struct DownloadConfig {
    pub save_path: Option<PathBuf>,
    /// 每个分片的大小（字节）
    pub chunk_size: u64,
    /// 同时进行的分片请求上限，而非总分片数
    pub max_concurrent_chunks: usize,
    pub request_timeout: Duration,
}

impl Default for DownloadConfig {
    fn default() -> Self {
        Self {
            save_path: None,
            chunk_size: DEFAULT_CHUNK_SIZE,
            max_concurrent_chunks: DEFAULT_MAX_CONCURRENT_CHUNKS,
            request_timeout: DEFAULT_REQUEST_TIMEOUT,
        }
    }
}
