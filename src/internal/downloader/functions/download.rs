use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::internal::credential::structs::SessionCredentials;
use crate::internal::downloader::structs::{ChunkedDownloader, DownloadError};

/// 便捷入口：等价于 `ChunkedDownloader` 的链式调用。
///
/// `on_bytes` 在每个分片完整落盘后以该分片字节数调用一次；整文件下载时在结束时调用一次。
pub async fn download<F>(
    url: &str,
    destination: impl AsRef<Path>,
    credentials: Arc<SessionCredentials>,
    chunk_size: u64,
    max_concurrent_chunks: usize,
    on_bytes: F,
) -> Result<PathBuf, DownloadError>
where
    F: FnMut(u64) + Send + Sync + 'static,
{
    ChunkedDownloader::new(url, credentials)
        .save_to(destination)
        .chunk_size(chunk_size)
        .max_concurrent_chunks(max_concurrent_chunks)
        .with_on_bytes_hook(on_bytes)
        .send()
        .await
}
