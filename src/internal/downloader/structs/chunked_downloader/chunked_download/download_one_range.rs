//! 分片下载：单段请求、写入对应偏移并校验字节数。

use std::path::PathBuf;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;
use std::time::Duration;

use futures_util::StreamExt;
use tokio::fs::OpenOptions;
use tokio::io::{AsyncSeekExt, AsyncWriteExt};
use tokio::sync::Mutex;

use crate::internal::credential::structs::SessionCredentials;
use crate::internal::downloader::structs::{
    ByteRange, DownloadError, DownloadHooksContainer, DownloadProgress,
};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::range_request::fetch_range_response;

/// 执行单段 Range 下载时的参数（形参超过 3 个，用 struct 承载）。
pub struct DownloadOneRangeParams {
    pub url: String,
    pub range: ByteRange,
    pub total: u64,
    pub save_path: PathBuf,
    pub credentials: Arc<SessionCredentials>,
    pub request_timeout: Duration,
    pub bytes_done: Arc<AtomicU64>,
    pub progress: UnlockReactiveProperty<DownloadProgress>,
    pub hooks: Arc<Mutex<DownloadHooksContainer>>,
}

/// 下载一个区间并写到文件对应偏移；成功返回该区间。
pub async fn download_one_range(params: DownloadOneRangeParams) -> Result<ByteRange, DownloadError> {
    let range = params.range;
    let expected = range.len();

    let client = params.credentials.build_client(params.request_timeout)?;
    let resp = fetch_range_response(&client, &params.url, range).await?;

    let mut file = OpenOptions::new()
        .write(true)
        .open(&params.save_path)
        .await
        .map_err(DownloadError::WriteFile)?;
    file.seek(std::io::SeekFrom::Start(range.start))
        .await
        .map_err(DownloadError::WriteFile)?;

    let mut stream = resp.bytes_stream();
    let mut received: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        let len = chunk.len() as u64;
        if received + len > expected {
            return Err(DownloadError::LengthMismatch {
                range: range.header_value(),
                expected,
                actual: received + len,
            });
        }
        file.write_all(&chunk).await.map_err(DownloadError::WriteFile)?;
        received += len;
    }
    if received != expected {
        return Err(DownloadError::LengthMismatch {
            range: range.header_value(),
            expected,
            actual: received,
        });
    }
    file.flush().await.map_err(DownloadError::WriteFile)?;

    let current = params.bytes_done.fetch_add(expected, Ordering::Relaxed) + expected;
    params.progress.update(DownloadProgress {
        bytes_done: current,
        total: Some(params.total),
    });
    let mut h = params.hooks.lock().await;
    h.run_on_bytes(expected);
    h.run_on_progress(current, Some(params.total));

    Ok(range)
}
