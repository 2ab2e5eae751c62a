//! 断点续传：读取可信前缀长度；失败后把文件截断到连续完成的前缀。

use std::path::Path;

use tokio::fs::{self, OpenOptions};
use tracing::{debug, warn};

use crate::internal::downloader::structs::{ByteRange, DownloadError};

/// 目标文件当前长度中可信的部分。文件不存在为 0；长于 `total` 视为过期前缀，返回 0。
pub async fn trusted_prefix_len(path: &Path, total: u64) -> u64 {
    let local_len = fs::metadata(path).await.map(|m| m.len()).unwrap_or(0);
    if local_len > total {
        warn!(path = %path.display(), local_len, total, "本地文件长于远程大小，丢弃已有前缀");
        return 0;
    }
    local_len
}

/// 从 `trusted` 出发，沿已完成区间向后延伸，得到连续完成前缀的长度。
pub fn contiguous_prefix_len(trusted: u64, completed: &[ByteRange]) -> u64 {
    let mut sorted = completed.to_vec();
    sorted.sort();
    let mut end = trusted;
    for range in sorted {
        if range.start > end {
            break;
        }
        end = end.max(range.end + 1);
    }
    end
}

/// 把目标文件截断到 `len` 字节，使下次续传只信任真正写完的字节。
pub async fn truncate_to(path: &Path, len: u64) -> Result<(), DownloadError> {
    let file = OpenOptions::new()
        .write(true)
        .open(path)
        .await
        .map_err(DownloadError::WriteFile)?;
    file.set_len(len).await.map_err(DownloadError::WriteFile)?;
    debug!(path = %path.display(), len, "已截断到连续完成前缀");
    Ok(())
}

/// 预分配目标文件到 `total` 字节；保留已有前缀内容。
pub async fn presize(path: &Path, total: u64) -> Result<(), DownloadError> {
    let file = OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(false)
        .open(path)
        .await
        .map_err(DownloadError::CreateFile)?;
    file.set_len(total).await.map_err(DownloadError::CreateFile)?;
    Ok(())
}
