//! 整文件下载：总大小未知、为 0，或服务器不支持 Range 时使用。

use std::path::Path;
use std::sync::Arc;

use futures_util::StreamExt;
use reqwest::Client;
use tokio::fs::File;
use tokio::io::AsyncWriteExt;
use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::internal::downloader::structs::{DownloadError, DownloadHooksContainer, DownloadProgress};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

/// 整文件下载时的参数（形参超过 3 个，用 struct 承载）。
pub(super) struct WholeBodyParams<'a> {
    pub client: &'a Client,
    pub url: &'a str,
    pub save_path: &'a Path,
    /// 已知总大小时校验收到的字节数
    pub expected_total: Option<u64>,
    pub hooks: &'a Arc<Mutex<DownloadHooksContainer>>,
    pub progress: &'a UnlockReactiveProperty<DownloadProgress>,
    pub cancel: &'a CancellationToken,
}

/// 单个不带 Range 的 GET，流式写入新截断的目标文件；字节数在结束时一次性上报。
pub(super) async fn run_whole_body_download(params: WholeBodyParams<'_>) -> Result<u64, DownloadError> {
    params.progress.update(DownloadProgress {
        bytes_done: 0,
        total: params.expected_total,
    });
    debug!(url = params.url, total = ?params.expected_total, "整文件下载");

    let received = tokio::select! {
        res = stream_to_file(&params) => res?,
        _ = params.cancel.cancelled() => return Err(DownloadError::Cancelled),
    };

    if let Some(expected) = params.expected_total {
        if received != expected {
            return Err(DownloadError::LengthMismatch {
                range: "whole".to_string(),
                expected,
                actual: received,
            });
        }
    }

    params.progress.update(DownloadProgress {
        bytes_done: received,
        total: Some(received),
    });
    let mut h = params.hooks.lock().await;
    h.run_on_bytes(received);
    h.run_on_progress(received, Some(received));

    Ok(received)
}

async fn stream_to_file(params: &WholeBodyParams<'_>) -> Result<u64, DownloadError> {
    let resp = params.client.get(params.url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DownloadError::UnexpectedStatus {
            range: "whole".to_string(),
            status: status.as_u16(),
        });
    }

    let mut file = File::create(params.save_path)
        .await
        .map_err(DownloadError::CreateFile)?;
    let mut stream = resp.bytes_stream();
    let mut received: u64 = 0;
    while let Some(chunk) = stream.next().await {
        let chunk = chunk?;
        file.write_all(&chunk).await.map_err(DownloadError::WriteFile)?;
        received += chunk.len() as u64;
    }
    file.flush().await.map_err(DownloadError::WriteFile)?;
    Ok(received)
}
