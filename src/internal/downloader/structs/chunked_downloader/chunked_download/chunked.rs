//! 分片下载：计算缺失区间 + 预分配 + 有界并发写文件 + 失败截断。

use std::path::PathBuf;
use std::sync::atomic::AtomicU64;
use std::sync::Arc;

use tokio::sync::{Mutex, Semaphore};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::internal::credential::structs::SessionCredentials;
use crate::internal::downloader::functions::plan_ranges;
use crate::internal::downloader::structs::{
    DownloadConfig, DownloadError, DownloadHooksContainer, DownloadProgress,
};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::download_one_range::DownloadOneRangeParams;
use super::resume::{contiguous_prefix_len, presize, trusted_prefix_len, truncate_to};
use super::spawn_tasks::{join_range_tasks, spawn_range_tasks};

/// 分片下载入口参数（形参超过 3 个，用 struct 承载）。
pub struct RunChunkedDownloadParams {
    pub url: String,
    pub credentials: Arc<SessionCredentials>,
    pub save_path: PathBuf,
    pub total: u64,
    pub config: DownloadConfig,
    pub hooks: Arc<Mutex<DownloadHooksContainer>>,
    pub progress: UnlockReactiveProperty<DownloadProgress>,
    pub cancel: CancellationToken,
}

/// 分片下载入口：已知 size 且支持 Range。
pub(crate) async fn run_chunked_download(params: RunChunkedDownloadParams) -> Result<(), DownloadError> {
    let total = params.total;
    let trusted = trusted_prefix_len(&params.save_path, total).await;
    let plan = plan_ranges(total, params.config.chunk_size, trusted, true);
    debug!(total, trusted, windows = plan.len(), "分片计划");

    params.progress.update(DownloadProgress {
        bytes_done: trusted,
        total: Some(total),
    });
    if plan.is_empty() {
        debug!(path = %params.save_path.display(), "本地文件已完整，跳过下载");
        return Ok(());
    }

    presize(&params.save_path, total).await?;

    let bytes_done = Arc::new(AtomicU64::new(trusted));
    let semaphore = Arc::new(Semaphore::new(params.config.max_concurrent_chunks.max(1)));
    let abort = params.cancel.child_token();

    let tasks = plan
        .into_iter()
        .map(|range| DownloadOneRangeParams {
            url: params.url.clone(),
            range,
            total,
            save_path: params.save_path.clone(),
            credentials: Arc::clone(&params.credentials),
            request_timeout: params.config.request_timeout,
            bytes_done: Arc::clone(&bytes_done),
            progress: params.progress.clone(),
            hooks: Arc::clone(&params.hooks),
        })
        .collect();

    let set = spawn_range_tasks(tasks, semaphore, &abort);
    let (completed, failure) = join_range_tasks(set, &abort).await;

    match failure {
        None => Ok(()),
        Some(e) => {
            let keep = contiguous_prefix_len(trusted, &completed);
            warn!(path = %params.save_path.display(), keep, error = %e, "分片下载失败，截断到连续完成前缀");
            if let Err(te) = truncate_to(&params.save_path, keep).await {
                warn!(error = %te, "截断失败");
            }
            Err(e)
        }
    }
}
