//! 分片下载：为每个区间 spawn 任务，以及等待全部任务完成。

use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::debug;

use crate::internal::downloader::structs::{ByteRange, DownloadError};

use super::download_one_range::{download_one_range, DownloadOneRangeParams};

/// 每个分片任务的产出：成功完成的区间
pub type RangeTaskSet = JoinSet<Result<ByteRange, DownloadError>>;

/// 为每个区间 spawn 一个任务。任务先取信号量许可再发请求，全程与 `abort` 竞争。
pub fn spawn_range_tasks(
    params: Vec<DownloadOneRangeParams>,
    semaphore: Arc<Semaphore>,
    abort: &CancellationToken,
) -> RangeTaskSet {
    let mut set = JoinSet::new();
    for p in params {
        let sem = Arc::clone(&semaphore);
        let abort = abort.clone();
        set.spawn(async move {
            let range = p.range;
            tokio::select! {
                biased;
                _ = abort.cancelled() => Err(DownloadError::Cancelled),
                res = async move {
                    let _permit = sem
                        .acquire_owned()
                        .await
                        .map_err(|_| DownloadError::Cancelled)?;
                    debug!(range = %range, "开始下载分片");
                    download_one_range(p).await
                } => res,
            }
        });
    }
    set
}

/// 等待所有分片任务；首个失败时触发 `abort` 并记录该错误，其余任务随之退出。
///
/// 返回成功完成的区间，以及首个非取消错误（全部被取消时为 `Cancelled`）。
pub async fn join_range_tasks(
    mut set: RangeTaskSet,
    abort: &CancellationToken,
) -> (Vec<ByteRange>, Option<DownloadError>) {
    let mut completed = Vec::new();
    let mut failure: Option<DownloadError> = None;

    while let Some(joined) = set.join_next().await {
        let result = joined.unwrap_or_else(|e| Err(DownloadError::TaskJoin(e)));
        match result {
            Ok(range) => completed.push(range),
            Err(e) => {
                abort.cancel();
                failure = match failure {
                    Some(prev) if !prev.is_cancelled() => Some(prev),
                    _ => Some(e),
                };
            }
        }
    }
    (completed, failure)
}
