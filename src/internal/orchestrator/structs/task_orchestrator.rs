use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use tokio::sync::Semaphore;
use tokio::task::JoinSet;
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use crate::internal::credential::structs::SessionCredentials;
use crate::internal::downloader::structs::ChunkedDownloader;
use crate::internal::orchestrator::functions::{
    assign_unique_bases, find_part_file, infer_extension, part_path_for, sanitize_title,
};
use crate::internal::orchestrator::traits::SegmentMuxer;
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::batch_report::{BatchReport, FailedTask};
use super::download_target::DownloadTarget;
use super::orchestrator_config::OrchestratorConfig;
use super::task_error::TaskError;
use super::task_progress::TaskProgress;

type TaskProgressHook = Arc<dyn Fn(&TaskProgress) + Send + Sync>;

/// 任务编排器。
///
/// 拥有响应式属性 `active_tasks()`：当前正在执行（已取得并发许可）的任务数。
/// Clone 后共享同一取消令牌与活跃计数。
#[derive(Clone)]
pub struct TaskOrchestrator {
    credentials: Arc<SessionCredentials>,
    config: OrchestratorConfig,
    muxer: Option<Arc<dyn SegmentMuxer>>,
    progress_hooks: Vec<TaskProgressHook>,
    cancel: CancellationToken,
    active: UnlockReactiveProperty<usize>,
}

/// 活跃计数守卫：任务结束（含 panic 展开）时递减
struct ActiveGuard(UnlockReactiveProperty<usize>);

impl ActiveGuard {
    fn enter(active: &UnlockReactiveProperty<usize>) -> Self {
        active.update_field(|n| *n += 1);
        Self(active.clone())
    }
}

impl Drop for ActiveGuard {
    fn drop(&mut self) {
        self.0.update_field(|n| *n = n.saturating_sub(1));
    }
}

impl TaskOrchestrator {
    pub fn new(credentials: Arc<SessionCredentials>, config: OrchestratorConfig) -> Self {
        Self {
            credentials,
            config,
            muxer: None,
            progress_hooks: Vec::new(),
            cancel: CancellationToken::new(),
            active: UnlockReactiveProperty::new(0),
        }
    }

    /// 注册分段流抓取器；未注册时分段流按普通文件下载播放列表本身。
    pub fn with_segment_muxer(mut self, muxer: impl SegmentMuxer + 'static) -> Self {
        self.muxer = Some(Arc::new(muxer));
        self
    }

    /// 注册任务进度钩子；每个分片落盘后以该任务的累计字节数调用。
    pub fn with_on_task_progress_hook<F>(mut self, f: F) -> Self
    where
        F: Fn(&TaskProgress) + Send + Sync + 'static,
    {
        self.progress_hooks.push(Arc::new(f));
        self
    }

    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    pub fn cancel_token(&self) -> CancellationToken {
        self.cancel.clone()
    }

    pub fn active_tasks(&self) -> UnlockReactiveProperty<usize> {
        self.active.clone()
    }

    pub fn config(&self) -> &OrchestratorConfig {
        &self.config
    }

    /// 运行全部目标，同时执行的任务不超过 `max_concurrent_tasks`；单个任务失败不影响其它任务。
    ///
    /// 开始前为每个目标分配唯一的文件名主体，标题清洗后重名的目标不会写同一个文件。
    pub async fn run(&self, targets: Vec<DownloadTarget>) -> BatchReport {
        let titles: Vec<String> = targets.iter().map(|t| t.title().to_string()).collect();
        let bases = assign_unique_bases(titles.iter().map(String::as_str));
        let max_tasks = self.config.max_concurrent_tasks.max(1);
        info!(tasks = titles.len(), max_tasks, "开始批量下载");

        let semaphore = Arc::new(Semaphore::new(max_tasks));
        let mut set = JoinSet::new();
        for ((index, target), base) in targets.into_iter().enumerate().zip(bases) {
            if base != sanitize_title(target.title()) {
                info!(index, title = target.title(), file = %base, "标题重名，改用新的文件名");
            }
            let this = self.clone();
            let sem = Arc::clone(&semaphore);
            set.spawn(async move {
                let outcome = tokio::select! {
                    biased;
                    _ = this.cancel.cancelled() => Err(TaskError::Cancelled),
                    permit = sem.acquire_owned() => match permit {
                        Ok(_permit) => this.run_indexed(index, &target, &base).await,
                        Err(_) => Err(TaskError::Cancelled),
                    },
                };
                (index, outcome)
            });
        }

        let mut outcomes: Vec<Option<Result<PathBuf, String>>> = vec![None; titles.len()];
        while let Some(joined) = set.join_next().await {
            match joined {
                Ok((index, outcome)) => {
                    if let Some(slot) = outcomes.get_mut(index) {
                        *slot = Some(outcome.map_err(|e| e.to_string()));
                    }
                }
                Err(e) => warn!(error = %e, "下载任务异常退出"),
            }
        }

        let mut report = BatchReport::default();
        for (title, outcome) in titles.into_iter().zip(outcomes) {
            match outcome {
                Some(Ok(_)) => report.succeeded.push(title),
                Some(Err(reason)) => report.failed.push(FailedTask { title, reason }),
                None => report.failed.push(FailedTask {
                    title,
                    reason: "下载任务异常退出".to_string(),
                }),
            }
        }
        info!(
            succeeded = report.succeeded.len(),
            failed = report.failed.len(),
            "批量下载结束"
        );
        report
    }

    /// 运行单个目标，返回最终文件路径。
    pub async fn run_one(&self, target: &DownloadTarget) -> Result<PathBuf, TaskError> {
        let base = sanitize_title(target.title());
        self.run_indexed(0, target, &base).await
    }

    async fn run_indexed(
        &self,
        index: usize,
        target: &DownloadTarget,
        base: &str,
    ) -> Result<PathBuf, TaskError> {
        if self.cancel.is_cancelled() {
            return Err(TaskError::Cancelled);
        }
        let _guard = ActiveGuard::enter(&self.active);
        info!(index, title = target.title(), url = target.url(), "任务开始");

        let result = self.run_with_retry(index, target, base).await;
        match &result {
            Ok(path) => info!(index, path = %path.display(), "任务完成"),
            Err(e) => warn!(index, title = target.title(), error = %e, "任务失败"),
        }
        result
    }

    async fn run_with_retry(
        &self,
        index: usize,
        target: &DownloadTarget,
        base: &str,
    ) -> Result<PathBuf, TaskError> {
        let received = Arc::new(AtomicU64::new(0));
        let mut retries = 0;
        loop {
            match self.attempt(index, target, base, &received).await {
                Ok(path) => return Ok(path),
                Err(e) if e.is_retryable() && retries < self.config.max_task_retries => {
                    retries += 1;
                    let delay = self.config.backoff_for(retries);
                    warn!(
                        title = target.title(),
                        retry = retries,
                        max_retries = self.config.max_task_retries,
                        delay = ?delay,
                        error = %e,
                        "任务失败，稍后从已下载部分重试"
                    );
                    tokio::select! {
                        _ = tokio::time::sleep(delay) => {}
                        _ = self.cancel.cancelled() => return Err(TaskError::Cancelled),
                    }
                }
                Err(e) => return Err(e),
            }
        }
    }

    /// 一次完整尝试：定位路径、续传或新建临时文件、下载、重命名。
    async fn attempt(
        &self,
        index: usize,
        target: &DownloadTarget,
        base: &str,
        received: &Arc<AtomicU64>,
    ) -> Result<PathBuf, TaskError> {
        let output_dir = self.config.output_dir.as_path();
        tokio::fs::create_dir_all(output_dir)
            .await
            .map_err(TaskError::OutputDir)?;

        let ext = infer_extension(target.url(), target.is_segmented_stream());
        let final_path = output_dir.join(format!("{base}{ext}"));

        if self.config.skip_existing && tokio::fs::try_exists(&final_path).await.unwrap_or(false) {
            info!(path = %final_path.display(), "最终文件已存在，跳过");
            return Ok(final_path);
        }

        let part_path = match find_part_file(output_dir, base, ext).await {
            Some(existing) => {
                info!(path = %existing.display(), "发现临时文件，断点续传");
                existing
            }
            None => part_path_for(output_dir, base, ext),
        };

        match (&self.muxer, target.is_segmented_stream()) {
            (Some(muxer), true) => {
                muxer
                    .fetch(target.url(), &part_path, &self.credentials, &self.cancel)
                    .await?;
            }
            _ => self.download_into(index, target, &part_path, received).await?,
        }

        tokio::fs::rename(&part_path, &final_path)
            .await
            .map_err(TaskError::Rename)?;
        Ok(final_path)
    }

    async fn download_into(
        &self,
        index: usize,
        target: &DownloadTarget,
        part_path: &Path,
        received: &Arc<AtomicU64>,
    ) -> Result<(), TaskError> {
        let hooks = self.progress_hooks.clone();
        let title = target.title().to_string();
        let received = Arc::clone(received);

        ChunkedDownloader::new(target.url(), Arc::clone(&self.credentials))
            .with_config(self.config.download.clone())
            .save_to(part_path)
            .with_cancel_token(self.cancel.child_token())
            .with_on_bytes_hook(move |n| {
                let bytes_received = received.fetch_add(n, Ordering::Relaxed) + n;
                let progress = TaskProgress {
                    index,
                    title: title.clone(),
                    bytes_received,
                };
                for hook in &hooks {
                    hook(&progress);
                }
            })
            .send()
            .await?;
        Ok(())
    }
}
