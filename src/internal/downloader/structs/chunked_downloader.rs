//! 分片下载器
//!
//! ## 下载流程
//!
//! 1. HEAD 探测：`Content-Length` 给出总大小，`Accept-Ranges: bytes` 表示支持 Range；非 2xx 直接失败
//! 2. 总大小未知或为 0：整文件 GET 写入新截断的目标文件，不续传
//! 3. 服务器不支持 Range：同样整文件 GET（忽略已有前缀）
//! 4. 否则按目标文件现有长度计算缺失区间，预分配文件后并发下载，每个分片使用独立客户端与独立文件句柄
//!
//! ## 使用示例
//!
//! ```rust,no_run
//! # use std::sync::Arc;
//! # use h_downloader::credential::SessionCredentials;
//! # use h_downloader::downloader::ChunkedDownloader;
//! # async fn example(credentials: Arc<SessionCredentials>) -> Result<(), Box<dyn std::error::Error>> {
//! let path = ChunkedDownloader::new("https://example.com/v.mp4", credentials)
//!     .save_to("downloads/v.mp4.part")
//!     .max_concurrent_chunks(8)
//!     .with_on_bytes_hook(|n| println!("+{n}"))
//!     .send()
//!     .await?;
//! # Ok(())
//! # }
//! ```

mod chunked_download;
mod probe;
mod single_download;

use std::path::{Path, PathBuf};
use std::sync::Arc;
use std::time::Duration;

use tokio::sync::Mutex;
use tokio_util::sync::CancellationToken;
use tracing::{debug, info};

use crate::internal::credential::structs::SessionCredentials;
use crate::internal::downloader::traits::{DownloadHook, HookAbort};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::download_config::DownloadConfig;
use super::download_error::DownloadError;
use super::download_hooks_container::DownloadHooksContainer;
use super::download_progress::DownloadProgress;
use super::hook_adapters::{
    AfterCompleteHookAdapter, BeforeStartHookAdapter, OnBytesHookAdapter, OnProgressHookAdapter,
};
use chunked_download::{run_chunked_download, RunChunkedDownloadParams};
use single_download::{run_whole_body_download, WholeBodyParams};

/// 分片下载器
///
/// 拥有响应式属性（通过 `progress()` 获取）：已完成字节数（`bytes_done`）与探测到的总大小（`total`）。
pub struct ChunkedDownloader {
    pub(crate) url: String,
    pub(crate) credentials: Arc<SessionCredentials>,
    pub(crate) config: DownloadConfig,
    pub(crate) hooks: DownloadHooksContainer,
    pub(crate) progress_state: UnlockReactiveProperty<DownloadProgress>,
    pub(crate) cancel: CancellationToken,
}

impl ChunkedDownloader {
    pub fn new(url: impl Into<String>, credentials: Arc<SessionCredentials>) -> Self {
        Self {
            url: url.into(),
            credentials,
            config: DownloadConfig::default(),
            hooks: DownloadHooksContainer::default(),
            progress_state: UnlockReactiveProperty::new(DownloadProgress::default()),
            cancel: CancellationToken::new(),
        }
    }

    /// 设置保存路径（必填）。传空路径视为未设置。
    pub fn save_to(mut self, path: impl AsRef<Path>) -> Self {
        let p = path.as_ref();
        self.config.save_path = if p.as_os_str().is_empty() {
            None
        } else {
            Some(p.to_path_buf())
        };
        self
    }

    pub fn chunk_size(mut self, bytes: u64) -> Self {
        self.config.chunk_size = bytes;
        self
    }

    /// 设置最大分片并发数；最小为 1。
    pub fn max_concurrent_chunks(mut self, n: usize) -> Self {
        self.config.max_concurrent_chunks = n.max(1);
        self
    }

    pub fn request_timeout(mut self, timeout: Duration) -> Self {
        self.config.request_timeout = timeout;
        self
    }

    /// 整体替换配置（保存路径也随之替换）。
    pub fn with_config(mut self, config: DownloadConfig) -> Self {
        self.config = config;
        self
    }

    /// 取消令牌；取消后尚未开始的分片不再发起，进行中的分片立即中断。
    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// 注册「开始前」钩子；闭包返回 `Err(HookAbort)` 会中止本次下载。
    pub fn with_before_start_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = Result<(), HookAbort>> + Send + 'static,
    {
        self.hooks.add(BeforeStartHookAdapter(f));
        self
    }

    /// 注册「分片完成」钩子；参数为刚落盘的字节数。
    pub fn with_on_bytes_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(u64) + Send + Sync + 'static,
    {
        self.hooks.add(OnBytesHookAdapter(f));
        self
    }

    /// 注册「进度」钩子；参数为已完成字节数、总大小（可能未知为 `None`）。
    pub fn with_on_progress_hook<F>(mut self, f: F) -> Self
    where
        F: FnMut(u64, Option<u64>) + Send + Sync + 'static,
    {
        self.hooks.add(OnProgressHookAdapter(f));
        self
    }

    pub fn with_after_complete_hook<F, Fut>(mut self, f: F) -> Self
    where
        F: FnMut() -> Fut + Send + Sync + 'static,
        Fut: std::future::Future<Output = ()> + Send + 'static,
    {
        self.hooks.add(AfterCompleteHookAdapter(f));
        self
    }

    /// 添加完整钩子，在下载各阶段插入逻辑。
    pub fn with_hook(mut self, hook: impl DownloadHook + 'static) -> Self {
        self.hooks.add(hook);
        self
    }

    /// 内置的下载进度状态；返回可共享句柄，`.watch()` 后 `changed().await` 监听进度。
    pub fn progress(&self) -> UnlockReactiveProperty<DownloadProgress> {
        self.progress_state.clone()
    }

    /// 执行下载，成功后返回保存路径。
    pub async fn send(mut self) -> Result<PathBuf, DownloadError> {
        let save_path = self.config.save_path.clone().ok_or(DownloadError::NoDestination)?;
        if self.config.chunk_size == 0 {
            return Err(DownloadError::InvalidChunkSize);
        }
        if self.cancel.is_cancelled() {
            return Err(DownloadError::Cancelled);
        }

        self.hooks.run_before_start().await?;

        let client = self.credentials.build_client(self.config.request_timeout)?;
        let probe = probe::probe_remote(&client, &self.url).await?;
        debug!(url = %self.url, total = ?probe.total, accepts_ranges = probe.accepts_ranges, "探测完成");

        let hooks = Arc::new(Mutex::new(self.hooks));
        match probe.known_total() {
            Some(total) if probe.accepts_ranges => {
                run_chunked_download(RunChunkedDownloadParams {
                    url: self.url.clone(),
                    credentials: Arc::clone(&self.credentials),
                    save_path: save_path.clone(),
                    total,
                    config: self.config.clone(),
                    hooks: Arc::clone(&hooks),
                    progress: self.progress_state.clone(),
                    cancel: self.cancel.clone(),
                })
                .await?;
            }
            total => {
                run_whole_body_download(WholeBodyParams {
                    client: &client,
                    url: &self.url,
                    save_path: &save_path,
                    expected_total: total,
                    hooks: &hooks,
                    progress: &self.progress_state,
                    cancel: &self.cancel,
                })
                .await?;
            }
        }

        hooks.lock().await.run_after_complete().await;
        info!(url = %self.url, path = %save_path.display(), "下载完成");
        Ok(save_path)
    }
}
