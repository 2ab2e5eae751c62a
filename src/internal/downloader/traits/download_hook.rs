//! 下载流程钩子接口。

use async_trait::async_trait;

/// 钩子执行时请求中止下载时使用的错误。
#[derive(Debug, Clone)]
pub struct HookAbort;

impl std::fmt::Display for HookAbort {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str("下载被钩子中止")
    }
}

impl std::error::Error for HookAbort {}

/// 下载流程钩子：在「开始前 / 每个分片完成 / 进度 / 完成后」插入自定义逻辑。
///
/// 使用方式二选一（可混用）：
/// - **单阶段**：用 `with_before_start_hook` / `with_on_bytes_hook` / `with_on_progress_hook` / `with_after_complete_hook` 传入闭包；
/// - **完整钩子**：实现本 trait，通过下载器的 `with_hook` 注册。
#[async_trait]
pub trait DownloadHook: Send + Sync {
    /// 下载开始前调用。返回 `Err` 则中止本次下载。
    async fn before_start(&mut self) -> Result<(), HookAbort> {
        Ok(())
    }

    /// 每个分片完整落盘后调用一次，参数为该分片字节数；无分片的整文件下载结束时调用一次。
    fn on_bytes(&mut self, _bytes: u64) {}

    /// 进度更新（累计已完成字节、总大小）。
    fn on_progress(&mut self, _bytes_done: u64, _total: Option<u64>) {}

    /// 下载成功结束后调用。
    async fn after_complete(&mut self) {}
}
