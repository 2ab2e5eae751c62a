//! 下载相关错误类型。

use thiserror::Error;

use crate::internal::credential::structs::CredentialError;
use crate::internal::downloader::traits::HookAbort;

#[derive(Debug, Error)]
pub enum DownloadError {
    #[error("HTTP 请求失败: {0}")]
    Request(#[from] reqwest::Error),

    #[error("构建 HTTP 客户端失败: {0}")]
    Credential(#[from] CredentialError),

    #[error("元数据探测失败: HTTP {status}")]
    Probe { status: u16 },

    #[error("分片 {range} 返回异常状态码: HTTP {status}")]
    UnexpectedStatus { range: String, status: u16 },

    /// 服务器对 Range 请求返回了 200 整文件
    #[error("服务器忽略了 Range 请求: {range}")]
    RangeIgnored { range: String },

    #[error("分片 {range} 字节数不符: 期望 {expected}，实际 {actual}")]
    LengthMismatch { range: String, expected: u64, actual: u64 },

    #[error("创建文件失败: {0}")]
    CreateFile(std::io::Error),

    #[error("写入文件失败: {0}")]
    WriteFile(std::io::Error),

    #[error("未设置保存路径")]
    NoDestination,

    #[error("分片大小必须大于 0")]
    InvalidChunkSize,

    #[error("下载被取消")]
    Cancelled,

    /// 分片任务 join 失败。
    #[error("分片任务失败: {0}")]
    TaskJoin(#[from] tokio::task::JoinError),

    /// 钩子在 before_start 中返回错误，中止下载。
    #[error("{0}")]
    HookAbort(#[from] HookAbort),
}

impl DownloadError {
    pub fn is_cancelled(&self) -> bool {
        matches!(self, DownloadError::Cancelled)
    }
}
