use thiserror::Error;

use crate::internal::downloader::structs::DownloadError;

#[derive(Debug, Error)]
#[error("分段流抓取失败: {0}")]
pub struct MuxError(pub String);

#[derive(Debug, Error)]
pub enum TaskError {
    #[error("{0}")]
    Download(#[from] DownloadError),

    #[error("{0}")]
    Mux(#[from] MuxError),

    #[error("创建输出目录失败: {0}")]
    OutputDir(std::io::Error),

    #[error("重命名临时文件失败: {0}")]
    Rename(std::io::Error),

    #[error("任务被取消")]
    Cancelled,
}

impl TaskError {
    /// 取消不重试
    pub fn is_retryable(&self) -> bool {
        match self {
            TaskError::Cancelled => false,
            TaskError::Download(e) => !e.is_cancelled(),
            _ => true,
        }
    }
}
