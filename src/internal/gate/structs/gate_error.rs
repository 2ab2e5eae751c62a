use std::time::Duration;

use thiserror::Error;

use crate::internal::browser::structs::BrowserError;

#[derive(Debug, Error)]
pub enum GateError {
    #[error("导航失败: {0}")]
    Navigation(#[source] BrowserError),

    #[error("页面加载超时（{timeout:?}）: {url}")]
    NavigationTimeout { url: String, timeout: Duration },

    #[error("浏览器操作失败: {0}")]
    Browser(#[from] BrowserError),

    #[error("等待放行被取消")]
    Cancelled,
}
