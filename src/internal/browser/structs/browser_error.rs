//! 浏览器层错误。

use thiserror::Error;

#[derive(Debug, Error)]
pub enum BrowserError {
    #[error("启动浏览器失败: {0}")]
    Launch(String),

    /// DNS 失败、连接被拒绝等硬性导航错误
    #[error("页面导航失败: {0}")]
    Navigation(String),

    #[error("浏览器协议调用失败: {0}")]
    Protocol(String),

    #[error("浏览器会话已关闭")]
    Closed,
}
