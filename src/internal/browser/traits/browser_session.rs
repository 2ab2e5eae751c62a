//! 浏览器会话能力 trait。
//!
//! - [`PageSnapshot`]：对当前页面的只读查询（HTML 内容、选择器命中数），关卡的挑战检测只用它。
//! - [`BrowserSession`]：在快照能力之上增加导航、响应观察、Cookie 与 UA 提取。

use async_trait::async_trait;

use crate::internal::browser::structs::{BrowserError, ResponseMonitor};
use crate::internal::credential::structs::CookieRecord;

/// 当前页面的只读快照能力。
#[async_trait]
pub trait PageSnapshot: Send + Sync {
    /// 当前页面渲染后的 HTML。
    async fn content(&self) -> Result<String, BrowserError>;

    /// 当前页面中匹配 CSS 选择器的元素个数。
    async fn selector_count(&self, selector: &str) -> Result<usize, BrowserError>;
}

/// 可导航的浏览器会话。
#[async_trait]
pub trait BrowserSession: PageSnapshot {
    /// 加载页面。超时由调用方控制（丢弃该 future 即放弃等待）。
    async fn navigate(&self, url: &str) -> Result<(), BrowserError>;

    /// 会话的响应观察器；驱动负责把收到的每个响应状态写进去。
    fn responses(&self) -> ResponseMonitor;

    /// 浏览器上下文中的全部 Cookie。不得修改浏览器状态。
    async fn cookies(&self) -> Result<Vec<CookieRecord>, BrowserError>;

    /// 页面实际使用的 User-Agent。
    async fn user_agent(&self) -> Result<String, BrowserError>;
}
