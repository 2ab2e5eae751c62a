use async_trait::async_trait;
use tracing::debug;

use crate::internal::browser::structs::ResponseObservation;
use crate::internal::browser::traits::PageSnapshot;
use crate::internal::gate::traits::ChallengeIndicator;

/// 本次导航出现过指定状态码（默认 403）
#[derive(Debug, Clone)]
pub struct ForbiddenStatusIndicator {
    status: u16,
}

impl ForbiddenStatusIndicator {
    pub fn new(status: u16) -> Self {
        Self { status }
    }
}

#[async_trait]
impl ChallengeIndicator for ForbiddenStatusIndicator {
    fn describe(&self) -> String {
        format!("status={}", self.status)
    }

    async fn matches(&self, _page: &dyn PageSnapshot, _content: &str, responses: &ResponseObservation) -> bool {
        responses.has_seen(self.status)
    }
}

/// 页面 HTML 中包含指定文本
#[derive(Debug, Clone)]
pub struct TextIndicator {
    text: String,
}

impl TextIndicator {
    pub fn new(text: impl Into<String>) -> Self {
        Self { text: text.into() }
    }
}

#[async_trait]
impl ChallengeIndicator for TextIndicator {
    fn describe(&self) -> String {
        format!("text={:?}", self.text)
    }

    async fn matches(&self, _page: &dyn PageSnapshot, content: &str, _responses: &ResponseObservation) -> bool {
        content.contains(self.text.as_str())
    }
}

/// 页面中存在匹配选择器的元素。查询出错按未命中处理。
#[derive(Debug, Clone)]
pub struct SelectorIndicator {
    selector: String,
}

impl SelectorIndicator {
    pub fn new(selector: impl Into<String>) -> Self {
        Self { selector: selector.into() }
    }
}

#[async_trait]
impl ChallengeIndicator for SelectorIndicator {
    fn describe(&self) -> String {
        format!("selector={:?}", self.selector)
    }

    async fn matches(&self, page: &dyn PageSnapshot, _content: &str, _responses: &ResponseObservation) -> bool {
        match page.selector_count(&self.selector).await {
            Ok(count) => count > 0,
            Err(e) => {
                debug!(selector = %self.selector, error = %e, "选择器查询失败，按未命中处理");
                false
            }
        }
    }
}
