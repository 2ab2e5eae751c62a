use crate::internal::gate::impl_traits::{ForbiddenStatusIndicator, SelectorIndicator, TextIndicator};
use crate::internal::gate::traits::ChallengeIndicator;

/// Cloudflare 拦截时返回的状态码
pub const DEFAULT_FORBIDDEN_STATUS: u16 = 403;

/// 挑战页常见文本特征
pub const DEFAULT_INDICATOR_TEXTS: &[&str] = &["Just a moment", "cf-turnstile", "Checking your browser"];

/// 挑战页常见 DOM 特征
pub const DEFAULT_INDICATOR_SELECTORS: &[&str] = &[".cf-turnstile", "#challenge-running", "#challenge-form"];

/// 挑战特征信号，全部可由外部配置。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ChallengeSignals {
    pub forbidden_status: u16,
    pub indicator_texts: Vec<String>,
    pub indicator_selectors: Vec<String>,
}

impl Default for ChallengeSignals {
    fn default() -> Self {
        Self {
            forbidden_status: DEFAULT_FORBIDDEN_STATUS,
            indicator_texts: DEFAULT_INDICATOR_TEXTS.iter().map(|s| s.to_string()).collect(),
            indicator_selectors: DEFAULT_INDICATOR_SELECTORS.iter().map(|s| s.to_string()).collect(),
        }
    }
}

impl ChallengeSignals {
    /// 页面内容中是否还残留任一特征文本。
    pub fn content_has_indicator_text(&self, content: &str) -> bool {
        self.indicator_texts.iter().any(|t| content.contains(t.as_str()))
    }

    /// 展开成独立的检测谓词：状态码、每条文本、每个选择器各一个。
    pub fn indicators(&self) -> Vec<Box<dyn ChallengeIndicator>> {
        let mut out: Vec<Box<dyn ChallengeIndicator>> =
            vec![Box::new(ForbiddenStatusIndicator::new(self.forbidden_status))];
        for text in &self.indicator_texts {
            out.push(Box::new(TextIndicator::new(text.clone())));
        }
        for selector in &self.indicator_selectors {
            out.push(Box::new(SelectorIndicator::new(selector.clone())));
        }
        out
    }
}
