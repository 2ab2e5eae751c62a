use std::time::Duration;

use super::challenge_signals::ChallengeSignals;

/// 默认页面导航超时：60 秒
pub const DEFAULT_NAVIGATION_TIMEOUT: Duration = Duration::from_secs(60);

/// 默认放行轮询间隔：1 秒
pub const DEFAULT_POLL_INTERVAL: Duration = Duration::from_secs(1);

/// 默认告警文案
pub const DEFAULT_ALERT_MESSAGE: &str = "触发 Cloudflare 拦截，请在弹出的浏览器窗口中手动完成验证！";

#[derive(Debug, Clone)]
pub struct GateConfig {
    pub navigation_timeout: Duration,
    pub poll_interval: Duration,
    /// 真实页面才会出现的选择器；命中即视为放行
    pub real_content_selector: Option<String>,
    pub signals: ChallengeSignals,
    /// 检测到挑战时交给通知器的文案
    pub alert_message: String,
}

impl Default for GateConfig {
    fn default() -> Self {
        Self {
            navigation_timeout: DEFAULT_NAVIGATION_TIMEOUT,
            poll_interval: DEFAULT_POLL_INTERVAL,
            real_content_selector: None,
            signals: ChallengeSignals::default(),
            alert_message: DEFAULT_ALERT_MESSAGE.to_string(),
        }
    }
}

impl GateConfig {
    pub fn real_content_selector(mut self, selector: impl Into<String>) -> Self {
        self.real_content_selector = Some(selector.into());
        self
    }
}
