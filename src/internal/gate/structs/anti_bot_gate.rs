use std::sync::Arc;

use tokio_util::sync::CancellationToken;
use tracing::{debug, info, warn};

use crate::internal::browser::traits::{BrowserSession, PageSnapshot};
use crate::internal::credential::functions::capture_credentials;
use crate::internal::credential::structs::SessionCredentials;
use crate::internal::gate::impl_traits::ConsoleNotifier;
use crate::internal::gate::traits::{ChallengeIndicator, OperatorConfirmation, OperatorNotifier};
use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

use super::gate_config::GateConfig;
use super::gate_error::GateError;
use super::gate_state::GateState;

/// 反爬关卡。
///
/// 持有浏览器会话的共享引用，放行后调用方仍可继续用同一会话抓取页面。
pub struct AntiBotGate<S> {
    session: Arc<S>,
    config: GateConfig,
    indicators: Vec<Box<dyn ChallengeIndicator>>,
    notifier: Box<dyn OperatorNotifier>,
    confirmation: Option<Box<dyn OperatorConfirmation>>,
    cancel: CancellationToken,
    state: UnlockReactiveProperty<GateState>,
}

impl<S> AntiBotGate<S>
where
    S: BrowserSession + 'static,
{
    pub fn new(session: Arc<S>, config: GateConfig) -> Self {
        let indicators = config.signals.indicators();
        Self {
            session,
            config,
            indicators,
            notifier: Box::new(ConsoleNotifier),
            confirmation: None,
            cancel: CancellationToken::new(),
            state: UnlockReactiveProperty::new(GateState::Idle),
        }
    }

    /// 替换检测到挑战时的通知器（闭包亦可）
    pub fn with_notifier(mut self, notifier: impl OperatorNotifier + 'static) -> Self {
        self.notifier = Box::new(notifier);
        self
    }

    /// 设置人工确认来源；不设置时只依赖自动检测
    pub fn with_confirmation(mut self, confirmation: impl OperatorConfirmation + 'static) -> Self {
        self.confirmation = Some(Box::new(confirmation));
        self
    }

    /// 追加一个自定义挑战检测谓词
    pub fn with_indicator(mut self, indicator: impl ChallengeIndicator + 'static) -> Self {
        self.indicators.push(Box::new(indicator));
        self
    }

    pub fn with_cancel_token(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// 关卡状态（只读监听用）
    pub fn state(&self) -> UnlockReactiveProperty<GateState> {
        self.state.clone()
    }

    pub fn session(&self) -> &Arc<S> {
        &self.session
    }

    /// 导航到 `url` 并确保页面放行，返回放行后的会话凭证。
    pub async fn pass(&self, url: &str) -> Result<SessionCredentials, GateError> {
        let result = self.run(url).await;
        if let Err(e) = &result {
            warn!(url, error = %e, "关卡失败");
            self.transition(GateState::Failed);
        }
        result
    }

    async fn run(&self, url: &str) -> Result<SessionCredentials, GateError> {
        self.transition(GateState::Navigating);
        self.session.responses().reset();
        self.navigate(url).await?;

        if self.detect_challenge().await? {
            self.transition(GateState::ChallengeDetected);
            self.notifier.notify(&self.config.alert_message);
            self.transition(GateState::WaitingForClearance);
            self.wait_for_clearance().await?;
        }

        self.transition(GateState::Clear);
        let credentials = capture_credentials(self.session.as_ref()).await?;
        info!(url, fingerprint = %credentials.fingerprint(), "关卡已放行");
        Ok(credentials)
    }

    async fn navigate(&self, url: &str) -> Result<(), GateError> {
        let timeout = self.config.navigation_timeout;
        tokio::select! {
            res = tokio::time::timeout(timeout, self.session.navigate(url)) => match res {
                Err(_) => Err(GateError::NavigationTimeout { url: url.to_string(), timeout }),
                Ok(Err(e)) => Err(GateError::Navigation(e)),
                Ok(Ok(())) => Ok(()),
            },
            _ = self.cancel.cancelled() => Err(GateError::Cancelled),
        }
    }

    /// 对同一份页面快照依次求值所有谓词，任一命中即返回 true
    async fn detect_challenge(&self) -> Result<bool, GateError> {
        let content = self.session.content().await?;
        let responses = self.session.responses().snapshot();
        let page: &dyn PageSnapshot = self.session.as_ref();
        for indicator in &self.indicators {
            if indicator.matches(page, &content, &responses).await {
                warn!(indicator = %indicator.describe(), "检测到反爬挑战");
                return Ok(true);
            }
        }
        Ok(false)
    }

    async fn wait_for_clearance(&self) -> Result<(), GateError> {
        tokio::select! {
            _ = self.poll_until_clear() => {
                info!("自动检测到挑战已解除");
                Ok(())
            }
            _ = self.wait_operator() => {
                info!("操作者已确认放行");
                Ok(())
            }
            _ = self.cancel.cancelled() => Err(GateError::Cancelled),
        }
    }

    async fn wait_operator(&self) {
        match &self.confirmation {
            Some(confirmation) => confirmation.confirmed().await,
            None => std::future::pending().await,
        }
    }

    async fn poll_until_clear(&self) {
        loop {
            tokio::time::sleep(self.config.poll_interval).await;
            if self.is_cleared().await {
                return;
            }
        }
    }

    /// 放行判定：真实内容选择器出现；或最近响应不再是拦截状态码且特征文本消失。
    ///
    /// 挑战页自身会不断跳转，查询失败只当作“尚未放行”。
    async fn is_cleared(&self) -> bool {
        if let Some(selector) = &self.config.real_content_selector {
            match self.session.selector_count(selector).await {
                Ok(n) if n > 0 => return true,
                Ok(_) => {}
                Err(e) => debug!(selector = %selector, error = %e, "真实内容选择器查询失败"),
            }
        }

        let responses = self.session.responses().snapshot();
        if responses.last_is(self.config.signals.forbidden_status) {
            return false;
        }

        match self.session.content().await {
            Ok(content) => !self.config.signals.content_has_indicator_text(&content),
            Err(e) => {
                debug!(error = %e, "读取页面内容失败");
                false
            }
        }
    }

    fn transition(&self, next: GateState) {
        debug!(state = ?next, "关卡状态变更");
        self.state.update(next);
    }
}
