//! 响应观察器：记录当前导航期间浏览器收到的 HTTP 响应状态码。
//!
//! 浏览器驱动在每个响应到达时调用 [`ResponseMonitor::record`]；关卡在导航前 [`reset`](ResponseMonitor::reset)，
//! 检测与放行判断时读取 [`ResponseObservation`]。

use crate::internal::states::unlock_reactive::UnlockReactiveProperty;

/// 一次导航期间观察到的响应状态。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResponseObservation {
    /// 最近一个响应的状态码
    pub last_status: Option<u16>,
    /// 本次导航出现过的状态码（去重，按首次出现顺序）
    pub seen: Vec<u16>,
}

impl ResponseObservation {
    /// 本次导航是否出现过该状态码。
    pub fn has_seen(&self, status: u16) -> bool {
        self.seen.contains(&status)
    }

    /// 最近一个响应是否为该状态码。
    pub fn last_is(&self, status: u16) -> bool {
        self.last_status == Some(status)
    }
}

/// 可共享的响应观察句柄，Clone 后指向同一份观察结果。
#[derive(Debug, Clone)]
pub struct ResponseMonitor {
    state: UnlockReactiveProperty<ResponseObservation>,
}

impl Default for ResponseMonitor {
    fn default() -> Self {
        Self::new()
    }
}

impl ResponseMonitor {
    pub fn new() -> Self {
        Self {
            state: UnlockReactiveProperty::new(ResponseObservation::default()),
        }
    }

    /// 记录一个响应状态码。
    pub fn record(&self, status: u16) {
        self.state.update_field(|obs| {
            obs.last_status = Some(status);
            if !obs.seen.contains(&status) {
                obs.seen.push(status);
            }
        });
    }

    /// 开始新的导航前清空。
    pub fn reset(&self) {
        self.state.update(ResponseObservation::default());
    }

    pub fn snapshot(&self) -> ResponseObservation {
        self.state.get_or_default()
    }
}
