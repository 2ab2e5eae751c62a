/// 关卡状态（由关卡内部维护，外部通过 `AntiBotGate::state()` 只读监听）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GateState {
    /// 尚未开始
    #[default]
    Idle,
    Navigating,
    ChallengeDetected,
    WaitingForClearance,
    /// 终态：放行
    Clear,
    /// 终态：硬性导航错误或被取消
    Failed,
}

impl GateState {
    pub fn is_terminal(&self) -> bool {
        matches!(self, GateState::Clear | GateState::Failed)
    }
}
