//! 挑战检测谓词：每个谓词独立判断一种特征，关卡按顺序求值，任一命中即视为触发挑战。
//!
//! 新增特征只需实现本 trait 并通过 `AntiBotGate::with_indicator` 注册，无需改动状态机。

use async_trait::async_trait;

use crate::internal::browser::structs::ResponseObservation;
use crate::internal::browser::traits::PageSnapshot;

#[async_trait]
pub trait ChallengeIndicator: Send + Sync {
    /// 日志中使用的简短描述。
    fn describe(&self) -> String;

    /// 基于同一份页面快照判断是否命中。`content` 为本轮已取到的页面 HTML。
    async fn matches(
        &self,
        page: &dyn PageSnapshot,
        content: &str,
        responses: &ResponseObservation,
    ) -> bool;
}
