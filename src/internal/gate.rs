//! 反爬关卡：导航到目标页，检测挑战，挂起等待人工或自动放行，最后交出会话凭证。
//!
//! 状态流转：`Navigating → {ChallengeDetected → WaitingForClearance →} Clear`，硬性导航错误进入 `Failed`。
//!
//! 使用方式：`AntiBotGate::new(session, config).with_confirmation(c).pass(url).await`

pub mod impl_traits;
pub mod structs;
pub mod traits;
