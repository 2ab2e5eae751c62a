//! 操作者交互：检测到挑战时的通知，以及可选的人工确认放行。

use async_trait::async_trait;

/// 检测到挑战时同步调用一次。
pub trait OperatorNotifier: Send + Sync {
    fn notify(&self, message: &str);
}

/// 闭包即通知器
impl<F> OperatorNotifier for F
where
    F: Fn(&str) + Send + Sync,
{
    fn notify(&self, message: &str) {
        self(message)
    }
}

/// 人工确认放行：future 完成即表示操作者确认挑战已解决。
///
/// 与自动检测并发等待，先到者生效；无法确认时（如 stdin 已关闭）应永远挂起而不是立即返回。
#[async_trait]
pub trait OperatorConfirmation: Send + Sync {
    async fn confirmed(&self);
}
