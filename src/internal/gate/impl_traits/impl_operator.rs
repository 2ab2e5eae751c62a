use std::sync::Arc;

use async_trait::async_trait;
use tokio::sync::Notify;
use tracing::{debug, warn};

use crate::internal::gate::traits::{OperatorConfirmation, OperatorNotifier};

/// 默认通知器：在 stderr 打印醒目横幅
#[derive(Debug, Clone, Copy, Default)]
pub struct ConsoleNotifier;

impl OperatorNotifier for ConsoleNotifier {
    fn notify(&self, message: &str) {
        let line = "=".repeat(60);
        eprintln!("\n{line}\n🚨 {message}\n{line}\n");
    }
}

/// 从标准输入读取一行即视为确认。stdin 关闭或读取失败时永远挂起，交给自动检测。
#[derive(Debug, Clone)]
pub struct StdinConfirmation {
    prompt: Option<String>,
}

impl Default for StdinConfirmation {
    fn default() -> Self {
        Self {
            prompt: Some("完成验证后按回车继续...".to_string()),
        }
    }
}

impl StdinConfirmation {
    pub fn new(prompt: Option<String>) -> Self {
        Self { prompt }
    }
}

#[async_trait]
impl OperatorConfirmation for StdinConfirmation {
    async fn confirmed(&self) {
        if let Some(prompt) = &self.prompt {
            eprintln!("{prompt}");
        }
        let read = tokio::task::spawn_blocking(|| {
            let mut line = String::new();
            std::io::stdin().read_line(&mut line)
        })
        .await;

        match read {
            Ok(Ok(n)) if n > 0 => return,
            Ok(Ok(_)) => debug!("stdin 已关闭，改为仅依赖自动检测"),
            Ok(Err(e)) => warn!(error = %e, "读取 stdin 失败，改为仅依赖自动检测"),
            Err(e) => warn!(error = %e, "stdin 读取任务异常退出"),
        }
        std::future::pending::<()>().await
    }
}

/// 程序化确认句柄：Clone 后共享，任意一方调用 [`confirm`](Self::confirm) 即放行。
///
/// 在等待开始前调用也有效（许可会被保留）。
#[derive(Debug, Clone, Default)]
pub struct ManualConfirmation {
    notify: Arc<Notify>,
}

impl ManualConfirmation {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn confirm(&self) {
        self.notify.notify_one();
    }
}

#[async_trait]
impl OperatorConfirmation for ManualConfirmation {
    async fn confirmed(&self) {
        self.notify.notified().await;
    }
}
