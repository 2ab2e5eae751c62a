use thiserror::Error;

#[derive(Debug, Error)]
pub enum CredentialError {
    #[error("请求头 {name} 含非法字符: {reason}")]
    InvalidHeader { name: &'static str, reason: String },

    #[error("创建 HTTP 客户端失败: {0}")]
    Client(#[from] reqwest::Error),
}
