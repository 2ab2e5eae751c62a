use thiserror::Error;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ConfigError {
    #[error("配置项 {key} 的值无效: {value:?}")]
    Invalid { key: String, value: String },
}
