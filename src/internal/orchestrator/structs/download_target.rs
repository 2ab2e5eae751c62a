use thiserror::Error;
use url::Url;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum TargetError {
    #[error("无效的下载地址 {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error("不支持的协议 {scheme}: {url}")]
    UnsupportedScheme { url: String, scheme: String },
}

/// 一个下载目标：直链、标题、是否为分段流。
///
/// 直链需已完整解码；构造时校验为绝对 `http`/`https` 地址。
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DownloadTarget {
    url: String,
    title: String,
    is_segmented_stream: bool,
}

impl DownloadTarget {
    /// URL 含 `.m3u8` 时自动标记为分段流。
    pub fn new(url: impl Into<String>, title: impl Into<String>) -> Result<Self, TargetError> {
        let url = url.into();
        let parsed = Url::parse(&url).map_err(|e| TargetError::InvalidUrl {
            url: url.clone(),
            reason: e.to_string(),
        })?;
        match parsed.scheme() {
            "http" | "https" => {}
            other => {
                return Err(TargetError::UnsupportedScheme {
                    url: url.clone(),
                    scheme: other.to_string(),
                });
            }
        }
        let is_segmented_stream = url.to_ascii_lowercase().contains(".m3u8");
        Ok(Self {
            url,
            title: title.into(),
            is_segmented_stream,
        })
    }

    pub fn segmented(mut self, is_segmented_stream: bool) -> Self {
        self.is_segmented_stream = is_segmented_stream;
        self
    }

    pub fn url(&self) -> &str {
        &self.url
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn is_segmented_stream(&self) -> bool {
        self.is_segmented_stream
    }
}
