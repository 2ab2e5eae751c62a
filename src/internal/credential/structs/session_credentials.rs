use core::fmt;
use std::sync::Arc;
use std::time::Duration;

use reqwest::{
    Client,
    header::{COOKIE, HeaderMap, HeaderValue, USER_AGENT},
};
use serde::{Deserialize, Serialize};
use sha2::{Digest, Sha256};

use super::cookie_record::CookieRecord;
use super::credential_error::CredentialError;

/// 无浏览器会话时使用的 User-Agent
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36 (KHTML, like Gecko) Chrome/124.0 Safari/537.36";

/// 会话凭证快照
///
/// - 捕获后只读，由所有下载任务通过 `Arc` 共享，无需加锁
/// - 不自动刷新：源站拒绝时需要重新过关卡拿新的凭证
///
/// 默认 Eq 比较指纹（Cookie 名值对 + UA 的 SHA-256），Debug 与日志只输出指纹
#[derive(Clone, Serialize, Deserialize)]
pub struct SessionCredentials {
    cookies: Arc<[CookieRecord]>,
    user_agent: String,
}

impl SessionCredentials {
    pub fn new(cookies: Vec<CookieRecord>, user_agent: impl Into<String>) -> Self {
        Self {
            cookies: cookies.into(),
            user_agent: user_agent.into(),
        }
    }

    /// 不带 Cookie 的凭证，用于不需要过关卡的源站
    pub fn anonymous(user_agent: Option<&str>) -> Self {
        Self::new(Vec::new(), user_agent.unwrap_or(DEFAULT_USER_AGENT))
    }

    pub fn cookies(&self) -> &[CookieRecord] {
        &self.cookies
    }

    pub fn user_agent(&self) -> &str {
        &self.user_agent
    }

    /// 重建 Cookie 请求头：`name=value; name=value`，跳过无名记录；没有可用 Cookie 时为 `None`
    pub fn cookie_header(&self) -> Option<String> {
        let pairs: Vec<String> = self
            .cookies
            .iter()
            .filter_map(CookieRecord::header_pair)
            .collect();
        if pairs.is_empty() {
            None
        } else {
            Some(pairs.join("; "))
        }
    }

    /// 凭证对应的请求头（User-Agent + Cookie）
    pub fn to_header_map(&self) -> Result<HeaderMap, CredentialError> {
        let mut headers = HeaderMap::new();

        let ua = HeaderValue::from_str(&self.user_agent).map_err(|e| {
            CredentialError::InvalidHeader {
                name: "User-Agent",
                reason: e.to_string(),
            }
        })?;
        headers.insert(USER_AGENT, ua);

        if let Some(cookie) = self.cookie_header() {
            let value = HeaderValue::from_str(&cookie).map_err(|e| {
                CredentialError::InvalidHeader {
                    name: "Cookie",
                    reason: e.to_string(),
                }
            })?;
            headers.insert(COOKIE, value);
        }

        Ok(headers)
    }

    /// 创建一个独立的 HTTP 客户端，默认携带凭证请求头；每次调用都是新的连接池
    pub fn build_client(&self, request_timeout: Duration) -> Result<Client, CredentialError> {
        let client = Client::builder()
            .default_headers(self.to_header_map()?)
            .timeout(request_timeout)
            .build()?;
        Ok(client)
    }

    /// 凭证指纹，用于比较与日志
    pub fn fingerprint(&self) -> String {
        let mut hasher = Sha256::new();
        for pair in self.cookies.iter().filter_map(CookieRecord::header_pair) {
            hasher.update(pair.as_bytes());
            hasher.update(b"\n");
        }
        hasher.update(self.user_agent.as_bytes());
        let digest = format!("{:x}", hasher.finalize());
        digest[..16].to_string()
    }
}

impl PartialEq for SessionCredentials {
    fn eq(&self, other: &Self) -> bool {
        self.fingerprint() == other.fingerprint()
    }
}

/// 防止 debug 泄漏 Cookie
impl fmt::Debug for SessionCredentials {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("SessionCredentials")
            .field("cookies", &self.cookies.len())
            .field("user_agent", &self.user_agent)
            .field("fingerprint", &self.fingerprint())
            .finish()
    }
}
