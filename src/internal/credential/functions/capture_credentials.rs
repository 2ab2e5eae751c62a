use tracing::debug;

use crate::internal::browser::structs::BrowserError;
use crate::internal::browser::traits::BrowserSession;
use crate::internal::credential::structs::SessionCredentials;

/// 从浏览器会话捕获凭证快照。只读取 Cookie 与 UA，不改变浏览器状态。
pub async fn capture_credentials<S>(session: &S) -> Result<SessionCredentials, BrowserError>
where
    S: BrowserSession + ?Sized,
{
    let cookies = session.cookies().await?;
    let user_agent = session.user_agent().await?;
    let credentials = SessionCredentials::new(cookies, user_agent);
    debug!(
        cookies = credentials.cookies().len(),
        fingerprint = %credentials.fingerprint(),
        "已捕获会话凭证"
    );
    Ok(credentials)
}
