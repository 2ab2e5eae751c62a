//! HEAD 元数据探测。

use reqwest::header::{ACCEPT_RANGES, CONTENT_LENGTH};
use reqwest::Client;

use crate::internal::downloader::structs::{DownloadError, RemoteProbe};

/// 发送 HEAD 请求，读取总大小与 Range 支持。
///
/// `Content-Length` 直接从响应头解析：HEAD 响应没有响应体，不能依赖 body 长度。
pub(super) async fn probe_remote(client: &Client, url: &str) -> Result<RemoteProbe, DownloadError> {
    let resp = client.head(url).send().await?;
    let status = resp.status();
    if !status.is_success() {
        return Err(DownloadError::Probe { status: status.as_u16() });
    }

    let headers = resp.headers();
    let total = headers
        .get(CONTENT_LENGTH)
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.trim().parse::<u64>().ok());
    let accepts_ranges = headers
        .get(ACCEPT_RANGES)
        .and_then(|v| v.to_str().ok())
        .map(|v| v.trim().eq_ignore_ascii_case("bytes"))
        .unwrap_or(false);

    Ok(RemoteProbe { total, accepts_ranges })
}
