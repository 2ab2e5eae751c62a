//! 分片下载：发起单段 Range 请求并校验状态码。

use reqwest::header::RANGE;
use reqwest::{Client, Response, StatusCode};

use crate::internal::downloader::structs::{ByteRange, DownloadError};

/// 发起单段 Range GET 请求，只接受 206；返回响应供调用方做 `bytes_stream()`。
pub async fn fetch_range_response(
    client: &Client,
    url: &str,
    range: ByteRange,
) -> Result<Response, DownloadError> {
    let header = range.header_value();
    let resp = client.get(url).header(RANGE, &header).send().await?;
    match resp.status() {
        StatusCode::PARTIAL_CONTENT => Ok(resp),
        StatusCode::OK => Err(DownloadError::RangeIgnored { range: header }),
        other => Err(DownloadError::UnexpectedStatus {
            range: header,
            status: other.as_u16(),
        }),
    }
}
