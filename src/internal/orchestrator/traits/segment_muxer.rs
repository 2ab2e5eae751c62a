use std::path::Path;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use crate::internal::credential::structs::SessionCredentials;
use crate::internal::orchestrator::structs::MuxError;

/// 分段流（HLS 等）抓取器：把分段流拉取并合并写入 `destination`。
///
/// `destination` 是临时文件路径，成功后由编排器重命名为最终文件。未注册时编排器直接用分片引擎
/// 下载播放列表本身。
#[async_trait]
pub trait SegmentMuxer: Send + Sync {
    async fn fetch(
        &self,
        url: &str,
        destination: &Path,
        credentials: &SessionCredentials,
        cancel: &CancellationToken,
    ) -> Result<(), MuxError>;
}
