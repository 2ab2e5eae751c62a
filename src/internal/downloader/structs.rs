pub mod byte_range;
pub mod chunked_downloader;
pub mod download_config;
pub mod download_error;
pub mod download_hooks_container;
pub mod download_progress;
pub(crate) mod hook_adapters;
pub mod remote_probe;

pub use byte_range::ByteRange;
pub use chunked_downloader::ChunkedDownloader;
pub use download_config::{
    DownloadConfig, DEFAULT_CHUNK_SIZE, DEFAULT_MAX_CONCURRENT_CHUNKS, DEFAULT_REQUEST_TIMEOUT,
};
pub use download_error::DownloadError;
pub use download_hooks_container::DownloadHooksContainer;
pub use download_progress::DownloadProgress;
pub use remote_probe::RemoteProbe;
