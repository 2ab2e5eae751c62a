mod chunked;
mod download_one_range;
mod range_request;
mod resume;
mod spawn_tasks;

pub(super) use chunked::{run_chunked_download, RunChunkedDownloadParams};
