//! 分片下载引擎：探测远程资源，计算缺失字节区间，有界并发 Range 下载并按偏移写盘。
//!
//! 使用方式：`ChunkedDownloader::new(url, credentials).save_to(path).max_concurrent_chunks(8).send().await`
//!
//! 本地文件长度即续传信号：`[0, len-1]` 视为可信，仅下载其后的区间。失败或取消时文件被截断到
//! 连续完成的前缀，保证下次续传读到的长度不会虚高。

pub mod functions;
pub mod structs;
pub mod traits;
