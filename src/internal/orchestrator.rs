//! 任务编排：在全局并发上限下运行多个下载任务，按目标顺序汇总成功与失败。
//!
//! 每个任务写入 `<标题><扩展名>.part`，全部区间写完后才重命名为最终文件；失败时保留 `.part` 供下次续传。

pub mod functions;
pub mod structs;
pub mod traits;
