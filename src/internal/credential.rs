//! 凭证桥：把浏览器会话中的 Cookie 与 User-Agent 拍成不可变快照，交给独立的 HTTP 客户端使用。
//!
//! 快照是纯值，不持有浏览器引用；浏览器关闭后仍可用于下载。

pub mod functions;
pub mod structs;
