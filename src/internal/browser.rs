//! 浏览器抽象：关卡与凭证桥只依赖这里的能力 trait，不依赖具体的浏览器自动化运行时。
//!
//! 真实浏览器驱动在 `chromium` feature 下提供（[`drivers::chromium_session`]）。

pub mod structs;
pub mod traits;

#[cfg(feature = "chromium")]
pub mod drivers;
