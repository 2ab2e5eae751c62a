//! 响应式状态：下载进度、关卡状态、编排器活跃任务数等对外可监听的值都建立在这里。

pub mod reactive_core;
pub mod unlock_reactive;
