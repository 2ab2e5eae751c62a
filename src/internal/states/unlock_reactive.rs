//! # UnlockReactiveProperty
//!
//! 无锁读写的响应式属性，直接复用 [`super::reactive_core::ReactiveProperty`]。
//! 适合高频更新、只关心最新值的场景：下载进度、关卡状态、活跃任务数。
//!
//! ```rust,no_run
//! use h_downloader::states::unlock_reactive::UnlockReactiveProperty;
//!
//! let prop = UnlockReactiveProperty::new(0u64);
//! prop.update(1);
//! prop.update_field(|v| *v += 1);
//! assert_eq!(prop.get_current(), Some(2));
//! ```

pub use super::reactive_core::{PropertyWatcher, ReactivePropertyError as UnlockReactivePropertyError};

pub type UnlockReactiveProperty<T> = super::reactive_core::ReactiveProperty<T>;
