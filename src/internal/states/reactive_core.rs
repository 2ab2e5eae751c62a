//! # ReactiveProperty: 响应式属性内核
//!
//! 基于 [`tokio::sync::watch`] 的单值广播容器：写入方随时 `update`，监听方通过
//! [`PropertyWatcher::changed`] 异步拿到最新值。中间值可能被合并，只保证看到最新。
//!
//! 本模块不直接对外导出，外部统一使用 [`UnlockReactiveProperty`](super::unlock_reactive::UnlockReactiveProperty)。

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};
use thiserror::Error;
use tokio::sync::watch;
use tokio::sync::watch::error::RecvError;

// ──────────────────────────── Error ────────────────────────────

/// 响应式属性统一错误类型
#[derive(Debug, Error)]
pub enum ReactivePropertyError {
    /// 属性已被销毁，监听器不会再收到新值
    #[error("监听器已被销毁")]
    WatcherClosed,

    /// watch 通道接收失败
    #[error("接收失败: {0}")]
    RecvError(#[from] RecvError),
}

// ──────────────────────────── Inner ────────────────────────────

#[derive(Debug)]
pub(crate) struct Inner<T> {
    pub(crate) sender: watch::Sender<Option<T>>,
    pub(crate) is_dropped: AtomicBool,
}

impl<T> Drop for Inner<T> {
    fn drop(&mut self) {
        self.is_dropped.store(true, Ordering::Relaxed);
        // 发送 None 让仍在等待的监听器退出
        let _ = self.sender.send(None);
    }
}

// ──────────────────────────── ReactiveProperty ────────────────────────────

/// 响应式属性内核：new / update / update_field / get_current / watch。
///
/// Clone 后共享同一个值，所有句柄都析构后监听器收到 [`ReactivePropertyError::WatcherClosed`]。
#[derive(Clone, Debug)]
pub struct ReactiveProperty<T: Clone + Send + Sync> {
    pub(crate) inner: Arc<Inner<T>>,
    pub(crate) cache_receiver: watch::Receiver<Option<T>>,
}

impl<T> ReactiveProperty<T>
where
    T: Clone + Send + Sync,
{
    pub fn new(value: T) -> Self {
        let (sender, cache_receiver) = watch::channel(Some(value));
        Self {
            inner: Arc::new(Inner {
                sender,
                is_dropped: AtomicBool::new(false),
            }),
            cache_receiver,
        }
    }

    /// 覆盖当前值并通知所有监听者。没有监听者时也会更新缓存值。
    pub fn update(&self, new_value: T) -> &Self {
        if !self.inner.is_dropped.load(Ordering::Relaxed) {
            self.inner.sender.send_replace(Some(new_value));
        }
        self
    }

    /// 用闭包原地修改当前值；读改写在 watch 的锁内完成，并发调用不会丢失修改。
    pub fn update_field<F>(&self, updater: F) -> &Self
    where
        F: FnOnce(&mut T),
    {
        if self.inner.is_dropped.load(Ordering::Relaxed) {
            return self;
        }
        self.inner.sender.send_modify(|slot| {
            if let Some(value) = slot.as_mut() {
                updater(value);
            }
        });
        self
    }

    /// 当前值的快照（clone 一次）。
    pub fn get_current(&self) -> Option<T> {
        self.cache_receiver.borrow().as_ref().cloned()
    }

    /// 当前值，属性已销毁时返回默认值。
    pub fn get_or_default(&self) -> T
    where
        T: Default,
    {
        self.get_current().unwrap_or_default()
    }

    /// 创建监听器。
    pub fn watch(&self) -> PropertyWatcher<T> {
        PropertyWatcher {
            receiver: self.inner.sender.subscribe(),
        }
    }
}

// ──────────────────────────── PropertyWatcher ────────────────────────────

/// 属性监听器。
pub struct PropertyWatcher<T> {
    receiver: watch::Receiver<Option<T>>,
}

impl<T> PropertyWatcher<T>
where
    T: Clone + Send + Sync,
{
    /// 等待下一次变化并返回新值。
    pub async fn changed(&mut self) -> Result<T, ReactivePropertyError> {
        self.receiver.changed().await?;
        match self.receiver.borrow_and_update().as_ref() {
            None => Err(ReactivePropertyError::WatcherClosed),
            Some(value) => Ok(value.clone()),
        }
    }

    /// 同步读取当前值。
    pub fn borrow(&self) -> Option<T> {
        self.receiver.borrow().clone()
    }
}
