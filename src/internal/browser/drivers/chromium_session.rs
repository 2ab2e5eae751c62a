//! 基于 chromiumoxide 的真实浏览器会话。
//!
//! 使用持久化用户数据目录启动 Chromium（Cookie 跨次保留，减少重复验证），并监听页面的文档响应状态码。

use std::path::PathBuf;

use async_trait::async_trait;
use chrono::{DateTime, Utc};
use chromiumoxide::cdp::browser_protocol::network::{
    Cookie, EnableParams, EventResponseReceived, ResourceType,
};
use chromiumoxide::{Browser, BrowserConfig, Page};
use futures_util::StreamExt;
use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::{debug, info};

use crate::internal::browser::structs::{BrowserError, ResponseMonitor};
use crate::internal::browser::traits::{BrowserSession, PageSnapshot};
use crate::internal::credential::structs::CookieRecord;

#[derive(Debug, Clone)]
pub struct ChromiumOptions {
    pub user_data_dir: PathBuf,
    /// 默认有头，方便人工完成验证
    pub headless: bool,
    pub window_size: (u32, u32),
}

impl ChromiumOptions {
    pub fn new(user_data_dir: impl Into<PathBuf>) -> Self {
        Self {
            user_data_dir: user_data_dir.into(),
            headless: false,
            window_size: (1280, 720),
        }
    }

    pub fn headless(mut self, headless: bool) -> Self {
        self.headless = headless;
        self
    }
}

pub struct ChromiumSession {
    browser: Mutex<Browser>,
    page: Page,
    monitor: ResponseMonitor,
    handler_task: JoinHandle<()>,
    listener_task: JoinHandle<()>,
}

impl ChromiumSession {
    /// 启动浏览器并打开一个空白页。
    pub async fn launch(options: ChromiumOptions) -> Result<Self, BrowserError> {
        tokio::fs::create_dir_all(&options.user_data_dir)
            .await
            .map_err(|e| BrowserError::Launch(format!("创建用户数据目录失败: {e}")))?;

        let (width, height) = options.window_size;
        let builder = BrowserConfig::builder()
            .user_data_dir(&options.user_data_dir)
            .window_size(width, height);
        let builder = if options.headless { builder } else { builder.with_head() };
        let config = builder.build().map_err(BrowserError::Launch)?;

        let (browser, mut handler) = Browser::launch(config)
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;
        let handler_task = tokio::spawn(async move { while handler.next().await.is_some() {} });

        let page = browser
            .new_page("about:blank")
            .await
            .map_err(|e| BrowserError::Launch(e.to_string()))?;
        page.execute(EnableParams::default())
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))?;

        let monitor = ResponseMonitor::new();
        let mut events = page
            .event_listener::<EventResponseReceived>()
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))?;
        let recorder = monitor.clone();
        let listener_task = tokio::spawn(async move {
            while let Some(ev) = events.next().await {
                if ev.r#type == ResourceType::Document {
                    let status = u16::try_from(ev.response.status).unwrap_or(0);
                    debug!(status, url = %ev.response.url, "文档响应");
                    recorder.record(status);
                }
            }
        });

        info!(
            user_data_dir = %options.user_data_dir.display(),
            headless = options.headless,
            "浏览器已启动"
        );
        Ok(Self {
            browser: Mutex::new(browser),
            page,
            monitor,
            handler_task,
            listener_task,
        })
    }

    /// 当前页面，供外部抓取链接与标题。
    pub fn page(&self) -> &Page {
        &self.page
    }

    pub async fn close(&self) -> Result<(), BrowserError> {
        let mut browser = self.browser.lock().await;
        browser
            .close()
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))?;
        Ok(())
    }
}

impl Drop for ChromiumSession {
    fn drop(&mut self) {
        self.listener_task.abort();
        self.handler_task.abort();
    }
}

fn to_cookie_record(cookie: Cookie) -> CookieRecord {
    let expires = if cookie.session || cookie.expires <= 0.0 {
        None
    } else {
        let secs = cookie.expires.trunc() as i64;
        let nanos = (cookie.expires.fract() * 1e9) as u32;
        DateTime::<Utc>::from_timestamp(secs, nanos)
    };
    CookieRecord {
        name: cookie.name,
        value: cookie.value,
        domain: cookie.domain,
        path: cookie.path,
        expires,
        http_only: cookie.http_only,
        secure: cookie.secure,
        same_site: cookie.same_site.map(|s| format!("{s:?}")),
    }
}

#[async_trait]
impl PageSnapshot for ChromiumSession {
    async fn content(&self) -> Result<String, BrowserError> {
        self.page
            .content()
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))
    }

    async fn selector_count(&self, selector: &str) -> Result<usize, BrowserError> {
        self.page
            .find_elements(selector)
            .await
            .map(|els| els.len())
            .map_err(|e| BrowserError::Protocol(e.to_string()))
    }
}

#[async_trait]
impl BrowserSession for ChromiumSession {
    async fn navigate(&self, url: &str) -> Result<(), BrowserError> {
        self.page
            .goto(url)
            .await
            .map_err(|e| BrowserError::Navigation(e.to_string()))?;
        Ok(())
    }

    fn responses(&self) -> ResponseMonitor {
        self.monitor.clone()
    }

    async fn cookies(&self) -> Result<Vec<CookieRecord>, BrowserError> {
        let cookies = self
            .page
            .get_cookies()
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))?;
        Ok(cookies.into_iter().map(to_cookie_record).collect())
    }

    async fn user_agent(&self) -> Result<String, BrowserError> {
        self.page
            .evaluate("navigator.userAgent")
            .await
            .map_err(|e| BrowserError::Protocol(e.to_string()))?
            .into_value::<String>()
            .map_err(|e| BrowserError::Protocol(e.to_string()))
    }
}
