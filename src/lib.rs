/// 内部导出的模块
mod internal;

#[cfg(test)]
mod tests;

pub mod states {
    pub mod unlock_reactive {
        use crate::internal;
        pub use internal::states::unlock_reactive::*;
    }
}

/// 浏览器能力抽象；真实驱动需开启 `chromium` feature
pub mod browser {
    use crate::internal;
    pub use internal::browser::structs::*;
    pub use internal::browser::traits::*;

    #[cfg(feature = "chromium")]
    pub use internal::browser::drivers::*;
}

/// 凭证桥：浏览器会话 → 独立 HTTP 客户端
pub mod credential {
    use crate::internal;
    pub use internal::credential::functions::*;
    pub use internal::credential::structs::*;
}

pub mod gate {
    use crate::internal;
    pub use internal::gate::impl_traits::*;
    pub use internal::gate::structs::challenge_signals::{
        DEFAULT_FORBIDDEN_STATUS, DEFAULT_INDICATOR_SELECTORS, DEFAULT_INDICATOR_TEXTS,
    };
    pub use internal::gate::structs::gate_config::{
        DEFAULT_ALERT_MESSAGE, DEFAULT_NAVIGATION_TIMEOUT, DEFAULT_POLL_INTERVAL,
    };
    pub use internal::gate::structs::*;
    pub use internal::gate::traits::*;
}

pub mod downloader {
    use crate::internal;
    pub use internal::downloader::functions::*;
    pub use internal::downloader::structs::*;
    pub use internal::downloader::traits::*;
}

pub mod orchestrator {
    use crate::internal;
    pub use internal::orchestrator::functions::*;
    pub use internal::orchestrator::structs::*;
    pub use internal::orchestrator::traits::*;
}

pub mod config {
    use crate::internal;
    pub use internal::config::structs::app_config::{BROWSER_USER_DATA_DIR_NAME, DEFAULT_OUTPUT_DIR};
    pub use internal::config::structs::*;
}
