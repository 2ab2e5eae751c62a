pub mod chromium_session;

pub use chromium_session::{ChromiumOptions, ChromiumSession};
