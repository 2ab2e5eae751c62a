pub mod browser_session;

pub use browser_session::{BrowserSession, PageSnapshot};
