pub mod browser_error;
pub mod response_monitor;

pub use browser_error::BrowserError;
pub use response_monitor::{ResponseMonitor, ResponseObservation};
