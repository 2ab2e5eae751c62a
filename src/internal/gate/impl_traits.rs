pub mod impl_indicators;
pub mod impl_operator;

pub use impl_indicators::{ForbiddenStatusIndicator, SelectorIndicator, TextIndicator};
pub use impl_operator::{ConsoleNotifier, ManualConfirmation, StdinConfirmation};
