pub mod challenge_indicator;
pub mod operator;

pub use challenge_indicator::ChallengeIndicator;
pub use operator::{OperatorConfirmation, OperatorNotifier};
