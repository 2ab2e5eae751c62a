pub mod anti_bot_gate;
pub mod challenge_signals;
pub mod gate_config;
pub mod gate_error;
pub mod gate_state;

pub use anti_bot_gate::AntiBotGate;
pub use challenge_signals::ChallengeSignals;
pub use gate_config::GateConfig;
pub use gate_error::GateError;
pub use gate_state::GateState;
