pub mod batch_report;
pub mod download_target;
pub mod orchestrator_config;
pub mod task_error;
pub mod task_orchestrator;
pub mod task_progress;

pub use batch_report::{BatchReport, FailedTask};
pub use download_target::{DownloadTarget, TargetError};
pub use orchestrator_config::{
    OrchestratorConfig, DEFAULT_MAX_CONCURRENT_TASKS, DEFAULT_MAX_TASK_RETRIES, DEFAULT_RETRY_DELAY,
};
pub use task_error::{MuxError, TaskError};
pub use task_orchestrator::TaskOrchestrator;
pub use task_progress::TaskProgress;
