/// 单个任务的累计进度
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TaskProgress {
    /// 目标在输入列表中的下标
    pub index: usize,
    pub title: String,
    /// 本次运行累计收到的字节数（含重试）
    pub bytes_received: u64,
}
