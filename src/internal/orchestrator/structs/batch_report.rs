use std::fmt;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FailedTask {
    pub title: String,
    pub reason: String,
}

/// 批量下载汇总，均按目标输入顺序排列。
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BatchReport {
    pub succeeded: Vec<String>,
    pub failed: Vec<FailedTask>,
}

impl BatchReport {
    pub fn total(&self) -> usize {
        self.succeeded.len() + self.failed.len()
    }

    pub fn all_succeeded(&self) -> bool {
        self.failed.is_empty()
    }
}

impl fmt::Display for BatchReport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "成功 {} 个，失败 {} 个", self.succeeded.len(), self.failed.len())?;
        for title in &self.succeeded {
            writeln!(f, "  ✓ {title}")?;
        }
        for task in &self.failed {
            writeln!(f, "  ✗ {}: {}", task.title, task.reason)?;
        }
        Ok(())
    }
}
