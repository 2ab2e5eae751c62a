/// HEAD 探测结果
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct RemoteProbe {
    /// `Content-Length`；缺失或无法解析时为 `None`
    pub total: Option<u64>,
    /// `Accept-Ranges: bytes`
    pub accepts_ranges: bool,
}

impl RemoteProbe {
    /// 大小已知且非零时返回总字节数
    pub fn known_total(&self) -> Option<u64> {
        self.total.filter(|&t| t > 0)
    }
}
