use std::fmt;

/// 闭区间字节范围 `[start, end]`。
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct ByteRange {
    pub start: u64,
    /// 包含在内
    pub end: u64,
}

impl ByteRange {
    pub fn new(start: u64, end: u64) -> Self {
        debug_assert!(start <= end, "ByteRange start > end: {start} > {end}");
        Self { start, end }
    }

    /// 区间字节数（闭区间，至少为 1）
    pub fn len(&self) -> u64 {
        self.end - self.start + 1
    }

    /// `Range` 请求头取值：`bytes=start-end`
    pub fn header_value(&self) -> String {
        format!("bytes={}-{}", self.start, self.end)
    }
}

impl fmt::Display for ByteRange {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "[{}, {}]", self.start, self.end)
    }
}
