use crate::internal::downloader::structs::ByteRange;

/// 计算仍需下载的区间。
///
/// - `[0, total-1]` 按 `chunk_size` 切窗，末窗截短；
/// - 完全落在可信前缀 `[0, present_len-1]` 内的窗丢弃，跨越前缀边界的窗从 `present_len` 开始；
/// - 服务器不支持 Range 时，无论前缀多长都整文件重下：`[0, total-1]`；
/// - `present_len == total` 返回空（已完整），`present_len > total` 视为过期前缀，从 0 开始。
///
/// 结果升序、互不重叠，且与可信前缀恰好拼成 `[0, total-1]`。`total == 0` 时返回空。
pub fn plan_ranges(
    total: u64,
    chunk_size: u64,
    present_len: u64,
    accepts_ranges: bool,
) -> Vec<ByteRange> {
    if total == 0 {
        return Vec::new();
    }
    if !accepts_ranges {
        return vec![ByteRange::new(0, total - 1)];
    }

    let chunk = chunk_size.max(1);
    let trusted = if present_len > total { 0 } else { present_len };

    let mut ranges = Vec::new();
    let mut window_start = (trusted / chunk) * chunk;
    while window_start < total {
        let window_end = window_start.saturating_add(chunk).min(total) - 1;
        if window_end >= trusted {
            ranges.push(ByteRange::new(window_start.max(trusted), window_end));
        }
        window_start = window_start.saturating_add(chunk);
    }
    ranges
}
