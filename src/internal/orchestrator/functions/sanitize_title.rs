/// 文件名中不允许出现的字符
const INVALID_FILENAME_CHARS: &[char] = &['\\', '/', ':', '*', '?', '"', '<', '>', '|'];

/// 标题最长保留的字符数
pub const MAX_TITLE_CHARS: usize = 200;

/// 标题为空时使用的占位名
pub const UNTITLED: &str = "未命名";

/// 把标题清洗成可用的文件名：去掉非法字符，连续空白合并为一个空格，首尾去空白，
/// 最多保留 200 个字符；结果为空时返回 `未命名`。
pub fn sanitize_title(title: &str) -> String {
    let stripped: String = title
        .chars()
        .filter(|c| !INVALID_FILENAME_CHARS.contains(c))
        .collect();
    let collapsed = stripped.split_whitespace().collect::<Vec<_>>().join(" ");
    let truncated: String = collapsed.chars().take(MAX_TITLE_CHARS).collect();
    let trimmed = truncated.trim();
    if trimmed.is_empty() {
        UNTITLED.to_string()
    } else {
        trimmed.to_string()
    }
}
