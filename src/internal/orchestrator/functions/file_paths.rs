use std::collections::HashSet;
use std::path::{Path, PathBuf};

use super::sanitize_title::{sanitize_title, MAX_TITLE_CHARS};

/// 临时文件后缀
pub const PART_SUFFIX: &str = ".part";

/// 可能出现的最终文件扩展名
const KNOWN_EXTENSIONS: [&str; 2] = [".mp4", ".m3u8"];

/// 分段流（或 URL 含 `.m3u8`）使用 `.m3u8`，否则 `.mp4`。
pub fn infer_extension(url: &str, is_segmented_stream: bool) -> &'static str {
    if is_segmented_stream || url.to_ascii_lowercase().contains(".m3u8") {
        ".m3u8"
    } else {
        ".mp4"
    }
}

/// 标准临时文件路径：`<dir>/<base><ext>.part`
pub fn part_path_for(output_dir: &Path, base: &str, ext: &str) -> PathBuf {
    output_dir.join(format!("{base}{ext}{PART_SUFFIX}"))
}

/// 查找已有的临时文件：先找 `<base><ext>.part`，再找旧式 `<base>.part`。
///
/// `base` 本身以已知扩展名结尾时，`<base>.part` 同时是另一个标题的标准临时文件，不作为旧式候选。
pub async fn find_part_file(output_dir: &Path, base: &str, ext: &str) -> Option<PathBuf> {
    let standard = part_path_for(output_dir, base, ext);
    if tokio::fs::try_exists(&standard).await.unwrap_or(false) {
        return Some(standard);
    }
    if ends_with_known_extension(base) {
        return None;
    }
    let legacy = output_dir.join(format!("{base}{PART_SUFFIX}"));
    if tokio::fs::try_exists(&legacy).await.unwrap_or(false) {
        return Some(legacy);
    }
    None
}

fn ends_with_known_extension(base: &str) -> bool {
    let lower = base.to_lowercase();
    KNOWN_EXTENSIONS.iter().any(|ext| lower.ends_with(ext))
}

/// 为一批标题分配互不相同的文件名主体（已清洗）。
///
/// 重复者按输入顺序追加 ` (2)`、` (3)`……，比较忽略大小写，
/// 保证同一批任务的最终文件与临时文件两两不同。
pub fn assign_unique_bases<'a, I>(titles: I) -> Vec<String>
where
    I: IntoIterator<Item = &'a str>,
{
    let mut taken: HashSet<String> = HashSet::new();
    let mut bases = Vec::new();
    for title in titles {
        let base = sanitize_title(title);
        let mut candidate = base.clone();
        let mut n = 2u32;
        while taken.contains(&candidate.to_lowercase()) {
            let suffix = format!(" ({n})");
            let keep = MAX_TITLE_CHARS.saturating_sub(suffix.chars().count());
            let stem: String = base.chars().take(keep).collect();
            candidate = format!("{}{suffix}", stem.trim_end());
            n += 1;
        }
        taken.insert(candidate.to_lowercase());
        bases.push(candidate);
    }
    bases
}
