//! 标题清洗与文件路径测试。

use crate::orchestrator::{
    assign_unique_bases, find_part_file, infer_extension, part_path_for, sanitize_title,
    MAX_TITLE_CHARS, UNTITLED,
};

#[test]
fn strips_forbidden_characters() {
    let out = sanitize_title("My:Video/Title*?");
    assert_eq!(out, "MyVideoTitle");
    for c in ['\\', '/', ':', '*', '?', '"', '<', '>', '|'] {
        assert!(!out.contains(c));
    }
}

#[test]
fn collapses_whitespace_and_trims() {
    assert_eq!(sanitize_title("  a \t b\n\nc  "), "a b c");
    assert_eq!(sanitize_title("x | y"), "x y");
}

#[test]
fn empty_becomes_placeholder() {
    assert_eq!(sanitize_title(""), UNTITLED);
    assert_eq!(sanitize_title("   "), UNTITLED);
    assert_eq!(sanitize_title("???"), UNTITLED);
}

#[test]
fn truncates_by_characters_not_bytes() {
    let long = "视".repeat(300);
    let out = sanitize_title(&long);
    assert_eq!(out.chars().count(), MAX_TITLE_CHARS);

    // 截断后落在空格上时去掉尾部空白
    let spaced = format!("{} tail", "a".repeat(MAX_TITLE_CHARS - 1));
    assert_eq!(sanitize_title(&spaced), "a".repeat(MAX_TITLE_CHARS - 1));
}

#[test]
fn extension_follows_stream_kind() {
    assert_eq!(infer_extension("https://cdn.example.com/v/1080.mp4", false), ".mp4");
    assert_eq!(infer_extension("https://cdn.example.com/v/index.M3U8?t=1", false), ".m3u8");
    assert_eq!(infer_extension("https://cdn.example.com/v/stream", true), ".m3u8");
}

#[tokio::test]
async fn finds_standard_then_legacy_part_file() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path();

    assert_eq!(find_part_file(out, "clip", ".mp4").await, None);

    let legacy = out.join("clip.part");
    tokio::fs::write(&legacy, b"abc").await.unwrap();
    assert_eq!(find_part_file(out, "clip", ".mp4").await, Some(legacy));

    let standard = part_path_for(out, "clip", ".mp4");
    assert_eq!(standard, out.join("clip.mp4.part"));
    tokio::fs::write(&standard, b"abc").await.unwrap();
    assert_eq!(find_part_file(out, "clip", ".mp4").await, Some(standard));
}

#[tokio::test]
async fn extension_like_base_skips_legacy_candidate() {
    let dir = tempfile::tempdir().unwrap();
    let out = dir.path();
    // `clip.mp4.part` 是标题 `clip` 的标准临时文件
    tokio::fs::write(out.join("clip.mp4.part"), b"abc").await.unwrap();

    assert_eq!(find_part_file(out, "clip.mp4", ".mp4").await, None);
    assert_eq!(find_part_file(out, "CLIP.M3U8", ".mp4").await, None);
    assert_eq!(
        find_part_file(out, "clip", ".mp4").await,
        Some(out.join("clip.mp4.part"))
    );
}

#[test]
fn unique_bases_in_input_order() {
    let bases = assign_unique_bases(["a", "a?", "b", "A", "a (2)", ""]);
    assert_eq!(bases, vec!["a", "a (2)", "b", "A (3)", "a (2) (2)", UNTITLED]);

    let long = "x".repeat(MAX_TITLE_CHARS);
    let bases = assign_unique_bases([long.as_str(), long.as_str()]);
    assert_eq!(bases[0], long);
    assert!(bases[1].ends_with(" (2)"));
    assert_eq!(bases[1].chars().count(), MAX_TITLE_CHARS);
    assert_ne!(bases[0], bases[1]);
}
