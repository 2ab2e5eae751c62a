//! 区间计划测试：固定场景 + 随机参数下的覆盖完整性（可信前缀 ∪ 计划 = [0, total-1]，无重叠无空洞）。

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::downloader::{plan_ranges, ByteRange};

fn r(start: u64, end: u64) -> ByteRange {
    ByteRange::new(start, end)
}

#[test]
fn fresh_download_splits_into_windows() {
    let plan = plan_ranges(10_000_000, 4_000_000, 0, true);
    assert_eq!(
        plan,
        vec![r(0, 3_999_999), r(4_000_000, 7_999_999), r(8_000_000, 9_999_999)]
    );
    assert_eq!(plan[0].header_value(), "bytes=0-3999999");
}

#[test]
fn resume_trims_straddling_window() {
    let plan = plan_ranges(10_000_000, 4_000_000, 5_000_000, true);
    assert_eq!(plan, vec![r(5_000_000, 7_999_999), r(8_000_000, 9_999_999)]);
}

#[test]
fn resume_on_window_boundary_drops_whole_windows() {
    let plan = plan_ranges(10_000_000, 4_000_000, 8_000_000, true);
    assert_eq!(plan, vec![r(8_000_000, 9_999_999)]);
}

#[test]
fn complete_prefix_yields_empty_plan() {
    assert!(plan_ranges(10_000_000, 4_000_000, 10_000_000, true).is_empty());
    assert!(plan_ranges(8_000_000, 4_000_000, 8_000_000, true).is_empty());
}

#[test]
fn stale_prefix_restarts_from_zero() {
    let plan = plan_ranges(10, 4, 11, true);
    assert_eq!(plan, vec![r(0, 3), r(4, 7), r(8, 9)]);
}

#[test]
fn non_ranged_origin_always_whole_file() {
    assert_eq!(plan_ranges(10_000_000, 4_000_000, 5_000_000, false), vec![r(0, 9_999_999)]);
    assert_eq!(plan_ranges(10, 4, 0, false), vec![r(0, 9)]);
}

#[test]
fn zero_total_has_nothing_to_plan() {
    assert!(plan_ranges(0, 4, 0, true).is_empty());
    assert!(plan_ranges(0, 4, 0, false).is_empty());
}

#[test]
fn single_byte_file() {
    assert_eq!(plan_ranges(1, 4_000_000, 0, true), vec![r(0, 0)]);
    assert_eq!(r(0, 0).len(), 1);
}

#[test]
fn coverage_is_exact_partition_for_random_inputs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..2_000 {
        let total: u64 = rng.gen_range(1..50_000);
        let chunk: u64 = rng.gen_range(1..10_000);
        let present: u64 = rng.gen_range(0..=total);
        let plan = plan_ranges(total, chunk, present, true);

        let mut cursor = present;
        for range in &plan {
            assert_eq!(range.start, cursor, "T={total} C={chunk} P={present}: 区间不连续");
            assert!(range.end < total);
            assert!(range.len() <= chunk);
            cursor = range.end + 1;
        }
        assert_eq!(cursor, total, "T={total} C={chunk} P={present}: 未覆盖到末尾");
    }
}
