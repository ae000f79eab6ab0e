//! 区间重叠判定与单条时段校验

use super::{ScheduleError, time_to_minutes};

/// 单条时段的最短时长（分钟）
pub const MIN_RANGE_MINUTES: u16 = 45;

/// 判断两个分钟区间是否冲突
///
/// 边界取闭区间：首尾恰好相接（A 在 600 结束、B 在 600 开始）也算冲突，
/// 保证相邻课程之间留有缓冲。这是既有产品行为，禁止改成半开区间。
pub fn ranges_overlap(start_a: u16, end_a: u16, start_b: u16, end_b: u16) -> bool {
    start_a <= end_b && end_a >= start_b
}

/// 校验一条候选时段
///
/// 依次检查：时间是否缺失、格式是否合法、结束是否晚于开始、
/// 时长是否达到 45 分钟。通过后返回解析出的分钟区间，
/// 字符串表示保持原样，不做任何规范化。
pub fn validate_range(start_time: &str, end_time: &str) -> Result<(u16, u16), ScheduleError> {
    if start_time.is_empty() {
        return Err(ScheduleError::MissingField("start_time"));
    }
    if end_time.is_empty() {
        return Err(ScheduleError::MissingField("end_time"));
    }

    let start = time_to_minutes(start_time)?;
    let end = time_to_minutes(end_time)?;

    if end <= start {
        return Err(ScheduleError::EndBeforeStart {
            start: start_time.to_string(),
            end: end_time.to_string(),
        });
    }

    let duration = end - start;
    if duration < MIN_RANGE_MINUTES {
        return Err(ScheduleError::DurationTooShort { minutes: duration });
    }

    Ok((start, end))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_overlap_is_symmetric() {
        let cases = [
            (0u16, 60u16, 30u16, 90u16),
            (0, 60, 60, 120),
            (0, 600, 100, 200),
            (0, 60, 120, 180),
        ];
        for (a1, a2, b1, b2) in cases {
            assert_eq!(
                ranges_overlap(a1, a2, b1, b2),
                ranges_overlap(b1, b2, a1, a2),
                "symmetry broken for [{a1},{a2}] vs [{b1},{b2}]"
            );
        }
    }

    #[test]
    fn test_touching_endpoints_conflict() {
        // 9:00-10:00 与 10:00-11:00 必须判为冲突
        assert!(ranges_overlap(0, 60, 60, 120));
        assert!(ranges_overlap(540, 600, 600, 660));
    }

    #[test]
    fn test_disjoint_ranges_do_not_conflict() {
        assert!(!ranges_overlap(0, 60, 61, 120));
        assert!(!ranges_overlap(600, 660, 0, 599));
    }

    #[test]
    fn test_containment_conflicts() {
        assert!(ranges_overlap(0, 600, 100, 200));
        assert!(ranges_overlap(100, 200, 0, 600));
    }

    #[test]
    fn test_validate_range_happy_path() {
        assert_eq!(validate_range("9:00 AM", "10:00 AM").unwrap(), (540, 600));
        // 恰好 45 分钟允许
        assert_eq!(validate_range("9:00 AM", "9:45 AM").unwrap(), (540, 585));
    }

    #[test]
    fn test_validate_range_too_short() {
        assert_eq!(
            validate_range("9:00 AM", "9:30 AM"),
            Err(ScheduleError::DurationTooShort { minutes: 30 })
        );
    }

    #[test]
    fn test_validate_range_end_before_start() {
        assert!(matches!(
            validate_range("10:00 AM", "9:00 AM"),
            Err(ScheduleError::EndBeforeStart { .. })
        ));
        // 起止相同同样拒绝
        assert!(matches!(
            validate_range("9:00 AM", "9:00 AM"),
            Err(ScheduleError::EndBeforeStart { .. })
        ));
    }

    #[test]
    fn test_validate_range_missing_fields() {
        assert_eq!(
            validate_range("", "10:00 AM"),
            Err(ScheduleError::MissingField("start_time"))
        );
        assert_eq!(
            validate_range("9:00 AM", ""),
            Err(ScheduleError::MissingField("end_time"))
        );
    }
}
