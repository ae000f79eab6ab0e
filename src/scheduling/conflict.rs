//! 跨时段冲突检测
//!
//! 一个报价（offering）由一组星期加若干时段组成。新增/编辑报价时：
//! 1. 候选报价内部的时段两两不得重叠；
//! 2. 与该家教其余所有报价比较，星期有交集的才比较时段；
//! 3. 编辑时已被预约的时段必须原样保留。

use super::{DaySet, ScheduleError, SlotTimes, ranges_overlap, validate_range};

/// 参与冲突检测的报价视图（星期集合 + 时段列表）
#[derive(Debug, Clone)]
pub struct OfferingWindow {
    pub days: DaySet,
    pub ranges: Vec<SlotTimes>,
}

impl OfferingWindow {
    pub fn new(days: DaySet, ranges: Vec<SlotTimes>) -> Self {
        Self { days, ranges }
    }
}

/// 校验候选报价：先逐条校验，再做内部两两重叠检查，
/// 最后与其余报价做星期门控的交叉检查。返回第一处冲突。
pub fn check_candidate(
    candidate: &OfferingWindow,
    existing: &[OfferingWindow],
) -> Result<(), ScheduleError> {
    if candidate.days.is_empty() {
        return Err(ScheduleError::MissingField("days_of_week"));
    }
    if candidate.ranges.is_empty() {
        return Err(ScheduleError::MissingField("time_ranges"));
    }

    // 逐条校验并解析为分钟区间
    let mut parsed = Vec::with_capacity(candidate.ranges.len());
    for range in &candidate.ranges {
        parsed.push(validate_range(&range.start_time, &range.end_time)?);
    }

    // 候选报价内部自洽：同一报价里的时段两两不得重叠
    for i in 0..parsed.len() {
        for j in (i + 1)..parsed.len() {
            let (start_a, end_a) = parsed[i];
            let (start_b, end_b) = parsed[j];
            if ranges_overlap(start_a, end_a, start_b, end_b) {
                return Err(conflict_error(
                    &candidate.ranges[j],
                    &candidate.ranges[i],
                    candidate.days,
                ));
            }
        }
    }

    // 与其余报价交叉检查，星期无交集的互不相干
    for other in existing {
        let shared_days = candidate.days.intersection(other.days);
        if shared_days.is_empty() {
            continue;
        }

        for other_range in &other.ranges {
            let (other_start, other_end) =
                validate_range(&other_range.start_time, &other_range.end_time)?;
            for (idx, (start, end)) in parsed.iter().enumerate() {
                if ranges_overlap(*start, *end, other_start, other_end) {
                    return Err(conflict_error(
                        &candidate.ranges[idx],
                        other_range,
                        shared_days,
                    ));
                }
            }
        }
    }

    Ok(())
}

/// 编辑报价时校验已预约时段被原样保留
///
/// 已预约时段以起止时间字符串匹配（与原始数据保持一致的比较方式）；
/// 任何一条已预约时段在新列表中找不到完全相同的起止时间即拒绝。
pub fn check_booked_ranges_preserved(
    old_ranges: &[(SlotTimes, bool)],
    new_ranges: &[SlotTimes],
) -> Result<(), ScheduleError> {
    for (old, is_booked) in old_ranges {
        if !is_booked {
            continue;
        }
        let preserved = new_ranges.iter().any(|new| {
            new.start_time == old.start_time && new.end_time == old.end_time
        });
        if !preserved {
            return Err(ScheduleError::CannotModifyBookedSlot {
                start: old.start_time.clone(),
                end: old.end_time.clone(),
            });
        }
    }
    Ok(())
}

fn conflict_error(candidate: &SlotTimes, existing: &SlotTimes, days: DaySet) -> ScheduleError {
    ScheduleError::SlotConflict {
        candidate_start: candidate.start_time.clone(),
        candidate_end: candidate.end_time.clone(),
        existing_start: existing.start_time.clone(),
        existing_end: existing.end_time.clone(),
        days,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scheduling::Weekday;

    fn days(list: &[Weekday]) -> DaySet {
        list.iter().copied().collect()
    }

    fn window(day_list: &[Weekday], ranges: &[(&str, &str)]) -> OfferingWindow {
        OfferingWindow::new(
            days(day_list),
            ranges
                .iter()
                .map(|(s, e)| SlotTimes::new(*s, *e))
                .collect(),
        )
    }

    #[test]
    fn test_candidate_with_no_existing_offerings() {
        let candidate = window(&[Weekday::Monday], &[("9:00 AM", "10:00 AM")]);
        assert!(check_candidate(&candidate, &[]).is_ok());
    }

    #[test]
    fn test_self_overlap_rejected() {
        let candidate = window(
            &[Weekday::Monday],
            &[("9:00 AM", "10:00 AM"), ("9:30 AM", "10:30 AM")],
        );
        assert!(matches!(
            check_candidate(&candidate, &[]),
            Err(ScheduleError::SlotConflict { .. })
        ));
    }

    #[test]
    fn test_self_touching_boundary_rejected() {
        // 同一报价内首尾相接同样算重叠
        let candidate = window(
            &[Weekday::Monday],
            &[("9:00 AM", "10:00 AM"), ("10:00 AM", "11:00 AM")],
        );
        assert!(matches!(
            check_candidate(&candidate, &[]),
            Err(ScheduleError::SlotConflict { .. })
        ));
    }

    #[test]
    fn test_day_gated_overlap() {
        // 时间重叠但星期无交集，互不相干
        let existing = window(&[Weekday::Monday], &[("9:00 AM", "10:00 AM")]);
        let candidate = window(&[Weekday::Tuesday], &[("9:00 AM", "10:00 AM")]);
        assert!(check_candidate(&candidate, &[existing]).is_ok());
    }

    #[test]
    fn test_shared_day_boundary_conflict() {
        // 周一/周三 9:00-10:00 已存在，周三 10:00-11:00 与之首尾相接，必须拒绝
        let existing = window(
            &[Weekday::Monday, Weekday::Wednesday],
            &[("9:00 AM", "10:00 AM")],
        );
        let candidate = window(&[Weekday::Wednesday], &[("10:00 AM", "11:00 AM")]);
        let err = check_candidate(&candidate, &[existing.clone()]).unwrap_err();
        match err {
            ScheduleError::SlotConflict { days, existing_start, .. } => {
                assert!(days.contains(Weekday::Wednesday));
                assert!(!days.contains(Weekday::Monday));
                assert_eq!(existing_start, "9:00 AM");
            }
            other => panic!("expected SlotConflict, got {other:?}"),
        }

        // 错开 15 分钟即可通过
        let candidate = window(&[Weekday::Wednesday], &[("10:15 AM", "11:15 AM")]);
        assert!(check_candidate(&candidate, &[existing]).is_ok());
    }

    #[test]
    fn test_invalid_candidate_range_rejected_before_cross_check() {
        let existing = window(&[Weekday::Monday], &[("9:00 AM", "10:00 AM")]);
        let candidate = window(&[Weekday::Tuesday], &[("9:00 AM", "9:30 AM")]);
        assert_eq!(
            check_candidate(&candidate, &[existing]),
            Err(ScheduleError::DurationTooShort { minutes: 30 })
        );
    }

    #[test]
    fn test_empty_days_or_ranges_rejected() {
        let no_days = window(&[], &[("9:00 AM", "10:00 AM")]);
        assert_eq!(
            check_candidate(&no_days, &[]),
            Err(ScheduleError::MissingField("days_of_week"))
        );

        let no_ranges = window(&[Weekday::Monday], &[]);
        assert_eq!(
            check_candidate(&no_ranges, &[]),
            Err(ScheduleError::MissingField("time_ranges"))
        );
    }

    #[test]
    fn test_booked_range_must_be_preserved() {
        let old = vec![
            (SlotTimes::new("9:00 AM", "10:00 AM"), true),
            (SlotTimes::new("2:00 PM", "3:00 PM"), false),
        ];

        // 原样保留已预约时段即可，未预约时段随意增删
        let same = vec![SlotTimes::new("9:00 AM", "10:00 AM")];
        assert!(check_booked_ranges_preserved(&old, &same).is_ok());

        // 改动已预约时段的起止时间则拒绝
        let moved = vec![SlotTimes::new("9:15 AM", "10:15 AM")];
        assert_eq!(
            check_booked_ranges_preserved(&old, &moved),
            Err(ScheduleError::CannotModifyBookedSlot {
                start: "9:00 AM".to_string(),
                end: "10:00 AM".to_string(),
            })
        );
    }
}
