//! 时段解析与冲突检测核心
//!
//! 纯逻辑模块：不访问存储、不依赖 HTTP 层，供 services 在落库前调用。
//! 所有时间比较都是墙上时钟（分钟数），不做时区换算。

pub mod conflict;
pub mod days;
pub mod overlap;
pub mod time;

pub use conflict::{OfferingWindow, check_booked_ranges_preserved, check_candidate};
pub use days::{DaySet, Weekday};
pub use overlap::{MIN_RANGE_MINUTES, ranges_overlap, validate_range};
pub use time::time_to_minutes;

use std::fmt;

/// 时段规则错误
///
/// 携带足够的上下文让调用方拼出面向用户的提示
///（例如冲突的已有时段与重叠的星期）。
#[derive(Debug, Clone, PartialEq)]
pub enum ScheduleError {
    /// 起止时间缺失（空字符串视同未选择）
    MissingField(&'static str),
    /// 不符合 "H:MM AM|PM" 格式
    InvalidFormat(String),
    /// 结束时间不晚于开始时间
    EndBeforeStart { start: String, end: String },
    /// 时长不足 45 分钟
    DurationTooShort { minutes: u16 },
    /// 与已有时段冲突（含首尾相接的边界情况）
    SlotConflict {
        candidate_start: String,
        candidate_end: String,
        existing_start: String,
        existing_end: String,
        days: DaySet,
    },
    /// 已被预约的时段不允许改动起止时间或被移除
    CannotModifyBookedSlot { start: String, end: String },
    /// 存在已预约时段时，科目/年级/费用等其他字段被冻结
    LockedByBooking,
}

impl fmt::Display for ScheduleError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ScheduleError::MissingField(field) => {
                write!(f, "Missing required field: {field}")
            }
            ScheduleError::InvalidFormat(value) => {
                write!(f, "Invalid time format: '{value}', expected H:MM AM|PM")
            }
            ScheduleError::EndBeforeStart { start, end } => {
                write!(f, "End time {end} must be after start time {start}")
            }
            ScheduleError::DurationTooShort { minutes } => {
                write!(
                    f,
                    "Time slot must be at least {MIN_RANGE_MINUTES} minutes, got {minutes}"
                )
            }
            ScheduleError::SlotConflict {
                candidate_start,
                candidate_end,
                existing_start,
                existing_end,
                days,
            } => {
                write!(
                    f,
                    "Time slot {candidate_start} - {candidate_end} overlaps with an existing slot ({existing_start} - {existing_end}) on {days}"
                )
            }
            ScheduleError::CannotModifyBookedSlot { start, end } => {
                write!(f, "Cannot modify or remove booked time slot {start} - {end}")
            }
            ScheduleError::LockedByBooking => {
                write!(
                    f,
                    "Cannot modify subject, grade, timezone, fee, notes, or days when slots are booked"
                )
            }
        }
    }
}

impl std::error::Error for ScheduleError {}

impl From<ScheduleError> for crate::errors::TutorEaseError {
    fn from(err: ScheduleError) -> Self {
        crate::errors::TutorEaseError::Scheduling(err.to_string())
    }
}

/// 一条候选时段的起止时间（保持调用方传入的字符串形式，校验通过后原样返回）
#[derive(Debug, Clone, PartialEq)]
pub struct SlotTimes {
    pub start_time: String,
    pub end_time: String,
}

impl SlotTimes {
    pub fn new(start_time: impl Into<String>, end_time: impl Into<String>) -> Self {
        Self {
            start_time: start_time.into(),
            end_time: end_time.into(),
        }
    }
}
