use serde::{Deserialize, Serialize};
use ts_rs::TS;

use crate::models::users::entities::TeachingMode;
use crate::scheduling::{OfferingWindow, SlotTimes, Weekday};

// 报价中的一条具体时段（预约以它为单位）
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/time_slot.ts")]
pub struct TimeRange {
    pub id: i64,
    // "H:MM AM|PM" 形式，保持用户提交时的原样
    pub start_time: String,
    pub end_time: String,
    pub is_booked: bool,
}

// 家教发布的一份时段报价
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/time_slot.ts")]
pub struct TimeSlot {
    pub id: i64,
    // 所属家教
    pub tutor_id: i64,
    pub subject_name: String,
    pub grade_level: String,
    // 每周重复的星期，非空
    pub days_of_week: Vec<Weekday>,
    pub time_ranges: Vec<TimeRange>,
    // 月费，正数
    pub fee: f64,
    // IANA 时区名，仅作展示，所有比较都是墙上时钟
    pub timezone: String,
    pub notes: Option<String>,
    pub session_type: TeachingMode,
    pub is_active: bool,
    // 乐观锁版本号，更新时校验
    pub version: i64,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}

impl TimeSlot {
    /// 是否存在已被预约的时段
    pub fn has_booked_ranges(&self) -> bool {
        self.time_ranges.iter().any(|r| r.is_booked)
    }

    /// 转换为冲突检测视图
    pub fn to_window(&self) -> OfferingWindow {
        OfferingWindow::new(
            self.days_of_week.iter().copied().collect(),
            self.time_ranges
                .iter()
                .map(|r| SlotTimes::new(r.start_time.clone(), r.end_time.clone()))
                .collect(),
        )
    }
}
