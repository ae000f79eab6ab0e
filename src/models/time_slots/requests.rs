use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::scheduling::{SlotTimes, Weekday};

/// 提交的一条时段（不带 id，is_booked 由服务端维护）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/time_slot.ts")]
pub struct TimeRangeInput {
    pub start_time: String,
    pub end_time: String,
}

impl TimeRangeInput {
    pub fn to_slot_times(&self) -> SlotTimes {
        SlotTimes::new(self.start_time.clone(), self.end_time.clone())
    }
}

/// 创建时段报价请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/time_slot.ts")]
pub struct CreateTimeSlotRequest {
    pub subject_name: String,
    pub grade_level: String,
    pub days_of_week: Vec<Weekday>,
    pub time_ranges: Vec<TimeRangeInput>,
    pub fee: f64,
    pub timezone: String,
    pub notes: Option<String>,
}

/// 更新时段报价请求
///
/// 所有字段整体提交（与前端表单一致）；version 来自上一次读取，
/// 用于乐观并发控制。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/time_slot.ts")]
pub struct UpdateTimeSlotRequest {
    pub subject_name: String,
    pub grade_level: String,
    pub days_of_week: Vec<Weekday>,
    pub time_ranges: Vec<TimeRangeInput>,
    pub fee: f64,
    pub timezone: String,
    pub notes: Option<String>,
    pub version: i64,
}

/// 时段报价列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/time_slot.ts")]
pub struct TimeSlotListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub subject: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct TimeSlotListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub tutor_id: i64,
    pub subject: Option<String>,
    /// 只返回启用中的报价（学生视角）
    pub active_only: bool,
}

// 用于存储层的整体替换写入（服务层已完成冲突检测与 is_booked 标记保留）
#[derive(Debug, Clone)]
pub struct RangeReplacement {
    pub start_time: String,
    pub end_time: String,
    pub is_booked: bool,
}

#[derive(Debug, Clone)]
pub struct TimeSlotReplacement {
    pub subject_name: String,
    pub grade_level: String,
    pub days_of_week: Vec<crate::scheduling::Weekday>,
    pub fee: f64,
    pub timezone: String,
    pub notes: Option<String>,
    pub ranges: Vec<RangeReplacement>,
}
