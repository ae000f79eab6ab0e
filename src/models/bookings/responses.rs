use serde::Serialize;
use ts_rs::TS;

use super::entities::Booking;
use crate::scheduling::Weekday;

// 列表视图里附带的时段摘要（前端聊天/列表页都用它）
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct BookedRangeSummary {
    pub subject_name: String,
    pub grade_level: String,
    pub start_time: String,
    pub end_time: String,
    pub days: Vec<Weekday>,
}

// 预约 + 时段摘要 + 对方昵称
#[derive(Debug, Clone, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct BookingView {
    #[serde(flatten)]
    #[ts(flatten)]
    pub booking: Booking,
    pub time_slot: Option<BookedRangeSummary>,
    /// 学生视角为家教用户名，家教视角为学生用户名
    pub counterparty_name: String,
}

#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct BookingListResponse {
    pub bookings: Vec<BookingView>,
}
