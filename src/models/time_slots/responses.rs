use serde::Serialize;
use ts_rs::TS;

use super::entities::TimeSlot;
use crate::models::common::PaginationInfo;

// 时段报价列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/time_slot.ts")]
pub struct TimeSlotListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<TimeSlot>,
}

// 删除单条时段后的响应：剩余时段为空时整份报价一并删除
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/time_slot.ts")]
pub struct RangeDeleteResponse {
    pub slot_deleted: bool,
    pub remaining: Option<TimeSlot>,
}
