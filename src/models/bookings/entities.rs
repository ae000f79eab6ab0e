use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::status::{BookingStatus, PaymentState};
use crate::models::users::entities::TeachingMode;

// 预约：学生对某条具体时段的多月租约
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct Booking {
    pub id: i64,
    pub student_id: i64,
    pub tutor_id: i64,
    // 所属报价及其中的具体时段
    pub time_slot_id: i64,
    pub range_id: i64,
    pub start_date: chrono::DateTime<chrono::Utc>,
    // 由 start_date + duration_months 算出，期满扫描据此判断
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub duration_months: i32,
    // 月费快照（预约时的报价费用）
    pub fee: f64,
    // fee × duration_months
    pub total_amount: f64,
    pub teaching_mode: TeachingMode,
    pub status: BookingStatus,
    pub payment_state: PaymentState,
    pub cancellation_reason: Option<String>,
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
