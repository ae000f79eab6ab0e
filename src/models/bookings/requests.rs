use serde::Deserialize;
use ts_rs::TS;

use super::status::PaymentState;

/// 学生发起预约请求
///
/// 费用与总额由服务端根据报价计算，不信任客户端提交的金额。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct CreateBookingRequest {
    pub tutor_id: i64,
    pub time_slot_id: i64,
    pub range_id: i64,
    pub start_date: chrono::DateTime<chrono::Utc>,
    /// 月数，正整数
    pub duration_months: i32,
    pub notes: Option<String>,
}

/// 取消预约请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct CancelBookingRequest {
    pub cancellation_reason: String,
}

/// 家教登记线下收款
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/booking.ts")]
pub struct PhysicalPaymentRequest {
    pub payment_state: PaymentState,
}

// 用于存储层的新建预约（金额与日期已由服务层算好）
#[derive(Debug, Clone)]
pub struct NewBooking {
    pub student_id: i64,
    pub tutor_id: i64,
    pub time_slot_id: i64,
    pub range_id: i64,
    pub start_date: chrono::DateTime<chrono::Utc>,
    pub end_date: chrono::DateTime<chrono::Utc>,
    pub duration_months: i32,
    pub fee: f64,
    pub total_amount: f64,
    pub teaching_mode: crate::models::users::entities::TeachingMode,
    pub notes: Option<String>,
}

// 用于存储层的状态写回（None 表示该字段不变）
#[derive(Debug, Clone, Default)]
pub struct BookingUpdate {
    pub status: Option<super::status::BookingStatus>,
    pub payment_state: Option<PaymentState>,
    pub cancellation_reason: Option<String>,
    pub is_active: Option<bool>,
}
