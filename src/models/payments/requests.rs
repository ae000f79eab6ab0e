use serde::Deserialize;
use ts_rs::TS;

/// 学生发起线上支付
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct InitiatePaymentRequest {
    pub booking_id: i64,
}

/// 支付网关回调
///
/// 网关侧的校验（签名、金额核对）在网关适配层完成，
/// 这里只消费它给出的结论。
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct ConfirmPaymentRequest {
    pub order_ref: String,
    pub transaction_id: String,
    /// 网关是否判定支付完成
    pub confirmed: bool,
}

// 用于存储层的新建支付单
#[derive(Debug, Clone)]
pub struct NewPayment {
    pub booking_id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub order_ref: String,
}
