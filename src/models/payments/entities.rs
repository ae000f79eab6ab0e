use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 支付单状态（网关视角，区别于预约上的 PaymentState）
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub enum PaymentRecordStatus {
    Pending,
    Completed,
    Failed,
    Cancelled,
}

impl std::fmt::Display for PaymentRecordStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let s = match self {
            PaymentRecordStatus::Pending => "pending",
            PaymentRecordStatus::Completed => "completed",
            PaymentRecordStatus::Failed => "failed",
            PaymentRecordStatus::Cancelled => "cancelled",
        };
        write!(f, "{s}")
    }
}

impl std::str::FromStr for PaymentRecordStatus {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "pending" => Ok(PaymentRecordStatus::Pending),
            "completed" => Ok(PaymentRecordStatus::Completed),
            "failed" => Ok(PaymentRecordStatus::Failed),
            "cancelled" => Ok(PaymentRecordStatus::Cancelled),
            _ => Err(format!("Invalid payment record status: {s}")),
        }
    }
}

// 支付单：线上预约发起支付时创建，网关回调后落定
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/payment.ts")]
pub struct Payment {
    pub id: i64,
    pub booking_id: i64,
    pub student_id: i64,
    pub amount: f64,
    /// 发给网关的订单号（服务端生成的 UUID）
    pub order_ref: String,
    /// 网关返回的交易号
    pub transaction_id: Option<String>,
    pub status: PaymentRecordStatus,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
