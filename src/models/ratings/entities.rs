use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 评价：每个完成的预约至多一条
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rating.ts")]
pub struct Rating {
    pub id: i64,
    pub booking_id: i64,
    pub student_id: i64,
    pub tutor_id: i64,
    // 1-5 整数
    pub rating: i32,
    pub review: Option<String>,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
