use serde::Deserialize;
use ts_rs::TS;

/// 学生提交评价
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rating.ts")]
pub struct GiveRatingRequest {
    pub booking_id: i64,
    pub rating: i32,
    pub review: Option<String>,
}

// 用于存储层的新建评价
#[derive(Debug, Clone)]
pub struct NewRating {
    pub booking_id: i64,
    pub student_id: i64,
    pub tutor_id: i64,
    pub rating: i32,
    pub review: Option<String>,
}
