use serde::Serialize;
use ts_rs::TS;

use super::entities::Rating;

// 某家教的评价汇总
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/rating.ts")]
pub struct TutorRatingsResponse {
    /// 保留两位小数的平均分，无评价时为 0
    pub avg_rating: f64,
    pub total_ratings: i64,
    pub ratings: Vec<Rating>,
}
