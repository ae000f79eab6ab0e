use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::RatingService;
use crate::models::ratings::responses::TutorRatingsResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 某预约的评价
pub async fn get_booking_rating(
    service: &RatingService,
    request: &HttpRequest,
    booking_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.get_rating_by_booking_id(booking_id).await {
        Ok(Some(rating)) => Ok(HttpResponse::Ok().json(ApiResponse::success(rating, "查询成功"))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::RatingNotFound,
            "该预约尚未评价",
        ))),
        Err(e) => {
            error!("Failed to load rating: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to load rating: {e}"),
            )))
        }
    }
}

/// 某家教的评价汇总（平均分保留两位小数）
pub async fn list_tutor_ratings(
    service: &RatingService,
    request: &HttpRequest,
    tutor_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_ratings_by_tutor(tutor_id).await {
        Ok(ratings) => {
            let total_ratings = ratings.len() as i64;
            let avg_rating = if total_ratings > 0 {
                let sum: i64 = ratings.iter().map(|r| r.rating as i64).sum();
                (sum as f64 / total_ratings as f64 * 100.0).round() / 100.0
            } else {
                0.0
            };

            Ok(HttpResponse::Ok().json(ApiResponse::success(
                TutorRatingsResponse {
                    avg_rating,
                    total_ratings,
                    ratings,
                },
                "查询成功",
            )))
        }
        Err(e) => {
            error!("Failed to list ratings: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list ratings: {e}"),
            )))
        }
    }
}
