use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::RatingService;
use crate::middlewares::RequireJWT;
use crate::models::bookings::requests::BookingUpdate;
use crate::models::bookings::status::BookingEvent;
use crate::models::notifications::entities::NotificationKind;
use crate::models::ratings::requests::{GiveRatingRequest, NewRating};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::bookings::transition_error_response;
use crate::services::notifications::notify;

/// 学生评价已完成的预约
///
/// 状态机保证只有 completed 预约可评、rated 不可再评；
/// 评价表上 booking_id 的唯一约束在并发下兜底。
pub async fn give_rating(
    service: &RatingService,
    request: &HttpRequest,
    req: GiveRatingRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let booking = match storage.get_booking_by_id(req.booking_id).await {
        Ok(Some(booking)) => booking,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BookingNotFound,
                "Booking not found",
            )));
        }
        Err(e) => {
            error!("Failed to load booking: {}", e);
            return Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                    ErrorCode::StorageUnavailable,
                    "Failed to load booking, please retry",
                )),
            );
        }
    };

    if booking.student_id != student.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only rate your own bookings",
        )));
    }

    // 状态机守卫：completed 才能评，rated 给 AlreadyRated，星级 1-5
    let transition = match booking.status.apply(
        booking.teaching_mode,
        &BookingEvent::SubmitRating { stars: req.rating },
    ) {
        Ok(transition) => transition,
        Err(err) => return Ok(transition_error_response(&err)),
    };

    let new_rating = NewRating {
        booking_id: booking.id,
        student_id: student.id,
        tutor_id: booking.tutor_id,
        rating: req.rating,
        review: req.review,
    };

    let rating = match storage.create_rating(new_rating).await {
        Ok(rating) => rating,
        Err(e) => {
            // 唯一约束命中说明并发下已有评价
            let msg = e.to_string();
            if msg.contains("UNIQUE constraint failed") {
                return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                    ErrorCode::AlreadyRated,
                    "This booking has already been rated",
                )));
            }
            error!("Failed to create rating: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to submit rating: {e}"),
                )),
            );
        }
    };

    let update = BookingUpdate {
        status: Some(transition.status),
        ..Default::default()
    };
    if let Err(e) = storage.update_booking(booking.id, update).await {
        error!("Failed to mark booking rated: {}", e);
    }

    notify(
        &storage,
        booking.tutor_id,
        NotificationKind::Rating,
        format!(
            "You have received a new rating of {} stars! from {}",
            rating.rating, student.username
        ),
        rating.id,
    )
    .await;

    info!(
        "Student {} rated booking {} with {} stars",
        student.id, booking.id, rating.rating
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(rating, "Rating submitted successfully")))
}
