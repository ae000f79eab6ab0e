use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{BookingService, transition_error_response};
use crate::middlewares::RequireJWT;
use crate::models::bookings::requests::BookingUpdate;
use crate::models::bookings::status::BookingEvent;
use crate::models::notifications::entities::NotificationKind;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify;

/// 家教接受预约请求
///
/// 线下授课直接进入 ongoing，线上授课进入 confirmed 等待支付。
pub async fn confirm_booking(
    service: &BookingService,
    request: &HttpRequest,
    booking_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let tutor_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let booking = match storage.get_booking_by_id(booking_id).await {
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

    if booking.tutor_id != tutor_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only confirm your own bookings",
        )));
    }

    let transition = match booking
        .status
        .apply(booking.teaching_mode, &BookingEvent::TutorConfirm)
    {
        Ok(transition) => transition,
        Err(err) => return Ok(transition_error_response(&err)),
    };

    let update = BookingUpdate {
        status: Some(transition.status),
        payment_state: transition.payment_state,
        ..Default::default()
    };

    match storage.update_booking(booking_id, update).await {
        Ok(Some(updated)) => {
            info!(
                "Tutor {} confirmed booking {} -> {}",
                tutor_id, booking_id, updated.status
            );
            notify(
                &storage,
                updated.student_id,
                NotificationKind::Booking,
                "Your Booking request has been Confirmed!",
                updated.id,
            )
            .await;

            let message = match updated.teaching_mode {
                crate::models::users::entities::TeachingMode::Online => {
                    "Booking confirmed, awaiting online payment"
                }
                crate::models::users::entities::TeachingMode::Physical => {
                    "Booking confirmed, pending physical payment"
                }
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, message)))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BookingNotFound,
            "Booking not found",
        ))),
        Err(e) => {
            error!("Failed to confirm booking: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to confirm booking: {e}"),
            )))
        }
    }
}
