use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{BookingService, transition_error_response};
use crate::middlewares::RequireJWT;
use crate::models::bookings::requests::{BookingUpdate, CancelBookingRequest};
use crate::models::bookings::status::BookingEvent;
use crate::models::notifications::entities::NotificationKind;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify;

/// 取消预约（家教或学生，必须是预约的当事人）
///
/// 取消后释放被占用的时段，并通知另一方。
pub async fn cancel_booking(
    service: &BookingService,
    request: &HttpRequest,
    booking_id: i64,
    req: CancelBookingRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user_id = match RequireJWT::extract_user_id(request) {
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

    if booking.tutor_id != user_id && booking.student_id != user_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You are not a party to this booking",
        )));
    }

    let transition = match booking.status.apply(
        booking.teaching_mode,
        &BookingEvent::Cancel {
            reason: &req.cancellation_reason,
        },
    ) {
        Ok(transition) => transition,
        Err(err) => return Ok(transition_error_response(&err)),
    };

    let update = BookingUpdate {
        status: Some(transition.status),
        cancellation_reason: Some(req.cancellation_reason),
        is_active: Some(false),
        ..Default::default()
    };

    match storage.update_booking(booking_id, update).await {
        Ok(Some(updated)) => {
            // 释放被占用的时段
            if let Err(e) = storage.set_range_booked(updated.range_id, false).await {
                error!("Failed to release range after cancellation: {}", e);
            }

            // 通知另一方
            let recipient = if user_id == updated.tutor_id {
                updated.student_id
            } else {
                updated.tutor_id
            };
            notify(
                &storage,
                recipient,
                NotificationKind::Booking,
                "Your Booking request has been Cancelled!",
                updated.id,
            )
            .await;

            info!("User {} cancelled booking {}", user_id, booking_id);
            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(updated, "Booking cancelled successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BookingNotFound,
            "Booking not found",
        ))),
        Err(e) => {
            error!("Failed to cancel booking: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to cancel booking: {e}"),
            )))
        }
    }
}
