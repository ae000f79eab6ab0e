use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{BookingService, transition_error_response};
use crate::middlewares::RequireJWT;
use crate::models::bookings::requests::{BookingUpdate, PhysicalPaymentRequest};
use crate::models::bookings::status::{BookingEvent, PaymentState};
use crate::models::{ApiResponse, ErrorCode};

/// 家教登记线下收款
///
/// 只对线下授课、进行中的预约有效；预约状态本身不变。
pub async fn update_physical_payment(
    service: &BookingService,
    request: &HttpRequest,
    booking_id: i64,
    req: PhysicalPaymentRequest,
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
                "Physical booking not found or not confirmed",
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
            "You can only update your own bookings",
        )));
    }

    // 状态机守卫：线下 + ongoing 才允许登记
    if let Err(err) = booking
        .status
        .apply(booking.teaching_mode, &BookingEvent::MarkPhysicalPaid)
    {
        return Ok(transition_error_response(&err));
    }

    // 登记为已收款或回退为待收款都允许（家教手滑时可改回）
    let update = BookingUpdate {
        payment_state: Some(req.payment_state),
        ..Default::default()
    };

    match storage.update_booking(booking_id, update).await {
        Ok(Some(updated)) => {
            info!(
                "Tutor {} set physical payment of booking {} to {}",
                tutor_id, booking_id, updated.payment_state
            );
            let message = match updated.payment_state {
                PaymentState::Completed => "Physical payment status updated to completed",
                PaymentState::Pending => "Physical payment status updated to pending",
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, message)))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::BookingNotFound,
            "Booking not found",
        ))),
        Err(e) => {
            error!("Failed to update payment status: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update payment status: {e}"),
            )))
        }
    }
}
