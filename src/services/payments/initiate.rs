use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::PaymentService;
use crate::middlewares::RequireJWT;
use crate::models::bookings::requests::BookingUpdate;
use crate::models::bookings::status::BookingEvent;
use crate::models::payments::requests::{InitiatePaymentRequest, NewPayment};
use crate::models::{ApiResponse, ErrorCode};
use crate::services::bookings::transition_error_response;

/// 学生发起线上支付
///
/// 预约进入 paymentPending 并生成支付单；网关交互（跳转、签名）
/// 由外部网关适配层处理，这里只产出订单号与金额。
pub async fn initiate_payment(
    service: &PaymentService,
    request: &HttpRequest,
    req: InitiatePaymentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
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

    if booking.student_id != student_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only pay for your own bookings",
        )));
    }

    // 状态机守卫：线上授课、confirmed/ongoing 才能发起支付
    let transition = match booking
        .status
        .apply(booking.teaching_mode, &BookingEvent::InitiatePayment)
    {
        Ok(transition) => transition,
        Err(err) => return Ok(transition_error_response(&err)),
    };

    let new_payment = NewPayment {
        booking_id: booking.id,
        student_id,
        amount: booking.total_amount,
        order_ref: uuid::Uuid::new_v4().to_string(),
    };

    let payment = match storage.create_payment(new_payment).await {
        Ok(payment) => payment,
        Err(e) => {
            error!("Failed to create payment record: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to initiate payment: {e}"),
                )),
            );
        }
    };

    let update = BookingUpdate {
        status: Some(transition.status),
        ..Default::default()
    };
    if let Err(e) = storage.update_booking(booking.id, update).await {
        error!("Failed to move booking into paymentPending: {}", e);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to initiate payment: {e}"),
            )),
        );
    }

    info!(
        "Student {} initiated payment {} for booking {}",
        student_id, payment.order_ref, booking.id
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(payment, "Payment Initiated Successfully")))
}
