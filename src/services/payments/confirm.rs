use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info, warn};

use super::PaymentService;
use crate::models::bookings::requests::BookingUpdate;
use crate::models::bookings::status::BookingEvent;
use crate::models::notifications::entities::NotificationKind;
use crate::models::payments::entities::PaymentRecordStatus;
use crate::models::payments::requests::ConfirmPaymentRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::bookings::transition_error_response;
use crate::services::notifications::notify;

/// 支付网关回调
///
/// 网关判定通过时：支付单落为 completed，预约回到 ongoing
/// 且支付状态置为已完成；判定失败时支付单落为 failed，
/// 预约停在 paymentPending 等待重试。
pub async fn confirm_payment(
    service: &PaymentService,
    request: &HttpRequest,
    req: ConfirmPaymentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let payment = match storage.get_payment_by_order_ref(&req.order_ref).await {
        Ok(Some(payment)) => payment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::PaymentNotFound,
                "Payment not found",
            )));
        }
        Err(e) => {
            error!("Failed to load payment: {}", e);
            return Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                    ErrorCode::StorageUnavailable,
                    "Failed to load payment, please retry",
                )),
            );
        }
    };

    // 回调可能被网关重放，已落定的支付单直接返回
    if payment.status != PaymentRecordStatus::Pending {
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            payment,
            "Payment already processed",
        )));
    }

    if !req.confirmed {
        warn!("Payment {} was not verified by the gateway", req.order_ref);
        let _ = storage
            .update_payment_status(payment.id, PaymentRecordStatus::Failed, None)
            .await;
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::PaymentVerificationFailed,
            "Payment Not Verified",
        )));
    }

    let booking = match storage.get_booking_by_id(payment.booking_id).await {
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

    // 支付确认：paymentPending -> ongoing，支付状态置为已完成
    let transition = match booking
        .status
        .apply(booking.teaching_mode, &BookingEvent::PaymentConfirmed)
    {
        Ok(transition) => transition,
        Err(err) => return Ok(transition_error_response(&err)),
    };

    let updated_payment = match storage
        .update_payment_status(
            payment.id,
            PaymentRecordStatus::Completed,
            Some(req.transaction_id),
        )
        .await
    {
        Ok(Some(payment)) => payment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::PaymentNotFound,
                "Payment not found",
            )));
        }
        Err(e) => {
            error!("Failed to update payment: {}", e);
            return Ok(
                HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                    ErrorCode::InternalServerError,
                    format!("Failed to update payment: {e}"),
                )),
            );
        }
    };

    let update = BookingUpdate {
        status: Some(transition.status),
        payment_state: transition.payment_state,
        ..Default::default()
    };
    if let Err(e) = storage.update_booking(booking.id, update).await {
        error!("Failed to update booking after payment: {}", e);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update booking after payment: {e}"),
            )),
        );
    }

    notify(
        &storage,
        booking.tutor_id,
        NotificationKind::Booking,
        "An online payment has been completed for your booking",
        booking.id,
    )
    .await;

    info!(
        "Payment {} completed, booking {} moved to ongoing",
        updated_payment.order_ref, booking.id
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(updated_payment, "Payment completed")))
}
