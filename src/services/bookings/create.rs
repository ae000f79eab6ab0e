use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use chrono::Months;
use tracing::{error, info};

use super::BookingService;
use crate::middlewares::RequireJWT;
use crate::models::bookings::requests::{CreateBookingRequest, NewBooking};
use crate::models::notifications::entities::NotificationKind;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::{notifications::notify, tutor_schedule_lock};
use crate::utils::validate::validate_duration_months;

/// 学生对某条具体时段发起预约
///
/// 金额不信任客户端：月费取报价快照，总额按月数在服务端计算。
/// 时段占用通过存储层 CAS 完成，两个并发请求只有一个能占到。
pub async fn create_booking(
    service: &BookingService,
    request: &HttpRequest,
    req: CreateBookingRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if let Err(msg) = validate_duration_months(req.duration_months) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 报价与具体时段必须存在
    let slot = match storage.get_time_slot_by_id(req.time_slot_id).await {
        Ok(Some(slot)) => slot,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::TimeSlotNotFound,
                "Time slot not found",
            )));
        }
        Err(e) => {
            error!("Failed to load time slot: {}", e);
            return Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                    ErrorCode::StorageUnavailable,
                    "Failed to load time slot, please retry",
                )),
            );
        }
    };

    if slot.tutor_id != req.tutor_id {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Time slot does not belong to the given tutor",
        )));
    }

    let range = match slot.time_ranges.iter().find(|r| r.id == req.range_id) {
        Some(range) => range,
        None => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::RangeNotFound,
                "Specific time slot not found",
            )));
        }
    };
    if range.is_booked {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::RangeUnavailable,
            "This time slot is not available",
        )));
    }

    // 同一学生不能重复预约同一条时段
    match storage
        .get_student_booking_for_range(student.id, req.range_id)
        .await
    {
        Ok(Some(_)) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::RangeUnavailable,
                "You already have a booking for this time slot",
            )));
        }
        Ok(None) => {}
        Err(e) => {
            error!("Failed to check existing bookings: {}", e);
            return Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                    ErrorCode::StorageUnavailable,
                    "Failed to check existing bookings, please retry",
                )),
            );
        }
    }

    // 结束日期 = 开始日期 + 月数
    let end_date = match req.start_date.checked_add_months(Months::new(req.duration_months as u32))
    {
        Some(date) => date,
        None => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Invalid start date or duration",
            )));
        }
    };

    // 持家教排课锁后占用时段（存储层 CAS 兜底并发）
    let lock = tutor_schedule_lock(slot.tutor_id);
    let _guard = lock.lock().await;

    match storage.set_range_booked(req.range_id, true).await {
        Ok(true) => {}
        Ok(false) => {
            return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
                ErrorCode::RangeUnavailable,
                "This time slot is not available",
            )));
        }
        Err(e) => {
            error!("Failed to mark range booked: {}", e);
            return Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                    ErrorCode::StorageUnavailable,
                    "Failed to reserve the time slot, please retry",
                )),
            );
        }
    }

    let new_booking = NewBooking {
        student_id: student.id,
        tutor_id: slot.tutor_id,
        time_slot_id: slot.id,
        range_id: req.range_id,
        start_date: req.start_date,
        end_date,
        duration_months: req.duration_months,
        fee: slot.fee,
        total_amount: slot.fee * req.duration_months as f64,
        teaching_mode: slot.session_type,
        notes: req.notes,
    };

    match storage.create_booking(new_booking).await {
        Ok(booking) => {
            info!(
                "Student {} created booking {} for range {}",
                student.id, booking.id, booking.range_id
            );
            notify(
                &storage,
                booking.tutor_id,
                NotificationKind::Booking,
                "You have a new booking request!",
                booking.id,
            )
            .await;

            Ok(HttpResponse::Created().json(ApiResponse::success(
                booking,
                "Booking request created successfully",
            )))
        }
        Err(e) => {
            // 预约写入失败时释放已占用的时段
            error!("Failed to create booking: {}", e);
            if let Err(release_err) = storage.set_range_booked(req.range_id, false).await {
                error!("Failed to release range after error: {}", release_err);
            }
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create booking: {e}"),
            )))
        }
    }
}
