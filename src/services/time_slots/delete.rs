use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::TimeSlotService;
use crate::middlewares::RequireJWT;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::tutor_schedule_lock;

/// 删除整份报价；任一时段已被预约则拒绝
pub async fn delete_time_slot(
    service: &TimeSlotService,
    request: &HttpRequest,
    slot_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let tutor_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let lock = tutor_schedule_lock(tutor_id);
    let _guard = lock.lock().await;

    let slot = match storage.get_time_slot_by_id(slot_id).await {
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

    if slot.tutor_id != tutor_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only delete your own time slots",
        )));
    }

    if slot.has_booked_ranges() {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::SlotHasBookings,
            "Cannot delete time slot as it contains booked sessions",
        )));
    }

    match storage.delete_time_slot(slot_id).await {
        Ok(true) => {
            info!("Tutor {} deleted time slot {}", tutor_id, slot_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Time slot deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TimeSlotNotFound,
            "Time slot not found",
        ))),
        Err(e) => {
            error!("Failed to delete time slot: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete time slot: {e}"),
            )))
        }
    }
}
