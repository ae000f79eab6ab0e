use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::TimeSlotService;
use crate::middlewares::RequireJWT;
use crate::models::time_slots::responses::RangeDeleteResponse;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::tutor_schedule_lock;

/// 删除报价里的单条时段
///
/// 已预约的时段不可删除；删除最后一条时段时整份报价随之删除。
pub async fn delete_time_slot_range(
    service: &TimeSlotService,
    request: &HttpRequest,
    slot_id: i64,
    range_id: i64,
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
            "You can only modify your own time slots",
        )));
    }

    let range = match slot.time_ranges.iter().find(|r| r.id == range_id) {
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
            ErrorCode::CannotModifyBookedSlot,
            "Cannot delete a booked time slot",
        )));
    }

    if let Err(e) = storage.delete_time_slot_range(range_id).await {
        error!("Failed to delete time slot range: {}", e);
        return Ok(
            HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete time slot range: {e}"),
            )),
        );
    }

    // 最后一条时段被删除时，整份报价一并删除
    let remaining = slot.time_ranges.len() - 1;
    if remaining == 0 {
        if let Err(e) = storage.delete_time_slot(slot_id).await {
            error!("Failed to delete emptied time slot: {}", e);
        }
        info!(
            "Tutor {} deleted last range of time slot {}, slot removed",
            tutor_id, slot_id
        );
        return Ok(HttpResponse::Ok().json(ApiResponse::success(
            RangeDeleteResponse {
                slot_deleted: true,
                remaining: None,
            },
            "Time slot document deleted as no slots remained",
        )));
    }

    let updated = storage.get_time_slot_by_id(slot_id).await.ok().flatten();
    info!(
        "Tutor {} deleted range {} from time slot {}",
        tutor_id, range_id, slot_id
    );

    Ok(HttpResponse::Ok().json(ApiResponse::success(
        RangeDeleteResponse {
            slot_deleted: false,
            remaining: updated,
        },
        "Individual time slot deleted successfully",
    )))
}
