use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TimeSlotService, schedule_error_response};
use crate::middlewares::RequireJWT;
use crate::models::time_slots::requests::CreateTimeSlotRequest;
use crate::models::{ApiResponse, ErrorCode};
use crate::scheduling::{self, OfferingWindow};
use crate::services::tutor_schedule_lock;
use crate::utils::validate::validate_fee;

pub async fn create_time_slot(
    service: &TimeSlotService,
    request: &HttpRequest,
    req: CreateTimeSlotRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let tutor = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    // 基础字段校验
    if req.subject_name.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Subject name is required",
        )));
    }
    if req.grade_level.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Grade level is required",
        )));
    }
    if req.timezone.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Timezone is required",
        )));
    }
    if let Err(msg) = validate_fee(req.fee) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 授课方式来自家教资料
    let session_type = match tutor.profile.teaching_location {
        Some(mode) => mode,
        None => {
            return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
                ErrorCode::BadRequest,
                "Tutor profile has no teaching location configured",
            )));
        }
    };

    // 冲突检测到写入之间持有该家教的排课锁
    let lock = tutor_schedule_lock(tutor.id);
    let _guard = lock.lock().await;

    let candidate = OfferingWindow::new(
        req.days_of_week.iter().copied().collect(),
        req.time_ranges.iter().map(|r| r.to_slot_times()).collect(),
    );

    let existing = match storage.get_tutor_offerings(tutor.id, None).await {
        Ok(offerings) => offerings,
        Err(e) => {
            error!("Failed to load tutor offerings: {}", e);
            return Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                    ErrorCode::StorageUnavailable,
                    "Failed to load existing time slots, please retry",
                )),
            );
        }
    };
    let windows: Vec<OfferingWindow> = existing.iter().map(|slot| slot.to_window()).collect();

    if let Err(schedule_err) = scheduling::check_candidate(&candidate, &windows) {
        return Ok(schedule_error_response(&schedule_err));
    }

    match storage.create_time_slot(tutor.id, session_type, req).await {
        Ok(slot) => {
            info!("Tutor {} created time slot {}", tutor.id, slot.id);
            Ok(HttpResponse::Created()
                .json(ApiResponse::success(slot, "Time slot created successfully")))
        }
        Err(e) => {
            error!("Failed to create time slot: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create time slot: {e}"),
            )))
        }
    }
}
