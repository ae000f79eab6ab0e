use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{TimeSlotService, schedule_error_response};
use crate::errors::TutorEaseError;
use crate::middlewares::RequireJWT;
use crate::models::time_slots::entities::TimeSlot;
use crate::models::time_slots::requests::{
    RangeReplacement, TimeSlotReplacement, UpdateTimeSlotRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::scheduling::{self, DaySet, OfferingWindow, ScheduleError, SlotTimes};
use crate::services::tutor_schedule_lock;
use crate::utils::validate::validate_fee;

/// 存在已预约时段时，除时段列表外的所有字段都被冻结
fn check_frozen_fields(existing: &TimeSlot, req: &UpdateTimeSlotRequest) -> Result<(), ScheduleError> {
    let existing_days: DaySet = existing.days_of_week.iter().copied().collect();
    let new_days: DaySet = req.days_of_week.iter().copied().collect();

    let unchanged = existing.subject_name == req.subject_name
        && existing.grade_level == req.grade_level
        && existing.timezone == req.timezone
        && existing.notes == req.notes
        && existing.fee == req.fee
        && existing_days == new_days;

    if unchanged {
        Ok(())
    } else {
        Err(ScheduleError::LockedByBooking)
    }
}

pub async fn update_time_slot(
    service: &TimeSlotService,
    request: &HttpRequest,
    slot_id: i64,
    req: UpdateTimeSlotRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let tutor = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if let Err(msg) = validate_fee(req.fee) {
        return Ok(HttpResponse::BadRequest()
            .json(ApiResponse::error_empty(ErrorCode::BadRequest, msg)));
    }

    // 冲突检测到写入之间持有该家教的排课锁
    let lock = tutor_schedule_lock(tutor.id);
    let _guard = lock.lock().await;

    // 报价必须存在且属于当前家教
    let existing = match storage.get_time_slot_by_id(slot_id).await {
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
    if existing.tutor_id != tutor.id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only modify your own time slots",
        )));
    }

    let new_times: Vec<SlotTimes> = req.time_ranges.iter().map(|r| r.to_slot_times()).collect();

    // 已预约时段必须原样保留，其余字段冻结
    if existing.has_booked_ranges() {
        let old_ranges: Vec<(SlotTimes, bool)> = existing
            .time_ranges
            .iter()
            .map(|r| {
                (
                    SlotTimes::new(r.start_time.clone(), r.end_time.clone()),
                    r.is_booked,
                )
            })
            .collect();

        if let Err(schedule_err) = scheduling::check_booked_ranges_preserved(&old_ranges, &new_times)
        {
            return Ok(schedule_error_response(&schedule_err));
        }
        if let Err(schedule_err) = check_frozen_fields(&existing, &req) {
            return Ok(schedule_error_response(&schedule_err));
        }
    }

    // 与其余报价做冲突检测（排除当前报价自身）
    let candidate = OfferingWindow::new(
        req.days_of_week.iter().copied().collect(),
        new_times.clone(),
    );
    let others = match storage.get_tutor_offerings(tutor.id, Some(slot_id)).await {
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
    let windows: Vec<OfferingWindow> = others.iter().map(|slot| slot.to_window()).collect();

    if let Err(schedule_err) = scheduling::check_candidate(&candidate, &windows) {
        return Ok(schedule_error_response(&schedule_err));
    }

    // 已预约的时段沿用原行（按起止时间匹配），其余重建
    let ranges: Vec<RangeReplacement> = req
        .time_ranges
        .iter()
        .map(|r| {
            let was_booked = existing.time_ranges.iter().any(|old| {
                old.is_booked && old.start_time == r.start_time && old.end_time == r.end_time
            });
            RangeReplacement {
                start_time: r.start_time.clone(),
                end_time: r.end_time.clone(),
                is_booked: was_booked,
            }
        })
        .collect();

    let replacement = TimeSlotReplacement {
        subject_name: req.subject_name,
        grade_level: req.grade_level,
        days_of_week: req.days_of_week,
        fee: req.fee,
        timezone: req.timezone,
        notes: req.notes,
        ranges,
    };

    match storage
        .replace_time_slot(slot_id, req.version, replacement)
        .await
    {
        Ok(Some(slot)) => {
            info!("Tutor {} updated time slot {}", tutor.id, slot_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(slot, "Time slot updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::TimeSlotNotFound,
            "Time slot not found",
        ))),
        Err(TutorEaseError::VersionConflict(msg)) => Ok(HttpResponse::Conflict()
            .json(ApiResponse::error_empty(ErrorCode::VersionConflict, msg))),
        Err(e) => {
            error!("Failed to update time slot: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update time slot: {e}"),
            )))
        }
    }
}
