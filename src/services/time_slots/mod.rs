pub mod create;
pub mod delete;
pub mod delete_range;
pub mod list;
pub mod update;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::time_slots::requests::{
    CreateTimeSlotRequest, TimeSlotListParams, UpdateTimeSlotRequest,
};
use crate::models::{ApiResponse, ErrorCode};
use crate::scheduling::ScheduleError;
use crate::storage::Storage;

pub struct TimeSlotService {
    storage: Option<Arc<dyn Storage>>,
}

impl TimeSlotService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_time_slot(
        &self,
        request: &HttpRequest,
        req: CreateTimeSlotRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_time_slot(self, request, req).await
    }

    pub async fn list_my_time_slots(
        &self,
        request: &HttpRequest,
        query: TimeSlotListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_my_time_slots(self, request, query).await
    }

    pub async fn list_tutor_time_slots(
        &self,
        request: &HttpRequest,
        tutor_id: i64,
        query: TimeSlotListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_tutor_time_slots(self, request, tutor_id, query).await
    }

    pub async fn update_time_slot(
        &self,
        request: &HttpRequest,
        slot_id: i64,
        req: UpdateTimeSlotRequest,
    ) -> ActixResult<HttpResponse> {
        update::update_time_slot(self, request, slot_id, req).await
    }

    pub async fn delete_time_slot(
        &self,
        request: &HttpRequest,
        slot_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_time_slot(self, request, slot_id).await
    }

    pub async fn delete_time_slot_range(
        &self,
        request: &HttpRequest,
        slot_id: i64,
        range_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete_range::delete_time_slot_range(self, request, slot_id, range_id).await
    }
}

/// 把排课核心的错误映射为统一的 API 响应
///
/// 全部是校验类失败（4xx），消息里带上冲突的时段与星期，
/// 前端可以直接展示。
pub(crate) fn schedule_error_response(err: &ScheduleError) -> HttpResponse {
    let (code, status) = match err {
        ScheduleError::MissingField(_) => (ErrorCode::MissingTimeField, 400),
        ScheduleError::InvalidFormat(_) => (ErrorCode::InvalidTimeFormat, 400),
        ScheduleError::EndBeforeStart { .. } => (ErrorCode::EndBeforeStart, 400),
        ScheduleError::DurationTooShort { .. } => (ErrorCode::DurationTooShort, 400),
        ScheduleError::SlotConflict { .. } => (ErrorCode::SlotConflict, 409),
        ScheduleError::CannotModifyBookedSlot { .. } => (ErrorCode::CannotModifyBookedSlot, 409),
        ScheduleError::LockedByBooking => (ErrorCode::LockedByBooking, 409),
    };

    let mut builder = if status == 409 {
        HttpResponse::Conflict()
    } else {
        HttpResponse::BadRequest()
    };
    builder.json(ApiResponse::error_empty(code, err.to_string()))
}
