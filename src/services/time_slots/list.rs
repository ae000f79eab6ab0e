use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::TimeSlotService;
use crate::middlewares::RequireJWT;
use crate::models::time_slots::requests::{TimeSlotListParams, TimeSlotListQuery};
use crate::models::{ApiResponse, ErrorCode};

/// 家教查看自己的报价（包含停用的）
pub async fn list_my_time_slots(
    service: &TimeSlotService,
    request: &HttpRequest,
    params: TimeSlotListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let tutor_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    let query = TimeSlotListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        tutor_id,
        subject: params.subject,
        active_only: false,
    };

    match storage.list_time_slots_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            error!("Failed to list time slots: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list time slots: {e}"),
            )))
        }
    }
}

/// 学生按家教查看启用中的报价
pub async fn list_tutor_time_slots(
    service: &TimeSlotService,
    request: &HttpRequest,
    tutor_id: i64,
    params: TimeSlotListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let query = TimeSlotListQuery {
        page: Some(params.pagination.page),
        size: Some(params.pagination.size),
        tutor_id,
        subject: params.subject,
        active_only: true,
    };

    match storage.list_time_slots_with_pagination(query).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            error!("Failed to list time slots for tutor {}: {}", tutor_id, e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list time slots: {e}"),
            )))
        }
    }
}
