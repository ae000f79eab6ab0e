use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::NotificationService;
use crate::middlewares::RequireJWT;
use crate::models::notifications::responses::UnreadCountResponse;
use crate::models::{ApiResponse, ErrorCode};

/// 当前用户的未读通知数
pub async fn count_unread(
    service: &NotificationService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    match storage.count_unread_notifications(user_id).await {
        Ok(count) => Ok(HttpResponse::Ok()
            .json(ApiResponse::success(UnreadCountResponse { count }, "查询成功"))),
        Err(e) => {
            error!("Failed to count notifications: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to count notifications: {e}"),
            )))
        }
    }
}
