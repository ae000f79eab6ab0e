use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::UserService;
use crate::models::users::requests::UpdateUserRequest;
use crate::models::{ApiResponse, ErrorCode};

/// 管理员更新用户（状态封禁/解封等）
pub async fn update_user(
    service: &UserService,
    request: &HttpRequest,
    user_id: i64,
    mut update: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    // 管理员不代改密码
    update.password = None;

    match storage.update_user(user_id, update).await {
        Ok(Some(user)) => {
            info!("Admin updated user {}", user_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success(user, "User updated successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => {
            error!("Failed to update user: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserUpdateFailed,
                format!("Failed to update user: {e}"),
            )))
        }
    }
}
