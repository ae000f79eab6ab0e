use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use crate::middlewares::RequireJWT;
use crate::models::{
    ApiResponse, ErrorCode, auth::UserInfoResponse, users::requests::UpdateUserRequest,
};

use super::AuthService;

/// 获取当前登录用户信息
pub async fn handle_profile(
    _service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    match RequireJWT::extract_user_claims(request) {
        Some(user) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user },
            "Profile retrieved",
        ))),
        None => Ok(HttpResponse::Unauthorized()
            .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录"))),
    }
}

/// 更新当前登录用户资料
///
/// 状态字段只有管理员能改，这里强制丢弃。
pub async fn handle_update_profile(
    service: &AuthService,
    request: &HttpRequest,
    mut update: UpdateUserRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let user = match RequireJWT::extract_user_claims(request) {
        Some(user) => user,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    update.status = None;

    // 密码修改走哈希
    if let Some(ref password) = update.password {
        match crate::utils::validate::validate_password_simple(password) {
            Ok(()) => match crate::utils::password::hash_password(password) {
                Ok(hash) => update.password = Some(hash),
                Err(e) => {
                    error!("Failed to hash password: {}", e);
                    return Ok(HttpResponse::InternalServerError().json(
                        ApiResponse::error_empty(
                            ErrorCode::InternalServerError,
                            "Profile update failed",
                        ),
                    ));
                }
            },
            Err(msg) => {
                return Ok(HttpResponse::BadRequest()
                    .json(ApiResponse::error_empty(ErrorCode::UserPasswordInvalid, msg)));
            }
        }
    }

    if let Some(ref email) = update.email {
        if let Err(msg) = crate::utils::validate::validate_email(email) {
            return Ok(HttpResponse::BadRequest()
                .json(ApiResponse::error_empty(ErrorCode::UserEmailInvalid, msg)));
        }
    }

    match storage.update_user(user.id, update).await {
        Ok(Some(updated)) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            UserInfoResponse { user: updated },
            "Profile updated",
        ))),
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::UserNotFound,
            "User not found",
        ))),
        Err(e) => {
            error!("Failed to update profile: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::UserUpdateFailed,
                format!("Profile update failed: {e}"),
            )))
        }
    }
}
