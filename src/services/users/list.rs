use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::error;

use super::UserService;
use crate::models::users::requests::UserListParams;
use crate::models::{ApiResponse, ErrorCode};

/// 用户列表（仅管理员，角色在路由层校验）
pub async fn list_users(
    service: &UserService,
    request: &HttpRequest,
    params: UserListParams,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    match storage.list_users_with_pagination(params.into()).await {
        Ok(response) => Ok(HttpResponse::Ok().json(ApiResponse::success(response, "查询成功"))),
        Err(e) => {
            error!("Failed to list users: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to list users: {e}"),
            )))
        }
    }
}
