use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::info;

use crate::models::{ApiResponse, ErrorCode, auth::RefreshTokenResponse};
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 用 Refresh Token 换发新的 Access Token
pub async fn handle_refresh_token(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let config = service.get_config();

    let refresh_token = match JwtUtils::extract_refresh_token_from_cookie(request) {
        Some(token) => token,
        None => {
            return Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Missing refresh token",
            )));
        }
    };

    match JwtUtils::refresh_access_token(&refresh_token) {
        Ok(access_token) => Ok(HttpResponse::Ok().json(ApiResponse::success(
            RefreshTokenResponse {
                access_token,
                expires_in: config.jwt.access_token_expiry * 60,
            },
            "Token refreshed",
        ))),
        Err(e) => {
            info!("Refresh token rejected: {}", e);
            Ok(HttpResponse::Unauthorized().json(ApiResponse::error_empty(
                ErrorCode::Unauthorized,
                "Invalid or expired refresh token",
            )))
        }
    }
}
