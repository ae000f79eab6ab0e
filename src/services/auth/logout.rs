use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::debug;

use crate::models::ApiResponse;
use crate::utils::jwt::JwtUtils;

use super::AuthService;

/// 注销：清掉缓存里的 token -> 用户映射，并失效 refresh cookie
pub async fn handle_logout(
    service: &AuthService,
    request: &HttpRequest,
) -> ActixResult<HttpResponse> {
    let cache = service.get_cache(request);

    if let Some(token) = request
        .headers()
        .get("Authorization")
        .and_then(|h| h.to_str().ok())
        .and_then(|s| s.strip_prefix("Bearer "))
    {
        cache.remove(&format!("user:{token}")).await;
        debug!("Removed cached user entry on logout");
    }

    let empty_cookie = JwtUtils::create_empty_refresh_token_cookie();

    Ok(HttpResponse::Ok()
        .cookie(empty_cookie)
        .json(ApiResponse::success_empty("Logged out")))
}
