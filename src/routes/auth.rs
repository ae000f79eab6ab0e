use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::auth::{LoginRequest, RegisterRequest};
use crate::models::users::requests::UpdateUserRequest;
use crate::services::AuthService;

// 懒加载的全局 AuthService 实例
static AUTH_SERVICE: Lazy<AuthService> = Lazy::new(AuthService::new_lazy);

// 登录
pub async fn login(req: HttpRequest, body: web::Json<LoginRequest>) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.login(&req, body.into_inner()).await
}

// 注册（学生/家教）
pub async fn register(
    req: HttpRequest,
    body: web::Json<RegisterRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.register(&req, body.into_inner()).await
}

// 获取当前用户信息
pub async fn profile(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.profile(&req).await
}

// 更新当前用户资料
pub async fn update_profile(
    req: HttpRequest,
    body: web::Json<UpdateUserRequest>,
) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.update_profile(&req, body.into_inner()).await
}

// 刷新 Access Token
pub async fn refresh_token(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.refresh_token(&req).await
}

// 注销
pub async fn logout(req: HttpRequest) -> ActixResult<HttpResponse> {
    AUTH_SERVICE.logout(&req).await
}

// 配置路由
pub fn configure_auth_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/auth")
            // 无需登录的端点
            .service(web::resource("/login").route(web::post().to(login)))
            .service(web::resource("/register").route(web::post().to(register)))
            .service(web::resource("/refresh").route(web::post().to(refresh_token)))
            // 需要登录的端点
            .service(
                web::scope("/me")
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::resource("")
                            .route(web::get().to(profile))
                            .route(web::put().to(update_profile)),
                    )
                    .service(web::resource("/logout").route(web::post().to(logout))),
            ),
    );
}
