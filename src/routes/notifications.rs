use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares;
use crate::models::common::PaginationQuery;
use crate::services::NotificationService;
use crate::utils::SafeIDI64;

// 懒加载的全局 NotificationService 实例
static NOTIFICATION_SERVICE: Lazy<NotificationService> = Lazy::new(NotificationService::new_lazy);

// 通知列表
pub async fn list_notifications(
    req: HttpRequest,
    query: web::Query<PaginationQuery>,
) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE
        .list_notifications(&req, query.into_inner())
        .await
}

// 未读数量
pub async fn count_unread(req: HttpRequest) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.count_unread(&req).await
}

// 标记已读
pub async fn mark_read(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    NOTIFICATION_SERVICE.mark_read(&req, path.0).await
}

// 配置路由
pub fn configure_notifications_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/notifications")
            .wrap(middlewares::RequireJWT)
            .service(web::resource("").route(web::get().to(list_notifications)))
            .service(web::resource("/unread-count").route(web::get().to(count_unread)))
            .service(web::resource("/{id}/read").route(web::put().to(mark_read))),
    );
}
