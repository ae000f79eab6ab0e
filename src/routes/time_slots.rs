use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::time_slots::requests::{
    CreateTimeSlotRequest, TimeSlotListParams, UpdateTimeSlotRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::TimeSlotService;
use crate::utils::{SafeIDI64, SafeRangeIdI64, SafeTutorIdI64};

// 懒加载的全局 TimeSlotService 实例
static TIME_SLOT_SERVICE: Lazy<TimeSlotService> = Lazy::new(TimeSlotService::new_lazy);

// 创建时段报价
pub async fn create_time_slot(
    req: HttpRequest,
    body: web::Json<CreateTimeSlotRequest>,
) -> ActixResult<HttpResponse> {
    TIME_SLOT_SERVICE
        .create_time_slot(&req, body.into_inner())
        .await
}

// 家教查看自己的报价
pub async fn list_my_time_slots(
    req: HttpRequest,
    query: web::Query<TimeSlotListParams>,
) -> ActixResult<HttpResponse> {
    TIME_SLOT_SERVICE
        .list_my_time_slots(&req, query.into_inner())
        .await
}

// 按家教查看启用中的报价
pub async fn list_tutor_time_slots(
    req: HttpRequest,
    path: SafeTutorIdI64,
    query: web::Query<TimeSlotListParams>,
) -> ActixResult<HttpResponse> {
    TIME_SLOT_SERVICE
        .list_tutor_time_slots(&req, path.0, query.into_inner())
        .await
}

// 更新时段报价
pub async fn update_time_slot(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<UpdateTimeSlotRequest>,
) -> ActixResult<HttpResponse> {
    TIME_SLOT_SERVICE
        .update_time_slot(&req, path.0, body.into_inner())
        .await
}

// 删除整份报价
pub async fn delete_time_slot(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    TIME_SLOT_SERVICE.delete_time_slot(&req, path.0).await
}

// 删除单条时段
pub async fn delete_time_slot_range(
    req: HttpRequest,
    slot: SafeIDI64,
    range: SafeRangeIdI64,
) -> ActixResult<HttpResponse> {
    TIME_SLOT_SERVICE
        .delete_time_slot_range(&req, slot.0, range.0)
        .await
}

// 配置路由
pub fn configure_time_slots_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/timeslots")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 创建报价 - 仅家教
                    .route(
                        web::post()
                            .to(create_time_slot)
                            .wrap(RequireRole::new(&UserRole::Tutor)),
                    ),
            )
            // 家教查看自己的报价
            .service(
                web::resource("/my")
                    .route(web::get().to(list_my_time_slots))
                    .wrap(RequireRole::new(&UserRole::Tutor)),
            )
            // 学生按家教浏览报价 - 所有登录用户可访问
            .service(web::resource("/tutor/{tutor_id}").route(web::get().to(list_tutor_time_slots)))
            .service(
                web::resource("/{id}")
                    // 更新报价 - 仅家教（归属在业务层校验）
                    .route(
                        web::put()
                            .to(update_time_slot)
                            .wrap(RequireRole::new(&UserRole::Tutor)),
                    )
                    // 删除报价 - 仅家教
                    .route(
                        web::delete()
                            .to(delete_time_slot)
                            .wrap(RequireRole::new(&UserRole::Tutor)),
                    ),
            )
            // 删除报价内单条时段 - 仅家教
            .service(
                web::resource("/{id}/ranges/{range_id}").route(
                    web::delete()
                        .to(delete_time_slot_range)
                        .wrap(RequireRole::new(&UserRole::Tutor)),
                ),
            ),
    );
}
