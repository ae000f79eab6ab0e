use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::bookings::requests::{
    CancelBookingRequest, CreateBookingRequest, PhysicalPaymentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::BookingService;
use crate::utils::SafeIDI64;

// 懒加载的全局 BookingService 实例
static BOOKING_SERVICE: Lazy<BookingService> = Lazy::new(BookingService::new_lazy);

// 学生发起预约
pub async fn create_booking(
    req: HttpRequest,
    body: web::Json<CreateBookingRequest>,
) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE.create_booking(&req, body.into_inner()).await
}

// 家教确认预约
pub async fn confirm_booking(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE.confirm_booking(&req, path.0).await
}

// 取消预约（家教或学生）
pub async fn cancel_booking(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<CancelBookingRequest>,
) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE
        .cancel_booking(&req, path.0, body.into_inner())
        .await
}

// 家教登记线下收款
pub async fn update_physical_payment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<PhysicalPaymentRequest>,
) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE
        .update_physical_payment(&req, path.0, body.into_inner())
        .await
}

// 学生的预约列表
pub async fn list_student_bookings(req: HttpRequest) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE.list_student_bookings(&req).await
}

// 家教的预约列表
pub async fn list_tutor_bookings(req: HttpRequest) -> ActixResult<HttpResponse> {
    BOOKING_SERVICE.list_tutor_bookings(&req).await
}

// 配置路由
pub fn configure_bookings_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/bookings")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 发起预约 - 仅学生
                    .route(
                        web::post()
                            .to(create_booking)
                            .wrap(RequireRole::new(&UserRole::Student)),
                    ),
            )
            // 学生视角列表
            .service(
                web::resource("/student")
                    .route(web::get().to(list_student_bookings))
                    .wrap(RequireRole::new(&UserRole::Student)),
            )
            // 家教视角列表
            .service(
                web::resource("/tutor")
                    .route(web::get().to(list_tutor_bookings))
                    .wrap(RequireRole::new(&UserRole::Tutor)),
            )
            // 确认 - 仅家教
            .service(
                web::resource("/{id}/confirm").route(
                    web::post()
                        .to(confirm_booking)
                        .wrap(RequireRole::new(&UserRole::Tutor)),
                ),
            )
            // 取消 - 当事人（归属在业务层校验）
            .service(web::resource("/{id}/cancel").route(web::post().to(cancel_booking)))
            // 线下收款登记 - 仅家教
            .service(
                web::resource("/{id}/physical-payment").route(
                    web::put()
                        .to(update_physical_payment)
                        .wrap(RequireRole::new(&UserRole::Tutor)),
                ),
            ),
    );
}
