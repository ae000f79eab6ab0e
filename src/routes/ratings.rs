use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::ratings::requests::GiveRatingRequest;
use crate::models::users::entities::UserRole;
use crate::services::RatingService;
use crate::utils::{SafeBookingIdI64, SafeTutorIdI64};

// 懒加载的全局 RatingService 实例
static RATING_SERVICE: Lazy<RatingService> = Lazy::new(RatingService::new_lazy);

// 学生提交评价
pub async fn give_rating(
    req: HttpRequest,
    body: web::Json<GiveRatingRequest>,
) -> ActixResult<HttpResponse> {
    RATING_SERVICE.give_rating(&req, body.into_inner()).await
}

// 某预约的评价
pub async fn get_booking_rating(
    req: HttpRequest,
    path: SafeBookingIdI64,
) -> ActixResult<HttpResponse> {
    RATING_SERVICE.get_booking_rating(&req, path.0).await
}

// 某家教的评价汇总
pub async fn list_tutor_ratings(
    req: HttpRequest,
    path: SafeTutorIdI64,
) -> ActixResult<HttpResponse> {
    RATING_SERVICE.list_tutor_ratings(&req, path.0).await
}

// 配置路由
pub fn configure_ratings_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/ratings")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 评价 - 仅学生
                    .route(
                        web::post()
                            .to(give_rating)
                            .wrap(RequireRole::new(&UserRole::Student)),
                    ),
            )
            .service(
                web::resource("/booking/{booking_id}").route(web::get().to(get_booking_rating)),
            )
            .service(web::resource("/tutor/{tutor_id}").route(web::get().to(list_tutor_ratings))),
    );
}
