use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::payments::requests::{ConfirmPaymentRequest, InitiatePaymentRequest};
use crate::models::users::entities::UserRole;
use crate::services::PaymentService;

// 懒加载的全局 PaymentService 实例
static PAYMENT_SERVICE: Lazy<PaymentService> = Lazy::new(PaymentService::new_lazy);

// 学生发起线上支付
pub async fn initiate_payment(
    req: HttpRequest,
    body: web::Json<InitiatePaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.initiate_payment(&req, body.into_inner()).await
}

// 支付网关回调（网关侧身份由订单号承载，不走用户 JWT）
pub async fn confirm_payment(
    req: HttpRequest,
    query: web::Query<ConfirmPaymentRequest>,
) -> ActixResult<HttpResponse> {
    PAYMENT_SERVICE.confirm_payment(&req, query.into_inner()).await
}

// 配置路由
pub fn configure_payments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/payments")
            .service(
                web::scope("/initiate")
                    .wrap(middlewares::RequireJWT)
                    .service(
                        web::resource("").route(
                            web::post()
                                .to(initiate_payment)
                                .wrap(RequireRole::new(&UserRole::Student)),
                        ),
                    ),
            )
            .service(web::resource("/confirm").route(web::get().to(confirm_payment))),
    );
}
