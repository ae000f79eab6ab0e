use actix_web::{HttpRequest, HttpResponse, Result as ActixResult, web};
use once_cell::sync::Lazy;

use crate::middlewares::{self, RequireRole};
use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, ProvideFeedbackRequest, SubmitAssignmentRequest,
};
use crate::models::users::entities::UserRole;
use crate::services::AssignmentService;
use crate::utils::SafeIDI64;

// 懒加载的全局 AssignmentService 实例
static ASSIGNMENT_SERVICE: Lazy<AssignmentService> = Lazy::new(AssignmentService::new_lazy);

// 布置作业
pub async fn create_assignment(
    req: HttpRequest,
    body: web::Json<CreateAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .create_assignment(&req, body.into_inner())
        .await
}

// 作业列表（按角色过滤）
pub async fn list_assignments(
    req: HttpRequest,
    query: web::Query<AssignmentListParams>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .list_assignments(&req, query.into_inner())
        .await
}

// 作业详情
pub async fn get_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.get_assignment(&req, path.0).await
}

// 学生提交作业
pub async fn submit_assignment(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<SubmitAssignmentRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .submit_assignment(&req, path.0, body.into_inner())
        .await
}

// 家教点评
pub async fn provide_feedback(
    req: HttpRequest,
    path: SafeIDI64,
    body: web::Json<ProvideFeedbackRequest>,
) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE
        .provide_feedback(&req, path.0, body.into_inner())
        .await
}

// 家教确认收到提交
pub async fn mark_completed(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.mark_completed(&req, path.0).await
}

// 删除作业
pub async fn delete_assignment(req: HttpRequest, path: SafeIDI64) -> ActixResult<HttpResponse> {
    ASSIGNMENT_SERVICE.delete_assignment(&req, path.0).await
}

// 配置路由
pub fn configure_assignments_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/v1/assignments")
            .wrap(middlewares::RequireJWT)
            .service(
                web::resource("")
                    // 列表 - 所有登录用户（业务层按角色过滤）
                    .route(web::get().to(list_assignments))
                    // 布置作业 - 仅家教
                    .route(
                        web::post()
                            .to(create_assignment)
                            .wrap(RequireRole::new(&UserRole::Tutor)),
                    ),
            )
            .service(
                web::resource("/{id}")
                    // 详情 - 当事人与管理员（业务层校验）
                    .route(web::get().to(get_assignment))
                    // 删除 - 仅家教
                    .route(
                        web::delete()
                            .to(delete_assignment)
                            .wrap(RequireRole::new(&UserRole::Tutor)),
                    ),
            )
            // 提交 - 仅学生
            .service(
                web::resource("/{id}/submit").route(
                    web::post()
                        .to(submit_assignment)
                        .wrap(RequireRole::new(&UserRole::Student)),
                ),
            )
            // 点评 - 仅家教
            .service(
                web::resource("/{id}/feedback").route(
                    web::post()
                        .to(provide_feedback)
                        .wrap(RequireRole::new(&UserRole::Tutor)),
                ),
            )
            // 确认收到提交 - 仅家教
            .service(
                web::resource("/{id}/complete").route(
                    web::post()
                        .to(mark_completed)
                        .wrap(RequireRole::new(&UserRole::Tutor)),
                ),
            ),
    );
}
