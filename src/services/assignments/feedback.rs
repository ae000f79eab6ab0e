use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{AssignmentService, assignment_transition_error_response};
use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::ProvideFeedbackRequest;
use crate::models::assignments::status::AssignmentEvent;
use crate::models::notifications::entities::NotificationKind;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify;

/// 家教点评作业
///
/// 只有 completed/reviewed 状态允许点评（NotReadyForFeedback 由
/// 状态机给出）；reviewed 上再次点评会覆盖旧点评。
pub async fn provide_feedback(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    req: ProvideFeedbackRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let tutor_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if req.content.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Feedback content is required",
        )));
    }

    let assignment = match storage.get_assignment_by_id(assignment_id).await {
        Ok(Some(assignment)) => assignment,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::AssignmentNotFound,
                "Assignment not found",
            )));
        }
        Err(e) => {
            error!("Failed to load assignment: {}", e);
            return Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                    ErrorCode::StorageUnavailable,
                    "Failed to load assignment, please retry",
                )),
            );
        }
    };

    if assignment.tutor_id != tutor_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only review your own assignments",
        )));
    }

    let new_status = match assignment.status.apply(AssignmentEvent::ProvideFeedback) {
        Ok(status) => status,
        Err(err) => return Ok(assignment_transition_error_response(&err)),
    };

    match storage
        .provide_assignment_feedback(assignment_id, req.content, req.grade, new_status)
        .await
    {
        Ok(Some(updated)) => {
            info!("Tutor {} reviewed assignment {}", tutor_id, assignment_id);
            notify(
                &storage,
                updated.student_id,
                NotificationKind::Assignment,
                "Your assignment has been reviewed",
                updated.id,
            )
            .await;

            Ok(HttpResponse::Ok()
                .json(ApiResponse::success(updated, "Feedback provided successfully")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => {
            error!("Failed to provide feedback: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to provide feedback: {e}"),
            )))
        }
    }
}
