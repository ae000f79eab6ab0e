use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{AssignmentService, assignment_transition_error_response};
use crate::middlewares::RequireJWT;
use crate::models::assignments::status::AssignmentEvent;
use crate::models::{ApiResponse, ErrorCode};

/// 家教确认收到提交（submitted/overdue -> completed，待点评）
pub async fn mark_completed(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let tutor_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

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
            "You can only update your own assignments",
        )));
    }

    let new_status = match assignment.status.apply(AssignmentEvent::MarkCompleted) {
        Ok(status) => status,
        Err(err) => return Ok(assignment_transition_error_response(&err)),
    };

    match storage.set_assignment_status(assignment_id, new_status).await {
        Ok(Some(updated)) => {
            info!(
                "Tutor {} marked assignment {} as {}",
                tutor_id, assignment_id, updated.status
            );
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, "Assignment marked completed")))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => {
            error!("Failed to update assignment status: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to update assignment status: {e}"),
            )))
        }
    }
}
