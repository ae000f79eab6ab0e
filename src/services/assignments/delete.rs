use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::assignments::status::AssignmentStatus;
use crate::models::{ApiResponse, ErrorCode};

/// 删除作业；学生已提交后不可删除
pub async fn delete_assignment(
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
            "You can only delete your own assignments",
        )));
    }

    if assignment.status != AssignmentStatus::Assigned {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidTransition,
            "Only assignments without submissions can be deleted",
        )));
    }

    match storage.delete_assignment(assignment_id).await {
        Ok(true) => {
            info!("Tutor {} deleted assignment {}", tutor_id, assignment_id);
            Ok(HttpResponse::Ok().json(ApiResponse::success_empty("Assignment deleted successfully")))
        }
        Ok(false) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => {
            error!("Failed to delete assignment: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to delete assignment: {e}"),
            )))
        }
    }
}
