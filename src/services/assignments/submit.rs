use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::{AssignmentService, assignment_transition_error_response};
use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::SubmitAssignmentRequest;
use crate::models::assignments::status::AssignmentEvent;
use crate::models::notifications::entities::NotificationKind;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify;

/// 学生提交作业
///
/// 过了截止时间的提交落为 overdue；unsubmitted 终态下不再接受提交
/// （状态机直接拒绝）。
pub async fn submit_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    assignment_id: i64,
    req: SubmitAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let student_id = match RequireJWT::extract_user_id(request) {
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

    if assignment.student_id != student_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only submit your own assignments",
        )));
    }

    let late = chrono::Utc::now() > assignment.due_date;
    let new_status = match assignment.status.apply(AssignmentEvent::Submit { late }) {
        Ok(status) => status,
        Err(err) => return Ok(assignment_transition_error_response(&err)),
    };

    match storage
        .submit_assignment(assignment_id, req.remarks, req.attachments, new_status)
        .await
    {
        Ok(Some(updated)) => {
            info!(
                "Student {} submitted assignment {} ({})",
                student_id, assignment_id, updated.status
            );
            notify(
                &storage,
                updated.tutor_id,
                NotificationKind::Assignment,
                "An assignment has been submitted",
                updated.id,
            )
            .await;

            let message = if late {
                "Assignment submitted after the due date"
            } else {
                "Assignment submitted successfully"
            };
            Ok(HttpResponse::Ok().json(ApiResponse::success(updated, message)))
        }
        Ok(None) => Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
            ErrorCode::AssignmentNotFound,
            "Assignment not found",
        ))),
        Err(e) => {
            error!("Failed to submit assignment: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to submit assignment: {e}"),
            )))
        }
    }
}
