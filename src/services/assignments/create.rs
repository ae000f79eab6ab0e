use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use tracing::{error, info};

use super::AssignmentService;
use crate::middlewares::RequireJWT;
use crate::models::assignments::requests::{CreateAssignmentRequest, NewAssignment};
use crate::models::bookings::status::BookingStatus;
use crate::models::notifications::entities::NotificationKind;
use crate::models::{ApiResponse, ErrorCode};
use crate::services::notifications::notify;

/// 家教在某个预约下布置作业
pub async fn create_assignment(
    service: &AssignmentService,
    request: &HttpRequest,
    req: CreateAssignmentRequest,
) -> ActixResult<HttpResponse> {
    let storage = service.get_storage(request);

    let tutor_id = match RequireJWT::extract_user_id(request) {
        Some(id) => id,
        None => {
            return Ok(HttpResponse::Unauthorized()
                .json(ApiResponse::error_empty(ErrorCode::Unauthorized, "未登录")));
        }
    };

    if req.title.trim().is_empty() || req.description.trim().is_empty() {
        return Ok(HttpResponse::BadRequest().json(ApiResponse::error_empty(
            ErrorCode::BadRequest,
            "Title and description are required",
        )));
    }

    let booking = match storage.get_booking_by_id(req.booking_id).await {
        Ok(Some(booking)) => booking,
        Ok(None) => {
            return Ok(HttpResponse::NotFound().json(ApiResponse::error_empty(
                ErrorCode::BookingNotFound,
                "Booking not found",
            )));
        }
        Err(e) => {
            error!("Failed to load booking: {}", e);
            return Ok(
                HttpResponse::ServiceUnavailable().json(ApiResponse::error_empty(
                    ErrorCode::StorageUnavailable,
                    "Failed to load booking, please retry",
                )),
            );
        }
    };

    if booking.tutor_id != tutor_id {
        return Ok(HttpResponse::Forbidden().json(ApiResponse::error_empty(
            ErrorCode::Forbidden,
            "You can only assign work under your own bookings",
        )));
    }

    // 只有进行中的预约可以布置作业
    if booking.status != BookingStatus::Ongoing {
        return Ok(HttpResponse::Conflict().json(ApiResponse::error_empty(
            ErrorCode::InvalidTransition,
            "Assignments can only be created for ongoing bookings",
        )));
    }

    let new_assignment = NewAssignment {
        booking_id: booking.id,
        student_id: booking.student_id,
        tutor_id,
        title: req.title,
        subject: req.subject,
        description: req.description,
        due_date: req.due_date,
        attachments: req.attachments,
    };

    match storage.create_assignment(new_assignment).await {
        Ok(assignment) => {
            info!(
                "Tutor {} created assignment {} under booking {}",
                tutor_id, assignment.id, assignment.booking_id
            );
            notify(
                &storage,
                assignment.student_id,
                NotificationKind::Assignment,
                "You have a new assignment!",
                assignment.id,
            )
            .await;

            Ok(HttpResponse::Created().json(ApiResponse::success(
                assignment,
                "Assignment created successfully",
            )))
        }
        Err(e) => {
            error!("Failed to create assignment: {}", e);
            Ok(HttpResponse::InternalServerError().json(ApiResponse::error_empty(
                ErrorCode::InternalServerError,
                format!("Failed to create assignment: {e}"),
            )))
        }
    }
}
