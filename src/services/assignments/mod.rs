pub mod create;
pub mod delete;
pub mod detail;
pub mod feedback;
pub mod list;
pub mod submit;
pub mod update_status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::assignments::requests::{
    AssignmentListParams, CreateAssignmentRequest, ProvideFeedbackRequest, SubmitAssignmentRequest,
};
use crate::models::assignments::status::AssignmentTransitionError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct AssignmentService {
    storage: Option<Arc<dyn Storage>>,
}

impl AssignmentService {
    pub fn new_lazy() -> Self {
        Self { storage: None }
    }

    pub(crate) fn get_storage(&self, request: &HttpRequest) -> Arc<dyn Storage> {
        if let Some(storage) = &self.storage {
            storage.clone()
        } else {
            request
                .app_data::<actix_web::web::Data<Arc<dyn Storage>>>()
                .expect("Storage not found in app data")
                .get_ref()
                .clone()
        }
    }

    pub async fn create_assignment(
        &self,
        request: &HttpRequest,
        req: CreateAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_assignment(self, request, req).await
    }

    pub async fn list_assignments(
        &self,
        request: &HttpRequest,
        params: AssignmentListParams,
    ) -> ActixResult<HttpResponse> {
        list::list_assignments(self, request, params).await
    }

    pub async fn get_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        detail::get_assignment(self, request, assignment_id).await
    }

    pub async fn submit_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: SubmitAssignmentRequest,
    ) -> ActixResult<HttpResponse> {
        submit::submit_assignment(self, request, assignment_id, req).await
    }

    pub async fn provide_feedback(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
        req: ProvideFeedbackRequest,
    ) -> ActixResult<HttpResponse> {
        feedback::provide_feedback(self, request, assignment_id, req).await
    }

    pub async fn mark_completed(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        update_status::mark_completed(self, request, assignment_id).await
    }

    pub async fn delete_assignment(
        &self,
        request: &HttpRequest,
        assignment_id: i64,
    ) -> ActixResult<HttpResponse> {
        delete::delete_assignment(self, request, assignment_id).await
    }
}

/// 作业状态机拒绝转移时的统一响应
pub(crate) fn assignment_transition_error_response(
    err: &AssignmentTransitionError,
) -> HttpResponse {
    match err {
        AssignmentTransitionError::InvalidTransition { .. } => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::InvalidTransition, err.to_string()),
        ),
        AssignmentTransitionError::NotReadyForFeedback { .. } => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::NotReadyForFeedback, err.to_string()),
        ),
    }
}
