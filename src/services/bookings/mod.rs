pub mod cancel;
pub mod confirm;
pub mod create;
pub mod list;
pub mod payment_status;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::bookings::requests::{CancelBookingRequest, CreateBookingRequest, PhysicalPaymentRequest};
use crate::models::bookings::status::BookingTransitionError;
use crate::models::{ApiResponse, ErrorCode};
use crate::storage::Storage;

pub struct BookingService {
    storage: Option<Arc<dyn Storage>>,
}

impl BookingService {
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

    pub async fn create_booking(
        &self,
        request: &HttpRequest,
        req: CreateBookingRequest,
    ) -> ActixResult<HttpResponse> {
        create::create_booking(self, request, req).await
    }

    pub async fn confirm_booking(
        &self,
        request: &HttpRequest,
        booking_id: i64,
    ) -> ActixResult<HttpResponse> {
        confirm::confirm_booking(self, request, booking_id).await
    }

    pub async fn cancel_booking(
        &self,
        request: &HttpRequest,
        booking_id: i64,
        req: CancelBookingRequest,
    ) -> ActixResult<HttpResponse> {
        cancel::cancel_booking(self, request, booking_id, req).await
    }

    pub async fn update_physical_payment(
        &self,
        request: &HttpRequest,
        booking_id: i64,
        req: PhysicalPaymentRequest,
    ) -> ActixResult<HttpResponse> {
        payment_status::update_physical_payment(self, request, booking_id, req).await
    }

    pub async fn list_student_bookings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_student_bookings(self, request).await
    }

    pub async fn list_tutor_bookings(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        list::list_tutor_bookings(self, request).await
    }
}

/// 状态机拒绝转移时的统一响应
pub(crate) fn transition_error_response(err: &BookingTransitionError) -> HttpResponse {
    match err {
        BookingTransitionError::InvalidTransition { .. } => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::InvalidTransition, err.to_string()),
        ),
        BookingTransitionError::ReasonRequired => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::ReasonRequired, err.to_string()),
        ),
        BookingTransitionError::AlreadyRated => HttpResponse::Conflict().json(
            ApiResponse::error_empty(ErrorCode::AlreadyRated, err.to_string()),
        ),
        BookingTransitionError::InvalidRating { .. } => HttpResponse::BadRequest().json(
            ApiResponse::error_empty(ErrorCode::InvalidRating, err.to_string()),
        ),
    }
}
