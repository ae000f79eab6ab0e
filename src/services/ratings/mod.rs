pub mod create;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::ratings::requests::GiveRatingRequest;
use crate::storage::Storage;

pub struct RatingService {
    storage: Option<Arc<dyn Storage>>,
}

impl RatingService {
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

    pub async fn give_rating(
        &self,
        request: &HttpRequest,
        req: GiveRatingRequest,
    ) -> ActixResult<HttpResponse> {
        create::give_rating(self, request, req).await
    }

    pub async fn get_booking_rating(
        &self,
        request: &HttpRequest,
        booking_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::get_booking_rating(self, request, booking_id).await
    }

    pub async fn list_tutor_ratings(
        &self,
        request: &HttpRequest,
        tutor_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::list_tutor_ratings(self, request, tutor_id).await
    }
}
