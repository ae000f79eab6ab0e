pub mod confirm;
pub mod initiate;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;

use crate::models::payments::requests::{ConfirmPaymentRequest, InitiatePaymentRequest};
use crate::storage::Storage;

pub struct PaymentService {
    storage: Option<Arc<dyn Storage>>,
}

impl PaymentService {
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

    pub async fn initiate_payment(
        &self,
        request: &HttpRequest,
        req: InitiatePaymentRequest,
    ) -> ActixResult<HttpResponse> {
        initiate::initiate_payment(self, request, req).await
    }

    pub async fn confirm_payment(
        &self,
        request: &HttpRequest,
        req: ConfirmPaymentRequest,
    ) -> ActixResult<HttpResponse> {
        confirm::confirm_payment(self, request, req).await
    }
}
