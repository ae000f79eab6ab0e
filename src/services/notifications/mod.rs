pub mod count;
pub mod list;

use actix_web::{HttpRequest, HttpResponse, Result as ActixResult};
use std::sync::Arc;
use tracing::warn;

use crate::models::common::PaginationQuery;
use crate::models::notifications::entities::NotificationKind;
use crate::models::notifications::requests::NewNotification;
use crate::storage::Storage;

pub struct NotificationService {
    storage: Option<Arc<dyn Storage>>,
}

impl NotificationService {
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

    pub async fn count_unread(&self, request: &HttpRequest) -> ActixResult<HttpResponse> {
        count::count_unread(self, request).await
    }

    pub async fn list_notifications(
        &self,
        request: &HttpRequest,
        query: PaginationQuery,
    ) -> ActixResult<HttpResponse> {
        list::list_notifications(self, request, query).await
    }

    pub async fn mark_read(
        &self,
        request: &HttpRequest,
        notification_id: i64,
    ) -> ActixResult<HttpResponse> {
        list::mark_read(self, request, notification_id).await
    }
}

/// 各业务服务写通知的统一入口
///
/// 通知失败不影响主流程，只记日志。实时推送由独立的消息层
/// 消费通知表完成，这里不直接触达。
pub(crate) async fn notify(
    storage: &Arc<dyn Storage>,
    recipient_id: i64,
    kind: NotificationKind,
    message: impl Into<String>,
    ref_id: i64,
) {
    let notification = NewNotification {
        recipient_id,
        kind,
        message: message.into(),
        ref_id,
    };
    if let Err(e) = storage.create_notification(notification).await {
        warn!("Failed to create notification for user {}: {}", recipient_id, e);
    }
}
