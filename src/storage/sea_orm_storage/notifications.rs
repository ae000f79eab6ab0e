use super::SeaOrmStorage;
use crate::entity::notifications::{ActiveModel, Column, Entity as Notifications};
use crate::errors::{Result, TutorEaseError};
use crate::models::{
    common::PaginationInfo,
    notifications::{
        entities::Notification, requests::NewNotification, responses::NotificationListResponse,
    },
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 写入通知
    pub async fn create_notification_impl(
        &self,
        notification: NewNotification,
    ) -> Result<Notification> {
        let model = ActiveModel {
            recipient_id: Set(notification.recipient_id),
            kind: Set(notification.kind.to_string()),
            message: Set(notification.message),
            ref_id: Set(notification.ref_id),
            is_read: Set(false),
            created_at: Set(Self::now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("写入通知失败: {e}")))?;

        Ok(result.into_notification())
    }

    /// 分页列出某用户的通知
    pub async fn list_notifications_with_pagination_impl(
        &self,
        recipient_id: i64,
        page: i64,
        size: i64,
    ) -> Result<NotificationListResponse> {
        let page = page.max(1) as u64;
        let size = size.clamp(1, 100) as u64;

        let paginator = Notifications::find()
            .filter(Column::RecipientId.eq(recipient_id))
            .order_by_desc(Column::CreatedAt)
            .paginate(&self.db, size);

        let total = paginator
            .num_items()
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询通知总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询通知页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询通知列表失败: {e}")))?;

        Ok(NotificationListResponse {
            items: models.into_iter().map(|m| m.into_notification()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 未读数量
    pub async fn count_unread_notifications_impl(&self, recipient_id: i64) -> Result<i64> {
        let count = Notifications::find()
            .filter(Column::RecipientId.eq(recipient_id))
            .filter(Column::IsRead.eq(false))
            .count(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("统计未读通知失败: {e}")))?;

        Ok(count as i64)
    }

    /// 标记已读（带归属校验，只能标记自己的通知）
    pub async fn mark_notification_read_impl(
        &self,
        recipient_id: i64,
        notification_id: i64,
    ) -> Result<bool> {
        let result = Notifications::update_many()
            .col_expr(Column::IsRead, sea_orm::sea_query::Expr::value(true))
            .filter(Column::Id.eq(notification_id))
            .filter(Column::RecipientId.eq(recipient_id))
            .exec(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("标记通知已读失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
