use serde::Serialize;
use ts_rs::TS;

use super::entities::Notification;
use crate::models::common::PaginationInfo;

// 通知列表响应
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct NotificationListResponse {
    pub pagination: PaginationInfo,
    pub items: Vec<Notification>,
}

// 未读数量
#[derive(Debug, Serialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct UnreadCountResponse {
    pub count: i64,
}
