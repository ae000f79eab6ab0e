use super::entities::NotificationKind;

// 用于存储层的新建通知（由各业务服务在领域事件发生时写入）
#[derive(Debug, Clone)]
pub struct NewNotification {
    pub recipient_id: i64,
    pub kind: NotificationKind,
    pub message: String,
    pub ref_id: i64,
}
