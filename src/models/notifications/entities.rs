use serde::{Deserialize, Serialize};
use ts_rs::TS;

// 通知类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub enum NotificationKind {
    Booking,
    Rating,
    Assignment,
}

impl std::fmt::Display for NotificationKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            NotificationKind::Booking => write!(f, "booking"),
            NotificationKind::Rating => write!(f, "rating"),
            NotificationKind::Assignment => write!(f, "assignment"),
        }
    }
}

impl std::str::FromStr for NotificationKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "booking" => Ok(NotificationKind::Booking),
            "rating" => Ok(NotificationKind::Rating),
            "assignment" => Ok(NotificationKind::Assignment),
            _ => Err(format!("Invalid notification kind: {s}")),
        }
    }
}

// 领域事件落库形成的通知行；实时推送由独立的消息层消费，不在本服务内
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/notification.ts")]
pub struct Notification {
    pub id: i64,
    pub recipient_id: i64,
    pub kind: NotificationKind,
    pub message: String,
    /// 指向触发通知的业务对象（预约/评价/作业）
    pub ref_id: i64,
    pub is_read: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
}
