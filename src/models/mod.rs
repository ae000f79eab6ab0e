//! 数据模型定义
//!
//! 每个业务域一个子模块，内部按 entities / requests / responses 拆分。

pub mod common;

pub mod assignments;
pub mod auth;
pub mod bookings;
pub mod notifications;
pub mod payments;
pub mod ratings;
pub mod time_slots;
pub mod users;

pub use common::error_code::ErrorCode;
pub use common::response::ApiResponse;

/// 程序启动时间（用于运行状态接口与启动耗时统计）
#[derive(Debug, Clone)]
pub struct AppStartTime {
    pub start_datetime: chrono::DateTime<chrono::Utc>,
}
