use serde::Deserialize;
use ts_rs::TS;

use super::entities::Attachment;
use super::status::AssignmentStatus;
use crate::models::common::PaginationQuery;

/// 创建作业请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct CreateAssignmentRequest {
    pub booking_id: i64,
    pub title: String,
    pub subject: String,
    pub description: String,
    /// ISO 8601 格式，如 "2026-09-01T12:00:00Z"
    pub due_date: chrono::DateTime<chrono::Utc>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// 学生提交作业
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct SubmitAssignmentRequest {
    pub remarks: Option<String>,
    #[serde(default)]
    pub attachments: Vec<Attachment>,
}

/// 家教点评
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct ProvideFeedbackRequest {
    pub content: String,
    pub grade: Option<f64>,
}

/// 作业列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct AssignmentListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub status: Option<AssignmentStatus>,
    pub booking_id: Option<i64>,
}

// 用于存储层的新建作业（关联方已由服务层从预约里解出）
#[derive(Debug, Clone)]
pub struct NewAssignment {
    pub booking_id: i64,
    pub student_id: i64,
    pub tutor_id: i64,
    pub title: String,
    pub subject: String,
    pub description: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub attachments: Vec<Attachment>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct AssignmentListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub status: Option<AssignmentStatus>,
    pub booking_id: Option<i64>,
    pub student_id: Option<i64>,
    pub tutor_id: Option<i64>,
}
