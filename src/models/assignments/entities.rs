use serde::{Deserialize, Serialize};
use ts_rs::TS;

use super::status::AssignmentStatus;

// 附件类型
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, TS)]
#[serde(rename_all = "snake_case")]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub enum AttachmentKind {
    Image,
    Pdf,
    Other,
}

impl Default for AttachmentKind {
    fn default() -> Self {
        AttachmentKind::Other
    }
}

// 附件：文件本体存放在外部对象存储，这里只记录 URL
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Attachment {
    pub file_name: String,
    pub file_url: String,
    #[serde(default)]
    pub file_type: AttachmentKind,
}

// 学生提交
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Submission {
    pub remarks: Option<String>,
    pub attachments: Vec<Attachment>,
    pub submitted_at: chrono::DateTime<chrono::Utc>,
}

// 家教点评
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Feedback {
    pub content: String,
    pub grade: Option<f64>,
    pub provided_at: chrono::DateTime<chrono::Utc>,
}

// 作业：家教在某个预约下布置给学生的任务
#[derive(Debug, Clone, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/assignment.ts")]
pub struct Assignment {
    pub id: i64,
    pub booking_id: i64,
    pub student_id: i64,
    pub tutor_id: i64,
    pub title: String,
    pub subject: String,
    pub description: String,
    pub due_date: chrono::DateTime<chrono::Utc>,
    pub attachments: Vec<Attachment>,
    pub submission: Option<Submission>,
    pub feedback: Option<Feedback>,
    pub status: AssignmentStatus,
    pub is_active: bool,
    pub created_at: chrono::DateTime<chrono::Utc>,
    pub updated_at: chrono::DateTime<chrono::Utc>,
}
