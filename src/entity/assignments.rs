//! 作业实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "assignments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub booking_id: i64,
    pub student_id: i64,
    pub tutor_id: i64,
    pub title: String,
    pub subject: String,
    #[sea_orm(column_type = "Text")]
    pub description: String,
    pub due_date: i64,
    /// JSON 序列化的附件列表
    #[sea_orm(column_type = "Text", nullable)]
    pub attachments: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub submission_remarks: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub submission_attachments: Option<String>,
    pub submitted_at: Option<i64>,
    #[sea_orm(column_type = "Text", nullable)]
    pub feedback_content: Option<String>,
    pub feedback_grade: Option<f64>,
    pub feedback_provided_at: Option<i64>,
    pub status: String,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::bookings::Entity",
        from = "Column::BookingId",
        to = "super::bookings::Column::Id"
    )]
    Booking,
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Booking.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_assignment(self) -> crate::models::assignments::entities::Assignment {
        use crate::models::assignments::entities::{Assignment, Attachment, Feedback, Submission};
        use crate::models::assignments::status::AssignmentStatus;
        use chrono::{DateTime, Utc};

        let parse_attachments = |raw: Option<String>| -> Vec<Attachment> {
            raw.and_then(|s| serde_json::from_str(&s).ok())
                .unwrap_or_default()
        };

        let submission = self.submitted_at.map(|ts| Submission {
            remarks: self.submission_remarks.clone(),
            attachments: parse_attachments(self.submission_attachments.clone()),
            submitted_at: DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default(),
        });

        let feedback = self.feedback_provided_at.map(|ts| Feedback {
            content: self.feedback_content.clone().unwrap_or_default(),
            grade: self.feedback_grade,
            provided_at: DateTime::<Utc>::from_timestamp(ts, 0).unwrap_or_default(),
        });

        Assignment {
            id: self.id,
            booking_id: self.booking_id,
            student_id: self.student_id,
            tutor_id: self.tutor_id,
            title: self.title,
            subject: self.subject,
            description: self.description,
            due_date: DateTime::<Utc>::from_timestamp(self.due_date, 0).unwrap_or_default(),
            attachments: parse_attachments(self.attachments),
            submission,
            feedback,
            status: self.status.parse().unwrap_or(AssignmentStatus::Assigned),
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
