//! 预约实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "bookings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub student_id: i64,
    pub tutor_id: i64,
    pub time_slot_id: i64,
    pub range_id: i64,
    pub start_date: i64,
    pub end_date: i64,
    pub duration_months: i32,
    pub fee: f64,
    pub total_amount: f64,
    pub teaching_mode: String,
    pub status: String,
    pub payment_state: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub cancellation_reason: Option<String>,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub is_active: bool,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::StudentId",
        to = "super::users::Column::Id"
    )]
    Student,
    #[sea_orm(
        belongs_to = "super::time_slots::Entity",
        from = "Column::TimeSlotId",
        to = "super::time_slots::Column::Id"
    )]
    TimeSlot,
    #[sea_orm(has_many = "super::assignments::Entity")]
    Assignments,
    #[sea_orm(has_many = "super::payments::Entity")]
    Payments,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Student.def()
    }
}

impl Related<super::time_slots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeSlot.def()
    }
}

impl Related<super::assignments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Assignments.def()
    }
}

impl Related<super::payments::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Payments.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_booking(self) -> crate::models::bookings::entities::Booking {
        use crate::models::bookings::entities::Booking;
        use crate::models::bookings::status::{BookingStatus, PaymentState};
        use crate::models::users::entities::TeachingMode;
        use chrono::{DateTime, Utc};

        Booking {
            id: self.id,
            student_id: self.student_id,
            tutor_id: self.tutor_id,
            time_slot_id: self.time_slot_id,
            range_id: self.range_id,
            start_date: DateTime::<Utc>::from_timestamp(self.start_date, 0).unwrap_or_default(),
            end_date: DateTime::<Utc>::from_timestamp(self.end_date, 0).unwrap_or_default(),
            duration_months: self.duration_months,
            fee: self.fee,
            total_amount: self.total_amount,
            teaching_mode: self.teaching_mode.parse().unwrap_or(TeachingMode::Online),
            status: self.status.parse().unwrap_or(BookingStatus::Pending),
            payment_state: self.payment_state.parse().unwrap_or(PaymentState::Pending),
            cancellation_reason: self.cancellation_reason,
            notes: self.notes,
            is_active: self.is_active,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
