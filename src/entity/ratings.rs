//! 评价实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "ratings")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    /// 每个预约至多一条，数据库层面有唯一约束
    pub booking_id: i64,
    pub student_id: i64,
    pub tutor_id: i64,
    pub rating: i32,
    #[sea_orm(column_type = "Text", nullable)]
    pub review: Option<String>,
    pub created_at: i64,
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

impl Model {
    pub fn into_rating(self) -> crate::models::ratings::entities::Rating {
        use chrono::{DateTime, Utc};

        crate::models::ratings::entities::Rating {
            id: self.id,
            booking_id: self.booking_id,
            student_id: self.student_id,
            tutor_id: self.tutor_id,
            rating: self.rating,
            review: self.review,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
        }
    }
}
