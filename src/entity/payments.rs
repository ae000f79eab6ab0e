//! 支付单实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "payments")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub booking_id: i64,
    pub student_id: i64,
    pub amount: f64,
    pub order_ref: String,
    pub transaction_id: Option<String>,
    pub status: String,
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

impl Model {
    pub fn into_payment(self) -> crate::models::payments::entities::Payment {
        use crate::models::payments::entities::{Payment, PaymentRecordStatus};
        use chrono::{DateTime, Utc};

        Payment {
            id: self.id,
            booking_id: self.booking_id,
            student_id: self.student_id,
            amount: self.amount,
            order_ref: self.order_ref,
            transaction_id: self.transaction_id,
            status: self.status.parse().unwrap_or(PaymentRecordStatus::Pending),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
