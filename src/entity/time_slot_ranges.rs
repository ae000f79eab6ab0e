//! 报价内单条时段实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "time_slot_ranges")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub time_slot_id: i64,
    pub start_time: String,
    pub end_time: String,
    pub is_booked: bool,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::time_slots::Entity",
        from = "Column::TimeSlotId",
        to = "super::time_slots::Column::Id"
    )]
    TimeSlot,
}

impl Related<super::time_slots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeSlot.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

impl Model {
    pub fn into_time_range(self) -> crate::models::time_slots::entities::TimeRange {
        crate::models::time_slots::entities::TimeRange {
            id: self.id,
            start_time: self.start_time,
            end_time: self.end_time,
            is_booked: self.is_booked,
        }
    }
}
