//! 时段报价实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "time_slots")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub tutor_id: i64,
    pub subject_name: String,
    pub grade_level: String,
    /// 逗号分隔的星期名，如 "Monday,Wednesday"
    pub days_of_week: String,
    pub fee: f64,
    pub timezone: String,
    #[sea_orm(column_type = "Text", nullable)]
    pub notes: Option<String>,
    pub session_type: String,
    pub is_active: bool,
    /// 乐观锁版本号
    pub version: i64,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(
        belongs_to = "super::users::Entity",
        from = "Column::TutorId",
        to = "super::users::Column::Id"
    )]
    Tutor,
    #[sea_orm(has_many = "super::time_slot_ranges::Entity")]
    Ranges,
    #[sea_orm(has_many = "super::bookings::Entity")]
    Bookings,
}

impl Related<super::users::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Tutor.def()
    }
}

impl Related<super::time_slot_ranges::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Ranges.def()
    }
}

impl Related<super::bookings::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::Bookings.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型（时段列表由调用方一并查出传入）
impl Model {
    pub fn into_time_slot(
        self,
        ranges: Vec<super::time_slot_ranges::Model>,
    ) -> crate::models::time_slots::entities::TimeSlot {
        use crate::models::time_slots::entities::TimeSlot;
        use crate::models::users::entities::TeachingMode;
        use crate::scheduling::Weekday;
        use chrono::{DateTime, Utc};

        TimeSlot {
            id: self.id,
            tutor_id: self.tutor_id,
            subject_name: self.subject_name,
            grade_level: self.grade_level,
            days_of_week: self
                .days_of_week
                .split(',')
                .filter_map(|d| d.trim().parse::<Weekday>().ok())
                .collect(),
            time_ranges: ranges.into_iter().map(|r| r.into_time_range()).collect(),
            fee: self.fee,
            timezone: self.timezone,
            notes: self.notes,
            session_type: self.session_type.parse().unwrap_or(TeachingMode::Online),
            is_active: self.is_active,
            version: self.version,
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}

/// 将星期集合编码为存储格式
pub fn encode_days(days: &[crate::scheduling::Weekday]) -> String {
    days.iter()
        .map(|d| d.as_str())
        .collect::<Vec<_>>()
        .join(",")
}
