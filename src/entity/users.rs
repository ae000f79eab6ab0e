//! 用户实体

use sea_orm::entity::prelude::*;

#[derive(Clone, Debug, PartialEq, DeriveEntityModel)]
#[sea_orm(table_name = "users")]
pub struct Model {
    #[sea_orm(primary_key)]
    pub id: i64,
    pub username: String,
    pub email: String,
    pub password_hash: String,
    pub role: String,
    pub status: String,
    pub profile_name: Option<String>,
    pub avatar_url: Option<String>,
    pub grade_level: Option<String>,
    pub teaching_location: Option<String>,
    pub last_login: Option<i64>,
    pub created_at: i64,
    pub updated_at: i64,
}

#[derive(Copy, Clone, Debug, EnumIter, DeriveRelation)]
pub enum Relation {
    #[sea_orm(has_many = "super::time_slots::Entity")]
    TimeSlots,
}

impl Related<super::time_slots::Entity> for Entity {
    fn to() -> RelationDef {
        Relation::TimeSlots.def()
    }
}

impl ActiveModelBehavior for ActiveModel {}

// 从数据库模型转换为业务模型
impl Model {
    pub fn into_user(self) -> crate::models::users::entities::User {
        use crate::models::users::entities::{User, UserProfile, UserRole, UserStatus};
        use chrono::{DateTime, Utc};

        User {
            id: self.id,
            profile: UserProfile {
                profile_name: self.profile_name.unwrap_or_else(|| self.username.clone()),
                avatar_url: self.avatar_url,
                grade_level: self.grade_level,
                teaching_location: self.teaching_location.and_then(|s| s.parse().ok()),
            },
            username: self.username,
            email: self.email,
            password_hash: self.password_hash,
            role: self.role.parse().unwrap_or(UserRole::Student),
            status: self.status.parse().unwrap_or(UserStatus::Inactive),
            last_login: self
                .last_login
                .and_then(|ts| DateTime::<Utc>::from_timestamp(ts, 0)),
            created_at: DateTime::<Utc>::from_timestamp(self.created_at, 0).unwrap_or_default(),
            updated_at: DateTime::<Utc>::from_timestamp(self.updated_at, 0).unwrap_or_default(),
        }
    }
}
