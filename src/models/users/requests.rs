use serde::Deserialize;
use ts_rs::TS;

use crate::models::common::PaginationQuery;
use crate::models::users::entities::{TeachingMode, UserRole, UserStatus};

/// 创建用户请求（管理员接口与启动期 seed 使用）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct CreateUserRequest {
    pub username: String,
    pub email: String,
    /// 已经过哈希处理的密码
    pub password: String,
    pub role: UserRole,
    pub profile_name: Option<String>,
    pub avatar_url: Option<String>,
    pub grade_level: Option<String>,
    pub teaching_location: Option<TeachingMode>,
}

/// 更新用户请求
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UpdateUserRequest {
    pub email: Option<String>,
    pub password: Option<String>,
    pub status: Option<UserStatus>,
    pub profile_name: Option<String>,
    pub avatar_url: Option<String>,
    pub grade_level: Option<String>,
    pub teaching_location: Option<TeachingMode>,
}

/// 用户列表查询参数（HTTP 请求）
#[derive(Debug, Clone, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/user.ts")]
pub struct UserListParams {
    #[serde(flatten)]
    #[ts(flatten)]
    pub pagination: PaginationQuery,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

// 用于存储层的内部查询参数
#[derive(Debug, Clone)]
pub struct UserListQuery {
    pub page: Option<i64>,
    pub size: Option<i64>,
    pub role: Option<UserRole>,
    pub status: Option<UserStatus>,
    pub search: Option<String>,
}

impl From<UserListParams> for UserListQuery {
    fn from(params: UserListParams) -> Self {
        Self {
            page: Some(params.pagination.page),
            size: Some(params.pagination.size),
            role: params.role,
            status: params.status,
            search: params.search,
        }
    }
}
