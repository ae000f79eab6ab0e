use serde::Deserialize;
use ts_rs::TS;

use crate::models::users::entities::{TeachingMode, UserRole};

// 用户登录请求（来自HTTP请求）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct LoginRequest {
    /// 用户名或邮箱
    pub username: String,
    /// 密码
    pub password: String,
    /// 是否记住我
    #[serde(default)]
    pub remember_me: bool,
}

// 注册请求（学生或家教自助注册，管理员账号由 seed 创建）
#[derive(Debug, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/auth.ts")]
pub struct RegisterRequest {
    pub username: String,
    pub email: String,
    pub password: String,
    /// student 或 tutor
    pub role: UserRole,
    /// 学生所在年级
    pub grade_level: Option<String>,
    /// 家教授课方式，注册家教账号时必填
    pub teaching_location: Option<TeachingMode>,
}
