//! TutorEase - 家教预约平台后端服务
//!
//! 基于 Actix Web 构建的家教市场后端：学生浏览并预约家教，
//! 家教管理时段与作业，管理员负责账号管理。
//!
//! # 架构
//! - `cache`: 缓存层（Moka/Redis）
//! - `config`: 配置管理
//! - `entity`: SeaORM 数据库实体
//! - `errors`: 统一错误处理
//! - `middlewares`: 认证授权中间件
//! - `models`: 数据模型定义
//! - `routes`: API 路由层
//! - `runtime`: 运行时生命周期管理
//! - `scheduling`: 时段解析与冲突检测核心（纯逻辑）
//! - `services`: 业务逻辑层
//! - `storage`: 数据存储层（SeaORM）
//! - `utils`: 工具函数

pub mod cache;
pub mod config;
pub mod entity;
pub mod errors;
pub mod middlewares;
pub mod models;
pub mod routes;
pub mod runtime;
pub mod scheduling;
pub mod services;
pub mod storage;
pub mod utils;
