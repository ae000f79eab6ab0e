//! SeaORM 存储实现
//!
//! 统一的数据库存储层，支持 SQLite、PostgreSQL 和 MySQL。

mod assignments;
mod bookings;
mod notifications;
mod payments;
mod ratings;
mod time_slots;
mod users;

use crate::config::AppConfig;
use crate::errors::{Result, TutorEaseError};
use migration::{Migrator, MigratorTrait};
use sea_orm::{ConnectOptions, Database, DatabaseConnection};
use std::time::Duration;
use tracing::info;

/// SeaORM 存储实现
#[derive(Clone)]
pub struct SeaOrmStorage {
    pub(crate) db: DatabaseConnection,
}

impl SeaOrmStorage {
    /// 创建新的 SeaORM 存储实例
    pub async fn new_async() -> Result<Self> {
        let config = AppConfig::get();
        let db_url = Self::build_database_url(&config.database.url)?;

        // 根据数据库类型选择连接方式
        let db = if db_url.starts_with("sqlite://") {
            Self::connect_sqlite(&db_url, config).await?
        } else {
            Self::connect_generic(&db_url, config).await?
        };

        // 运行迁移
        Migrator::up(&db, None)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("数据库迁移失败: {e}")))?;

        info!("SeaORM 存储初始化完成，数据库: {}", db_url);

        Ok(Self { db })
    }

    /// SQLite 专用连接（WAL + pragma 优化）
    async fn connect_sqlite(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        use sea_orm::SqlxSqliteConnector;
        use sea_orm::sqlx::sqlite::{
            SqliteConnectOptions, SqliteJournalMode, SqlitePoolOptions, SqliteSynchronous,
        };
        use std::str::FromStr;

        let opt = SqliteConnectOptions::from_str(url)
            .map_err(|e| TutorEaseError::database_config(format!("SQLite URL 解析失败: {e}")))?
            .create_if_missing(true)
            .journal_mode(SqliteJournalMode::Wal)
            .synchronous(SqliteSynchronous::Normal)
            .busy_timeout(Duration::from_secs(5))
            .pragma("cache_size", "-64000")
            .pragma("temp_store", "memory")
            .pragma("mmap_size", "536870912")
            .pragma("wal_autocheckpoint", "1000");

        let pool = SqlitePoolOptions::new()
            .max_connections(config.database.pool_size)
            .min_connections(1)
            .test_before_acquire(true)
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(300))
            .connect_with(opt)
            .await
            .map_err(|e| TutorEaseError::database_connection(format!("SQLite 连接失败: {e}")))?;

        Ok(SqlxSqliteConnector::from_sqlx_sqlite_pool(pool))
    }

    /// 通用连接（PostgreSQL、MySQL 等）
    async fn connect_generic(url: &str, config: &AppConfig) -> Result<DatabaseConnection> {
        let mut opt = ConnectOptions::new(url);
        opt.max_connections(config.database.pool_size)
            .min_connections(5)
            .connect_timeout(Duration::from_secs(config.database.timeout))
            .acquire_timeout(Duration::from_secs(config.database.timeout))
            .idle_timeout(Duration::from_secs(600))
            .max_lifetime(Duration::from_secs(1800))
            .sqlx_logging(false)
            .sqlx_logging_level(tracing::log::LevelFilter::Debug);

        Database::connect(opt)
            .await
            .map_err(|e| TutorEaseError::database_connection(format!("无法连接到数据库: {e}")))
    }

    /// 从 URL 自动推断数据库类型并构建连接 URL
    fn build_database_url(url: &str) -> Result<String> {
        if url.starts_with("sqlite://") {
            Ok(url.to_string())
        } else if url.ends_with(".db") || url.ends_with(".sqlite") || url == ":memory:" {
            Ok(format!("sqlite://{}?mode=rwc", url))
        } else if url.starts_with("postgres://")
            || url.starts_with("postgresql://")
            || url.starts_with("mysql://")
            || url.starts_with("mariadb://")
        {
            Ok(url.to_string())
        } else {
            Err(TutorEaseError::database_config(format!(
                "无法从 URL 推断数据库类型: {url}. 支持: sqlite://, postgres://, mysql://, 或 .db/.sqlite 文件路径"
            )))
        }
    }

    /// 当前 Unix 时间戳（秒）
    pub(crate) fn now_ts() -> i64 {
        chrono::Utc::now().timestamp()
    }
}

// Storage trait 实现
use crate::models::{
    assignments::{
        entities::{Assignment, Attachment},
        requests::{AssignmentListQuery, NewAssignment},
        responses::AssignmentListResponse,
        status::AssignmentStatus,
    },
    bookings::{
        entities::Booking,
        requests::{BookingUpdate, NewBooking},
        responses::BookingListResponse,
    },
    notifications::{
        entities::Notification, requests::NewNotification, responses::NotificationListResponse,
    },
    payments::{
        entities::{Payment, PaymentRecordStatus},
        requests::NewPayment,
    },
    ratings::{entities::Rating, requests::NewRating},
    time_slots::{
        entities::TimeSlot,
        requests::{CreateTimeSlotRequest, TimeSlotListQuery, TimeSlotReplacement},
        responses::TimeSlotListResponse,
    },
    users::{
        entities::{TeachingMode, User},
        requests::{CreateUserRequest, UpdateUserRequest, UserListQuery},
        responses::UserListResponse,
    },
};
use crate::storage::Storage;
use async_trait::async_trait;

#[async_trait]
impl Storage for SeaOrmStorage {
    // 用户模块
    async fn create_user(&self, user: CreateUserRequest) -> Result<User> {
        self.create_user_impl(user).await
    }

    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>> {
        self.get_user_by_id_impl(id).await
    }

    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>> {
        self.get_user_by_username_impl(username).await
    }

    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>> {
        self.get_user_by_email_impl(email).await
    }

    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>> {
        self.get_user_by_username_or_email_impl(identifier).await
    }

    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse> {
        self.list_users_with_pagination_impl(query).await
    }

    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>> {
        self.update_user_impl(id, update).await
    }

    async fn delete_user(&self, id: i64) -> Result<bool> {
        self.delete_user_impl(id).await
    }

    async fn update_last_login(&self, id: i64) -> Result<bool> {
        self.update_last_login_impl(id).await
    }

    async fn count_users(&self) -> Result<i64> {
        self.count_users_impl().await
    }

    // 时段报价模块
    async fn create_time_slot(
        &self,
        tutor_id: i64,
        session_type: TeachingMode,
        slot: CreateTimeSlotRequest,
    ) -> Result<TimeSlot> {
        self.create_time_slot_impl(tutor_id, session_type, slot).await
    }

    async fn get_time_slot_by_id(&self, slot_id: i64) -> Result<Option<TimeSlot>> {
        self.get_time_slot_by_id_impl(slot_id).await
    }

    async fn list_time_slots_with_pagination(
        &self,
        query: TimeSlotListQuery,
    ) -> Result<TimeSlotListResponse> {
        self.list_time_slots_with_pagination_impl(query).await
    }

    async fn get_tutor_offerings(
        &self,
        tutor_id: i64,
        exclude_slot_id: Option<i64>,
    ) -> Result<Vec<TimeSlot>> {
        self.get_tutor_offerings_impl(tutor_id, exclude_slot_id).await
    }

    async fn replace_time_slot(
        &self,
        slot_id: i64,
        expected_version: i64,
        replacement: TimeSlotReplacement,
    ) -> Result<Option<TimeSlot>> {
        self.replace_time_slot_impl(slot_id, expected_version, replacement)
            .await
    }

    async fn delete_time_slot(&self, slot_id: i64) -> Result<bool> {
        self.delete_time_slot_impl(slot_id).await
    }

    async fn delete_time_slot_range(&self, range_id: i64) -> Result<bool> {
        self.delete_time_slot_range_impl(range_id).await
    }

    async fn set_range_booked(&self, range_id: i64, booked: bool) -> Result<bool> {
        self.set_range_booked_impl(range_id, booked).await
    }

    // 预约模块
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking> {
        self.create_booking_impl(booking).await
    }

    async fn get_booking_by_id(&self, booking_id: i64) -> Result<Option<Booking>> {
        self.get_booking_by_id_impl(booking_id).await
    }

    async fn update_booking(
        &self,
        booking_id: i64,
        update: BookingUpdate,
    ) -> Result<Option<Booking>> {
        self.update_booking_impl(booking_id, update).await
    }

    async fn list_student_bookings(&self, student_id: i64) -> Result<BookingListResponse> {
        self.list_bookings_impl(Some(student_id), None).await
    }

    async fn list_tutor_bookings(&self, tutor_id: i64) -> Result<BookingListResponse> {
        self.list_bookings_impl(None, Some(tutor_id)).await
    }

    async fn get_student_booking_for_range(
        &self,
        student_id: i64,
        range_id: i64,
    ) -> Result<Option<Booking>> {
        self.get_student_booking_for_range_impl(student_id, range_id)
            .await
    }

    async fn list_expired_unconfirmed_bookings(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Booking>> {
        self.list_expired_unconfirmed_bookings_impl(now).await
    }

    async fn list_expired_ongoing_bookings(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Booking>> {
        self.list_expired_ongoing_bookings_impl(now).await
    }

    // 支付模块
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment> {
        self.create_payment_impl(payment).await
    }

    async fn get_payment_by_order_ref(&self, order_ref: &str) -> Result<Option<Payment>> {
        self.get_payment_by_order_ref_impl(order_ref).await
    }

    async fn update_payment_status(
        &self,
        payment_id: i64,
        status: PaymentRecordStatus,
        transaction_id: Option<String>,
    ) -> Result<Option<Payment>> {
        self.update_payment_status_impl(payment_id, status, transaction_id)
            .await
    }

    // 作业模块
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment> {
        self.create_assignment_impl(assignment).await
    }

    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>> {
        self.get_assignment_by_id_impl(assignment_id).await
    }

    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        self.list_assignments_with_pagination_impl(query).await
    }

    async fn submit_assignment(
        &self,
        assignment_id: i64,
        remarks: Option<String>,
        attachments: Vec<Attachment>,
        new_status: AssignmentStatus,
    ) -> Result<Option<Assignment>> {
        self.submit_assignment_impl(assignment_id, remarks, attachments, new_status)
            .await
    }

    async fn set_assignment_status(
        &self,
        assignment_id: i64,
        status: AssignmentStatus,
    ) -> Result<Option<Assignment>> {
        self.set_assignment_status_impl(assignment_id, status).await
    }

    async fn provide_assignment_feedback(
        &self,
        assignment_id: i64,
        content: String,
        grade: Option<f64>,
        new_status: AssignmentStatus,
    ) -> Result<Option<Assignment>> {
        self.provide_assignment_feedback_impl(assignment_id, content, grade, new_status)
            .await
    }

    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool> {
        self.delete_assignment_impl(assignment_id).await
    }

    async fn list_due_assignments(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Assignment>> {
        self.list_due_assignments_impl(now).await
    }

    // 评价模块
    async fn create_rating(&self, rating: NewRating) -> Result<Rating> {
        self.create_rating_impl(rating).await
    }

    async fn get_rating_by_booking_id(&self, booking_id: i64) -> Result<Option<Rating>> {
        self.get_rating_by_booking_id_impl(booking_id).await
    }

    async fn list_ratings_by_tutor(&self, tutor_id: i64) -> Result<Vec<Rating>> {
        self.list_ratings_by_tutor_impl(tutor_id).await
    }

    // 通知模块
    async fn create_notification(&self, notification: NewNotification) -> Result<Notification> {
        self.create_notification_impl(notification).await
    }

    async fn list_notifications_with_pagination(
        &self,
        recipient_id: i64,
        page: i64,
        size: i64,
    ) -> Result<NotificationListResponse> {
        self.list_notifications_with_pagination_impl(recipient_id, page, size)
            .await
    }

    async fn count_unread_notifications(&self, recipient_id: i64) -> Result<i64> {
        self.count_unread_notifications_impl(recipient_id).await
    }

    async fn mark_notification_read(
        &self,
        recipient_id: i64,
        notification_id: i64,
    ) -> Result<bool> {
        self.mark_notification_read_impl(recipient_id, notification_id)
            .await
    }
}
