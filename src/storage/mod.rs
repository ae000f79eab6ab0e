use std::sync::Arc;

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

use crate::errors::Result;

pub mod sea_orm_storage;

#[async_trait::async_trait]
pub trait Storage: Send + Sync {
    /// 用户管理方法
    // 创建用户
    async fn create_user(&self, user: CreateUserRequest) -> Result<User>;
    // 通过ID获取用户信息
    async fn get_user_by_id(&self, id: i64) -> Result<Option<User>>;
    // 通过用户名获取用户信息
    async fn get_user_by_username(&self, username: &str) -> Result<Option<User>>;
    // 通过邮箱获取用户信息
    async fn get_user_by_email(&self, email: &str) -> Result<Option<User>>;
    // 通过用户名或邮箱获取用户信息
    async fn get_user_by_username_or_email(&self, identifier: &str) -> Result<Option<User>>;
    // 列出用户
    async fn list_users_with_pagination(&self, query: UserListQuery) -> Result<UserListResponse>;
    // 更新用户信息
    async fn update_user(&self, id: i64, update: UpdateUserRequest) -> Result<Option<User>>;
    // 删除用户
    async fn delete_user(&self, id: i64) -> Result<bool>;
    // 更新用户最后登录时间
    async fn update_last_login(&self, id: i64) -> Result<bool>;
    // 统计用户数量（启动期 seed 判断用）
    async fn count_users(&self) -> Result<i64>;

    /// 时段报价管理方法
    // 创建报价（含时段列表）
    async fn create_time_slot(
        &self,
        tutor_id: i64,
        session_type: TeachingMode,
        slot: CreateTimeSlotRequest,
    ) -> Result<TimeSlot>;
    // 通过ID获取报价（含时段列表）
    async fn get_time_slot_by_id(&self, slot_id: i64) -> Result<Option<TimeSlot>>;
    // 分页列出某家教的报价
    async fn list_time_slots_with_pagination(
        &self,
        query: TimeSlotListQuery,
    ) -> Result<TimeSlotListResponse>;
    // 冲突检测用：取某家教除指定报价外的全部报价
    async fn get_tutor_offerings(
        &self,
        tutor_id: i64,
        exclude_slot_id: Option<i64>,
    ) -> Result<Vec<TimeSlot>>;
    // 整体替换报价内容；expected_version 不匹配时返回 VersionConflict
    async fn replace_time_slot(
        &self,
        slot_id: i64,
        expected_version: i64,
        replacement: TimeSlotReplacement,
    ) -> Result<Option<TimeSlot>>;
    // 删除整份报价
    async fn delete_time_slot(&self, slot_id: i64) -> Result<bool>;
    // 删除单条时段
    async fn delete_time_slot_range(&self, range_id: i64) -> Result<bool>;
    // 预约占用/释放一条时段；occupy 时仅当未被占用才成功（CAS）
    async fn set_range_booked(&self, range_id: i64, booked: bool) -> Result<bool>;

    /// 预约管理方法
    // 创建预约
    async fn create_booking(&self, booking: NewBooking) -> Result<Booking>;
    // 通过ID获取预约
    async fn get_booking_by_id(&self, booking_id: i64) -> Result<Option<Booking>>;
    // 写回状态机转移结果
    async fn update_booking(&self, booking_id: i64, update: BookingUpdate)
    -> Result<Option<Booking>>;
    // 学生的预约列表（附时段摘要与对方昵称）
    async fn list_student_bookings(&self, student_id: i64) -> Result<BookingListResponse>;
    // 家教的预约列表
    async fn list_tutor_bookings(&self, tutor_id: i64) -> Result<BookingListResponse>;
    // 学生在某条时段上的活跃预约（防止重复预约）
    async fn get_student_booking_for_range(
        &self,
        student_id: i64,
        range_id: i64,
    ) -> Result<Option<Booking>>;
    // 期满扫描：待确认/支付中且已过期的预约
    async fn list_expired_unconfirmed_bookings(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Booking>>;
    // 期满扫描：进行中且已到期的预约
    async fn list_expired_ongoing_bookings(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Booking>>;

    /// 支付管理方法
    // 创建支付单
    async fn create_payment(&self, payment: NewPayment) -> Result<Payment>;
    // 通过订单号获取支付单
    async fn get_payment_by_order_ref(&self, order_ref: &str) -> Result<Option<Payment>>;
    // 更新支付单状态
    async fn update_payment_status(
        &self,
        payment_id: i64,
        status: PaymentRecordStatus,
        transaction_id: Option<String>,
    ) -> Result<Option<Payment>>;

    /// 作业管理方法
    // 创建作业
    async fn create_assignment(&self, assignment: NewAssignment) -> Result<Assignment>;
    // 通过ID获取作业
    async fn get_assignment_by_id(&self, assignment_id: i64) -> Result<Option<Assignment>>;
    // 分页列出作业
    async fn list_assignments_with_pagination(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse>;
    // 写入学生提交并更新状态
    async fn submit_assignment(
        &self,
        assignment_id: i64,
        remarks: Option<String>,
        attachments: Vec<Attachment>,
        new_status: AssignmentStatus,
    ) -> Result<Option<Assignment>>;
    // 仅更新状态（确认收到/到期扫描）
    async fn set_assignment_status(
        &self,
        assignment_id: i64,
        status: AssignmentStatus,
    ) -> Result<Option<Assignment>>;
    // 写入点评并更新状态
    async fn provide_assignment_feedback(
        &self,
        assignment_id: i64,
        content: String,
        grade: Option<f64>,
        new_status: AssignmentStatus,
    ) -> Result<Option<Assignment>>;
    // 删除作业
    async fn delete_assignment(&self, assignment_id: i64) -> Result<bool>;
    // 到期扫描：已过截止时间且仍在 assigned/submitted/overdue 的作业
    async fn list_due_assignments(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Assignment>>;

    /// 评价管理方法
    // 创建评价
    async fn create_rating(&self, rating: NewRating) -> Result<Rating>;
    // 某预约的评价
    async fn get_rating_by_booking_id(&self, booking_id: i64) -> Result<Option<Rating>>;
    // 某家教的全部评价
    async fn list_ratings_by_tutor(&self, tutor_id: i64) -> Result<Vec<Rating>>;

    /// 通知管理方法
    // 写入通知
    async fn create_notification(&self, notification: NewNotification) -> Result<Notification>;
    // 分页列出某用户的通知
    async fn list_notifications_with_pagination(
        &self,
        recipient_id: i64,
        page: i64,
        size: i64,
    ) -> Result<NotificationListResponse>;
    // 未读数量
    async fn count_unread_notifications(&self, recipient_id: i64) -> Result<i64>;
    // 标记已读
    async fn mark_notification_read(&self, recipient_id: i64, notification_id: i64)
    -> Result<bool>;
}

pub async fn create_storage() -> Result<Arc<dyn Storage>> {
    let storage = sea_orm_storage::SeaOrmStorage::new_async().await?;
    Ok(Arc::new(storage))
}
