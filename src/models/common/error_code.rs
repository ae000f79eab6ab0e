use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// 业务错误码
///
/// 数值分段：1xxx 通用，2xxx 认证与用户，3xxx 时段与排课，
/// 4xxx 预约与支付，5xxx 作业，6xxx 评价与通知，9xxx 基础设施。
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "../frontend/src/types/generated/api.ts")]
pub enum ErrorCode {
    Success = 0,

    // 通用
    BadRequest = 1001,
    Unauthorized = 1002,
    Forbidden = 1003,
    NotFound = 1004,
    InternalServerError = 1500,

    // 认证与用户
    AuthFailed = 2001,
    RegisterFailed = 2002,
    UserNotFound = 2101,
    UserAlreadyExists = 2102,
    UserNameInvalid = 2103,
    UserEmailInvalid = 2104,
    UserPasswordInvalid = 2105,
    UserUpdateFailed = 2106,

    // 时段与排课
    TimeSlotNotFound = 3001,
    RangeNotFound = 3002,
    InvalidTimeFormat = 3101,
    MissingTimeField = 3102,
    DurationTooShort = 3103,
    EndBeforeStart = 3104,
    SlotConflict = 3105,
    CannotModifyBookedSlot = 3106,
    LockedByBooking = 3107,
    SlotHasBookings = 3108,
    VersionConflict = 3109,

    // 预约与支付
    BookingNotFound = 4001,
    RangeUnavailable = 4002,
    InvalidTransition = 4101,
    ReasonRequired = 4102,
    AlreadyRated = 4103,
    InvalidRating = 4104,
    PaymentNotFound = 4201,
    PaymentVerificationFailed = 4202,

    // 作业
    AssignmentNotFound = 5001,
    NotReadyForFeedback = 5101,

    // 评价与通知
    RatingNotFound = 6001,
    NotificationNotFound = 6101,

    // 基础设施（可重试类）
    StorageUnavailable = 9001,
}
