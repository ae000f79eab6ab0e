pub mod assignments;
pub mod auth;
pub mod bookings;
pub mod notifications;
pub mod payments;
pub mod ratings;
pub mod time_slots;
pub mod users;

pub use assignments::AssignmentService;
pub use auth::AuthService;
pub use bookings::BookingService;
pub use notifications::NotificationService;
pub use payments::PaymentService;
pub use ratings::RatingService;
pub use time_slots::TimeSlotService;
pub use users::UserService;

use dashmap::DashMap;
use once_cell::sync::Lazy;
use std::sync::Arc;
use tokio::sync::Mutex;

// 每个家教的排课写锁
//
// 跨报价不重叠是按家教维度的约束，冲突检测到写入之间必须串行，
// 否则两个并发编辑可以各自通过校验再写出互相冲突的时段。
// 预约占用时段时同样持有该锁（数据库层的 CAS 是第二道防线）。
static TUTOR_SCHEDULE_LOCKS: Lazy<DashMap<i64, Arc<Mutex<()>>>> = Lazy::new(DashMap::new);

pub(crate) fn tutor_schedule_lock(tutor_id: i64) -> Arc<Mutex<()>> {
    TUTOR_SCHEDULE_LOCKS
        .entry(tutor_id)
        .or_insert_with(|| Arc::new(Mutex::new(())))
        .clone()
}
