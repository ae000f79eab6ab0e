//! 后台扫描任务
//!
//! 预约与作业的时间驱动转移由这里触发：到期的预约完成或作废，
//! 过了截止时间的作业流转到 unsubmitted/completed。
//! 所有转移仍然走状态机，扫描只是替用户触发系统事件。

use std::sync::Arc;
use std::time::Duration;
use tracing::{debug, error, info};

use crate::models::assignments::status::AssignmentEvent;
use crate::models::bookings::requests::BookingUpdate;
use crate::models::bookings::status::{BookingEvent, BookingStatus};
use crate::storage::Storage;

/// 预约期满扫描，按配置的间隔循环执行
pub async fn run_booking_sweep(storage: Arc<dyn Storage>, interval_secs: u64) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    loop {
        ticker.tick().await;
        if let Err(e) = sweep_bookings_once(&storage).await {
            error!("Booking sweep failed: {}", e);
        }
    }
}

/// 作业截止扫描，按配置的间隔循环执行
pub async fn run_assignment_sweep(storage: Arc<dyn Storage>, interval_secs: u64) {
    let mut ticker = tokio::time::interval(Duration::from_secs(interval_secs));
    loop {
        ticker.tick().await;
        if let Err(e) = sweep_assignments_once(&storage).await {
            error!("Assignment sweep failed: {}", e);
        }
    }
}

/// 执行一轮预约期满扫描
///
/// 未走完确认/支付流程且已过期的预约作废；进行中且到期的预约完成。
/// 两类预约占用的时段都随之释放。
pub async fn sweep_bookings_once(storage: &Arc<dyn Storage>) -> crate::errors::Result<()> {
    let now = chrono::Utc::now();
    debug!("Checking and updating booking statuses...");

    let expired = storage.list_expired_unconfirmed_bookings(now).await?;
    let mut cancelled_count = 0;
    for booking in expired {
        match booking
            .status
            .apply(booking.teaching_mode, &BookingEvent::TermElapsed)
        {
            Ok(transition) => {
                let update = BookingUpdate {
                    status: Some(transition.status),
                    cancellation_reason: Some("Booking expired before confirmation".to_string()),
                    is_active: Some(false),
                    ..Default::default()
                };
                if storage.update_booking(booking.id, update).await?.is_some() {
                    let _ = storage.set_range_booked(booking.range_id, false).await;
                    cancelled_count += 1;
                }
            }
            Err(e) => {
                error!("Unexpected sweep transition for booking {}: {}", booking.id, e);
            }
        }
    }
    if cancelled_count > 0 {
        info!(
            "Cancelled {} expired bookings that were pending or awaiting payment",
            cancelled_count
        );
    }

    let ended = storage.list_expired_ongoing_bookings(now).await?;
    let mut completed_count = 0;
    for booking in ended {
        match booking
            .status
            .apply(booking.teaching_mode, &BookingEvent::TermElapsed)
        {
            Ok(transition) if transition.status == BookingStatus::Completed => {
                let update = BookingUpdate {
                    status: Some(transition.status),
                    is_active: Some(false),
                    ..Default::default()
                };
                if storage.update_booking(booking.id, update).await?.is_some() {
                    // 租期结束，时段重新开放
                    let _ = storage.set_range_booked(booking.range_id, false).await;
                    completed_count += 1;
                }
            }
            Ok(_) => {}
            Err(e) => {
                error!("Unexpected sweep transition for booking {}: {}", booking.id, e);
            }
        }
    }
    if completed_count > 0 {
        info!("Marked {} ongoing bookings as completed", completed_count);
    }

    Ok(())
}

/// 执行一轮作业截止扫描
pub async fn sweep_assignments_once(storage: &Arc<dyn Storage>) -> crate::errors::Result<()> {
    let now = chrono::Utc::now();
    debug!("Checking for overdue assignments...");

    let due = storage.list_due_assignments(now).await?;
    let mut updated_count = 0;
    for assignment in due {
        match assignment.status.apply(AssignmentEvent::DueDatePassed) {
            Ok(new_status) => {
                if storage
                    .set_assignment_status(assignment.id, new_status)
                    .await?
                    .is_some()
                {
                    updated_count += 1;
                }
            }
            Err(e) => {
                error!(
                    "Unexpected sweep transition for assignment {}: {}",
                    assignment.id, e
                );
            }
        }
    }
    if updated_count > 0 {
        info!("Updated {} overdue assignments", updated_count);
    }

    Ok(())
}
