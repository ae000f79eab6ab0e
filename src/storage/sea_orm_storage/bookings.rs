use super::SeaOrmStorage;
use crate::entity::bookings::{ActiveModel, Column, Entity as Bookings};
use crate::entity::time_slot_ranges::Entity as TimeSlotRanges;
use crate::entity::time_slots::Entity as TimeSlots;
use crate::entity::users::Entity as Users;
use crate::errors::{Result, TutorEaseError};
use crate::models::bookings::{
    entities::Booking,
    requests::{BookingUpdate, NewBooking},
    responses::{BookedRangeSummary, BookingListResponse, BookingView},
    status::BookingStatus,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, QueryFilter, QueryOrder, Set,
};

impl SeaOrmStorage {
    /// 创建预约
    pub async fn create_booking_impl(&self, booking: NewBooking) -> Result<Booking> {
        let now = Self::now_ts();

        let model = ActiveModel {
            student_id: Set(booking.student_id),
            tutor_id: Set(booking.tutor_id),
            time_slot_id: Set(booking.time_slot_id),
            range_id: Set(booking.range_id),
            start_date: Set(booking.start_date.timestamp()),
            end_date: Set(booking.end_date.timestamp()),
            duration_months: Set(booking.duration_months),
            fee: Set(booking.fee),
            total_amount: Set(booking.total_amount),
            teaching_mode: Set(booking.teaching_mode.to_string()),
            status: Set(BookingStatus::Pending.to_string()),
            payment_state: Set(crate::models::bookings::status::PaymentState::Pending.to_string()),
            cancellation_reason: Set(None),
            notes: Set(booking.notes),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("创建预约失败: {e}")))?;

        Ok(result.into_booking())
    }

    /// 通过 ID 获取预约
    pub async fn get_booking_by_id_impl(&self, booking_id: i64) -> Result<Option<Booking>> {
        let result = Bookings::find_by_id(booking_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询预约失败: {e}")))?;

        Ok(result.map(|m| m.into_booking()))
    }

    /// 写回状态机转移结果
    pub async fn update_booking_impl(
        &self,
        booking_id: i64,
        update: BookingUpdate,
    ) -> Result<Option<Booking>> {
        let existing = self.get_booking_by_id_impl(booking_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = Self::now_ts();

        let mut model = ActiveModel {
            id: Set(booking_id),
            updated_at: Set(now),
            ..Default::default()
        };

        if let Some(status) = update.status {
            model.status = Set(status.to_string());
        }
        if let Some(payment_state) = update.payment_state {
            model.payment_state = Set(payment_state.to_string());
        }
        if let Some(reason) = update.cancellation_reason {
            model.cancellation_reason = Set(Some(reason));
        }
        if let Some(is_active) = update.is_active {
            model.is_active = Set(is_active);
        }

        model
            .update(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("更新预约失败: {e}")))?;

        self.get_booking_by_id_impl(booking_id).await
    }

    /// 预约列表（学生或家教视角），附时段摘要与对方昵称
    pub(crate) async fn list_bookings_impl(
        &self,
        student_id: Option<i64>,
        tutor_id: Option<i64>,
    ) -> Result<BookingListResponse> {
        let mut select = Bookings::find();
        if let Some(student_id) = student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(tutor_id) = tutor_id {
            select = select.filter(Column::TutorId.eq(tutor_id));
        }

        let models = select
            .order_by_desc(Column::UpdatedAt)
            .all(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询预约列表失败: {e}")))?;

        let mut bookings = Vec::with_capacity(models.len());
        for model in models {
            let booking = model.into_booking();

            // 时段摘要：报价里的科目/年级/星期 + 被预约的那条时段
            let time_slot = match TimeSlots::find_by_id(booking.time_slot_id)
                .one(&self.db)
                .await
                .map_err(|e| TutorEaseError::database_operation(format!("查询报价失败: {e}")))?
            {
                Some(slot_model) => {
                    let range = TimeSlotRanges::find_by_id(booking.range_id)
                        .one(&self.db)
                        .await
                        .map_err(|e| {
                            TutorEaseError::database_operation(format!("查询时段失败: {e}"))
                        })?;
                    let slot = slot_model.into_time_slot(vec![]);
                    range.map(|r| BookedRangeSummary {
                        subject_name: slot.subject_name.clone(),
                        grade_level: slot.grade_level.clone(),
                        start_time: r.start_time,
                        end_time: r.end_time,
                        days: slot.days_of_week.clone(),
                    })
                }
                None => None,
            };

            // 对方昵称：学生视角取家教，家教视角取学生
            let counterparty_id = if student_id.is_some() {
                booking.tutor_id
            } else {
                booking.student_id
            };
            let counterparty_name = Users::find_by_id(counterparty_id)
                .one(&self.db)
                .await
                .map_err(|e| TutorEaseError::database_operation(format!("查询用户失败: {e}")))?
                .map(|u| u.username)
                .unwrap_or_default();

            bookings.push(BookingView {
                booking,
                time_slot,
                counterparty_name,
            });
        }

        Ok(BookingListResponse { bookings })
    }

    /// 学生在某条时段上的活跃预约
    pub async fn get_student_booking_for_range_impl(
        &self,
        student_id: i64,
        range_id: i64,
    ) -> Result<Option<Booking>> {
        let result = Bookings::find()
            .filter(Column::StudentId.eq(student_id))
            .filter(Column::RangeId.eq(range_id))
            .filter(Column::IsActive.eq(true))
            .one(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询预约失败: {e}")))?;

        Ok(result.map(|m| m.into_booking()))
    }

    /// 期满扫描：待确认/待支付且已过期的预约
    pub async fn list_expired_unconfirmed_bookings_impl(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Booking>> {
        let models = Bookings::find()
            .filter(Column::EndDate.lt(now.timestamp()))
            .filter(Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(Column::Status.eq(BookingStatus::Pending.to_string()))
                    .add(Column::Status.eq(BookingStatus::Confirmed.to_string()))
                    .add(Column::Status.eq(BookingStatus::PaymentPending.to_string())),
            )
            .all(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询过期预约失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_booking()).collect())
    }

    /// 期满扫描：进行中且已到期的预约
    pub async fn list_expired_ongoing_bookings_impl(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Booking>> {
        let models = Bookings::find()
            .filter(Column::EndDate.lt(now.timestamp()))
            .filter(Column::Status.eq(BookingStatus::Ongoing.to_string()))
            .all(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询到期预约失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_booking()).collect())
    }
}
