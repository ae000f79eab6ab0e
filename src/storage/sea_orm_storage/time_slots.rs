use super::SeaOrmStorage;
use crate::entity::time_slot_ranges::{
    ActiveModel as RangeActiveModel, Column as RangeColumn, Entity as TimeSlotRanges,
};
use crate::entity::time_slots::{
    ActiveModel, Column, Entity as TimeSlots, Model as TimeSlotModel, encode_days,
};
use crate::errors::{Result, TutorEaseError};
use crate::models::{
    common::PaginationInfo,
    time_slots::{
        entities::TimeSlot,
        requests::{CreateTimeSlotRequest, TimeSlotListQuery, TimeSlotReplacement},
        responses::TimeSlotListResponse,
    },
    users::entities::TeachingMode,
};
use crate::utils::escape_like_pattern;
use sea_orm::{
    ActiveModelTrait, ColumnTrait, ConnectionTrait, EntityTrait, PaginatorTrait, QueryFilter,
    QueryOrder, Set, TransactionTrait,
};

impl SeaOrmStorage {
    /// 查出一份报价的全部时段（按 ID 升序，保持提交顺序）
    async fn find_ranges<C: ConnectionTrait>(
        conn: &C,
        slot_id: i64,
    ) -> Result<Vec<crate::entity::time_slot_ranges::Model>> {
        TimeSlotRanges::find()
            .filter(RangeColumn::TimeSlotId.eq(slot_id))
            .order_by_asc(RangeColumn::Id)
            .all(conn)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询时段列表失败: {e}")))
    }

    async fn slot_with_ranges(&self, model: TimeSlotModel) -> Result<TimeSlot> {
        let ranges = Self::find_ranges(&self.db, model.id).await?;
        Ok(model.into_time_slot(ranges))
    }

    /// 创建报价（含时段列表）
    pub async fn create_time_slot_impl(
        &self,
        tutor_id: i64,
        session_type: TeachingMode,
        slot: CreateTimeSlotRequest,
    ) -> Result<TimeSlot> {
        let now = Self::now_ts();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("开启事务失败: {e}")))?;

        let model = ActiveModel {
            tutor_id: Set(tutor_id),
            subject_name: Set(slot.subject_name),
            grade_level: Set(slot.grade_level),
            days_of_week: Set(encode_days(&slot.days_of_week)),
            fee: Set(slot.fee),
            timezone: Set(slot.timezone),
            notes: Set(slot.notes),
            session_type: Set(session_type.to_string()),
            is_active: Set(true),
            version: Set(0),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let inserted = model
            .insert(&txn)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("创建时段报价失败: {e}")))?;

        for range in &slot.time_ranges {
            let range_model = RangeActiveModel {
                time_slot_id: Set(inserted.id),
                start_time: Set(range.start_time.clone()),
                end_time: Set(range.end_time.clone()),
                is_booked: Set(false),
                ..Default::default()
            };
            range_model
                .insert(&txn)
                .await
                .map_err(|e| TutorEaseError::database_operation(format!("写入时段失败: {e}")))?;
        }

        let ranges = Self::find_ranges(&txn, inserted.id).await?;

        txn.commit()
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(inserted.into_time_slot(ranges))
    }

    /// 通过 ID 获取报价
    pub async fn get_time_slot_by_id_impl(&self, slot_id: i64) -> Result<Option<TimeSlot>> {
        let result = TimeSlots::find_by_id(slot_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询时段报价失败: {e}")))?;

        match result {
            Some(model) => Ok(Some(self.slot_with_ranges(model).await?)),
            None => Ok(None),
        }
    }

    /// 分页列出某家教的报价
    pub async fn list_time_slots_with_pagination_impl(
        &self,
        query: TimeSlotListQuery,
    ) -> Result<TimeSlotListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = TimeSlots::find().filter(Column::TutorId.eq(query.tutor_id));

        if query.active_only {
            select = select.filter(Column::IsActive.eq(true));
        }

        if let Some(ref subject) = query.subject
            && !subject.trim().is_empty()
        {
            let escaped = escape_like_pattern(subject.trim());
            select = select.filter(Column::SubjectName.contains(&escaped));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询报价总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询报价页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询报价列表失败: {e}")))?;

        let mut items = Vec::with_capacity(models.len());
        for model in models {
            items.push(self.slot_with_ranges(model).await?);
        }

        Ok(TimeSlotListResponse {
            items,
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 冲突检测用：取某家教除指定报价外的全部启用报价
    pub async fn get_tutor_offerings_impl(
        &self,
        tutor_id: i64,
        exclude_slot_id: Option<i64>,
    ) -> Result<Vec<TimeSlot>> {
        let mut select = TimeSlots::find()
            .filter(Column::TutorId.eq(tutor_id))
            .filter(Column::IsActive.eq(true));

        if let Some(exclude) = exclude_slot_id {
            select = select.filter(Column::Id.ne(exclude));
        }

        let models = select
            .order_by_asc(Column::Id)
            .all(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询报价失败: {e}")))?;

        let mut slots = Vec::with_capacity(models.len());
        for model in models {
            slots.push(self.slot_with_ranges(model).await?);
        }
        Ok(slots)
    }

    /// 整体替换报价内容（乐观并发控制）
    ///
    /// UPDATE ... WHERE id = ? AND version = ? 未命中任何行时区分两种情况：
    /// 报价不存在返回 None，版本不匹配返回 VersionConflict。
    /// 已预约的时段行保持原样（保留 range_id，预约仍然指向它们），
    /// 未预约的行整体删除后按新列表重建。
    pub async fn replace_time_slot_impl(
        &self,
        slot_id: i64,
        expected_version: i64,
        replacement: TimeSlotReplacement,
    ) -> Result<Option<TimeSlot>> {
        let now = Self::now_ts();

        let txn = self
            .db
            .begin()
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("开启事务失败: {e}")))?;

        let update = TimeSlots::update_many()
            .col_expr(
                Column::SubjectName,
                sea_orm::sea_query::Expr::value(replacement.subject_name),
            )
            .col_expr(
                Column::GradeLevel,
                sea_orm::sea_query::Expr::value(replacement.grade_level),
            )
            .col_expr(
                Column::DaysOfWeek,
                sea_orm::sea_query::Expr::value(encode_days(&replacement.days_of_week)),
            )
            .col_expr(Column::Fee, sea_orm::sea_query::Expr::value(replacement.fee))
            .col_expr(
                Column::Timezone,
                sea_orm::sea_query::Expr::value(replacement.timezone),
            )
            .col_expr(
                Column::Notes,
                sea_orm::sea_query::Expr::value(replacement.notes),
            )
            .col_expr(
                Column::Version,
                sea_orm::sea_query::Expr::value(expected_version + 1),
            )
            .col_expr(Column::UpdatedAt, sea_orm::sea_query::Expr::value(now))
            .filter(Column::Id.eq(slot_id))
            .filter(Column::Version.eq(expected_version))
            .exec(&txn)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("更新时段报价失败: {e}")))?;

        if update.rows_affected == 0 {
            let exists = TimeSlots::find_by_id(slot_id)
                .one(&txn)
                .await
                .map_err(|e| TutorEaseError::database_operation(format!("查询时段报价失败: {e}")))?
                .is_some();
            txn.rollback()
                .await
                .map_err(|e| TutorEaseError::database_operation(format!("回滚事务失败: {e}")))?;

            if exists {
                return Err(TutorEaseError::version_conflict(format!(
                    "时段报价 {slot_id} 已被其他请求修改，请刷新后重试"
                )));
            }
            return Ok(None);
        }

        // 未预约的时段删除重建，已预约的原行保留
        TimeSlotRanges::delete_many()
            .filter(RangeColumn::TimeSlotId.eq(slot_id))
            .filter(RangeColumn::IsBooked.eq(false))
            .exec(&txn)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("清理时段失败: {e}")))?;

        for range in replacement.ranges.iter().filter(|r| !r.is_booked) {
            let range_model = RangeActiveModel {
                time_slot_id: Set(slot_id),
                start_time: Set(range.start_time.clone()),
                end_time: Set(range.end_time.clone()),
                is_booked: Set(false),
                ..Default::default()
            };
            range_model
                .insert(&txn)
                .await
                .map_err(|e| TutorEaseError::database_operation(format!("写入时段失败: {e}")))?;
        }

        let model = TimeSlots::find_by_id(slot_id)
            .one(&txn)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询时段报价失败: {e}")))?;
        let ranges = Self::find_ranges(&txn, slot_id).await?;

        txn.commit()
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("提交事务失败: {e}")))?;

        Ok(model.map(|m| m.into_time_slot(ranges)))
    }

    /// 删除整份报价（时段随外键级联删除）
    pub async fn delete_time_slot_impl(&self, slot_id: i64) -> Result<bool> {
        let result = TimeSlots::delete_by_id(slot_id)
            .exec(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("删除时段报价失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 删除单条时段
    pub async fn delete_time_slot_range_impl(&self, range_id: i64) -> Result<bool> {
        let result = TimeSlotRanges::delete_by_id(range_id)
            .exec(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("删除时段失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 预约占用/释放一条时段
    ///
    /// 占用走 CAS（仅当 is_booked = false 才更新），两个并发预约
    /// 只有一个能成功；释放不做前置条件。
    pub async fn set_range_booked_impl(&self, range_id: i64, booked: bool) -> Result<bool> {
        let mut update = TimeSlotRanges::update_many()
            .col_expr(
                RangeColumn::IsBooked,
                sea_orm::sea_query::Expr::value(booked),
            )
            .filter(RangeColumn::Id.eq(range_id));

        if booked {
            update = update.filter(RangeColumn::IsBooked.eq(false));
        }

        let result = update
            .exec(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("更新时段占用状态失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }
}
