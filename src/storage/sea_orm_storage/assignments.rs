use super::SeaOrmStorage;
use crate::entity::assignments::{ActiveModel, Column, Entity as Assignments};
use crate::errors::{Result, TutorEaseError};
use crate::models::{
    assignments::{
        entities::{Assignment, Attachment},
        requests::{AssignmentListQuery, NewAssignment},
        responses::AssignmentListResponse,
        status::AssignmentStatus,
    },
    common::PaginationInfo,
};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, Condition, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    Set,
};

fn encode_attachments(attachments: &[Attachment]) -> Result<Option<String>> {
    if attachments.is_empty() {
        return Ok(None);
    }
    let json = serde_json::to_string(attachments)
        .map_err(|e| TutorEaseError::serialization(format!("附件序列化失败: {e}")))?;
    Ok(Some(json))
}

impl SeaOrmStorage {
    /// 创建作业
    pub async fn create_assignment_impl(&self, assignment: NewAssignment) -> Result<Assignment> {
        let now = Self::now_ts();

        let model = ActiveModel {
            booking_id: Set(assignment.booking_id),
            student_id: Set(assignment.student_id),
            tutor_id: Set(assignment.tutor_id),
            title: Set(assignment.title),
            subject: Set(assignment.subject),
            description: Set(assignment.description),
            due_date: Set(assignment.due_date.timestamp()),
            attachments: Set(encode_attachments(&assignment.attachments)?),
            status: Set(AssignmentStatus::Assigned.to_string()),
            is_active: Set(true),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("创建作业失败: {e}")))?;

        Ok(result.into_assignment())
    }

    /// 通过 ID 获取作业
    pub async fn get_assignment_by_id_impl(
        &self,
        assignment_id: i64,
    ) -> Result<Option<Assignment>> {
        let result = Assignments::find_by_id(assignment_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询作业失败: {e}")))?;

        Ok(result.map(|m| m.into_assignment()))
    }

    /// 分页列出作业
    pub async fn list_assignments_with_pagination_impl(
        &self,
        query: AssignmentListQuery,
    ) -> Result<AssignmentListResponse> {
        let page = query.page.unwrap_or(1).max(1) as u64;
        let size = query.size.unwrap_or(10).clamp(1, 100) as u64;

        let mut select = Assignments::find().filter(Column::IsActive.eq(true));

        if let Some(student_id) = query.student_id {
            select = select.filter(Column::StudentId.eq(student_id));
        }
        if let Some(tutor_id) = query.tutor_id {
            select = select.filter(Column::TutorId.eq(tutor_id));
        }
        if let Some(booking_id) = query.booking_id {
            select = select.filter(Column::BookingId.eq(booking_id));
        }
        if let Some(ref status) = query.status {
            select = select.filter(Column::Status.eq(status.to_string()));
        }

        select = select.order_by_desc(Column::CreatedAt);

        let paginator = select.paginate(&self.db, size);
        let total = paginator
            .num_items()
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询作业总数失败: {e}")))?;
        let pages = paginator
            .num_pages()
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询作业页数失败: {e}")))?;
        let models = paginator
            .fetch_page(page - 1)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询作业列表失败: {e}")))?;

        Ok(AssignmentListResponse {
            items: models.into_iter().map(|m| m.into_assignment()).collect(),
            pagination: PaginationInfo {
                page: page as i64,
                page_size: size as i64,
                total: total as i64,
                total_pages: pages as i64,
            },
        })
    }

    /// 写入学生提交并更新状态
    pub async fn submit_assignment_impl(
        &self,
        assignment_id: i64,
        remarks: Option<String>,
        attachments: Vec<Attachment>,
        new_status: AssignmentStatus,
    ) -> Result<Option<Assignment>> {
        let existing = self.get_assignment_by_id_impl(assignment_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = Self::now_ts();

        let model = ActiveModel {
            id: Set(assignment_id),
            submission_remarks: Set(remarks),
            submission_attachments: Set(encode_attachments(&attachments)?),
            submitted_at: Set(Some(now)),
            status: Set(new_status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("提交作业失败: {e}")))?;

        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 仅更新状态
    pub async fn set_assignment_status_impl(
        &self,
        assignment_id: i64,
        status: AssignmentStatus,
    ) -> Result<Option<Assignment>> {
        let existing = self.get_assignment_by_id_impl(assignment_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let model = ActiveModel {
            id: Set(assignment_id),
            status: Set(status.to_string()),
            updated_at: Set(Self::now_ts()),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("更新作业状态失败: {e}")))?;

        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 写入点评并更新状态
    pub async fn provide_assignment_feedback_impl(
        &self,
        assignment_id: i64,
        content: String,
        grade: Option<f64>,
        new_status: AssignmentStatus,
    ) -> Result<Option<Assignment>> {
        let existing = self.get_assignment_by_id_impl(assignment_id).await?;
        if existing.is_none() {
            return Ok(None);
        }

        let now = Self::now_ts();

        let model = ActiveModel {
            id: Set(assignment_id),
            feedback_content: Set(Some(content)),
            feedback_grade: Set(grade),
            feedback_provided_at: Set(Some(now)),
            status: Set(new_status.to_string()),
            updated_at: Set(now),
            ..Default::default()
        };

        model
            .update(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("写入点评失败: {e}")))?;

        self.get_assignment_by_id_impl(assignment_id).await
    }

    /// 删除作业
    pub async fn delete_assignment_impl(&self, assignment_id: i64) -> Result<bool> {
        let result = Assignments::delete_by_id(assignment_id)
            .exec(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("删除作业失败: {e}")))?;

        Ok(result.rows_affected > 0)
    }

    /// 到期扫描：已过截止时间且状态仍需流转的作业
    pub async fn list_due_assignments_impl(
        &self,
        now: chrono::DateTime<chrono::Utc>,
    ) -> Result<Vec<Assignment>> {
        let models = Assignments::find()
            .filter(Column::DueDate.lt(now.timestamp()))
            .filter(Column::IsActive.eq(true))
            .filter(
                Condition::any()
                    .add(Column::Status.eq(AssignmentStatus::Assigned.to_string()))
                    .add(Column::Status.eq(AssignmentStatus::Submitted.to_string()))
                    .add(Column::Status.eq(AssignmentStatus::Overdue.to_string())),
            )
            .all(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询到期作业失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_assignment()).collect())
    }
}
