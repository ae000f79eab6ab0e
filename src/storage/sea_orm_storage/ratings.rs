use super::SeaOrmStorage;
use crate::entity::ratings::{ActiveModel, Column, Entity as Ratings};
use crate::errors::{Result, TutorEaseError};
use crate::models::ratings::{entities::Rating, requests::NewRating};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, QueryOrder, Set};

impl SeaOrmStorage {
    /// 创建评价（booking_id 的唯一约束兜底"一次为限"）
    pub async fn create_rating_impl(&self, rating: NewRating) -> Result<Rating> {
        let model = ActiveModel {
            booking_id: Set(rating.booking_id),
            student_id: Set(rating.student_id),
            tutor_id: Set(rating.tutor_id),
            rating: Set(rating.rating),
            review: Set(rating.review),
            created_at: Set(Self::now_ts()),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("创建评价失败: {e}")))?;

        Ok(result.into_rating())
    }

    /// 某预约的评价
    pub async fn get_rating_by_booking_id_impl(&self, booking_id: i64) -> Result<Option<Rating>> {
        let result = Ratings::find()
            .filter(Column::BookingId.eq(booking_id))
            .one(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询评价失败: {e}")))?;

        Ok(result.map(|m| m.into_rating()))
    }

    /// 某家教的全部评价（新的在前）
    pub async fn list_ratings_by_tutor_impl(&self, tutor_id: i64) -> Result<Vec<Rating>> {
        let models = Ratings::find()
            .filter(Column::TutorId.eq(tutor_id))
            .order_by_desc(Column::CreatedAt)
            .all(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询评价列表失败: {e}")))?;

        Ok(models.into_iter().map(|m| m.into_rating()).collect())
    }
}
