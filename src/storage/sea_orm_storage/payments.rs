use super::SeaOrmStorage;
use crate::entity::payments::{ActiveModel, Column, Entity as Payments};
use crate::errors::{Result, TutorEaseError};
use crate::models::payments::{
    entities::{Payment, PaymentRecordStatus},
    requests::NewPayment,
};
use sea_orm::{ActiveModelTrait, ColumnTrait, EntityTrait, QueryFilter, Set};

impl SeaOrmStorage {
    /// 创建支付单
    pub async fn create_payment_impl(&self, payment: NewPayment) -> Result<Payment> {
        let now = Self::now_ts();

        let model = ActiveModel {
            booking_id: Set(payment.booking_id),
            student_id: Set(payment.student_id),
            amount: Set(payment.amount),
            order_ref: Set(payment.order_ref),
            transaction_id: Set(None),
            status: Set(PaymentRecordStatus::Pending.to_string()),
            created_at: Set(now),
            updated_at: Set(now),
            ..Default::default()
        };

        let result = model
            .insert(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("创建支付单失败: {e}")))?;

        Ok(result.into_payment())
    }

    /// 通过订单号获取支付单
    pub async fn get_payment_by_order_ref_impl(&self, order_ref: &str) -> Result<Option<Payment>> {
        let result = Payments::find()
            .filter(Column::OrderRef.eq(order_ref))
            .one(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询支付单失败: {e}")))?;

        Ok(result.map(|m| m.into_payment()))
    }

    /// 更新支付单状态
    pub async fn update_payment_status_impl(
        &self,
        payment_id: i64,
        status: PaymentRecordStatus,
        transaction_id: Option<String>,
    ) -> Result<Option<Payment>> {
        let existing = Payments::find_by_id(payment_id)
            .one(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("查询支付单失败: {e}")))?;
        if existing.is_none() {
            return Ok(None);
        }

        let mut model = ActiveModel {
            id: Set(payment_id),
            status: Set(status.to_string()),
            updated_at: Set(Self::now_ts()),
            ..Default::default()
        };
        if let Some(txn_id) = transaction_id {
            model.transaction_id = Set(Some(txn_id));
        }

        let updated = model
            .update(&self.db)
            .await
            .map_err(|e| TutorEaseError::database_operation(format!("更新支付单失败: {e}")))?;

        Ok(Some(updated.into_payment()))
    }
}
