// ==========================================
// Maur WMS - 订单领域模型
// ==========================================
// 对齐: schema customer_order 表
// 说明: 订单生命周期不在本系统内编排,仅用于履约统计
// ==========================================

use crate::domain::types::OrderStatus;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: i64,
    pub order_no: String, // 6位数字订单号（唯一）
    pub status: OrderStatus,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}
