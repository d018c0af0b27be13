// ==========================================
// Maur WMS - 订单 API
// ==========================================
// 职责: 创建订单、变更状态、订单列表
// 说明: 订单号为6位数字编码; 新订单状态为 PENDING
// ==========================================

use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument};

use crate::api::error::{ApiError, ApiResult};
use crate::api::record_action;
use crate::api::validator::parse_order_status;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::order::Order;
use crate::domain::types::OrderStatus;
use crate::engine::code_generator::generate_unique_code;
use crate::repository::{ActionLogRepository, OrderRepository};

/// 订单API
pub struct OrderApi {
    order_repo: Arc<OrderRepository>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl OrderApi {
    pub fn new(order_repo: Arc<OrderRepository>, action_log_repo: Arc<ActionLogRepository>) -> Self {
        Self {
            order_repo,
            action_log_repo,
        }
    }

    /// 创建订单（状态 PENDING）
    #[instrument(skip(self))]
    pub fn create_order(&self, actor: &str) -> ApiResult<Order> {
        let _perf = crate::perf::PerfGuard::new("order_api.create_order");

        let order_no = generate_unique_code(self.order_repo.as_ref(), "order_no")?;
        let order = self.order_repo.insert(&order_no, OrderStatus::Pending)?;

        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::CreateOrder, actor)
                .with_payload(json!({ "order_no": order.order_no })),
        );

        info!(order_no = %order.order_no, "订单创建成功");
        Ok(order)
    }

    /// 变更订单状态
    ///
    /// status 接受 PENDING/PICKING/SHIPPED 及葡语别名
    #[instrument(skip(self))]
    pub fn update_status(&self, order_no: &str, status: &str, actor: &str) -> ApiResult<Order> {
        let _perf = crate::perf::PerfGuard::new("order_api.update_status");

        let order_no = order_no.trim();
        let status = parse_order_status(status)?;

        let previous = self.require_order(order_no)?;
        self.order_repo.update_status(order_no, status)?;

        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::UpdateOrderStatus, actor).with_payload(json!({
                "order_no": order_no,
                "from": previous.status,
                "to": status,
            })),
        );

        self.require_order(order_no)
    }

    pub fn get_order(&self, order_no: &str) -> ApiResult<Option<Order>> {
        Ok(self.order_repo.find_by_order_no(order_no.trim())?)
    }

    pub fn list_orders(&self) -> ApiResult<Vec<Order>> {
        Ok(self.order_repo.list_all()?)
    }

    fn require_order(&self, order_no: &str) -> ApiResult<Order> {
        self.order_repo
            .find_by_order_no(order_no)?
            .ok_or_else(|| ApiError::NotFound(format!("订单(order_no={})不存在", order_no)))
    }
}
