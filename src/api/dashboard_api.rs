// ==========================================
// Maur WMS - 仪表盘 API
// ==========================================
// 职责: 仪表盘汇总（订单履约 + 库位占用）及操作日志查询
// 说明: 只输出图表数据（数值、百分比、本地化标签）,不负责绘制
// ==========================================

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::api::error::{ApiError, ApiResult};
use crate::domain::action_log::ActionLog;
use crate::engine::inventory_stats::{InventoryStatsEngine, OrderFulfillment, SlotOccupancy};
use crate::i18n;
use crate::repository::{ActionLogRepository, ProductRepository};

/// 饼图切片
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChartSlice {
    pub label: String,
    pub value: i64,
    /// 整数百分比
    pub percent: u32,
}

/// 饼图
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PieChart {
    pub title: String,
    pub slices: Vec<ChartSlice>,
}

impl PieChart {
    /// 所有切片为0（无数据）
    pub fn is_empty(&self) -> bool {
        self.slices.iter().all(|s| s.value == 0)
    }
}

/// 仪表盘汇总
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DashboardSummary {
    pub total_products: i64,
    pub fulfillment: OrderFulfillment,
    pub occupancy: SlotOccupancy,
    pub orders_chart: PieChart,
    pub slots_chart: PieChart,
}

/// 由 (标签, 数值) 生成切片; 负值按0处理,百分比四舍五入
pub fn build_pie_chart(title: String, parts: &[(String, i64)]) -> PieChart {
    let base: i64 = parts.iter().map(|(_, v)| (*v).max(0)).sum();
    let slices = parts
        .iter()
        .map(|(label, value)| {
            let value = (*value).max(0);
            let percent = if base == 0 {
                0
            } else {
                ((value as f64) * 100.0 / (base as f64)).round() as u32
            };
            ChartSlice {
                label: label.clone(),
                value,
                percent,
            }
        })
        .collect();
    PieChart { title, slices }
}

/// 仪表盘API
pub struct DashboardApi {
    stats_engine: Arc<InventoryStatsEngine>,
    product_repo: Arc<ProductRepository>,
    action_log_repo: Arc<ActionLogRepository>,
}

impl DashboardApi {
    pub fn new(
        stats_engine: Arc<InventoryStatsEngine>,
        product_repo: Arc<ProductRepository>,
        action_log_repo: Arc<ActionLogRepository>,
    ) -> Self {
        Self {
            stats_engine,
            product_repo,
            action_log_repo,
        }
    }

    /// 订单履约统计
    pub fn order_fulfillment(&self) -> ApiResult<OrderFulfillment> {
        Ok(self.stats_engine.order_fulfillment()?)
    }

    /// 库位占用统计
    pub fn slot_occupancy(&self) -> ApiResult<SlotOccupancy> {
        Ok(self.stats_engine.slot_occupancy()?)
    }

    /// 仪表盘汇总（标签按当前语言）
    pub fn get_summary(&self) -> ApiResult<DashboardSummary> {
        let _perf = crate::perf::PerfGuard::new("dashboard_api.get_summary");

        let fulfillment = self.order_fulfillment()?;
        let occupancy = self.slot_occupancy()?;

        let orders_chart = build_pie_chart(
            i18n::t("chart.orders_title"),
            &[
                (i18n::t("chart.fulfilled"), fulfillment.fulfilled),
                (i18n::t("chart.pending"), fulfillment.pending),
            ],
        );
        let slots_chart = build_pie_chart(
            i18n::t("chart.slots_title"),
            &[
                (i18n::t("chart.occupied"), occupancy.occupied),
                (i18n::t("chart.free"), occupancy.free),
            ],
        );

        Ok(DashboardSummary {
            total_products: self.product_repo.count()?,
            fulfillment,
            occupancy,
            orders_chart,
            slots_chart,
        })
    }

    /// 最近操作日志
    pub fn list_recent_actions(&self, limit: i64) -> ApiResult<Vec<ActionLog>> {
        if limit <= 0 {
            return Err(ApiError::InvalidInput(format!("limit 必须大于0: {}", limit)));
        }
        Ok(self.action_log_repo.find_recent(limit)?)
    }
}
