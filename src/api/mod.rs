// ==========================================
// Maur WMS - API 层
// ==========================================
// 职责: 表单输入校验、编排、操作日志、错误映射
// ==========================================

pub mod config_api;
pub mod dashboard_api;
pub mod error;
pub mod import_api;
pub mod order_api;
pub mod product_api;
pub mod slot_api;
pub mod validator;

use tracing::warn;

use crate::domain::action_log::ActionLog;
use crate::repository::ActionLogRepository;

// 重导出核心类型
pub use config_api::ConfigApi;
pub use dashboard_api::{ChartSlice, DashboardApi, DashboardSummary, PieChart};
pub use error::{ApiError, ApiResult};
pub use import_api::ImportApi;
pub use order_api::OrderApi;
pub use product_api::ProductApi;
pub use slot_api::SlotApi;

/// 记录操作日志; 失败只告警,不影响主操作
pub(crate) fn record_action(repo: &ActionLogRepository, log: ActionLog) {
    if let Err(e) = repo.insert(&log) {
        warn!(error = %e, action_type = %log.action_type, "记录操作日志失败");
    }
}
