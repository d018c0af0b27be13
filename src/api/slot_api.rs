// ==========================================
// Maur WMS - 库位 API
// ==========================================
// 职责: 批量生成库位、库位列表、打开库位查看内容
// ==========================================

use std::sync::Arc;

use serde_json::json;
use tracing::instrument;

use crate::api::error::{ApiError, ApiResult};
use crate::api::record_action;
use crate::api::validator::{check_count_limit, parse_count, parse_depot, parse_letter};
use crate::config::ConfigManager;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::slot::Slot;
use crate::engine::inventory_stats::{InventoryStatsEngine, SlotContents};
use crate::engine::slot_batch::{SlotBatchBuilder, SlotBatchReport, SlotBatchSpec};
use crate::i18n;
use crate::repository::{ActionLogRepository, SlotRepository};

/// 库位API
pub struct SlotApi {
    slot_repo: Arc<SlotRepository>,
    action_log_repo: Arc<ActionLogRepository>,
    config_manager: Arc<ConfigManager>,
    batch_builder: Arc<SlotBatchBuilder>,
    stats_engine: Arc<InventoryStatsEngine>,
}

impl SlotApi {
    pub fn new(
        slot_repo: Arc<SlotRepository>,
        action_log_repo: Arc<ActionLogRepository>,
        config_manager: Arc<ConfigManager>,
        batch_builder: Arc<SlotBatchBuilder>,
        stats_engine: Arc<InventoryStatsEngine>,
    ) -> Self {
        Self {
            slot_repo,
            action_log_repo,
            config_manager,
            batch_builder,
            stats_engine,
        }
    }

    /// 批量生成库位（表单原始输入）
    ///
    /// 字母输入不区分大小写; 货架数/层数及组合总数受配置上限约束
    #[instrument(skip(self))]
    pub fn create_slot_batch(
        &self,
        depot: &str,
        letter_from: &str,
        letter_to: &str,
        shelf_count: &str,
        level_count: &str,
        actor: &str,
    ) -> ApiResult<SlotBatchReport> {
        let _perf = crate::perf::PerfGuard::new("slot_api.create_slot_batch");

        let spec = SlotBatchSpec::new(
            parse_depot(depot)?,
            parse_letter("起始字母", letter_from)?,
            parse_letter("结束字母", letter_to)?,
            parse_count("货架数", shelf_count)?,
            parse_count("层数", level_count)?,
        );
        self.check_batch_limits(&spec)?;

        let report = self.batch_builder.build(&spec)?;

        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::BuildSlots, actor)
                .with_payload(json!({
                    "depot": spec.depot,
                    "letter_from": spec.letter_from.to_string(),
                    "letter_to": spec.letter_to.to_string(),
                    "shelf_count": spec.shelf_count,
                    "level_count": spec.level_count,
                    "created": report.created,
                    "skipped": report.skipped,
                }))
                .with_detail(Self::batch_message(&report)),
        );

        Ok(report)
    }

    /// 批次结果提示文案
    pub fn batch_message(report: &SlotBatchReport) -> String {
        i18n::t_with_args(
            "slot.batch_created",
            &[
                ("created", &report.created.to_string()),
                ("skipped", &report.skipped.to_string()),
            ],
        )
    }

    /// 全部库位（插入顺序）
    pub fn list_slots(&self) -> ApiResult<Vec<Slot>> {
        Ok(self.slot_repo.list_all()?)
    }

    /// 指定仓库的库位
    pub fn list_slots_by_depot(&self, depot: &str) -> ApiResult<Vec<Slot>> {
        let depot = parse_depot(depot)?;
        Ok(self.slot_repo.list_by_depot(depot)?)
    }

    /// 打开库位: 数量大于0的商品
    pub fn open_slot(&self, code: &str) -> ApiResult<SlotContents> {
        if code.trim().is_empty() {
            return Err(ApiError::InvalidInput("库位编码不能为空".to_string()));
        }
        Ok(self.stats_engine.slot_contents(code)?)
    }

    /// 空库位提示文案
    pub fn empty_slot_message() -> String {
        i18n::t("slot.empty")
    }

    fn check_batch_limits(&self, spec: &SlotBatchSpec) -> ApiResult<()> {
        let max_shelves = self
            .config_manager
            .get_max_shelf_count()
            .map_err(|e| ApiError::InternalError(format!("配置读取失败: {}", e)))?;
        let max_levels = self
            .config_manager
            .get_max_level_count()
            .map_err(|e| ApiError::InternalError(format!("配置读取失败: {}", e)))?;

        let max_batch = self
            .config_manager
            .get_max_batch_size()
            .map_err(|e| ApiError::InternalError(format!("配置读取失败: {}", e)))?;

        check_count_limit("货架数", spec.shelf_count, max_shelves)?;
        check_count_limit("层数", spec.level_count, max_levels)?;
        // 区间顺序与组合总数硬上限由引擎校验
        spec.validate()?;

        let requested = spec.combination_count();
        if requested > u128::from(max_batch) {
            return Err(ApiError::ValidationError(format!(
                "批次过大: {} 个库位 > {}",
                requested, max_batch
            )));
        }
        Ok(())
    }
}
