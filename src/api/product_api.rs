// ==========================================
// Maur WMS - 商品 API
// ==========================================
// 职责: 商品登记、数量调整、库位分配、检索
// 原则: 校验在写入之前完成; 每次写入记录 ActionLog
// ==========================================

use std::sync::Arc;

use serde_json::json;
use tracing::{info, instrument, warn};

use crate::api::error::{ApiError, ApiResult};
use crate::api::record_action;
use crate::api::validator::{parse_quantity, require_name};
use crate::config::ConfigManager;
use crate::domain::action_log::{ActionLog, ActionType};
use crate::domain::product::{normalize_slot_ref, NewProduct, Product};
use crate::engine::code_generator::generate_unique_code;
use crate::engine::product_search::{SearchOutcome, SearchTerm};
use crate::i18n;
use crate::repository::{ActionLogRepository, ProductRepository, SlotRepository};

/// 商品API
pub struct ProductApi {
    product_repo: Arc<ProductRepository>,
    slot_repo: Arc<SlotRepository>,
    action_log_repo: Arc<ActionLogRepository>,
    config_manager: Arc<ConfigManager>,
}

impl ProductApi {
    pub fn new(
        product_repo: Arc<ProductRepository>,
        slot_repo: Arc<SlotRepository>,
        action_log_repo: Arc<ActionLogRepository>,
        config_manager: Arc<ConfigManager>,
    ) -> Self {
        Self {
            product_repo,
            slot_repo,
            action_log_repo,
            config_manager,
        }
    }

    // ==========================================
    // 写入接口
    // ==========================================

    /// 登记商品
    ///
    /// # 参数
    /// - name: 商品名称（非空）
    /// - quantity: 数量原始输入（非负整数）
    /// - slot_code: 库位原始输入（去空白、转大写; 空串为未分配）
    /// - actor: 操作人
    ///
    /// 库位不存在时只告警,不拒绝
    #[instrument(skip(self))]
    pub fn register_product(
        &self,
        name: &str,
        quantity: &str,
        slot_code: &str,
        actor: &str,
    ) -> ApiResult<Product> {
        let _perf = crate::perf::PerfGuard::new("product_api.register_product");

        let name = require_name(name)?;
        let quantity = parse_quantity(quantity)?;
        let slot_code = normalize_slot_ref(slot_code);

        self.warn_if_unknown_slot(slot_code.as_deref())?;

        let sku = generate_unique_code(self.product_repo.as_ref(), "sku")?;
        let product = self.product_repo.insert(&NewProduct {
            sku,
            name,
            quantity,
            slot_code,
        })?;

        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::RegisterProduct, actor).with_payload(json!({
                "sku": product.sku,
                "name": product.name,
                "quantity": product.quantity,
                "slot_code": product.slot_code,
            })),
        );

        info!(sku = %product.sku, "商品登记成功");
        Ok(product)
    }

    /// 调整库存数量
    #[instrument(skip(self))]
    pub fn update_quantity(&self, sku: &str, quantity: &str, actor: &str) -> ApiResult<Product> {
        let _perf = crate::perf::PerfGuard::new("product_api.update_quantity");

        let sku = sku.trim();
        let quantity = parse_quantity(quantity)?;

        let previous = self.require_product(sku)?;
        self.product_repo.update_quantity(sku, quantity)?;

        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::UpdateQuantity, actor).with_payload(json!({
                "sku": sku,
                "from": previous.quantity,
                "to": quantity,
            })),
        );

        self.require_product(sku)
    }

    /// 分配（或清空）库位
    #[instrument(skip(self))]
    pub fn assign_slot(&self, sku: &str, slot_code: &str, actor: &str) -> ApiResult<Product> {
        let _perf = crate::perf::PerfGuard::new("product_api.assign_slot");

        let sku = sku.trim();
        let slot_code = normalize_slot_ref(slot_code);

        let previous = self.require_product(sku)?;
        self.warn_if_unknown_slot(slot_code.as_deref())?;
        self.product_repo.update_slot_code(sku, slot_code.as_deref())?;

        record_action(
            &self.action_log_repo,
            ActionLog::new(ActionType::AssignSlot, actor).with_payload(json!({
                "sku": sku,
                "from": previous.slot_code,
                "to": slot_code,
            })),
        );

        self.require_product(sku)
    }

    // ==========================================
    // 查询接口
    // ==========================================

    /// 按 SKU 查询（不存在返回 None）
    pub fn get_product(&self, sku: &str) -> ApiResult<Option<Product>> {
        Ok(self.product_repo.find_by_sku(sku.trim())?)
    }

    /// 全部商品（插入顺序）
    pub fn list_products(&self) -> ApiResult<Vec<Product>> {
        Ok(self.product_repo.list_all()?)
    }

    /// 检索商品（名称包含,或 SKU 完全相等）
    ///
    /// 结果数受 `search.max_results` 限制（0 = 不限制）
    pub fn search(&self, term: &str) -> ApiResult<SearchOutcome> {
        let _perf = crate::perf::PerfGuard::new("product_api.search");

        let term = match SearchTerm::parse(term) {
            Some(term) => term,
            None => return Ok(SearchOutcome::NoInput),
        };

        let max_results = self
            .config_manager
            .get_search_max_results()
            .map_err(|e| ApiError::InternalError(format!("配置读取失败: {}", e)))?;

        let mut items = self.product_repo.search(|p| term.matches(p))?;
        if max_results > 0 {
            items.truncate(max_results);
        }
        Ok(SearchOutcome::Matches(items))
    }

    /// 检索结果的提示文案（仅 NoInput 时有值）
    pub fn search_hint(outcome: &SearchOutcome) -> Option<String> {
        match outcome {
            SearchOutcome::NoInput => Some(i18n::t("common.no_input")),
            SearchOutcome::Matches(_) => None,
        }
    }

    // ==========================================
    // 内部辅助
    // ==========================================

    fn require_product(&self, sku: &str) -> ApiResult<Product> {
        self.product_repo
            .find_by_sku(sku)?
            .ok_or_else(|| ApiError::NotFound(format!("商品(sku={})不存在", sku)))
    }

    fn warn_if_unknown_slot(&self, slot_code: Option<&str>) -> ApiResult<()> {
        if let Some(code) = slot_code {
            if !self.slot_repo.exists(code)? {
                warn!(slot_code = code, "商品引用了未登记的库位");
            }
        }
        Ok(())
    }
}
