// ==========================================
// API集成测试辅助工具
// ==========================================
// 职责: 基于临时数据库文件装配完整的 AppState
// ==========================================

#[path = "../test_helpers.rs"]
mod test_helpers;

use std::sync::{Arc, Mutex};
use tempfile::NamedTempFile;

use maur_wms::api::{ConfigApi, DashboardApi, ImportApi, OrderApi, ProductApi, SlotApi};
use maur_wms::app::AppState;
use maur_wms::domain::product::{NewProduct, Product};
use maur_wms::domain::types::SlotCode;
use maur_wms::repository::{
    ActionLogRepository, OrderRepository, ProductRepository, SlotRepository,
};

pub const ACTOR: &str = "tester";

// ==========================================
// API测试环境
// ==========================================

/// API测试环境
///
/// API 与仓储共享同一个连接
pub struct ApiTestEnv {
    pub db_path: String,
    pub product_api: Arc<ProductApi>,
    pub slot_api: Arc<SlotApi>,
    pub order_api: Arc<OrderApi>,
    pub dashboard_api: Arc<DashboardApi>,
    pub import_api: Arc<ImportApi>,
    pub config_api: Arc<ConfigApi>,

    // Repository层（用于测试数据准备与断言）
    pub product_repo: Arc<ProductRepository>,
    pub slot_repo: Arc<SlotRepository>,
    pub order_repo: Arc<OrderRepository>,
    pub action_log_repo: Arc<ActionLogRepository>,

    // 临时文件（确保生命周期）
    _temp_file: NamedTempFile,
}

impl ApiTestEnv {
    pub fn new() -> Result<Self, String> {
        let (temp_file, db_path) =
            test_helpers::create_test_db().map_err(|e| format!("无法创建测试数据库: {}", e))?;
        let conn = test_helpers::open_test_connection(&db_path)
            .map_err(|e| format!("无法打开测试数据库: {}", e))?;
        let conn = Arc::new(Mutex::new(conn));

        let state = AppState::from_connection(conn.clone(), db_path.clone())?;

        Ok(Self {
            db_path,
            product_api: state.product_api,
            slot_api: state.slot_api,
            order_api: state.order_api,
            dashboard_api: state.dashboard_api,
            import_api: state.import_api,
            config_api: state.config_api,
            product_repo: Arc::new(ProductRepository::new(conn.clone())),
            slot_repo: Arc::new(SlotRepository::new(conn.clone())),
            order_repo: Arc::new(OrderRepository::new(conn)),
            action_log_repo: state.action_log_repo,
            _temp_file: temp_file,
        })
    }

    /// 直接写入库位（绕过批量生成）
    pub fn seed_slots(&self, codes: &[SlotCode]) {
        self.slot_repo
            .insert_missing(codes)
            .expect("写入库位失败");
    }

    /// 直接写入商品
    pub fn seed_product(&self, product: NewProduct) -> Product {
        self.product_repo.insert(&product).expect("写入商品失败")
    }

    pub fn product_count(&self) -> i64 {
        self.product_repo.count().expect("统计商品失败")
    }

    pub fn slot_count(&self) -> i64 {
        self.slot_repo.count().expect("统计库位失败")
    }

    pub fn order_count(&self) -> i64 {
        self.order_repo.count().expect("统计订单失败")
    }

    pub fn action_count(&self) -> i64 {
        self.action_log_repo.count().expect("统计操作日志失败")
    }
}
