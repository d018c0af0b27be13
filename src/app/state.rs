// ==========================================
// Maur WMS - 应用状态
// ==========================================
// 职责: 管理应用级别的共享状态和API实例
// 所有仓储共享同一个 SQLite 连接
// ==========================================

use std::sync::{Arc, Mutex};

use rusqlite::Connection;

use crate::api::{ConfigApi, DashboardApi, ImportApi, OrderApi, ProductApi, SlotApi};
use crate::config::config_manager::ConfigManager;
use crate::db::{ensure_schema, open_sqlite_connection};
use crate::engine::{InventoryStatsEngine, SlotBatchBuilder};
use crate::importer::ProductImporter;
use crate::repository::{
    ActionLogRepository, OrderRepository, ProductRepository, SlotRepository,
};

/// 数据库路径环境变量
pub const ENV_DB_PATH: &str = "MAUR_WMS_DB_PATH";

/// 应用状态
///
/// 包含所有API实例和共享资源
pub struct AppState {
    /// 数据库路径（内存库为 ":memory:"）
    pub db_path: String,

    /// 商品API
    pub product_api: Arc<ProductApi>,

    /// 库位API
    pub slot_api: Arc<SlotApi>,

    /// 订单API
    pub order_api: Arc<OrderApi>,

    /// 仪表盘API
    pub dashboard_api: Arc<DashboardApi>,

    /// 商品导入API
    pub import_api: Arc<ImportApi>,

    /// 配置管理API
    pub config_api: Arc<ConfigApi>,

    /// 操作日志仓储（用于审计追踪）
    pub action_log_repo: Arc<ActionLogRepository>,
}

impl AppState {
    /// 打开数据库文件并创建AppState
    ///
    /// 该方法会：
    /// 1. 打开连接并建表（幂等）
    /// 2. 安装 SQL 性能观测
    /// 3. 按配置设置界面语言
    /// 4. 创建所有 Repository / Engine / API
    pub fn new(db_path: String) -> Result<Self, String> {
        tracing::info!("初始化AppState，数据库路径: {}", db_path);

        let mut conn =
            open_sqlite_connection(&db_path).map_err(|e| format!("无法打开数据库: {}", e))?;
        ensure_schema(&conn).map_err(|e| format!("建表失败: {}", e))?;
        crate::perf::install_sqlite_tracing(&mut conn);

        Self::from_connection(Arc::new(Mutex::new(conn)), db_path)
    }

    /// 内存库（测试与演示用）
    pub fn in_memory() -> Result<Self, String> {
        let conn = crate::db::open_in_memory().map_err(|e| format!("无法打开内存库: {}", e))?;
        Self::from_connection(Arc::new(Mutex::new(conn)), ":memory:".to_string())
    }

    /// 基于已建表的共享连接装配
    pub fn from_connection(conn: Arc<Mutex<Connection>>, db_path: String) -> Result<Self, String> {
        // ==========================================
        // Repository 层
        // ==========================================
        let product_repo = Arc::new(ProductRepository::new(conn.clone()));
        let slot_repo = Arc::new(SlotRepository::new(conn.clone()));
        let order_repo = Arc::new(OrderRepository::new(conn.clone()));
        let action_log_repo = Arc::new(ActionLogRepository::new(conn.clone()));

        let config_manager = Arc::new(
            ConfigManager::from_connection(conn)
                .map_err(|e| format!("无法创建ConfigManager: {}", e))?,
        );

        match config_manager.get_ui_locale() {
            Ok(locale) => crate::i18n::set_locale(&locale),
            Err(e) => tracing::warn!("读取界面语言失败(使用默认语言): {}", e),
        }

        // ==========================================
        // Engine 层
        // ==========================================
        let batch_builder = Arc::new(SlotBatchBuilder::new(slot_repo.clone()));
        let stats_engine = Arc::new(InventoryStatsEngine::new(
            product_repo.clone(),
            slot_repo.clone(),
            order_repo.clone(),
        ));
        let importer = Arc::new(ProductImporter::new(product_repo.clone(), slot_repo.clone()));

        // ==========================================
        // API 层
        // ==========================================
        let product_api = Arc::new(ProductApi::new(
            product_repo.clone(),
            slot_repo.clone(),
            action_log_repo.clone(),
            config_manager.clone(),
        ));
        let slot_api = Arc::new(SlotApi::new(
            slot_repo,
            action_log_repo.clone(),
            config_manager.clone(),
            batch_builder,
            stats_engine.clone(),
        ));
        let order_api = Arc::new(OrderApi::new(order_repo, action_log_repo.clone()));
        let dashboard_api = Arc::new(DashboardApi::new(
            stats_engine,
            product_repo,
            action_log_repo.clone(),
        ));
        let import_api = Arc::new(ImportApi::new(importer, action_log_repo.clone()));
        let config_api = Arc::new(ConfigApi::new(config_manager, action_log_repo.clone()));

        tracing::info!("AppState初始化完成");

        Ok(Self {
            db_path,
            product_api,
            slot_api,
            order_api,
            dashboard_api,
            import_api,
            config_api,
            action_log_repo,
        })
    }
}

/// 获取默认数据库路径
///
/// 优先级: MAUR_WMS_DB_PATH > 用户数据目录/maur-wms/maur_wms.db > ./maur_wms.db
pub fn get_default_db_path() -> String {
    use std::path::PathBuf;

    if let Ok(path) = std::env::var(ENV_DB_PATH) {
        let trimmed = path.trim();
        if !trimmed.is_empty() {
            return trimmed.to_string();
        }
    }

    let mut path = PathBuf::from("./maur_wms.db");

    if let Some(data_dir) = dirs::data_dir() {
        let dir = if cfg!(debug_assertions) {
            data_dir.join("maur-wms-dev")
        } else {
            data_dir.join("maur-wms")
        };

        // 目录创建失败时回退到当前目录
        match std::fs::create_dir_all(&dir) {
            Ok(()) => path = dir.join("maur_wms.db"),
            Err(e) => tracing::warn!("无法创建数据目录 {}: {}", dir.display(), e),
        }
    }

    path.to_string_lossy().to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_get_default_db_path() {
        let path = get_default_db_path();
        assert!(!path.is_empty());
        assert!(path.ends_with(".db"));
    }

    #[test]
    fn test_in_memory_state_starts_empty() {
        let state = AppState::in_memory().unwrap();
        let summary = state.dashboard_api.get_summary().unwrap();
        assert_eq!(summary.total_products, 0);
        assert_eq!(summary.occupancy.total_slots, 0);
        assert_eq!(summary.fulfillment.total_orders, 0);
    }
}
