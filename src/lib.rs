// ==========================================
// Maur WMS - 核心库
// ==========================================
// 仓储库存管理: 商品登记、库位批量生成、订单、仪表盘统计
// 技术栈: Rust + SQLite
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "pt-BR");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 引擎层 - 业务规则
pub mod engine;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 系统配置
pub mod config;

// 数据库基础设施（连接初始化/建表）
pub mod db;

// 日志系统
pub mod logging;

// 性能观测
pub mod perf;

// 国际化
pub mod i18n;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态装配
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型与实体
pub use domain::{ActionLog, ActionType, NewProduct, Order, OrderStatus, Product, Slot, SlotCode};

// 引擎
pub use engine::{
    generate_unique_code, InventoryStatsEngine, OrderFulfillment, SearchOutcome, SlotBatchBuilder,
    SlotBatchReport, SlotContents, SlotOccupancy,
};

// API
pub use api::{ApiError, ApiResult, DashboardApi, DashboardSummary, OrderApi, ProductApi, SlotApi};

// 应用状态
pub use app::AppState;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "Maur WMS";
