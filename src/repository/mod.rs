// ==========================================
// Maur WMS - 数据仓储层
// ==========================================
// 红线: Repository 不含业务逻辑
// 约束: 所有查询使用参数化,防止 SQL 注入
// ==========================================
// 职责: 商品/库位/订单三个集合 + 操作日志的数据访问
// ==========================================

pub mod action_log_repo;
pub mod code_lookup;
pub mod error;
pub mod order_repo;
pub mod product_repo;
pub mod slot_repo;

// 重导出核心仓储
pub use action_log_repo::ActionLogRepository;
pub use code_lookup::CodeLookup;
pub use error::{RepositoryError, RepositoryResult};
pub use order_repo::OrderRepository;
pub use product_repo::ProductRepository;
pub use slot_repo::SlotRepository;
