// ==========================================
// Maur WMS - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含引擎逻辑
// ==========================================

pub mod action_log;
pub mod order;
pub mod product;
pub mod slot;
pub mod types;

// 重导出核心类型
pub use action_log::{ActionLog, ActionType};
pub use order::Order;
pub use product::{NewProduct, Product};
pub use slot::Slot;
pub use types::{OrderStatus, SlotCode};
