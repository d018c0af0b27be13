// ==========================================
// Maur WMS - 引擎层
// ==========================================
// 职责: 编码生成、库位批量生成、统计与检索规则
// 红线: Engine 不拼 SQL
// ==========================================

pub mod code_generator;
pub mod error;
pub mod inventory_stats;
pub mod product_search;
pub mod slot_batch;

// 重导出核心引擎
pub use code_generator::{generate_unique_code, generate_unique_code_with};
pub use error::{EngineError, EngineResult};
pub use inventory_stats::{
    compute_slot_occupancy, InventoryStatsEngine, OrderFulfillment, SlotContents, SlotOccupancy,
};
pub use product_search::{search_products, SearchOutcome, SearchTerm};
pub use slot_batch::{
    enumerate_slot_codes, SlotBatchBuilder, SlotBatchReport, SlotBatchSpec, MAX_BATCH_COMBINATIONS,
};
