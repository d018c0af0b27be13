// ==========================================
// Maur WMS - 操作日志数据仓储
// ==========================================
// 红线: API 层所有写入必须记录
// ==========================================

mod core;
mod queries;

#[cfg(test)]
mod tests;

pub use core::ActionLogRepository;
