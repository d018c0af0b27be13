// ==========================================
// Maur WMS - 引擎层错误类型
// ==========================================
// 工具: thiserror 派生宏
// ==========================================

use crate::repository::error::RepositoryError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    /// 字母区间非法（非 A-Z 大写字母,或起始字母大于结束字母）
    #[error("无效的字母区间: {from}..{to}")]
    InvalidLetterRange { from: char, to: char },

    /// 数量参数非法（货架数/层数必须大于0）
    #[error("无效的数量 (field={field}): {value}")]
    InvalidCount { field: &'static str, value: u32 },

    /// 批次组合总数超过硬上限
    #[error("批次过大: {requested} 个库位 (上限 {max})")]
    BatchTooLarge { requested: u128, max: u64 },

    #[error(transparent)]
    Repository(#[from] RepositoryError),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
