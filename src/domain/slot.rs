// ==========================================
// Maur WMS - 库位领域模型
// ==========================================
// 对齐: schema slot 表
// 红线: 库位只能由批量生成器创建,编码唯一
// ==========================================

use crate::domain::types::SlotCode;
use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Slot {
    pub id: i64,          // 内部行号（插入顺序）
    pub code: String,     // 库位编码（唯一）
    pub depot: u32,       // 仓库号
    pub letter: String,   // 巷道字母
    pub shelf: u32,       // 货架号
    pub level: u32,       // 层号
    pub created_at: NaiveDateTime,
}

impl Slot {
    /// 还原结构化编码
    pub fn slot_code(&self) -> Option<SlotCode> {
        SlotCode::parse(&self.code)
    }
}
