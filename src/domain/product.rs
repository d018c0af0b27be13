// ==========================================
// Maur WMS - 商品领域模型
// ==========================================
// 对齐: schema product 表
// ==========================================

use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// SKU 长度（6位数字,左侧补零）
pub const SKU_LEN: usize = 6;

// ==========================================
// Product - 商品
// ==========================================
// 库位引用不做外键校验: slot_code 可以指向不存在的库位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: i64,                   // 内部行号（插入顺序）
    pub sku: String,               // 6位数字编码（唯一）
    pub name: String,              // 商品名称
    pub quantity: i64,             // 库存数量（非负）
    pub slot_code: Option<String>, // 所在库位（可选）
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// 是否占用库位（有库位且数量大于0）
    pub fn occupies_slot(&self) -> bool {
        self.quantity > 0 && self.slot_code.as_deref().map_or(false, |c| !c.is_empty())
    }
}

// ==========================================
// NewProduct - 待插入商品
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewProduct {
    pub sku: String,
    pub name: String,
    pub quantity: i64,
    pub slot_code: Option<String>,
}

/// 规范化库位引用: 去空白、转大写,空串视为未分配
pub fn normalize_slot_ref(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_uppercase())
    }
}
