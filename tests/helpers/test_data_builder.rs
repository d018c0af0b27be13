// ==========================================
// 测试数据构建器 - 用于集成测试
// ==========================================

use maur_wms::domain::product::NewProduct;
use maur_wms::domain::types::SlotCode;

// ==========================================
// NewProduct 构建器
// ==========================================

pub struct ProductBuilder {
    sku: String,
    name: String,
    quantity: i64,
    slot_code: Option<String>,
}

impl ProductBuilder {
    pub fn new(sku: &str) -> Self {
        Self {
            sku: sku.to_string(),
            name: format!("Produto {}", sku),
            quantity: 1,
            slot_code: None,
        }
    }

    pub fn name(mut self, name: &str) -> Self {
        self.name = name.to_string();
        self
    }

    pub fn quantity(mut self, quantity: i64) -> Self {
        self.quantity = quantity;
        self
    }

    pub fn slot(mut self, code: &str) -> Self {
        self.slot_code = Some(code.to_string());
        self
    }

    pub fn build(self) -> NewProduct {
        NewProduct {
            sku: self.sku,
            name: self.name,
            quantity: self.quantity,
            slot_code: self.slot_code,
        }
    }
}

// ==========================================
// 库位编码构建
// ==========================================

/// depot 下 letters × shelves × levels 的全部编码（生成顺序）
pub fn slot_grid(depot: u32, letters: &[char], shelves: u32, levels: u32) -> Vec<SlotCode> {
    let mut codes = Vec::new();
    for &letter in letters {
        for shelf in 1..=shelves {
            for level in 1..=levels {
                codes.push(SlotCode::new(depot, letter, shelf, level));
            }
        }
    }
    codes
}
