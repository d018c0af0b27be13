// ==========================================
// Maur WMS - 领域类型定义
// ==========================================
// 订单状态 / 库位编码
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 订单状态 (Order Status)
// ==========================================
// 只有 SHIPPED 计为已履约,其余一律视为待处理
// 序列化格式: SCREAMING_SNAKE_CASE (与数据库一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum OrderStatus {
    Pending, // 待处理
    Picking, // 拣货中
    Shipped, // 已发货
}

impl fmt::Display for OrderStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_db_str())
    }
}

impl OrderStatus {
    /// 转换为数据库存储字符串
    pub fn to_db_str(&self) -> &'static str {
        match self {
            OrderStatus::Pending => "PENDING",
            OrderStatus::Picking => "PICKING",
            OrderStatus::Shipped => "SHIPPED",
        }
    }

    /// 从字符串解析状态（大小写不敏感,仅接受规范值）
    pub fn parse(s: &str) -> Option<Self> {
        match s.trim().to_uppercase().as_str() {
            "PENDING" => Some(OrderStatus::Pending),
            "PICKING" => Some(OrderStatus::Picking),
            "SHIPPED" => Some(OrderStatus::Shipped),
            _ => None,
        }
    }

    /// 是否已履约
    pub fn is_fulfilled(&self) -> bool {
        matches!(self, OrderStatus::Shipped)
    }
}

// ==========================================
// 库位编码 (Slot Code)
// ==========================================
// 格式: "{depot}-{letter}-{shelf:02}-{level:02}"
// 仓库号不补零,字母为单个大写字母,货架/层号至少两位
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct SlotCode {
    pub depot: u32,
    pub letter: char,
    pub shelf: u32,
    pub level: u32,
}

impl SlotCode {
    pub fn new(depot: u32, letter: char, shelf: u32, level: u32) -> Self {
        Self {
            depot,
            letter,
            shelf,
            level,
        }
    }

    /// 解析库位编码字符串
    ///
    /// 仅接受本系统生成的格式; 其他字符串返回 None
    pub fn parse(code: &str) -> Option<Self> {
        let mut parts = code.trim().split('-');
        let depot = parts.next()?.parse::<u32>().ok()?;

        let letter_part = parts.next()?;
        let mut chars = letter_part.chars();
        let letter = chars.next()?;
        if chars.next().is_some() || !letter.is_ascii_uppercase() {
            return None;
        }

        let shelf_part = parts.next()?;
        let level_part = parts.next()?;
        if parts.next().is_some() || shelf_part.len() < 2 || level_part.len() < 2 {
            return None;
        }
        let shelf = shelf_part.parse::<u32>().ok()?;
        let level = level_part.parse::<u32>().ok()?;

        Some(Self::new(depot, letter, shelf, level))
    }
}

impl fmt::Display for SlotCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}-{}-{:02}-{:02}",
            self.depot, self.letter, self.shelf, self.level
        )
    }
}
