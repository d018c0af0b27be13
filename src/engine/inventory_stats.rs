// ==========================================
// Maur WMS - 库存统计引擎
// ==========================================
// 职责: 订单履约统计 + 库位占用统计
// 红线: Engine 不拼 SQL,数据经 Repository 读取
// ==========================================
// 履约: fulfilled = SHIPPED 订单数; pending = 总数 - fulfilled
// 库位内容: slot_code 相等且数量>0 的商品
// 占用: occupied = 有库位且数量>0 的商品所引用的不同库位数
//       free = 库位总数 - occupied
// 说明: 占用由商品数据推导,不与库位集合交叉校验;
//       引用了不存在库位的商品同样计入 occupied,
//       另以 orphaned_references 单独报告
// ==========================================

use std::collections::HashSet;
use std::sync::Arc;

use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::domain::product::Product;
use crate::domain::types::OrderStatus;
use crate::repository::error::RepositoryResult;
use crate::repository::{OrderRepository, ProductRepository, SlotRepository};

// ==========================================
// OrderFulfillment - 订单履约统计
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct OrderFulfillment {
    pub total_orders: i64,
    pub fulfilled: i64,
    pub pending: i64,
}

impl OrderFulfillment {
    pub fn from_counts(total_orders: i64, fulfilled: i64) -> Self {
        Self {
            total_orders,
            fulfilled,
            pending: total_orders - fulfilled,
        }
    }
}

// ==========================================
// SlotOccupancy - 库位占用统计
// ==========================================
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotOccupancy {
    pub total_slots: i64,
    pub occupied: i64,
    pub free: i64,
    /// 被占用但库位集合中不存在的编码数
    pub orphaned_references: i64,
}

/// 由库位编码集合与商品列表推导占用统计
pub fn compute_slot_occupancy(slot_codes: &HashSet<String>, products: &[Product]) -> SlotOccupancy {
    let occupied_codes: HashSet<&str> = products
        .iter()
        .filter(|p| p.occupies_slot())
        .filter_map(|p| p.slot_code.as_deref())
        .collect();

    let orphaned = occupied_codes
        .iter()
        .filter(|code| !slot_codes.contains(**code))
        .count() as i64;

    let total_slots = slot_codes.len() as i64;
    let occupied = occupied_codes.len() as i64;

    SlotOccupancy {
        total_slots,
        occupied,
        free: total_slots - occupied,
        orphaned_references: orphaned,
    }
}

// ==========================================
// SlotContents - 库位内容
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SlotContents {
    pub code: String,
    /// 库位集合中是否存在该编码
    pub registered: bool,
    pub items: Vec<Product>,
}

impl SlotContents {
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn total_quantity(&self) -> i64 {
        self.items.iter().map(|p| p.quantity).sum()
    }
}

// ==========================================
// InventoryStatsEngine - 统计引擎
// ==========================================
pub struct InventoryStatsEngine {
    product_repo: Arc<ProductRepository>,
    slot_repo: Arc<SlotRepository>,
    order_repo: Arc<OrderRepository>,
}

impl InventoryStatsEngine {
    pub fn new(
        product_repo: Arc<ProductRepository>,
        slot_repo: Arc<SlotRepository>,
        order_repo: Arc<OrderRepository>,
    ) -> Self {
        Self {
            product_repo,
            slot_repo,
            order_repo,
        }
    }

    /// 订单履约统计
    pub fn order_fulfillment(&self) -> RepositoryResult<OrderFulfillment> {
        let total = self.order_repo.count()?;
        let fulfilled = self.order_repo.count_by_status(OrderStatus::Shipped)?;
        let stats = OrderFulfillment::from_counts(total, fulfilled);
        debug!(?stats, "订单履约统计");
        Ok(stats)
    }

    /// 库位占用统计
    pub fn slot_occupancy(&self) -> RepositoryResult<SlotOccupancy> {
        let slot_codes: HashSet<String> = self.slot_repo.list_codes()?.into_iter().collect();
        let products = self.product_repo.list_all()?;
        let stats = compute_slot_occupancy(&slot_codes, &products);

        if stats.orphaned_references > 0 {
            warn!(
                orphaned = stats.orphaned_references,
                "存在引用未登记库位的商品"
            );
        }
        debug!(?stats, "库位占用统计");
        Ok(stats)
    }

    /// 库位内容（空库位返回空列表,不报错）
    pub fn slot_contents(&self, code: &str) -> RepositoryResult<SlotContents> {
        let code = code.trim().to_uppercase();
        let registered = self.slot_repo.exists(&code)?;
        let items = self.product_repo.find_in_stock_by_slot(&code)?;
        Ok(SlotContents {
            code,
            registered,
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;

    fn product(sku: &str, quantity: i64, slot: Option<&str>) -> Product {
        let now = Utc::now().naive_utc();
        Product {
            id: 0,
            sku: sku.to_string(),
            name: format!("P{}", sku),
            quantity,
            slot_code: slot.map(|s| s.to_string()),
            created_at: now,
            updated_at: now,
        }
    }

    fn slots(codes: &[&str]) -> HashSet<String> {
        codes.iter().map(|c| c.to_string()).collect()
    }

    #[test]
    fn test_fulfillment_from_counts() {
        let stats = OrderFulfillment::from_counts(10, 4);
        assert_eq!(stats.pending, 6);
        assert_eq!(stats.fulfilled + stats.pending, stats.total_orders);

        let empty = OrderFulfillment::from_counts(0, 0);
        assert_eq!(empty.pending, 0);
    }

    #[test]
    fn test_occupancy_counts_distinct_positive_quantity() {
        let all = slots(&["1-A-01-01", "1-A-01-02", "1-A-02-01", "1-A-02-02"]);
        let products = vec![
            product("000001", 5, Some("1-A-01-01")),
            product("000002", 3, Some("1-A-01-01")), // 同库位只算一次
            product("000003", 0, Some("1-A-01-02")), // 数量为0不占用
            product("000004", 9, None),             // 未分配库位
            product("000005", 1, Some("")),
        ];

        let stats = compute_slot_occupancy(&all, &products);
        assert_eq!(stats.total_slots, 4);
        assert_eq!(stats.occupied, 1);
        assert_eq!(stats.free, 3);
        assert_eq!(stats.orphaned_references, 0);
        assert_eq!(stats.occupied + stats.free, stats.total_slots);
    }

    #[test]
    fn test_occupancy_orphaned_reference_still_counts() {
        let all = slots(&["1-A-01-01", "1-A-01-02"]);
        let products = vec![
            product("000001", 5, Some("1-A-01-01")),
            product("000002", 5, Some("9-Z-99-99")),
        ];

        let stats = compute_slot_occupancy(&all, &products);
        assert_eq!(stats.occupied, 2);
        assert_eq!(stats.free, 0);
        assert_eq!(stats.orphaned_references, 1);
        assert_eq!(stats.occupied + stats.free, stats.total_slots);
    }

    #[test]
    fn test_occupancy_empty_store() {
        let stats = compute_slot_occupancy(&HashSet::new(), &[]);
        assert_eq!(stats, SlotOccupancy {
            total_slots: 0,
            occupied: 0,
            free: 0,
            orphaned_references: 0,
        });
    }
}
