// ==========================================
// Maur WMS - 演示数据库初始化
// ==========================================
// 备份并重置数据库,写入演示库位/商品/订单
// 用法: seed_demo_db [db_path] [product_count]
// ==========================================

use std::fs;
use std::path::Path;

use anyhow::{anyhow, Context, Result};
use chrono::Local;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use maur_wms::app::{get_default_db_path, AppState};

const DEFAULT_PRODUCT_COUNT: usize = 40;
const ACTOR: &str = "seed";

const PRODUCT_NAMES: &[&str] = &[
    "Parafuso Sextavado",
    "Porca M8",
    "Arruela Lisa",
    "Rebite Pop",
    "Bucha Nylon",
    "Prego 17x27",
    "Abraçadeira",
    "Dobradiça",
];

fn backup_and_reset_db(db_path: &str) -> Result<()> {
    let path = Path::new(db_path);
    if !path.exists() {
        return Ok(());
    }

    let ts = Local::now().format("%Y%m%d_%H%M%S").to_string();
    let backup_path = format!("{}.bak.{}", db_path, ts);
    fs::copy(path, &backup_path).with_context(|| format!("备份失败: {}", backup_path))?;
    fs::remove_file(path)?;

    eprintln!("Backed up {} -> {}", db_path, backup_path);
    Ok(())
}

fn main() -> Result<()> {
    maur_wms::logging::init();

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    let product_count = std::env::args()
        .nth(2)
        .and_then(|s| s.parse::<usize>().ok())
        .unwrap_or(DEFAULT_PRODUCT_COUNT);

    backup_and_reset_db(&db_path)?;
    let state = AppState::new(db_path.clone()).map_err(|e| anyhow!(e))?;

    // 库位: 两个仓库
    let batch1 = state.slot_api.create_slot_batch("1", "A", "D", "5", "4", ACTOR)?;
    let batch2 = state.slot_api.create_slot_batch("2", "A", "B", "3", "3", ACTOR)?;
    let slots = state.slot_api.list_slots()?;

    // 固定种子,保证演示数据可复现
    let mut rng = StdRng::seed_from_u64(2612);

    for i in 0..product_count {
        let name = format!("{} #{}", PRODUCT_NAMES[i % PRODUCT_NAMES.len()], i + 1);
        let quantity = if rng.gen_bool(0.2) { 0 } else { rng.gen_range(1..=500) };
        let slot = if rng.gen_bool(0.1) {
            String::new()
        } else {
            slots[rng.gen_range(0..slots.len())].code.clone()
        };
        state
            .product_api
            .register_product(&name, &quantity.to_string(), &slot, ACTOR)?;
    }

    for _ in 0..30 {
        let order = state.order_api.create_order(ACTOR)?;
        let status = match rng.gen_range(0..10) {
            0..=5 => "SHIPPED",
            6..=7 => "PICKING",
            _ => continue,
        };
        state.order_api.update_status(&order.order_no, status, ACTOR)?;
    }

    let summary = state.dashboard_api.get_summary()?;
    println!("Seeded {}", db_path);
    println!(
        "  slots:    {} (+{} / +{})",
        summary.occupancy.total_slots, batch1.created, batch2.created
    );
    println!("  products: {}", summary.total_products);
    println!(
        "  orders:   {} ({} shipped)",
        summary.fulfillment.total_orders, summary.fulfillment.fulfilled
    );
    Ok(())
}
