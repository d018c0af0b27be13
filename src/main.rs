// ==========================================
// Maur WMS - 命令行入口
// ==========================================
// 打开数据库并输出仪表盘汇总
// 用法: maur-wms [db_path]
// ==========================================

use anyhow::{anyhow, Result};

use maur_wms::api::{DashboardSummary, PieChart};
use maur_wms::app::{get_default_db_path, AppState};

fn print_chart(chart: &PieChart) {
    println!("{}", chart.title);
    for slice in &chart.slices {
        println!("  {:<12} {:>6}  {:>3}%", slice.label, slice.value, slice.percent);
    }
}

fn print_summary(summary: &DashboardSummary) {
    println!("Produtos: {}", summary.total_products);
    println!(
        "Pedidos: {}  |  Posições: {}",
        summary.fulfillment.total_orders, summary.occupancy.total_slots
    );
    println!();
    print_chart(&summary.orders_chart);
    println!();
    print_chart(&summary.slots_chart);

    if summary.occupancy.orphaned_references > 0 {
        println!();
        println!(
            "! {} referência(s) a posições não cadastradas",
            summary.occupancy.orphaned_references
        );
    }
}

fn main() -> Result<()> {
    maur_wms::logging::init();

    tracing::info!("{} v{}", maur_wms::APP_NAME, maur_wms::VERSION);

    let db_path = std::env::args().nth(1).unwrap_or_else(get_default_db_path);
    tracing::info!("使用数据库: {}", db_path);

    let state = AppState::new(db_path).map_err(|e| anyhow!(e))?;
    let summary = state.dashboard_api.get_summary()?;

    print_summary(&summary);
    Ok(())
}
