//! 緩衝狀態與補貨建議示例

use chrono::NaiveDate;
use rust_decimal::Decimal;
use sku_engine::{
    order_status, BufferFlag, Item, ItemType, OnHandStatus, ReplenishmentCalculator,
    ReplenishmentInput, SkuClassifier, ZoneCounts,
};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 緩衝狀態示例 ===\n");

    let mut item = Item::new("RM-BILLET")
        .with_item_type(ItemType::Raw)
        .with_buffer_flag(BufferFlag::Buffer)
        .with_safety_stock(Decimal::from(120))
        .with_min_order_qty(Decimal::from(80));
    item.sku_type = SkuClassifier::classify_typed(item.item_type, item.buffer_flag);

    let on_hand = Decimal::from(35);
    let qualified_demand = Decimal::from(15);
    match OnHandStatus::for_item(&item, on_hand, qualified_demand) {
        Some(status) => println!("{} 庫存狀態: {} ({})", item.item_code, status, status.zone),
        None => println!("{} 無法計算庫存狀態", item.item_code),
    }

    let input = ReplenishmentInput::new(on_hand)
        .with_top_of_green(Decimal::from(120))
        .with_qualified_demand(qualified_demand)
        .with_open_po(Decimal::from(40));
    println!(
        "建議訂購量: {}",
        ReplenishmentCalculator::for_item(&item, &input)?
    );

    println!("\n銷售訂單狀態分佈:");
    let today = NaiveDate::from_ymd_opt(2025, 6, 15).ok_or_else(|| anyhow::anyhow!("日期無效"))?;
    let orders = [
        ("2025-06-01", "2025-06-30"),
        ("2025-06-10", "2025-06-16"),
        ("2025-05-20", "2025-06-10"),
        ("2025-06-14", "2025-07-20"),
    ];

    let mut counts = ZoneCounts::new();
    for (placed, due) in orders {
        let placed = NaiveDate::parse_from_str(placed, "%Y-%m-%d")?;
        let due = NaiveDate::parse_from_str(due, "%Y-%m-%d")?;
        let zone = order_status(Some(placed), Some(due), today);
        println!("  {placed} -> {due}: {zone}");
        counts.add(Some(zone));
    }
    for share in counts.shares() {
        println!("  {}: {} 筆 ({}%)", share.zone, share.count, share.percentage);
    }

    Ok(())
}
