//! 物料表單事件示例

use rust_decimal::Decimal;
use sku_engine::{BufferFlag, Item, ItemEvent, ItemForm, ItemType, RulesConfig};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 物料表單示例 ===\n");

    let form = ItemForm::new(RulesConfig::default());

    let mut item = Item::new("NEW-ITEM")
        .with_item_type(ItemType::Int)
        .with_naming(Some("Bright Rounds"), "32", "Round", "EN8D");

    for event in [ItemEvent::Refresh, ItemEvent::NamingChanged] {
        let update = form.handle(&item, event);
        update.apply(&mut item);
    }
    println!("物料代碼: {}", item.item_code);
    println!("SKU 類型: {:?}", item.sku_type);

    item.buffer_flag = BufferFlag::Buffer;
    item.safety_stock = Some(Decimal::from(45));
    for event in [ItemEvent::BufferFlagChanged, ItemEvent::SafetyStockChanged] {
        let update = form.handle(&item, event);
        if let Some(err) = &update.rejection {
            println!("驗證失敗: {err}");
        }
        update.apply(&mut item);
    }
    println!(
        "緩衝區間: 紅區頂端 {:?}, 黃區頂端 {:?}",
        item.top_of_red, item.top_of_yellow
    );

    item.min_order_qty = Decimal::from(10);
    let update = form.handle(&item, ItemEvent::MinOrderQtyChanged);
    update.apply(&mut item);
    println!(
        "最小訂購量 {}, 批量 {} (唯讀欄位: {:?})",
        item.min_order_qty,
        item.batch_size,
        update.access.read_only_fields().collect::<Vec<_>>()
    );

    form.validate(&item)?;
    println!("\n驗證通過");

    Ok(())
}
