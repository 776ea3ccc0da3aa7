//! 多階 BOM 解耦提前期示例

use sku_engine::{BomGraph, BufferFlag, DecoupledLeadTimeCalculator, LeadTimeRecord};

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt::init();

    println!("=== 解耦提前期示例 ===\n");

    // 成品 -> 半成品/棒材，棒材 -> 鋼坯（緩衝）
    let graph = BomGraph::new()
        .with_item(LeadTimeRecord::new("FG-SHAFT", 2, BufferFlag::NonBuffer))
        .with_item(LeadTimeRecord::new("SFG-TURNED", 4, BufferFlag::NonBuffer))
        .with_item(LeadTimeRecord::new("BAR-40", 6, BufferFlag::NonBuffer))
        .with_item(LeadTimeRecord::new("BILLET", 20, BufferFlag::Buffer))
        .with_item(LeadTimeRecord::new("WIRE", 3, BufferFlag::NonBuffer))
        .with_bom("FG-SHAFT", ["SFG-TURNED", "BAR-40"])
        .with_bom("SFG-TURNED", ["WIRE"])
        .with_bom("BAR-40", ["BILLET", "WIRE"]);

    let calculator = DecoupledLeadTimeCalculator::new(&graph);
    let result = calculator.calculate("FG-SHAFT")?;

    println!("{}: {} 天\n", result.item_code, result.decoupled_lead_time);
    println!("計算過程:");
    for step in &result.trace {
        println!(
            "{}{} 自身 {} 天, 本層最大 {:?}, 關鍵子件 {:?}, 合計 {} 天",
            "  ".repeat(step.level),
            step.item_code,
            step.own_lead_time,
            step.max_lead_time_at_level,
            step.items_with_max,
            step.total
        );
    }

    println!("\n批次計算:");
    let codes = ["FG-SHAFT", "SFG-TURNED", "BAR-40", "BILLET"];
    for (code, result) in codes.iter().zip(calculator.calculate_many(&codes)) {
        match result {
            Ok(result) => println!("  {code}: {} 天", result.decoupled_lead_time),
            Err(err) => println!("  {code}: {err}"),
        }
    }

    Ok(())
}
