//! BOM 快照模型
//!
//! 只讀的物料提前期與預設 BOM（子件與用量），供解耦提前期與父件需求展開使用。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

use crate::{BufferFlag, Item};

/// 物料提前期記錄
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LeadTimeRecord {
    /// 物料代碼
    pub item_code: String,

    /// 自身提前期（天）
    pub lead_time_days: u32,

    /// 緩衝標記
    pub buffer_flag: BufferFlag,
}

impl LeadTimeRecord {
    /// 創建新的提前期記錄
    pub fn new(item_code: impl Into<String>, lead_time_days: u32, buffer_flag: BufferFlag) -> Self {
        Self {
            item_code: item_code.into(),
            lead_time_days,
            buffer_flag,
        }
    }

    pub fn is_buffer(&self) -> bool {
        self.buffer_flag.is_buffer()
    }
}

impl From<&Item> for LeadTimeRecord {
    fn from(item: &Item) -> Self {
        Self::new(item.item_code.clone(), item.lead_time_days, item.buffer_flag)
    }
}

/// BOM 行
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BomLine {
    /// 子件代碼
    pub item_code: String,

    /// 用量（對應 BOM 產出數量）
    pub qty: Decimal,
}

impl BomLine {
    pub fn new(item_code: impl Into<String>, qty: Decimal) -> Self {
        Self {
            item_code: item_code.into(),
            qty,
        }
    }
}

/// 預設 BOM
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bom {
    /// 產出數量
    pub quantity: Decimal,

    /// BOM 行（依行順序）
    pub lines: Vec<BomLine>,
}

impl Bom {
    pub fn new(quantity: Decimal, lines: Vec<BomLine>) -> Self {
        Self { quantity, lines }
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// 每單位父件的子件用量；產出數量不大於 0 時視為 1
    pub fn qty_per_unit(&self, line: &BomLine) -> Option<Decimal> {
        if self.quantity > Decimal::ZERO {
            line.qty.checked_div(self.quantity)
        } else {
            Some(line.qty)
        }
    }
}

/// BOM 圖（以物料代碼為鍵）
///
/// 子件依 BOM 行順序保存；同一子件可被多個父件引用，因此可能出現循環。
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct BomGraph {
    items: HashMap<String, LeadTimeRecord>,
    boms: HashMap<String, Bom>,
}

impl BomGraph {
    /// 創建空的 BOM 圖
    pub fn new() -> Self {
        Self::default()
    }

    /// 添加（或覆蓋）物料記錄
    pub fn add_item(&mut self, record: LeadTimeRecord) {
        self.items.insert(record.item_code.clone(), record);
    }

    /// 建構器模式：添加物料記錄
    pub fn with_item(mut self, record: LeadTimeRecord) -> Self {
        self.add_item(record);
        self
    }

    /// 設置父件的預設 BOM（子件依行順序，用量皆為 1）
    pub fn set_bom<I, S>(&mut self, parent: impl Into<String>, children: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let lines = children
            .into_iter()
            .map(|code| BomLine::new(code, Decimal::ONE))
            .collect();
        self.boms.insert(parent.into(), Bom::new(Decimal::ONE, lines));
    }

    /// 建構器模式：設置父件的預設 BOM
    pub fn with_bom<I, S>(mut self, parent: impl Into<String>, children: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.set_bom(parent, children);
        self
    }

    /// 設置父件的預設 BOM（產出數量與各行用量）
    pub fn set_bom_lines<I, S>(&mut self, parent: impl Into<String>, quantity: Decimal, lines: I)
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        let lines = lines
            .into_iter()
            .map(|(code, qty)| BomLine::new(code, qty))
            .collect();
        self.boms.insert(parent.into(), Bom::new(quantity, lines));
    }

    /// 建構器模式：設置含用量的預設 BOM
    pub fn with_bom_lines<I, S>(
        mut self,
        parent: impl Into<String>,
        quantity: Decimal,
        lines: I,
    ) -> Self
    where
        I: IntoIterator<Item = (S, Decimal)>,
        S: Into<String>,
    {
        self.set_bom_lines(parent, quantity, lines);
        self
    }

    /// 查詢物料記錄
    pub fn item(&self, item_code: &str) -> Option<&LeadTimeRecord> {
        self.items.get(item_code)
    }

    /// 查詢父件的預設 BOM；沒有 BOM 時返回 None
    pub fn bom(&self, item_code: &str) -> Option<&Bom> {
        self.boms.get(item_code)
    }

    /// 是否有非空的 BOM
    pub fn has_bom(&self, item_code: &str) -> bool {
        self.bom(item_code).is_some_and(|bom| !bom.is_empty())
    }

    pub fn item_count(&self) -> usize {
        self.items.len()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_graph_lookup() {
        let graph = BomGraph::new()
            .with_item(LeadTimeRecord::new("BAR-40", 2, BufferFlag::NonBuffer))
            .with_item(LeadTimeRecord::new("BILLET", 5, BufferFlag::Buffer))
            .with_bom("BAR-40", ["BILLET"])
            .with_bom("EMPTY", Vec::<String>::new());

        assert_eq!(graph.item_count(), 2);
        assert_eq!(graph.item("BAR-40").map(|r| r.lead_time_days), Some(2));
        assert!(graph.item("BILLET").is_some_and(LeadTimeRecord::is_buffer));
        assert!(graph.has_bom("BAR-40"));
        assert!(!graph.has_bom("BILLET"));
        assert!(!graph.has_bom("EMPTY"));
        assert_eq!(
            graph.bom("BAR-40").map(|bom| bom.lines.clone()),
            Some(vec![BomLine::new("BILLET", Decimal::ONE)])
        );
    }

    #[test]
    fn test_qty_per_unit() {
        let graph = BomGraph::new().with_bom_lines(
            "SHAFT",
            Decimal::from(4),
            [("BAR-40", Decimal::from(10)), ("WIRE", Decimal::ONE)],
        );
        let bom = graph.bom("SHAFT").unwrap();
        assert_eq!(bom.qty_per_unit(&bom.lines[0]), Some(Decimal::new(25, 1)));
        assert_eq!(bom.qty_per_unit(&bom.lines[1]), Some(Decimal::new(25, 2)));

        // 產出數量為 0 時視為 1
        let bom = Bom::new(Decimal::ZERO, vec![BomLine::new("X", Decimal::from(3))]);
        assert_eq!(bom.qty_per_unit(&bom.lines[0]), Some(Decimal::from(3)));
    }

    #[test]
    fn test_record_from_item() {
        let item = Item::new("ROUND-20")
            .with_lead_time_days(3)
            .with_buffer_flag(BufferFlag::Buffer);
        let record = LeadTimeRecord::from(&item);
        assert_eq!(record, LeadTimeRecord::new("ROUND-20", 3, BufferFlag::Buffer));
    }
}
