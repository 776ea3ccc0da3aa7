//! 欄位變更集與唯讀狀態
//!
//! 規則計算不直接修改物料，而是返回變更集，由呼叫端決定如何套用以及是否標記為已修改。

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;

use crate::{Item, SkuType};

/// 物料欄位
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum ItemField {
    ItemCode,
    ItemName,
    SkuType,
    SafetyStock,
    TopOfRed,
    TopOfYellow,
    MinOrderQty,
    BatchSize,
    DecoupledLeadTime,
}

/// 單一欄位的新值
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum FieldChange {
    ItemCode(String),
    ItemName(String),
    SkuType(Option<SkuType>),
    SafetyStock(Option<Decimal>),
    TopOfRed(Option<u64>),
    TopOfYellow(Option<u64>),
    MinOrderQty(Decimal),
    BatchSize(Decimal),
    DecoupledLeadTime(Option<u32>),
}

impl FieldChange {
    /// 變更的欄位
    pub fn field(&self) -> ItemField {
        match self {
            FieldChange::ItemCode(_) => ItemField::ItemCode,
            FieldChange::ItemName(_) => ItemField::ItemName,
            FieldChange::SkuType(_) => ItemField::SkuType,
            FieldChange::SafetyStock(_) => ItemField::SafetyStock,
            FieldChange::TopOfRed(_) => ItemField::TopOfRed,
            FieldChange::TopOfYellow(_) => ItemField::TopOfYellow,
            FieldChange::MinOrderQty(_) => ItemField::MinOrderQty,
            FieldChange::BatchSize(_) => ItemField::BatchSize,
            FieldChange::DecoupledLeadTime(_) => ItemField::DecoupledLeadTime,
        }
    }

    /// 新值與物料目前的值相同
    pub fn is_noop(&self, item: &Item) -> bool {
        match self {
            FieldChange::ItemCode(v) => item.item_code == *v,
            FieldChange::ItemName(v) => item.item_name == *v,
            FieldChange::SkuType(v) => item.sku_type == *v,
            FieldChange::SafetyStock(v) => item.safety_stock == *v,
            FieldChange::TopOfRed(v) => item.top_of_red == *v,
            FieldChange::TopOfYellow(v) => item.top_of_yellow == *v,
            FieldChange::MinOrderQty(v) => item.min_order_qty == *v,
            FieldChange::BatchSize(v) => item.batch_size == *v,
            FieldChange::DecoupledLeadTime(v) => item.decoupled_lead_time == *v,
        }
    }

    /// 套用到物料
    pub fn apply(&self, item: &mut Item) {
        match self {
            FieldChange::ItemCode(v) => item.item_code = v.clone(),
            FieldChange::ItemName(v) => item.item_name = v.clone(),
            FieldChange::SkuType(v) => item.sku_type = *v,
            FieldChange::SafetyStock(v) => item.safety_stock = *v,
            FieldChange::TopOfRed(v) => item.top_of_red = *v,
            FieldChange::TopOfYellow(v) => item.top_of_yellow = *v,
            FieldChange::MinOrderQty(v) => item.min_order_qty = *v,
            FieldChange::BatchSize(v) => item.batch_size = *v,
            FieldChange::DecoupledLeadTime(v) => item.decoupled_lead_time = *v,
        }
    }
}

/// 變更集（每個欄位最多一筆，後寫入者覆蓋）
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ChangeSet {
    changes: Vec<FieldChange>,
}

impl ChangeSet {
    /// 創建空的變更集
    pub fn new() -> Self {
        Self::default()
    }

    /// 寫入變更（無條件）
    pub fn set(&mut self, change: FieldChange) {
        let field = change.field();
        match self.changes.iter_mut().find(|c| c.field() == field) {
            Some(existing) => *existing = change,
            None => self.changes.push(change),
        }
    }

    /// 僅在新值與物料目前值不同時寫入，返回是否寫入
    ///
    /// 值相同時也會移除先前記錄的同欄位變更。
    pub fn record(&mut self, item: &Item, change: FieldChange) -> bool {
        if change.is_noop(item) {
            let field = change.field();
            self.changes.retain(|c| c.field() != field);
            false
        } else {
            self.set(change);
            true
        }
    }

    /// 合併另一個變更集（另一方優先）
    pub fn merge(&mut self, other: ChangeSet) {
        for change in other.changes {
            self.set(change);
        }
    }

    /// 查詢欄位的變更
    pub fn get(&self, field: ItemField) -> Option<&FieldChange> {
        self.changes.iter().find(|c| c.field() == field)
    }

    /// 檢查欄位是否已變更（髒）
    pub fn is_dirty(&self, field: ItemField) -> bool {
        self.get(field).is_some()
    }

    /// 所有已變更欄位
    pub fn dirty_fields(&self) -> Vec<ItemField> {
        self.changes.iter().map(FieldChange::field).collect()
    }

    pub fn iter(&self) -> impl Iterator<Item = &FieldChange> {
        self.changes.iter()
    }

    pub fn len(&self) -> usize {
        self.changes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.changes.is_empty()
    }

    /// 套用全部變更到物料
    pub fn apply(&self, item: &mut Item) {
        for change in &self.changes {
            change.apply(item);
        }
    }
}

/// 欄位唯讀狀態
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct FieldAccess {
    read_only: BTreeSet<ItemField>,
}

impl FieldAccess {
    pub fn new() -> Self {
        Self::default()
    }

    /// 標記欄位為唯讀
    pub fn mark_read_only(&mut self, field: ItemField) {
        self.read_only.insert(field);
    }

    /// 標記欄位為可編輯
    pub fn mark_editable(&mut self, field: ItemField) {
        self.read_only.remove(&field);
    }

    pub fn is_read_only(&self, field: ItemField) -> bool {
        self.read_only.contains(&field)
    }

    pub fn is_editable(&self, field: ItemField) -> bool {
        !self.is_read_only(field)
    }

    pub fn read_only_fields(&self) -> impl Iterator<Item = ItemField> + '_ {
        self.read_only.iter().copied()
    }

    /// 合併另一份狀態中出現的唯讀欄位
    pub fn merge(&mut self, other: FieldAccess) {
        self.read_only.extend(other.read_only);
    }
}
