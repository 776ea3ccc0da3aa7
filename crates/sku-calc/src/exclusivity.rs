//! 欄位互斥規則
//!
//! 兩個數量欄位最多只能有一個大於 0（例如最小訂購量與批量），
//! 兩個勾選欄位最多只能有一個為真（例如採購與銷售）。

use rust_decimal::Decimal;
use sku_core::{ChangeSet, FieldAccess, FieldChange, Item, ItemField, Result, SkuError};

/// 欄位對中的一側
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PairSide {
    First,
    Second,
}

impl PairSide {
    pub fn other(self) -> Self {
        match self {
            PairSide::First => PairSide::Second,
            PairSide::Second => PairSide::First,
        }
    }
}

/// 互斥解析結果
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PairResolution {
    pub first: Decimal,
    pub second: Decimal,
    pub first_read_only: bool,
    pub second_read_only: bool,
}

/// 互斥的數量欄位對
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct QuantityPair {
    pub first: Decimal,
    pub second: Decimal,
}

impl QuantityPair {
    pub fn new(first: Decimal, second: Decimal) -> Self {
        Self { first, second }
    }

    /// 物料的最小訂購量（first）與批量（second）
    pub fn from_item(item: &Item) -> Self {
        Self::new(item.min_order_qty, item.batch_size)
    }

    fn value(&self, side: PairSide) -> Decimal {
        match side {
            PairSide::First => self.first,
            PairSide::Second => self.second,
        }
    }

    /// 決定哪一側保持有效
    ///
    /// 剛變更且大於 0 的一側優先；沒有指定變更側時（例如表單載入）以 first 優先。
    fn active_side(&self, changed: Option<PairSide>) -> Option<PairSide> {
        if let Some(side) = changed {
            if self.value(side) > Decimal::ZERO {
                return Some(side);
            }
        }
        if self.first > Decimal::ZERO {
            Some(PairSide::First)
        } else if self.second > Decimal::ZERO {
            Some(PairSide::Second)
        } else {
            None
        }
    }

    /// 解析互斥狀態：有效側保持可編輯，另一側歸零並鎖定
    pub fn resolve(&self, changed: Option<PairSide>) -> PairResolution {
        match self.active_side(changed) {
            Some(PairSide::First) => PairResolution {
                first: self.first,
                second: Decimal::ZERO,
                first_read_only: false,
                second_read_only: true,
            },
            Some(PairSide::Second) => PairResolution {
                first: Decimal::ZERO,
                second: self.second,
                first_read_only: true,
                second_read_only: false,
            },
            None => PairResolution {
                first: self.first,
                second: self.second,
                first_read_only: false,
                second_read_only: false,
            },
        }
    }

    /// 提交前驗證：兩側不可同時大於 0
    pub fn validate(&self, first_label: &str, second_label: &str) -> Result<()> {
        if self.first > Decimal::ZERO && self.second > Decimal::ZERO {
            return Err(SkuError::Validation(format!(
                "{first_label} and {second_label} cannot both have values greater than 0. \
                 Please set one field to 0 before setting the other."
            )));
        }
        Ok(())
    }

    /// 最小訂購量與批量的互斥處理
    pub fn resolve_item(item: &Item, changed: Option<PairSide>) -> (ChangeSet, FieldAccess) {
        let resolution = Self::from_item(item).resolve(changed);

        let mut changes = ChangeSet::new();
        changes.record(item, FieldChange::MinOrderQty(resolution.first));
        changes.record(item, FieldChange::BatchSize(resolution.second));

        let mut access = FieldAccess::new();
        if resolution.first_read_only {
            access.mark_read_only(ItemField::MinOrderQty);
        }
        if resolution.second_read_only {
            access.mark_read_only(ItemField::BatchSize);
        }

        if !changes.is_empty() {
            tracing::debug!(
                "物料 {} 最小訂購量/批量互斥: {} / {}",
                item.item_code,
                resolution.first,
                resolution.second
            );
        }

        (changes, access)
    }

    /// 物料提交前的互斥驗證
    pub fn validate_item(item: &Item) -> Result<()> {
        Self::from_item(item).validate("Min Order Qty", "Batch Size")
    }
}

/// 互斥的勾選欄位對（無唯讀鎖定，只是即時切換）
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ExclusiveFlags {
    pub first: bool,
    pub second: bool,
}

impl ExclusiveFlags {
    pub fn new(first: bool, second: bool) -> Self {
        Self { first, second }
    }

    /// 設定一側；設為真時另一側強制為假
    pub fn set(self, side: PairSide, value: bool) -> Self {
        let mut next = self;
        match side {
            PairSide::First => next.first = value,
            PairSide::Second => next.second = value,
        }
        if value {
            match side.other() {
                PairSide::First => next.first = false,
                PairSide::Second => next.second = false,
            }
        }
        next
    }
}
