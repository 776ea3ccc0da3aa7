//! 緩衝區間門檻計算
//!
//! 安全庫存（綠區頂端）依固定比例切分為紅區與黃區：
//! - 紅區頂端 = ceil(安全庫存 / 3)
//! - 黃區頂端 = ceil(安全庫存 × 2 / 3)

use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sku_core::{BufferFlag, ChangeSet, FieldChange, Item, Result, SkuError};

/// 緩衝區間門檻
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BufferThresholds {
    pub top_of_red: u64,
    pub top_of_yellow: u64,
}

/// 門檻計算器
pub struct ThresholdCalculator;

impl ThresholdCalculator {
    /// 計算門檻
    ///
    /// Non-Buffer 物料一律返回 None；Buffer 物料的安全庫存缺少或不大於 0 時返回驗證錯誤。
    pub fn compute(
        safety_stock: Option<Decimal>,
        buffer_flag: BufferFlag,
    ) -> Result<Option<BufferThresholds>> {
        if !buffer_flag.is_buffer() {
            return Ok(None);
        }

        let safety_stock = match safety_stock {
            Some(qty) if qty > Decimal::ZERO => qty,
            _ => return Err(SkuError::safety_stock()),
        };

        let three = Decimal::from(3);
        let top_of_red = Self::ceil_level(safety_stock / three)?;
        let double = safety_stock
            .checked_mul(Decimal::TWO)
            .ok_or_else(Self::out_of_range)?;
        let top_of_yellow = Self::ceil_level(double / three)?;

        Ok(Some(BufferThresholds {
            top_of_red,
            top_of_yellow,
        }))
    }

    /// 依物料目前的安全庫存與緩衝標記重新計算門檻欄位
    pub fn recalculate(item: &Item) -> Result<ChangeSet> {
        let thresholds = Self::compute(item.safety_stock, item.buffer_flag)?;

        let mut changes = ChangeSet::new();
        changes.record(item, FieldChange::TopOfRed(thresholds.map(|t| t.top_of_red)));
        changes.record(
            item,
            FieldChange::TopOfYellow(thresholds.map(|t| t.top_of_yellow)),
        );
        Ok(changes)
    }

    /// 清除安全庫存與兩個門檻
    pub fn clear_buffer_fields(item: &Item) -> ChangeSet {
        let mut changes = ChangeSet::new();
        changes.record(item, FieldChange::SafetyStock(None));
        changes.record(item, FieldChange::TopOfRed(None));
        changes.record(item, FieldChange::TopOfYellow(None));
        changes
    }

    /// 緩衝標記變更後（`item` 已帶新標記）的欄位處理
    ///
    /// - 切換為 Non-Buffer：清除安全庫存與門檻
    /// - 切換為 Buffer 且安全庫存不大於 0：清除，強制重新輸入
    /// - 切換為 Buffer 且安全庫存有效：重新計算門檻
    /// - 切換為 Buffer 但尚未輸入安全庫存：清除門檻，提交時再驗證
    ///
    /// 安全庫存超出門檻可表示的範圍時返回驗證錯誤，由呼叫端清除欄位並提示。
    pub fn on_buffer_flag_change(item: &Item) -> Result<ChangeSet> {
        if !item.is_buffer() {
            return Ok(Self::clear_buffer_fields(item));
        }

        match item.safety_stock {
            Some(qty) if qty <= Decimal::ZERO => Ok(Self::clear_buffer_fields(item)),
            Some(_) => Self::recalculate(item),
            None => {
                let mut changes = ChangeSet::new();
                changes.record(item, FieldChange::TopOfRed(None));
                changes.record(item, FieldChange::TopOfYellow(None));
                Ok(changes)
            }
        }
    }

    fn ceil_level(value: Decimal) -> Result<u64> {
        value
            .ceil()
            .to_u64()
            .ok_or_else(Self::out_of_range)
    }

    fn out_of_range() -> SkuError {
        SkuError::Validation("Safety Stock is out of range".to_string())
    }
}
