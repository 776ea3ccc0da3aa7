//! SKU 類型分類

use sku_core::{BufferFlag, ChangeSet, FieldChange, Item, ItemType, SkuType};

use crate::exclusivity::ExclusiveFlags;

/// 業務角色（採購或銷售）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TradeRole {
    Purchase,
    Sell,
}

impl TradeRole {
    /// 從採購/銷售勾選欄位取得角色（採購優先）
    pub fn from_flags(flags: ExclusiveFlags) -> Option<Self> {
        if flags.first {
            Some(TradeRole::Purchase)
        } else if flags.second {
            Some(TradeRole::Sell)
        } else {
            None
        }
    }
}

/// SKU 分類器
pub struct SkuClassifier;

impl SkuClassifier {
    /// 從原始輸入值分類
    ///
    /// 物料類型會去除空白並轉大寫；無法辨識的類型返回 None 而非錯誤。
    pub fn classify(item_type: Option<&str>, buffer_flag: Option<&str>) -> Option<SkuType> {
        let buffer_flag = BufferFlag::parse(buffer_flag);
        let item_type = item_type.and_then(ItemType::parse);

        tracing::debug!(
            "SKU 類型計算: item_type={:?}, buffer_flag={}",
            item_type,
            buffer_flag
        );

        Self::classify_typed(item_type, buffer_flag)
    }

    /// 從已正規化的類型分類
    pub fn classify_typed(item_type: Option<ItemType>, buffer_flag: BufferFlag) -> Option<SkuType> {
        let is_buffer = buffer_flag.is_buffer();
        let sku = match item_type? {
            ItemType::Fg if is_buffer => SkuType::Fgmta,
            ItemType::Fg => SkuType::Fgmto,
            ItemType::Int if is_buffer => SkuType::Sfgmta,
            ItemType::Int => SkuType::Sfgmto,
            ItemType::Raw if is_buffer => SkuType::Pta,
            ItemType::Raw => SkuType::Pto,
        };
        Some(sku)
    }

    /// 重新計算物料的 SKU 類型，值未改變時返回空變更集
    pub fn refresh(item: &Item) -> ChangeSet {
        let sku_type = Self::classify_typed(item.item_type, item.buffer_flag);
        let mut changes = ChangeSet::new();
        if changes.record(item, FieldChange::SkuType(sku_type)) {
            tracing::debug!(
                "物料 {} SKU 類型: {:?} -> {:?}",
                item.item_code,
                item.sku_type,
                sku_type
            );
        }
        changes
    }

    /// 依業務角色與緩衝策略允許的 SKU 類型
    pub fn allowed_sku_types(role: Option<TradeRole>, buffered: bool) -> &'static [SkuType] {
        match (role, buffered) {
            (Some(TradeRole::Purchase), true) => &[SkuType::Pta],
            (Some(TradeRole::Purchase), false) => &[SkuType::Pto],
            (Some(TradeRole::Sell), true) => &[SkuType::Fgmta, SkuType::Sfgmta],
            (Some(TradeRole::Sell), false) => &[SkuType::Fgmto, SkuType::Sfgmto],
            (None, _) => &[],
        }
    }
}
