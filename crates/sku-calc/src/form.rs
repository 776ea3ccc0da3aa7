//! 物料表單事件處理
//!
//! 每個欄位事件返回一份 [`ItemUpdate`]，由宿主框架的轉接層決定如何套用、
//! 是否標記表單為已修改。物料本身不在此被修改。

use sku_core::{
    BomGraph, ChangeSet, FieldAccess, FieldChange, Item, LeadTimeRecord, Result, RulesConfig,
    SkuError,
};

use crate::exclusivity::{PairSide, QuantityPair};
use crate::lead_time::DecoupledLeadTimeCalculator;
use crate::naming;
use crate::sku::SkuClassifier;
use crate::thresholds::ThresholdCalculator;
use crate::Diagnostic;

/// 表單欄位事件（事件發生時 `Item` 已帶有新值）
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ItemEvent {
    /// 表單載入
    Refresh,
    ItemTypeChanged,
    BufferFlagChanged,
    SafetyStockChanged,
    MinOrderQtyChanged,
    BatchSizeChanged,
    /// 類別、尺寸、形狀或鋼種變更
    NamingChanged,
}

/// 事件處理結果
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub changes: ChangeSet,
    pub access: FieldAccess,
    pub diagnostics: Vec<Diagnostic>,
    /// 需要立即提示使用者的驗證錯誤
    pub rejection: Option<SkuError>,
}

impl ItemUpdate {
    pub fn new() -> Self {
        Self::default()
    }

    fn from_changes(changes: ChangeSet) -> Self {
        Self {
            changes,
            ..Default::default()
        }
    }

    pub fn is_rejected(&self) -> bool {
        self.rejection.is_some()
    }

    /// 合併另一份結果（另一方的變更優先）
    pub fn merge(&mut self, other: ItemUpdate) {
        self.changes.merge(other.changes);
        self.access.merge(other.access);
        self.diagnostics.extend(other.diagnostics);
        if self.rejection.is_none() {
            self.rejection = other.rejection;
        }
    }

    /// 套用變更到物料
    pub fn apply(&self, item: &mut Item) {
        self.changes.apply(item);
    }
}

/// 物料表單規則
#[derive(Debug, Clone, Default)]
pub struct ItemForm {
    config: RulesConfig,
}

impl ItemForm {
    pub fn new(config: RulesConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &RulesConfig {
        &self.config
    }

    /// 處理欄位事件
    pub fn handle(&self, item: &Item, event: ItemEvent) -> ItemUpdate {
        tracing::debug!("物料 {} 表單事件: {:?}", item.item_code, event);

        match event {
            ItemEvent::Refresh => {
                let mut update = ItemUpdate::from_changes(SkuClassifier::refresh(item));
                update.merge(Self::exclusivity(item, None));
                update
            }
            ItemEvent::ItemTypeChanged => ItemUpdate::from_changes(SkuClassifier::refresh(item)),
            ItemEvent::BufferFlagChanged => {
                let mut update = match ThresholdCalculator::on_buffer_flag_change(item) {
                    Ok(changes) => ItemUpdate::from_changes(changes),
                    Err(err) => Self::reject_safety_stock(item, err),
                };
                update.changes.merge(SkuClassifier::refresh(item));
                update
            }
            ItemEvent::SafetyStockChanged => match ThresholdCalculator::recalculate(item) {
                Ok(changes) => ItemUpdate::from_changes(changes),
                Err(err) => Self::reject_safety_stock(item, err),
            },
            ItemEvent::MinOrderQtyChanged => Self::exclusivity(item, Some(PairSide::First)),
            ItemEvent::BatchSizeChanged => Self::exclusivity(item, Some(PairSide::Second)),
            ItemEvent::NamingChanged => {
                ItemUpdate::from_changes(naming::refresh_item_code(item, &self.config))
            }
        }
    }

    /// 安全庫存無效：清除三個欄位並帶回錯誤
    fn reject_safety_stock(item: &Item, err: SkuError) -> ItemUpdate {
        tracing::debug!("物料 {} 安全庫存無效: {}", item.item_code, err);
        let mut update = ItemUpdate::from_changes(ThresholdCalculator::clear_buffer_fields(item));
        update.rejection = Some(err);
        update
    }

    fn exclusivity(item: &Item, changed: Option<PairSide>) -> ItemUpdate {
        let (changes, access) = QuantityPair::resolve_item(item, changed);
        ItemUpdate {
            changes,
            access,
            ..Default::default()
        }
    }

    /// 提交前驗證
    pub fn validate(&self, item: &Item) -> Result<()> {
        ThresholdCalculator::compute(item.safety_stock, item.buffer_flag)?;
        QuantityPair::validate_item(item)
    }

    /// 重新計算解耦提前期
    ///
    /// 尚未儲存的物料（沒有 BOM 快照）直接採用自身提前期。快照中的記錄與表單不一致時，
    /// 以表單目前的提前期與緩衝標記為準。
    pub fn refresh_decoupled_lead_time(
        &self,
        item: &Item,
        graph: Option<&BomGraph>,
    ) -> Result<ItemUpdate> {
        let Some(graph) = graph else {
            let mut changes = ChangeSet::new();
            if item.lead_time_days > 0 {
                changes.record(item, FieldChange::DecoupledLeadTime(Some(item.lead_time_days)));
            }
            return Ok(ItemUpdate::from_changes(changes));
        };

        let record = LeadTimeRecord::from(item);
        let overlay;
        let graph = if graph.item(&item.item_code) == Some(&record) {
            graph
        } else {
            overlay = graph.clone().with_item(record);
            &overlay
        };

        let result = DecoupledLeadTimeCalculator::with_config(graph, &self.config)
            .calculate(&item.item_code)?;

        let mut changes = ChangeSet::new();
        changes.record(
            item,
            FieldChange::DecoupledLeadTime(Some(result.decoupled_lead_time)),
        );

        Ok(ItemUpdate {
            changes,
            diagnostics: result.diagnostics,
            ..Default::default()
        })
    }

    /// 儲存後檢查：需要 BOM 的群組尚未建立 BOM 時返回提示
    pub fn bom_reminder(&self, item: &Item, graph: &BomGraph) -> Option<Diagnostic> {
        if naming::requires_bom(item, &self.config) && !graph.has_bom(&item.item_code) {
            Some(Diagnostic::info(
                item.item_code.clone(),
                "Please create a BOM for this item.".to_string(),
            ))
        } else {
            None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use sku_core::{BufferFlag, ItemField, ItemType, SkuType};

    fn form() -> ItemForm {
        ItemForm::default()
    }

    #[test]
    fn test_refresh_sets_sku_and_locks() {
        let item = Item::new("FLAT-40")
            .with_item_type(ItemType::Int)
            .with_batch_size(Decimal::from(4));

        let update = form().handle(&item, ItemEvent::Refresh);
        assert_eq!(
            update.changes.get(ItemField::SkuType),
            Some(&FieldChange::SkuType(Some(SkuType::Sfgmto)))
        );
        assert!(update.access.is_read_only(ItemField::MinOrderQty));
        assert!(!update.is_rejected());
    }

    #[test]
    fn test_buffer_flag_change_updates_sku_and_thresholds() {
        let mut item = Item::new("FLAT-40")
            .with_item_type(ItemType::Fg)
            .with_safety_stock(Decimal::from(30));
        item.sku_type = Some(SkuType::Fgmto);
        item.buffer_flag = BufferFlag::Buffer;

        let update = form().handle(&item, ItemEvent::BufferFlagChanged);
        update.apply(&mut item);

        assert_eq!(item.sku_type, Some(SkuType::Fgmta));
        assert_eq!(item.top_of_red, Some(10));
        assert_eq!(item.top_of_yellow, Some(20));
    }

    #[test]
    fn test_invalid_safety_stock_is_rejected_and_cleared() {
        let mut item = Item::new("FLAT-40")
            .with_buffer_flag(BufferFlag::Buffer)
            .with_safety_stock(Decimal::ZERO);
        item.top_of_red = Some(4);
        item.top_of_yellow = Some(7);

        let update = form().handle(&item, ItemEvent::SafetyStockChanged);
        assert!(update.rejection.as_ref().is_some_and(SkuError::is_validation));

        update.apply(&mut item);
        assert_eq!(item.safety_stock, None);
        assert_eq!(item.top_of_red, None);
        assert_eq!(item.top_of_yellow, None);
    }

    #[test]
    fn test_buffer_flag_change_rejects_out_of_range_stock() {
        let mut item = Item::new("FLAT-40")
            .with_item_type(ItemType::Raw)
            .with_safety_stock(Decimal::MAX);
        item.buffer_flag = BufferFlag::Buffer;

        let update = form().handle(&item, ItemEvent::BufferFlagChanged);
        assert!(update.rejection.as_ref().is_some_and(SkuError::is_validation));

        update.apply(&mut item);
        assert_eq!(item.safety_stock, None);
        assert_eq!(item.sku_type, Some(SkuType::Pta));
    }

    #[test]
    fn test_batch_size_event() {
        let item = Item::new("FLAT-40")
            .with_min_order_qty(Decimal::from(5))
            .with_batch_size(Decimal::from(3));

        let update = form().handle(&item, ItemEvent::BatchSizeChanged);
        assert_eq!(
            update.changes.get(ItemField::MinOrderQty),
            Some(&FieldChange::MinOrderQty(Decimal::ZERO))
        );
        assert!(update.access.is_read_only(ItemField::MinOrderQty));
        assert!(update.access.is_editable(ItemField::BatchSize));
    }

    #[test]
    fn test_validate() {
        let item = Item::new("FLAT-40").with_buffer_flag(BufferFlag::Buffer);
        assert!(form().validate(&item).is_err());

        let item = item.with_safety_stock(Decimal::from(9));
        assert!(form().validate(&item).is_ok());

        let item = item
            .with_min_order_qty(Decimal::ONE)
            .with_batch_size(Decimal::ONE);
        assert!(form().validate(&item).is_err());
    }

    #[test]
    fn test_decoupled_lead_time_for_unsaved_item() {
        let item = Item::new("NEW").with_lead_time_days(6);
        let update = form().refresh_decoupled_lead_time(&item, None).unwrap();
        assert_eq!(
            update.changes.get(ItemField::DecoupledLeadTime),
            Some(&FieldChange::DecoupledLeadTime(Some(6)))
        );
    }

    #[test]
    fn test_decoupled_lead_time_uses_form_values() {
        let graph = BomGraph::new()
            .with_item(LeadTimeRecord::new("P", 1, BufferFlag::NonBuffer))
            .with_item(LeadTimeRecord::new("C", 4, BufferFlag::NonBuffer))
            .with_bom("P", ["C"]);

        // 表單上提前期已改為 3（快照仍為 1）
        let item = Item::new("P").with_lead_time_days(3);
        let update = form().refresh_decoupled_lead_time(&item, Some(&graph)).unwrap();
        assert_eq!(
            update.changes.get(ItemField::DecoupledLeadTime),
            Some(&FieldChange::DecoupledLeadTime(Some(3 + 4 + 4)))
        );
    }

    #[test]
    fn test_bom_reminder() {
        let graph = BomGraph::new().with_bom("HAS-BOM", ["X"]);
        let item = Item::new("NO-BOM").with_item_group("Sub Assemblies");

        assert!(form().bom_reminder(&item, &graph).is_some());

        let item = Item::new("HAS-BOM").with_item_group("Sub Assemblies");
        assert!(form().bom_reminder(&item, &graph).is_none());
    }
}
