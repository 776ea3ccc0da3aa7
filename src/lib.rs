//! # SKU Engine
//!
//! 物料主檔規則引擎：SKU 分類、緩衝區間閾值、欄位互斥、解耦提前期、
//! 父件需求展開與補貨建議。
//!
//! 本 crate 僅重新匯出 `sku-core` 與 `sku-calc`，Python 綁定位於 `sku-ffi`。

pub use sku_calc::{
    order_status, BufferThresholds, BufferZone, DecoupledLeadTimeCalculator, Diagnostic,
    ItemEvent, ItemForm, ItemUpdate, LeadTimeResult, OnHandStatus, ParentDemandCalculator,
    ParentDemandResult, QuantityPair, ReplenishmentCalculator, ReplenishmentInput, Severity,
    SkuClassifier, ThresholdCalculator, ZoneCounts,
};
pub use sku_core::{
    Bom, BomGraph, BomLine, BufferFlag, ChangeSet, Item, ItemField, ItemType, LeadTimeRecord,
    RulesConfig, SkuError, SkuType,
};
