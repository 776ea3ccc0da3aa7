//! # SKU Calculation Engine
//!
//! 物料分類、緩衝區間、欄位互斥、解耦提前期與父件需求展開規則

pub mod buffer_zone;
pub mod exclusivity;
pub mod form;
pub mod lead_time;
pub mod naming;
pub mod parent_demand;
pub mod replenishment;
pub mod sku;
pub mod thresholds;

// Re-export 主要類型
pub use buffer_zone::{order_status, BufferZone, OnHandStatus, ZoneCounts, ZoneShare};
pub use exclusivity::{ExclusiveFlags, PairResolution, PairSide, QuantityPair};
pub use form::{ItemEvent, ItemForm, ItemUpdate};
pub use lead_time::{BomRowTrace, DecoupledLeadTimeCalculator, LeadTimeResult, LeadTimeTrace};
pub use parent_demand::{ParentDemandCalculator, ParentDemandResult};
pub use replenishment::{ReplenishmentCalculator, ReplenishmentInput};
pub use sku::{SkuClassifier, TradeRole};
pub use thresholds::{BufferThresholds, ThresholdCalculator};

/// 計算診斷訊息（隨結果返回，而非僅寫入日誌）
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Diagnostic {
    pub item_code: String,
    pub message: String,
    pub severity: Severity,
}

impl Diagnostic {
    pub fn new(item_code: String, message: String, severity: Severity) -> Self {
        Self {
            item_code,
            message,
            severity,
        }
    }

    pub fn info(item_code: String, message: String) -> Self {
        Self::new(item_code, message, Severity::Info)
    }

    pub fn warning(item_code: String, message: String) -> Self {
        Self::new(item_code, message, Severity::Warning)
    }

    pub fn error(item_code: String, message: String) -> Self {
        Self::new(item_code, message, Severity::Error)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord)]
pub enum Severity {
    Info,
    Warning,
    Error,
}
