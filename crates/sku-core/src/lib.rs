//! # SKU Core
//!
//! 物料分類引擎的核心資料模型與類型定義

pub mod bom;
pub mod changes;
pub mod config;
pub mod item;

// Re-export 主要類型
pub use bom::{Bom, BomGraph, BomLine, LeadTimeRecord};
pub use changes::{ChangeSet, FieldAccess, FieldChange, ItemField};
pub use config::RulesConfig;
pub use item::{BufferFlag, Item, ItemType, SkuType};

/// 安全庫存驗證失敗訊息
pub const SAFETY_STOCK_MESSAGE: &str = "Safety Stock must be greater than 0";

/// 物料規則錯誤類型
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SkuError {
    /// 阻擋提交的驗證錯誤（直接顯示給使用者）
    #[error("{0}")]
    Validation(String),

    #[error("BOM 循環引用: {}", .0.join(" -> "))]
    CyclicBom(Vec<String>),

    #[error("BOM 層級超過上限 {max_depth}: {item_code}")]
    BomTooDeep { item_code: String, max_depth: usize },

    #[error("找不到物料: {0}")]
    ItemNotFound(String),

    #[error("配置錯誤: {0}")]
    Config(String),
}

impl SkuError {
    /// 安全庫存必須大於 0
    pub fn safety_stock() -> Self {
        SkuError::Validation(SAFETY_STOCK_MESSAGE.to_string())
    }

    /// 是否為驗證錯誤
    pub fn is_validation(&self) -> bool {
        matches!(self, SkuError::Validation(_))
    }
}

pub type Result<T> = std::result::Result<T, SkuError>;
