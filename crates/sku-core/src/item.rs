//! 物料模型

use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;
use std::str::FromStr;

/// 物料類型
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum ItemType {
    /// 成品
    Fg,
    /// 半成品
    Int,
    /// 原材料
    Raw,
}

impl ItemType {
    /// 解析輸入值（去除空白、忽略大小寫），無法辨識時返回 None
    pub fn parse(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "FG" => Some(ItemType::Fg),
            "INT" => Some(ItemType::Int),
            "RAW" => Some(ItemType::Raw),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ItemType::Fg => "FG",
            ItemType::Int => "INT",
            ItemType::Raw => "RAW",
        }
    }
}

impl fmt::Display for ItemType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 緩衝標記
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
pub enum BufferFlag {
    /// 備有安全緩衝庫存
    Buffer,
    /// 按需補貨
    #[default]
    #[serde(rename = "Non-Buffer")]
    NonBuffer,
}

impl BufferFlag {
    /// 解析輸入值：只有 "Buffer" 視為緩衝，其餘（包括缺值）皆為 Non-Buffer
    pub fn parse(raw: Option<&str>) -> Self {
        match raw.map(str::trim) {
            Some("Buffer") => BufferFlag::Buffer,
            _ => BufferFlag::NonBuffer,
        }
    }

    pub fn is_buffer(&self) -> bool {
        *self == BufferFlag::Buffer
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BufferFlag::Buffer => "Buffer",
            BufferFlag::NonBuffer => "Non-Buffer",
        }
    }
}

impl fmt::Display for BufferFlag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// SKU 類型（物料類型 × 緩衝策略）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum SkuType {
    /// 成品，備庫生產
    Fgmta,
    /// 成品，按單生產
    Fgmto,
    /// 半成品，備庫生產
    Sfgmta,
    /// 半成品，按單生產
    Sfgmto,
    /// 採購件，備庫
    Pta,
    /// 採購件，按單
    Pto,
}

impl SkuType {
    pub const ALL: [SkuType; 6] = [
        SkuType::Fgmta,
        SkuType::Fgmto,
        SkuType::Sfgmta,
        SkuType::Sfgmto,
        SkuType::Pta,
        SkuType::Pto,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SkuType::Fgmta => "FGMTA",
            SkuType::Fgmto => "FGMTO",
            SkuType::Sfgmta => "SFGMTA",
            SkuType::Sfgmto => "SFGMTO",
            SkuType::Pta => "PTA",
            SkuType::Pto => "PTO",
        }
    }

    /// 是否為採購件（原材料）
    pub fn is_purchased(&self) -> bool {
        matches!(self, SkuType::Pta | SkuType::Pto)
    }
}

impl fmt::Display for SkuType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SkuType {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        SkuType::ALL
            .into_iter()
            .find(|sku| sku.as_str() == normalized)
            .ok_or_else(|| format!("未知的 SKU 類型: {s}"))
    }
}

/// 物料主檔記錄（單次編輯中的物料）
///
/// 反序列化時 `item_type` 與 `buffer_flag` 經由 [`ItemType::parse`] 與 [`BufferFlag::parse`]
/// 正規化：無法辨識的物料類型為 None，缺少的欄位使用預設值。
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Item {
    /// 物料代碼
    pub item_code: String,

    /// 物料名稱
    pub item_name: String,

    /// 物料類型
    #[serde(deserialize_with = "lenient_item_type")]
    pub item_type: Option<ItemType>,

    /// 緩衝標記
    #[serde(deserialize_with = "lenient_buffer_flag")]
    pub buffer_flag: BufferFlag,

    /// 安全庫存（綠區頂端）
    pub safety_stock: Option<Decimal>,

    /// 最小訂購量
    pub min_order_qty: Decimal,

    /// 批量
    pub batch_size: Decimal,

    /// 自身提前期（天）
    pub lead_time_days: u32,

    /// 衍生：SKU 類型
    pub sku_type: Option<SkuType>,

    /// 衍生：紅區頂端
    pub top_of_red: Option<u64>,

    /// 衍生：黃區頂端
    pub top_of_yellow: Option<u64>,

    /// 衍生：解耦提前期
    pub decoupled_lead_time: Option<u32>,

    /// 物料群組
    pub item_group: Option<String>,

    /// 類別名稱
    pub category_name: Option<String>,

    /// 尺寸
    pub item_size: Option<String>,

    /// 形狀
    pub shape: Option<String>,

    /// 鋼種
    pub grade: Option<String>,

    /// 倉庫雜項物料（不參與命名與分類）
    pub store_item: bool,
}

fn lenient_item_type<'de, D>(deserializer: D) -> Result<Option<ItemType>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(raw.as_deref().and_then(ItemType::parse))
}

fn lenient_buffer_flag<'de, D>(deserializer: D) -> Result<BufferFlag, D::Error>
where
    D: Deserializer<'de>,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    Ok(BufferFlag::parse(raw.as_deref()))
}

impl Item {
    /// 創建新的物料
    pub fn new(item_code: impl Into<String>) -> Self {
        let item_code = item_code.into();
        Self {
            item_name: item_code.clone(),
            item_code,
            ..Default::default()
        }
    }

    /// 建構器模式：設置物料類型
    pub fn with_item_type(mut self, item_type: ItemType) -> Self {
        self.item_type = Some(item_type);
        self
    }

    /// 建構器模式：設置緩衝標記
    pub fn with_buffer_flag(mut self, buffer_flag: BufferFlag) -> Self {
        self.buffer_flag = buffer_flag;
        self
    }

    /// 建構器模式：設置安全庫存
    pub fn with_safety_stock(mut self, safety_stock: Decimal) -> Self {
        self.safety_stock = Some(safety_stock);
        self
    }

    /// 建構器模式：設置最小訂購量
    pub fn with_min_order_qty(mut self, qty: Decimal) -> Self {
        self.min_order_qty = qty;
        self
    }

    /// 建構器模式：設置批量
    pub fn with_batch_size(mut self, size: Decimal) -> Self {
        self.batch_size = size;
        self
    }

    /// 建構器模式：設置提前期
    pub fn with_lead_time_days(mut self, days: u32) -> Self {
        self.lead_time_days = days;
        self
    }

    /// 建構器模式：設置物料群組
    pub fn with_item_group(mut self, group: impl Into<String>) -> Self {
        self.item_group = Some(group.into());
        self
    }

    /// 建構器模式：設置命名屬性（類別、尺寸、形狀、鋼種）
    pub fn with_naming(
        mut self,
        category_name: Option<&str>,
        item_size: &str,
        shape: &str,
        grade: &str,
    ) -> Self {
        self.category_name = category_name.map(str::to_string);
        self.item_size = Some(item_size.to_string());
        self.shape = Some(shape.to_string());
        self.grade = Some(grade.to_string());
        self
    }

    /// 建構器模式：標記為倉庫雜項物料
    pub fn as_store_item(mut self) -> Self {
        self.store_item = true;
        self
    }

    /// 檢查是否為緩衝物料
    pub fn is_buffer(&self) -> bool {
        self.buffer_flag.is_buffer()
    }
}
