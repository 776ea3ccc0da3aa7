//! 規則引擎配置

use serde::{Deserialize, Serialize};

use crate::{Result, SkuError};

/// 規則引擎配置
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct RulesConfig {
    /// 需要 "B " 前綴的光亮材類別
    pub bright_categories: Vec<String>,

    /// 建檔後必須建立 BOM 的物料群組（小寫比對）
    pub bom_required_groups: Vec<String>,

    /// 父件需求展開時不再向下展開的物料群組（小寫比對）
    pub explosion_stop_groups: Vec<String>,

    /// BOM 遞迴層級上限
    pub max_bom_depth: usize,
}

impl Default for RulesConfig {
    fn default() -> Self {
        Self {
            bright_categories: ["Bright Squares", "Bright Rounds", "Bright Hex", "Bright Flats"]
                .into_iter()
                .map(String::from)
                .collect(),
            bom_required_groups: [
                "sub assemblies",
                "sub assembly",
                "finished goods",
                "finished good",
            ]
            .into_iter()
            .map(String::from)
            .collect(),
            explosion_stop_groups: vec!["raw material".to_string()],
            max_bom_depth: 64,
        }
    }
}

impl RulesConfig {
    /// 從 JSON 載入配置，缺少的欄位使用預設值
    pub fn from_json(json: &str) -> Result<Self> {
        let config: RulesConfig =
            serde_json::from_str(json).map_err(|e| SkuError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// 建構器模式：設置光亮材類別
    pub fn with_bright_categories(mut self, categories: Vec<String>) -> Self {
        self.bright_categories = categories;
        self
    }

    /// 建構器模式：設置需要 BOM 的物料群組
    pub fn with_bom_required_groups(mut self, groups: Vec<String>) -> Self {
        self.bom_required_groups = groups;
        self
    }

    /// 建構器模式：設置停止展開的物料群組
    pub fn with_explosion_stop_groups(mut self, groups: Vec<String>) -> Self {
        self.explosion_stop_groups = groups;
        self
    }

    /// 建構器模式：設置 BOM 層級上限
    pub fn with_max_bom_depth(mut self, depth: usize) -> Self {
        self.max_bom_depth = depth;
        self
    }

    /// 檢查配置是否有效
    pub fn validate(&self) -> Result<()> {
        if self.max_bom_depth == 0 {
            return Err(SkuError::Config("max_bom_depth 必須大於 0".to_string()));
        }
        Ok(())
    }

    /// 類別是否為光亮材
    pub fn is_bright_category(&self, category_name: &str) -> bool {
        self.bright_categories.iter().any(|c| c == category_name)
    }

    /// 物料群組是否需要 BOM
    pub fn requires_bom(&self, item_group: &str) -> bool {
        group_matches(&self.bom_required_groups, item_group)
    }

    /// 物料群組是否停止父件需求展開
    pub fn stops_explosion(&self, item_group: &str) -> bool {
        group_matches(&self.explosion_stop_groups, item_group)
    }
}

fn group_matches(groups: &[String], item_group: &str) -> bool {
    let normalized = item_group.trim().to_lowercase();
    groups.iter().any(|g| g.trim().to_lowercase() == normalized)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RulesConfig::default();
        assert_eq!(config.max_bom_depth, 64);
        assert!(config.is_bright_category("Bright Rounds"));
        assert!(!config.is_bright_category("Black Rounds"));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_requires_bom_normalizes_group() {
        let config = RulesConfig::default();
        assert!(config.requires_bom("Sub Assemblies"));
        assert!(config.requires_bom("  FINISHED GOOD "));
        assert!(!config.requires_bom("Raw Material"));
        assert!(!config.requires_bom(""));
    }

    #[test]
    fn test_stops_explosion() {
        let config = RulesConfig::default();
        assert!(config.stops_explosion("Raw Material"));
        assert!(!config.stops_explosion("Sub Assemblies"));

        let config = config.with_explosion_stop_groups(Vec::new());
        assert!(!config.stops_explosion("Raw Material"));
    }

    #[test]
    fn test_from_json_partial() {
        let config = RulesConfig::from_json(r#"{ "max_bom_depth": 8 }"#).unwrap();
        assert_eq!(config.max_bom_depth, 8);
        assert_eq!(config.bright_categories.len(), 4);
    }

    #[test]
    fn test_from_json_errors() {
        assert!(matches!(
            RulesConfig::from_json(r#"{ "max_bom_depth": 0 }"#),
            Err(SkuError::Config(_))
        ));
        assert!(matches!(
            RulesConfig::from_json("not json"),
            Err(SkuError::Config(_))
        ));
    }

    #[test]
    fn test_config_builder() {
        let config = RulesConfig::default()
            .with_bright_categories(vec!["Bright Bars".to_string()])
            .with_bom_required_groups(vec!["Assemblies".to_string()])
            .with_max_bom_depth(3);

        assert!(config.is_bright_category("Bright Bars"));
        assert!(!config.is_bright_category("Bright Rounds"));
        assert!(config.requires_bom("assemblies"));
        assert_eq!(config.max_bom_depth, 3);
    }
}
