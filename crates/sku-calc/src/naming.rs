//! 物料代碼與名稱生成

use sku_core::{ChangeSet, FieldChange, Item, RulesConfig};

/// 依尺寸、形狀、鋼種生成物料代碼
///
/// 倉庫雜項物料或三項屬性任一缺少時返回 None。光亮材類別加上 "B " 前綴。
pub fn generate_item_code(item: &Item, config: &RulesConfig) -> Option<String> {
    if item.store_item {
        return None;
    }

    let non_empty = |value: &Option<String>| value.clone().filter(|v| !v.is_empty());
    let size = non_empty(&item.item_size)?;
    let shape = non_empty(&item.shape)?;
    let grade = non_empty(&item.grade)?;

    let code = format!("{size} {shape} {grade}");
    let is_bright = item
        .category_name
        .as_deref()
        .is_some_and(|category| config.is_bright_category(category));

    Some(if is_bright { format!("B {code}") } else { code })
}

/// 命名屬性變更後的代碼與名稱欄位
pub fn refresh_item_code(item: &Item, config: &RulesConfig) -> ChangeSet {
    let mut changes = ChangeSet::new();
    if let Some(code) = generate_item_code(item, config) {
        changes.record(item, FieldChange::ItemCode(code.clone()));
        changes.record(item, FieldChange::ItemName(code));
    }
    changes
}

/// 建檔後是否需要提示建立 BOM
pub fn requires_bom(item: &Item, config: &RulesConfig) -> bool {
    item.item_group
        .as_deref()
        .is_some_and(|group| config.requires_bom(group))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sku_core::ItemField;

    #[test]
    fn test_generate_plain_code() {
        let item = Item::new("").with_naming(Some("Black Rounds"), "40", "RCS", "EN8");
        assert_eq!(
            generate_item_code(&item, &RulesConfig::default()),
            Some("40 RCS EN8".to_string())
        );
    }

    #[test]
    fn test_generate_bright_code() {
        let item = Item::new("").with_naming(Some("Bright Hex"), "22", "HEX", "EN1A");
        assert_eq!(
            generate_item_code(&item, &RulesConfig::default()),
            Some("B 22 HEX EN1A".to_string())
        );
    }

    #[test]
    fn test_incomplete_or_store_item() {
        let config = RulesConfig::default();
        let mut item = Item::new("").with_naming(None, "40", "", "EN8");
        assert_eq!(generate_item_code(&item, &config), None);

        item.shape = Some("RCS".to_string());
        assert!(generate_item_code(&item, &config).is_some());
        assert_eq!(generate_item_code(&item.as_store_item(), &config), None);
    }

    #[test]
    fn test_refresh_item_code() {
        let item = Item::new("OLD").with_naming(None, "16", "SQ", "C45");
        let changes = refresh_item_code(&item, &RulesConfig::default());

        assert_eq!(
            changes.get(ItemField::ItemCode),
            Some(&FieldChange::ItemCode("16 SQ C45".to_string()))
        );
        assert!(changes.is_dirty(ItemField::ItemName));
    }

    #[test]
    fn test_requires_bom() {
        let config = RulesConfig::default();
        assert!(requires_bom(&Item::new("X").with_item_group("Finished Goods"), &config));
        assert!(!requires_bom(&Item::new("X").with_item_group("Raw Material"), &config));
        assert!(!requires_bom(&Item::new("X"), &config));
    }
}
