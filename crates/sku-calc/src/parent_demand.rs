//! 父件需求展開
//!
//! 由父件的淨建議量沿預設 BOM 向下展開：
//!
//! ```text
//! 子件需求 = 父件淨建議量 × BOM 行用量 / BOM 產出數量
//! ```
//!
//! 非緩衝子件累積相依需求，再以累積後的需求計算自身淨建議量並繼續展開。
//! 緩衝子件由自身緩衝吸收，不累積也不展開。

use rust_decimal::Decimal;
use sku_core::{BomGraph, Item, Result, RulesConfig, SkuError};
use std::collections::HashMap;

use crate::{Diagnostic, ReplenishmentCalculator, ReplenishmentInput};

/// 父件需求展開結果
#[derive(Debug, Clone, Default)]
pub struct ParentDemandResult {
    /// 各子件累積的父件需求
    pub parent_demand: HashMap<String, Decimal>,
    pub diagnostics: Vec<Diagnostic>,
}

impl ParentDemandResult {
    /// 子件累積的父件需求，沒有時為 0
    pub fn demand_for(&self, item_code: &str) -> Decimal {
        self.parent_demand
            .get(item_code)
            .copied()
            .unwrap_or(Decimal::ZERO)
    }
}

/// 父件需求展開計算器
pub struct ParentDemandCalculator<'a> {
    graph: &'a BomGraph,
    items: &'a HashMap<String, Item>,
    inputs: &'a HashMap<String, ReplenishmentInput>,
    config: RulesConfig,
}

impl<'a> ParentDemandCalculator<'a> {
    /// `items` 為物料主檔，`inputs` 為各物料的補貨輸入（缺少時視為全 0）
    pub fn new(
        graph: &'a BomGraph,
        items: &'a HashMap<String, Item>,
        inputs: &'a HashMap<String, ReplenishmentInput>,
    ) -> Self {
        Self {
            graph,
            items,
            inputs,
            config: RulesConfig::default(),
        }
    }

    /// 建構器模式：設置規則配置
    pub fn with_config(mut self, config: RulesConfig) -> Self {
        self.config = config;
        self
    }

    /// 從多個父件（物料代碼, 淨建議量）開始展開
    pub fn calculate<S>(&self, roots: &[(S, Decimal)]) -> Result<ParentDemandResult>
    where
        S: AsRef<str>,
    {
        tracing::info!("開始父件需求展開：父件 {} 筆", roots.len());

        let mut result = ParentDemandResult::default();
        for (item_code, net) in roots {
            if *net <= Decimal::ZERO {
                continue;
            }
            let mut path = Vec::new();
            self.explode(item_code.as_ref(), *net, &mut path, &mut result)?;
        }

        tracing::info!("父件需求展開完成：子件 {} 筆", result.parent_demand.len());
        Ok(result)
    }

    fn explode(
        &self,
        parent_code: &str,
        parent_net: Decimal,
        path: &mut Vec<String>,
        result: &mut ParentDemandResult,
    ) -> Result<()> {
        if path.len() >= self.config.max_bom_depth {
            return Err(SkuError::BomTooDeep {
                item_code: parent_code.to_string(),
                max_depth: self.config.max_bom_depth,
            });
        }

        let stops = self
            .items
            .get(parent_code)
            .and_then(|item| item.item_group.as_deref())
            .is_some_and(|group| self.config.stops_explosion(group));
        if stops {
            tracing::debug!("物料 {} 屬於停止展開的群組", parent_code);
            return Ok(());
        }

        let bom = match self.graph.bom(parent_code) {
            Some(bom) if !bom.is_empty() => bom,
            _ => {
                tracing::debug!("物料 {} 沒有預設 BOM", parent_code);
                return Ok(());
            }
        };

        path.push(parent_code.to_string());

        for line in &bom.lines {
            let child_code = line.item_code.as_str();
            let required = bom
                .qty_per_unit(line)
                .and_then(|per_unit| parent_net.checked_mul(per_unit))
                .ok_or_else(out_of_range)?;

            let Some(child) = self.items.get(child_code) else {
                tracing::warn!("BOM {} 的子件 {} 不存在，略過", parent_code, child_code);
                result.diagnostics.push(Diagnostic::warning(
                    parent_code.to_string(),
                    format!("找不到子件 {child_code}，已略過"),
                ));
                continue;
            };

            if child.is_buffer() {
                tracing::debug!("子件 {} 為緩衝物料，不累積父件需求", child_code);
                continue;
            }

            let accumulated = result
                .demand_for(child_code)
                .checked_add(required)
                .ok_or_else(out_of_range)?;
            result
                .parent_demand
                .insert(child_code.to_string(), accumulated);

            tracing::debug!(
                "BOM 展開: {} → {} (數量: {}, 累積: {})",
                parent_code,
                child_code,
                required,
                accumulated
            );

            let input = self
                .inputs
                .get(child_code)
                .cloned()
                .unwrap_or_default()
                .with_parent_demand(accumulated);
            let base = ReplenishmentCalculator::order_recommendation(
                child.sku_type,
                child.buffer_flag,
                &input,
            )?;
            let net = ReplenishmentCalculator::net_order_quantity(
                base,
                child.min_order_qty,
                child.batch_size,
            )?;

            if net <= Decimal::ZERO {
                continue;
            }
            if path.iter().any(|code| code == child_code) {
                tracing::warn!("BOM 循環引用: {} → {}，停止展開", parent_code, child_code);
                result.diagnostics.push(Diagnostic::warning(
                    child_code.to_string(),
                    format!("BOM 循環引用 {parent_code} -> {child_code}，已停止展開"),
                ));
                continue;
            }

            self.explode(child_code, net, path, result)?;
        }

        path.pop();
        Ok(())
    }
}

fn out_of_range() -> SkuError {
    SkuError::Validation("Quantity is out of range".to_string())
}
