//! 解耦提前期計算
//!
//! 緩衝物料吸收上游波動，對父件貢獻 0。非緩衝物料的解耦提前期為：
//!
//! ```text
//! 自身提前期 + 本層非緩衝子件的最大提前期 + 該子件（BOM 行順序第一個）的解耦提前期
//! ```
//!
//! 沒有 BOM 的物料直接返回自身提前期。

use rayon::prelude::*;
use serde::Serialize;
use sku_core::{BomGraph, Result, RulesConfig, SkuError};

use crate::Diagnostic;

/// BOM 行追蹤
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BomRowTrace {
    pub item_code: String,
    pub lead_time: Option<u32>,
    pub is_buffer: bool,
    pub error: Option<String>,
}

/// 單層計算追蹤
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LeadTimeTrace {
    pub level: usize,
    pub item_code: String,
    pub own_lead_time: u32,
    pub is_buffer: bool,
    pub has_bom: bool,
    pub bom_items: Vec<BomRowTrace>,
    pub max_lead_time_at_level: Option<u32>,
    pub items_with_max: Vec<String>,
    pub recursive_contribution: Option<u32>,
    pub total: u32,
}

/// 解耦提前期計算結果
#[derive(Debug, Clone)]
pub struct LeadTimeResult {
    pub item_code: String,
    pub decoupled_lead_time: u32,
    /// 依走訪順序（父層在前）的追蹤記錄
    pub trace: Vec<LeadTimeTrace>,
    pub diagnostics: Vec<Diagnostic>,
}

/// 解耦提前期計算器
pub struct DecoupledLeadTimeCalculator<'a> {
    graph: &'a BomGraph,
    max_depth: usize,
}

impl<'a> DecoupledLeadTimeCalculator<'a> {
    /// 創建計算器（使用預設層級上限）
    pub fn new(graph: &'a BomGraph) -> Self {
        Self::with_config(graph, &RulesConfig::default())
    }

    pub fn with_config(graph: &'a BomGraph, config: &RulesConfig) -> Self {
        Self {
            graph,
            max_depth: config.max_bom_depth,
        }
    }

    /// 建構器模式：設置層級上限
    pub fn with_max_depth(mut self, max_depth: usize) -> Self {
        self.max_depth = max_depth;
        self
    }

    /// 計算單一物料的解耦提前期
    pub fn calculate(&self, item_code: &str) -> Result<LeadTimeResult> {
        let mut path = Vec::new();
        let mut trace = Vec::new();
        let mut diagnostics = Vec::new();

        let decoupled_lead_time =
            self.evaluate(item_code, 0, &mut path, &mut trace, &mut diagnostics)?;

        tracing::debug!(
            "物料 {} 解耦提前期: {} 天（走訪 {} 層）",
            item_code,
            decoupled_lead_time,
            trace.len()
        );

        Ok(LeadTimeResult {
            item_code: item_code.to_string(),
            decoupled_lead_time,
            trace,
            diagnostics,
        })
    }

    /// 批次計算，結果順序與輸入相同
    pub fn calculate_many<S>(&self, item_codes: &[S]) -> Vec<Result<LeadTimeResult>>
    where
        S: AsRef<str> + Sync,
    {
        tracing::info!("開始解耦提前期批次計算：物料 {} 筆", item_codes.len());
        let start_time = std::time::Instant::now();

        let results: Vec<_> = item_codes
            .par_iter()
            .map(|code| self.calculate(code.as_ref()))
            .collect();

        tracing::info!("解耦提前期批次計算完成，耗時 {:?}", start_time.elapsed());
        results
    }

    fn evaluate(
        &self,
        item_code: &str,
        level: usize,
        path: &mut Vec<String>,
        trace: &mut Vec<LeadTimeTrace>,
        diagnostics: &mut Vec<Diagnostic>,
    ) -> Result<u32> {
        if path.iter().any(|code| code == item_code) {
            let mut cycle = path.clone();
            cycle.push(item_code.to_string());
            return Err(SkuError::CyclicBom(cycle));
        }
        if path.len() >= self.max_depth {
            return Err(SkuError::BomTooDeep {
                item_code: item_code.to_string(),
                max_depth: self.max_depth,
            });
        }

        let record = self
            .graph
            .item(item_code)
            .ok_or_else(|| SkuError::ItemNotFound(item_code.to_string()))?;

        let index = trace.len();
        trace.push(LeadTimeTrace {
            level,
            item_code: item_code.to_string(),
            own_lead_time: record.lead_time_days,
            is_buffer: record.is_buffer(),
            has_bom: self.graph.has_bom(item_code),
            bom_items: Vec::new(),
            max_lead_time_at_level: None,
            items_with_max: Vec::new(),
            recursive_contribution: None,
            total: 0,
        });

        if record.is_buffer() {
            return Ok(0);
        }

        let own = record.lead_time_days;
        let bom = match self.graph.bom(item_code) {
            Some(bom) if !bom.is_empty() => bom,
            _ => {
                trace[index].total = own;
                return Ok(own);
            }
        };

        let mut rows = Vec::with_capacity(bom.lines.len());
        for line in &bom.lines {
            let child_code = &line.item_code;
            match self.graph.item(child_code) {
                Some(child) => rows.push(BomRowTrace {
                    item_code: child_code.clone(),
                    lead_time: Some(child.lead_time_days),
                    is_buffer: child.is_buffer(),
                    error: None,
                }),
                None => {
                    tracing::warn!("BOM {} 的子件 {} 不存在，略過", item_code, child_code);
                    diagnostics.push(Diagnostic::warning(
                        item_code.to_string(),
                        format!("找不到子件 {child_code}，已略過"),
                    ));
                    rows.push(BomRowTrace {
                        item_code: child_code.clone(),
                        lead_time: None,
                        is_buffer: false,
                        error: Some(format!("找不到物料: {child_code}")),
                    });
                }
            }
        }

        // 緩衝子件貢獻 0，不參與本層最大值
        let max_lead_time = rows
            .iter()
            .filter(|row| !row.is_buffer)
            .filter_map(|row| row.lead_time)
            .max();

        let Some(max_lead_time) = max_lead_time else {
            trace[index].bom_items = rows;
            trace[index].total = own;
            return Ok(own);
        };

        let mut items_with_max: Vec<String> = Vec::new();
        for row in rows.iter().filter(|row| !row.is_buffer) {
            if row.lead_time == Some(max_lead_time) && !items_with_max.contains(&row.item_code) {
                items_with_max.push(row.item_code.clone());
            }
        }

        // 並列最大值時取 BOM 行順序第一個，避免重複計算
        let critical_child = items_with_max[0].clone();

        path.push(item_code.to_string());
        let contribution = self.evaluate(&critical_child, level + 1, path, trace, diagnostics);
        path.pop();
        let contribution = contribution?;

        let total = own
            .saturating_add(max_lead_time)
            .saturating_add(contribution);

        tracing::debug!(
            "第 {} 層 {}: {} + {} + {} = {}",
            level,
            item_code,
            own,
            max_lead_time,
            contribution,
            total
        );

        let entry = &mut trace[index];
        entry.bom_items = rows;
        entry.max_lead_time_at_level = Some(max_lead_time);
        entry.items_with_max = items_with_max;
        entry.recursive_contribution = Some(contribution);
        entry.total = total;

        Ok(total)
    }
}
