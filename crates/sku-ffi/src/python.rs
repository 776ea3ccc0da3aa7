//! Python 綁定實現

use chrono::NaiveDate;
use pyo3::exceptions::{PyException, PyValueError};
use pyo3::prelude::*;
use rust_decimal::Decimal;
use sku_calc::{
    order_status, DecoupledLeadTimeCalculator, OnHandStatus, PairSide, QuantityPair,
    SkuClassifier, ThresholdCalculator,
};
use sku_core::{BomGraph, BufferFlag, LeadTimeRecord, RulesConfig, SkuError};
use std::collections::HashMap;

pyo3::create_exception!(sku_engine_py, CyclicBomError, PyException);

/// 將引擎錯誤轉為 Python 例外
fn to_py_err(err: SkuError) -> PyErr {
    match err {
        SkuError::CyclicBom(_) => CyclicBomError::new_err(err.to_string()),
        _ => PyValueError::new_err(err.to_string()),
    }
}

/// SKU 類型分類，無法分類時返回 None
#[pyfunction]
#[pyo3(signature = (item_type, buffer_flag=None))]
pub fn classify_sku(item_type: Option<&str>, buffer_flag: Option<&str>) -> Option<String> {
    SkuClassifier::classify(item_type, buffer_flag).map(|sku| sku.as_str().to_string())
}

/// 計算 (紅區頂端, 黃區頂端)；Non-Buffer 返回 None，安全庫存無效時拋出 ValueError
#[pyfunction]
#[pyo3(signature = (safety_stock, buffer_flag=None))]
pub fn compute_thresholds(
    safety_stock: Option<Decimal>,
    buffer_flag: Option<&str>,
) -> PyResult<Option<(u64, u64)>> {
    let thresholds = ThresholdCalculator::compute(safety_stock, BufferFlag::parse(buffer_flag))
        .map_err(to_py_err)?;
    Ok(thresholds.map(|t| (t.top_of_red, t.top_of_yellow)))
}

/// 最小訂購量/批量互斥
///
/// 返回 (最小訂購量, 批量, 最小訂購量唯讀, 批量唯讀)。
#[pyfunction]
#[pyo3(signature = (min_order_qty, batch_size, changed=None))]
pub fn resolve_quantity_pair(
    min_order_qty: Decimal,
    batch_size: Decimal,
    changed: Option<&str>,
) -> PyResult<(Decimal, Decimal, bool, bool)> {
    let changed = match changed {
        None => None,
        Some("min_order_qty") => Some(PairSide::First),
        Some("batch_size") => Some(PairSide::Second),
        Some(other) => {
            return Err(PyValueError::new_err(format!("未知的欄位: {other}")));
        }
    };

    let resolution = QuantityPair::new(min_order_qty, batch_size).resolve(changed);
    Ok((
        resolution.first,
        resolution.second,
        resolution.first_read_only,
        resolution.second_read_only,
    ))
}

/// 解耦提前期
///
/// `items` 為 (物料代碼, 提前期, 緩衝標記) 清單，`boms` 為父件對子件代碼（依 BOM 行順序）。
#[pyfunction]
#[pyo3(signature = (item_code, items, boms, max_depth=None))]
pub fn decoupled_lead_time(
    item_code: &str,
    items: Vec<(String, u32, Option<String>)>,
    boms: HashMap<String, Vec<String>>,
    max_depth: Option<usize>,
) -> PyResult<u32> {
    let mut graph = BomGraph::new();
    for (code, lead_time_days, buffer_flag) in items {
        graph.add_item(LeadTimeRecord::new(
            code,
            lead_time_days,
            BufferFlag::parse(buffer_flag.as_deref()),
        ));
    }
    for (parent, children) in boms {
        graph.set_bom(parent, children);
    }

    let config = match max_depth {
        Some(depth) => RulesConfig::default().with_max_bom_depth(depth),
        None => RulesConfig::default(),
    };
    config.validate().map_err(to_py_err)?;

    let result = DecoupledLeadTimeCalculator::with_config(&graph, &config)
        .calculate(item_code)
        .map_err(to_py_err)?;
    Ok(result.decoupled_lead_time)
}

/// 現有庫存狀態，返回 (百分比, 顏色)；無法計算時返回 None
#[pyfunction]
pub fn on_hand_zone(
    on_hand: Decimal,
    top_of_green: Decimal,
    qualified_demand: Decimal,
) -> Option<(i64, String)> {
    OnHandStatus::calculate(on_hand, top_of_green, qualified_demand)
        .map(|status| (status.percent, status.zone.as_str().to_string()))
}

/// 未結銷售訂單的緩衝顏色
#[pyfunction]
#[pyo3(signature = (transaction_date, delivery_date, today))]
pub fn sales_order_zone(
    transaction_date: Option<NaiveDate>,
    delivery_date: Option<NaiveDate>,
    today: NaiveDate,
) -> String {
    order_status(transaction_date, delivery_date, today)
        .as_str()
        .to_string()
}
