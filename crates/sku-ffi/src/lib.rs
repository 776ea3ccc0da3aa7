//! # SKU FFI
//!
//! Python 綁定層（PyO3），供 ERP 宿主框架呼叫規則引擎

use pyo3::prelude::*;

pub mod python;

/// Python 模組註冊
#[pymodule]
fn sku_engine_py(m: &Bound<'_, PyModule>) -> PyResult<()> {
    m.add_function(wrap_pyfunction!(python::classify_sku, m)?)?;
    m.add_function(wrap_pyfunction!(python::compute_thresholds, m)?)?;
    m.add_function(wrap_pyfunction!(python::resolve_quantity_pair, m)?)?;
    m.add_function(wrap_pyfunction!(python::decoupled_lead_time, m)?)?;
    m.add_function(wrap_pyfunction!(python::on_hand_zone, m)?)?;
    m.add_function(wrap_pyfunction!(python::sales_order_zone, m)?)?;
    m.add("CyclicBomError", m.py().get_type::<python::CyclicBomError>())?;
    Ok(())
}
