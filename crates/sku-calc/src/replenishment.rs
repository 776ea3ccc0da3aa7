//! 補貨建議量

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sku_core::{BufferFlag, Item, Result, SkuError, SkuType};

/// 補貨計算輸入
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReplenishmentInput {
    /// 綠區頂端（安全庫存）
    pub top_of_green: Decimal,

    /// 合格需求（交期已到的未結銷售訂單）
    pub qualified_demand: Decimal,

    /// 父件展開帶來的相依需求
    pub parent_demand: Decimal,

    /// 現有庫存
    pub stock: Decimal,

    /// 在製量
    pub wip: Decimal,

    /// 未結採購訂單
    pub open_po: Decimal,

    /// 未結物料請購量
    pub material_request: Decimal,
}

impl ReplenishmentInput {
    pub fn new(stock: Decimal) -> Self {
        Self {
            stock,
            ..Default::default()
        }
    }

    /// 建構器模式：設置綠區頂端
    pub fn with_top_of_green(mut self, qty: Decimal) -> Self {
        self.top_of_green = qty;
        self
    }

    /// 建構器模式：設置合格需求
    pub fn with_qualified_demand(mut self, qty: Decimal) -> Self {
        self.qualified_demand = qty;
        self
    }

    /// 建構器模式：設置父件需求
    pub fn with_parent_demand(mut self, qty: Decimal) -> Self {
        self.parent_demand = qty;
        self
    }

    /// 建構器模式：設置在製量
    pub fn with_wip(mut self, qty: Decimal) -> Self {
        self.wip = qty;
        self
    }

    /// 建構器模式：設置未結採購訂單
    pub fn with_open_po(mut self, qty: Decimal) -> Self {
        self.open_po = qty;
        self
    }

    /// 建構器模式：設置未結請購量
    pub fn with_material_request(mut self, qty: Decimal) -> Self {
        self.material_request = qty;
        self
    }
}

/// 補貨建議計算器
pub struct ReplenishmentCalculator;

impl ReplenishmentCalculator {
    /// 建議訂購量（套用最小訂購量/批量之前）
    ///
    /// - 緩衝物料：綠區頂端 + 合格需求 - 庫存 - 在製
    /// - 非緩衝物料：合格需求 + 父件需求 - 庫存 - 在製
    /// - 採購件另扣除未結採購訂單；最後扣除請購量，下限為 0
    pub fn order_recommendation(
        sku_type: Option<SkuType>,
        buffer_flag: BufferFlag,
        input: &ReplenishmentInput,
    ) -> Result<Decimal> {
        let requirement = if buffer_flag.is_buffer() {
            checked(input.top_of_green.checked_add(input.qualified_demand))?
        } else {
            checked(input.qualified_demand.checked_add(input.parent_demand))?
        };

        let mut base = checked(
            requirement
                .checked_sub(input.stock)
                .and_then(|qty| qty.checked_sub(input.wip)),
        )?;
        if sku_type.is_some_and(|sku| sku.is_purchased()) {
            base = checked(base.checked_sub(input.open_po))?;
        }

        Ok(checked(base.checked_sub(input.material_request))?.max(Decimal::ZERO))
    }

    /// 套用最小訂購量或批量
    ///
    /// 兩者互斥：有最小訂購量時取較大者；否則有批量時向上取整到批量倍數。
    pub fn net_order_quantity(
        base: Decimal,
        min_order_qty: Decimal,
        batch_size: Decimal,
    ) -> Result<Decimal> {
        if base <= Decimal::ZERO {
            return Ok(Decimal::ZERO);
        }

        if min_order_qty > Decimal::ZERO {
            Ok(base.max(min_order_qty))
        } else if batch_size > Decimal::ZERO {
            checked(
                base.checked_div(batch_size)
                    .and_then(|batches| batches.ceil().checked_mul(batch_size)),
            )
        } else {
            Ok(base)
        }
    }

    /// 物料的最終建議量（向上取整）
    pub fn for_item(item: &Item, input: &ReplenishmentInput) -> Result<Decimal> {
        let base = Self::order_recommendation(item.sku_type, item.buffer_flag, input)?;
        let net = Self::net_order_quantity(base, item.min_order_qty, item.batch_size)?.ceil();

        if net > Decimal::ZERO {
            tracing::debug!(
                "物料 {} 建議訂購量: {} (基礎 {})",
                item.item_code,
                net,
                base
            );
        }
        Ok(net)
    }
}

/// 數量運算溢位時返回驗證錯誤
fn checked(value: Option<Decimal>) -> Result<Decimal> {
    value.ok_or_else(|| SkuError::Validation("Quantity is out of range".to_string()))
}

#[cfg(test)]
mod tests {
    use super::*;
    use sku_core::ItemType;

    fn qty(n: i64) -> Decimal {
        Decimal::from(n)
    }

    fn net(base: Decimal, moq: Decimal, batch: Decimal) -> Decimal {
        ReplenishmentCalculator::net_order_quantity(base, moq, batch).unwrap()
    }

    #[test]
    fn test_buffer_recommendation() {
        let input = ReplenishmentInput::new(qty(40))
            .with_top_of_green(qty(90))
            .with_qualified_demand(qty(20))
            .with_wip(qty(10))
            .with_open_po(qty(15));

        // 成品不扣未結採購：90 + 20 - 40 - 10 = 60
        assert_eq!(
            ReplenishmentCalculator::order_recommendation(
                Some(SkuType::Fgmta),
                BufferFlag::Buffer,
                &input
            ),
            Ok(qty(60))
        );
        // 採購件扣除未結採購：60 - 15 = 45
        assert_eq!(
            ReplenishmentCalculator::order_recommendation(
                Some(SkuType::Pta),
                BufferFlag::Buffer,
                &input
            ),
            Ok(qty(45))
        );
    }

    #[test]
    fn test_non_buffer_recommendation() {
        let input = ReplenishmentInput::new(qty(5))
            .with_top_of_green(qty(500))
            .with_qualified_demand(qty(30))
            .with_parent_demand(qty(12))
            .with_material_request(qty(7));

        // 綠區頂端不適用：30 + 12 - 5 - 7 = 30
        assert_eq!(
            ReplenishmentCalculator::order_recommendation(
                Some(SkuType::Sfgmto),
                BufferFlag::NonBuffer,
                &input
            ),
            Ok(qty(30))
        );
    }

    #[test]
    fn test_recommendation_floors_at_zero() {
        let input = ReplenishmentInput::new(qty(1_000)).with_qualified_demand(qty(10));
        assert_eq!(
            ReplenishmentCalculator::order_recommendation(None, BufferFlag::NonBuffer, &input),
            Ok(Decimal::ZERO)
        );
    }

    #[test]
    fn test_recommendation_out_of_range() {
        let input = ReplenishmentInput::new(Decimal::MIN).with_qualified_demand(Decimal::MAX);
        let err = ReplenishmentCalculator::order_recommendation(None, BufferFlag::NonBuffer, &input)
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Quantity is out of range");

        let input = ReplenishmentInput::new(Decimal::ZERO)
            .with_top_of_green(Decimal::MAX)
            .with_qualified_demand(Decimal::MAX);
        assert!(
            ReplenishmentCalculator::order_recommendation(None, BufferFlag::Buffer, &input)
                .is_err()
        );

        // 極小批量使倍數超出範圍
        assert!(ReplenishmentCalculator::net_order_quantity(
            Decimal::MAX,
            Decimal::ZERO,
            Decimal::new(1, 10)
        )
        .is_err());
    }

    #[test]
    fn test_net_order_quantity() {
        assert_eq!(net(qty(30), qty(50), Decimal::ZERO), qty(50));
        assert_eq!(net(qty(80), qty(50), Decimal::ZERO), qty(80));
        assert_eq!(net(qty(75), Decimal::ZERO, qty(20)), qty(80));
        assert_eq!(net(qty(75), Decimal::ZERO, Decimal::ZERO), qty(75));
        assert_eq!(net(Decimal::ZERO, qty(50), qty(20)), Decimal::ZERO);
    }

    #[test]
    fn test_for_item_rounds_up() {
        let mut item = Item::new("PLATE-10")
            .with_item_type(ItemType::Raw)
            .with_buffer_flag(BufferFlag::Buffer)
            .with_batch_size(qty(25));
        item.sku_type = Some(SkuType::Pta);

        let input = ReplenishmentInput::new(Decimal::new(125, 1)).with_top_of_green(qty(60));
        // 60 - 12.5 = 47.5 → 批量 25 的倍數 = 50
        assert_eq!(ReplenishmentCalculator::for_item(&item, &input), Ok(qty(50)));
    }
}
