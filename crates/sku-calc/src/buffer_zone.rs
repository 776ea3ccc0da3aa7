//! 緩衝區間狀態（顏色）
//!
//! 百分比對應顏色：0% 黑、1–34% 紅、35–67% 黃、68–100% 綠、超過 100% 白。

use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use sku_core::Item;
use std::fmt;

/// 緩衝區間顏色
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum BufferZone {
    Black,
    Red,
    Yellow,
    Green,
    White,
}

impl BufferZone {
    pub const ALL: [BufferZone; 5] = [
        BufferZone::Black,
        BufferZone::Red,
        BufferZone::Yellow,
        BufferZone::Green,
        BufferZone::White,
    ];

    /// 庫存狀態百分比對應的顏色（不大於 0 為黑）
    pub fn from_stock_percent(percent: i64) -> Self {
        match percent {
            i64::MIN..=0 => BufferZone::Black,
            1..=34 => BufferZone::Red,
            35..=67 => BufferZone::Yellow,
            68..=100 => BufferZone::Green,
            _ => BufferZone::White,
        }
    }

    /// 訂單剩餘時間百分比對應的顏色（已逾期為黑，當天到期為紅）
    pub fn from_order_percent(percent: i64) -> Self {
        match percent {
            i64::MIN..=-1 => BufferZone::Black,
            0..=34 => BufferZone::Red,
            35..=67 => BufferZone::Yellow,
            68..=100 => BufferZone::Green,
            _ => BufferZone::White,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            BufferZone::Black => "BLACK",
            BufferZone::Red => "RED",
            BufferZone::Yellow => "YELLOW",
            BufferZone::Green => "GREEN",
            BufferZone::White => "WHITE",
        }
    }

    fn index(self) -> usize {
        self as usize
    }
}

impl fmt::Display for BufferZone {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// 現有庫存狀態
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct OnHandStatus {
    pub percent: i64,
    pub zone: BufferZone,
}

impl OnHandStatus {
    /// 現有庫存 / (綠區頂端 + 合格需求)，以百分比向上取整
    ///
    /// 分母不大於 0 或數值超出範圍時無法計算，返回 None。
    pub fn calculate(
        on_hand: Decimal,
        top_of_green: Decimal,
        qualified_demand: Decimal,
    ) -> Option<Self> {
        let denominator = top_of_green.checked_add(qualified_demand)?;
        if denominator <= Decimal::ZERO {
            return None;
        }

        let percent = on_hand
            .checked_mul(Decimal::ONE_HUNDRED)?
            .checked_div(denominator)?
            .ceil()
            .to_i64()?;
        Some(Self {
            percent,
            zone: BufferZone::from_stock_percent(percent),
        })
    }

    /// 只有緩衝物料才有庫存狀態；綠區頂端即安全庫存
    pub fn for_item(item: &Item, on_hand: Decimal, qualified_demand: Decimal) -> Option<Self> {
        if !item.is_buffer() {
            return None;
        }
        Self::calculate(
            on_hand,
            item.safety_stock.unwrap_or(Decimal::ZERO),
            qualified_demand,
        )
    }
}

impl fmt::Display for OnHandStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}%", self.percent)
    }
}

/// 未結銷售訂單的緩衝狀態
///
/// 剩餘天數 = 交期 - 今天，訂單提前期 = 交期 - 下單日（日曆天）。
/// 缺少任一日期時為黑。
pub fn order_status(
    transaction_date: Option<NaiveDate>,
    delivery_date: Option<NaiveDate>,
    today: NaiveDate,
) -> BufferZone {
    let (Some(transaction_date), Some(delivery_date)) = (transaction_date, delivery_date) else {
        return BufferZone::Black;
    };

    let remaining_days = (delivery_date - today).num_days();
    let lead_time = (delivery_date - transaction_date).num_days();

    let percent = if remaining_days == 0 {
        Decimal::ZERO
    } else if lead_time > 0 {
        Decimal::from(remaining_days) * Decimal::ONE_HUNDRED / Decimal::from(lead_time)
    } else {
        Decimal::from(remaining_days) * Decimal::ONE_HUNDRED
    };

    match percent.ceil().to_i64() {
        Some(percent) => BufferZone::from_order_percent(percent),
        None => BufferZone::Black,
    }
}

/// 單一顏色的統計
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct ZoneShare {
    pub zone: BufferZone,
    pub count: usize,
    /// 四捨五入（銀行家捨入）後的整數百分比
    pub percentage: u32,
}

/// 顏色分佈統計
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ZoneCounts {
    counts: [usize; 5],
}

impl ZoneCounts {
    pub fn new() -> Self {
        Self::default()
    }

    /// 計入一筆；無法計算狀態（None）的項目計為黑
    pub fn add(&mut self, zone: Option<BufferZone>) {
        let zone = zone.unwrap_or(BufferZone::Black);
        self.counts[zone.index()] += 1;
    }

    pub fn count(&self, zone: BufferZone) -> usize {
        self.counts[zone.index()]
    }

    pub fn total(&self) -> usize {
        self.counts.iter().sum()
    }

    /// 各顏色的數量與百分比（省略數量為 0 的顏色）
    pub fn shares(&self) -> Vec<ZoneShare> {
        let total = self.total();
        if total == 0 {
            return Vec::new();
        }

        BufferZone::ALL
            .into_iter()
            .filter(|zone| self.count(*zone) > 0)
            .map(|zone| {
                let count = self.count(zone);
                let percentage = (Decimal::from(count) * Decimal::ONE_HUNDRED
                    / Decimal::from(total))
                .round()
                .to_u32()
                .unwrap_or(0);
                ZoneShare {
                    zone,
                    count,
                    percentage,
                }
            })
            .collect()
    }
}

impl FromIterator<Option<BufferZone>> for ZoneCounts {
    fn from_iter<T: IntoIterator<Item = Option<BufferZone>>>(iter: T) -> Self {
        let mut counts = ZoneCounts::new();
        for zone in iter {
            counts.add(zone);
        }
        counts
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;
    use sku_core::BufferFlag;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[rstest]
    #[case(-5, BufferZone::Black)]
    #[case(0, BufferZone::Black)]
    #[case(1, BufferZone::Red)]
    #[case(34, BufferZone::Red)]
    #[case(35, BufferZone::Yellow)]
    #[case(67, BufferZone::Yellow)]
    #[case(68, BufferZone::Green)]
    #[case(100, BufferZone::Green)]
    #[case(101, BufferZone::White)]
    fn test_stock_zone_bounds(#[case] percent: i64, #[case] expected: BufferZone) {
        assert_eq!(BufferZone::from_stock_percent(percent), expected);
    }

    #[test]
    fn test_on_hand_status() {
        // 50 / (90 + 10) = 50%
        let status =
            OnHandStatus::calculate(Decimal::from(50), Decimal::from(90), Decimal::from(10))
                .unwrap();
        assert_eq!(status.percent, 50);
        assert_eq!(status.zone, BufferZone::Yellow);
        assert_eq!(status.to_string(), "50%");

        // 10 / 30 = 33.33% → 34%
        let status =
            OnHandStatus::calculate(Decimal::from(10), Decimal::from(30), Decimal::ZERO).unwrap();
        assert_eq!(status.percent, 34);
        assert_eq!(status.zone, BufferZone::Red);

        assert_eq!(
            OnHandStatus::calculate(Decimal::from(10), Decimal::ZERO, Decimal::ZERO),
            None
        );
    }

    #[test]
    fn test_on_hand_status_out_of_range() {
        assert_eq!(OnHandStatus::calculate(Decimal::MAX, Decimal::ONE, Decimal::ZERO), None);
        assert_eq!(OnHandStatus::calculate(Decimal::ONE, Decimal::MAX, Decimal::MAX), None);
        // 極小分母使百分比超出 i64
        assert_eq!(
            OnHandStatus::calculate(Decimal::from(i64::MAX), Decimal::new(1, 20), Decimal::ZERO),
            None
        );
    }

    #[test]
    fn test_on_hand_status_only_for_buffer_items() {
        let item = Item::new("RND-50").with_safety_stock(Decimal::from(100));
        assert_eq!(OnHandStatus::for_item(&item, Decimal::from(120), Decimal::ZERO), None);

        let item = item.with_buffer_flag(BufferFlag::Buffer);
        let status = OnHandStatus::for_item(&item, Decimal::from(120), Decimal::ZERO).unwrap();
        assert_eq!(status.zone, BufferZone::White);
    }

    #[test]
    fn test_order_status() {
        let today = date(2025, 11, 10);

        // 下單 11/01，交期 11/11：剩餘 1 天 / 提前期 10 天 = 10% → 紅
        assert_eq!(
            order_status(Some(date(2025, 11, 1)), Some(date(2025, 11, 11)), today),
            BufferZone::Red
        );
        // 剩餘 8 天 / 10 天 = 80% → 綠
        assert_eq!(
            order_status(Some(date(2025, 11, 8)), Some(date(2025, 11, 18)), today),
            BufferZone::Green
        );
        // 今天到期 → 紅
        assert_eq!(
            order_status(Some(date(2025, 11, 1)), Some(today), today),
            BufferZone::Red
        );
        // 已逾期 → 黑
        assert_eq!(
            order_status(Some(date(2025, 11, 1)), Some(date(2025, 11, 5)), today),
            BufferZone::Black
        );
        // 缺少日期 → 黑
        assert_eq!(order_status(None, Some(today), today), BufferZone::Black);
        // 同日下單與交期（提前期 0）：剩餘 2 天 × 100 → 白
        assert_eq!(
            order_status(Some(date(2025, 11, 12)), Some(date(2025, 11, 12)), today),
            BufferZone::White
        );
    }

    #[test]
    fn test_zone_counts() {
        let counts: ZoneCounts = [
            Some(BufferZone::Red),
            Some(BufferZone::Red),
            None,
            Some(BufferZone::Green),
            Some(BufferZone::Green),
            Some(BufferZone::Green),
            Some(BufferZone::Black),
            Some(BufferZone::White),
        ]
        .into_iter()
        .collect();

        assert_eq!(counts.total(), 8);
        assert_eq!(counts.count(BufferZone::Black), 2);

        let shares = counts.shares();
        let zones: Vec<_> = shares.iter().map(|s| (s.zone, s.count, s.percentage)).collect();
        assert_eq!(
            zones,
            vec![
                (BufferZone::Black, 2, 25),
                (BufferZone::Red, 2, 25),
                (BufferZone::Green, 3, 38),
                (BufferZone::White, 1, 12),
            ]
        );
        assert!(ZoneCounts::new().shares().is_empty());
    }
}
