//! Returns 收益率与派生序列模块
//!
//! 从 [`PriceTable`] 派生收益率、累计收益与回撤。所有函数都是纯变换，
//! 保留列顺序，缺失数据以 `NaN` 传播而不是报错。

use crate::statistic::metric::drawdown::DrawdownGenerator;
use itertools::Itertools;
use stockdash_data::table::{DataTable, PriceTable, ReturnsTable};

/// 日简单收益率：`r[t] = p[t] / p[t - 1] - 1`，从第 1 个交易日开始。
///
/// 第 0 行被丢弃；任一价格缺失或除零时收益率为 `NaN`。
///
/// ```rust
/// use stockdash::statistic::returns::prep_returns;
/// use stockdash_data::{Ticker, table::DataTable};
/// use chrono::NaiveDate;
///
/// let dates = (2..=4).map(|day| NaiveDate::from_ymd_opt(2024, 1, day).unwrap()).collect();
/// let prices = DataTable::new(dates, [(Ticker::new("AAPL"), vec![100.0, 110.0, 99.0])]).unwrap();
///
/// let returns = prep_returns(&prices);
/// let column = returns.column("AAPL").unwrap();
/// assert!((column[0] - 0.10).abs() < 1e-12);
/// assert!((column[1] + 0.10).abs() < 1e-12);
/// ```
pub fn prep_returns(prices: &PriceTable) -> ReturnsTable {
    prices.derive(1, |values| {
        values
            .iter()
            .tuple_windows()
            .map(|(previous, next)| defined_or_nan(next / previous - 1.0))
            .collect()
    })
}

/// 相对第一个有效价格的累计收益：`p[t] / p[base] - 1`。
///
/// 基准行为 0，基准之前以及价格缺失处为 `NaN`。
pub fn cumulative_return(prices: &PriceTable) -> DataTable {
    prices.derive(0, |values| {
        let Some(base) = values.iter().copied().find(|value| !value.is_nan()) else {
            return vec![f64::NAN; values.len()];
        };

        values
            .iter()
            .map(|value| defined_or_nan(value / base - 1.0))
            .collect()
    })
}

/// 收益率的运行复合：`Π(1 + r) - 1`。
///
/// `NaN` 收益率在该行输出 `NaN`，但不中断复合，之后的行继续累积。
pub fn compound_returns(returns: &ReturnsTable) -> DataTable {
    returns.derive(0, |values| {
        values
            .iter()
            .scan(1.0, |growth, value| {
                if value.is_nan() {
                    return Some(f64::NAN);
                }
                *growth *= 1.0 + value;
                Some(*growth - 1.0)
            })
            .collect()
    })
}

/// 价格相对运行峰值的回撤：`p[t] / max(p[..=t]) - 1`，恒 `<= 0`。
pub fn drawdown(prices: &PriceTable) -> DataTable {
    prices.derive(0, DrawdownGenerator::series)
}

fn defined_or_nan(value: f64) -> f64 {
    if value.is_finite() { value } else { f64::NAN }
}
