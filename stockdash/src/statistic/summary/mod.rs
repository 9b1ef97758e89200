//! Summary 统计摘要模块
//!
//! 对收益率表中的每个股票代码生成一行风险收益统计摘要。
//!
//! # 核心概念
//!
//! - **SummaryRow**: 单个股票代码的统计摘要
//! - **SummaryTable**: 有序列名与逐股票代码的摘要行
//!
//! 摘要只使用有效（非 `NaN`）收益率。没有有效观测值的股票代码依然保留一行，
//! 所有统计量为 `NaN`。

use crate::statistic::{
    algorithm::{Moments, compound, defined_values},
    metric::{
        cvar::{ConditionalValueAtRisk, DEFAULT_CVAR_LEVEL},
        drawdown::MaxDrawdown,
        rate_of_return::RateOfReturn,
        sharpe::SharpeRatio,
        volatility::Volatility,
    },
    time::{Daily, TimeInterval},
};
use serde::{Deserialize, Serialize};
use stockdash_data::{Ticker, table::ReturnsTable};
use tracing::debug;

/// 终端表格与 HTML 表格输出。
pub mod display;

/// 摘要表的列名，顺序与 [`SummaryRow::values`] 一致，第一列为股票代码标签。
pub const SUMMARY_COLUMNS: [&str; 7] = [
    "Ticker",
    "Total Return",
    "Annual Return",
    "Annual Volatility",
    "Sharpe Ratio",
    "Max Drawdown",
    "CVaR (5%)",
];

/// 单个股票代码的风险收益统计摘要。
///
/// ## 字段说明
///
/// - **total_return**: 整个区间的复合收益
/// - **mean_return**: 平均日收益率线性缩放到 `Interval`
/// - **volatility**: 样本标准差按平方根缩放到 `Interval`
/// - **sharpe_ratio**: 年化均值 / 年化波动率，无风险收益率为 0
/// - **max_drawdown**: 复合权益曲线的最深回撤
/// - **cvar**: 整个区间的 5% CVaR（日收益率，不缩放）
///
/// 所有统计量只使用有效收益率，`NaN` 被直接跳过而不是补齐。价格缺失时，跨越缺口的
/// 价格变动不计入 `total_return` 与 `max_drawdown`：价格 `[100, 110, NaN, 55, 60]`
/// 的有效收益率只有 `+10%` 与 `+9.09%`，摘要回撤为 0，而基于价格的
/// [`drawdown`](crate::statistic::returns::drawdown) 为 -50%。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SummaryRow<Interval> {
    pub ticker: Ticker,
    pub observations: usize,
    pub total_return: f64,
    pub mean_return: RateOfReturn<Interval>,
    pub volatility: Volatility<Interval>,
    pub sharpe_ratio: SharpeRatio<Interval>,
    pub max_drawdown: MaxDrawdown,
    pub cvar: ConditionalValueAtRisk,
}

impl<Interval> SummaryRow<Interval>
where
    Interval: TimeInterval,
{
    /// 从单个股票代码的日收益率生成摘要行，统计量缩放到 `interval`。
    pub fn generate(ticker: Ticker, returns: &[f64], interval: Interval) -> Self {
        let returns = defined_values(returns);
        let moments = Moments::from_values(&returns);

        // 权益曲线从 1 开始，首日亏损也计入回撤
        let equity = std::iter::once(1.0)
            .chain(returns.iter().scan(1.0, |growth, value| {
                *growth *= 1.0 + value;
                Some(*growth)
            }))
            .collect::<Vec<_>>();

        let (total_return, max_drawdown) = match returns.is_empty() {
            true => (f64::NAN, MaxDrawdown(f64::NAN)),
            false => (compound(&returns), MaxDrawdown::from_equity(&equity)),
        };

        let mean_return = RateOfReturn::calculate(moments.mean(), Daily).scale(interval);
        let volatility = Volatility::calculate(&moments, Daily).scale(interval);
        let sharpe_ratio =
            SharpeRatio::calculate(0.0, moments.mean(), moments.sample_std_dev(), Daily)
                .scale(interval);

        Self {
            ticker,
            observations: moments.count,
            total_return,
            mean_return,
            volatility,
            sharpe_ratio,
            max_drawdown,
            cvar: ConditionalValueAtRisk::calculate(&returns, DEFAULT_CVAR_LEVEL),
        }
    }

    /// 按 [`SUMMARY_COLUMNS`] 顺序（不含 "Ticker"）返回统计量。
    pub fn values(&self) -> [f64; 6] {
        [
            self.total_return,
            self.mean_return.value,
            self.volatility.value,
            self.sharpe_ratio.value,
            self.max_drawdown.0,
            self.cvar.value,
        ]
    }
}

/// 有序列名与逐股票代码摘要行组成的统计摘要表。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct SummaryTable<Interval> {
    pub interval: Interval,
    pub rows: Vec<SummaryRow<Interval>>,
}

impl<Interval> SummaryTable<Interval>
where
    Interval: TimeInterval,
{
    /// 摘要表列名。
    pub fn columns(&self) -> &'static [&'static str] {
        &SUMMARY_COLUMNS
    }

    pub fn rows(&self) -> &[SummaryRow<Interval>] {
        &self.rows
    }

    /// 按股票代码查找摘要行。
    pub fn row(&self, ticker: &str) -> Option<&SummaryRow<Interval>> {
        self.rows.iter().find(|row| row.ticker == ticker)
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 为收益率表的每一列生成一行摘要，统计量缩放到 `interval`。
pub fn summary<Interval>(returns: &ReturnsTable, interval: Interval) -> SummaryTable<Interval>
where
    Interval: TimeInterval,
{
    let rows = returns
        .columns()
        .map(|(ticker, values)| SummaryRow::generate(ticker.clone(), values, interval))
        .collect::<Vec<_>>();

    debug!(
        tickers = rows.len(),
        rows = returns.num_rows(),
        interval = %interval.name(),
        "generated SummaryTable"
    );

    SummaryTable { interval, rows }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        statistic::{
            returns::{drawdown, prep_returns},
            time::Annual252,
        },
        test_utils::{assert_approx, synthetic_returns, table},
    };

    #[test]
    fn test_summary_one_row_per_ticker() {
        let returns = table(vec![
            ("AAPL", synthetic_returns(100, 1, 0.001)),
            ("MSFT", synthetic_returns(100, 2, 0.0)),
            ("EMPTY", vec![f64::NAN; 100]),
        ]);

        let actual = summary(&returns, Annual252);

        assert_eq!(actual.rows().len(), 3);
        assert_eq!(
            actual.rows().iter().map(|row| row.ticker.as_str()).collect::<Vec<_>>(),
            vec!["AAPL", "MSFT", "EMPTY"]
        );
        assert_eq!(actual.columns()[0], "Ticker");

        let empty = actual.row("EMPTY").unwrap();
        assert_eq!(empty.observations, 0);
        assert!(empty.values().iter().all(|value| value.is_nan()));
    }

    #[test]
    fn test_summary_row_values() {
        // equity: 1.0 -> 1.1 -> 0.88 -> 0.968
        let returns = [0.1, -0.2, f64::NAN, 0.1];

        let actual = SummaryRow::generate(Ticker::new("AAPL"), &returns, Annual252);

        let mean = 0.0;
        let std = ((0.01 + 0.04 + 0.01) / 2.0_f64).sqrt();

        assert_eq!(actual.observations, 3);
        assert_approx(actual.total_return, -0.032, 1e-12, "total");
        assert_approx(actual.mean_return.value, mean * 252.0, 1e-12, "mean");
        assert_approx(actual.volatility.value, std * 252_f64.sqrt(), 1e-12, "vol");
        assert_approx(actual.sharpe_ratio.value, 0.0, 1e-12, "sharpe");
        assert_approx(actual.max_drawdown.0, -0.2, 1e-12, "max drawdown");
        assert_approx(actual.cvar.value, -0.2, 1e-12, "cvar");
    }

    #[test]
    fn test_summary_sharpe_equals_annual_return_over_volatility() {
        let returns = synthetic_returns(252, 9, 0.002);

        let actual = SummaryRow::generate(Ticker::new("AAPL"), &returns, Annual252);

        assert_approx(
            actual.sharpe_ratio.value,
            actual.mean_return.value / actual.volatility.value,
            1e-9,
            "sharpe",
        );
    }

    #[test]
    fn test_summary_first_day_loss_counts_as_drawdown() {
        let actual = SummaryRow::generate(Ticker::new("AAPL"), &[-0.1, 0.05], Annual252);
        assert_approx(actual.max_drawdown.0, -0.1, 1e-12, "max drawdown");
    }

    #[test]
    fn test_summary_skips_moves_across_missing_prices() {
        let prices = table(vec![("AAPL", vec![100.0, 110.0, f64::NAN, 55.0, 60.0])]);
        let returns = prep_returns(&prices);

        let actual = summary(&returns, Annual252);
        let row = actual.row("AAPL").unwrap();

        assert_eq!(row.observations, 2);
        assert_approx(row.total_return, 0.2, 1e-12, "total");
        assert_approx(row.max_drawdown.0, 0.0, 1e-12, "max drawdown");

        let price_drawdown = drawdown(&prices);
        assert_approx(
            MaxDrawdown::calculate(price_drawdown.column("AAPL").unwrap()).0,
            -0.5,
            1e-12,
            "price drawdown",
        );
    }

    #[test]
    fn test_summary_constant_returns_has_nan_sharpe() {
        let actual = SummaryRow::generate(Ticker::new("AAPL"), &[0.01; 10], Annual252);
        assert_eq!(actual.volatility.value, 0.0);
        assert!(actual.sharpe_ratio.value.is_nan());
    }
}
