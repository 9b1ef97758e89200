//! Rolling 滚动窗口统计模块
//!
//! 对收益率表的每一列，在长度为 `window` 的滑动窗口 `[t - window + 1, t]` 上计算统计量。
//!
//! # 核心概念
//!
//! - **RollingStatistic**: 窗口内计算的统计量（累计收益、波动率、CVaR、Sharpe）
//! - **rolling_stats**: 生成滚动统计表，日期从收益率表的第 `window` 行开始
//!
//! 窗口未满的行不出现在结果中；窗口内存在 `NaN` 时该行结果为 `NaN`。

use crate::statistic::{
    algorithm::{Moments, compound},
    metric::{
        cvar::{ConditionalValueAtRisk, DEFAULT_CVAR_LEVEL},
        sharpe::SharpeRatio,
        volatility::Volatility,
    },
    time::{Annual252, Daily},
};
use derive_more::Display;
use serde::{Deserialize, Serialize};
use stockdash_data::table::{DataTable, ReturnsTable};
use tracing::debug;

/// 3 个月滚动窗口（交易日）。
pub const WINDOW_3M: usize = 63;

/// 6 个月滚动窗口（交易日）。
pub const WINDOW_6M: usize = 126;

/// 滚动统计结果表，每个股票代码一列。
pub type RollingStat = DataTable;

/// 在滚动窗口内计算的统计量。
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Display)]
pub enum RollingStatistic {
    /// 窗口内的复合收益 `Π(1 + r) - 1`，每个窗口重新计算。
    #[serde(rename = "cum_ret")]
    #[display("cum_ret")]
    CumulativeReturn,
    /// 年化波动率：样本标准差 × √252。
    #[serde(rename = "vol")]
    #[display("vol")]
    Volatility,
    /// 5% 条件风险价值。
    #[serde(rename = "cvar")]
    #[display("cvar")]
    Cvar,
    /// 年化 Sharpe：均值 / 样本标准差 × √252，无风险收益率为 0。
    #[serde(rename = "sr")]
    #[display("sr")]
    Sharpe,
}

impl RollingStatistic {
    /// 在一个完整窗口上计算统计量。
    pub fn apply(&self, window: &[f64]) -> f64 {
        match self {
            Self::CumulativeReturn => compound(window),
            Self::Volatility => {
                let moments = Moments::from_values(window);
                Volatility::calculate(&moments, Daily)
                    .scale(Annual252)
                    .value
            }
            Self::Cvar => ConditionalValueAtRisk::calculate(window, DEFAULT_CVAR_LEVEL).value,
            Self::Sharpe => {
                let moments = Moments::from_values(window);
                SharpeRatio::calculate(0.0, moments.mean(), moments.sample_std_dev(), Daily)
                    .scale(Annual252)
                    .value
            }
        }
    }
}

/// 计算收益率表每一列在 `window` 个交易日滑动窗口上的 `statistic`。
///
/// 结果的第一个日期是收益率表的第 `window` 行（下标 `window - 1`）。
/// `window` 为 0 或大于行数时，返回只有列名、没有行的表。
pub fn rolling_stats(
    returns: &ReturnsTable,
    window: usize,
    statistic: RollingStatistic,
) -> RollingStat {
    if window == 0 || window > returns.num_rows() {
        debug!(
            window,
            rows = returns.num_rows(),
            %statistic,
            "rolling window never fills, returning empty table"
        );
        return returns.derive(returns.num_rows(), |_| Vec::new());
    }

    returns.derive(window - 1, |values| {
        values
            .windows(window)
            .map(|slice| statistic.apply(slice))
            .collect()
    })
}
