//! Conditional Value at Risk 条件风险价值模块
//!
//! CVaR（Expected Shortfall）是收益率分布左尾的平均值：
//! 先取 `level` 分位数作为 VaR，再对所有不高于 VaR 的收益率求均值。
//!
//! 分位数使用相邻顺序统计量之间的线性插值，因此恒有
//! `min(returns) <= CVaR <= VaR`。
//!
//! # 参考文档
//!
//! <https://www.investopedia.com/terms/c/conditional_value_at_risk.asp>

use crate::statistic::algorithm::{has_undefined, percentile};
use serde::{Deserialize, Serialize};

/// 看板使用的尾部置信水平：最差的 5%。
pub const DEFAULT_CVAR_LEVEL: f64 = 0.05;

/// 收益率序列在某个尾部水平上的 VaR 与 CVaR。
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct ConditionalValueAtRisk {
    /// 尾部均值（CVaR）。
    pub value: f64,
    /// `level` 分位数（VaR）。
    pub value_at_risk: f64,
    /// 尾部水平，例如 0.05。
    pub level: f64,
}

impl ConditionalValueAtRisk {
    /// 计算 `returns` 在 `level` 尾部水平上的 [`ConditionalValueAtRisk`]。
    ///
    /// `returns` 为空或包含未定义值时，`value` 与 `value_at_risk` 均为 `NaN`。
    pub fn calculate(returns: &[f64], level: f64) -> Self {
        if returns.is_empty() || has_undefined(returns) {
            return Self {
                value: f64::NAN,
                value_at_risk: f64::NAN,
                level,
            };
        }

        let mut sorted = returns.to_vec();
        sorted.sort_by(f64::total_cmp);

        let value_at_risk = percentile(&sorted, level);

        // 升序排列，尾部即为不高于 VaR 的前缀，且至少包含最小值
        let tail_len = sorted.partition_point(|value| *value <= value_at_risk).max(1);
        let tail = &sorted[..tail_len];
        let value = tail.iter().sum::<f64>() / tail.len() as f64;

        Self {
            value,
            value_at_risk,
            level,
        }
    }
}
