//! Volatility 波动率模块
//!
//! 波动率是收益率的样本标准差（n - 1），按 `sqrt(target / current)` 缩放，
//! 日波动率乘以 `sqrt(252)` 即年化波动率。

use crate::statistic::{algorithm::Moments, time::TimeInterval};
use serde::{Deserialize, Serialize};

/// 表示特定 [`TimeInterval`] 上的波动率。
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct Volatility<Interval> {
    /// 收益率标准差，少于 2 个观测值时为 `NaN`。
    pub value: f64,
    /// 时间间隔。
    pub interval: Interval,
}

impl<Interval> Volatility<Interval>
where
    Interval: TimeInterval,
{
    /// 从 `returns_period` 上收益率的 [`Moments`] 计算 [`Volatility`]。
    pub fn calculate(moments: &Moments, returns_period: Interval) -> Self {
        Self {
            value: moments.sample_std_dev(),
            interval: returns_period,
        }
    }

    /// 将 [`Volatility`] 缩放到 `target` 间隔，假设收益率独立同分布。
    pub fn scale<TargetInterval>(self, target: TargetInterval) -> Volatility<TargetInterval>
    where
        TargetInterval: TimeInterval,
    {
        Volatility {
            value: self.value * self.interval.periods_in(target).sqrt(),
            interval: target,
        }
    }
}
