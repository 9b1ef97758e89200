//! 平均收益率
//!
//! 摘要表的 "Annual Return" 列：日平均收益率按 252 个交易日线性放大，即 `mean * 252`。

use crate::statistic::time::TimeInterval;
use serde::{Deserialize, Serialize};

/// 以 `Interval` 为周期的平均收益率。
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct RateOfReturn<Interval> {
    /// 收益率值。
    pub value: f64,
    /// 时间间隔。
    pub interval: Interval,
}

impl<Interval> RateOfReturn<Interval>
where
    Interval: TimeInterval,
{
    /// 日平均收益率等输入已经是 `returns_period` 周期的均值，直接包装。
    pub fn calculate(mean_return: f64, returns_period: Interval) -> Self {
        Self {
            value: mean_return,
            interval: returns_period,
        }
    }

    /// 按周期数线性缩放到 `target`，不做复利。
    pub fn scale<TargetInterval>(self, target: TargetInterval) -> RateOfReturn<TargetInterval>
    where
        TargetInterval: TimeInterval,
    {
        RateOfReturn {
            value: self.value * self.interval.periods_in(target),
            interval: target,
        }
    }
}
