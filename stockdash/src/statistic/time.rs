//! TimeInterval 时间间隔模块
//!
//! 本模块定义了用于年化计算的时间间隔类型。
//!
//! # 核心概念
//!
//! - **TimeInterval**: Trait，定义时间间隔接口
//! - **Annual252**: 252 个交易日的年化间隔（股票市场）
//! - **Annual365**: 365 天的日历年化间隔
//! - **Daily**: 单个交易日间隔，日收益率的原生间隔

use chrono::TimeDelta;
use serde::{Deserialize, Serialize};
use smol_str::{SmolStr, format_smolstr};
use std::fmt::Debug;

/// 每年的交易日数量。
pub const TRADING_DAYS_PER_YEAR: i64 = 252;

/// 表示用于年化计算的时间间隔类型的 Trait。
///
/// ```rust
/// use stockdash::statistic::time::{TimeInterval, Daily, Annual252};
///
/// assert_eq!(Daily.name().as_str(), "Daily");
/// assert_eq!(Annual252.name().as_str(), "Annual(252)");
/// assert_eq!(Daily.periods_in(Annual252), 252.0);
/// ```
pub trait TimeInterval: Debug + Copy {
    /// 时间间隔的人类可读名称。
    fn name(&self) -> SmolStr;

    /// 时间间隔的持续时间。
    fn interval(&self) -> TimeDelta;

    /// `target` 中包含多少个当前间隔，即 `target / self` 的时长比值。
    ///
    /// 线性指标（收益率）按此比值缩放，波动类指标按其平方根缩放。
    fn periods_in<Target>(&self, target: Target) -> f64
    where
        Target: TimeInterval,
    {
        let target_secs = target.interval().num_seconds().abs() as f64;
        let current_secs = self.interval().num_seconds().abs() as f64;
        target_secs / current_secs
    }
}

/// 252 个交易日的年化间隔。
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct Annual252;

impl TimeInterval for Annual252 {
    fn name(&self) -> SmolStr {
        SmolStr::new("Annual(252)")
    }

    fn interval(&self) -> TimeDelta {
        TimeDelta::days(TRADING_DAYS_PER_YEAR)
    }
}

/// 365 天的日历年化间隔。
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct Annual365;

impl TimeInterval for Annual365 {
    fn name(&self) -> SmolStr {
        SmolStr::new("Annual(365)")
    }

    fn interval(&self) -> TimeDelta {
        TimeDelta::days(365)
    }
}

/// 单个交易日间隔。
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct Daily;

impl TimeInterval for Daily {
    fn name(&self) -> SmolStr {
        SmolStr::new("Daily")
    }

    fn interval(&self) -> TimeDelta {
        TimeDelta::days(1)
    }
}

impl TimeInterval for TimeDelta {
    fn name(&self) -> SmolStr {
        format_smolstr!("Duration {} (days)", self.num_days())
    }

    fn interval(&self) -> TimeDelta {
        *self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_periods_in() {
        assert_eq!(Daily.periods_in(Annual252), 252.0);
        assert_eq!(Daily.periods_in(Annual365), 365.0);
        assert_eq!(Annual252.periods_in(Daily), 1.0 / 252.0);
        assert_eq!(TimeDelta::days(21).periods_in(Annual252), 12.0);
    }
}
