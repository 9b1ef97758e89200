//! Sharpe 比率
//!
//! 每单位波动获得的超额收益：`(mean - risk_free) / std`。
//! 看板的滚动窗口与摘要表都取无风险收益率为 0，日度 Sharpe 乘以 `sqrt(252)` 得到年化值。

use crate::statistic::time::TimeInterval;
use serde::{Deserialize, Serialize};

/// 以 `Interval` 为收益率周期的 Sharpe 比率。
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct SharpeRatio<Interval> {
    /// Sharpe Ratio 值，标准差为零或未定义时为 `NaN`。
    pub value: f64,
    /// 时间间隔。
    pub interval: Interval,
}

impl<Interval> SharpeRatio<Interval>
where
    Interval: TimeInterval,
{
    /// 由同一周期 `returns_period` 的平均收益率与收益率标准差计算 Sharpe 比率。
    ///
    /// 标准差为零（例如窗口内收益率全部相同）时返回 `NaN`，`NaN` 输入照常传播。
    pub fn calculate(
        risk_free_return: f64,
        mean_return: f64,
        std_dev_returns: f64,
        returns_period: Interval,
    ) -> Self {
        let value = if std_dev_returns == 0.0 {
            f64::NAN
        } else {
            (mean_return - risk_free_return) / std_dev_returns
        };

        Self {
            value,
            interval: returns_period,
        }
    }

    /// 按 `sqrt(target / current)` 缩放到 `target` 周期，例如日度到 252 交易日年化。
    pub fn scale<TargetInterval>(self, target: TargetInterval) -> SharpeRatio<TargetInterval>
    where
        TargetInterval: TimeInterval,
    {
        let scale = self.interval.periods_in(target).sqrt();

        SharpeRatio {
            value: self.value * scale,
            interval: target,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        statistic::time::{Annual252, Daily},
        test_utils::assert_approx,
    };
    use chrono::TimeDelta;

    #[test]
    fn test_sharpe_ratio_with_zero_std_dev() {
        let actual = SharpeRatio::calculate(0.0, 0.01, 0.0, Daily);
        assert!(actual.value.is_nan());
    }

    #[test]
    fn test_sharpe_ratio_calculate() {
        struct TestCase {
            risk_free_return: f64,
            mean_return: f64,
            std_dev_returns: f64,
            expected: f64,
        }

        let cases = vec![
            // TC0: positive excess return
            TestCase {
                risk_free_return: 0.0015,
                mean_return: 0.0025,
                std_dev_returns: 0.02,
                expected: 0.05,
            },
            // TC1: negative excess return
            TestCase {
                risk_free_return: 0.0,
                mean_return: -0.001,
                std_dev_returns: 0.02,
                expected: -0.05,
            },
            // TC2: undefined std dev propagates
            TestCase {
                risk_free_return: 0.0,
                mean_return: 0.001,
                std_dev_returns: f64::NAN,
                expected: f64::NAN,
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = SharpeRatio::calculate(
                test.risk_free_return,
                test.mean_return,
                test.std_dev_returns,
                Daily,
            );
            assert_approx(actual.value, test.expected, 1e-12, &format!("TC{index} failed"));
        }
    }

    #[test]
    fn test_sharpe_ratio_scale_daily_to_annual() {
        let daily = SharpeRatio {
            value: 0.05,
            interval: Daily,
        };

        let actual = daily.scale(Annual252);

        assert_approx(actual.value, 0.7937253933193772, 1e-12, "annualised");
        assert_eq!(actual.interval, Annual252);
    }

    #[test]
    fn test_sharpe_ratio_scale_custom_interval() {
        let weekly = SharpeRatio {
            value: 0.1,
            interval: TimeDelta::days(7),
        };

        let actual = weekly.scale(TimeDelta::days(28));

        assert_approx(actual.value, 0.2, 1e-12, "four weeks");
    }
}
