//! Drawdown 回撤模块
//!
//! 回撤是价值相对其历史峰值的下降，以负的比例表示：`value / peak - 1`。
//!
//! # 核心概念
//!
//! - **DrawdownGenerator**: 跟踪运行峰值，逐个生成回撤值
//! - **MaxDrawdown**: 回撤序列中的最小值（最深回撤）
//!
//! 峰值从不重置，`NaN` 值被跳过（不更新峰值，对应回撤为 `NaN`）。
//!
//! # 参考文档
//!
//! <https://www.investopedia.com/terms/d/drawdown.asp>

use serde::{Deserialize, Serialize};

/// 回撤生成器，跟踪运行峰值。
#[derive(Debug, Copy, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct DrawdownGenerator {
    /// 到目前为止的最大值，尚未观测到有效值时为 `None`。
    pub peak: Option<f64>,
}

impl DrawdownGenerator {
    /// 加入下一个值并返回它相对运行峰值的回撤（`<= 0`）。
    ///
    /// `value` 为 `NaN` 时返回 `NaN`，峰值保持不变。
    pub fn update(&mut self, value: f64) -> f64 {
        if value.is_nan() {
            return f64::NAN;
        }

        let peak = match self.peak {
            Some(peak) if peak >= value => peak,
            _ => {
                self.peak = Some(value);
                value
            }
        };

        let drawdown = value / peak - 1.0;
        if drawdown.is_finite() { drawdown } else { f64::NAN }
    }

    /// 计算整个序列的回撤。
    pub fn series(values: &[f64]) -> Vec<f64> {
        let mut generator = Self::default();
        values.iter().map(|value| generator.update(*value)).collect()
    }
}

/// 最大回撤：回撤序列中的最小值。
#[derive(Debug, Copy, Clone, PartialEq, PartialOrd, Default, Deserialize, Serialize)]
pub struct MaxDrawdown(pub f64);

impl MaxDrawdown {
    /// 从回撤序列计算 [`MaxDrawdown`]，忽略 `NaN`；没有有效值时为 `NaN`。
    pub fn calculate(drawdowns: &[f64]) -> Self {
        let max = drawdowns
            .iter()
            .copied()
            .filter(|drawdown| !drawdown.is_nan())
            .fold(None, |max: Option<f64>, drawdown| {
                Some(max.map_or(drawdown, |max| max.min(drawdown)))
            });

        Self(max.unwrap_or(f64::NAN))
    }

    /// 从权益曲线（例如累计增长 `Π(1 + r)`）计算 [`MaxDrawdown`]。
    pub fn from_equity(equity: &[f64]) -> Self {
        Self::calculate(&DrawdownGenerator::series(equity))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{assert_approx, assert_series_approx};

    #[test]
    fn test_drawdown_generator_series() {
        struct TestCase {
            values: Vec<f64>,
            expected: Vec<f64>,
        }

        let cases = vec![
            // TC0: empty
            TestCase {
                values: vec![],
                expected: vec![],
            },
            // TC1: monotonically increasing never draws down
            TestCase {
                values: vec![100.0, 101.0, 102.0],
                expected: vec![0.0, 0.0, 0.0],
            },
            // TC2: drawdown then new peak
            TestCase {
                values: vec![100.0, 110.0, 99.0, 88.0, 120.0],
                expected: vec![0.0, 0.0, -0.1, -0.2, 0.0],
            },
            // TC3: NaN skipped, peak preserved
            TestCase {
                values: vec![f64::NAN, 100.0, f64::NAN, 90.0],
                expected: vec![f64::NAN, 0.0, f64::NAN, -0.1],
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = DrawdownGenerator::series(&test.values);
            assert_series_approx(&actual, &test.expected, 1e-12, &format!("TC{index}"));
        }
    }

    #[test]
    fn test_max_drawdown() {
        struct TestCase {
            drawdowns: Vec<f64>,
            expected: f64,
        }

        let cases = vec![
            // TC0: no drawdowns
            TestCase {
                drawdowns: vec![],
                expected: f64::NAN,
            },
            // TC1: only NaN
            TestCase {
                drawdowns: vec![f64::NAN, f64::NAN],
                expected: f64::NAN,
            },
            // TC2: deepest value
            TestCase {
                drawdowns: vec![0.0, -0.1, f64::NAN, -0.25, 0.0],
                expected: -0.25,
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let actual = MaxDrawdown::calculate(&test.drawdowns);
            assert_approx(actual.0, test.expected, 0.0, &format!("TC{index}"));
        }
    }

    #[test]
    fn test_max_drawdown_from_equity() {
        let actual = MaxDrawdown::from_equity(&[1.0, 1.2, 0.9, 1.1, 0.6, 1.3]);
        assert_approx(actual.0, -0.5, 1e-12, "equity");
    }
}
