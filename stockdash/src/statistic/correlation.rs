//! Correlation 相关系数模块
//!
//! 逐对计算收益率的 Pearson 相关系数，只使用两列同时有效的行（pairwise-complete）。

use serde::{Deserialize, Serialize};
use stockdash_data::{Ticker, table::ReturnsTable};

/// 有序股票代码标签与对应的相关系数方阵。
///
/// ## 不变量
///
/// - `values` 是 `tickers.len() x tickers.len()` 的对称方阵
/// - 对角线为 1（该列没有足够数据或方差为零时为 `NaN`）
/// - 非 `NaN` 元素位于 `[-1, 1]`
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct CorrelationMatrix {
    pub tickers: Vec<Ticker>,
    pub values: Vec<Vec<f64>>,
}

impl CorrelationMatrix {
    /// 查找一对股票代码的相关系数。
    pub fn get(&self, row: &str, column: &str) -> Option<f64> {
        let row = self.tickers.iter().position(|ticker| ticker == row)?;
        let column = self.tickers.iter().position(|ticker| ticker == column)?;
        Some(self.values[row][column])
    }

    pub fn len(&self) -> usize {
        self.tickers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tickers.is_empty()
    }
}

/// 计算收益率表各列两两之间的 Pearson 相关系数矩阵。
///
/// 共同有效观测少于 2 个，或任一列在共同行上方差为零时，该对的相关系数为 `NaN`。
pub fn correlation_matrix(returns: &ReturnsTable) -> CorrelationMatrix {
    let columns = returns.columns().collect::<Vec<_>>();
    let len = columns.len();

    let mut values = vec![vec![f64::NAN; len]; len];
    for row in 0..len {
        for column in row..len {
            let correlation = pearson(columns[row].1, columns[column].1);
            let correlation = match (row == column, correlation.is_nan()) {
                (_, true) => f64::NAN,
                (true, false) => 1.0,
                (false, false) => correlation.clamp(-1.0, 1.0),
            };
            values[row][column] = correlation;
            values[column][row] = correlation;
        }
    }

    CorrelationMatrix {
        tickers: columns.into_iter().map(|(ticker, _)| ticker.clone()).collect(),
        values,
    }
}

/// 两列在共同有效行上的 Pearson 相关系数。
fn pearson(a: &[f64], b: &[f64]) -> f64 {
    let pairs = a
        .iter()
        .zip(b)
        .filter(|(a, b)| a.is_finite() && b.is_finite())
        .map(|(a, b)| (*a, *b))
        .collect::<Vec<_>>();

    if pairs.len() < 2 {
        return f64::NAN;
    }

    let count = pairs.len() as f64;
    let (sum_a, sum_b) = pairs
        .iter()
        .fold((0.0, 0.0), |(sum_a, sum_b), (a, b)| (sum_a + a, sum_b + b));
    let (mean_a, mean_b) = (sum_a / count, sum_b / count);

    let (covariance, variance_a, variance_b) =
        pairs
            .iter()
            .fold((0.0, 0.0, 0.0), |(covariance, variance_a, variance_b), (a, b)| {
                let (delta_a, delta_b) = (a - mean_a, b - mean_b);
                (
                    covariance + delta_a * delta_b,
                    variance_a + delta_a * delta_a,
                    variance_b + delta_b * delta_b,
                )
            });

    if variance_a == 0.0 || variance_b == 0.0 {
        return f64::NAN;
    }

    covariance / (variance_a.sqrt() * variance_b.sqrt())
}
