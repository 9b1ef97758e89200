//! Algorithm 统计算法模块
//!
//! 本模块提供了用于分析收益率序列的基础统计算法。
//!
//! # 核心概念
//!
//! - **Welford Online 算法**: 单次遍历计算均值和方差的在线算法
//! - **Moments**: 基于 Welford 的计数、均值与样本方差累加器
//! - **percentile**: 线性插值分位数
//!
//! 所有算法都使用 IEEE-754 `f64`：输入中的 `NaN` 会传播到结果。
//! 需要忽略缺失值的调用方先使用 [`defined_values`] 过滤。

use serde::{Deserialize, Serialize};

/// [Welford Online](https://en.wikipedia.org/wiki/Algorithms_for_calculating_variance#Welford's_online_algorithm)
/// 算法集合，用于单次遍历计算运行中的均值和方差。
///
/// ```rust
/// use stockdash::statistic::algorithm::welford_online;
///
/// let (mut mean, mut m, mut count) = (0.0, 0.0, 0.0);
/// for value in [10.0, 100.0, -10.0] {
///     count += 1.0;
///     let new_mean = welford_online::calculate_mean(mean, value, count);
///     m = welford_online::calculate_recurrence_relation_m(m, mean, value, new_mean);
///     mean = new_mean;
/// }
///
/// let variance = welford_online::calculate_sample_variance(m, count);
/// assert!((variance - 3433.333333333333).abs() < 1e-9);
/// ```
pub mod welford_online {
    /// 计算下一个均值。
    ///
    /// `new_mean = prev_mean + (next_value - prev_mean) / count`
    pub fn calculate_mean<T>(mut prev_mean: T, next_value: T, count: T) -> T
    where
        T: Copy + std::ops::Sub<Output = T> + std::ops::Div<Output = T> + std::ops::AddAssign,
    {
        prev_mean += (next_value - prev_mean) / count;
        prev_mean
    }

    /// 计算下一个 Welford Online 递推关系 M。
    ///
    /// `M = prev_m + (new_value - prev_mean) * (new_value - new_mean)`
    pub fn calculate_recurrence_relation_m(
        prev_m: f64,
        prev_mean: f64,
        new_value: f64,
        new_mean: f64,
    ) -> f64 {
        prev_m + ((new_value - prev_mean) * (new_value - new_mean))
    }

    /// 使用 Bessel 校正（count - 1）计算无偏"样本"方差。
    ///
    /// # 返回值
    ///
    /// 返回样本方差。如果 count < 2，样本方差未定义，返回 `NaN`。
    pub fn calculate_sample_variance(recurrence_relation_m: f64, count: f64) -> f64 {
        match count < 2.0 {
            true => f64::NAN,
            false => recurrence_relation_m / (count - 1.0),
        }
    }
}

/// 一组观测值的计数、均值与 Welford 递推关系 M。
#[derive(Debug, Copy, Clone, PartialEq, Default, Deserialize, Serialize)]
pub struct Moments {
    pub count: usize,
    pub mean: f64,
    pub m: f64,
}

impl Moments {
    /// 单次遍历 `values` 构建 [`Moments`]。
    pub fn from_values(values: &[f64]) -> Self {
        values.iter().fold(Self::default(), |mut moments, value| {
            moments.update(*value);
            moments
        })
    }

    /// 加入下一个观测值。
    pub fn update(&mut self, value: f64) {
        self.count += 1;
        let new_mean = welford_online::calculate_mean(self.mean, value, self.count as f64);
        self.m =
            welford_online::calculate_recurrence_relation_m(self.m, self.mean, value, new_mean);
        self.mean = new_mean;
    }

    /// 算术平均值，没有观测值时为 `NaN`。
    pub fn mean(&self) -> f64 {
        match self.count {
            0 => f64::NAN,
            _ => self.mean,
        }
    }

    /// 样本方差（n - 1），少于 2 个观测值时为 `NaN`。
    pub fn sample_variance(&self) -> f64 {
        welford_online::calculate_sample_variance(self.m, self.count as f64)
    }

    /// 样本标准差（n - 1），少于 2 个观测值时为 `NaN`。
    pub fn sample_std_dev(&self) -> f64 {
        self.sample_variance().sqrt()
    }
}

/// 丢弃未定义的值（`NaN` 与无穷大），保持原有顺序。
pub fn defined_values(values: &[f64]) -> Vec<f64> {
    values.iter().copied().filter(|value| value.is_finite()).collect()
}

/// `values` 中是否存在未定义的值。
pub fn has_undefined(values: &[f64]) -> bool {
    values.iter().any(|value| !value.is_finite())
}

/// 对升序排序的 `sorted` 计算线性插值分位数，`quantile` 取值范围 `[0, 1]`。
///
/// 位置为 `quantile * (n - 1)`，在相邻两个观测值之间线性插值。
/// `sorted` 为空时返回 `NaN`。
pub fn percentile(sorted: &[f64], quantile: f64) -> f64 {
    match sorted.len() {
        0 => f64::NAN,
        1 => sorted[0],
        len => {
            let rank = quantile.clamp(0.0, 1.0) * (len - 1) as f64;
            let lower = rank.floor() as usize;
            let upper = rank.ceil() as usize;
            let weight = rank - lower as f64;
            sorted[lower] + (sorted[upper] - sorted[lower]) * weight
        }
    }
}

/// 复合收益：`Π(1 + r) - 1`。
pub fn compound(returns: &[f64]) -> f64 {
    returns.iter().fold(1.0, |growth, value| growth * (1.0 + value)) - 1.0
}
