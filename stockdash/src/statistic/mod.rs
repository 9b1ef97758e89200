//! Statistic 统计模块
//!
//! 本模块提供了用于分析收盘价与收益率的统计算法和金融指标。
//!
//! # 核心概念
//!
//! - **algorithm**: Welford 均值方差、线性插值分位数等基础算法
//! - **metric**: 金融指标及其在不同时间间隔上的缩放方法
//! - **returns**: 收益率、累计收益与回撤序列
//! - **correlation**: 收益率相关系数矩阵
//! - **rolling**: 3 个月与 6 个月滚动窗口统计
//! - **summary**: 逐股票代码的统计摘要表
//! - **time**: 用于年化计算的时间间隔定义
//!
//! 所有函数都是纯变换，`NaN` 表示缺失或未定义的值。

/// 用于分析数据集的统计算法。
pub mod algorithm;

/// 收益率相关系数矩阵。
pub mod correlation;

/// 金融指标及其在不同 [`TimeIntervals`](time::TimeInterval) 上的计算方法。
pub mod metric;

/// 收益率、累计收益与回撤序列。
pub mod returns;

/// 滚动窗口统计。
///
/// 例如，`rolling_stats`、`RollingStatistic`、`WINDOW_3M` 等。
pub mod rolling;

/// 逐股票代码的统计摘要。
///
/// 例如，`SummaryTable`、`SummaryRow` 等。
pub mod summary;

/// 用于年化计算的时间间隔定义。
///
/// 例如，`Annual252`、`Daily` 等。
pub mod time;
