//! Metric 金融指标模块
//!
//! 本模块提供了收益率序列的风险收益指标，以及它们在不同
//! [`TimeInterval`](super::time::TimeInterval) 之间的缩放方法。
//!
//! # 核心概念
//!
//! - **RateOfReturn**: 平均收益率，线性缩放
//! - **Volatility**: 收益率标准差，平方根缩放
//! - **SharpeRatio**: 风险调整收益，平方根缩放
//! - **ConditionalValueAtRisk**: 左尾期望损失，不随时间缩放
//! - **Drawdown**: 相对历史峰值的回撤与最大回撤

/// 条件风险价值（CVaR / Expected Shortfall）计算逻辑。
pub mod cvar;

/// 回撤与最大回撤计算逻辑。
pub mod drawdown;

/// 收益率计算逻辑。
pub mod rate_of_return;

/// Sharpe Ratio 计算逻辑。
pub mod sharpe;

/// 波动率计算逻辑。
pub mod volatility;
