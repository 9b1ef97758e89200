#![forbid(unsafe_code)]
#![warn(
    unused,
    clippy::cognitive_complexity,
    unused_crate_dependencies,
    unused_extern_crates,
    clippy::unused_self,
    clippy::useless_let_if_seq,
    missing_debug_implementations,
    rust_2018_idioms,
    rust_2024_compatibility
)]
#![allow(clippy::type_complexity, clippy::too_many_arguments, type_alias_bounds)]

//! # Stockdash
//! Stockdash 是一个股票对比看板的核心引擎：选择一组股票代码和日期范围，获取日收盘价，
//! 然后生成对比图表（价格、累计收益、回撤、相关系数矩阵）、滚动窗口风险收益统计
//! （累计收益、波动率、CVaR、Sharpe）以及逐股票的统计摘要表。
//! * **纯函数**：所有统计计算都是对输入表的纯变换，可以在没有锁的情况下并发调用。
//! * **NaN 传播**：缺失数据以 `NaN` 表示并在计算中传播，而不是报错。
//! * **显式请求处理**：`fetch` 获取 [`PriceTable`](stockdash_data::table::PriceTable)，
//!   `render` 从价格表生成图表与摘要表。
//!
//! ## 概述
//! 从高层次来看，它提供了几个主要组件：
//! * 统计引擎：收益率、累计收益、回撤、相关系数、滚动窗口统计和摘要表。
//! * 图表组装：[`ChartSpec`](plot::ChartSpec) 折线图与热力图，以及 SVG 渲染。
//! * 看板请求处理：[`PlotOption`](dashboard::option::PlotOption) 枚举到
//!   (窗口长度, 统计量, 标题) 的映射表，以及 `fetch` / `render` 处理函数。
//! * 静态 HTML 看板页面与终端摘要表输出。

/// 看板请求处理：`fetch`、`render` 以及绘图选项表。
///
/// 例如：`Dashboard`、`FetchRequest`、`RenderRequest`、`PlotOption` 等。
pub mod dashboard;

/// 定义 Stockdash 中所有可能的错误。
pub mod error;

/// 看板配置，从 JSON 文件加载。
pub mod config;

/// 提供 Stockdash 的默认 Tracing 日志初始化器。
pub mod logging;

/// 图表规格与 SVG 渲染。
pub mod plot;

/// 静态 HTML 看板页面。
pub mod report;

/// 用于分析收盘价与收益率的统计算法、金融指标和统计摘要。
///
/// 例如：`prep_returns`、`rolling_stats`、`SummaryTable`、`SharpeRatio` 等。
pub mod statistic;

#[cfg(test)]
pub mod test_utils;
