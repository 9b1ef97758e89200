//! Stockdash 错误模块
//!
//! 统计引擎本身没有失败路径：缺失数据与零方差都以 `NaN` 表示。
//! 这里的错误只来自外部边界，例如价格获取、配置加载和报告写入。

use stockdash_data::error::DataError;
use thiserror::Error;

/// 表示 Stockdash 中可能发生的所有错误。
///
/// ## 错误类型
///
/// - **Data**: 价格获取失败（HTTP、响应解析、表格形状）
/// - **Config**: 配置内容不合法
/// - **Io**: 读取配置或写入报告失败
/// - **Serde**: 配置或图表 JSON 序列化失败
#[derive(Debug, Error)]
pub enum DashboardError {
    /// 数据访问层错误。
    #[error("DataError: {0}")]
    Data(#[from] DataError),

    /// 配置不合法。
    #[error("config invalid: {0}")]
    Config(String),

    /// 文件读写错误。
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON 序列化 / 反序列化错误。
    #[error("JSON error: {0}")]
    Serde(#[from] serde_json::Error),
}
