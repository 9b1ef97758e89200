//! Data 错误模块
//!
//! 本模块定义了数据访问层可能产生的所有错误类型。
//!
//! 注意：缺失的价格（非交易日、未知股票代码）不是错误，而是以 `NaN` 表示。
//! 这里的错误只覆盖传输失败、响应无法解析以及表格形状不合法的情况。

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 表示 Stockdash-Data 中可能发生的所有错误。
///
/// ## 错误类型
///
/// - **Http**: HTTP 请求失败或返回了无法识别的非成功状态
/// - **Deserialise**: 响应体无法反序列化
/// - **Url**: 无法构建请求 URL
/// - **Api**: 数据提供方返回了明确的错误（"Not Found" 除外）
/// - **LengthMismatch** / **UnsortedDates**: [`DataTable`](crate::table::DataTable) 形状不合法
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Error)]
pub enum DataError {
    /// HTTP 传输错误。
    #[error("HTTP request failed: {0}")]
    Http(String),

    /// 响应反序列化错误。
    #[error("failed to deserialise response: {error}")]
    Deserialise {
        /// 反序列化错误信息。
        error: String,
        /// 原始响应体。
        payload: String,
    },

    /// URL 构建错误。
    #[error("invalid url: {0}")]
    Url(String),

    /// 数据提供方返回的错误。
    #[error("market data API error [{code}]: {description}")]
    Api {
        /// 错误代码。
        code: String,
        /// 错误描述。
        description: String,
    },

    /// 列长度与日期数量不一致。
    #[error("column {ticker} has {values} values but the table has {dates} dates")]
    LengthMismatch {
        /// 列对应的股票代码。
        ticker: String,
        /// 日期数量。
        dates: usize,
        /// 列中值的数量。
        values: usize,
    },

    /// 日期不是严格递增的。
    #[error("table dates must be strictly ascending: {previous} is followed by {next}")]
    UnsortedDates {
        /// 前一个日期。
        previous: NaiveDate,
        /// 后一个日期。
        next: NaiveDate,
    },
}

impl From<reqwest::Error> for DataError {
    fn from(error: reqwest::Error) -> Self {
        Self::Http(error.to_string())
    }
}

impl From<url::ParseError> for DataError {
    fn from(error: url::ParseError) -> Self {
        Self::Url(error.to_string())
    }
}
