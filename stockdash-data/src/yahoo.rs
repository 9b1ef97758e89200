//! Yahoo Finance 价格数据源模块
//!
//! 本模块通过 Yahoo Finance chart API 获取日收盘价，实现 [`PriceSource`]。
//!
//! # 请求
//!
//! `GET {base_url}/{ticker}?period1={start}&period2={end + 1 day}&interval=1d`
//!
//! `period2` 是开区间，因此使用 `end` 的下一天以保证日期范围是闭区间。
//!
//! # 响应处理
//!
//! - 优先使用复权收盘价 `adjclose`，不存在时回退到 `close`
//! - `null` 收盘价转换为 `NaN`
//! - 时间戳按交易所时区偏移 `gmtoffset` 转换为交易日
//! - "Not Found" 错误（未知或已退市的股票代码）返回空序列，而不是错误

use crate::{
    Ticker,
    error::DataError,
    source::{ClosingPrices, PriceSource},
};
use async_trait::async_trait;
use chrono::{DateTime, Days, NaiveDate, NaiveTime};
use reqwest::StatusCode;
use serde::Deserialize;
use tracing::{debug, warn};
use url::Url;

/// Yahoo Finance chart API 基础 URL。
pub const BASE_URL_YAHOO_CHART: &str = "https://query1.finance.yahoo.com/v8/finance/chart";

/// 默认的浏览器 User-Agent，Yahoo Finance 会拒绝没有 User-Agent 的请求。
pub const DEFAULT_USER_AGENT: &str = "Mozilla/5.0 (X11; Linux x86_64) AppleWebKit/537.36 \
     (KHTML, like Gecko) Chrome/143.0.0.0 Safari/537.36";

/// 表示未知股票代码的 API 错误代码。
const API_ERROR_NOT_FOUND: &str = "Not Found";

/// Yahoo Finance 日收盘价数据源。
#[derive(Debug, Clone)]
pub struct YahooFinance {
    http: reqwest::Client,
    base_url: Url,
}

impl YahooFinance {
    /// 使用默认基础 URL 和 User-Agent 构建 [`YahooFinance`]。
    pub fn new() -> Result<Self, DataError> {
        Self::with_config(BASE_URL_YAHOO_CHART, DEFAULT_USER_AGENT)
    }

    /// 使用自定义基础 URL 和 User-Agent 构建 [`YahooFinance`]。
    pub fn with_config(base_url: &str, user_agent: &str) -> Result<Self, DataError> {
        let http = reqwest::Client::builder().user_agent(user_agent).build()?;
        let base_url = Url::parse(base_url.trim_end_matches('/'))?;

        Ok(Self { http, base_url })
    }

    /// 构建某个股票代码在 `[start, end]` 内的日线 chart 请求 URL。
    ///
    /// 股票代码作为单个路径段追加并进行百分号编码，`?`、`/`、`#` 不会改写路径或查询参数。
    fn chart_url(&self, ticker: &str, start: NaiveDate, end: NaiveDate) -> Result<Url, DataError> {
        let mut url = self.base_url.clone();

        url.path_segments_mut()
            .map_err(|()| DataError::Url(format!("{} cannot be a base url", self.base_url)))?
            .pop_if_empty()
            .push(ticker);

        url.query_pairs_mut()
            .append_pair("period1", &unix_midnight(start).to_string())
            .append_pair("period2", &unix_midnight(end + Days::new(1)).to_string())
            .append_pair("interval", "1d");

        Ok(url)
    }
}

#[async_trait]
impl PriceSource for YahooFinance {
    async fn fetch_closes(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ClosingPrices, DataError> {
        let url = self.chart_url(ticker, start, end)?;
        debug!(%ticker, %url, "requesting Yahoo Finance chart");

        let response = self.http.get(url).send().await?;
        let status = response.status();
        let payload = response.text().await?;

        match parse_chart_response(ticker, &payload) {
            Ok(closes) => Ok(ClosingPrices {
                ticker: closes.ticker,
                points: closes
                    .points
                    .into_iter()
                    .filter(|(date, _)| (start..=end).contains(date))
                    .collect(),
            }),
            Err(DataError::Deserialise { .. }) if status == StatusCode::NOT_FOUND => {
                warn!(%ticker, "ticker not found, returning empty series");
                Ok(ClosingPrices::new(ticker.clone(), Vec::new()))
            }
            Err(DataError::Deserialise { .. }) if !status.is_success() => {
                Err(DataError::Http(format!("{ticker}: unexpected status {status}")))
            }
            Err(error) => Err(error),
        }
    }
}

/// 本地日期 `date` 00:00 UTC 对应的 Unix 时间戳（秒）。
fn unix_midnight(date: NaiveDate) -> i64 {
    date.and_time(NaiveTime::MIN).and_utc().timestamp()
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: ChartBody,
}

#[derive(Debug, Deserialize)]
struct ChartBody {
    result: Option<Vec<ChartResult>>,
    error: Option<ChartError>,
}

#[derive(Debug, Deserialize)]
struct ChartError {
    code: String,
    description: String,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: Option<ChartMeta>,
    #[serde(default)]
    timestamp: Vec<i64>,
    indicators: ChartIndicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(default)]
    gmtoffset: i64,
}

#[derive(Debug, Deserialize)]
struct ChartIndicators {
    #[serde(default)]
    quote: Vec<QuoteIndicator>,
    adjclose: Option<Vec<AdjCloseIndicator>>,
}

#[derive(Debug, Deserialize)]
struct QuoteIndicator {
    #[serde(default)]
    close: Vec<Option<f64>>,
}

#[derive(Debug, Deserialize)]
struct AdjCloseIndicator {
    #[serde(default)]
    adjclose: Vec<Option<f64>>,
}

/// 解析 chart API 响应体为 [`ClosingPrices`]。
fn parse_chart_response(ticker: &Ticker, payload: &str) -> Result<ClosingPrices, DataError> {
    let response =
        serde_json::from_str::<ChartResponse>(payload).map_err(|error| DataError::Deserialise {
            error: error.to_string(),
            payload: payload.to_string(),
        })?;

    if let Some(error) = response.chart.error {
        if error.code == API_ERROR_NOT_FOUND {
            warn!(
                %ticker,
                description = %error.description,
                "ticker not found, returning empty series"
            );
            return Ok(ClosingPrices::new(ticker.clone(), Vec::new()));
        }
        return Err(DataError::Api {
            code: error.code,
            description: error.description,
        });
    }

    let Some(result) = response.chart.result.and_then(|results| results.into_iter().next())
    else {
        warn!(%ticker, "chart response contained no result, returning empty series");
        return Ok(ClosingPrices::new(ticker.clone(), Vec::new()));
    };

    let gmt_offset = result.meta.map(|meta| meta.gmtoffset).unwrap_or_default();

    let closes = result
        .indicators
        .adjclose
        .and_then(|adjclose| adjclose.into_iter().next())
        .map(|indicator| indicator.adjclose)
        .filter(|adjclose| !adjclose.is_empty())
        .or_else(|| {
            result
                .indicators
                .quote
                .into_iter()
                .next()
                .map(|quote| quote.close)
        })
        .unwrap_or_default();

    let points = result
        .timestamp
        .iter()
        .enumerate()
        .filter_map(|(index, timestamp)| {
            let date = DateTime::from_timestamp(timestamp + gmt_offset, 0)?.date_naive();
            let close = closes.get(index).copied().flatten().unwrap_or(f64::NAN);
            Some((date, close))
        })
        .collect();

    Ok(ClosingPrices::new(ticker.clone(), points))
}
