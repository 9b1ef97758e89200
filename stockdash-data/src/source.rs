//! PriceSource 价格数据源模块
//!
//! 本模块定义了价格获取的抽象 [`PriceSource`]，以及将逐个股票代码获取的
//! [`ClosingPrices`] 合并为 [`PriceTable`] 的 [`fetch_price_table`]。
//!
//! # 约定
//!
//! - 非交易日或未知股票代码不会产生错误，而是在表中表现为 `NaN`
//! - 空股票代码集合或不包含任何交易日的日期范围返回空表
//! - 只请求一个股票代码时，结果依然是一张带有一个具名列的表

use crate::{
    FnvIndexMap, Ticker,
    error::DataError,
    table::{DataTable, PriceTable},
};
use async_trait::async_trait;
use chrono::NaiveDate;
use derive_more::Constructor;
use itertools::Itertools;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};

/// 单个股票代码在日期范围内的日收盘价。
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize, Constructor)]
pub struct ClosingPrices {
    /// 股票代码。
    pub ticker: Ticker,
    /// `(交易日, 收盘价)`，缺失的收盘价为 `NaN`。
    pub points: Vec<(NaiveDate, f64)>,
}

/// 为单个股票代码和闭区间日期范围提供日收盘价的数据源。
///
/// 实现者应当对未知股票代码返回空的 [`ClosingPrices`]，而不是错误；
/// 只有传输或解析失败才返回 [`DataError`]。
#[async_trait]
pub trait PriceSource {
    /// 获取 `ticker` 在 `[start, end]` 内的日收盘价。
    async fn fetch_closes(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ClosingPrices, DataError>;
}

/// 逐个获取 `tickers` 在 `[start, end]` 内的收盘价，并合并为一张 [`PriceTable`]。
///
/// 股票代码按请求顺序成为表的列，重复的只获取一次。请求按顺序依次完成，
/// 没有重试；任意一个股票代码的传输错误都会直接返回。
pub async fn fetch_price_table<Source>(
    source: &Source,
    tickers: &[Ticker],
    start: NaiveDate,
    end: NaiveDate,
) -> Result<PriceTable, DataError>
where
    Source: PriceSource + ?Sized + Sync,
{
    let tickers = tickers.iter().unique().cloned().collect::<Vec<_>>();

    if tickers.is_empty() || start > end {
        debug!(?tickers, %start, %end, "no tickers or empty date range, skipping fetch");
        return Ok(DataTable::empty(tickers));
    }

    let mut series = Vec::with_capacity(tickers.len());
    for ticker in &tickers {
        let closes = source.fetch_closes(ticker, start, end).await?;
        debug!(%ticker, points = closes.points.len(), "fetched closing prices");
        series.push((ticker.clone(), closes.points));
    }

    let table = DataTable::from_series(series).slice_dates(start, end);

    info!(
        tickers = table.num_columns(),
        rows = table.num_rows(),
        %start,
        %end,
        "built PriceTable"
    );

    Ok(table)
}

/// 基于内存中收盘价的 [`PriceSource`]，适用于离线使用与测试。
#[derive(Debug, Clone, PartialEq, Default)]
pub struct StaticPriceSource {
    series: FnvIndexMap<Ticker, Vec<(NaiveDate, f64)>>,
}

impl StaticPriceSource {
    /// 添加（或替换）某个股票代码的收盘价。
    pub fn with_series<Points>(mut self, ticker: impl Into<Ticker>, points: Points) -> Self
    where
        Points: IntoIterator<Item = (NaiveDate, f64)>,
    {
        self.series
            .insert(ticker.into(), points.into_iter().collect());
        self
    }
}

impl From<&PriceTable> for StaticPriceSource {
    fn from(table: &PriceTable) -> Self {
        let series = table
            .columns()
            .map(|(ticker, values)| {
                let points = table.dates().iter().copied().zip(values.iter().copied());
                (ticker.clone(), points.collect())
            })
            .collect();

        Self { series }
    }
}

#[async_trait]
impl PriceSource for StaticPriceSource {
    async fn fetch_closes(
        &self,
        ticker: &Ticker,
        start: NaiveDate,
        end: NaiveDate,
    ) -> Result<ClosingPrices, DataError> {
        let points = self
            .series
            .get(ticker)
            .map(|points| {
                points
                    .iter()
                    .filter(|(date, _)| (start..=end).contains(date))
                    .copied()
                    .collect()
            })
            .unwrap_or_default();

        Ok(ClosingPrices::new(ticker.clone(), points))
    }
}
