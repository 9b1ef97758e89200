//! DataTable 时间序列表模块
//!
//! 本模块提供了按交易日索引、按股票代码分列的时间序列表 [`DataTable`]。
//! 收盘价表 [`PriceTable`] 与收益率表 [`ReturnsTable`] 共用该结构。
//!
//! # 不变量
//!
//! - 日期严格递增且唯一
//! - 每一列的长度等于日期数量
//! - 列与请求的股票代码一一对应，保持请求顺序
//! - 缺失值使用 `NaN` 表示，而不是删除行

use crate::{FnvIndexMap, Ticker, error::DataError};
use chrono::NaiveDate;
use itertools::Itertools;
use serde::Serialize;
use std::collections::BTreeMap;

/// 日收盘价表：交易日 × 股票代码 → 收盘价。
pub type PriceTable = DataTable;

/// 日收益率表：与 [`PriceTable`] 形状相同，但少了第一行。
pub type ReturnsTable = DataTable;

/// 按交易日索引、按股票代码分列的时间序列表。
///
/// 即使只请求了一个股票代码，结果依然是带有一个具名列的表，而不是裸序列。
///
/// 注意：`PartialEq` 遵循 IEEE-754 语义，包含 `NaN` 的表永远不相等。
#[derive(Debug, Clone, PartialEq, Default, Serialize)]
pub struct DataTable {
    dates: Vec<NaiveDate>,
    columns: FnvIndexMap<Ticker, Vec<f64>>,
}

impl DataTable {
    /// 从日期和列构建 [`DataTable`]，并校验不变量。
    ///
    /// 重复的股票代码只保留第一次出现的列。
    ///
    /// # 错误
    ///
    /// - [`DataError::UnsortedDates`]: 日期不是严格递增的
    /// - [`DataError::LengthMismatch`]: 某一列的长度与日期数量不一致
    pub fn new<Iter>(dates: Vec<NaiveDate>, columns: Iter) -> Result<Self, DataError>
    where
        Iter: IntoIterator<Item = (Ticker, Vec<f64>)>,
    {
        if let Some((previous, next)) = dates
            .iter()
            .tuple_windows()
            .find(|(previous, next)| previous >= next)
        {
            return Err(DataError::UnsortedDates {
                previous: *previous,
                next: *next,
            });
        }

        let mut table_columns = FnvIndexMap::default();
        for (ticker, values) in columns {
            if values.len() != dates.len() {
                return Err(DataError::LengthMismatch {
                    ticker: ticker.to_string(),
                    dates: dates.len(),
                    values: values.len(),
                });
            }
            table_columns.entry(ticker).or_insert(values);
        }

        Ok(Self {
            dates,
            columns: table_columns,
        })
    }

    /// 构建一个只有列名、没有任何行的空表。
    pub fn empty<Iter>(tickers: Iter) -> Self
    where
        Iter: IntoIterator<Item = Ticker>,
    {
        Self {
            dates: Vec::new(),
            columns: tickers
                .into_iter()
                .map(|ticker| (ticker, Vec::new()))
                .collect(),
        }
    }

    /// 将逐个股票代码的 `(日期, 值)` 序列按日期外连接为一张表。
    ///
    /// 表的日期为所有序列日期的并集，某个股票在某日没有数据时填充 `NaN`。
    /// 没有任何数据点的股票代码依然保留为全 `NaN` 列。
    pub fn from_series<Iter, Points>(series: Iter) -> Self
    where
        Iter: IntoIterator<Item = (Ticker, Points)>,
        Points: IntoIterator<Item = (NaiveDate, f64)>,
    {
        let mut by_ticker = FnvIndexMap::<Ticker, BTreeMap<NaiveDate, f64>>::default();
        for (ticker, points) in series {
            by_ticker.entry(ticker).or_default().extend(points);
        }

        let dates = by_ticker
            .values()
            .flat_map(|points| points.keys().copied())
            .sorted()
            .dedup()
            .collect::<Vec<_>>();

        let columns = by_ticker
            .into_iter()
            .map(|(ticker, points)| {
                let values = dates
                    .iter()
                    .map(|date| points.get(date).copied().unwrap_or(f64::NAN))
                    .collect();
                (ticker, values)
            })
            .collect();

        Self { dates, columns }
    }

    /// 表的交易日（严格递增）。
    pub fn dates(&self) -> &[NaiveDate] {
        &self.dates
    }

    /// 按列顺序返回股票代码。
    pub fn tickers(&self) -> impl Iterator<Item = &Ticker> {
        self.columns.keys()
    }

    /// 返回指定股票代码的列。
    pub fn column(&self, ticker: &str) -> Option<&[f64]> {
        self.columns.get(ticker).map(Vec::as_slice)
    }

    /// 按列顺序返回 `(股票代码, 列)`。
    pub fn columns(&self) -> impl Iterator<Item = (&Ticker, &[f64])> {
        self.columns
            .iter()
            .map(|(ticker, values)| (ticker, values.as_slice()))
    }

    /// 返回指定行、指定股票代码的值。
    pub fn value(&self, row: usize, ticker: &str) -> Option<f64> {
        self.column(ticker)?.get(row).copied()
    }

    /// 行数（交易日数量）。
    pub fn num_rows(&self) -> usize {
        self.dates.len()
    }

    /// 列数（股票代码数量）。
    pub fn num_columns(&self) -> usize {
        self.columns.len()
    }

    /// 没有行或没有列时返回 `true`。
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty() || self.columns.is_empty()
    }

    /// 返回日期落在闭区间 `[start, end]` 内的行。
    ///
    /// `start > end` 或区间内没有交易日时返回保留列名的空表。
    pub fn slice_dates(&self, start: NaiveDate, end: NaiveDate) -> Self {
        let from = self.dates.partition_point(|date| *date < start);
        let to = self.dates.partition_point(|date| *date <= end).max(from);

        Self {
            dates: self.dates[from..to].to_vec(),
            columns: self
                .columns
                .iter()
                .map(|(ticker, values)| (ticker.clone(), values[from..to].to_vec()))
                .collect(),
        }
    }

    /// 按给定顺序选择列。表中不存在的股票代码会被忽略，重复的只保留一次。
    pub fn select<'a, Iter>(&self, tickers: Iter) -> Self
    where
        Iter: IntoIterator<Item = &'a str>,
    {
        Self {
            dates: self.dates.clone(),
            columns: tickers
                .into_iter()
                .filter_map(|ticker| self.columns.get_key_value(ticker))
                .map(|(ticker, values)| (ticker.clone(), values.clone()))
                .collect(),
        }
    }

    /// 以当前表为基础派生一张新表：丢弃前 `skip` 个交易日，并对每一列应用 `transform`。
    ///
    /// `transform` 接收完整的原始列；其输出会被截断或用 `NaN` 补齐到新表的行数，
    /// 因此派生表始终满足 [`DataTable`] 的不变量。
    pub fn derive<F>(&self, skip: usize, mut transform: F) -> Self
    where
        F: FnMut(&[f64]) -> Vec<f64>,
    {
        let dates = self.dates.get(skip..).unwrap_or(&[]).to_vec();

        let columns = self
            .columns
            .iter()
            .map(|(ticker, values)| {
                let mut derived = transform(values);
                derived.resize(dates.len(), f64::NAN);
                (ticker.clone(), derived)
            })
            .collect();

        Self { dates, columns }
    }
}
