//! Plot 图表组装模块
//!
//! 将表格数据组装为与渲染方式无关的 [`ChartSpec`]：
//!
//! - 价格、累计收益、回撤与滚动统计：折线图，每个股票代码一条序列，x 轴为日期
//! - 相关系数矩阵：热力图
//!
//! [`ChartSpec`] 可以序列化为 JSON 交给任意前端渲染，也可以通过 [`svg`] 模块
//! 直接渲染为内联 SVG。

use crate::statistic::correlation::CorrelationMatrix;
use chrono::NaiveDate;
use derive_more::{Constructor, Display};
use serde::{Deserialize, Serialize};
use stockdash_data::{Ticker, table::DataTable};

/// 折线图与热力图的 SVG 渲染。
pub mod svg;

/// 图表类型。
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize, Display)]
pub enum ChartKind {
    Line,
    Heatmap,
}

/// 数值轴的格式。
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ValueFormat {
    /// 原始数值，例如价格。
    #[default]
    Number,
    /// 比例显示为百分比，例如 0.05 显示为 5%。
    Percent,
}

impl ValueFormat {
    /// 格式化轴标签。
    pub fn format(&self, value: f64) -> String {
        match self {
            Self::Number if value.abs() >= 1000.0 => format!("{value:.0}"),
            Self::Number => format!("{value:.2}"),
            Self::Percent => format!("{:.1}%", value * 100.0),
        }
    }
}

/// 折线图中一个股票代码的序列，只包含有效（非 `NaN`）数据点。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize, Constructor)]
pub struct LineSeries {
    pub name: Ticker,
    pub points: Vec<(NaiveDate, f64)>,
}

/// 热力图：有序标签与对应方阵。
#[derive(Debug, Clone, PartialEq, Default, Deserialize, Serialize, Constructor)]
pub struct Heatmap {
    pub labels: Vec<Ticker>,
    pub values: Vec<Vec<f64>>,
}

/// 图表数据。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "kind", content = "data", rename_all = "snake_case")]
pub enum ChartData {
    Line(Vec<LineSeries>),
    Heatmap(Heatmap),
}

/// 与渲染方式无关的图表规格。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct ChartSpec {
    pub title: String,
    pub format: ValueFormat,
    pub data: ChartData,
}

impl ChartSpec {
    /// 从表格构建折线图：每列一条序列，跳过 `NaN` 单元格。
    pub fn line(title: impl Into<String>, format: ValueFormat, table: &DataTable) -> Self {
        let series = table
            .columns()
            .map(|(ticker, values)| {
                let points = table
                    .dates()
                    .iter()
                    .zip(values)
                    .filter(|(_, value)| value.is_finite())
                    .map(|(date, value)| (*date, *value))
                    .collect();
                LineSeries::new(ticker.clone(), points)
            })
            .collect();

        Self {
            title: title.into(),
            format,
            data: ChartData::Line(series),
        }
    }

    /// 从相关系数矩阵构建热力图。
    pub fn heatmap(title: impl Into<String>, matrix: &CorrelationMatrix) -> Self {
        Self {
            title: title.into(),
            format: ValueFormat::Number,
            data: ChartData::Heatmap(Heatmap::new(matrix.tickers.clone(), matrix.values.clone())),
        }
    }

    pub fn kind(&self) -> ChartKind {
        match self.data {
            ChartData::Line(_) => ChartKind::Line,
            ChartData::Heatmap(_) => ChartKind::Heatmap,
        }
    }

    /// 图表是否没有任何可绘制的数据。
    pub fn is_empty(&self) -> bool {
        match &self.data {
            ChartData::Line(series) => series.iter().all(|series| series.points.is_empty()),
            ChartData::Heatmap(heatmap) => heatmap.labels.is_empty(),
        }
    }

    /// 渲染为内联 SVG 片段。
    pub fn to_svg(&self) -> String {
        svg::render(self)
    }
}
