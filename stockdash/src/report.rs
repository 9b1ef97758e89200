//! Report HTML 看板页面模块
//!
//! [`DashboardPage`] 将标题、股票代码、日期范围、图表 SVG 与统计摘要表
//! 填充进内置 HTML 模板，生成一个独立的静态 HTML 文件。

use crate::{
    error::DashboardError,
    plot::{ChartSpec, svg::escape},
    statistic::{summary::SummaryTable, time::TimeInterval},
};
use chrono::NaiveDate;
use itertools::Itertools;
use std::path::Path;
use stockdash_data::Ticker;
use tracing::info;

const DEFAULT_TEMPLATE: &str = include_str!("report_template.html");

/// 默认页面标题。
pub const DEFAULT_TITLE: &str = "Stock Comparison Dashboard";

/// 静态 HTML 看板页面。
#[derive(Debug, Clone, PartialEq)]
pub struct DashboardPage {
    title: String,
    tickers: Vec<Ticker>,
    start: NaiveDate,
    end: NaiveDate,
    charts: Vec<String>,
    summary: String,
}

impl DashboardPage {
    pub fn new(tickers: Vec<Ticker>, start: NaiveDate, end: NaiveDate) -> Self {
        Self {
            title: DEFAULT_TITLE.to_string(),
            tickers,
            start,
            end,
            charts: Vec::new(),
            summary: String::new(),
        }
    }

    pub fn with_title(mut self, title: impl Into<String>) -> Self {
        self.title = title.into();
        self
    }

    /// 追加一个图表，按追加顺序排列。
    pub fn push_chart(&mut self, chart: &ChartSpec) {
        self.charts.push(chart.to_svg());
    }

    /// 设置统计摘要表。
    pub fn set_summary<Interval>(&mut self, summary: &SummaryTable<Interval>)
    where
        Interval: TimeInterval,
    {
        self.summary = summary.to_html();
    }

    /// 渲染完整的 HTML 文档。
    pub fn render_html(&self) -> String {
        let tickers = match self.tickers.is_empty() {
            true => "No tickers selected".to_string(),
            false => self.tickers.iter().map(|ticker| escape(ticker)).join(", "),
        };
        let date_range = format!("{} - {}", self.start, self.end);

        DEFAULT_TEMPLATE
            .replace("{{title}}", &escape(&self.title))
            .replace("{{tickers}}", &tickers)
            .replace("{{date_range}}", &date_range)
            .replace("{{charts}}", &self.charts.join("\n"))
            .replace("{{summary}}", &self.summary)
    }

    /// 将 HTML 文档写入 `path`。
    pub fn write(&self, path: impl AsRef<Path>) -> Result<(), DashboardError> {
        let path = path.as_ref();
        std::fs::write(path, self.render_html())?;
        info!(path = %path.display(), charts = self.charts.len(), "wrote DashboardPage");
        Ok(())
    }
}
