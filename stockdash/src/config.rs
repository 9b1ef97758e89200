//! Config 看板配置模块
//!
//! [`DashboardConfig`] 从 JSON 文件加载，所有字段都有默认值，缺省的字段使用默认配置。
//!
//! ```json
//! {
//!   "tickers": ["AAPL", "QQQ"],
//!   "start": "2020-01-01",
//!   "end": null,
//!   "universe": ["AAPL", "MSFT", "NVDA"],
//!   "option": "price",
//!   "yahoo": { "base_url": "https://query1.finance.yahoo.com/v8/finance/chart" },
//!   "output": "dashboard.html"
//! }
//! ```

use crate::{
    dashboard::{FetchRequest, option::PlotOption},
    error::DashboardError,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::{fs::File, io::BufReader, path::Path, path::PathBuf};
use stockdash_data::{
    Ticker,
    universe::{DEFAULT_UNIVERSE, TickerUniverse},
    yahoo::{BASE_URL_YAHOO_CHART, DEFAULT_USER_AGENT, YahooFinance},
};
use tracing::info;

/// 看板默认选中的股票代码。
pub const DEFAULT_TICKERS: [&str; 2] = ["AAPL", "QQQ"];

/// 看板配置。
///
/// ## 字段说明
///
/// - **tickers**: 默认选中的股票代码
/// - **start**: 日期范围起点（含）
/// - **end**: 日期范围终点（含），`None` 表示今天
/// - **universe**: 下拉框可选的股票代码，`QQQ` 与 `SPY` 总会被追加
/// - **option**: 默认绘图选项
/// - **yahoo**: Yahoo Finance 数据源配置
/// - **output**: HTML 看板页面输出路径
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub tickers: Vec<Ticker>,
    pub start: NaiveDate,
    pub end: Option<NaiveDate>,
    pub universe: Vec<Ticker>,
    pub option: PlotOption,
    pub yahoo: YahooConfig,
    pub output: PathBuf,
}

/// Yahoo Finance 数据源配置。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(default)]
pub struct YahooConfig {
    pub base_url: String,
    pub user_agent: String,
}

impl Default for YahooConfig {
    fn default() -> Self {
        Self {
            base_url: BASE_URL_YAHOO_CHART.to_string(),
            user_agent: DEFAULT_USER_AGENT.to_string(),
        }
    }
}

impl YahooConfig {
    /// 构建 [`YahooFinance`] 数据源。
    pub fn build(&self) -> Result<YahooFinance, DashboardError> {
        YahooFinance::with_config(&self.base_url, &self.user_agent).map_err(DashboardError::from)
    }
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            tickers: DEFAULT_TICKERS.into_iter().map(Ticker::new).collect(),
            start: NaiveDate::from_ymd_opt(2020, 1, 1).unwrap_or_default(),
            end: None,
            universe: DEFAULT_UNIVERSE.into_iter().map(Ticker::new).collect(),
            option: PlotOption::default(),
            yahoo: YahooConfig::default(),
            output: PathBuf::from("dashboard.html"),
        }
    }
}

impl DashboardConfig {
    /// 从 JSON 文件加载配置并校验。
    pub fn load(path: impl AsRef<Path>) -> Result<Self, DashboardError> {
        let path = path.as_ref();
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        let config = serde_json::from_reader::<_, Self>(reader)?;

        config.validate()?;
        info!(path = %path.display(), tickers = ?config.tickers, "loaded DashboardConfig");

        Ok(config)
    }

    /// 校验配置：日期范围起点不能晚于终点。
    pub fn validate(&self) -> Result<(), DashboardError> {
        match self.end {
            Some(end) if end < self.start => Err(DashboardError::Config(format!(
                "start {} is after end {end}",
                self.start
            ))),
            _ => Ok(()),
        }
    }

    /// 日期范围终点，未配置时为 `today`。
    pub fn end_date(&self, today: NaiveDate) -> NaiveDate {
        self.end.unwrap_or(today)
    }

    /// 构建股票代码列表。
    pub fn ticker_universe(&self) -> TickerUniverse {
        TickerUniverse::new(&self.universe)
    }

    /// 默认选中股票代码的 [`FetchRequest`]。
    pub fn fetch_request(&self, today: NaiveDate) -> FetchRequest {
        FetchRequest::new(self.tickers.clone(), self.start, self.end_date(today))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(year: i32, month: u32, day: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(year, month, day).unwrap()
    }

    #[test]
    fn test_deserialise_partial_config_uses_defaults() {
        let config = serde_json::from_str::<DashboardConfig>(
            r#"{ "tickers": ["MSFT"], "end": "2024-06-30", "option": "3mcvar" }"#,
        )
        .unwrap();

        assert_eq!(config.tickers, vec![Ticker::new("MSFT")]);
        assert_eq!(config.start, date(2020, 1, 1));
        assert_eq!(config.end, Some(date(2024, 6, 30)));
        assert_eq!(config.option, PlotOption::RollingCvar3M);
        assert_eq!(config.yahoo, YahooConfig::default());
        assert_eq!(config.output, PathBuf::from("dashboard.html"));
    }

    #[test]
    fn test_validate() {
        struct TestCase {
            start: NaiveDate,
            end: Option<NaiveDate>,
            expected_ok: bool,
        }

        let cases = vec![
            // TC0: open ended
            TestCase {
                start: date(2024, 1, 1),
                end: None,
                expected_ok: true,
            },
            // TC1: single day
            TestCase {
                start: date(2024, 1, 1),
                end: Some(date(2024, 1, 1)),
                expected_ok: true,
            },
            // TC2: inverted range
            TestCase {
                start: date(2024, 2, 1),
                end: Some(date(2024, 1, 1)),
                expected_ok: false,
            },
        ];

        for (index, test) in cases.into_iter().enumerate() {
            let config = DashboardConfig {
                start: test.start,
                end: test.end,
                ..DashboardConfig::default()
            };
            assert_eq!(config.validate().is_ok(), test.expected_ok, "TC{index} failed");
        }
    }

    #[test]
    fn test_fetch_request_defaults_end_to_today() {
        let config = DashboardConfig::default();

        let request = config.fetch_request(date(2026, 10, 19));

        assert_eq!(request.tickers, vec![Ticker::new("AAPL"), Ticker::new("QQQ")]);
        assert_eq!(request.start, date(2020, 1, 1));
        assert_eq!(request.end, date(2026, 10, 19));
    }

    #[test]
    fn test_ticker_universe_appends_extras() {
        let universe = DashboardConfig::default().ticker_universe();
        assert!(universe.contains("AAPL"));
        assert!(universe.contains("QQQ"));
        assert!(universe.contains("SPY"));
    }

    #[test]
    fn test_load_bundled_config() {
        let path = concat!(env!("CARGO_MANIFEST_DIR"), "/config/dashboard_config.json");

        let config = DashboardConfig::load(path).unwrap();

        assert_eq!(config.tickers, vec![Ticker::new("AAPL"), Ticker::new("QQQ")]);
        assert_eq!(config.option, PlotOption::Price);
    }
}
