//! Dashboard 看板请求处理模块
//!
//! 看板的每个用户操作都是一次完整的请求/响应：
//!
//! - **fetch**: 通过 [`PriceSource`] 获取 [`FetchRequest`] 中股票代码的收盘价表
//! - **render**: 从收盘价表计算 [`RenderRequest`] 所选的图表与统计摘要表
//!
//! `render` 是纯函数，不持有任何可变状态，可以并发调用。
//! [`TickerUniverse`] 在启动时构建一次，通过 `Arc` 只读共享。

use crate::{
    error::DashboardError,
    plot::ChartSpec,
    statistic::{
        correlation::correlation_matrix,
        returns::{cumulative_return, drawdown, prep_returns},
        rolling::rolling_stats,
        summary::{SummaryTable, summary},
        time::Annual252,
    },
};
use chrono::NaiveDate;
use derive_more::Constructor;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use stockdash_data::{
    Ticker,
    source::{PriceSource, fetch_price_table},
    table::{PriceTable, ReturnsTable},
    universe::TickerUniverse,
};
use tracing::{info, warn};

/// 绘图选项与映射表。
pub mod option;

use option::{PlotKind, PlotOption};

/// 获取收盘价的请求。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Constructor)]
pub struct FetchRequest {
    pub tickers: Vec<Ticker>,
    pub start: NaiveDate,
    pub end: NaiveDate,
}

/// 渲染图表与统计摘要的请求。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Constructor)]
pub struct RenderRequest {
    pub tickers: Vec<Ticker>,
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub option: PlotOption,
}

/// 一次渲染请求的输出：所选图表与统计摘要表。
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
pub struct RenderOutput {
    pub chart: ChartSpec,
    pub summary: SummaryTable<Annual252>,
}

/// 获取 `request` 中股票代码在 `[start, end]` 内的收盘价表。
///
/// 股票代码为空时直接返回空表，不发起任何网络请求。
pub async fn fetch<Source>(
    source: &Source,
    request: &FetchRequest,
) -> Result<PriceTable, DashboardError>
where
    Source: PriceSource + ?Sized + Sync,
{
    fetch_price_table(source, &request.tickers, request.start, request.end)
        .await
        .map_err(DashboardError::from)
}

/// 从收盘价表渲染 `request` 所选的图表与统计摘要表。
///
/// 收盘价表先被截取到 `[start, end]` 闭区间与所请求的股票代码
/// （保持请求顺序，丢弃表中不存在的股票代码），然后计算收益率。
pub fn render(prices: &PriceTable, request: &RenderRequest) -> RenderOutput {
    let prices = prices
        .slice_dates(request.start, request.end)
        .select(request.tickers.iter().map(Ticker::as_str));
    let returns = prep_returns(&prices);

    RenderOutput {
        chart: build_chart(request.option, &prices, &returns),
        summary: summary(&returns, Annual252),
    }
}

/// 按 `option` 在 [`PLOT_OPTIONS`](option::PLOT_OPTIONS) 表中的计算方式构建图表。
pub fn build_chart(option: PlotOption, prices: &PriceTable, returns: &ReturnsTable) -> ChartSpec {
    let kind = option.kind();
    let title = option.title();
    let format = kind.value_format();

    match kind {
        PlotKind::Price => ChartSpec::line(title, format, prices),
        PlotKind::CumulativeReturn => ChartSpec::line(title, format, &cumulative_return(prices)),
        PlotKind::Drawdown => ChartSpec::line(title, format, &drawdown(prices)),
        PlotKind::CorrelationMatrix => ChartSpec::heatmap(title, &correlation_matrix(returns)),
        PlotKind::Rolling { window, statistic } => {
            ChartSpec::line(title, format, &rolling_stats(returns, window, statistic))
        }
    }
}

/// 看板：只读的股票代码列表与收盘价数据源。
#[derive(Debug, Clone)]
pub struct Dashboard<Source> {
    universe: Arc<TickerUniverse>,
    source: Source,
}

impl<Source> Dashboard<Source>
where
    Source: PriceSource + Sync,
{
    pub fn new(universe: Arc<TickerUniverse>, source: Source) -> Self {
        Self { universe, source }
    }

    pub fn universe(&self) -> &TickerUniverse {
        &self.universe
    }

    /// 下拉框搜索，见 [`TickerUniverse::search`]。
    pub fn search_tickers(&self, query: &str, selected: &[Ticker]) -> Option<Vec<Ticker>> {
        self.universe.search(query, selected)
    }

    /// 返回不在 [`TickerUniverse`] 中的股票代码，并逐个记录警告。
    pub fn unknown_tickers<'a>(&self, tickers: &'a [Ticker]) -> Vec<&'a Ticker> {
        tickers
            .iter()
            .filter(|ticker| !self.universe.contains(ticker))
            .inspect(|ticker| warn!(%ticker, "requested ticker is not in the TickerUniverse"))
            .collect()
    }

    /// 获取收盘价表。不在列表中的股票代码依然会被请求，但会记录警告。
    pub async fn fetch(&self, request: &FetchRequest) -> Result<PriceTable, DashboardError> {
        self.unknown_tickers(&request.tickers);

        let prices = fetch(&self.source, request).await?;

        info!(
            tickers = ?request.tickers,
            start = %request.start,
            end = %request.end,
            rows = prices.num_rows(),
            "Dashboard fetched prices"
        );

        Ok(prices)
    }

    /// 渲染图表与统计摘要表，见 [`render`]。不在列表中的股票代码依然会被渲染，但会记录警告。
    pub fn render(&self, prices: &PriceTable, request: &RenderRequest) -> RenderOutput {
        self.unknown_tickers(&request.tickers);
        render(prices, request)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{
        plot::{ChartData, ChartKind},
        test_utils::{day, prices_from_returns, synthetic_returns, table},
    };
    use stockdash_data::source::StaticPriceSource;

    fn request(tickers: &[&str], option: PlotOption) -> RenderRequest {
        RenderRequest::new(
            tickers.iter().map(|ticker| Ticker::new(ticker)).collect(),
            day(0),
            day(399),
            option,
        )
    }

    #[test]
    fn test_render_every_option() {
        let column = |ticker: &str, seed, drift| {
            prices_from_returns(ticker, &synthetic_returns(199, seed, drift))
                .column(ticker)
                .unwrap()
                .to_vec()
        };
        let prices = table(vec![
            ("AAPL", column("AAPL", 1, 0.001)),
            ("QQQ", column("QQQ", 2, 0.0)),
        ]);

        for option in PlotOption::all() {
            let output = render(&prices, &request(&["AAPL", "QQQ"], option));

            assert_eq!(output.chart.title, option.title(), "{option}");
            assert_eq!(output.summary.rows().len(), 2, "{option}");

            let expected_kind = match option {
                PlotOption::CorrelationMatrix => ChartKind::Heatmap,
                _ => ChartKind::Line,
            };
            assert_eq!(output.chart.kind(), expected_kind, "{option}");
            assert!(!output.chart.is_empty(), "{option}");
        }
    }

    #[test]
    fn test_render_keeps_request_order_and_drops_unknown() {
        let prices = table(vec![
            ("AAPL", vec![100.0, 101.0, 102.0]),
            ("QQQ", vec![400.0, 402.0, 398.0]),
        ]);

        let output = render(&prices, &request(&["QQQ", "UNKNOWN", "AAPL"], PlotOption::Price));

        let ChartData::Line(series) = &output.chart.data else {
            panic!("expected line chart");
        };
        assert_eq!(
            series.iter().map(|series| series.name.as_str()).collect::<Vec<_>>(),
            vec!["QQQ", "AAPL"]
        );
        assert_eq!(
            output
                .summary
                .rows()
                .iter()
                .map(|row| row.ticker.as_str())
                .collect::<Vec<_>>(),
            vec!["QQQ", "AAPL"]
        );
    }

    #[test]
    fn test_render_slices_inclusive_date_range() {
        let prices = table(vec![("AAPL", vec![100.0, 110.0, 121.0, 133.1, 146.41])]);

        let output = render(
            &prices,
            &RenderRequest::new(vec![Ticker::new("AAPL")], day(1), day(3), PlotOption::Price),
        );

        let ChartData::Line(series) = &output.chart.data else {
            panic!("expected line chart");
        };
        assert_eq!(
            series[0].points,
            vec![(day(1), 110.0), (day(2), 121.0), (day(3), 133.1)]
        );
    }

    #[test]
    fn test_render_empty_selection() {
        let prices = table(vec![("AAPL", vec![100.0, 110.0])]);

        let output = render(&prices, &request(&[], PlotOption::RollingSharpe3M));

        assert!(output.chart.is_empty());
        assert!(output.summary.is_empty());
    }

    #[tokio::test]
    async fn test_dashboard_fetch_and_search() {
        let prices = table(vec![
            ("AAPL", vec![100.0, 101.0, 102.0]),
            ("QQQ", vec![400.0, 402.0, 398.0]),
        ]);
        let dashboard = Dashboard::new(
            Arc::new(TickerUniverse::new(["AAPL", "MSFT"])),
            StaticPriceSource::from(&prices),
        );

        let fetched = dashboard
            .fetch(&FetchRequest::new(
                vec![Ticker::new("QQQ"), Ticker::new("AAPL")],
                day(0),
                day(2),
            ))
            .await
            .unwrap();

        assert_eq!(
            fetched.tickers().map(|ticker| ticker.as_str()).collect::<Vec<_>>(),
            vec!["QQQ", "AAPL"]
        );
        assert_eq!(fetched.num_rows(), 3);

        let request = RenderRequest::new(
            vec![Ticker::new("QQQ"), Ticker::new("AAPL")],
            day(0),
            day(2),
            PlotOption::Price,
        );
        assert_eq!(dashboard.render(&fetched, &request), render(&fetched, &request));
        assert!(dashboard.unknown_tickers(&request.tickers).is_empty());
        assert_eq!(
            dashboard.unknown_tickers(&[Ticker::new("TSLA"), Ticker::new("AAPL")]),
            vec![&Ticker::new("TSLA")]
        );

        assert_eq!(
            dashboard.search_tickers("QQ", &[Ticker::new("AAPL")]),
            Some(vec![Ticker::new("AAPL"), Ticker::new("QQQ")])
        );
        assert_eq!(dashboard.search_tickers("", &[]), None);
    }

    #[tokio::test]
    async fn test_fetch_empty_tickers() {
        let source = StaticPriceSource::default();

        let fetched = fetch(&source, &FetchRequest::new(vec![], day(0), day(10)))
            .await
            .unwrap();

        assert!(fetched.is_empty());
        assert_eq!(fetched.num_columns(), 0);
    }
}
