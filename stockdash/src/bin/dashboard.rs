use chrono::Local;
use std::sync::Arc;
use stockdash::{
    config::DashboardConfig,
    dashboard::{Dashboard, RenderRequest, option::PlotOption},
    logging::init_logging,
    report::DashboardPage,
};
use tracing::info;

/// 示例配置文件路径，未通过命令行参数提供配置时使用。
const FILE_PATH_DASHBOARD_CONFIG: &str = "stockdash/config/dashboard_config.json";

/// 生成静态股票对比看板：获取收盘价，渲染所有图表选项到一个 HTML 页面，
/// 并在终端打印统计摘要表。
///
/// 用法：`dashboard [config.json]`
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // 初始化日志追踪
    init_logging();

    // 加载看板配置
    let config = load_config()?;
    let today = Local::now().date_naive();

    // 构建只读的股票代码列表与 Yahoo Finance 数据源
    let universe = Arc::new(config.ticker_universe());
    let dashboard = Dashboard::new(universe, config.yahoo.build()?);

    // 获取收盘价
    let fetch_request = config.fetch_request(today);
    let prices = dashboard.fetch(&fetch_request).await?;

    // 默认选项排在最前，其余选项按表顺序
    let options = std::iter::once(config.option)
        .chain(PlotOption::all().filter(|option| *option != config.option));

    let mut page = DashboardPage::new(
        fetch_request.tickers.clone(),
        fetch_request.start,
        fetch_request.end,
    );
    let mut summary = None;

    for option in options {
        let request = RenderRequest::new(
            fetch_request.tickers.clone(),
            fetch_request.start,
            fetch_request.end,
            option,
        );
        let output = dashboard.render(&prices, &request);
        page.push_chart(&output.chart);
        summary.get_or_insert(output.summary);
    }

    if let Some(summary) = summary {
        page.set_summary(&summary);
        summary.print_summary();
    }

    page.write(&config.output)?;
    info!(output = %config.output.display(), "dashboard generated");

    Ok(())
}

/// 从命令行参数指定的文件加载配置，否则使用示例配置文件，两者都不存在时使用默认配置。
fn load_config() -> Result<DashboardConfig, Box<dyn std::error::Error>> {
    match std::env::args().nth(1) {
        Some(path) => Ok(DashboardConfig::load(path)?),
        None if std::path::Path::new(FILE_PATH_DASHBOARD_CONFIG).exists() => {
            Ok(DashboardConfig::load(FILE_PATH_DASHBOARD_CONFIG)?)
        }
        None => Ok(DashboardConfig::default()),
    }
}
