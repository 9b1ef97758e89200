use chrono::{Days, NaiveDate};
use criterion::{BenchmarkId, Criterion, black_box, criterion_group, criterion_main};
use stockdash::statistic::{
    correlation::correlation_matrix,
    returns::prep_returns,
    rolling::{RollingStatistic, WINDOW_3M, WINDOW_6M, rolling_stats},
    summary::summary,
    time::Annual252,
};
use stockdash_data::{Ticker, table::DataTable};

criterion_main!(benches);
criterion_group!(
    benches,
    bench_rolling_stats,
    bench_summary,
    bench_correlation_matrix
);

const TICKERS: [&str; 8] = ["AAPL", "QQQ", "MSFT", "NVDA", "AMZN", "GOOG", "META", "TSLA"];

/// 约十年的交易日。
const ROWS: usize = 2520;

fn price_table(rows: usize) -> DataTable {
    let start = NaiveDate::from_ymd_opt(2015, 1, 1).unwrap();
    let dates = (0..rows as u64)
        .map(|offset| start + Days::new(offset))
        .collect();

    let columns = TICKERS.iter().enumerate().map(|(column, ticker)| {
        let phase = column as f64;
        let prices = (0..rows)
            .scan(100.0, |price: &mut f64, index| {
                let value = *price;
                *price *= 1.0 + 0.0004 + 0.02 * ((index as f64) * 0.37 + phase).sin();
                Some(value)
            })
            .collect();
        (Ticker::new(ticker), prices)
    });

    DataTable::new(dates, columns).unwrap()
}

fn bench_rolling_stats(c: &mut Criterion) {
    let returns = prep_returns(&price_table(ROWS));
    let mut group = c.benchmark_group("rolling_stats");

    for statistic in [
        RollingStatistic::CumulativeReturn,
        RollingStatistic::Volatility,
        RollingStatistic::Cvar,
        RollingStatistic::Sharpe,
    ] {
        for window in [WINDOW_3M, WINDOW_6M] {
            group.bench_with_input(
                BenchmarkId::new(statistic.to_string(), window),
                &window,
                |b, &window| b.iter(|| rolling_stats(black_box(&returns), window, statistic)),
            );
        }
    }

    group.finish();
}

fn bench_summary(c: &mut Criterion) {
    let returns = prep_returns(&price_table(ROWS));

    c.bench_function("summary", |b| {
        b.iter(|| summary(black_box(&returns), Annual252))
    });
}

fn bench_correlation_matrix(c: &mut Criterion) {
    let returns = prep_returns(&price_table(ROWS));

    c.bench_function("correlation_matrix", |b| {
        b.iter(|| correlation_matrix(black_box(&returns)))
    });
}
