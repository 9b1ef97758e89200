use chrono::{Days, NaiveDate};
use stockdash_data::{
    Ticker,
    table::{DataTable, PriceTable},
};

/// 断言两个 `f64` 近似相等，两者同为 `NaN` 视为相等。
pub fn assert_approx(actual: f64, expected: f64, tolerance: f64, context: &str) {
    if expected.is_nan() {
        assert!(actual.is_nan(), "{context}: expected NaN, got {actual}");
    } else {
        assert!(
            (actual - expected).abs() <= tolerance,
            "{context}: {actual} != {expected} (tolerance {tolerance})"
        );
    }
}

/// 逐元素断言两个序列近似相等。
pub fn assert_series_approx(actual: &[f64], expected: &[f64], tolerance: f64, context: &str) {
    assert_eq!(actual.len(), expected.len(), "{context}: length mismatch");
    for (index, (actual, expected)) in actual.iter().zip(expected).enumerate() {
        assert_approx(*actual, *expected, tolerance, &format!("{context}[{index}]"));
    }
}

/// 2024-01-01 之后第 `offset` 天。
pub fn day(offset: u64) -> NaiveDate {
    NaiveDate::from_ymd_opt(2024, 1, 1).unwrap() + Days::new(offset)
}

/// 连续 `n` 天的日期。
pub fn days(n: usize) -> Vec<NaiveDate> {
    (0..n as u64).map(day).collect()
}

/// 使用连续日期和给定列构建表。
pub fn table(columns: Vec<(&str, Vec<f64>)>) -> DataTable {
    let rows = columns.first().map(|(_, values)| values.len()).unwrap_or_default();
    DataTable::new(
        days(rows),
        columns
            .into_iter()
            .map(|(ticker, values)| (Ticker::new(ticker), values)),
    )
    .unwrap()
}

/// 从给定日收益率生成价格，起始价格为 100。
pub fn prices_from_returns(ticker: &str, returns: &[f64]) -> PriceTable {
    let mut price = 100.0;
    let mut values = vec![price];
    for value in returns {
        price *= 1.0 + value;
        values.push(price);
    }
    table(vec![(ticker, values)])
}

/// 确定性的伪随机日收益率序列，围绕 `drift` 波动。
pub fn synthetic_returns(n: usize, seed: u64, drift: f64) -> Vec<f64> {
    let mut state = seed.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
    (0..n)
        .map(|_| {
            state = state
                .wrapping_mul(6364136223846793005)
                .wrapping_add(1442695040888963407);
            let unit = (state >> 11) as f64 / (1u64 << 53) as f64;
            drift + (unit - 0.5) * 0.04
        })
        .collect()
}
