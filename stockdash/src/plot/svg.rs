//! SVG 图表渲染模块
//!
//! 将 [`ChartSpec`] 渲染为内联 SVG 片段，适合直接嵌入 HTML 看板页面。
//!
//! - 折线图：每个股票代码一条折线，带日期轴（按月刻度）、数值轴、零线与图例
//! - 热力图：单元格按符号着色（正蓝负红），颜色深浅表示绝对值大小

use super::{ChartData, ChartSpec, Heatmap, LineSeries, ValueFormat};
use chrono::{Datelike, NaiveDate};
use itertools::Itertools;

const WIDTH: i32 = 576;
const HEIGHT: i32 = 288;
const PADDING: f64 = 36.0;
const LEFT_PADDING: f64 = 56.0;
const MAX_TIME_LABELS: usize = 8;
const VALUE_TICKS: usize = 5;
const AXIS_COLOR: &str = "#8c8c8c";
const GRID_COLOR: &str = "#e5e5e5";

/// 折线颜色，按序列顺序循环使用。
const PALETTE: [&str; 10] = [
    "#348dc1", "#ff9933", "#2ca02c", "#d62728", "#9467bd", "#8c564b", "#e377c2", "#7f7f7f",
    "#bcbd22", "#17becf",
];

/// 渲染 [`ChartSpec`]，返回带标题的 `<div>` 包裹的 SVG。
pub fn render(chart: &ChartSpec) -> String {
    let body = match (&chart.data, chart.is_empty()) {
        (_, true) => render_empty(),
        (ChartData::Line(series), false) => render_line(series, chart.format),
        (ChartData::Heatmap(heatmap), false) => render_heatmap(heatmap),
    };

    wrap_plot(&chart.title, body)
}

fn render_line(series_list: &[LineSeries], format: ValueFormat) -> String {
    let width = WIDTH as f64;
    let height = HEIGHT as f64;

    let dates = series_list
        .iter()
        .flat_map(|series| series.points.iter().map(|(date, _)| *date))
        .sorted()
        .dedup()
        .collect::<Vec<_>>();
    let xs = x_positions(dates.len(), width);

    let Some((min_v, max_v)) = extent(series_list) else {
        return render_empty();
    };

    let mut svg = svg_header(WIDTH, HEIGHT);

    add_value_axis(&mut svg, min_v, max_v, width, height, format);
    add_time_axis(&mut svg, &dates, &xs, height);

    if min_v < 0.0 && max_v > 0.0 {
        let y = scale_value(0.0, min_v, max_v, height);
        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{AXIS_COLOR}" stroke-width="0.8" stroke-dasharray="4 3" />"##,
            x1 = LEFT_PADDING,
            x2 = width - PADDING,
        ));
    }

    for (index, series) in series_list.iter().enumerate() {
        let points = series
            .points
            .iter()
            .filter_map(|(date, value)| {
                let x = xs[dates.binary_search(date).ok()?];
                Some((x, scale_value(*value, min_v, max_v, height)))
            })
            .collect::<Vec<_>>();
        svg.push_str(&polyline(&points, color(index)));
    }

    draw_legend(&mut svg, series_list);

    svg.push_str(svg_footer());
    svg
}

fn render_heatmap(heatmap: &Heatmap) -> String {
    let width = WIDTH as f64;
    let height = HEIGHT as f64;
    let left_pad = 64.0;
    let right_pad = 20.0;
    let top_pad = 16.0;
    let bottom_pad = 30.0;

    let len = heatmap.labels.len();
    let cell_w = (width - left_pad - right_pad) / len as f64;
    let cell_h = (height - top_pad - bottom_pad) / len as f64;

    let mut svg = svg_header(WIDTH, HEIGHT);

    for (column, label) in heatmap.labels.iter().enumerate() {
        svg.push_str(&format!(
            r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" fill="#808080">{label}</text>"##,
            x = left_pad + (column as f64 + 0.5) * cell_w,
            y = height - bottom_pad + 14.0,
            label = escape(label),
        ));
    }

    for (row, label) in heatmap.labels.iter().enumerate() {
        let y_top = top_pad + row as f64 * cell_h;
        let y_center = y_top + cell_h / 2.0;

        svg.push_str(&format!(
            r##"<text x="{x:.2}" y="{y:.2}" text-anchor="end" fill="#808080">{label}</text>"##,
            x = left_pad - 6.0,
            y = y_center + 3.0,
            label = escape(label),
        ));

        for column in 0..len {
            let x_left = left_pad + column as f64 * cell_w;
            let value = heatmap
                .values
                .get(row)
                .and_then(|values| values.get(column))
                .copied()
                .unwrap_or(f64::NAN);

            if value.is_nan() {
                svg.push_str(&format!(
                    r##"<rect x="{x_left:.2}" y="{y_top:.2}" width="{cell_w:.2}" height="{cell_h:.2}" fill="#f5f5f5" stroke="#ffffff" />"##,
                ));
                continue;
            }

            let (fill, intensity) = heat_color(value);
            let text_color = if intensity > 0.6 { "#ffffff" } else { "#262626" };

            svg.push_str(&format!(
                r##"<rect x="{x_left:.2}" y="{y_top:.2}" width="{cell_w:.2}" height="{cell_h:.2}" fill="{fill}" stroke="#ffffff" />"##,
            ));
            svg.push_str(&format!(
                r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" font-size="9" fill="{text_color}">{value:.2}</text>"##,
                x = x_left + cell_w / 2.0,
                y = y_center + 3.0,
            ));
        }
    }

    svg.push_str(svg_footer());
    svg
}

fn render_empty() -> String {
    let mut svg = svg_header(WIDTH, HEIGHT);
    svg.push_str(&format!(
        r##"<text x="{x:.2}" y="{y:.2}" text-anchor="middle" fill="#808080">No data</text>"##,
        x = WIDTH as f64 / 2.0,
        y = HEIGHT as f64 / 2.0,
    ));
    svg.push_str(svg_footer());
    svg
}

/// 相关系数 `[-1, 1]` 到填充色：正值蓝色、负值红色，强度至少 0.15。
fn heat_color(value: f64) -> (String, f64) {
    let intensity = 0.15 + 0.85 * value.abs().min(1.0);
    let (base_r, base_g, base_b) = if value >= 0.0 {
        (52.0, 141.0, 193.0)
    } else {
        (214.0, 39.0, 40.0)
    };
    let mix = |base: f64| 255.0 * (1.0 - intensity) + base * intensity;

    (
        format!(
            "rgb({:.0},{:.0},{:.0})",
            mix(base_r),
            mix(base_g),
            mix(base_b)
        ),
        intensity,
    )
}

fn color(index: usize) -> &'static str {
    PALETTE[index % PALETTE.len()]
}

fn extent(series_list: &[LineSeries]) -> Option<(f64, f64)> {
    let (min_v, max_v) = series_list
        .iter()
        .flat_map(|series| series.points.iter().map(|(_, value)| *value))
        .filter(|value| value.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(min_v, max_v), value| {
            (min_v.min(value), max_v.max(value))
        });

    if !min_v.is_finite() || !max_v.is_finite() {
        return None;
    }

    if min_v == max_v {
        let adjust = if min_v == 0.0 { 1.0 } else { min_v.abs() * 0.1 };
        return Some((min_v - adjust, max_v + adjust));
    }

    Some((min_v, max_v))
}

fn scale_value(value: f64, min_v: f64, max_v: f64, height: f64) -> f64 {
    let inner_height = height - 2.0 * PADDING;
    let norm = (value - min_v) / (max_v - min_v);
    PADDING + (1.0 - norm) * inner_height
}

fn x_positions(len: usize, width: f64) -> Vec<f64> {
    match len {
        0 => Vec::new(),
        1 => vec![(LEFT_PADDING + width - PADDING) / 2.0],
        _ => {
            let inner_width = width - LEFT_PADDING - PADDING;
            (0..len)
                .map(|index| LEFT_PADDING + inner_width * (index as f64 / (len - 1) as f64))
                .collect()
        }
    }
}

fn add_value_axis(
    svg: &mut String,
    min_v: f64,
    max_v: f64,
    width: f64,
    height: f64,
    format: ValueFormat,
) {
    for tick in 0..VALUE_TICKS {
        let value = min_v + (max_v - min_v) * tick as f64 / (VALUE_TICKS - 1) as f64;
        let y = scale_value(value, min_v, max_v, height);

        svg.push_str(&format!(
            r##"<line x1="{x1:.2}" y1="{y:.2}" x2="{x2:.2}" y2="{y:.2}" stroke="{GRID_COLOR}" stroke-width="0.5" />"##,
            x1 = LEFT_PADDING,
            x2 = width - PADDING,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="end">{label}</text>"#,
            x = LEFT_PADDING - 6.0,
            y = y + 3.0,
            label = format.format(value),
        ));
    }
}

/// 在每个月的第一个交易日处添加刻度，标签数量过多时按固定步长抽稀。
fn add_time_axis(svg: &mut String, dates: &[NaiveDate], xs: &[f64], height: f64) {
    if dates.is_empty() || xs.is_empty() {
        return;
    }

    let axis_y = height - PADDING + 5.0;
    svg.push_str(&format!(
        r##"<line x1="{x1:.2}" y1="{axis_y:.2}" x2="{x2:.2}" y2="{axis_y:.2}" stroke="{AXIS_COLOR}" stroke-width="1" />"##,
        x1 = LEFT_PADDING,
        x2 = WIDTH as f64 - PADDING,
    ));

    let month_starts = dates
        .iter()
        .enumerate()
        .dedup_by(|(_, previous), (_, next)| {
            (previous.year(), previous.month()) == (next.year(), next.month())
        })
        .collect::<Vec<_>>();
    let step = month_starts.len().div_ceil(MAX_TIME_LABELS).max(1);

    for (index, date) in month_starts.into_iter().step_by(step) {
        let Some(x) = xs.get(index) else {
            break;
        };

        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{y1:.2}" x2="{x:.2}" y2="{y2:.2}" stroke="{GRID_COLOR}" stroke-width="0.5" />"##,
            y1 = PADDING,
            y2 = height - PADDING,
        ));
        svg.push_str(&format!(
            r#"<text x="{x:.2}" y="{y:.2}" text-anchor="middle">{label}</text>"#,
            y = axis_y + 14.0,
            label = date.format("%Y-%m"),
        ));
    }
}

fn draw_legend(svg: &mut String, series_list: &[LineSeries]) {
    let x = LEFT_PADDING + 10.0;
    let mut y = PADDING + 12.0;

    for (index, series) in series_list.iter().enumerate() {
        svg.push_str(&format!(
            r##"<line x1="{x:.2}" y1="{line_y:.2}" x2="{x2:.2}" y2="{line_y:.2}" stroke="{color}" stroke-width="1.5" />"##,
            line_y = y - 4.0,
            x2 = x + 20.0,
            color = color(index),
        ));
        svg.push_str(&format!(
            r##"<text x="{text_x:.2}" y="{y:.2}" text-anchor="start" fill="#333">{label}</text>"##,
            text_x = x + 26.0,
            label = escape(&series.name),
        ));
        y += 14.0;
    }
}

fn polyline(points: &[(f64, f64)], stroke: &str) -> String {
    if points.is_empty() {
        return String::new();
    }

    let coords = points
        .iter()
        .map(|(x, y)| format!("{x:.2},{y:.2}"))
        .join(" ");

    format!(r#"<polyline fill="none" stroke="{stroke}" stroke-width="1.5" points="{coords}" />"#)
}

fn svg_header(width: i32, height: i32) -> String {
    format!(
        r#"<svg xmlns="http://www.w3.org/2000/svg" viewBox="0 0 {width} {height}"><style>text{{font-family:Arial,sans-serif;font-size:10px;fill:#666}}</style>"#
    )
}

fn svg_footer() -> &'static str {
    "</svg>"
}

fn wrap_plot(title: &str, svg_body: String) -> String {
    format!(
        r#"<div class="plot"><div class="plot-title">{title}</div>{svg_body}</div>"#,
        title = escape(title),
    )
}

/// 转义 XML 特殊字符。
pub fn escape(text: &str) -> String {
    text.chars()
        .fold(String::with_capacity(text.len()), |mut escaped, character| {
            match character {
                '&' => escaped.push_str("&amp;"),
                '<' => escaped.push_str("&lt;"),
                '>' => escaped.push_str("&gt;"),
                '"' => escaped.push_str("&quot;"),
                '\'' => escaped.push_str("&#39;"),
                other => escaped.push(other),
            }
            escaped
        })
}
