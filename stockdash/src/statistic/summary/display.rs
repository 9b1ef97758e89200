use super::{SUMMARY_COLUMNS, SummaryRow, SummaryTable};
use crate::{plot::svg::escape, statistic::time::TimeInterval};
use prettytable::{Cell, Row, Table};

impl<Interval> SummaryTable<Interval>
where
    Interval: TimeInterval,
{
    /// 将摘要表打印到标准输出。
    pub fn print_summary(&self) {
        println!("\n--- Summary ({}) ---", self.interval.name());
        self.table().printstd();
    }

    /// 构建摘要表的 [`prettytable::Table`]。
    pub fn table(&self) -> Table {
        let mut table = Table::new();

        table.set_titles(Row::new(
            SUMMARY_COLUMNS.iter().map(|column| Cell::new(column)).collect(),
        ));

        for row in &self.rows {
            table.add_row(Row::new(
                row.formatted()
                    .iter()
                    .map(|value| Cell::new(value))
                    .collect(),
            ));
        }

        table
    }

    /// 将摘要表渲染为 HTML `<table>`，单元格内容经过转义。
    pub fn to_html(&self) -> String {
        let header = SUMMARY_COLUMNS
            .iter()
            .map(|column| format!("<th>{column}</th>"))
            .collect::<String>();

        let body = self
            .rows
            .iter()
            .map(|row| {
                let cells = row
                    .formatted()
                    .iter()
                    .map(|value| format!("<td>{}</td>", escape(value)))
                    .collect::<String>();
                format!("<tr>{cells}</tr>")
            })
            .collect::<String>();

        format!(
            "<table class=\"summary\"><thead><tr>{header}</tr></thead><tbody>{body}</tbody></table>"
        )
    }
}

impl<Interval> SummaryRow<Interval> {
    /// 按 [`SUMMARY_COLUMNS`] 顺序格式化的单元格，收益类为百分比，比率保留两位小数。
    pub fn formatted(&self) -> [String; 7] {
        [
            self.ticker.to_string(),
            format_percent(self.total_return),
            format_percent(self.mean_return.value),
            format_percent(self.volatility.value),
            format_ratio(self.sharpe_ratio.value),
            format_percent(self.max_drawdown.0),
            format_percent(self.cvar.value),
        ]
    }
}

fn format_percent(value: f64) -> String {
    match value.is_nan() {
        true => "-".to_string(),
        false => format!("{:.2}%", value * 100.0),
    }
}

fn format_ratio(value: f64) -> String {
    match value.is_nan() {
        true => "-".to_string(),
        false => format!("{value:.2}"),
    }
}
