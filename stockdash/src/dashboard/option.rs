//! PlotOption 绘图选项模块
//!
//! 每个 [`PlotOption`] 通过一张静态表 [`PLOT_OPTIONS`] 映射到
//! `(key, label, title, kind)`，其中 `kind` 对滚动统计携带窗口长度与统计量。
//! 看板的字符串键（例如 `"3mcvar"`）通过 [`FromStr`] 与 [`Display`](std::fmt::Display) 转换。

use crate::{
    plot::ValueFormat,
    statistic::rolling::{RollingStatistic, WINDOW_3M, WINDOW_6M},
};
use serde::{Deserialize, Serialize};
use std::{fmt, str::FromStr};
use thiserror::Error;

/// 看板支持的图表选项。
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Default, Deserialize, Serialize)]
pub enum PlotOption {
    #[default]
    #[serde(rename = "price")]
    Price,
    #[serde(rename = "cum_ret")]
    CumulativeReturn,
    #[serde(rename = "drawdown")]
    Drawdown,
    #[serde(rename = "corr_mat")]
    CorrelationMatrix,
    #[serde(rename = "3mcr")]
    RollingReturn3M,
    #[serde(rename = "6mcr")]
    RollingReturn6M,
    #[serde(rename = "3mrv")]
    RollingVolatility3M,
    #[serde(rename = "6mrv")]
    RollingVolatility6M,
    #[serde(rename = "3mcvar")]
    RollingCvar3M,
    #[serde(rename = "6mcvar")]
    RollingCvar6M,
    #[serde(rename = "3msr")]
    RollingSharpe3M,
    #[serde(rename = "6msr")]
    RollingSharpe6M,
}

/// 选项对应的图表计算方式。
#[derive(Debug, Copy, Clone, PartialEq, Eq, Hash, Deserialize, Serialize)]
pub enum PlotKind {
    /// 价格折线。
    Price,
    /// 相对首个有效价格的累计收益折线。
    CumulativeReturn,
    /// 价格回撤折线。
    Drawdown,
    /// 收益率相关系数热力图。
    CorrelationMatrix,
    /// 收益率滚动统计折线。
    Rolling {
        window: usize,
        statistic: RollingStatistic,
    },
}

impl PlotKind {
    /// 折线图数值轴的格式。
    pub fn value_format(&self) -> ValueFormat {
        match self {
            Self::Price
            | Self::CorrelationMatrix
            | Self::Rolling {
                statistic: RollingStatistic::Sharpe,
                ..
            } => ValueFormat::Number,
            _ => ValueFormat::Percent,
        }
    }
}

/// [`PLOT_OPTIONS`] 表中的一行。
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub struct PlotOptionSpec {
    pub option: PlotOption,
    pub key: &'static str,
    pub label: &'static str,
    pub title: &'static str,
    pub kind: PlotKind,
}

/// 绘图选项表，顺序与 [`PlotOption`] 变体声明顺序一致。
pub const PLOT_OPTIONS: [PlotOptionSpec; 12] = [
    PlotOptionSpec {
        option: PlotOption::Price,
        key: "price",
        label: "Price",
        title: "Price",
        kind: PlotKind::Price,
    },
    PlotOptionSpec {
        option: PlotOption::CumulativeReturn,
        key: "cum_ret",
        label: "Cumulative return",
        title: "Cumulative Return",
        kind: PlotKind::CumulativeReturn,
    },
    PlotOptionSpec {
        option: PlotOption::Drawdown,
        key: "drawdown",
        label: "Drawdown",
        title: "Drawdown",
        kind: PlotKind::Drawdown,
    },
    PlotOptionSpec {
        option: PlotOption::CorrelationMatrix,
        key: "corr_mat",
        label: "Correlation matrix",
        title: "Correlation Matrix",
        kind: PlotKind::CorrelationMatrix,
    },
    PlotOptionSpec {
        option: PlotOption::RollingReturn3M,
        key: "3mcr",
        label: "3M rolling cumulative return",
        title: "3 Months Rolling Cumulative Return",
        kind: PlotKind::Rolling {
            window: WINDOW_3M,
            statistic: RollingStatistic::CumulativeReturn,
        },
    },
    PlotOptionSpec {
        option: PlotOption::RollingReturn6M,
        key: "6mcr",
        label: "6M rolling cumulative return",
        title: "6 Months Rolling Cumulative Return",
        kind: PlotKind::Rolling {
            window: WINDOW_6M,
            statistic: RollingStatistic::CumulativeReturn,
        },
    },
    PlotOptionSpec {
        option: PlotOption::RollingVolatility3M,
        key: "3mrv",
        label: "3M rolling volatility",
        title: "3 Months Rolling Volatility",
        kind: PlotKind::Rolling {
            window: WINDOW_3M,
            statistic: RollingStatistic::Volatility,
        },
    },
    PlotOptionSpec {
        option: PlotOption::RollingVolatility6M,
        key: "6mrv",
        label: "6M rolling volatility",
        title: "6 Months Rolling Volatility",
        kind: PlotKind::Rolling {
            window: WINDOW_6M,
            statistic: RollingStatistic::Volatility,
        },
    },
    PlotOptionSpec {
        option: PlotOption::RollingCvar3M,
        key: "3mcvar",
        label: "3M rolling cvar",
        title: "3 Months Rolling CVAR(5%)",
        kind: PlotKind::Rolling {
            window: WINDOW_3M,
            statistic: RollingStatistic::Cvar,
        },
    },
    PlotOptionSpec {
        option: PlotOption::RollingCvar6M,
        key: "6mcvar",
        label: "6M rolling cvar",
        title: "6 Months Rolling CVAR(5%)",
        kind: PlotKind::Rolling {
            window: WINDOW_6M,
            statistic: RollingStatistic::Cvar,
        },
    },
    PlotOptionSpec {
        option: PlotOption::RollingSharpe3M,
        key: "3msr",
        label: "3M rolling sharpe ratio",
        title: "3 Months Rolling Sharpe Ratio",
        kind: PlotKind::Rolling {
            window: WINDOW_3M,
            statistic: RollingStatistic::Sharpe,
        },
    },
    PlotOptionSpec {
        option: PlotOption::RollingSharpe6M,
        key: "6msr",
        label: "6M rolling sharpe ratio",
        title: "6 Months Rolling Sharpe Ratio",
        kind: PlotKind::Rolling {
            window: WINDOW_6M,
            statistic: RollingStatistic::Sharpe,
        },
    },
];

impl PlotOption {
    /// 所有选项，按下拉框顺序。
    pub fn all() -> impl Iterator<Item = PlotOption> {
        PLOT_OPTIONS.iter().map(|spec| spec.option)
    }

    /// 选项在 [`PLOT_OPTIONS`] 表中的行。
    pub fn spec(self) -> &'static PlotOptionSpec {
        &PLOT_OPTIONS[self as usize]
    }

    pub fn key(self) -> &'static str {
        self.spec().key
    }

    pub fn label(self) -> &'static str {
        self.spec().label
    }

    pub fn title(self) -> &'static str {
        self.spec().title
    }

    pub fn kind(self) -> PlotKind {
        self.spec().kind
    }
}

impl fmt::Display for PlotOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// 未知的绘图选项键。
#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize, Error)]
#[error("unknown plot option: {0}")]
pub struct UnknownPlotOption(pub String);

impl FromStr for PlotOption {
    type Err = UnknownPlotOption;

    fn from_str(key: &str) -> Result<Self, Self::Err> {
        PLOT_OPTIONS
            .iter()
            .find(|spec| spec.key == key)
            .map(|spec| spec.option)
            .ok_or_else(|| UnknownPlotOption(key.to_string()))
    }
}
