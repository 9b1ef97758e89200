//! TickerUniverse 股票代码列表模块
//!
//! 看板下拉框可选的股票代码列表。列表在启动时构建一次，之后只读，
//! 通过 `Arc<TickerUniverse>` 在请求之间共享；刷新需要重启进程。

use crate::Ticker;
use serde::{Deserialize, Serialize};

/// 总是追加到列表末尾的 ETF 代码。
pub const UNIVERSE_EXTRAS: [&str; 2] = ["QQQ", "SPY"];

/// 未配置股票代码列表时使用的默认列表。
pub const DEFAULT_UNIVERSE: [&str; 20] = [
    "AAPL", "ABBV", "ADBE", "AMD", "AMZN", "AVGO", "BRK.B", "COST", "GOOG", "GOOGL", "JNJ",
    "JPM", "LLY", "META", "MSFT", "NFLX", "NVDA", "TSLA", "UNH", "XOM",
];

/// 可搜索的股票代码列表。
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize, Serialize)]
pub struct TickerUniverse {
    symbols: Vec<Ticker>,
}

impl TickerUniverse {
    /// 从股票代码构建列表：去除首尾空白、丢弃空字符串和重复项，并追加 [`UNIVERSE_EXTRAS`]。
    pub fn new<Iter, Symbol>(symbols: Iter) -> Self
    where
        Iter: IntoIterator<Item = Symbol>,
        Symbol: AsRef<str>,
    {
        let mut universe = Self::default();

        let symbols = symbols
            .into_iter()
            .map(|symbol| Ticker::new(symbol.as_ref().trim()))
            .chain(UNIVERSE_EXTRAS.into_iter().map(Ticker::new));

        for symbol in symbols {
            if !symbol.is_empty() && !universe.contains(&symbol) {
                universe.symbols.push(symbol);
            }
        }

        universe
    }

    /// 全部股票代码，保持构建顺序。
    pub fn symbols(&self) -> &[Ticker] {
        &self.symbols
    }

    /// 列表中是否包含 `symbol`。
    pub fn contains(&self, symbol: &str) -> bool {
        self.symbols.iter().any(|candidate| candidate == symbol)
    }

    /// 下拉框搜索：返回包含 `query` 子串或已被选中的股票代码。
    ///
    /// `query` 为空时返回 `None`，表示不更新当前选项。
    pub fn search(&self, query: &str, selected: &[Ticker]) -> Option<Vec<Ticker>> {
        if query.is_empty() {
            return None;
        }

        Some(
            self.symbols
                .iter()
                .filter(|symbol| symbol.contains(query) || selected.contains(*symbol))
                .cloned()
                .collect(),
        )
    }
}
